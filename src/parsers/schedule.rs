use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::clean_text;
use crate::srt::selectors::{BOOK_BUTTON_IN_ROW, DEPARTURE_TIME_IN_ROW, FIRST_TRAIN_ROW};

static TIME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([01]\d|2[0-3]):[0-5]\d\b").expect("Invalid time regex"));

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(FIRST_TRAIN_ROW).expect("Invalid row selector"));
static BUTTON_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(BOOK_BUTTON_IN_ROW).expect("Invalid button selector"));
static TIME_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(DEPARTURE_TIME_IN_ROW).expect("Invalid time selector"));

/// The first train listed on the schedule search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainRow {
    /// Label of the booking button, e.g. `예약하기` or `매진`.
    pub label: String,
    pub departure_time: String,
}

/// Reads the first result row. `None` when there is no result table or the
/// row has no booking button.
pub fn parse_first_train(html: &str) -> Option<TrainRow> {
    let document = Html::parse_document(html);
    let row = document.select(&ROW_SELECTOR).next()?;
    let button = row.select(&BUTTON_SELECTOR).next()?;

    Some(TrainRow {
        label: clean_text(&button.text().collect::<String>()),
        departure_time: departure_time(&row),
    })
}

fn departure_time(row: &ElementRef) -> String {
    let Some(cell) = row.select(&TIME_SELECTOR).next() else {
        return String::new();
    };
    let text = clean_text(&cell.text().collect::<Vec<_>>().join(" "));
    match TIME_REGEX.find(&text) {
        Some(m) => m.as_str().to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn results_page(rows: &str) -> String {
        format!(
            r#"<html><body>
            <form id="result-form"><fieldset>
              <div>notice</div><div></div><div></div><div></div><div></div>
              <div class="tbl_wrap">
                <table>
                  <thead><tr><th>열차</th></tr></thead>
                  <tbody>{}</tbody>
                </table>
              </div>
            </fieldset></form>
            </body></html>"#,
            rows
        )
    }

    fn row(time_cell: &str, label: &str) -> String {
        format!(
            r#"<tr>
                <td>SRT</td><td>301</td><td>동탄</td>
                <td class="time">{}</td><td>부산</td>
                <td><a href="javascript:void(0)" class="btn_small">
                    <span>{}</span></a></td>
              </tr>"#,
            time_cell, label
        )
    }

    #[test]
    fn reads_label_and_time_of_first_row() {
        let html = results_page(&format!(
            "{}{}",
            row("<div>동탄</div><em>07:12</em>", "예약하기"),
            row("<em>07:40</em>", "매진")
        ));
        assert_eq!(
            parse_first_train(&html),
            Some(TrainRow {
                label: "예약하기".to_string(),
                departure_time: "07:12".to_string(),
            })
        );
    }

    #[test]
    fn sold_out_label_is_reported_as_is() {
        let html = results_page(&row("06:05", " 매진 "));
        let train = parse_first_train(&html).unwrap();
        assert_eq!(train.label, "매진");
        assert_eq!(train.departure_time, "06:05");
    }

    #[test]
    fn time_cell_without_clock_falls_back_to_text() {
        let html = results_page(&row("곧 출발", "예약하기"));
        assert_eq!(parse_first_train(&html).unwrap().departure_time, "곧 출발");
    }

    #[test]
    fn missing_table_or_button_yields_none() {
        assert_eq!(parse_first_train("<html><body>점검 중</body></html>"), None);
        let no_button = results_page("<tr><td>1</td><td>2</td><td>3</td><td class=\"time\">07:00</td><td>5</td><td>-</td></tr>");
        assert_eq!(parse_first_train(&no_button), None);
    }
}
