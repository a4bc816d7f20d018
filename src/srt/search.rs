use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::selectors::{
    ARRIVAL_INPUT, DEPARTURE_INPUT, FIRST_TRAIN_BOOK_BUTTON, HOUR_SELECT, SEARCH_BUTTON,
};
use super::{BOOKABLE_LABEL, SCHEDULE_URL};
use crate::browser::BookingBrowser;
use crate::error::{ReservationError, Result};
use crate::models::{AttemptOutcome, BookingDetails, ReservationRequest};
use crate::parsers::{parse_first_train, TrainRow};

/// Runs one search and books the first train if its button offers a seat.
/// Errors never escape: they come back as [`AttemptOutcome::Failed`].
pub async fn attempt_reservation(
    browser: &dyn BookingBrowser,
    request: &ReservationRequest,
    settle: Duration,
) -> AttemptOutcome {
    let train = match search(browser, request, settle).await {
        Ok(Some(train)) => train,
        Ok(None) => {
            let err = ReservationError::ElementNotFound {
                selector: FIRST_TRAIN_BOOK_BUTTON.to_string(),
            };
            return AttemptOutcome::Failed {
                reason: format!("예약하기 버튼 클릭 중 오류 발생: {}", err),
            };
        }
        Err(e) => {
            warn!("Search for {} failed: {}", request, e);
            return AttemptOutcome::Failed {
                reason: format!("예약 시도 중 오류 발생: {}", e),
            };
        }
    };

    debug!("First train {} shows '{}'", train.departure_time, train.label);
    if train.label != BOOKABLE_LABEL {
        return AttemptOutcome::Unavailable { label: train.label };
    }

    if let Err(e) = book(browser, settle).await {
        return AttemptOutcome::Failed {
            reason: format!("예약하기 버튼 클릭 중 오류 발생: {}", e),
        };
    }

    AttemptOutcome::Booked(BookingDetails {
        departure: request.departure,
        arrival: request.arrival,
        departure_time: train.departure_time,
    })
}

async fn search(
    browser: &dyn BookingBrowser,
    request: &ReservationRequest,
    settle: Duration,
) -> Result<Option<TrainRow>> {
    debug!(
        "Searching {} → {} on {} from {}",
        request.departure,
        request.arrival,
        request.date_param(),
        request.hour_label()
    );
    browser.goto(SCHEDULE_URL).await?;
    sleep(settle).await;

    browser
        .type_text(DEPARTURE_INPUT, request.departure.name())
        .await?;
    browser.type_text(ARRIVAL_INPUT, request.arrival.name()).await?;
    let hour = request.hour_label();
    if !browser.select_option_containing(HOUR_SELECT, &hour).await? {
        warn!("No departure-hour option for {}, searching with the form's current hour", hour);
    }

    browser.click(SEARCH_BUTTON).await?;
    sleep(settle).await;

    let html = browser.content().await?;
    Ok(parse_first_train(&html))
}

async fn book(browser: &dyn BookingBrowser, settle: Duration) -> Result<()> {
    browser.click(FIRST_TRAIN_BOOK_BUTTON).await?;
    sleep(settle / 2).await;
    Ok(())
}
