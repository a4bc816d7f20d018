use chrono::Local;
use serde_json::{json, Value};

use crate::models::{
    BookingDetails, ReservationRequest, EMOJI_ATTEMPTS, EMOJI_DATE, EMOJI_ROUTE, EMOJI_TIME,
    EMOJI_TRAIN,
};

const EMBED_COLOR: u32 = 0x6B2D8E;

pub fn create_embed(details: &BookingDetails, request: &ReservationRequest, attempts: u32) -> Value {
    let fields = vec![
        json!({
            "name": format!("{} 구간:", EMOJI_ROUTE),
            "value": format!("**{} → {}**", details.departure, details.arrival),
            "inline": false
        }),
        json!({
            "name": format!("{} 날짜:", EMOJI_DATE),
            "value": format!("**{}**", request.date.format("%Y-%m-%d")),
            "inline": true
        }),
        json!({
            "name": format!("{} 출발 시간:", EMOJI_TIME),
            "value": format!("**{}**", departure_time_display(details)),
            "inline": true
        }),
        json!({
            "name": format!("{} 시도 횟수:", EMOJI_ATTEMPTS),
            "value": format!("**{}**", attempts),
            "inline": true
        }),
    ];

    json!({
        "title": format!("{} SRT 예약 성공", EMOJI_TRAIN),
        "description": "결제 기한 안에 SRT 앱이나 홈페이지에서 결제를 완료하세요.",
        "color": EMBED_COLOR,
        "fields": fields,
        "footer": {
            "text": format!("SRT Reserver • {}", Local::now().format("%Y-%m-%d %H:%M:%S"))
        }
    })
}

fn departure_time_display(details: &BookingDetails) -> &str {
    if details.departure_time.is_empty() {
        "❓"
    } else {
        &details.departure_time
    }
}
