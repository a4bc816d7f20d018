pub mod embed;

use reqwest::Client;
use serde_json::json;
use tracing::{error, info};

use crate::error::{ReservationError, Result};
use crate::models::{BookingDetails, ReservationRequest};
use embed::create_embed;

pub async fn send_notification(
    client: &Client,
    webhook_url: &str,
    details: &BookingDetails,
    request: &ReservationRequest,
    attempts: u32,
) -> Result<()> {
    let embed = create_embed(details, request, attempts);

    let payload = json!({
        "embeds": [embed]
    });

    let response = client
        .post(webhook_url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| ReservationError::Notify(format!("Failed to send Discord webhook: {}", e)))?;

    if response.status().is_success() {
        info!("Sent Discord notification for {}", request);
        Ok(())
    } else {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        error!("Discord webhook failed with status {}: {}", status, error_text);
        Err(ReservationError::Notify(format!(
            "Discord webhook failed: {} - {}",
            status, error_text
        )))
    }
}
