use tokio::sync::{mpsc, watch};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::browser::BookingBrowser;
use crate::config::PollingSettings;
use crate::models::{
    AttemptOutcome, AttemptProgress, BookingDetails, Credentials, ReservationRequest,
    StatusMessage,
};
use crate::srt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Booked {
        details: BookingDetails,
        attempts: u32,
    },
    Exhausted {
        attempts: u32,
    },
    Cancelled {
        attempts: u32,
    },
    LoginFailed,
}

/// Channels through which the worker reports to the front end.
pub struct StatusChannels {
    pub status: mpsc::Sender<StatusMessage>,
    pub progress: watch::Sender<AttemptProgress>,
}

impl StatusChannels {
    async fn emit(&self, message: StatusMessage) {
        if self.status.send(message).await.is_err() {
            debug!("Status receiver dropped, message discarded");
        }
    }
}

/// Login followed by a bounded polling loop over the schedule page.
pub struct Reserver {
    polling: PollingSettings,
}

impl Reserver {
    pub fn new(polling: PollingSettings) -> Self {
        Self { polling }
    }

    /// Drives the whole session and closes the browser afterwards, whatever
    /// the outcome.
    pub async fn run(
        &self,
        mut browser: Box<dyn BookingBrowser>,
        credentials: &Credentials,
        request: &ReservationRequest,
        cancel: &CancellationToken,
        channels: &StatusChannels,
    ) -> RunOutcome {
        let outcome = self
            .drive(browser.as_ref(), credentials, request, cancel, channels)
            .await;

        if let Err(e) = browser.close().await {
            warn!("Failed to close browser: {}", e);
        }
        outcome
    }

    async fn drive(
        &self,
        browser: &dyn BookingBrowser,
        credentials: &Credentials,
        request: &ReservationRequest,
        cancel: &CancellationToken,
        channels: &StatusChannels,
    ) -> RunOutcome {
        let settle = self.polling.settle();

        if let Err(e) = srt::login(browser, credentials, settle).await {
            channels
                .emit(StatusMessage::error(format!("로그인 실패: {}", e)))
                .await;
            return RunOutcome::LoginFailed;
        }
        channels.emit(StatusMessage::info("로그인 성공")).await;

        let max_attempts = self.polling.max_attempts;
        let mut attempts = 0;

        while attempts < max_attempts {
            if cancel.is_cancelled() {
                return RunOutcome::Cancelled { attempts };
            }

            attempts += 1;
            channels
                .progress
                .send_replace(AttemptProgress::new(attempts, max_attempts));
            channels
                .emit(StatusMessage::info(format!("예약 시도 #{}", attempts)))
                .await;
            info!("Attempt {}/{} for {}", attempts, max_attempts, request);

            match srt::attempt_reservation(browser, request, settle).await {
                AttemptOutcome::Booked(details) => {
                    channels.emit(StatusMessage::success(details.to_string())).await;
                    cancel.cancel();
                    return RunOutcome::Booked { details, attempts };
                }
                AttemptOutcome::Unavailable { label } => {
                    channels
                        .emit(StatusMessage::info(format!(
                            "현재 예약 가능한 좌석이 없습니다. (상태: {})",
                            label
                        )))
                        .await;
                }
                AttemptOutcome::Failed { reason } => {
                    channels.emit(StatusMessage::error(reason)).await;
                }
            }

            if attempts == max_attempts {
                break;
            }

            tokio::select! {
                _ = cancel.cancelled() => return RunOutcome::Cancelled { attempts },
                _ = sleep(self.polling.interval()) => {}
            }

            if let Err(e) = browser.reload().await {
                channels
                    .emit(StatusMessage::error(format!("페이지 새로고침 실패: {}", e)))
                    .await;
            }
        }

        channels
            .emit(StatusMessage::warning(format!(
                "최대 시도 횟수({}회)에 도달했습니다.",
                max_attempts
            )))
            .await;
        RunOutcome::Exhausted { attempts }
    }
}
