use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

use crate::models::{AttemptProgress, Severity, StatusMessage, EMOJI_CHECK};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub messages: usize,
    pub errors: usize,
    pub booked: bool,
    pub last_progress: AttemptProgress,
}

/// Front-end side of the worker: renders status messages in arrival order
/// and the attempt counter whenever it moves. Returns once a success arrives
/// or every status sender is gone.
pub async fn drain(
    mut status: mpsc::Receiver<StatusMessage>,
    mut progress: watch::Receiver<AttemptProgress>,
) -> ReportSummary {
    let mut summary = ReportSummary::default();
    let mut progress_open = true;

    loop {
        tokio::select! {
            biased;

            message = status.recv() => {
                let Some(message) = message else { break };
                summary.messages += 1;
                render(&message);
                match message.severity {
                    Severity::Error => summary.errors += 1,
                    Severity::Success => {
                        summary.booked = true;
                        break;
                    }
                    _ => {}
                }
            }
            changed = progress.changed(), if progress_open => {
                if changed.is_err() {
                    progress_open = false;
                    continue;
                }
                let current = *progress.borrow_and_update();
                summary.last_progress = current;
                info!("{} [{:.0}%]", current, current.ratio() * 100.0);
            }
        }
    }

    // Status can outrun progress under `biased`, so pick up the final count.
    summary.last_progress = *progress.borrow();
    summary
}

fn render(message: &StatusMessage) {
    match message.severity {
        Severity::Info => info!("{}", message.text),
        Severity::Success => info!("{} {}", EMOJI_CHECK, message.text),
        Severity::Warning => warn!("{}", message.text),
        Severity::Error => error!("{}", message.text),
    }
}
