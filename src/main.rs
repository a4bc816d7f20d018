use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::process::ExitCode;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod browser;
mod cli;
mod config;
mod discord;
mod error;
mod models;
mod parsers;
mod reporter;
mod reserver;
mod srt;
mod utils;

use crate::browser::ChromeBrowser;
use crate::cli::Cli;
use crate::config::Config;
use crate::models::{AttemptProgress, StatusMessage, EMOJI_TRAIN};
use crate::reserver::{Reserver, RunOutcome, StatusChannels};

const STATUS_QUEUE_CAPACITY: usize = 64;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("srt_reserver={}", level).parse()?),
        )
        .init();

    info!("{} Starting SRT Reserver", EMOJI_TRAIN);

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let request = cli.reservation_request(Local::now().naive_local())?;
    info!("Reservation target: {}", request);

    let browser = ChromeBrowser::launch(&config.browser)
        .await
        .context("Failed to launch Chrome")?;

    let (status_tx, status_rx) = mpsc::channel(STATUS_QUEUE_CAPACITY);
    let (progress_tx, progress_rx) = watch::channel(AttemptProgress::new(0, config.polling.max_attempts));
    let cancel = CancellationToken::new();

    // Ctrl+C plays the part of the stop button.
    let stop_token = cancel.clone();
    let stop_tx = status_tx.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                stop_token.cancel();
                let _ = stop_tx.send(StatusMessage::warning("예약이 중지되었습니다.")).await;
            }
            _ = stop_token.cancelled() => {}
        }
    });

    let worker = {
        let reserver = Reserver::new(config.polling.clone());
        let credentials = config.credentials.clone();
        let request = request.clone();
        let cancel = cancel.clone();
        let channels = StatusChannels {
            status: status_tx,
            progress: progress_tx,
        };
        tokio::spawn(async move {
            let outcome = reserver
                .run(Box::new(browser), &credentials, &request, &cancel, &channels)
                .await;
            // Releases the stop task so the status queue can close.
            cancel.cancel();
            outcome
        })
    };

    let summary = reporter::drain(status_rx, progress_rx).await;
    let outcome = worker.await.context("Reservation worker panicked")?;
    info!(
        "{} status messages, {} errors, last {}",
        summary.messages, summary.errors, summary.last_progress
    );
    if summary.booked != matches!(outcome, RunOutcome::Booked { .. }) {
        warn!("Status queue and worker outcome disagree on the booking result");
    }

    let code = match outcome {
        RunOutcome::Booked { details, attempts } => {
            info!("Reserved after {} attempt(s)", attempts);
            if let Some(webhook) = &config.notify.discord_webhook {
                let client = utils::http::create_client(&config.browser.user_agent)?;
                if let Err(e) =
                    discord::send_notification(&client, webhook, &details, &request, attempts).await
                {
                    error!("Failed to send Discord notification: {}", e);
                }
            }
            ExitCode::SUCCESS
        }
        RunOutcome::Exhausted { attempts } => {
            warn!("No seat after {} attempts", attempts);
            ExitCode::from(2)
        }
        RunOutcome::Cancelled { attempts } => {
            warn!("Stopped after {} attempt(s)", attempts);
            ExitCode::from(130)
        }
        RunOutcome::LoginFailed => ExitCode::FAILURE,
    };

    Ok(code)
}
