use chrono::{NaiveDate, NaiveDateTime, Timelike};
use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::models::{ReservationRequest, Station};

#[derive(Debug, Clone, Parser)]
#[command(name = "srt-reserver")]
#[command(about = "Polls SRT until a seat opens up on the first train, then reserves it")]
pub struct Cli {
    /// Departure station, Korean name or alias (default 동탄)
    #[arg(long)]
    pub departure: Option<Station>,

    /// Arrival station, Korean name or alias (default 부산)
    #[arg(long)]
    pub arrival: Option<Station>,

    /// Travel date as YYYY-MM-DD (default today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Earliest departure hour, 0-23 (default the current hour)
    #[arg(long)]
    pub hour: Option<u32>,

    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Seconds to wait between attempts
    #[arg(long)]
    pub interval_secs: Option<u64>,

    #[arg(long)]
    pub headless: bool,

    /// Configuration file (default ./srt.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Cli {
    /// Command-line flags take precedence over file and environment values.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(max_attempts) = self.max_attempts {
            config.polling.max_attempts = max_attempts;
        }
        if let Some(interval_secs) = self.interval_secs {
            config.polling.interval_secs = interval_secs;
        }
        if self.headless {
            config.browser.headless = true;
        }
    }

    pub fn reservation_request(&self, now: NaiveDateTime) -> Result<ReservationRequest> {
        let today = now.date();
        ReservationRequest::new(
            self.departure.unwrap_or(Station::DEFAULT_DEPARTURE),
            self.arrival.unwrap_or(Station::DEFAULT_ARRIVAL),
            self.date.unwrap_or(today),
            self.hour.unwrap_or_else(|| now.hour()),
            today,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 35, 0)
            .unwrap()
    }

    #[test]
    fn defaults_follow_the_booking_form() {
        let cli = Cli::parse_from(["srt-reserver"]);
        let request = cli.reservation_request(now()).unwrap();

        assert_eq!(request.departure, Station::Dongtan);
        assert_eq!(request.arrival, Station::Busan);
        assert_eq!(request.date, now().date());
        assert_eq!(request.hour_label(), "14:00");
    }

    #[test]
    fn parses_stations_and_date() {
        let cli = Cli::parse_from([
            "srt-reserver",
            "--departure",
            "대전",
            "--arrival",
            "suseo",
            "--date",
            "2026-10-25",
            "--hour",
            "6",
        ]);
        let request = cli.reservation_request(now()).unwrap();

        assert_eq!(request.departure, Station::Daejeon);
        assert_eq!(request.arrival, Station::Suseo);
        assert_eq!(request.date_param(), "20261025");
        assert_eq!(request.hour_label(), "06:00");
    }

    #[test]
    fn unknown_station_is_rejected_by_the_parser() {
        assert!(Cli::try_parse_from(["srt-reserver", "--departure", "서울"]).is_err());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "srt-reserver",
            "--max-attempts",
            "10",
            "--interval-secs",
            "5",
            "--headless",
        ]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.polling.max_attempts, 10);
        assert_eq!(config.polling.interval_secs, 5);
        assert!(config.browser.headless);
        assert_eq!(config.polling.settle_millis, 2000);
    }
}
