use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Station;
use crate::error::{ReservationError, Result};

/// What to book: one route on one day, first train from the given hour on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub departure: Station,
    pub arrival: Station,
    pub date: NaiveDate,
    pub hour: u32,
}

impl ReservationRequest {
    pub fn new(
        departure: Station,
        arrival: Station,
        date: NaiveDate,
        hour: u32,
        today: NaiveDate,
    ) -> Result<Self> {
        let request = Self {
            departure,
            arrival,
            date,
            hour,
        };
        request.validate(today)?;
        Ok(request)
    }

    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        if !self.departure.is_departure() {
            return Err(ReservationError::InvalidRequest(format!(
                "{} is not a departure station",
                self.departure
            )));
        }
        if self.departure == self.arrival {
            return Err(ReservationError::InvalidRequest(format!(
                "departure and arrival are both {}",
                self.departure
            )));
        }
        if self.date < today {
            return Err(ReservationError::InvalidRequest(format!(
                "{} is in the past",
                self.date
            )));
        }
        if self.hour > 23 {
            return Err(ReservationError::InvalidRequest(format!(
                "hour {} is out of range",
                self.hour
            )));
        }
        Ok(())
    }

    /// Label of the departure-hour `<option>` on the schedule form.
    pub fn hour_label(&self) -> String {
        format!("{:02}:00", self.hour)
    }

    pub fn date_param(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }
}

impl fmt::Display for ReservationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {} on {} from {}",
            self.departure,
            self.arrival,
            self.date.format("%Y-%m-%d"),
            self.hour_label()
        )
    }
}
