//! Daily check-in streaks.
//!
//! - [`StreakRecord`]: the persisted per-user state
//! - [`evaluate`]: pure transition from (today, previous record) to the next streak
//! - [`CheckInService`]: read, evaluate and write against a [`crate::storage::StreakStore`]

mod evaluator;
mod service;

pub use evaluator::evaluate;
pub use service::CheckInService;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Wire format of `lastCheckDate`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The current UTC calendar date. Computed once per request.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Persisted streak state for one user.
///
/// The date is held as the raw stored string so a corrupt value can reach
/// [`evaluate`] instead of failing the read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRecord {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_check_date: Option<String>,
    #[serde(default)]
    pub streak: u32,
}

/// How the stored `lastCheckDate` reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastCheck<'a> {
    /// No date stored (or an empty string)
    Missing,
    /// Present but not a calendar date
    Corrupt(&'a str),
    On(NaiveDate),
}

impl StreakRecord {
    /// Record for a check-in on `date`.
    pub fn new(user_id: impl Into<String>, date: NaiveDate, streak: u32) -> Self {
        Self {
            user_id: user_id.into(),
            last_check_date: Some(date.format(DATE_FORMAT).to_string()),
            streak,
        }
    }

    pub fn last_check(&self) -> LastCheck<'_> {
        match self.last_check_date.as_deref() {
            None | Some("") => LastCheck::Missing,
            Some(raw) => match parse_date(raw) {
                Ok(date) => LastCheck::On(date),
                Err(_) => LastCheck::Corrupt(raw),
            },
        }
    }
}

/// Categorical result of a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Streak written for today
    Updated,
    /// Already checked in today, nothing written
    Duplicate,
    /// The store failed, nothing written
    Error,
}

/// Output of evaluating a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub new_streak: u32,
    pub increased: bool,
    pub outcome: Outcome,
}

impl Evaluation {
    /// A fresh streak of one.
    pub fn started() -> Self {
        Self {
            new_streak: 1,
            increased: true,
            outcome: Outcome::Updated,
        }
    }

    pub fn continued(new_streak: u32) -> Self {
        Self {
            new_streak,
            increased: true,
            outcome: Outcome::Updated,
        }
    }

    pub fn duplicate(streak: u32) -> Self {
        Self {
            new_streak: streak,
            increased: false,
            outcome: Outcome::Duplicate,
        }
    }

    pub fn failed() -> Self {
        Self {
            new_streak: 0,
            increased: false,
            outcome: Outcome::Error,
        }
    }
}
