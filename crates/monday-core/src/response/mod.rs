//! Mapping check-in results to what Monday says.

mod mood;
mod speech;

pub use mood::{Mood, MoodPicker, SeededMoodPicker};
pub use speech::{render_speech, SpokenResponse};

use serde::{Deserialize, Serialize};

use crate::streak::Outcome;

/// Streaks at or above this count get the long-streak reply.
pub const LONG_STREAK: u32 = 5;

/// Message category for a check-in result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "category", content = "mood")]
pub enum ResponseCategory {
    Error,
    Duplicate(Mood),
    FirstStreak,
    ShortStreak,
    LongStreak,
    /// Zero streak without an error; should not happen.
    Anomalous,
}

impl ResponseCategory {
    /// Error and duplicate replies close the session.
    pub fn ends_session(self) -> bool {
        matches!(self, ResponseCategory::Error | ResponseCategory::Duplicate(_))
    }
}

/// Pick the reply category. `picker` is consulted only for duplicates.
pub fn select_category(
    new_streak: u32,
    outcome: Outcome,
    picker: &mut impl MoodPicker,
) -> ResponseCategory {
    match (outcome, new_streak) {
        (Outcome::Error, _) => ResponseCategory::Error,
        (Outcome::Duplicate, _) => ResponseCategory::Duplicate(picker.pick()),
        (Outcome::Updated, 0) => ResponseCategory::Anomalous,
        (Outcome::Updated, 1) => ResponseCategory::FirstStreak,
        (Outcome::Updated, n) if n < LONG_STREAK => ResponseCategory::ShortStreak,
        (Outcome::Updated, _) => ResponseCategory::LongStreak,
    }
}
