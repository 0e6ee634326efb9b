//! Check-in orchestration: read, evaluate, persist.

use chrono::NaiveDate;
use tracing::{error, info, warn};

use super::{evaluate, Evaluation, LastCheck, Outcome, StreakRecord};
use crate::error::{Result, StoreError, ValidationError};
use crate::storage::StreakStore;

/// Runs check-ins against an injected store.
///
/// Store failures never escape: they are logged and reported as
/// [`Outcome::Error`] with a streak of zero.
pub struct CheckInService<S> {
    store: S,
    conditional_writes: bool,
}

impl<S: StreakStore> CheckInService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            conditional_writes: false,
        }
    }

    /// Write only if the stored date is still the one that was read.
    pub fn with_conditional_writes(mut self, enabled: bool) -> Self {
        self.conditional_writes = enabled;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record a check-in for `user_id` on `today`.
    ///
    /// # Errors
    /// Returns a validation error for an empty `user_id`. Storage failures are
    /// reported through the returned [`Evaluation`], not as errors.
    pub fn check_in(&self, user_id: &str, today: NaiveDate) -> Result<Evaluation> {
        if user_id.trim().is_empty() {
            return Err(ValidationError::EmptyUserId.into());
        }

        let current = match self.store.get(user_id) {
            Ok(record) => record,
            Err(e) => {
                error!("[checkin] read failed user_id={} err={}", user_id, e);
                return Ok(Evaluation::failed());
            }
        };

        if let Some(LastCheck::Corrupt(raw)) = current.as_ref().map(StreakRecord::last_check) {
            warn!(
                "[checkin] corrupt lastCheckDate user_id={} value={:?}, resetting streak",
                user_id, raw
            );
        }

        let evaluation = evaluate(today, current.as_ref());
        if evaluation.outcome != Outcome::Updated {
            info!(
                "[checkin] user_id={} outcome={:?} streak={}",
                user_id, evaluation.outcome, evaluation.new_streak
            );
            return Ok(evaluation);
        }

        let next = StreakRecord::new(user_id, today, evaluation.new_streak);
        let persisted = if self.conditional_writes {
            let expected = current.as_ref().and_then(|r| r.last_check_date.as_deref());
            match self.store.put_if_unchanged(&next, expected) {
                Ok(true) => Ok(evaluation),
                Ok(false) => self.resolve_lost_race(user_id, today),
                Err(e) => Err(e),
            }
        } else {
            self.store.put(&next).map(|()| evaluation)
        };

        match persisted {
            Ok(evaluation) => {
                info!(
                    "[checkin] user_id={} outcome={:?} streak={} increased={}",
                    user_id, evaluation.outcome, evaluation.new_streak, evaluation.increased
                );
                Ok(evaluation)
            }
            Err(e) => {
                error!("[checkin] write failed user_id={} err={}", user_id, e);
                Ok(Evaluation::failed())
            }
        }
    }

    /// One follow-up read after a lost conditional write.
    fn resolve_lost_race(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> std::result::Result<Evaluation, StoreError> {
        let winner = self.store.get(user_id)?;
        match winner {
            Some(record) if record.last_check() == LastCheck::On(today) => {
                warn!(
                    "[checkin] concurrent check-in won user_id={} streak={}",
                    user_id, record.streak
                );
                Ok(Evaluation::duplicate(record.streak))
            }
            _ => Err(StoreError::Conflict {
                user_id: user_id.to_string(),
            }),
        }
    }
}
