//! Streak transition rules.

use chrono::NaiveDate;

use super::{Evaluation, LastCheck, StreakRecord};

/// Compute the next streak state for a check-in on `today`.
///
/// Rules, in order:
/// 1. no record or no stored date: start at 1
/// 2. stored date unparseable: reset to 1
/// 3. stored date is today: duplicate, streak unchanged
/// 4. stored date is yesterday: streak + 1
/// 5. anything else (a gap, or a future date): reset to 1
pub fn evaluate(today: NaiveDate, current: Option<&StreakRecord>) -> Evaluation {
    let Some(record) = current else {
        return Evaluation::started();
    };

    match record.last_check() {
        LastCheck::Missing | LastCheck::Corrupt(_) => Evaluation::started(),
        LastCheck::On(last) if last == today => Evaluation::duplicate(record.streak),
        LastCheck::On(last) if today.pred_opt() == Some(last) => {
            Evaluation::continued(record.streak.saturating_add(1))
        }
        LastCheck::On(_) => Evaluation::started(),
    }
}
