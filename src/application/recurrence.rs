//! Due-date arithmetic for recurring items.
//!
//! Candidates are always computed from the original due moment (`due + k * step`)
//! rather than by repeatedly stepping the previous result, so a monthly item due on
//! the 31st lands on the 31st again after passing through a shorter month.
//! Month-end overflow follows chrono's clamping: Jan 31 + 1 month = Feb 28/29.

use chrono::{Datelike, Days, Months, NaiveDateTime};

use crate::domain::value_objects::{CalendarUnit, RecurrenceFrequency};

/// Next occurrence of `current_due` that lies strictly after `now`.
/// A due moment still in the future is returned unchanged; missed occurrences are skipped.
pub fn next_occurrence(
    current_due: NaiveDateTime,
    frequency: RecurrenceFrequency,
    now: NaiveDateTime,
) -> NaiveDateTime {
    if current_due > now {
        return current_due;
    }
    first_occurrence_after(current_due, frequency, now)
}

/// Occurrence following `current_due` once it has been consumed: at least one step ahead
/// and strictly after `now`.
pub fn roll_forward(
    current_due: NaiveDateTime,
    frequency: RecurrenceFrequency,
    now: NaiveDateTime,
) -> NaiveDateTime {
    first_occurrence_after(current_due, frequency, now)
}

/// `due` moved by `steps` recurrence steps. `None` past chrono's representable range.
pub fn advance(
    due: NaiveDateTime,
    frequency: RecurrenceFrequency,
    steps: u32,
) -> Option<NaiveDateTime> {
    let (unit, interval) = frequency.step();
    let count = interval.checked_mul(steps)?;
    match unit {
        CalendarUnit::Day => due.checked_add_days(Days::new(count as u64)),
        CalendarUnit::Month => due.checked_add_months(Months::new(count)),
    }
}

// smallest due + k*step (k >= 1) strictly after `now`
fn first_occurrence_after(
    due: NaiveDateTime,
    frequency: RecurrenceFrequency,
    now: NaiveDateTime,
) -> NaiveDateTime {
    let mut steps = skipped_steps(due, frequency, now).max(1);
    loop {
        match advance(due, frequency, steps) {
            Some(candidate) if candidate > now => return candidate,
            Some(_) => steps += 1,
            // out of calendar range: nothing later exists
            None => return due,
        }
    }
}

// lower bound on whole steps between `due` and `now`; every k below it lands at or before `now`
fn skipped_steps(due: NaiveDateTime, frequency: RecurrenceFrequency, now: NaiveDateTime) -> u32 {
    if now <= due {
        return 0;
    }
    let (unit, interval) = frequency.step();
    let elapsed_units = match unit {
        CalendarUnit::Day => (now - due).num_days(),
        CalendarUnit::Month => {
            let months = (now.year() as i64 - due.year() as i64) * 12 + now.month() as i64
                - due.month() as i64;
            months - 1
        }
    };
    u32::try_from(elapsed_units.max(0) / interval as i64).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn future_due_is_returned_unchanged() {
        let now = at(2026, 10, 16, 12, 0);
        let due = at(2026, 10, 20, 9, 0);
        for f in RecurrenceFrequency::ALL {
            assert_eq!(next_occurrence(due, f, now), due);
        }
    }

    #[test]
    fn daily_three_days_late_lands_on_tomorrow_at_same_time() {
        let now = at(2026, 10, 16, 12, 0);
        let due = at(2026, 10, 13, 9, 0);
        assert_eq!(
            next_occurrence(due, RecurrenceFrequency::Daily, now),
            at(2026, 10, 17, 9, 0)
        );
    }

    #[test]
    fn daily_later_in_the_day_stays_today() {
        let now = at(2026, 10, 16, 12, 0);
        let due = at(2026, 10, 13, 18, 45);
        assert_eq!(
            next_occurrence(due, RecurrenceFrequency::Daily, now),
            at(2026, 10, 16, 18, 45)
        );
    }

    #[test]
    fn due_exactly_now_moves_forward() {
        let now = at(2026, 10, 16, 9, 0);
        assert_eq!(
            next_occurrence(now, RecurrenceFrequency::Weekly, now),
            at(2026, 10, 23, 9, 0)
        );
    }

    #[test]
    fn weekly_skips_missed_weeks() {
        let now = at(2026, 10, 16, 12, 0);
        let due = at(2026, 9, 1, 7, 30);
        let next = next_occurrence(due, RecurrenceFrequency::Weekly, now);
        assert_eq!(next, at(2026, 10, 20, 7, 30));
        assert_eq!((next - due).num_days() % 7, 0);
    }

    #[test]
    fn monthly_keeps_day_of_month_after_short_month() {
        let due = at(2026, 1, 31, 9, 0);
        assert_eq!(
            next_occurrence(due, RecurrenceFrequency::Monthly, at(2026, 2, 1, 0, 0)),
            at(2026, 2, 28, 9, 0)
        );
        assert_eq!(
            next_occurrence(due, RecurrenceFrequency::Monthly, at(2026, 3, 1, 0, 0)),
            at(2026, 3, 31, 9, 0)
        );
    }

    #[test]
    fn monthly_same_month_later_day() {
        let due = at(2026, 1, 10, 9, 0);
        assert_eq!(
            next_occurrence(due, RecurrenceFrequency::Monthly, at(2026, 5, 20, 0, 0)),
            at(2026, 6, 10, 9, 0)
        );
        assert_eq!(
            next_occurrence(due, RecurrenceFrequency::Monthly, at(2026, 5, 5, 0, 0)),
            at(2026, 5, 10, 9, 0)
        );
    }

    #[test]
    fn yearly_from_leap_day() {
        let due = at(2024, 2, 29, 8, 0);
        assert_eq!(
            next_occurrence(due, RecurrenceFrequency::Yearly, at(2026, 10, 16, 0, 0)),
            at(2027, 2, 28, 8, 0)
        );
    }

    #[test]
    fn result_is_always_after_now() {
        let now = at(2026, 10, 16, 12, 0);
        for f in RecurrenceFrequency::ALL {
            for days_back in [0, 1, 30, 400, 3650] {
                let due = now - chrono::Duration::days(days_back) - chrono::Duration::minutes(1);
                let next = next_occurrence(due, f, now);
                assert!(next > now, "{f} from {due} gave {next}");
                assert_eq!(next.time(), due.time());
            }
        }
    }

    #[test]
    fn roll_forward_consumes_a_future_occurrence() {
        let now = at(2026, 10, 16, 12, 0);
        let due = at(2026, 10, 18, 9, 0);
        assert_eq!(
            roll_forward(due, RecurrenceFrequency::Daily, now),
            at(2026, 10, 19, 9, 0)
        );
        assert_eq!(
            roll_forward(at(2026, 10, 1, 9, 0), RecurrenceFrequency::Daily, now),
            at(2026, 10, 17, 9, 0)
        );
    }
}
