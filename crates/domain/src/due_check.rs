use crate::reminder_record::ReminderRecord;
use chrono::NaiveDateTime;

/// Result of evaluating a `ReminderRecord` against a reference minute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueCheck {
    /// A reminder should be dispatched now
    Due,
    NotDue(NotDueReason),
    /// The record matches the reference minute but cannot be dispatched
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotDueReason {
    OutsideWindow,
    TimeMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingEmail,
}

/// Decides whether `record` is due at `reference`, which is expected to be
/// the scheduler's local wall clock time.
///
/// A record is due iff the reference date lies within the inclusive reminder
/// window and the record time equals the zero padded `HH:MM` of the
/// reference. Records without an email are reported as skipped.
pub fn evaluate(record: &ReminderRecord, reference: &NaiveDateTime) -> DueCheck {
    if !record.is_active_on(reference.date()) {
        return DueCheck::NotDue(NotDueReason::OutsideWindow);
    }
    if !record.time.matches(reference) {
        return DueCheck::NotDue(NotDueReason::TimeMismatch);
    }
    if record.recipient().is_none() {
        return DueCheck::Skipped(SkipReason::MissingEmail);
    }
    DueCheck::Due
}

pub fn is_due(record: &ReminderRecord, reference: &NaiveDateTime) -> bool {
    evaluate(record, reference) == DueCheck::Due
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn record(start: (i32, u32, u32), end: (i32, u32, u32), time: &str) -> ReminderRecord {
        ReminderRecord {
            id: 1,
            patient_id: "P-1".into(),
            name: "Ada".into(),
            phone: "555".into(),
            email: Some("ada@example.com".into()),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            time: time.parse().unwrap(),
            created_at: Utc::now(),
        }
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn it_is_due_inside_window_at_exact_minute() {
        let january = record((2024, 1, 1), (2024, 1, 31), "09:00");

        assert!(is_due(&january, &at(2024, 1, 15, 9, 0)));
        assert!(!is_due(&january, &at(2024, 1, 15, 9, 1)));
        assert!(!is_due(&january, &at(2024, 2, 1, 9, 0)));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let january = record((2024, 1, 1), (2024, 1, 31), "09:00");

        assert!(is_due(&january, &at(2024, 1, 1, 9, 0)));
        assert!(is_due(&january, &at(2024, 1, 31, 9, 0)));
        assert_eq!(
            evaluate(&january, &at(2023, 12, 31, 9, 0)),
            DueCheck::NotDue(NotDueReason::OutsideWindow)
        );
    }

    #[test]
    fn it_is_never_due_outside_the_window() {
        let single_day = record((2024, 3, 10), (2024, 3, 10), "00:00");
        for day in 1..=31 {
            if day == 10 {
                continue;
            }
            for hour in 0..24 {
                assert!(!is_due(&single_day, &at(2024, 3, day, hour, 0)));
            }
        }
    }

    #[test]
    fn it_is_never_due_when_time_differs() {
        let record = record((2024, 1, 1), (2024, 1, 31), "13:37");
        for hour in 0..24 {
            for minute in 0..60 {
                let due = is_due(&record, &at(2024, 1, 20, hour, minute));
                assert_eq!(due, hour == 13 && minute == 37);
            }
        }
    }

    #[test]
    fn missing_email_is_a_skip() {
        let mut no_email = record((2024, 1, 1), (2024, 1, 31), "09:00");
        no_email.email = None;
        assert_eq!(
            evaluate(&no_email, &at(2024, 1, 15, 9, 0)),
            DueCheck::Skipped(SkipReason::MissingEmail)
        );
        assert!(!is_due(&no_email, &at(2024, 1, 15, 9, 0)));

        // Not matching the minute takes precedence over the missing email
        assert_eq!(
            evaluate(&no_email, &at(2024, 1, 15, 10, 0)),
            DueCheck::NotDue(NotDueReason::TimeMismatch)
        );
    }
}
