use crate::shared::entity::Entity;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt::Display, str::FromStr};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// A `ReminderRecord` describes a patient that should receive a medication
/// reminder every day at `time` while the current date is inside the
/// inclusive window `start_date..=end_date`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderRecord {
    /// Internal numeric id assigned by the roster store
    pub id: i64,
    /// External identity of the patient, unique within the roster
    pub patient_id: String,
    pub name: String,
    pub phone: String,
    /// Records without an email can never be dispatched
    pub email: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Wall clock minute in scheduler local time
    pub time: ReminderTime,
    pub created_at: DateTime<Utc>,
}

impl ReminderRecord {
    /// Inclusive check of the reminder window
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// The email address to deliver to, if there is a usable one
    pub fn recipient(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}

impl Entity<i64> for ReminderRecord {
    fn id(&self) -> i64 {
        self.id
    }
}

/// A target minute of the day. Always stored in the zero padded `HH:MM`
/// 24 hour form so that it can be compared as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReminderTime(String);

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Time: `{0}` is not a valid zero padded HH:MM value")]
pub struct InvalidReminderTimeError(pub String);

impl ReminderTime {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact string match against the minute of `reference`. There is no
    /// tolerance window: 09:00 only matches references inside 09:00.
    pub fn matches(&self, reference: &NaiveDateTime) -> bool {
        self.0 == reference.format(TIME_FORMAT).to_string()
    }
}

impl FromStr for ReminderTime {
    type Err = InvalidReminderTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = NaiveTime::parse_from_str(s, TIME_FORMAT)
            .map_err(|_| InvalidReminderTimeError(s.to_string()))?;
        let canonical = parsed.format(TIME_FORMAT).to_string();
        // `9:05` parses fine with chrono but would never equal the zero padded
        // clock string
        if canonical != s {
            return Err(InvalidReminderTimeError(s.to_string()));
        }
        Ok(Self(canonical))
    }
}

impl TryFrom<String> for ReminderTime {
    type Error = InvalidReminderTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReminderTime> for String {
    fn from(time: ReminderTime) -> Self {
        time.0
    }
}

impl Display for ReminderTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordValidationError {
    #[error("Invalid start_date: `{0}`, expected YYYY-MM-DD")]
    InvalidStartDate(String),
    #[error("Invalid end_date: `{0}`, expected YYYY-MM-DD")]
    InvalidEndDate(String),
    #[error(transparent)]
    InvalidTime(#[from] InvalidReminderTimeError),
    #[error("start_date: {start} is after end_date: {end}")]
    InvertedWindow { start: NaiveDate, end: NaiveDate },
}

fn parse_window(
    start_date: &str,
    end_date: &str,
) -> Result<(NaiveDate, NaiveDate), RecordValidationError> {
    let start = NaiveDate::parse_from_str(start_date.trim(), DATE_FORMAT)
        .map_err(|_| RecordValidationError::InvalidStartDate(start_date.to_string()))?;
    let end = NaiveDate::parse_from_str(end_date.trim(), DATE_FORMAT)
        .map_err(|_| RecordValidationError::InvalidEndDate(end_date.to_string()))?;
    if start > end {
        return Err(RecordValidationError::InvertedWindow { start, end });
    }
    Ok((start, end))
}

fn normalize_email(email: Option<String>) -> Option<String> {
    email
        .map(|email| email.trim().to_string())
        .filter(|email| !email.is_empty())
}

/// A `ReminderRecord` that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewReminderRecord {
    pub patient_id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub time: ReminderTime,
}

impl NewReminderRecord {
    /// Validates the textual form submitted by the roster management surface
    pub fn parse(
        patient_id: &str,
        name: &str,
        phone: &str,
        email: Option<String>,
        start_date: &str,
        end_date: &str,
        time: &str,
    ) -> Result<Self, RecordValidationError> {
        let (start_date, end_date) = parse_window(start_date, end_date)?;
        Ok(Self {
            patient_id: patient_id.trim().to_string(),
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            email: normalize_email(email),
            start_date,
            end_date,
            time: time.parse()?,
        })
    }

    pub fn into_record(self, id: i64, created_at: DateTime<Utc>) -> ReminderRecord {
        ReminderRecord {
            id,
            patient_id: self.patient_id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            start_date: self.start_date,
            end_date: self.end_date,
            time: self.time,
            created_at,
        }
    }
}

/// The loosely typed shape of a roster row before validation. Conversion into
/// a `ReminderRecord` is the only place date and time fields are parsed.
#[derive(Debug, Clone)]
pub struct RawReminderRecord {
    pub id: i64,
    pub patient_id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<RawReminderRecord> for ReminderRecord {
    type Error = RecordValidationError;

    fn try_from(raw: RawReminderRecord) -> Result<Self, Self::Error> {
        let (start_date, end_date) = parse_window(&raw.start_date, &raw.end_date)?;
        Ok(Self {
            id: raw.id,
            patient_id: raw.patient_id,
            name: raw.name,
            phone: raw.phone,
            email: normalize_email(raw.email),
            start_date,
            end_date,
            time: raw.time.parse()?,
            created_at: raw.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(start: &str, end: &str, time: &str) -> RawReminderRecord {
        RawReminderRecord {
            id: 7,
            patient_id: "P-7".into(),
            name: "Ada".into(),
            phone: "555".into(),
            email: Some(" ada@example.com ".into()),
            start_date: start.into(),
            end_date: end.into(),
            time: time.into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn it_accepts_only_zero_padded_times() {
        assert_eq!("09:00".parse::<ReminderTime>().unwrap().as_str(), "09:00");
        assert_eq!(" 23:59 ".parse::<ReminderTime>().unwrap().as_str(), "23:59");
        for invalid in &["9:00", "24:00", "12:60", "12-00", "", "noon", "12:00:00"] {
            assert!(
                invalid.parse::<ReminderTime>().is_err(),
                "{} should be rejected",
                invalid
            );
        }
    }

    #[test]
    fn it_matches_time_exactly() {
        let time: ReminderTime = "09:00".parse().unwrap();
        let at = |h, m, s| {
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(h, m, s)
                .unwrap()
        };
        assert!(time.matches(&at(9, 0, 0)));
        assert!(time.matches(&at(9, 0, 59)));
        assert!(!time.matches(&at(9, 1, 0)));
        assert!(!time.matches(&at(8, 59, 59)));
    }

    #[test]
    fn it_converts_valid_raw_rows() {
        let record = ReminderRecord::try_from(raw("2024-01-01", "2024-01-31", "09:00")).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(record.end_date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(record.recipient(), Some("ada@example.com"));
    }

    #[test]
    fn it_rejects_malformed_raw_rows() {
        assert_eq!(
            ReminderRecord::try_from(raw("01/01/2024", "2024-01-31", "09:00")).unwrap_err(),
            RecordValidationError::InvalidStartDate("01/01/2024".into())
        );
        assert_eq!(
            ReminderRecord::try_from(raw("2024-01-01", "2024-13-01", "09:00")).unwrap_err(),
            RecordValidationError::InvalidEndDate("2024-13-01".into())
        );
        assert!(matches!(
            ReminderRecord::try_from(raw("2024-01-01", "2024-01-31", "9am")).unwrap_err(),
            RecordValidationError::InvalidTime(_)
        ));
        assert!(matches!(
            ReminderRecord::try_from(raw("2024-02-01", "2024-01-31", "09:00")).unwrap_err(),
            RecordValidationError::InvertedWindow { .. }
        ));
    }

    #[test]
    fn it_normalizes_new_records() {
        let record = NewReminderRecord::parse(
            " P-1 ",
            " Ada ",
            " 555 ",
            Some("   ".into()),
            "2024-01-01",
            "2024-01-01",
            "07:30",
        )
        .unwrap();
        assert_eq!(record.patient_id, "P-1");
        assert_eq!(record.name, "Ada");
        assert_eq!(record.email, None);

        let stored = record.into_record(3, Utc::now());
        assert_eq!(stored.id, 3);
        assert!(stored.is_active_on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(!stored.is_active_on(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()));
    }
}
