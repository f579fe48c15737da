//! Public Site Helpers
//!
//! Countdown to the event and client-side checks on RSVP submissions.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

use crate::models::RsvpSubmission;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    pub fn is_over(&self) -> bool {
        *self == Countdown::default()
    }
}

/// Time left until `target`, zero once it has passed
pub fn remaining(now: DateTime<Utc>, target: DateTime<Utc>) -> Countdown {
    let total = (target - now).num_seconds().max(0);
    Countdown {
        days: total / 86_400,
        hours: total % 86_400 / 3_600,
        minutes: total % 3_600 / 60,
        seconds: total % 60,
    }
}

/// Current time from the browser clock
pub fn now_utc() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Value format of `<input type="datetime-local">`
const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Parse a datetime-local input value, taken as UTC. Empty means unset.
pub fn parse_datetime_local(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match NaiveDateTime::parse_from_str(value, DATETIME_LOCAL_FORMAT) {
        Ok(naive) => Some(naive.and_utc()),
        Err(e) => {
            log::warn!("[DATE] Ignoring {:?}: {}", value, e);
            None
        }
    }
}

pub fn format_datetime_local(value: Option<DateTime<Utc>>) -> String {
    value.map(|d| d.format(DATETIME_LOCAL_FORMAT).to_string()).unwrap_or_default()
}

/// Long date for the public site, e.g. "12/09/2026 18:30"
pub fn format_event_date(value: DateTime<Utc>) -> String {
    value.format("%d/%m/%Y %H:%M").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RsvpError {
    #[error("El nombre es obligatorio")]
    MissingFirstName,
    #[error("Los apellidos son obligatorios")]
    MissingLastName,
    #[error("El email no es válido")]
    InvalidEmail,
    #[error("El acompañante {0} necesita un nombre")]
    UnnamedPlusOne(usize),
    #[error("El plazo de confirmación ha terminado")]
    DeadlinePassed,
}

/// Checks run before submitting; the server validates again
pub fn validate_rsvp(
    submission: &RsvpSubmission,
    now: DateTime<Utc>,
    deadline: Option<DateTime<Utc>>,
) -> Result<(), RsvpError> {
    if deadline.is_some_and(|d| now > d) {
        return Err(RsvpError::DeadlinePassed);
    }
    if submission.first_name.trim().is_empty() {
        return Err(RsvpError::MissingFirstName);
    }
    if submission.last_name.trim().is_empty() {
        return Err(RsvpError::MissingLastName);
    }
    if let Some(email) = submission.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        if !email.contains('@') {
            return Err(RsvpError::InvalidEmail);
        }
    }
    if let Some(idx) = submission.plus_ones.iter().position(|p| p.first_name.trim().is_empty()) {
        return Err(RsvpError::UnnamedPlusOne(idx + 1));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlusOneInput;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn make_submission() -> RsvpSubmission {
        RsvpSubmission {
            first_name: "Ana".to_string(),
            last_name: "Pérez".to_string(),
            attending: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_remaining_breakdown() {
        let now = at(2026, 6, 1, 10, 0, 0);
        let target = now + Duration::days(3) + Duration::hours(4) + Duration::minutes(5) + Duration::seconds(6);
        assert_eq!(remaining(now, target), Countdown { days: 3, hours: 4, minutes: 5, seconds: 6 });
    }

    #[test]
    fn test_remaining_saturates() {
        let countdown = remaining(at(2026, 6, 2, 0, 0, 0), at(2026, 6, 1, 0, 0, 0));
        assert!(countdown.is_over());
    }

    #[test]
    fn test_datetime_local() {
        let parsed = parse_datetime_local("2026-09-12T18:30");
        assert_eq!(parsed, Some(at(2026, 9, 12, 18, 30, 0)));
        assert_eq!(format_datetime_local(parsed), "2026-09-12T18:30");
        assert_eq!(format_event_date(at(2026, 9, 12, 18, 30, 0)), "12/09/2026 18:30");

        assert_eq!(parse_datetime_local(""), None);
        assert_eq!(parse_datetime_local("mañana"), None);
        assert_eq!(format_datetime_local(None), "");
    }

    #[test]
    fn test_valid_submission() {
        assert_eq!(validate_rsvp(&make_submission(), at(2026, 1, 1, 0, 0, 0), None), Ok(()));
    }

    #[test]
    fn test_required_names() {
        let mut submission = make_submission();
        submission.last_name = " ".to_string();
        assert_eq!(validate_rsvp(&submission, Utc::now(), None), Err(RsvpError::MissingLastName));

        submission.first_name.clear();
        assert_eq!(validate_rsvp(&submission, Utc::now(), None), Err(RsvpError::MissingFirstName));
    }

    #[test]
    fn test_email_and_plus_ones() {
        let mut submission = make_submission();
        submission.email = Some("ana.example.com".to_string());
        assert_eq!(validate_rsvp(&submission, Utc::now(), None), Err(RsvpError::InvalidEmail));

        submission.email = Some("".to_string());
        submission.plus_ones = vec![
            PlusOneInput { first_name: "Bob".to_string(), ..Default::default() },
            PlusOneInput::default(),
        ];
        assert_eq!(validate_rsvp(&submission, Utc::now(), None), Err(RsvpError::UnnamedPlusOne(2)));
    }

    #[test]
    fn test_deadline() {
        let deadline = at(2026, 5, 1, 0, 0, 0);
        assert_eq!(
            validate_rsvp(&make_submission(), at(2026, 5, 2, 0, 0, 0), Some(deadline)),
            Err(RsvpError::DeadlinePassed)
        );
        assert_eq!(validate_rsvp(&make_submission(), at(2026, 4, 30, 0, 0, 0), Some(deadline)), Ok(()));
    }
}
