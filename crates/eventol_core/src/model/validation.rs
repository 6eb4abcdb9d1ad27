//! Record validation errors and shared field checks.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s,]+@[^@\s,]+$").expect("valid email regex"));

/// Validation failures raised before a record is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },
    InvalidDate(String),
    InvalidEmail(String),
    /// End timestamp precedes start timestamp (epoch milliseconds).
    InvalidTimeRange {
        start: i64,
        end: i64,
    },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { entity, field } => {
                write!(f, "{entity}.{field} must not be empty")
            }
            Self::InvalidDate(value) => write!(f, "date `{value}` is not YYYY-MM-DD"),
            Self::InvalidEmail(value) => write!(f, "email `{value}` is invalid"),
            Self::InvalidTimeRange { start, end } => {
                write!(f, "end {end} must not be earlier than start {start}")
            }
        }
    }
}

impl Error for ModelValidationError {}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::EmptyField { entity, field });
    }
    Ok(())
}

pub(crate) fn require_date(value: &str) -> Result<(), ModelValidationError> {
    if !DATE_RE.is_match(value) {
        return Err(ModelValidationError::InvalidDate(value.to_string()));
    }
    Ok(())
}

pub(crate) fn require_email(value: &str) -> Result<(), ModelValidationError> {
    if !EMAIL_RE.is_match(value.trim()) {
        return Err(ModelValidationError::InvalidEmail(value.to_string()));
    }
    Ok(())
}

pub(crate) fn require_time_range(
    start: Option<i64>,
    end: Option<i64>,
) -> Result<(), ModelValidationError> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(ModelValidationError::InvalidTimeRange { start, end });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{require_date, require_email, require_time_range, ModelValidationError};

    #[test]
    fn date_accepts_calendar_shape_only() {
        assert!(require_date("2018-04-28").is_ok());
        assert!(require_date("2018-4-28").is_err());
        assert!(require_date("2018-13-01").is_err());
        assert!(require_date("28/04/2018").is_err());
    }

    #[test]
    fn email_rejects_missing_at_and_lists() {
        assert!(require_email("jane@example.org").is_ok());
        assert!(require_email(" jane@example.org ").is_ok());
        assert!(require_email("jane.example.org").is_err());
        assert!(require_email("a@x.org,b@y.org").is_err());
    }

    #[test]
    fn time_range_allows_open_ends() {
        assert!(require_time_range(None, Some(5)).is_ok());
        assert!(require_time_range(Some(5), None).is_ok());
        assert!(require_time_range(Some(5), Some(5)).is_ok());
        assert_eq!(
            require_time_range(Some(10), Some(5)),
            Err(ModelValidationError::InvalidTimeRange { start: 10, end: 5 })
        );
    }
}
