use std::fmt;

use chrono::{Months, NaiveDate, Utc};
use thiserror::Error;

pub const MAX_AGE_YEARS: u32 = 200;
pub const DATE_OF_BIRTH_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateOfBirthError {
    #[error("date of birth must be in the form YYYY-MM-DD")]
    Malformed,
    #[error("date of birth must not be in the future nor more than {MAX_AGE_YEARS} years ago")]
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateOfBirth(NaiveDate);

impl DateOfBirth {
    /// Parse a `YYYY-MM-DD` date of birth relative to the current UTC date.
    pub fn parse(input: &str) -> Result<Self, DateOfBirthError> {
        Self::parse_on(input, Utc::now().date_naive())
    }

    /// Parse a `YYYY-MM-DD` date of birth relative to `today`.
    ///
    /// The oldest accepted date is exactly [`MAX_AGE_YEARS`] years before
    /// `today`; the newest is `today` itself.
    pub fn parse_on(input: &str, today: NaiveDate) -> Result<Self, DateOfBirthError> {
        if !has_date_layout(input) {
            return Err(DateOfBirthError::Malformed);
        }
        let date = NaiveDate::parse_from_str(input, DATE_OF_BIRTH_FORMAT)
            .map_err(|_| DateOfBirthError::Malformed)?;

        Self::from_date_on(date, today)
    }

    /// Range-check an already parsed date against `today`.
    pub fn from_date_on(date: NaiveDate, today: NaiveDate) -> Result<Self, DateOfBirthError> {
        let oldest = today
            .checked_sub_months(Months::new(MAX_AGE_YEARS * 12))
            .unwrap_or(NaiveDate::MIN);
        if date > today || date < oldest {
            return Err(DateOfBirthError::OutOfRange);
        }

        Ok(Self(date))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

// chrono accepts unpadded fields and signed years, so the exact shape is
// checked up front.
fn has_date_layout(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl fmt::Display for DateOfBirth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_OF_BIRTH_FORMAT))
    }
}
