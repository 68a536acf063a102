//! Core course types for gradebook.
//!
//! This module defines the course record stored under each course code, the
//! partial update applied by the update operation, and the validation rules
//! every stored record satisfies.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lowest accepted score.
pub const MIN_SCORE: f64 = 0.0;

/// Highest accepted score.
pub const MAX_SCORE: f64 = 10.0;

/// A single tracked course.
///
/// The course code is not part of the record; it is the key the record is
/// stored under in [`GradebookState`](crate::GradebookState).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CourseRecord {
    /// Course name (e.g., "Algorithms").
    pub name: String,

    /// Credit-hours, always at least 1.
    pub credit: u32,

    /// Free-text semester label (e.g., "2024A"), compared literally.
    pub semester: String,

    /// Score on the 0 to 10 scale.
    pub score: f64,
}

impl CourseRecord {
    /// Build a validated record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredit`] if `credit` is below 1 and
    /// [`Error::InvalidScore`] if `score` is outside 0 to 10.
    pub fn new(
        name: impl Into<String>,
        credit: i64,
        semester: impl Into<String>,
        score: f64,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            credit: validate_credit(credit)?,
            semester: semester.into(),
            score: validate_score(score)?,
        })
    }

    /// Score weighted by credit-hours.
    #[must_use]
    pub fn weighted_points(&self) -> f64 {
        self.score * f64::from(self.credit)
    }

    /// Check the record against the score and credit rules.
    ///
    /// Records built with [`CourseRecord::new`] always pass; this is for
    /// records that arrive through deserialization.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`CourseRecord::new`].
    pub fn validate(&self) -> Result<()> {
        validate_credit(i64::from(self.credit))?;
        validate_score(self.score)?;
        Ok(())
    }
}

/// Optional field changes for an existing course.
///
/// `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseUpdate {
    /// New course name.
    pub name: Option<String>,
    /// New credit-hours.
    pub credit: Option<i64>,
    /// New semester label.
    pub semester: Option<String>,
    /// New score.
    pub score: Option<f64>,
}

impl CourseUpdate {
    /// Check whether this update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.credit.is_none()
            && self.semester.is_none()
            && self.score.is_none()
    }

    /// Produce the updated copy of `current`.
    ///
    /// Every supplied value is validated before anything is written, so a
    /// failure leaves no partially updated record behind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredit`] or [`Error::InvalidScore`] for a
    /// supplied value that breaks the record rules.
    pub fn apply_to(&self, current: &CourseRecord) -> Result<CourseRecord> {
        let credit = self.credit.map(validate_credit).transpose()?;
        let score = self.score.map(validate_score).transpose()?;

        Ok(CourseRecord {
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            credit: credit.unwrap_or(current.credit),
            semester: self
                .semester
                .clone()
                .unwrap_or_else(|| current.semester.clone()),
            score: score.unwrap_or(current.score),
        })
    }
}

/// Normalize a course code to its stored form.
///
/// Codes are case-insensitive and stored uppercase.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.to_uppercase()
}

/// Validate a score.
///
/// # Errors
///
/// Returns [`Error::InvalidScore`] for anything outside 0 to 10, including NaN.
pub fn validate_score(score: f64) -> Result<f64> {
    if (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Ok(score)
    } else {
        Err(Error::InvalidScore { score })
    }
}

/// Validate a credit-hour count.
///
/// # Errors
///
/// Returns [`Error::InvalidCredit`] if `credit` is below 1 or does not fit
/// the stored width.
pub fn validate_credit(credit: i64) -> Result<u32> {
    match u32::try_from(credit) {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(Error::InvalidCredit { credit }),
    }
}
