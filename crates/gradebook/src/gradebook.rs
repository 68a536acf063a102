//! Gradebook operations.
//!
//! [`Gradebook`] owns the loaded [`GradebookState`] and is the only way to
//! change it. Every operation either succeeds completely or leaves the state
//! exactly as it was. Nothing here touches the disk; saving is the caller's
//! job (see [`Store`](crate::Store)).

use tracing::{debug, info};

use crate::course::{normalize_code, CourseRecord, CourseUpdate};
use crate::error::{Error, Result};
use crate::state::GradebookState;
use crate::summary::GpaSummary;

/// An in-memory gradebook session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gradebook {
    state: GradebookState,
}

impl Gradebook {
    /// Create an empty gradebook.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap previously loaded state.
    #[must_use]
    pub fn from_state(state: GradebookState) -> Self {
        Self { state }
    }

    /// Borrow the underlying state, e.g. for saving.
    #[must_use]
    pub fn state(&self) -> &GradebookState {
        &self.state
    }

    /// Take the underlying state.
    #[must_use]
    pub fn into_state(self) -> GradebookState {
        self.state
    }

    /// Number of courses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// Whether the gradebook has no courses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Check whether a course exists. The code is matched case-insensitively.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.state.contains(&normalize_code(code))
    }

    /// Look up a course. The code is matched case-insensitively.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CourseRecord> {
        self.state.get(&normalize_code(code))
    }

    /// Add a new course.
    ///
    /// The code is stored uppercase. Existing courses are never overwritten.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateCourse`] if the code is already present
    /// - [`Error::InvalidScore`] if `score` is outside 0 to 10
    /// - [`Error::InvalidCredit`] if `credit` is below 1
    pub fn add(
        &mut self,
        code: &str,
        name: impl Into<String>,
        credit: i64,
        semester: impl Into<String>,
        score: f64,
    ) -> Result<&CourseRecord> {
        let code = normalize_code(code);
        if self.state.contains(&code) {
            return Err(Error::duplicate(code));
        }

        let record = CourseRecord::new(name, credit, semester, score)?;
        debug!("Adding course {} ({})", code, record.name);
        self.state.insert(code.clone(), record);
        info!("Added course {}", code);

        self.state
            .get(&code)
            .ok_or_else(|| Error::not_found(code))
    }

    /// Change some fields of an existing course.
    ///
    /// Fields left as `None` in `update` keep their current values. Every
    /// supplied value is validated first; if any is invalid the course is not
    /// modified at all.
    ///
    /// # Errors
    ///
    /// - [`Error::CourseNotFound`] if the code is absent
    /// - [`Error::InvalidScore`] or [`Error::InvalidCredit`] for a bad value
    pub fn update(&mut self, code: &str, update: &CourseUpdate) -> Result<&CourseRecord> {
        let code = normalize_code(code);
        let current = self
            .state
            .get(&code)
            .ok_or_else(|| Error::not_found(code.as_str()))?;

        if update.is_empty() {
            debug!("Empty update for {}, nothing to change", code);
        } else {
            let updated = update.apply_to(current)?;
            self.state.replace(&code, updated);
            info!("Updated course {}", code);
        }

        self.state
            .get(&code)
            .ok_or_else(|| Error::not_found(code))
    }

    /// Remove a course, returning its record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CourseNotFound`] if the code is absent.
    pub fn delete(&mut self, code: &str) -> Result<CourseRecord> {
        let code = normalize_code(code);
        let removed = self
            .state
            .remove(&code)
            .ok_or_else(|| Error::not_found(code.as_str()))?;
        info!("Deleted course {}", code);
        Ok(removed)
    }

    /// Iterate over `(code, record)` pairs in the order courses were added.
    ///
    /// The iterator borrows the gradebook and can be recreated any number of
    /// times. An empty gradebook yields nothing.
    pub fn list(&self) -> impl Iterator<Item = (&str, &CourseRecord)> + '_ {
        self.state.iter()
    }

    /// Compute overall and per-semester GPA.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGradebook`] if there are no courses.
    pub fn gpa_summary(&self) -> Result<GpaSummary> {
        GpaSummary::from_records(self.state.records())
    }
}
