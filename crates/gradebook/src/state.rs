//! The in-memory course collection.
//!
//! [`GradebookState`] maps course codes to records and keeps them in the order
//! they were added. It serializes as a single JSON object keyed by course
//! code, which is the on-disk document format.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::course::{normalize_code, CourseRecord};

/// Course records keyed by normalized course code, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GradebookState {
    entries: IndexMap<String, CourseRecord>,
}

impl GradebookState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of courses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no courses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether a course code is present. `code` must already be normalized.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Look up a record by normalized code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CourseRecord> {
        self.entries.get(code)
    }

    /// Iterate over `(code, record)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CourseRecord)> + '_ {
        self.entries
            .iter()
            .map(|(code, record)| (code.as_str(), record))
    }

    /// Iterate over the records alone, in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &CourseRecord> + '_ {
        self.entries.values()
    }

    /// Append a record. Returns `false` and leaves the state untouched if the
    /// code is already present.
    pub(crate) fn insert(&mut self, code: String, record: CourseRecord) -> bool {
        if self.entries.contains_key(&code) {
            return false;
        }
        self.entries.insert(code, record);
        true
    }

    /// Replace the record stored under `code`, returning the old one.
    pub(crate) fn replace(&mut self, code: &str, record: CourseRecord) -> Option<CourseRecord> {
        self.entries
            .get_mut(code)
            .map(|slot| std::mem::replace(slot, record))
    }

    /// Remove the record stored under `code`, keeping the order of the rest.
    pub(crate) fn remove(&mut self, code: &str) -> Option<CourseRecord> {
        self.entries.shift_remove(code)
    }
}

// Deserialized by hand: a plain `IndexMap` lets a repeated key overwrite the
// earlier one, and keys must already be in normalized form.
impl<'de> Deserialize<'de> for GradebookState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StateVisitor)
    }
}

struct StateVisitor;

impl<'de> Visitor<'de> for StateVisitor {
    type Value = GradebookState;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of course codes to course records")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((code, record)) = access.next_entry::<String, CourseRecord>()? {
            if normalize_code(&code) != code {
                return Err(serde::de::Error::custom(format!(
                    "course code {code} is not uppercase"
                )));
            }
            if entries.contains_key(&code) {
                return Err(serde::de::Error::custom(format!(
                    "duplicate course code {code}"
                )));
            }
            entries.insert(code, record);
        }
        Ok(GradebookState { entries })
    }
}
