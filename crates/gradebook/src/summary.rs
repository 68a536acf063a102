//! Credit-weighted GPA aggregation.

use indexmap::IndexMap;
use serde::Serialize;

use crate::course::CourseRecord;
use crate::error::{Error, Result};

/// GPA for one semester label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterGpa {
    /// Semester label exactly as entered.
    pub semester: String,
    /// Credit-weighted average score.
    pub gpa: f64,
    /// Total credit-hours in the semester.
    pub credits: u64,
    /// Sum of `score * credit` in the semester.
    pub weighted_points: f64,
    /// Number of courses in the semester.
    pub courses: usize,
}

/// Overall and per-semester GPA for a set of courses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpaSummary {
    /// Credit-weighted average over every course.
    pub overall: f64,
    /// Total credit-hours.
    pub total_credits: u64,
    /// Sum of `score * credit` over every course.
    pub total_weighted_points: f64,
    /// Per-semester results, in order of first appearance.
    pub semesters: Vec<SemesterGpa>,
}

#[derive(Default)]
struct Tally {
    points: f64,
    credits: u64,
    courses: usize,
}

impl Tally {
    fn add(&mut self, record: &CourseRecord) {
        self.points += record.weighted_points();
        self.credits += u64::from(record.credit);
        self.courses += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    fn average(&self) -> f64 {
        self.points / self.credits as f64
    }
}

impl GpaSummary {
    /// Aggregate a sequence of records.
    ///
    /// Semester labels are grouped by exact string match, so `"2024A"` and
    /// `"2024a"` are separate semesters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGradebook`] if `records` yields nothing.
    pub fn from_records<'a, I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a CourseRecord>,
    {
        let mut total = Tally::default();
        let mut semesters: IndexMap<&'a str, Tally> = IndexMap::new();

        for record in records {
            total.add(record);
            semesters
                .entry(record.semester.as_str())
                .or_default()
                .add(record);
        }

        // Every record has credit >= 1, so a non-empty set never divides by zero.
        if total.courses == 0 {
            return Err(Error::EmptyGradebook);
        }

        Ok(Self {
            overall: total.average(),
            total_credits: total.credits,
            total_weighted_points: total.points,
            semesters: semesters
                .into_iter()
                .map(|(label, tally)| SemesterGpa {
                    semester: label.to_string(),
                    gpa: tally.average(),
                    credits: tally.credits,
                    weighted_points: tally.points,
                    courses: tally.courses,
                })
                .collect(),
        })
    }

    /// Look up the result for a semester label.
    #[must_use]
    pub fn semester(&self, label: &str) -> Option<&SemesterGpa> {
        self.semesters.iter().find(|s| s.semester == label)
    }
}
