//! `gradebook` - Offline course tracking with credit-weighted GPA summaries
//!
//! This library provides the course model, the in-memory gradebook operations,
//! JSON file storage, and the interactive menu session used by the
//! `gradebook` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod course;
pub mod error;
pub mod gradebook;
pub mod logging;
pub mod report;
pub mod session;
pub mod state;
pub mod storage;
pub mod summary;

pub use config::Config;
pub use course::{CourseRecord, CourseUpdate};
pub use error::{Error, Result};
pub use gradebook::Gradebook;
pub use logging::init_logging;
pub use session::Session;
pub use state::GradebookState;
pub use storage::Store;
pub use summary::{GpaSummary, SemesterGpa};
