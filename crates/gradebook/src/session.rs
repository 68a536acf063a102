//! Interactive menu session.
//!
//! A [`Session`] owns the loaded [`Gradebook`] and its [`Store`] for the
//! length of one run of the menu. It turns typed text into gradebook
//! operations, reports recoverable errors inline, and saves exactly once
//! when the user exits (or input ends).

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::config::DisplayConfig;
use crate::course::{normalize_code, CourseUpdate};
use crate::error::{Error, Result};
use crate::gradebook::Gradebook;
use crate::report::{write_course_table, write_summary};
use crate::storage::Store;

/// ANSI sequence that clears the terminal and homes the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// One of the six menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Add a course.
    Add,
    /// Update a course.
    Update,
    /// Delete a course.
    Delete,
    /// Show all courses.
    View,
    /// Show the GPA summary.
    Summary,
    /// Save and leave.
    Exit,
}

impl MenuChoice {
    /// Parse the text typed at the menu prompt.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::Update),
            "3" => Some(Self::Delete),
            "4" => Some(Self::View),
            "5" => Some(Self::Summary),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// An interactive gradebook session over any line-based input and output.
#[derive(Debug)]
pub struct Session<R, W> {
    gradebook: Gradebook,
    store: Store,
    display: DisplayConfig,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session around an already loaded gradebook.
    pub fn new(
        gradebook: Gradebook,
        store: Store,
        display: DisplayConfig,
        input: R,
        output: W,
    ) -> Self {
        Self {
            gradebook,
            store,
            display,
            input,
            output,
        }
    }

    /// Run the menu until the user exits or input ends.
    ///
    /// Returns the final gradebook, which has been saved to the store.
    ///
    /// # Errors
    ///
    /// Recoverable errors are printed and the menu continues. Saving
    /// failures and terminal I/O failures end the session and are returned.
    pub fn run(mut self) -> Result<Gradebook> {
        loop {
            if self.display.clear_screen {
                write!(self.output, "{CLEAR_SCREEN}")?;
            }
            self.print_menu()?;

            let Some(input) = self.prompt("Choose 1-6: ")? else {
                info!("Input closed, saving and exiting");
                writeln!(self.output)?;
                break;
            };

            match MenuChoice::parse(&input) {
                Some(MenuChoice::Exit) => break,
                Some(choice) => {
                    debug!("Menu choice {:?}", choice);
                    if let Err(err) = self.perform(choice) {
                        if !err.is_recoverable() {
                            return Err(err);
                        }
                        debug!("{:?} rejected: {}", choice, err);
                        writeln!(self.output, "❌ {err}")?;
                    }
                }
                None => writeln!(self.output, "Invalid option!")?,
            }

            if self.display.pause_after_action {
                self.prompt("\nPress Enter to continue...")?;
            }
        }

        self.store.save(self.gradebook.state())?;
        writeln!(self.output, "Goodbye!")?;
        self.output.flush()?;
        Ok(self.gradebook)
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n====== STUDENT GRADEBOOK ======")?;
        writeln!(self.output, "1. Add course")?;
        writeln!(self.output, "2. Update course")?;
        writeln!(self.output, "3. Delete course")?;
        writeln!(self.output, "4. View gradebook")?;
        writeln!(self.output, "5. GPA summary")?;
        writeln!(self.output, "6. Exit")?;
        Ok(())
    }

    fn perform(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::Add => self.add_course(),
            MenuChoice::Update => self.update_course(),
            MenuChoice::Delete => self.delete_course(),
            MenuChoice::View => {
                write_course_table(&mut self.output, &self.gradebook)?;
                Ok(())
            }
            MenuChoice::Summary => self.show_summary(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn add_course(&mut self) -> Result<()> {
        let Some(code) = self.prompt("Course code: ")? else {
            return Ok(());
        };
        let code = code.trim();
        // Rejected before prompting for the remaining fields.
        if self.gradebook.contains(code) {
            return Err(Error::duplicate(normalize_code(code)));
        }

        let Some(name) = self.prompt("Course name: ")? else {
            return Ok(());
        };
        let Some(credit) = self.prompt("Credits: ")? else {
            return Ok(());
        };
        let credit = parse_credit(&credit)?;
        let Some(semester) = self.prompt("Semester (e.g. 2024A): ")? else {
            return Ok(());
        };
        let Some(score) = self.prompt("Score (0-10): ")? else {
            return Ok(());
        };
        let score = parse_score(&score)?;

        self.gradebook.add(code, name, credit, semester, score)?;
        writeln!(self.output, "✔ Course added!")?;
        Ok(())
    }

    fn update_course(&mut self) -> Result<()> {
        let Some(code) = self.prompt("Enter course code to update: ")? else {
            return Ok(());
        };
        let code = code.trim();
        let current = self
            .gradebook
            .get(code)
            .cloned()
            .ok_or_else(|| Error::not_found(normalize_code(code)))?;

        writeln!(self.output, "Leave blank to keep current value.\n")?;
        let Some(name) = self.prompt(&format!("Name ({}): ", current.name))? else {
            return Ok(());
        };
        let Some(credit) = self.prompt(&format!("Credits ({}): ", current.credit))? else {
            return Ok(());
        };
        let Some(semester) = self.prompt(&format!("Semester ({}): ", current.semester))? else {
            return Ok(());
        };
        let Some(score) = self.prompt(&format!("Score ({:?}): ", current.score))? else {
            return Ok(());
        };

        let update = CourseUpdate {
            name: non_blank(name),
            credit: non_blank(credit).map(|c| parse_credit(&c)).transpose()?,
            semester: non_blank(semester),
            score: non_blank(score).map(|s| parse_score(&s)).transpose()?,
        };

        self.gradebook.update(code, &update)?;
        writeln!(self.output, "✔ Course updated!")?;
        Ok(())
    }

    fn delete_course(&mut self) -> Result<()> {
        let Some(code) = self.prompt("Enter course code to delete: ")? else {
            return Ok(());
        };
        self.gradebook.delete(code.trim())?;
        writeln!(self.output, "✔ Course deleted!")?;
        Ok(())
    }

    fn show_summary(&mut self) -> Result<()> {
        match self.gradebook.gpa_summary() {
            Ok(summary) => write_summary(&mut self.output, &summary, self.display.decimals)?,
            Err(Error::EmptyGradebook) => writeln!(self.output, "No courses available.")?,
            Err(err) => return Err(err),
        }
        Ok(())
    }

    /// Print `label` and read one line. `None` means input has ended.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// Blank answers keep the current value.
fn non_blank(input: String) -> Option<String> {
    if input.is_empty() {
        None
    } else {
        Some(input)
    }
}

fn parse_credit(input: &str) -> Result<i64> {
    input.trim().parse().map_err(|_| Error::InvalidInput {
        field: "credits",
        input: input.to_string(),
    })
}

fn parse_score(input: &str) -> Result<f64> {
    input.trim().parse().map_err(|_| Error::InvalidInput {
        field: "score",
        input: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Run {
        gradebook: Gradebook,
        output: String,
        store: Store,
        _dir: TempDir,
    }

    fn run_session(gradebook: Gradebook, script: &str) -> Run {
        crate::logging::init_test_logging();
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("gradebook.json"));
        let mut output = Vec::new();

        let session = Session::new(
            gradebook,
            store.clone(),
            DisplayConfig::default(),
            script.as_bytes(),
            &mut output,
        );
        let gradebook = session.run().unwrap();

        Run {
            gradebook,
            output: String::from_utf8(output).unwrap(),
            store,
            _dir: dir,
        }
    }

    fn sample_gradebook() -> Gradebook {
        let mut gradebook = Gradebook::new();
        gradebook.add("CS101", "Algorithms", 3, "2024A", 8.0).unwrap();
        gradebook
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse(" 5 "), Some(MenuChoice::Summary));
        assert_eq!(MenuChoice::parse("6"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse("add"), None);
    }

    #[test]
    fn test_add_course_and_exit_saves() {
        let run = run_session(
            Gradebook::new(),
            "1\ncs101\nAlgorithms\n3\n2024A\n8.0\n6\n",
        );

        assert!(run.output.contains("✔ Course added!"));
        assert!(run.output.contains("Goodbye!"));
        assert_eq!(run.gradebook.get("CS101").unwrap().name, "Algorithms");

        let saved = run.store.load().unwrap();
        assert_eq!(&saved, run.gradebook.state());
    }

    #[test]
    fn test_add_duplicate_reports_before_other_prompts() {
        let run = run_session(sample_gradebook(), "1\nCs101\n6\n");

        assert!(run.output.contains("❌ course CS101 already exists"));
        assert!(!run.output.contains("Course name: "));
        assert_eq!(run.gradebook, sample_gradebook());
    }

    #[test]
    fn test_add_invalid_score_is_reported() {
        let run = run_session(Gradebook::new(), "1\nPH100\nPhysics\n4\nS1\n11\n6\n");

        assert!(run.output.contains("❌ invalid score 11"));
        assert!(run.gradebook.is_empty());
    }

    #[test]
    fn test_add_non_numeric_credit_is_reported() {
        let run = run_session(Gradebook::new(), "1\nPH100\nPhysics\nfour\n6\n");

        assert!(run.output.contains("❌ invalid credits"));
        assert!(!run.output.contains("Semester (e.g. 2024A): "));
        assert!(run.gradebook.is_empty());
    }

    #[test]
    fn test_update_blank_keeps_current_values() {
        let run = run_session(sample_gradebook(), "2\ncs101\n\n\n\n\n6\n");

        assert!(run.output.contains("Name (Algorithms): "));
        assert!(run.output.contains("Score (8.0): "));
        assert!(run.output.contains("✔ Course updated!"));
        assert_eq!(run.gradebook, sample_gradebook());
    }

    #[test]
    fn test_update_some_fields() {
        let run = run_session(sample_gradebook(), "2\nCS101\n\n4\n2024B\n9.5\n6\n");

        let course = run.gradebook.get("CS101").unwrap();
        assert_eq!(course.name, "Algorithms");
        assert_eq!(course.credit, 4);
        assert_eq!(course.semester, "2024B");
        assert!((course.score - 9.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_invalid_score_changes_nothing() {
        let run = run_session(sample_gradebook(), "2\nCS101\nRenamed\n\n\n-1\n6\n");

        assert!(run.output.contains("❌ invalid score -1"));
        assert_eq!(run.gradebook, sample_gradebook());
    }

    #[test]
    fn test_update_missing_course() {
        let run = run_session(sample_gradebook(), "2\nMA201\n6\n");
        assert!(run.output.contains("❌ course MA201 not found"));
        assert!(!run.output.contains("Leave blank"));
    }

    #[test]
    fn test_delete_course() {
        let run = run_session(sample_gradebook(), "3\ncs101\n6\n");

        assert!(run.output.contains("✔ Course deleted!"));
        assert!(run.gradebook.is_empty());
        assert!(run.store.load().unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_course() {
        let run = run_session(sample_gradebook(), "3\nXX1\n6\n");
        assert!(run.output.contains("❌ course XX1 not found"));
        assert_eq!(run.gradebook.len(), 1);
    }

    #[test]
    fn test_view_empty_and_populated() {
        let run = run_session(Gradebook::new(), "4\n6\n");
        assert!(run.output.contains("No courses yet."));

        let run = run_session(sample_gradebook(), "4\n6\n");
        assert!(run.output.contains("=== GRADEBOOK ==="));
        assert!(run.output.contains("Algorithms"));
    }

    #[test]
    fn test_summary_empty_and_populated() {
        let run = run_session(Gradebook::new(), "5\n6\n");
        assert!(run.output.contains("No courses available."));

        let run = run_session(
            Gradebook::new(),
            "1\nA1\nFull\n4\nS1\n10\n1\nB2\nNone\n2\nS2\n0\n5\n6\n",
        );
        assert!(run.output.contains("Overall GPA: 6.67"));
        assert!(run.output.contains("  S1: 10.00"));
        assert!(run.output.contains("  S2: 0.00"));
    }

    #[test]
    fn test_invalid_menu_option() {
        let run = run_session(Gradebook::new(), "9\n6\n");
        assert!(run.output.contains("Invalid option!"));
    }

    #[test]
    fn test_end_of_input_saves() {
        let run = run_session(sample_gradebook(), "3\nCS101\n");

        assert!(run.output.contains("Goodbye!"));
        assert!(run.store.path().exists());
        assert!(run.store.load().unwrap().is_empty());
    }

    #[test]
    fn test_end_of_input_mid_action_discards_action() {
        let run = run_session(Gradebook::new(), "1\nPH100\nPhysics\n");

        assert!(run.gradebook.is_empty());
        assert!(run.output.contains("Goodbye!"));
    }

    #[test]
    fn test_pause_and_clear_screen() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("gradebook.json"));
        let display = DisplayConfig {
            clear_screen: true,
            pause_after_action: true,
            decimals: 2,
        };
        let mut output = Vec::new();

        Session::new(Gradebook::new(), store, display, "4\n\n6\n".as_bytes(), &mut output)
            .run()
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Press Enter to continue..."));
        assert!(text.starts_with(CLEAR_SCREEN));
    }

    #[test]
    fn test_save_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();
        let store = Store::new(blocker.join("gradebook.json"));
        let mut output = Vec::new();

        let result = Session::new(
            sample_gradebook(),
            store,
            DisplayConfig::default(),
            "6\n".as_bytes(),
            &mut output,
        )
        .run();

        assert!(matches!(result, Err(Error::Storage { .. })));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(String::new()), None);
        assert_eq!(non_blank(" ".to_string()), Some(" ".to_string()));
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_credit(" 3 ").unwrap(), 3);
        assert!(parse_credit("3.5").is_err());
        assert!((parse_score("7.25").unwrap() - 7.25).abs() < f64::EPSILON);
        assert!(matches!(
            parse_score("high"),
            Err(Error::InvalidInput { field: "score", .. })
        ));
    }
}
