//! End-to-end tests: load a saved gradebook, drive the menu, check what is saved.

use gradebook::config::DisplayConfig;
use gradebook::{Error, Gradebook, Session, Store};
use tempfile::TempDir;

/// A document in the layout written by earlier versions of the tool.
const EXISTING_DOCUMENT: &str = r#"{
    "CS101": {
        "name": "Algorithms",
        "credit": 3,
        "semester": "2024A",
        "score": 8.0
    },
    "CS102": {
        "name": "Databases",
        "credit": 4,
        "semester": "2024A",
        "score": 9.0
    }
}"#;

fn run_script(store: &Store, script: &str) -> (Gradebook, String) {
    let gradebook = Gradebook::from_state(store.load().unwrap());
    let mut output = Vec::new();
    let gradebook = Session::new(
        gradebook,
        store.clone(),
        DisplayConfig::default(),
        script.as_bytes(),
        &mut output,
    )
    .run()
    .unwrap();
    (gradebook, String::from_utf8(output).unwrap())
}

#[test]
fn test_existing_document_summary() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gradebook.json");
    std::fs::write(&path, EXISTING_DOCUMENT).unwrap();
    let store = Store::new(&path);

    let (gradebook, output) = run_script(&store, "5\n6\n");

    assert_eq!(gradebook.len(), 2);
    assert!(output.contains("Overall GPA: 8.57"));
    assert!(output.contains("  2024A: 8.57"));
}

#[test]
fn test_changes_survive_across_sessions() {
    let dir = TempDir::new().unwrap();
    let store = Store::new(dir.path().join("data").join("gradebook.json"));

    run_script(
        &store,
        "1\nma201\nCalculus\n4\n2024B\n7.5\n1\nph100\nPhysics\n2\n2024B\n6\n6\n",
    );
    let (gradebook, output) = run_script(&store, "2\nMA201\n\n\n\n9\n3\nPH100\n4\n6\n");

    assert!(output.contains("✔ Course updated!"));
    assert!(output.contains("✔ Course deleted!"));

    let codes: Vec<&str> = gradebook.list().map(|(code, _)| code).collect();
    assert_eq!(codes, vec!["MA201"]);

    let reloaded = store.load().unwrap();
    let course = reloaded.get("MA201").unwrap();
    assert_eq!(course.name, "Calculus");
    assert_eq!(course.credit, 4);
    assert!((course.score - 9.0).abs() < f64::EPSILON);
}

#[test]
fn test_insertion_order_is_kept_on_disk() {
    let dir = TempDir::new().unwrap();
    let store = Store::new(dir.path().join("gradebook.json"));

    run_script(
        &store,
        "1\nZZ900\nLast first\n1\nS1\n5\n1\nAA100\nFirst last\n1\nS1\n5\n6\n",
    );

    let text = std::fs::read_to_string(store.path()).unwrap();
    assert!(text.find("ZZ900").unwrap() < text.find("AA100").unwrap());
}

#[test]
fn test_corrupt_document_is_reported_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gradebook.json");
    std::fs::write(&path, "{\"CS101\": {\"name\": \"Algorithms\"").unwrap();

    let err = Store::new(&path).load().unwrap_err();
    assert!(matches!(err, Error::CorruptData { .. }));
    assert!(!err.is_recoverable());

    // The unreadable document is left alone.
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\"CS101\""));
}
