// tests/cardinality.rs

use simple_supervisor::errors::SupervisorError;
use simple_supervisor::query::{has_only_one, one};

#[test]
fn one_returns_the_single_item() {
    assert_eq!(one(vec![7]).unwrap(), 7);
}

#[test]
fn one_fails_on_empty_and_on_many() {
    assert!(matches!(one(Vec::<i32>::new()), Err(SupervisorError::NoResult)));
    assert!(matches!(one(vec![1, 2, 3]), Err(SupervisorError::MultipleResults(3))));
}

#[test]
fn has_only_one_picks_the_present_candidate() {
    let keys = ["cwd", "safer_command"];
    let found = has_only_one(keys, &["command", "safer_command"]).unwrap();
    assert_eq!(found, "safer_command");
}

#[test]
fn has_only_one_reports_no_result_and_multiple_results() {
    let candidates = ["command", "safer_command"];

    let err = has_only_one(["cwd"], &candidates).unwrap_err();
    assert!(matches!(err, SupervisorError::NoResult));
    assert_eq!(err.to_string(), "no result");

    let err = has_only_one(["command", "cwd", "safer_command"], &candidates).unwrap_err();
    assert!(matches!(err, SupervisorError::MultipleResults(2)));
    assert!(err.to_string().contains("multiple results"));
}
