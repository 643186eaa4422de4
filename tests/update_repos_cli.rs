// tests/update_repos_cli.rs

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;

use simple_supervisor::cli::{UpdateMode, UpdateReposArgs};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn keep_going_is_accepted_by_fetching_modes() -> TestResult {
    for mode in ["run", "update"] {
        let args = UpdateReposArgs::try_parse_from(["update_repos", mode, "--keep-going", "repos.ini"])?;
        assert!(args.mode.keep_going(), "{mode} should keep going");
        assert_eq!(args.mode.args().config, [PathBuf::from("repos.ini")]);
    }
    Ok(())
}

#[test]
fn build_rejects_keep_going() {
    let err = UpdateReposArgs::try_parse_from(["update_repos", "build", "--keep-going", "repos.ini"])
        .expect_err("build never fetches");
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
}

#[test]
fn build_shares_config_and_top() -> TestResult {
    let args = UpdateReposArgs::try_parse_from(["update_repos", "build", "--top", "/srv", "a.ini", "b.ini"])?;

    assert!(matches!(args.mode, UpdateMode::Build(_)));
    assert!(!args.mode.keep_going());
    assert_eq!(args.mode.args().top.as_deref(), Some(PathBuf::from("/srv").as_path()));
    assert_eq!(args.mode.args().config.len(), 2);
    Ok(())
}
