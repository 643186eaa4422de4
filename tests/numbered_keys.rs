// tests/numbered_keys.rs

mod common;
use crate::common::config_from;

use std::collections::BTreeSet;
use std::error::Error;

use proptest::prelude::*;

use simple_supervisor::config::Section;
use simple_supervisor::errors::SupervisorError;
use simple_supervisor::query::{is_numbered_key, parse_numbered_list, prefixed_keys};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn numbered_key_matcher() {
    assert!(is_numbered_key("path1", "path"));
    assert!(is_numbered_key("path23", "path"));
    assert!(!is_numbered_key("path", "path"));
    assert!(!is_numbered_key("pathX", "path"));
    assert!(!is_numbered_key("path1x", "path"));
    assert!(!is_numbered_key("mypath1", "path"));
    assert!(!is_numbered_key("cwd", "path"));
    assert!(is_numbered_key("path99999999999999999999999", "path"));
}

#[test]
fn out_of_order_keys_with_gaps_are_each_yielded_once() -> TestResult {
    let cfg = config_from(
        "[list]\npath10 = /ten\npath2 = /two\ncwd = /ignored\npath7 = /seven\n",
    );
    let section = cfg.require_section("list")?;

    let items = parse_numbered_list(section, "path", false)?;
    assert_eq!(
        items,
        vec![
            ("path2".to_string(), "/two".to_string()),
            ("path7".to_string(), "/seven".to_string()),
            ("path10".to_string(), "/ten".to_string()),
        ]
    );
    Ok(())
}

#[test]
fn numbers_wider_than_u64_sort_after_smaller_ones() -> TestResult {
    let cfg = config_from(
        "[list]\npath99999999999999999999999 = /huge\npath2 = /two\npath0010 = /ten\n",
    );
    let section = cfg.require_section("list")?;

    let values: Vec<String> = parse_numbered_list(section, "path", false)?
        .into_iter()
        .map(|(_, value)| value)
        .collect();
    assert_eq!(values, ["/two", "/ten", "/huge"]);
    Ok(())
}

#[test]
fn malformed_numbered_key_is_a_config_error() -> TestResult {
    let cfg = config_from("[list]\npath1 = /one\npathX = /bad\n");
    let section = cfg.require_section("list")?;

    match parse_numbered_list(section, "path", false) {
        Err(SupervisorError::Config(msg)) => assert!(msg.contains("pathx")),
        other => panic!("expected Config error, got {other:?}"),
    }

    let items = parse_numbered_list(section, "path", true)?;
    assert_eq!(items, vec![("path1".to_string(), "/one".to_string())]);
    Ok(())
}

#[test]
fn prefixed_keys_keep_declaration_order() -> TestResult {
    let cfg = config_from("[simple_supervisor]\nkeys2 = b\ntop = /x\nkeys1 = a\n");
    let app = cfg.app_section()?;

    assert_eq!(prefixed_keys(app, "keys").collect::<Vec<_>>(), vec!["keys2", "keys1"]);
    Ok(())
}

proptest! {
    #[test]
    fn any_set_of_numbers_round_trips_through_a_section(
        numbers in proptest::collection::btree_set(0u32..10_000, 0..20),
        reversed in any::<bool>(),
    ) {
        let mut ordered: Vec<u32> = numbers.iter().copied().collect();
        if reversed {
            ordered.reverse();
        }

        let mut section = Section::new("list");
        for n in &ordered {
            section.insert(&format!("path{n}"), format!("/p/{n}"));
        }

        let items = parse_numbered_list(&section, "path", false).unwrap();
        let values: Vec<String> = items.into_iter().map(|(_, v)| v).collect();
        let expected: Vec<String> = numbers.iter().map(|n| format!("/p/{n}")).collect();

        prop_assert_eq!(&values, &expected);
        let unique: BTreeSet<&String> = values.iter().collect();
        prop_assert_eq!(unique.len(), values.len());
    }
}
