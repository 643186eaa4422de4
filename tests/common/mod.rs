#![allow(dead_code)]

pub use simple_supervisor_test_utils::builders;
pub use simple_supervisor_test_utils::fake_runner;
pub use simple_supervisor_test_utils::init_tracing;

use simple_supervisor::config::{Config, load_from_str};

/// Parse INI text, panicking on malformed test fixtures.
pub fn config_from(text: &str) -> Config {
    load_from_str(text).expect("test config should parse")
}
