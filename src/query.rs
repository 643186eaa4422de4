// src/query.rs

//! Small helpers for picking items out of configuration key lists.
//!
//! - [`one`] / [`has_only_one`] enforce "exactly one" cardinality.
//! - [`prefixed_keys`], [`is_numbered_key`] and [`parse_numbered_list`]
//!   implement the `path1`, `path2`, ... convention used to encode lists in
//!   flat INI sections.

use crate::config::Section;
use crate::errors::{Result, SupervisorError};

/// Return the single item yielded by `iter`.
///
/// Fails with [`SupervisorError::NoResult`] when the iterator is empty and
/// with [`SupervisorError::MultipleResults`] when it yields more than one
/// item.
pub fn one<I>(iter: I) -> Result<I::Item>
where
    I: IntoIterator,
{
    let mut iter = iter.into_iter();
    let first = iter.next().ok_or(SupervisorError::NoResult)?;
    let extra = iter.count();
    if extra > 0 {
        return Err(SupervisorError::MultipleResults(extra + 1));
    }
    Ok(first)
}

/// Exactly one of `candidates` is present in `haystack`; return it.
pub fn has_only_one<'a, H, S>(haystack: H, candidates: &[&'a str]) -> Result<&'a str>
where
    H: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let present: Vec<&'a str> = haystack
        .into_iter()
        .filter_map(|item| {
            candidates
                .iter()
                .copied()
                .find(|candidate| *candidate == item.as_ref())
        })
        .collect();
    one(present)
}

/// Keys of `section` starting with `prefix`, in declaration order.
pub fn prefixed_keys<'a>(section: &'a Section, prefix: &'a str) -> impl Iterator<Item = &'a str> {
    section.keys().filter(move |key| key.starts_with(prefix))
}

/// `key` is `prefix` followed only by one or more ASCII digits.
pub fn is_numbered_key(key: &str, prefix: &str) -> bool {
    numbered_suffix(key, prefix).is_some()
}

/// Digits after `prefix`, without leading zeros; `None` unless `key` is
/// numbered.
fn numbered_suffix<'k>(key: &'k str, prefix: &str) -> Option<&'k str> {
    let digits = key.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.trim_start_matches('0'))
}

/// Parse the numbered-list keys `prefix1`, `prefix2`, ... of a section.
///
/// Returns `(key, value)` pairs ordered by the numeric suffix. Gaps are fine.
/// A key that starts with `prefix` but is not followed only by digits is a
/// configuration error, unless `silent` is set, in which case it is skipped.
pub fn parse_numbered_list(
    section: &Section,
    prefix: &str,
    silent: bool,
) -> Result<Vec<(String, String)>> {
    let mut numbered = Vec::new();

    for key in prefixed_keys(section, prefix) {
        match numbered_suffix(key, prefix) {
            Some(n) => {
                let value = section.get(key).unwrap_or_default();
                numbered.push((n, key.to_string(), value.to_string()));
            }
            None if silent => continue,
            None => {
                return Err(SupervisorError::Config(format!(
                    "Expected key name \"{prefix}\" followed only by digits in [{}]: {key:?}",
                    section.name()
                )));
            }
        }
    }

    // Compare numbers of any size by digit count, then digits.
    // `path01` and `path1` share a number; keep declaration order among them.
    numbered.sort_by(|(a, _, _), (b, _, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    Ok(numbered.into_iter().map(|(_, k, v)| (k, v)).collect())
}
