// src/shell.rs

//! Restricted shell-like tokenizer and quoting.
//!
//! Command strings from the config are split into argv here; they are never
//! handed to a shell. Supported syntax:
//!
//! - whitespace separates words
//! - `'...'` quotes literally
//! - `"..."` quotes, with `\"`, `\\`, `\$` and `` \` `` escapes
//! - `\x` outside quotes escapes `x`
//!
//! No variables, globs, pipes or redirections.

use crate::errors::{Result, SupervisorError};

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Between,
    Word,
    Single,
    Double,
}

/// Split a command string into words.
pub fn split(input: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut state = State::Between;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match state {
            State::Between | State::Word => match c {
                c if c.is_whitespace() => {
                    if state == State::Word {
                        words.push(std::mem::take(&mut word));
                        state = State::Between;
                    }
                }
                '\'' => state = State::Single,
                '"' => state = State::Double,
                '\\' => {
                    let escaped = chars.next().ok_or_else(|| {
                        tokenize_error(input, "trailing backslash")
                    })?;
                    // Backslash-newline is a line continuation.
                    if escaped != '\n' {
                        word.push(escaped);
                        state = State::Word;
                    }
                }
                c => {
                    word.push(c);
                    state = State::Word;
                }
            },
            State::Single => match c {
                '\'' => state = State::Word,
                c => word.push(c),
            },
            State::Double => match c {
                '"' => state = State::Word,
                '\\' => match chars.next() {
                    Some(e @ ('"' | '\\' | '$' | '`')) => word.push(e),
                    Some('\n') => {}
                    Some(other) => {
                        word.push('\\');
                        word.push(other);
                    }
                    None => return Err(tokenize_error(input, "unterminated double quote")),
                },
                c => word.push(c),
            },
        }
    }

    match state {
        State::Single => Err(tokenize_error(input, "unterminated single quote")),
        State::Double => Err(tokenize_error(input, "unterminated double quote")),
        State::Word => {
            words.push(word);
            Ok(words)
        }
        State::Between => Ok(words),
    }
}

fn tokenize_error(input: &str, reason: &str) -> SupervisorError {
    SupervisorError::Config(format!("cannot tokenize command {input:?}: {reason}"))
}

fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c)
}

/// Quote a single word so that [`split`] (or a POSIX shell) reads it back
/// unchanged.
pub fn quote(word: &str) -> String {
    if word.is_empty() {
        return "''".to_string();
    }
    if word.chars().all(is_safe) {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r#"'"'"'"#))
}

/// Quote and join argv into a single previewable command line.
pub fn join<S: AsRef<str>>(argv: &[S]) -> String {
    argv.iter()
        .map(|w| quote(w.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
