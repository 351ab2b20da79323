use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::Error;

// ── Position ──

/// A resolved source location. Line and column are 1-based; the column
/// counts bytes from the start of the line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidSignature(format!("bad position: {s:?}"));
        let mut parts = s.rsplitn(3, ':');
        let column = parts.next().and_then(|c| c.parse::<u32>().ok()).ok_or_else(invalid)?;
        let line = parts.next().and_then(|l| l.parse::<u32>().ok()).ok_or_else(invalid)?;
        let file = parts.next().filter(|f| !f.is_empty()).ok_or_else(invalid)?;
        Ok(Self::new(file, line, column))
    }
}

// ── Signature ──

/// The extracted shape of one function declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub position: Position,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {}",
            self.position,
            self.inputs.join(","),
            self.outputs.join(" ")
        )
    }
}

impl FromStr for Signature {
    type Err = Error;

    /// Parse the canonical `<position> (<inputs>) <outputs>` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (position, rest) = split_position(s)?;

        let close = matching_close(rest)
            .ok_or_else(|| Error::InvalidSignature(format!("unbalanced inputs: {s:?}")))?;
        let inputs = split_top_level(&rest[1..close], ',');

        let outputs = rest[close + 1..]
            .strip_prefix(' ')
            .ok_or_else(|| Error::InvalidSignature(format!("missing output separator: {s:?}")))?;
        let outputs = rejoin_outputs(split_top_level(outputs, ' '));

        Ok(Self {
            position,
            inputs,
            outputs,
        })
    }
}

/// Find the first ` (` whose prefix is a well-formed position.
fn split_position(s: &str) -> Result<(Position, &str), Error> {
    for (idx, _) in s.match_indices(" (") {
        if let Ok(position) = s[..idx].parse::<Position>() {
            return Ok((position, &s[idx + 1..]));
        }
    }
    Err(Error::InvalidSignature(format!("no position prefix: {s:?}")))
}

/// Index of the bracket closing the `(` at the start of `s`.
fn matching_close(s: &str) -> Option<usize> {
    if !s.starts_with('(') {
        return None;
    }
    let mut depth = 0usize;
    for (idx, ch) in s.char_indices() {
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split on `sep` wherever it is not nested inside brackets.
fn split_top_level(s: &str, sep: char) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in s.char_indices() {
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(s[start..idx].to_string());
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(s[start..].to_string());
    parts
}

/// Undo splits that landed inside a single type rendering, such as
/// `chan int`, `struct { x int }` or `func(int) (int, error)`.
fn rejoin_outputs(tokens: Vec<String>) -> Vec<String> {
    let mut outputs: Vec<String> = Vec::with_capacity(tokens.len());
    let mut pending = false;
    for token in tokens {
        let result_list =
            token.starts_with('(') && outputs.last().is_some_and(|t| is_bare_func_type(t));
        if (pending || result_list || token.starts_with('{')) && !outputs.is_empty() {
            let last = outputs.len() - 1;
            outputs[last].push(' ');
            outputs[last].push_str(&token);
        } else {
            outputs.push(token);
        }
        pending = outputs.last().is_some_and(|t| ends_with_chan_keyword(t));
    }
    outputs
}

/// `func(...)` with no result yet. A result list always follows it directly,
/// since no output type starts with `(`.
fn is_bare_func_type(token: &str) -> bool {
    token
        .strip_prefix("func")
        .is_some_and(|rest| matching_close(rest).is_some_and(|close| close + 1 == rest.len()))
}

fn ends_with_chan_keyword(token: &str) -> bool {
    let stem = token.strip_suffix("<-").unwrap_or(token);
    match stem.strip_suffix("chan") {
        Some(prefix) => !prefix
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_'),
        None => false,
    }
}
