//! Finding and reading the `export const meta = { ... }` block of an article.
//!
//! The block is an object literal. It is read with a JSON5 parser, so the
//! usual literal spellings (bare keys, single or double quotes with escapes,
//! comments, trailing commas) come out as data. Identifiers and expressions
//! such as `undefined` or `new Date(...)` are rejected, nothing is evaluated.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

// The literal ends at the first line that starts with its closing brace.
static META_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)export\s+const\s+meta\s+=\s+(\{.*?\n\})").expect("meta regex")
});

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("metadata is not a valid object literal: {0}")]
    Syntax(#[from] json5::Error),
}

/// The object literal text of the metadata declaration, braces included.
#[must_use]
pub fn extract(contents: &str) -> Option<&str> {
    META_RE
        .captures(contents)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn parse(literal: &str) -> Result<Map<String, Value>, Error> {
    let map: Map<String, Value> = json5::from_str(literal)?;
    Ok(map)
}
