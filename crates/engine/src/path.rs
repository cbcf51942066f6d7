//! Dotted function paths
//!
//! A path such as `dialogRenderer.DrawNextArrow` names a property chain from
//! the engine root. Paths are validated once, when parsed, so that malformed
//! names are rejected at registration instead of at first call.

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// A validated dotted path to a member of the engine object graph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FnPath {
    raw: String,
    segments: Vec<String>,
}

impl FnPath {
    /// Parse and validate a dotted path
    ///
    /// Every segment must be non-empty and free of whitespace.
    pub fn parse(path: &str) -> Result<Self, EngineError> {
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();

        let valid = !path.is_empty()
            && segments
                .iter()
                .all(|s| !s.is_empty() && !s.chars().any(char::is_whitespace));

        if !valid {
            return Err(EngineError::InvalidPath(path.to_string()));
        }

        Ok(Self {
            raw: path.to_string(),
            segments,
        })
    }

    /// The path as originally written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Segments leading to the object that owns the final member
    pub fn parent(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// Name of the final member
    pub fn name(&self) -> &str {
        // parse() guarantees at least one segment
        &self.segments[self.segments.len() - 1]
    }

    /// All segments in order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for FnPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for FnPath {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
