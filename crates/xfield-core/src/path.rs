//! # Property Paths
//!
//! A [`PropertyPath`] is the parsed form of a dotted, optionally indexed
//! location such as `child.items[2].value`. Parsing happens once, when a
//! rule is declared; evaluation only walks the resulting [`Step`]s.
//!
//! ## Grammar
//!
//! ```text
//! path    := segment ("." segment)*
//! segment := name | name "[" digits "]"
//! name    := one or more characters other than '.', '[', ']' or whitespace
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PathError;

/// One segment of a property path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Plain member access: `name`.
    Member(String),
    /// Member access followed by a positional index: `name[index]`.
    Indexed {
        /// Member holding the array or list.
        name: String,
        /// Zero-based position.
        index: usize,
    },
}

impl Step {
    /// The member name, without any index.
    pub fn name(&self) -> &str {
        match self {
            Self::Member(name) | Self::Indexed { name, .. } => name,
        }
    }

    /// The index, for indexed steps.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Member(_) => None,
            Self::Indexed { index, .. } => Some(*index),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member(name) => f.write_str(name),
            Self::Indexed { name, index } => write!(f, "{name}[{index}]"),
        }
    }
}

/// A parsed, immutable property path. Always has at least one step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    steps: Vec<Step>,
}

impl PropertyPath {
    /// Parse a path string.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Malformed`] for empty paths or segments, a
    /// missing member name before `[`, a non-numeric or negative index, or
    /// characters after the closing `]`.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let malformed = |reason: String| PathError::Malformed {
            path: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(malformed("path is empty".to_string()));
        }

        let steps = raw
            .split('.')
            .enumerate()
            .map(|(pos, segment)| parse_segment(segment).map_err(|reason| {
                malformed(format!("segment {pos}: {reason}"))
            }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { steps })
    }

    /// All steps, root first.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; a parsed path has at least one step.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The final step.
    pub fn last(&self) -> &Step {
        // Construction guarantees at least one step.
        &self.steps[self.steps.len() - 1]
    }

    /// Every step except the last.
    pub fn owner_steps(&self) -> &[Step] {
        &self.steps[..self.steps.len() - 1]
    }
}

fn parse_segment(segment: &str) -> Result<Step, String> {
    if segment.is_empty() {
        return Err("empty segment".to_string());
    }

    let (name, index) = match segment.find('[') {
        None => (segment, None),
        Some(open) => {
            let rest = &segment[open + 1..];
            let close = rest
                .find(']')
                .ok_or_else(|| format!("unclosed '[' in {segment:?}"))?;
            if close + 1 != rest.len() {
                return Err(format!("unexpected characters after ']' in {segment:?}"));
            }
            let digits = &rest[..close];
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("index {digits:?} is not a non-negative integer"));
            }
            let index = digits
                .parse::<usize>()
                .map_err(|e| format!("index {digits:?} out of range: {e}"))?;
            (&segment[..open], Some(index))
        }
    };

    if name.is_empty() {
        return Err(format!("missing member name in {segment:?}"));
    }
    if let Some(c) = name
        .chars()
        .find(|c| *c == '[' || *c == ']' || c.is_whitespace())
    {
        return Err(format!("invalid character {c:?} in member name {name:?}"));
    }

    Ok(match index {
        None => Step::Member(name.to_string()),
        Some(index) => Step::Indexed {
            name: name.to_string(),
            index,
        },
    })
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl FromStr for PropertyPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for PropertyPath {
    type Error = PathError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl Serialize for PropertyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PropertyPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            "[a-zA-Z_][a-zA-Z0-9_]{0,8}".prop_map(Step::Member),
            ("[a-zA-Z_][a-zA-Z0-9_]{0,8}", 0usize..1000)
                .prop_map(|(name, index)| Step::Indexed { name, index }),
        ]
    }

    proptest! {
        /// Rendering a path and parsing it again yields the same steps.
        #[test]
        fn rendered_paths_reparse(steps in prop::collection::vec(step(), 1..6)) {
            let path = PropertyPath { steps };
            let reparsed = PropertyPath::parse(&path.to_string()).unwrap();
            prop_assert_eq!(reparsed, path);
        }
    }
}
