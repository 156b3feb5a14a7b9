//! # Error Types — Path Resolution Failures
//!
//! Every error in this crate describes a mis-declared property path: a member
//! name no declaring type carries, an index applied to a container that has
//! no positional order, or a walk that runs into `null`. None of these
//! describe invalid *data*; they are configuration errors and callers are
//! expected to fail fast on them.
//!
//! ## Design
//!
//! - Each variant names the offending path segment so the failing
//!   declaration can be located without re-running the walk.
//! - Out-of-range indexes are returned as a value, never recovered locally.

use thiserror::Error;

/// Error while parsing or walking a property path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path string could not be parsed.
    #[error("malformed property path {path:?}: {reason}")]
    Malformed {
        /// The raw path string.
        path: String,
        /// Why the path was rejected.
        reason: String,
    },

    /// No type in the owner's declaring-type chain declares the member.
    #[error("member '{segment}' is not declared by {type_name} or any of its supertypes")]
    MemberNotFound {
        /// The path segment being resolved.
        segment: String,
        /// Runtime type of the value the member was looked up on.
        type_name: String,
    },

    /// An index was applied to a container that is neither an array nor an
    /// ordered list.
    #[error("segment '{segment}' indexes into {type_name}, which is not an array or ordered list")]
    UnsupportedContainer {
        /// The indexed path segment.
        segment: String,
        /// Runtime type of the indexed value.
        type_name: String,
    },

    /// The index is past the end of the array or list.
    #[error("index {index} out of range for '{segment}' (length {len})")]
    IndexOutOfRange {
        /// The indexed path segment.
        segment: String,
        /// The requested index.
        index: usize,
        /// Length of the container.
        len: usize,
    },

    /// A `null` value was reached where a member or element had to be read.
    #[error("cannot resolve '{segment}' through a null value")]
    NullTraversal {
        /// The path segment that could not be read.
        segment: String,
    },
}
