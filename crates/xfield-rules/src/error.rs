//! # Error Types — Rule Configuration Errors
//!
//! Every variant here means a rule was declared incorrectly: a path that
//! does not fit the target's shape, a pattern that does not compile, a
//! reference that is not an array, or a comparison between values the
//! comparator cannot order. Invalid *data* is never an error; it is an
//! ordinary `false` from evaluation.
//!
//! These errors are not logged or recovered by the engine. They propagate
//! to the caller, which is expected to fail fast.

use thiserror::Error;
use xfield_core::PathError;

/// Configuration error raised while building or evaluating a rule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    /// A property path could not be parsed or resolved. The path error is
    /// part of the message, not a separate source.
    #[error("path error: {0}")]
    Path(PathError),

    /// A pattern condition's regular expression does not compile.
    #[error("malformed pattern {pattern:?}: {reason}")]
    MalformedPattern {
        /// The pattern as declared.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A field-reference condition points at something other than an array.
    #[error("reference '{path}' must resolve to an array, found {type_name}")]
    ReferenceNotArray {
        /// The reference path.
        path: String,
        /// Runtime type actually found.
        type_name: String,
    },

    /// The two sides of a comparison have different declared types.
    #[error("cannot compare {left} with {right}: declared types differ")]
    TypeMismatch {
        /// Type of the compared value.
        left: String,
        /// Type of the basis value.
        right: String,
    },

    /// A compared value's type is not on the comparator's allow-list.
    #[error("type {type_name} is not comparable")]
    UnsupportedType {
        /// The offending type.
        type_name: String,
    },

    /// One side of a comparison is null.
    #[error("cannot compare a null value")]
    NullOperand,

    /// A presence rule was declared without target paths.
    #[error("presence rule declares no target paths")]
    NoTargets,
}

impl From<PathError> for RuleError {
    fn from(err: PathError) -> Self {
        Self::Path(err)
    }
}
