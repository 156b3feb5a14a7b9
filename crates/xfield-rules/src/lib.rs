//! # xfield-rules — Cross-Field Rule Evaluation
//!
//! Rules that relate two or more fields of the same object graph:
//!
//! - **Presence rules** ([`PresenceRule`]): "when `contact.method` is
//!   `email`, `email` must be filled". A [`ConditionDescriptor`] decides
//!   whether the rule's effect is active.
//! - **Comparison rules** ([`ComparisonRule`]): "`end` must be after
//!   `start`". Both sides must share a declared type; the comparator never
//!   coerces.
//!
//! ## Modules
//!
//! - [`condition`]: condition kinds, operators, and the null/empty
//!   literal convention.
//! - [`compare`]: the type-strict value comparator.
//! - [`rule`]: rule descriptors.
//! - [`executor`]: evaluation of single rules and of [`RuleSet`]s.
//! - [`document`]: YAML/JSON rule documents compiled into rule sets.
//!
//! ## Errors versus violations
//!
//! Evaluation returns `Ok(false)` when data violates a rule. An `Err` means
//! the rule itself is mis-declared (see [`RuleError`]) and is returned to
//! the caller unlogged.
//!
//! ## Crate Policy
//!
//! - Depends only on `xfield-core` internally.
//! - Descriptors are immutable after construction and hold no per-target
//!   state, so one [`RuleSet`] may be evaluated from many threads at once.

pub mod compare;
pub mod condition;
pub mod document;
pub mod error;
pub mod executor;
pub mod rule;

pub use compare::{is_comparable, is_valid, order};
pub use condition::{ConditionDescriptor, ConditionKind, LiteralValue, Operator, Pattern, NULL_MARKER};
pub use document::{DocumentError, RuleDocument};
pub use error::RuleError;
pub use executor::{evaluate, NamedRule, OutcomeStatus, OutcomeSummary, RuleOutcome, RuleSet};
pub use rule::{ComparisonRule, PresenceRule, Rule};
