//! # Rule Descriptors
//!
//! The two rule families the executor understands:
//!
//! - [`PresenceRule`]: a condition decides whether one or more target
//!   fields must be empty or must be filled.
//! - [`ComparisonRule`]: a field must stand above (or below) a basis field,
//!   optionally allowing equality.
//!
//! Descriptors are built once, hold no per-target state, and may be shared
//! freely across threads.

use xfield_core::PropertyPath;

use crate::condition::ConditionDescriptor;
use crate::error::RuleError;

/// Conditional presence: when the condition holds, targets must be empty
/// iff `require_empty_when_satisfied`; when it does not hold, the opposite.
#[derive(Debug, Clone, PartialEq)]
pub struct PresenceRule {
    targets: Vec<PropertyPath>,
    condition: ConditionDescriptor,
    require_empty_when_satisfied: bool,
}

impl PresenceRule {
    /// Create a presence rule.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::NoTargets`] if `targets` is empty.
    pub fn new(
        targets: Vec<PropertyPath>,
        condition: ConditionDescriptor,
        require_empty_when_satisfied: bool,
    ) -> Result<Self, RuleError> {
        if targets.is_empty() {
            return Err(RuleError::NoTargets);
        }
        Ok(Self {
            targets,
            condition,
            require_empty_when_satisfied,
        })
    }

    /// Targets must be filled when the condition holds, empty otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::NoTargets`] if `targets` is empty.
    pub fn required_when(
        targets: Vec<PropertyPath>,
        condition: ConditionDescriptor,
    ) -> Result<Self, RuleError> {
        Self::new(targets, condition, false)
    }

    /// Targets must be empty when the condition holds, filled otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::NoTargets`] if `targets` is empty.
    pub fn empty_when(
        targets: Vec<PropertyPath>,
        condition: ConditionDescriptor,
    ) -> Result<Self, RuleError> {
        Self::new(targets, condition, true)
    }

    /// Target paths; never empty.
    pub fn targets(&self) -> &[PropertyPath] {
        &self.targets
    }

    /// The governing condition.
    pub fn condition(&self) -> &ConditionDescriptor {
        &self.condition
    }

    /// Whether targets must be empty while the condition holds.
    pub fn require_empty_when_satisfied(&self) -> bool {
        self.require_empty_when_satisfied
    }
}

/// Ordering between a field and a basis field of the same declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComparisonRule {
    path: PropertyPath,
    basis: PropertyPath,
    allows_equal: bool,
    valid_when_less_than_basis: bool,
}

impl ComparisonRule {
    /// Create a comparison rule.
    pub fn new(
        path: PropertyPath,
        basis: PropertyPath,
        allows_equal: bool,
        valid_when_less_than_basis: bool,
    ) -> Self {
        Self {
            path,
            basis,
            allows_equal,
            valid_when_less_than_basis,
        }
    }

    /// `path > basis`.
    pub fn greater_than(path: PropertyPath, basis: PropertyPath) -> Self {
        Self::new(path, basis, false, false)
    }

    /// `path >= basis`.
    pub fn at_least(path: PropertyPath, basis: PropertyPath) -> Self {
        Self::new(path, basis, true, false)
    }

    /// `path < basis`.
    pub fn less_than(path: PropertyPath, basis: PropertyPath) -> Self {
        Self::new(path, basis, false, true)
    }

    /// `path <= basis`.
    pub fn at_most(path: PropertyPath, basis: PropertyPath) -> Self {
        Self::new(path, basis, true, true)
    }

    /// The compared field.
    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    /// The basis field.
    pub fn basis(&self) -> &PropertyPath {
        &self.basis
    }

    /// Whether equality is acceptable.
    pub fn allows_equal(&self) -> bool {
        self.allows_equal
    }

    /// Whether the field must be below (rather than above) the basis.
    pub fn valid_when_less_than_basis(&self) -> bool {
        self.valid_when_less_than_basis
    }
}

/// Either rule family.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Conditional presence.
    Presence(PresenceRule),
    /// Field-to-field ordering.
    Comparison(ComparisonRule),
}

impl Rule {
    /// The path a violation of this rule is reported against: the first
    /// target of a presence rule, the compared field of a comparison rule.
    pub fn reported_path(&self) -> &PropertyPath {
        match self {
            Self::Presence(rule) => &rule.targets[0],
            Self::Comparison(rule) => &rule.path,
        }
    }
}

impl From<PresenceRule> for Rule {
    fn from(rule: PresenceRule) -> Self {
        Self::Presence(rule)
    }
}

impl From<ComparisonRule> for Rule {
    fn from(rule: ComparisonRule) -> Self {
        Self::Comparison(rule)
    }
}
