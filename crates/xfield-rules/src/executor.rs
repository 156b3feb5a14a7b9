//! # Rule Executor
//!
//! Evaluates rule descriptors against a target graph. Every evaluation is a
//! pure function of the descriptor and the graph snapshot: nothing is cached
//! and nothing is carried between calls.
//!
//! ## Presence rules
//!
//! One flag plus the condition's polarity covers both "becomes required"
//! and "becomes forbidden":
//!
//! ```text
//! require_empty = if satisfied { flag } else { !flag }
//! pass          = every target: is_empty(value) == require_empty
//! ```
//!
//! A value is empty when it is `null` or the empty string.
//!
//! ## Comparison rules
//!
//! Both sides are resolved and handed to the comparator. A null on either
//! side is data, not a mis-declared rule, and the rule passes.
//!
//! ## Rule sets
//!
//! [`RuleSet::evaluate`] reports every rule separately. A failing or
//! mis-declared rule never prevents later rules from being evaluated.

use serde::Serialize;
use xfield_core::{resolve, Value};

use crate::compare;
use crate::error::RuleError;
use crate::rule::{ComparisonRule, PresenceRule, Rule};

/// Whether a resolved target counts as empty.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Evaluate one rule against `target`.
///
/// Returns `Ok(true)` when the rule passes and `Ok(false)` on a violation.
///
/// # Errors
///
/// Any [`RuleError`]: path resolution failures, condition errors, and
/// comparator errors. All of them indicate a mis-declared rule.
pub fn evaluate(rule: &Rule, target: &Value) -> Result<bool, RuleError> {
    match rule {
        Rule::Presence(rule) => evaluate_presence(rule, target),
        Rule::Comparison(rule) => evaluate_comparison(rule, target),
    }
}

/// Evaluate a presence rule.
///
/// # Errors
///
/// See [`evaluate`].
pub fn evaluate_presence(rule: &PresenceRule, target: &Value) -> Result<bool, RuleError> {
    let satisfied = rule.condition().is_satisfied(target)?;
    let require_empty = if satisfied {
        rule.require_empty_when_satisfied()
    } else {
        !rule.require_empty_when_satisfied()
    };

    // Resolve every target before deciding so a bad path is never masked by
    // an earlier violation.
    let mut passed = true;
    for path in rule.targets() {
        let value = resolve(target, path)?;
        passed &= is_empty(value) == require_empty;
    }
    Ok(passed)
}

/// Evaluate a comparison rule.
///
/// A null on either side passes: whether a field must be present is for a
/// presence rule to decide.
///
/// # Errors
///
/// See [`evaluate`].
pub fn evaluate_comparison(rule: &ComparisonRule, target: &Value) -> Result<bool, RuleError> {
    let value = resolve(target, rule.path())?;
    let basis = resolve(target, rule.basis())?;
    if value.is_null() || basis.is_null() {
        return Ok(true);
    }
    compare::is_valid(
        value,
        basis,
        rule.allows_equal(),
        rule.valid_when_less_than_basis(),
    )
}

impl Rule {
    /// Shorthand for [`evaluate`].
    pub fn evaluate(&self, target: &Value) -> Result<bool, RuleError> {
        evaluate(self, target)
    }
}

/// A rule with an optional caller-chosen name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedRule {
    /// Name used in outcome reports.
    pub name: Option<String>,
    /// The rule itself.
    pub rule: Rule,
}

/// Outcome of one rule within a [`RuleSet`] evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    /// Position of the rule in its set.
    pub index: usize,
    /// The rule's name, if it has one.
    pub name: Option<String>,
    /// Path a violation is reported against.
    pub property_path: String,
    /// `Ok(true)` pass, `Ok(false)` violation, `Err` configuration error.
    pub result: Result<bool, RuleError>,
}

impl RuleOutcome {
    /// The rule passed.
    pub fn passed(&self) -> bool {
        matches!(self.result, Ok(true))
    }

    /// The rule was evaluated and the data violates it.
    pub fn is_violation(&self) -> bool {
        matches!(self.result, Ok(false))
    }

    /// The rule could not be evaluated because it is mis-declared.
    pub fn error(&self) -> Option<&RuleError> {
        self.result.as_ref().err()
    }

    /// A serializable summary of this outcome.
    pub fn summary(&self) -> OutcomeSummary {
        let (status, error) = match &self.result {
            Ok(true) => (OutcomeStatus::Pass, None),
            Ok(false) => (OutcomeStatus::Fail, None),
            Err(e) => (OutcomeStatus::Error, Some(e.to_string())),
        };
        OutcomeSummary {
            index: self.index,
            name: self.name.clone(),
            property_path: self.property_path.clone(),
            status,
            error,
        }
    }
}

/// Status of a rule outcome, for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Rule passed.
    Pass,
    /// Data violates the rule.
    Fail,
    /// Rule is mis-declared.
    Error,
}

/// Serializable view of a [`RuleOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeSummary {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub property_path: String,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// An ordered collection of rules attached to one kind of target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<NamedRule>,
}

impl RuleSet {
    /// An empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unnamed rule.
    pub fn push(&mut self, rule: impl Into<Rule>) {
        self.rules.push(NamedRule {
            name: None,
            rule: rule.into(),
        });
    }

    /// Append a named rule.
    pub fn push_named(&mut self, name: impl Into<String>, rule: impl Into<Rule>) {
        self.rules.push(NamedRule {
            name: Some(name.into()),
            rule: rule.into(),
        });
    }

    /// Builder-style [`RuleSet::push`].
    pub fn with(mut self, rule: impl Into<Rule>) -> Self {
        self.push(rule);
        self
    }

    /// Builder-style [`RuleSet::push_named`].
    pub fn with_named(mut self, name: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.push_named(name, rule);
        self
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &NamedRule> {
        self.rules.iter()
    }

    /// Evaluate every rule against `target`, in declaration order.
    pub fn evaluate(&self, target: &Value) -> Vec<RuleOutcome> {
        self.rules
            .iter()
            .enumerate()
            .map(|(index, named)| {
                let result = named.rule.evaluate(target);
                tracing::debug!(
                    index,
                    name = named.name.as_deref().unwrap_or(""),
                    path = %named.rule.reported_path(),
                    result = ?result,
                    "evaluated rule"
                );
                RuleOutcome {
                    index,
                    name: named.name.clone(),
                    property_path: named.rule.reported_path().to_string(),
                    result,
                }
            })
            .collect()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter
                .into_iter()
                .map(|rule| NamedRule { name: None, rule })
                .collect(),
        }
    }
}
