//! # Conditions
//!
//! A [`ConditionDescriptor`] decides, from the current value of one field,
//! whether the effect of a rule is active. The value at the condition path
//! is tested against one of five kinds:
//!
//! | Kind             | Matches when                                           |
//! |------------------|--------------------------------------------------------|
//! | `LiteralSet`     | the rendered value is one of the declared alternatives |
//! | `Pattern`        | the value is a non-empty string and fully matches      |
//! | `BooleanTrue`    | the value is `true`                                    |
//! | `BooleanFalse`   | the value is `false`                                   |
//! | `FieldReference` | the value equals an element of a referenced array      |
//!
//! The operator then keeps (`EqualTo`) or inverts (`NotEqualTo`) the match.
//!
//! ## Null and empty
//!
//! Literal sets distinguish "value is null" from "value is the empty
//! string" through [`LiteralValue`]. Configuration that can only carry
//! strings spells the null alternative as [`NULL_MARKER`]. Field-reference
//! arrays accept either a `null` element or the marker string for the same
//! alternative.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use xfield_core::{resolve, PropertyPath, Value};

use crate::error::RuleError;

/// Spelling of the null alternative in string-only configuration slots.
pub const NULL_MARKER: &str = "<null>";

/// One alternative in a literal-set condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    /// The condition value is null.
    Null,
    /// The condition value is the empty string.
    Empty,
    /// The condition value renders as exactly this string.
    Literal(String),
}

impl LiteralValue {
    /// Interpret a configuration string: [`NULL_MARKER`] is `Null`, `""` is
    /// `Empty`, anything else is a literal.
    pub fn from_marker(raw: &str) -> Self {
        if raw == NULL_MARKER {
            Self::Null
        } else if raw.is_empty() {
            Self::Empty
        } else {
            Self::Literal(raw.to_string())
        }
    }

    /// Whether `value` is this alternative.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Null, Value::Null) => true,
            (Self::Null, _) | (_, Value::Null) => false,
            (Self::Empty, v) => render(v).is_empty(),
            (Self::Literal(expected), v) => render(v) == *expected,
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(raw: &str) -> Self {
        Self::from_marker(raw)
    }
}

impl From<Option<&str>> for LiteralValue {
    fn from(raw: Option<&str>) -> Self {
        raw.map_or(Self::Null, Self::from_marker)
    }
}

/// Whether a condition keeps or inverts its match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Satisfied when the value matches.
    #[default]
    EqualTo,
    /// Satisfied when the value does not match.
    NotEqualTo,
}

impl Operator {
    /// The opposite operator.
    pub fn inverted(self) -> Self {
        match self {
            Self::EqualTo => Self::NotEqualTo,
            Self::NotEqualTo => Self::EqualTo,
        }
    }

    fn apply(self, matched: bool) -> bool {
        match self {
            Self::EqualTo => matched,
            Self::NotEqualTo => !matched,
        }
    }
}

/// A compiled full-match regular expression.
///
/// Equality compares the declared source text.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    anchored: Regex,
}

impl Pattern {
    /// Compile `source` for full-string matching.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::MalformedPattern`] if `source` is not a valid
    /// regular expression on its own.
    pub fn new(source: &str) -> Result<Self, RuleError> {
        let malformed = |e: regex::Error| RuleError::MalformedPattern {
            pattern: source.to_string(),
            reason: e.to_string(),
        };
        // Validate the declared text alone; wrapping could balance stray parens.
        Regex::new(source).map_err(malformed)?;
        let anchored = Regex::new(&format!("^(?:{source})$")).map_err(malformed)?;
        Ok(Self {
            source: source.to_string(),
            anchored,
        })
    }

    /// The pattern as declared.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `text` matches in its entirety.
    pub fn full_match(&self, text: &str) -> bool {
        self.anchored.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// How the condition value is tested.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionKind {
    /// Value is one of the listed alternatives.
    LiteralSet(Vec<LiteralValue>),
    /// Value is a non-empty string fully matching the pattern.
    Pattern(Pattern),
    /// Value is `true`.
    BooleanTrue,
    /// Value is `false`.
    BooleanFalse,
    /// Value equals an element of the array at the given path.
    FieldReference(PropertyPath),
}

/// A declared condition: where to read, how to test, and polarity.
///
/// Immutable once built and reusable across any number of targets.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionDescriptor {
    path: PropertyPath,
    kind: ConditionKind,
    operator: Operator,
}

impl ConditionDescriptor {
    /// Create a descriptor from its parts.
    pub fn new(path: PropertyPath, kind: ConditionKind, operator: Operator) -> Self {
        Self {
            path,
            kind,
            operator,
        }
    }

    /// Literal-set condition with operator `EqualTo`.
    pub fn literal_set<L: Into<LiteralValue>>(
        path: PropertyPath,
        values: impl IntoIterator<Item = L>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        Self::new(path, ConditionKind::LiteralSet(values), Operator::EqualTo)
    }

    /// Pattern condition with operator `EqualTo`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::MalformedPattern`] if `pattern` does not compile.
    pub fn pattern(path: PropertyPath, pattern: &str) -> Result<Self, RuleError> {
        Ok(Self::new(
            path,
            ConditionKind::Pattern(Pattern::new(pattern)?),
            Operator::EqualTo,
        ))
    }

    /// Satisfied when the value is `true`.
    pub fn is_true(path: PropertyPath) -> Self {
        Self::new(path, ConditionKind::BooleanTrue, Operator::EqualTo)
    }

    /// Satisfied when the value is `false`.
    pub fn is_false(path: PropertyPath) -> Self {
        Self::new(path, ConditionKind::BooleanFalse, Operator::EqualTo)
    }

    /// Satisfied when the value equals an element of the array at `reference`.
    pub fn field_reference(path: PropertyPath, reference: PropertyPath) -> Self {
        Self::new(path, ConditionKind::FieldReference(reference), Operator::EqualTo)
    }

    /// Replace the operator.
    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    /// Invert the operator.
    pub fn negated(self) -> Self {
        let operator = self.operator.inverted();
        self.with_operator(operator)
    }

    /// The condition path.
    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    /// The test applied to the condition value.
    pub fn kind(&self) -> &ConditionKind {
        &self.kind
    }

    /// The operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Decide whether the condition holds for `target`.
    ///
    /// # Errors
    ///
    /// - [`RuleError::Path`] if the condition or reference path cannot be
    ///   resolved.
    /// - [`RuleError::ReferenceNotArray`] if a field reference does not
    ///   resolve to an array.
    pub fn is_satisfied(&self, target: &Value) -> Result<bool, RuleError> {
        let value = resolve(target, &self.path)?;

        let matched = match &self.kind {
            ConditionKind::LiteralSet(values) => values.iter().any(|lv| lv.matches(value)),
            ConditionKind::Pattern(pattern) => match value {
                Value::String(s) if !s.is_empty() => pattern.full_match(s),
                _ => false,
            },
            ConditionKind::BooleanTrue => value.as_bool() == Some(true),
            ConditionKind::BooleanFalse => value.as_bool() == Some(false),
            ConditionKind::FieldReference(reference) => match resolve(target, reference)? {
                Value::Array(elements) => elements.iter().any(|e| reference_matches(e, value)),
                other => {
                    return Err(RuleError::ReferenceNotArray {
                        path: reference.to_string(),
                        type_name: other.type_name(),
                    })
                }
            },
        };

        let satisfied = self.operator.apply(matched);
        tracing::debug!(
            path = %self.path,
            operator = ?self.operator,
            matched,
            satisfied,
            "evaluated condition"
        );
        Ok(satisfied)
    }
}

/// Element equality for field references: a null element or the marker
/// string stands for "value is null"; anything else must equal the value
/// with the same declared type.
fn reference_matches(element: &Value, value: &Value) -> bool {
    match element {
        Value::Null => value.is_null(),
        Value::String(s) if s == NULL_MARKER => value.is_null(),
        other => !value.is_null() && other == value,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xfield_core::{PathError, Record};

    fn path(raw: &str) -> PropertyPath {
        PropertyPath::parse(raw).unwrap()
    }

    fn target(field: impl Into<Value>) -> Value {
        Value::from(Record::new("Target").with("field", field))
    }

    fn null_empty_a() -> ConditionDescriptor {
        ConditionDescriptor::literal_set(
            path("field"),
            [LiteralValue::Null, LiteralValue::Empty, LiteralValue::from("a")],
        )
    }

    // ---- literal sets ----

    #[test]
    fn test_literal_set_null_empty_and_literal() {
        let cond = null_empty_a();
        assert!(cond.is_satisfied(&target(Value::Null)).unwrap());
        assert!(cond.is_satisfied(&target("")).unwrap());
        assert!(cond.is_satisfied(&target("a")).unwrap());
        assert!(!cond.is_satisfied(&target("b")).unwrap());
    }

    #[test]
    fn test_literal_set_not_equal_to_inverts() {
        let cond = null_empty_a().negated();
        assert_eq!(cond.operator(), Operator::NotEqualTo);
        assert!(!cond.is_satisfied(&target(Value::Null)).unwrap());
        assert!(cond.is_satisfied(&target("b")).unwrap());
    }

    #[test]
    fn test_literal_set_without_null_rejects_null() {
        let cond = ConditionDescriptor::literal_set(path("field"), ["", "a"]);
        assert!(!cond.is_satisfied(&target(Value::Null)).unwrap());
        assert!(cond.is_satisfied(&target("")).unwrap());
    }

    #[test]
    fn test_literal_set_marker_spelling() {
        let cond = ConditionDescriptor::literal_set(path("field"), [NULL_MARKER]);
        assert!(cond.is_satisfied(&target(Value::Null)).unwrap());
        assert!(!cond.is_satisfied(&target("")).unwrap());
    }

    #[test]
    fn test_literal_set_renders_non_strings() {
        let cond = ConditionDescriptor::literal_set(path("field"), ["42", "true", "OPEN"]);
        assert!(cond.is_satisfied(&target(42i32)).unwrap());
        assert!(cond.is_satisfied(&target(true)).unwrap());
        assert!(cond.is_satisfied(&target(Value::enumeration("Status", "OPEN"))).unwrap());
        assert!(!cond.is_satisfied(&target(false)).unwrap());
    }

    #[test]
    fn test_literal_value_from_option() {
        assert_eq!(LiteralValue::from(None), LiteralValue::Null);
        assert_eq!(LiteralValue::from(Some("")), LiteralValue::Empty);
        assert_eq!(LiteralValue::from(Some("x")), LiteralValue::Literal("x".into()));
    }

    // ---- patterns ----

    #[test]
    fn test_pattern_full_match_only() {
        let cond = ConditionDescriptor::pattern(path("field"), "[A-Z]{2}\\d+").unwrap();
        assert!(cond.is_satisfied(&target("AB12")).unwrap());
        assert!(!cond.is_satisfied(&target("xAB12")).unwrap());
        assert!(!cond.is_satisfied(&target("AB12x")).unwrap());
    }

    #[test]
    fn test_pattern_never_matches_absent_data() {
        let cond = ConditionDescriptor::pattern(path("field"), ".*").unwrap();
        assert!(!cond.is_satisfied(&target(Value::Null)).unwrap());
        assert!(!cond.is_satisfied(&target("")).unwrap());
        // Negation still flips the result.
        assert!(cond.negated().is_satisfied(&target("")).unwrap());
    }

    #[test]
    fn test_pattern_alternation_is_anchored_as_a_whole() {
        let cond = ConditionDescriptor::pattern(path("field"), "a|b").unwrap();
        assert!(cond.is_satisfied(&target("a")).unwrap());
        assert!(!cond.is_satisfied(&target("ab")).unwrap());
    }

    #[test]
    fn test_pattern_malformed_fails_at_declaration() {
        let err = ConditionDescriptor::pattern(path("field"), "a)(b").unwrap_err();
        assert!(matches!(err, RuleError::MalformedPattern { ref pattern, .. } if pattern == "a)(b"));
        assert!(ConditionDescriptor::pattern(path("field"), "[unclosed").is_err());
    }

    #[test]
    fn test_pattern_never_matches_non_strings() {
        let digits = ConditionDescriptor::pattern(path("field"), "\\d{3}").unwrap();
        assert!(digits.is_satisfied(&target("123")).unwrap());
        assert!(!digits.is_satisfied(&target(123i64)).unwrap());

        let word = ConditionDescriptor::pattern(path("field"), "true|OPEN").unwrap();
        assert!(!word.is_satisfied(&target(true)).unwrap());
        assert!(!word.is_satisfied(&target(Value::enumeration("Status", "OPEN"))).unwrap());
        // NotEqualTo still inverts the non-match.
        assert!(word.negated().is_satisfied(&target(true)).unwrap());
    }

    // ---- booleans ----

    #[test]
    fn test_boolean_conditions() {
        let t = ConditionDescriptor::is_true(path("field"));
        let f = ConditionDescriptor::is_false(path("field"));
        assert!(t.is_satisfied(&target(true)).unwrap());
        assert!(!t.is_satisfied(&target(false)).unwrap());
        assert!(f.is_satisfied(&target(false)).unwrap());
        assert!(!f.is_satisfied(&target(true)).unwrap());
    }

    #[test]
    fn test_boolean_null_matches_neither() {
        let null = target(Value::Null);
        assert!(!ConditionDescriptor::is_true(path("field")).is_satisfied(&null).unwrap());
        assert!(!ConditionDescriptor::is_false(path("field")).is_satisfied(&null).unwrap());
        assert!(ConditionDescriptor::is_true(path("field"))
            .negated()
            .is_satisfied(&null)
            .unwrap());
    }

    // ---- field references ----

    fn with_allowed(field: impl Into<Value>, allowed: Value) -> Value {
        Value::from(
            Record::new("Target")
                .with("field", field)
                .with("allowed", allowed),
        )
    }

    #[test]
    fn test_field_reference_null_and_literal() {
        let cond = ConditionDescriptor::field_reference(path("field"), path("allowed"));
        let allowed = || Value::Array(vec![Value::Null, Value::from("a")]);
        assert!(cond.is_satisfied(&with_allowed(Value::Null, allowed())).unwrap());
        assert!(cond.is_satisfied(&with_allowed("a", allowed())).unwrap());
        assert!(!cond.is_satisfied(&with_allowed("b", allowed())).unwrap());
    }

    #[test]
    fn test_field_reference_marker_element_matches_only_null() {
        let cond = ConditionDescriptor::field_reference(path("field"), path("allowed"));
        let allowed = || Value::array([NULL_MARKER]);
        assert!(cond.is_satisfied(&with_allowed(Value::Null, allowed())).unwrap());
        assert!(!cond.is_satisfied(&with_allowed(NULL_MARKER, allowed())).unwrap());
    }

    #[test]
    fn test_field_reference_equality_is_type_strict() {
        let cond = ConditionDescriptor::field_reference(path("field"), path("allowed"));
        let g = with_allowed(1i64, Value::array([1i32]));
        assert!(!cond.is_satisfied(&g).unwrap());
        let g = with_allowed(1i32, Value::array([1i32]));
        assert!(cond.is_satisfied(&g).unwrap());
    }

    #[test]
    fn test_field_reference_requires_array() {
        let cond = ConditionDescriptor::field_reference(path("field"), path("allowed"));
        let err = cond
            .is_satisfied(&with_allowed("a", Value::list(["a"])))
            .unwrap_err();
        assert_eq!(
            err,
            RuleError::ReferenceNotArray {
                path: "allowed".into(),
                type_name: "list".into()
            }
        );
        assert!(matches!(
            cond.is_satisfied(&with_allowed("a", Value::Null)),
            Err(RuleError::ReferenceNotArray { .. })
        ));
    }

    // ---- resolution failures ----

    #[test]
    fn test_missing_condition_member_bubbles() {
        let cond = ConditionDescriptor::is_true(path("absent"));
        assert!(matches!(
            cond.is_satisfied(&target(true)),
            Err(RuleError::Path(PathError::MemberNotFound { .. }))
        ));
    }
}
