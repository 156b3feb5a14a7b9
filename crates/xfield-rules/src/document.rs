//! # Rule Documents
//!
//! Serde representation of rule descriptors, so a rule set can be declared
//! in YAML or JSON next to the data it governs:
//!
//! ```yaml
//! rules:
//!   - name: email-required-for-email-contact
//!     presence:
//!       targets: [email]
//!       condition:
//!         path: contact.method
//!         literals: [email]
//!   - name: end-after-start
//!     comparison:
//!       path: end
//!       basis: start
//! ```
//!
//! A condition carries exactly one of `literals`, `pattern`, `is`, or
//! `reference`; declaring none or several is a parse error. In `literals`,
//! `~` and `"<null>"` both stand for a null value and `""` for the empty
//! string.
//!
//! Parsing only checks document shape. Paths and patterns are checked by
//! [`RuleDocument::compile`], which reports the index and name of the
//! failing entry.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xfield_core::PropertyPath;

use crate::condition::{ConditionDescriptor, ConditionKind, LiteralValue, Operator, Pattern};
use crate::error::RuleError;
use crate::executor::RuleSet;
use crate::rule::{ComparisonRule, PresenceRule, Rule};

/// Errors from loading or compiling a rule document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document file could not be read.
    #[error("cannot read rule document {path}: {reason}")]
    Load {
        /// File path as given.
        path: String,
        /// I/O diagnostic.
        reason: String,
    },

    /// The document is not valid YAML/JSON or has the wrong shape.
    #[error("invalid rule document: {reason}")]
    Parse {
        /// Deserializer diagnostic.
        reason: String,
    },

    /// An entry parsed but does not form a valid rule.
    #[error("rule #{index} ({name})")]
    Compile {
        /// Zero-based entry position.
        index: usize,
        /// Entry name, or `<unnamed>`.
        name: String,
        /// Underlying configuration error.
        source: RuleError,
    },
}

/// Top-level rule document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDocument {
    /// Entries in evaluation order.
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

/// One named or unnamed rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub spec: RuleSpec,
}

/// Rule family, keyed by `presence` or `comparison`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSpec {
    Presence(PresenceSpec),
    Comparison(ComparisonSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceSpec {
    pub targets: Vec<String>,
    pub condition: ConditionSpec,
    #[serde(default)]
    pub require_empty_when_satisfied: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSpec {
    pub path: String,
    pub basis: String,
    #[serde(default)]
    pub allows_equal: bool,
    #[serde(default)]
    pub valid_when_less_than_basis: bool,
}

/// A condition declares exactly one of `literals`, `pattern`, `is`, or
/// `reference`; documents declaring none or several are rejected on parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConditionFields", into = "ConditionFields")]
pub struct ConditionSpec {
    pub path: String,
    pub operator: Operator,
    pub kind: ConditionKindSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConditionKindSpec {
    /// `None` is the null alternative.
    Literals(Vec<Option<String>>),
    Pattern(String),
    Is(bool),
    Reference(String),
}

/// Wire form of a [`ConditionSpec`]: one optional key per condition kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionFields {
    pub path: String,
    #[serde(default)]
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literals: Option<Vec<Option<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl TryFrom<ConditionFields> for ConditionSpec {
    type Error = String;

    fn try_from(fields: ConditionFields) -> Result<Self, Self::Error> {
        let declared: Vec<ConditionKindSpec> = [
            fields.literals.map(ConditionKindSpec::Literals),
            fields.pattern.map(ConditionKindSpec::Pattern),
            fields.is.map(ConditionKindSpec::Is),
            fields.reference.map(ConditionKindSpec::Reference),
        ]
        .into_iter()
        .flatten()
        .collect();

        let mut kinds = declared.into_iter();
        match (kinds.next(), kinds.next()) {
            (Some(kind), None) => Ok(Self {
                path: fields.path,
                operator: fields.operator,
                kind,
            }),
            (None, _) => Err(format!(
                "condition on '{}' declares none of literals, pattern, is, reference",
                fields.path
            )),
            (Some(_), Some(_)) => Err(format!(
                "condition on '{}' declares more than one of literals, pattern, is, reference",
                fields.path
            )),
        }
    }
}

impl From<ConditionSpec> for ConditionFields {
    fn from(spec: ConditionSpec) -> Self {
        let mut fields = Self {
            path: spec.path,
            operator: spec.operator,
            ..Self::default()
        };
        match spec.kind {
            ConditionKindSpec::Literals(values) => fields.literals = Some(values),
            ConditionKindSpec::Pattern(source) => fields.pattern = Some(source),
            ConditionKindSpec::Is(flag) => fields.is = Some(flag),
            ConditionKindSpec::Reference(path) => fields.reference = Some(path),
        }
        fields
    }
}

impl RuleDocument {
    /// Parse a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self, DocumentError> {
        serde_yaml::from_str(content).map_err(|e| DocumentError::Parse {
            reason: format!("invalid YAML: {e}"),
        })
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(content).map_err(|e| DocumentError::Parse {
            reason: format!("invalid JSON: {e}"),
        })
    }

    /// Load a document from disk. `.yaml`/`.yml` files are read as YAML,
    /// everything else as JSON.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path).map_err(|e| DocumentError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        if is_yaml(path) {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Build descriptors for every entry.
    ///
    /// # Errors
    ///
    /// [`DocumentError::Compile`] for the first entry whose paths, pattern,
    /// or target list are invalid.
    pub fn compile(&self) -> Result<RuleSet, DocumentError> {
        let mut set = RuleSet::new();
        for (index, entry) in self.rules.iter().enumerate() {
            let rule = entry.spec.compile().map_err(|source| DocumentError::Compile {
                index,
                name: entry.name.clone().unwrap_or_else(|| "<unnamed>".to_string()),
                source,
            })?;
            match &entry.name {
                Some(name) => set.push_named(name.clone(), rule),
                None => set.push(rule),
            }
        }
        tracing::debug!(rules = set.len(), "compiled rule document");
        Ok(set)
    }
}

/// True for `.yaml` and `.yml` paths.
pub fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

impl RuleSpec {
    /// Build the descriptor this entry declares.
    pub fn compile(&self) -> Result<Rule, RuleError> {
        match self {
            Self::Presence(spec) => {
                let targets = spec
                    .targets
                    .iter()
                    .map(|t| PropertyPath::parse(t))
                    .collect::<Result<Vec<_>, _>>()?;
                let condition = spec.condition.compile()?;
                Ok(PresenceRule::new(targets, condition, spec.require_empty_when_satisfied)?.into())
            }
            Self::Comparison(spec) => Ok(ComparisonRule::new(
                PropertyPath::parse(&spec.path)?,
                PropertyPath::parse(&spec.basis)?,
                spec.allows_equal,
                spec.valid_when_less_than_basis,
            )
            .into()),
        }
    }
}

impl ConditionSpec {
    /// Build the condition descriptor.
    pub fn compile(&self) -> Result<ConditionDescriptor, RuleError> {
        let path = PropertyPath::parse(&self.path)?;
        let kind = match &self.kind {
            ConditionKindSpec::Literals(values) => ConditionKind::LiteralSet(
                values
                    .iter()
                    .map(|v| match v {
                        None => LiteralValue::Null,
                        Some(raw) => LiteralValue::from_marker(raw),
                    })
                    .collect(),
            ),
            ConditionKindSpec::Pattern(source) => ConditionKind::Pattern(Pattern::new(source)?),
            ConditionKindSpec::Is(true) => ConditionKind::BooleanTrue,
            ConditionKindSpec::Is(false) => ConditionKind::BooleanFalse,
            ConditionKindSpec::Reference(reference) => {
                ConditionKind::FieldReference(PropertyPath::parse(reference)?)
            }
        };
        Ok(ConditionDescriptor::new(path, kind, self.operator))
    }
}
