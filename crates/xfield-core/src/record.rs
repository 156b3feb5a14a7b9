//! # Records — Members Grouped by Declaring Type
//!
//! A [`Record`] is the object node of a target graph. Instead of a live
//! walk up a class hierarchy, each record carries the explicit list of its
//! declaring types, ordered from the concrete type to the furthest ancestor,
//! together with the members each of them declares.
//!
//! Member lookup scans that list front to back, so a member declared by the
//! concrete type shadows an ancestor member with the same name. Visibility
//! is not modelled: every declared member is reachable.

use std::collections::BTreeMap;

use crate::error::PathError;
use crate::value::Value;

/// Members declared by one type in a record's hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredMembers {
    declaring_type: String,
    members: BTreeMap<String, Value>,
}

impl DeclaredMembers {
    fn new(declaring_type: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            members: BTreeMap::new(),
        }
    }

    /// Name of the type declaring these members.
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// Members in name order.
    pub fn members(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.members.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// An object in a target graph.
///
/// ```
/// use xfield_core::{Record, Value};
///
/// let base = Record::new("Party").with("id", 7i64);
/// let person = Record::new("Person").with("name", "Ada").extends(base);
///
/// assert_eq!(person.member("id"), Some(&Value::I64(7)));
/// assert_eq!(person.declaring_type_of("id"), Some("Party"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Declaring types from concrete type to root. Never empty.
    hierarchy: Vec<DeclaredMembers>,
}

impl Record {
    /// Create a record whose concrete type is `type_name`, with no members.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            hierarchy: vec![DeclaredMembers::new(type_name)],
        }
    }

    /// Declare a member on the concrete type.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.hierarchy[0].members.insert(name.into(), value.into());
        self
    }

    /// Append `parent`'s declaring types after this record's own.
    ///
    /// The parent's concrete type becomes the direct supertype of the
    /// furthest ancestor currently in this record's chain.
    pub fn extends(mut self, parent: Record) -> Self {
        self.hierarchy.extend(parent.hierarchy);
        self
    }

    /// The concrete (runtime) type name.
    pub fn type_name(&self) -> &str {
        &self.hierarchy[0].declaring_type
    }

    /// Declaring types from concrete type to root.
    pub fn declaring_types(&self) -> impl Iterator<Item = &str> {
        self.hierarchy.iter().map(|d| d.declaring_type.as_str())
    }

    /// The full hierarchy, concrete type first.
    pub fn hierarchy(&self) -> &[DeclaredMembers] {
        &self.hierarchy
    }

    /// Look up a member, searching from the concrete type upward.
    pub fn member(&self, name: &str) -> Option<&Value> {
        self.hierarchy.iter().find_map(|d| d.members.get(name))
    }

    /// Mutable variant of [`Record::member`].
    pub fn member_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.hierarchy
            .iter_mut()
            .find_map(|d| d.members.get_mut(name))
    }

    /// The type whose declaration of `name` wins lookup, if any.
    pub fn declaring_type_of(&self, name: &str) -> Option<&str> {
        self.hierarchy
            .iter()
            .find(|d| d.members.contains_key(name))
            .map(|d| d.declaring_type.as_str())
    }

    /// Replace the value of an already-declared member, returning the old value.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MemberNotFound`] if no declaring type has `name`.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<Value, PathError> {
        let type_name = self.type_name().to_string();
        let slot = self
            .member_mut(name)
            .ok_or_else(|| PathError::MemberNotFound {
                segment: name.to_string(),
                type_name,
            })?;
        Ok(std::mem::replace(slot, value.into()))
    }
}
