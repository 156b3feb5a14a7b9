//! # Path Resolution
//!
//! Walks a [`PropertyPath`] over a target graph. Each step looks the member
//! up on the current record's declaring-type chain (concrete type first),
//! then, for indexed steps, reads the element positionally.
//!
//! Only arrays and ordered lists can be indexed. Sets and maps have no
//! deterministic position, so indexing them is rejected as a configuration
//! error rather than answered with an arbitrary element.
//!
//! Nothing is cached: every call walks the path again. Paths are short and
//! the walk borrows the graph immutably, so concurrent callers need no
//! coordination.

use crate::error::PathError;
use crate::path::{PropertyPath, Step};
use crate::value::Value;

/// Resolve `path` against `root` and return the value it denotes.
///
/// # Errors
///
/// - [`PathError::MemberNotFound`] if a segment names a member no declaring
///   type carries, or names a member on a non-record value.
/// - [`PathError::UnsupportedContainer`] if an indexed segment resolves to
///   something other than an array or ordered list.
/// - [`PathError::IndexOutOfRange`] if the index is past the end.
/// - [`PathError::NullTraversal`] if the walk reaches `null` before the end.
pub fn resolve<'a>(root: &'a Value, path: &PropertyPath) -> Result<&'a Value, PathError> {
    tracing::trace!(%path, "resolving property path");
    let (owner, last) = resolve_owner(root, path)?;
    step_into(owner, last)
}

/// Resolve every step but the last and return the owning value together
/// with the final step.
///
/// # Errors
///
/// Same as [`resolve`], for the steps walked.
pub fn resolve_owner<'a, 'p>(
    root: &'a Value,
    path: &'p PropertyPath,
) -> Result<(&'a Value, &'p Step), PathError> {
    let owner = path
        .owner_steps()
        .iter()
        .try_fold(root, |current, step| step_into(current, step))?;
    Ok((owner, path.last()))
}

/// Resolve `path` against a mutable graph.
///
/// # Errors
///
/// Same as [`resolve`].
pub fn resolve_mut<'a>(root: &'a mut Value, path: &PropertyPath) -> Result<&'a mut Value, PathError> {
    path.steps()
        .iter()
        .try_fold(root, |current, step| step_into_mut(current, step))
}

impl PropertyPath {
    /// Shorthand for [`resolve`].
    pub fn resolve<'a>(&self, root: &'a Value) -> Result<&'a Value, PathError> {
        resolve(root, self)
    }

    /// Shorthand for [`resolve_owner`].
    pub fn resolve_owner<'a>(&self, root: &'a Value) -> Result<(&'a Value, &Step), PathError> {
        resolve_owner(root, self)
    }
}

fn step_into<'a>(current: &'a Value, step: &Step) -> Result<&'a Value, PathError> {
    let member = lookup_member(current, step)?;
    match step.index() {
        None => Ok(member),
        Some(index) => index_into(member, step, index),
    }
}

fn lookup_member<'a>(current: &'a Value, step: &Step) -> Result<&'a Value, PathError> {
    match current {
        Value::Record(record) => record
            .member(step.name())
            .ok_or_else(|| PathError::MemberNotFound {
                segment: step.to_string(),
                type_name: record.type_name().to_string(),
            }),
        Value::Null => Err(PathError::NullTraversal {
            segment: step.to_string(),
        }),
        other => Err(PathError::MemberNotFound {
            segment: step.to_string(),
            type_name: other.type_name(),
        }),
    }
}

fn index_into<'a>(container: &'a Value, step: &Step, index: usize) -> Result<&'a Value, PathError> {
    match container {
        Value::Array(items) | Value::List(items) => {
            items.get(index).ok_or_else(|| PathError::IndexOutOfRange {
                segment: step.to_string(),
                index,
                len: items.len(),
            })
        }
        Value::Null => Err(PathError::NullTraversal {
            segment: step.to_string(),
        }),
        other => Err(PathError::UnsupportedContainer {
            segment: step.to_string(),
            type_name: other.type_name(),
        }),
    }
}

fn step_into_mut<'a>(current: &'a mut Value, step: &Step) -> Result<&'a mut Value, PathError> {
    let member = match current {
        Value::Record(record) => {
            let type_name = record.type_name().to_string();
            record
                .member_mut(step.name())
                .ok_or_else(|| PathError::MemberNotFound {
                    segment: step.to_string(),
                    type_name,
                })?
        }
        Value::Null => {
            return Err(PathError::NullTraversal {
                segment: step.to_string(),
            })
        }
        other => {
            return Err(PathError::MemberNotFound {
                segment: step.to_string(),
                type_name: other.type_name(),
            })
        }
    };

    let Some(index) = step.index() else {
        return Ok(member);
    };

    match member {
        Value::Array(items) | Value::List(items) => {
            let len = items.len();
            items.get_mut(index).ok_or_else(|| PathError::IndexOutOfRange {
                segment: step.to_string(),
                index,
                len,
            })
        }
        Value::Null => Err(PathError::NullTraversal {
            segment: step.to_string(),
        }),
        other => Err(PathError::UnsupportedContainer {
            segment: step.to_string(),
            type_name: other.type_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn path(raw: &str) -> PropertyPath {
        PropertyPath::parse(raw).unwrap()
    }

    fn graph() -> Value {
        let item = |v: i32| Value::from(Record::new("Item").with("value", v));
        let base = Record::new("Base").with("secret", "hidden");
        let child = Record::new("Child")
            .with("items", Value::list([item(10), item(20), item(30)]))
            .with("codes", Value::array(["a", "b"]))
            .with("tags", Value::set(["x"]))
            .with("lookup", Value::map([("k", 1i32)]))
            .with("missing", Value::Null)
            .extends(base);
        Value::from(Record::new("Root").with("child", child).with("flag", true))
    }

    #[test]
    fn test_resolve_plain_member() {
        let g = graph();
        assert_eq!(resolve(&g, &path("flag")).unwrap(), &Value::Bool(true));
    }

    #[test]
    fn test_resolve_dotted_through_supertype() {
        let g = graph();
        assert_eq!(
            resolve(&g, &path("child.secret")).unwrap(),
            &Value::String("hidden".into())
        );
    }

    #[test]
    fn test_resolve_list_index() {
        let g = graph();
        assert_eq!(resolve(&g, &path("child.items[1].value")).unwrap(), &Value::I32(20));
    }

    #[test]
    fn test_resolve_array_index_as_final_step() {
        let g = graph();
        assert_eq!(
            resolve(&g, &path("child.codes[1]")).unwrap(),
            &Value::String("b".into())
        );
    }

    #[test]
    fn test_resolve_returns_same_reference() {
        let g = graph();
        let child = g.as_record().unwrap().member("child").unwrap();
        let resolved = resolve(&g, &path("child")).unwrap();
        assert!(std::ptr::eq(child, resolved));
    }

    #[test]
    fn test_index_into_set_is_unsupported() {
        let g = graph();
        let err = resolve(&g, &path("child.tags[0]")).unwrap_err();
        assert_eq!(
            err,
            PathError::UnsupportedContainer {
                segment: "tags[0]".into(),
                type_name: "set".into()
            }
        );
    }

    #[test]
    fn test_index_into_map_is_unsupported() {
        let g = graph();
        assert!(matches!(
            resolve(&g, &path("child.lookup[0]")),
            Err(PathError::UnsupportedContainer { .. })
        ));
    }

    #[test]
    fn test_unknown_member() {
        let g = graph();
        assert_eq!(
            resolve(&g, &path("child.nope")).unwrap_err(),
            PathError::MemberNotFound {
                segment: "nope".into(),
                type_name: "Child".into()
            }
        );
    }

    #[test]
    fn test_member_on_scalar() {
        let g = graph();
        assert!(matches!(
            resolve(&g, &path("flag.inner")),
            Err(PathError::MemberNotFound { ref type_name, .. }) if type_name == "bool"
        ));
    }

    #[test]
    fn test_index_out_of_range_propagates() {
        let g = graph();
        assert_eq!(
            resolve(&g, &path("child.items[3].value")).unwrap_err(),
            PathError::IndexOutOfRange {
                segment: "items[3]".into(),
                index: 3,
                len: 3
            }
        );
    }

    #[test]
    fn test_null_traversal() {
        let g = graph();
        assert!(matches!(
            resolve(&g, &path("child.missing.deeper")),
            Err(PathError::NullTraversal { ref segment }) if segment == "deeper"
        ));
        // A null final value is an ordinary result.
        assert_eq!(resolve(&g, &path("child.missing")).unwrap(), &Value::Null);
    }

    #[test]
    fn test_resolve_owner() {
        let g = graph();
        let p = path("child.items[2].value");
        let (owner, last) = resolve_owner(&g, &p).unwrap();
        assert_eq!(owner.type_name(), "Item");
        assert_eq!(last, &Step::Member("value".into()));
    }

    #[test]
    fn test_resolve_mut_edits_in_place() {
        let mut g = graph();
        *resolve_mut(&mut g, &path("child.items[0].value")).unwrap() = Value::I32(99);
        assert_eq!(resolve(&g, &path("child.items[0].value")).unwrap(), &Value::I32(99));
        assert!(matches!(
            resolve_mut(&mut g, &path("child.tags[0]")),
            Err(PathError::UnsupportedContainer { .. })
        ));
    }

    #[test]
    fn test_path_methods_delegate() {
        let g = graph();
        let p = path("child.codes[0]");
        assert_eq!(p.resolve(&g).unwrap(), &Value::String("a".into()));
        assert_eq!(p.resolve_owner(&g).unwrap().0.type_name(), "Child");
    }
}
