//! # xfield-core — Object Graphs and Property Paths
//!
//! The leaf crate of the xfield workspace. It defines how target objects are
//! represented to the rule engine and how a declared property path is walked
//! over them. Every other xfield crate depends on `xfield-core`; it depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Declared types survive.** [`Value`] keeps every scalar at its
//!    declared width and kind. An `i32` member is never silently an `i64`.
//!
//! 2. **Explicit hierarchies.** A [`Record`] carries its declaring types
//!    from concrete type to root, so member lookup is a scan over data, not
//!    a walk over a live type system.
//!
//! 3. **Parse once, walk many.** [`PropertyPath`] is parsed when a rule is
//!    declared; resolution only follows its [`Step`]s.
//!
//! 4. **Positional indexing only where position exists.** Arrays and ordered
//!    lists can be indexed; sets and maps cannot.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `xfield-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Resolution is stateless and borrows the graph immutably.

pub mod error;
pub mod inspect;
pub mod json;
pub mod path;
pub mod record;
pub mod resolve;
pub mod temporal;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::PathError;
pub use inspect::Inspect;
pub use json::JSON_OBJECT_TYPE;
pub use path::{PropertyPath, Step};
pub use record::{DeclaredMembers, Record};
pub use resolve::{resolve, resolve_mut, resolve_owner};
pub use temporal::ZonedDateTime;
pub use value::{EnumValue, Value, ValueKind};

// Arbitrary-precision types used by `Value`, re-exported so callers need not
// pin a matching `bigdecimal` version themselves.
pub use bigdecimal::num_bigint::BigInt;
pub use bigdecimal::BigDecimal;
