//! # xfield-cli — Command-Line Front End
//!
//! Provides the `xfield` binary.
//!
//! ## Subcommands
//!
//! - `xfield check` — evaluate a rule document against a JSON or YAML
//!   instance.
//! - `xfield lint` — compile a rule document and report mis-declared rules.
//!
//! ```bash
//! xfield check --rules rules.yaml --target booking.json
//! xfield check --rules rules.yaml --target booking.yaml --format json
//! xfield lint --rules rules.yaml
//! ```
//!
//! ## Exit Codes
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | every rule passed (or the document compiled)        |
//! | 1    | at least one rule is violated by the target         |
//! | 2    | a rule is mis-declared, or a file cannot be loaded  |

pub mod check;
pub mod lint;

use std::path::Path;

use anyhow::{Context, Result};
use xfield_rules::{RuleDocument, RuleSet};

/// All rules passed.
pub const EXIT_PASS: u8 = 0;
/// At least one violation.
pub const EXIT_VIOLATION: u8 = 1;
/// Configuration or I/O error.
pub const EXIT_CONFIG_ERROR: u8 = 2;

/// Load and compile a rule document.
pub fn load_rules(path: &Path) -> Result<RuleSet> {
    let document = RuleDocument::from_path(path)?;
    let rules = document
        .compile()
        .with_context(|| format!("rule document {}", path.display()))?;
    tracing::info!(path = %path.display(), rules = rules.len(), "loaded rule document");
    Ok(rules)
}
