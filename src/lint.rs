//! Non-fatal findings collected during a generation pass.
//!
//! Warnings never stop generation. They are gathered while the pipes run and
//! handed back to the caller once the whole pass has succeeded.

use std::fmt;

/// A warning about the generated output
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of warning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    /// A template placeholder had no value and was left literal
    UnresolvedPlaceholder,
    /// A callback entry for a widget that no longer exists was removed
    StaleEntry,
    /// A repeated callback entry was removed
    DuplicateEntry,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::UnresolvedPlaceholder => write!(f, "unresolved-placeholder"),
            LintCategory::StaleEntry => write!(f, "stale-entry"),
            LintCategory::DuplicateEntry => write!(f, "duplicate-entry"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}
