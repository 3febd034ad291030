//! Policy rule sections
//!
//! Each section checks one rule and is a no-op when the policy leaves that
//! rule off.

mod blacklist;
mod length;
mod pattern;
mod variety;

pub use blacklist::common_password_section;
pub use length::min_length_section;
pub use pattern::{keyboard_section, repetitive_section, sequential_section};
pub use variety::{digit_section, lowercase_section, special_char_section, uppercase_section};

pub(crate) use variety::is_special_char;

use crate::catalog::{fold, PatternCatalog};
use crate::policy::PolicyConfig;
use crate::violation::ViolationKind;
use thiserror::Error;

/// Everything a section may look at. Built once per evaluation.
pub struct RuleContext<'a> {
    /// Trimmed password.
    pub password: &'a str,
    /// Lowercased copy of `password`.
    pub folded: String,
    pub char_count: usize,
    pub policy: &'a PolicyConfig,
    pub catalog: &'a PatternCatalog,
}

impl<'a> RuleContext<'a> {
    pub fn new(password: &'a str, policy: &'a PolicyConfig, catalog: &'a PatternCatalog) -> Self {
        Self {
            password,
            folded: fold(password),
            char_count: password.chars().count(),
            policy,
            catalog,
        }
    }
}

/// Internal fault that aborts an evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleFault {
    #[error("policy max_length {0} exceeds the hard limit")]
    MaxLengthAboveLimit(usize),
    #[error("policy min_length {min} exceeds max_length {max}")]
    MinAboveMax { min: usize, max: usize },
}

/// Result type for section evaluation functions.
/// - `Ok(Some(kind))` - Section failed with a violation
/// - `Ok(None)` - Section passed or is disabled
/// - `Err(fault)` - Fatal error during evaluation
pub type SectionResult = Result<Option<ViolationKind>, RuleFault>;

/// Signature shared by all sections.
pub type Section = fn(&RuleContext<'_>) -> SectionResult;

/// Maps a failed check to its violation.
fn fail_if(failed: bool, kind: ViolationKind) -> SectionResult {
    Ok(failed.then_some(kind))
}
