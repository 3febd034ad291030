//! Blacklist section - checks if password is a common password.

use super::{fail_if, RuleContext, SectionResult};
use crate::violation::ViolationKind;

/// Checks if the password is one of the catalog's common passwords.
///
/// Matching is exact after case folding; a common password embedded in a
/// longer one is accepted.
pub fn common_password_section(ctx: &RuleContext<'_>) -> SectionResult {
    fail_if(
        ctx.policy.prevent_common_passwords && ctx.catalog.is_common(&ctx.folded),
        ViolationKind::CommonPassword,
    )
}
