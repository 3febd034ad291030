//! Length section - checks the policy minimum length.

use super::{fail_if, RuleContext, RuleFault, SectionResult};
use crate::policy::MAX_LENGTH;
use crate::violation::ViolationKind;

/// Checks the password against `min_length`.
///
/// A policy whose bounds contradict each other cannot come out of
/// `normalize`, so it is reported as a fault rather than a violation.
///
/// # Returns
/// - `Ok(Some(TooShort))` if password is too short
/// - `Ok(None)` if password has sufficient length
/// - `Err(_)` if the policy bounds are inconsistent
pub fn min_length_section(ctx: &RuleContext<'_>) -> SectionResult {
    let policy = ctx.policy;
    if policy.max_length > MAX_LENGTH {
        return Err(RuleFault::MaxLengthAboveLimit(policy.max_length));
    }
    if policy.min_length > policy.max_length {
        return Err(RuleFault::MinAboveMax {
            min: policy.min_length,
            max: policy.max_length,
        });
    }

    fail_if(
        policy.min_length > 0 && ctx.char_count < policy.min_length,
        ViolationKind::TooShort,
    )
}
