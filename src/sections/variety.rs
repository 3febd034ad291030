//! Character variety sections - uppercase, lowercase, digits, special chars.
//!
//! Classes are ASCII-only: `Ä` is not an uppercase letter here and `€` is not
//! a special character.

use super::{fail_if, RuleContext, SectionResult};
use crate::violation::ViolationKind;

const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// True for the fixed set of accepted special characters.
pub(crate) fn is_special_char(c: char) -> bool {
    SPECIAL_CHARS.contains(c)
}

/// Requires at least one ASCII uppercase letter when `require_uppercase` is on.
pub fn uppercase_section(ctx: &RuleContext<'_>) -> SectionResult {
    fail_if(
        ctx.policy.require_uppercase && !ctx.password.chars().any(|c| c.is_ascii_uppercase()),
        ViolationKind::MissingUppercase,
    )
}

/// Requires at least one ASCII lowercase letter when `require_lowercase` is on.
pub fn lowercase_section(ctx: &RuleContext<'_>) -> SectionResult {
    fail_if(
        ctx.policy.require_lowercase && !ctx.password.chars().any(|c| c.is_ascii_lowercase()),
        ViolationKind::MissingLowercase,
    )
}

/// Requires at least one ASCII digit when `require_numbers` is on.
pub fn digit_section(ctx: &RuleContext<'_>) -> SectionResult {
    fail_if(
        ctx.policy.require_numbers && !ctx.password.chars().any(|c| c.is_ascii_digit()),
        ViolationKind::MissingDigit,
    )
}

/// Requires one character from the fixed special set when `require_special_chars` is on.
pub fn special_char_section(ctx: &RuleContext<'_>) -> SectionResult {
    fail_if(
        ctx.policy.require_special_chars && !ctx.password.chars().any(is_special_char),
        ViolationKind::MissingSpecialChar,
    )
}
