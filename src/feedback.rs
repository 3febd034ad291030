//! User-facing feedback built on top of violations and the strength score.

use secrecy::SecretString;

use crate::strength::score;
use crate::violation::{ValidationResult, ViolationKind};

/// Score under which a generic complexity hint is added.
const WEAK_SCORE: u8 = 40;

const COMPLEXITY_HINT: &str = "Consider a more complex combination of characters";

const EXAMPLE_PASSWORDS: [&str; 5] = [
    "MyS3cur3P@ssw0rd!",
    "N3wS3cur3P@ssw0rd!",
    "C0mpl3xP@ssw0rd!",
    "S3cur3P@ssw0rd2024!",
    "V3ryS3cur3P@ssw0rd!",
];

/// Suggestions for improving `password`, one per violation, in order.
///
/// A generic complexity hint is appended when the password scores below 40,
/// even if it passed every rule.
pub fn suggestions(
    password: Option<&SecretString>,
    violations: &ValidationResult,
) -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for kind in violations.iter().copied().map(ViolationKind::suggestion) {
        if !out.contains(&kind) {
            out.push(kind);
        }
    }

    if score(password).value() < WEAK_SCORE && !out.contains(&COMPLEXITY_HINT) {
        out.push(COMPLEXITY_HINT);
    }
    out
}

/// Sample passwords that pass the default policy, for help texts.
pub fn example_passwords() -> &'static [&'static str] {
    &EXAMPLE_PASSWORDS
}
