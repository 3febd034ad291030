//! Violation kinds and the ordered result of a policy evaluation.

use serde::Serialize;
use std::fmt;

/// A single named reason a password failed one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    TooShort,
    TooLong,
    MissingUppercase,
    MissingLowercase,
    MissingDigit,
    MissingSpecialChar,
    SequentialChars,
    KeyboardPatterns,
    RepetitiveChars,
    CommonPassword,
    /// Internal fault during evaluation. Hosts should reject and log.
    ValidationError,
}

impl ViolationKind {
    /// Stable snake-case identifier, suitable as a message lookup key.
    pub fn code(self) -> &'static str {
        match self {
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::MissingUppercase => "missing_uppercase",
            Self::MissingLowercase => "missing_lowercase",
            Self::MissingDigit => "missing_digit",
            Self::MissingSpecialChar => "missing_special_char",
            Self::SequentialChars => "sequential_chars",
            Self::KeyboardPatterns => "keyboard_patterns",
            Self::RepetitiveChars => "repetitive_chars",
            Self::CommonPassword => "common_password",
            Self::ValidationError => "validation_error",
        }
    }

    /// Short English explanation of the violation.
    pub fn message(self) -> &'static str {
        match self {
            Self::TooShort => "Password is too short",
            Self::TooLong => "Password is too long",
            Self::MissingUppercase => "Password must contain an uppercase letter",
            Self::MissingLowercase => "Password must contain a lowercase letter",
            Self::MissingDigit => "Password must contain a number",
            Self::MissingSpecialChar => "Password must contain a special character",
            Self::SequentialChars => "Password contains sequential characters",
            Self::KeyboardPatterns => "Password contains keyboard patterns",
            Self::RepetitiveChars => "Password contains repetitive characters",
            Self::CommonPassword => "Password is too common",
            Self::ValidationError => "Password could not be validated",
        }
    }

    /// Actionable advice for fixing the violation.
    pub fn suggestion(self) -> &'static str {
        match self {
            Self::TooShort => "Use a longer password",
            Self::TooLong => "Use a password of at most 1000 characters",
            Self::MissingUppercase => "Add at least one uppercase letter (A-Z)",
            Self::MissingLowercase => "Add at least one lowercase letter (a-z)",
            Self::MissingDigit => "Add at least one number (0-9)",
            Self::MissingSpecialChar => "Add at least one special character (such as !@#$%^&*)",
            Self::SequentialChars => "Avoid runs like 123456 or abcdef",
            Self::KeyboardPatterns => {
                "Avoid keyboard walks such as 1qaz, wsx, 147 or qwe; they are easy to guess"
            }
            Self::RepetitiveChars => "Avoid repeating a character, as in aaa or 111",
            Self::CommonPassword => "Pick a more unique password",
            Self::ValidationError => {
                "Use a password mixing upper and lower case letters, numbers and symbols"
            }
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Ordered, de-duplicated list of violations. Empty means accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    violations: Vec<ViolationKind>,
}

impl ValidationResult {
    /// An empty (accepting) result.
    pub fn accepted() -> Self {
        Self::default()
    }

    pub(crate) fn single(kind: ViolationKind) -> Self {
        Self {
            violations: vec![kind],
        }
    }

    /// Appends `kind` unless it is already present.
    pub(crate) fn push(&mut self, kind: ViolationKind) {
        if !self.violations.contains(&kind) {
            self.violations.push(kind);
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn contains(&self, kind: ViolationKind) -> bool {
        self.violations.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[ViolationKind] {
        &self.violations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ViolationKind> {
        self.violations.iter()
    }
}

impl<'a> IntoIterator for &'a ValidationResult {
    type Item = &'a ViolationKind;
    type IntoIter = std::slice::Iter<'a, ViolationKind>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}
