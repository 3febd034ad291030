//! Policy evaluator - runs the rule sections against a password.

use secrecy::{ExposeSecret, SecretString};

use crate::catalog::PatternCatalog;
use crate::policy::{normalize, PolicyConfig, RawConfig};
use crate::sections::{
    common_password_section, digit_section, keyboard_section, lowercase_section,
    min_length_section, repetitive_section, sequential_section, special_char_section,
    uppercase_section, RuleContext, Section,
};
use crate::violation::{ValidationResult, ViolationKind};

/// Sections in evaluation order. Violations are reported in this order.
const SECTIONS: [(&str, Section); 9] = [
    ("length", min_length_section),
    ("uppercase", uppercase_section),
    ("lowercase", lowercase_section),
    ("digit", digit_section),
    ("special", special_char_section),
    ("sequential", sequential_section),
    ("keyboard", keyboard_section),
    ("repetitive", repetitive_section),
    ("common", common_password_section),
];

/// Evaluates a password against a normalized policy.
///
/// Never fails. An absent or blank password and a disabled policy yield an
/// empty result; a password longer than `max_length` yields exactly
/// `TooLong`; otherwise every enabled rule runs against the trimmed password
/// and all violations are collected. A policy with inconsistent bounds yields
/// exactly `ValidationError`.
///
/// # Arguments
/// * `password` - The candidate password, if one is being set
/// * `policy` - Normalized policy
/// * `catalog` - Pattern catalog, usually [`PatternCatalog::builtin`]
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub fn evaluate(
    password: Option<&SecretString>,
    policy: &PolicyConfig,
    catalog: &PatternCatalog,
) -> ValidationResult {
    let Some(password) = password.map(|p| p.expose_secret()) else {
        return ValidationResult::accepted();
    };
    if password.trim().is_empty() {
        return ValidationResult::accepted();
    }

    if !policy.enabled {
        #[cfg(feature = "tracing")]
        tracing::debug!("Password policy is disabled, skipping validation");
        return ValidationResult::accepted();
    }

    let pwd_len = password.chars().count();
    if pwd_len > policy.max_length {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            "Password too long ({} chars, limit {})",
            pwd_len,
            policy.max_length
        );
        return ValidationResult::single(ViolationKind::TooLong);
    }

    let ctx = RuleContext::new(password.trim(), policy, catalog);
    let mut result = ValidationResult::accepted();

    // Orchestrator: every section runs, no short-circuit on violations
    for (section_name, section_fn) in SECTIONS {
        match section_fn(&ctx) {
            Ok(Some(kind)) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("Password violates rule {}: {}", section_name, kind.code());
                result.push(kind);
            }
            Ok(None) => {}
            Err(fault) => {
                #[cfg(feature = "tracing")]
                tracing::error!(
                    "Fatal error in password policy section {}: {}",
                    section_name,
                    fault
                );
                return ValidationResult::single(ViolationKind::ValidationError);
            }
        }
    }

    result
}

/// Normalizes `raw` and evaluates `password` against it.
///
/// An absent configuration skips validation entirely, which is distinct from
/// a configuration with `enabled` off.
pub fn validate(
    password: Option<&SecretString>,
    raw: Option<&RawConfig>,
    catalog: &PatternCatalog,
) -> ValidationResult {
    match raw {
        Some(raw) => evaluate(password, &normalize(raw), catalog),
        None => {
            #[cfg(feature = "tracing")]
            tracing::debug!("No password policy configured, skipping validation");
            ValidationResult::accepted()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::MAX_LENGTH;
    use proptest::prelude::*;
    use serde_json::json;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    fn check(password: &str, policy: &PolicyConfig) -> ValidationResult {
        evaluate(Some(&secret(password)), policy, PatternCatalog::builtin())
    }

    /// Enabled policy with a single rule switched on.
    fn only(enable: impl FnOnce(&mut PolicyConfig)) -> PolicyConfig {
        let mut policy = PolicyConfig::minimal();
        enable(&mut policy);
        policy
    }

    #[test]
    fn test_evaluate_common_password() {
        let result = check("password", &PolicyConfig::default());

        for kind in [
            ViolationKind::CommonPassword,
            ViolationKind::MissingUppercase,
            ViolationKind::MissingDigit,
            ViolationKind::MissingSpecialChar,
        ] {
            assert!(result.contains(kind), "missing {kind:?} in {result:?}");
        }
        assert!(!result.contains(ViolationKind::TooShort));
    }

    #[test]
    fn test_evaluate_strong_password() {
        assert!(check("MyS3cur3P@ssw0rd!", &PolicyConfig::default()).is_accepted());
    }

    #[test]
    fn test_evaluate_empty_password() {
        assert!(check("", &PolicyConfig::default()).is_accepted());
        assert!(check("   \t", &PolicyConfig::default()).is_accepted());
        assert!(evaluate(None, &PolicyConfig::default(), PatternCatalog::builtin()).is_accepted());
    }

    #[test]
    fn test_evaluate_keyboard_only() {
        let policy = only(|p| p.prevent_keyboard_patterns = true);
        let result = check("mypassword1qaz2wsx", &policy);
        assert_eq!(result.violations(), &[ViolationKind::KeyboardPatterns]);
    }

    #[test]
    fn test_evaluate_repetitive_only() {
        let policy = only(|p| p.prevent_repetitive_chars = true);
        let result = check("aaa11111", &policy);
        assert_eq!(result.violations(), &[ViolationKind::RepetitiveChars]);
    }

    #[test]
    fn test_evaluate_collects_all_violations_in_order() {
        let result = check("aaa", &PolicyConfig::default());
        assert_eq!(
            result.violations(),
            &[
                ViolationKind::TooShort,
                ViolationKind::MissingUppercase,
                ViolationKind::MissingDigit,
                ViolationKind::MissingSpecialChar,
                ViolationKind::RepetitiveChars,
            ]
        );
    }

    #[test]
    fn test_evaluate_trims_before_rules() {
        let policy = only(|p| p.min_length = 8);
        assert_eq!(
            check("  abcdefg  ", &policy).violations(),
            &[ViolationKind::TooShort]
        );

        let policy = only(|p| p.prevent_common_passwords = true);
        assert_eq!(
            check(" Admin\n", &policy).violations(),
            &[ViolationKind::CommonPassword]
        );
    }

    #[test]
    fn test_evaluate_too_long_short_circuits() {
        let password = "a".repeat(MAX_LENGTH + 1);
        let result = check(&password, &PolicyConfig::default());
        assert_eq!(result.violations(), &[ViolationKind::TooLong]);

        let password = "aB3!".repeat(MAX_LENGTH / 4);
        assert!(!check(&password, &PolicyConfig::default()).contains(ViolationKind::TooLong));
    }

    #[test]
    fn test_evaluate_length_gate_counts_padding() {
        let exact = "aB3!".repeat(MAX_LENGTH / 4);
        assert!(!check(&exact, &PolicyConfig::default()).contains(ViolationKind::TooLong));

        let padded = format!("{exact}  ");
        let result = check(&padded, &PolicyConfig::default());
        assert_eq!(result.violations(), &[ViolationKind::TooLong]);
    }

    #[test]
    fn test_evaluate_disabled_policy() {
        let policy = PolicyConfig {
            enabled: false,
            ..PolicyConfig::default()
        };
        assert!(check("password", &policy).is_accepted());
        assert!(check(&"a".repeat(5_000), &policy).is_accepted());
    }

    #[test]
    fn test_evaluate_inconsistent_policy_is_validation_error() {
        let policy = PolicyConfig {
            min_length: 2_000,
            max_length: 1_000,
            ..PolicyConfig::default()
        };
        let result = check("password", &policy);
        assert_eq!(result.violations(), &[ViolationKind::ValidationError]);
    }

    #[test]
    fn test_validate_absent_config_skips() {
        let pwd = secret("password");
        assert!(validate(Some(&pwd), None, PatternCatalog::builtin()).is_accepted());
    }

    #[test]
    fn test_validate_normalizes_raw_config() {
        let raw = json!({
            "enabled": "1",
            "min_length": "100",
            "require_numbers": "true",
            "prevent_common_passwords": 1,
        });
        let pwd = secret("letmein");
        let result = validate(
            Some(&pwd),
            raw.as_object(),
            PatternCatalog::builtin(),
        );
        assert_eq!(
            result.violations(),
            &[
                ViolationKind::TooShort,
                ViolationKind::MissingDigit,
                ViolationKind::CommonPassword,
            ]
        );
    }

    #[test]
    fn test_validate_disabled_config() {
        let raw = json!({"enabled": "0", "min_length": 8, "require_numbers": true});
        let pwd = secret("x");
        assert!(validate(Some(&pwd), raw.as_object(), PatternCatalog::builtin()).is_accepted());
    }

    proptest! {
        #[test]
        fn disabled_policy_accepts_everything(password in ".{0,64}") {
            let policy = PolicyConfig { enabled: false, ..PolicyConfig::default() };
            prop_assert!(check(&password, &policy).is_accepted());
        }

        #[test]
        fn oversized_password_is_only_too_long(password in "[a-zA-Z0-9!@#]{1001,1100}") {
            let result = check(&password, &PolicyConfig::default());
            prop_assert_eq!(result.violations(), &[ViolationKind::TooLong]);
        }

        #[test]
        fn uppercase_rule_is_isolated(password in "[a-z0-9!@# ]{0,5}[a-z][a-z0-9!@#]{0,30}") {
            let policy = only(|p| p.require_uppercase = true);
            let result = check(&password, &policy);
            prop_assert_eq!(result.violations(), &[ViolationKind::MissingUppercase]);
        }

        #[test]
        fn evaluation_is_deterministic(password in ".{0,40}") {
            let policy = PolicyConfig::default();
            prop_assert_eq!(check(&password, &policy), check(&password, &policy));
        }

        #[test]
        fn violations_are_unique(password in "[a-zA-Z0-9!@#$ ]{0,40}") {
            let result = check(&password, &PolicyConfig::default());
            let mut seen = std::collections::HashSet::new();
            prop_assert!(result.iter().all(|kind| seen.insert(*kind)));
        }
    }
}
