//! Advisory strength score (0-100) and its five tiers.
//!
//! The score feeds password meters only; it never decides acceptance.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::collections::HashSet;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::sections::is_special_char;

const LENGTH_POINTS: usize = 25;
/// Length at which the length component saturates.
const LENGTH_SATURATION: usize = 16;
const CLASS_POINTS: u8 = 10;
const LONG_LENGTH: usize = 12;
const LONG_POINTS: u8 = 10;
const MAX_DISTINCT_POINTS: usize = 10;
const FULL_MIX_POINTS: u8 = 15;

/// Strength score, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StrengthScore(u8);

impl StrengthScore {
    pub const MAX: u8 = 100;

    /// Clamps `value` into `0..=100`.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, i64::from(Self::MAX)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn tier(self) -> StrengthTier {
        match self.0 {
            0..=20 => StrengthTier::VeryWeak,
            21..=40 => StrengthTier::Weak,
            41..=60 => StrengthTier::Medium,
            61..=80 => StrengthTier::Strong,
            _ => StrengthTier::VeryStrong,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthTier {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl StrengthTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryWeak => "very_weak",
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
            Self::VeryStrong => "very_strong",
        }
    }

    /// 1 (very weak) through 5 (very strong).
    pub fn level(self) -> u8 {
        self as u8 + 1
    }
}

/// Score and tier together, as sent to a meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrengthReport {
    pub score: StrengthScore,
    pub tier: StrengthTier,
}

impl StrengthReport {
    pub fn for_password(password: Option<&SecretString>) -> Self {
        let score = score(password);
        Self {
            score,
            tier: score.tier(),
        }
    }
}

/// Scores a password.
///
/// - length: up to 25 points, full at 16 characters
/// - uppercase, lowercase, digit, special: 10 points each
/// - 12 characters or more: 10 points
/// - distinct characters: 1 point each, up to 10
/// - all four classes at 16 characters or more: 15 points
///
/// Blank input scores 0. Appending characters never lowers the score.
pub fn score(password: Option<&SecretString>) -> StrengthScore {
    let Some(pwd) = password.map(|p| p.expose_secret()) else {
        return StrengthScore::new(0);
    };
    if pwd.trim().is_empty() {
        return StrengthScore::new(0);
    }
    let pwd_len = pwd.chars().count();

    let mut total: usize = LENGTH_POINTS.min((pwd_len * LENGTH_POINTS).div_ceil(LENGTH_SATURATION));

    let classes = [
        pwd.chars().any(|c| c.is_ascii_uppercase()),
        pwd.chars().any(|c| c.is_ascii_lowercase()),
        pwd.chars().any(|c| c.is_ascii_digit()),
        pwd.chars().any(is_special_char),
    ];
    let class_count = classes.iter().filter(|&&b| b).count();
    total += class_count * usize::from(CLASS_POINTS);

    if pwd_len >= LONG_LENGTH {
        total += usize::from(LONG_POINTS);
    }

    let unique_chars: HashSet<char> = pwd.chars().collect();
    total += unique_chars.len().min(MAX_DISTINCT_POINTS);

    if class_count == classes.len() && pwd_len >= LENGTH_SATURATION {
        total += usize::from(FULL_MIX_POINTS);
    }

    StrengthScore::new(i64::try_from(total).unwrap_or(i64::MAX))
}

/// Debounced meter update: waits, then sends the report unless cancelled.
///
/// Meant for interactive forms that re-score on every keystroke; cancel the
/// previous token when a newer keystroke arrives.
#[cfg(feature = "async")]
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub async fn score_password_tx(
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<StrengthReport>,
) {
    use std::time::Duration;

    #[cfg(feature = "tracing")]
    tracing::debug!("strength scoring is about to start...");

    tokio::select! {
        _ = token.cancelled() => {
            #[cfg(feature = "tracing")]
            tracing::debug!("strength scoring cancelled");
            return;
        }
        _ = tokio::time::sleep(Duration::from_millis(300)) => {}
    }

    let report = StrengthReport::for_password(Some(password));

    if let Err(e) = tx.send(report).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send strength report: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    fn score_of(s: &str) -> u8 {
        score(Some(&secret(s))).value()
    }

    #[test]
    fn test_score_empty_password() {
        assert_eq!(score_of(""), 0);
        assert_eq!(score(None).value(), 0);
        assert_eq!(score(None).tier(), StrengthTier::VeryWeak);
    }

    #[test]
    fn test_score_blank_password() {
        assert_eq!(score_of("   \t"), 0);
        assert_eq!(score_of("\n"), 0);
        assert!(score_of(" a ") > 0);
    }

    #[test]
    fn test_score_strong_password() {
        let strength = score(Some(&secret("MyS3cur3P@ssw0rd!")));
        assert!(strength.value() >= 80, "got {}", strength.value());
        assert_eq!(strength.tier(), StrengthTier::VeryStrong);
    }

    #[test]
    fn test_score_weak_password() {
        // 13 (length) + 10 (lowercase) + 7 (distinct)
        assert_eq!(score_of("password"), 30);
        assert_eq!(score(Some(&secret("password"))).tier(), StrengthTier::Weak);
        assert_eq!(score(Some(&secret("abc"))).tier(), StrengthTier::VeryWeak);
    }

    #[test]
    fn test_score_full_mix_at_sixteen_is_very_strong() {
        let strength = score(Some(&secret("Aa1!Aa1!Aa1!Aa1!")));
        assert_eq!(strength.tier(), StrengthTier::VeryStrong);
    }

    #[test]
    fn test_score_never_exceeds_cap() {
        assert_eq!(score_of("VeryStrongPassword123!@#WithManyMoreCharacters"), 100);
    }

    #[test]
    fn test_tier_boundaries() {
        let cases = [
            (0, StrengthTier::VeryWeak),
            (20, StrengthTier::VeryWeak),
            (21, StrengthTier::Weak),
            (40, StrengthTier::Weak),
            (41, StrengthTier::Medium),
            (60, StrengthTier::Medium),
            (61, StrengthTier::Strong),
            (80, StrengthTier::Strong),
            (81, StrengthTier::VeryStrong),
            (100, StrengthTier::VeryStrong),
        ];
        for (value, tier) in cases {
            assert_eq!(StrengthScore::new(value).tier(), tier, "score {value}");
        }
    }

    #[test]
    fn test_score_new_clamps() {
        assert_eq!(StrengthScore::new(-10).value(), 0);
        assert_eq!(StrengthScore::new(250).value(), 100);
    }

    #[test]
    fn test_tier_metadata() {
        assert_eq!(StrengthTier::VeryWeak.level(), 1);
        assert_eq!(StrengthTier::VeryStrong.level(), 5);
        assert_eq!(StrengthTier::Medium.label(), "medium");
    }

    proptest! {
        #[test]
        fn appending_never_lowers_score(base in ".{0,30}", extra in ".{1,10}") {
            let longer = format!("{base}{extra}");
            prop_assert!(score_of(&longer) >= score_of(&base));
        }

        #[test]
        fn full_mix_long_passwords_are_very_strong(
            body in "[a-z]{13,40}",
        ) {
            let password = format!("A1!{body}");
            prop_assert_eq!(score(Some(&secret(&password))).tier(), StrengthTier::VeryStrong);
        }
    }
}
