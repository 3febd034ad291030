//! Policy configuration: normalization of loose host settings into a typed policy.
//!
//! Hosts usually keep password settings as a flat key/value store where
//! booleans may arrive as `true`, `1`, `"1"` or `"true"` and integers as
//! strings. [`normalize`] turns any such map into a [`PolicyConfig`] without
//! ever failing; [`check_config`] reports what had to be repaired.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Raw, possibly stringly-typed settings as stored by the host.
pub type RawConfig = serde_json::Map<String, Value>;

/// Fixed upper bound on password length, in characters.
pub const MAX_LENGTH: usize = 1000;

/// Minimum length used when the configured value is missing or out of range.
pub const DEFAULT_MIN_LENGTH: usize = 8;

const MIN_LENGTH_RANGE: std::ops::RangeInclusive<usize> = 1..=50;

const KEY_ENABLED: &str = "enabled";
const KEY_MIN_LENGTH: &str = "min_length";

/// Boolean settings other than `enabled`, in canonical order.
const RULE_KEYS: [&str; 8] = [
    "require_uppercase",
    "require_lowercase",
    "require_numbers",
    "require_special_chars",
    "prevent_common_passwords",
    "prevent_sequential_chars",
    "prevent_keyboard_patterns",
    "prevent_repetitive_chars",
];

/// A normalized password policy.
///
/// Values produced by [`normalize`] always satisfy
/// `min_length` in `1..=50` and `max_length == MAX_LENGTH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PolicyConfig {
    pub enabled: bool,
    pub min_length: usize,
    #[serde(skip)]
    pub max_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_numbers: bool,
    pub require_special_chars: bool,
    pub prevent_common_passwords: bool,
    pub prevent_sequential_chars: bool,
    pub prevent_keyboard_patterns: bool,
    pub prevent_repetitive_chars: bool,
}

impl Default for PolicyConfig {
    /// Every rule on, minimum length 8.
    fn default() -> Self {
        Self {
            enabled: true,
            min_length: DEFAULT_MIN_LENGTH,
            max_length: MAX_LENGTH,
            require_uppercase: true,
            require_lowercase: true,
            require_numbers: true,
            require_special_chars: true,
            prevent_common_passwords: true,
            prevent_sequential_chars: true,
            prevent_keyboard_patterns: true,
            prevent_repetitive_chars: true,
        }
    }
}

impl PolicyConfig {
    /// Enabled policy with only the length bounds active (`min_length` 1).
    ///
    /// Handy as a base when a host wants to switch individual rules on.
    pub fn minimal() -> Self {
        Self {
            enabled: true,
            min_length: 1,
            max_length: MAX_LENGTH,
            require_uppercase: false,
            require_lowercase: false,
            require_numbers: false,
            require_special_chars: false,
            prevent_common_passwords: false,
            prevent_sequential_chars: false,
            prevent_keyboard_patterns: false,
            prevent_repetitive_chars: false,
        }
    }

    /// Renders the policy in canonical raw form (real booleans, integer length).
    pub fn to_raw(&self) -> RawConfig {
        let mut raw = RawConfig::new();
        raw.insert(KEY_ENABLED.to_string(), Value::Bool(self.enabled));
        raw.insert(KEY_MIN_LENGTH.to_string(), Value::from(self.min_length));
        for (key, flag) in RULE_KEYS.iter().zip(self.rule_flags()) {
            raw.insert((*key).to_string(), Value::Bool(flag));
        }
        raw
    }

    fn rule_flags(&self) -> [bool; 8] {
        [
            self.require_uppercase,
            self.require_lowercase,
            self.require_numbers,
            self.require_special_chars,
            self.prevent_common_passwords,
            self.prevent_sequential_chars,
            self.prevent_keyboard_patterns,
            self.prevent_repetitive_chars,
        ]
    }
}

/// Normalizes raw host settings into a [`PolicyConfig`].
///
/// Never fails. Booleans follow the coercion table `true | 1 | "1" | "true"`
/// → `true`, anything else → `false`. A `min_length` outside `1..=50` (or
/// unreadable) is reset to [`DEFAULT_MIN_LENGTH`].
pub fn normalize(raw: &RawConfig) -> PolicyConfig {
    let flag = |key: &str| raw.get(key).is_some_and(coerce_bool);

    let min_length = raw
        .get(KEY_MIN_LENGTH)
        .map(coerce_int)
        .and_then(|n| usize::try_from(n).ok())
        .filter(|n| MIN_LENGTH_RANGE.contains(n))
        .unwrap_or(DEFAULT_MIN_LENGTH);

    PolicyConfig {
        enabled: flag(KEY_ENABLED),
        min_length,
        max_length: MAX_LENGTH,
        require_uppercase: flag(RULE_KEYS[0]),
        require_lowercase: flag(RULE_KEYS[1]),
        require_numbers: flag(RULE_KEYS[2]),
        require_special_chars: flag(RULE_KEYS[3]),
        prevent_common_passwords: flag(RULE_KEYS[4]),
        prevent_sequential_chars: flag(RULE_KEYS[5]),
        prevent_keyboard_patterns: flag(RULE_KEYS[6]),
        prevent_repetitive_chars: flag(RULE_KEYS[7]),
    }
}

/// A raw setting that [`normalize`] had to repair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("{key} must be a boolean (true, false, 1, 0)")]
    NotBoolean { key: &'static str },
    #[error("min_length must be between 1 and 50, got {value}")]
    MinLengthOutOfRange { value: i64 },
}

/// Reports every setting that is not already in an accepted form.
///
/// Unlike [`normalize`] this is strict: a missing boolean is reported too.
/// Intended for settings screens and host-side warning logs.
pub fn check_config(raw: &RawConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    for key in std::iter::once(KEY_ENABLED).chain(RULE_KEYS) {
        if !raw.get(key).is_some_and(is_boolean_like) {
            issues.push(ConfigIssue::NotBoolean { key });
        }
    }

    let min_length = raw.get(KEY_MIN_LENGTH).map_or(0, coerce_int);
    let in_range = usize::try_from(min_length).is_ok_and(|n| MIN_LENGTH_RANGE.contains(&n));
    if !in_range {
        issues.push(ConfigIssue::MinLengthOutOfRange { value: min_length });
    }

    issues
}

fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1),
        Value::String(s) => s == "1" || s == "true",
        _ => false,
    }
}

fn is_boolean_like(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::Number(n) => matches!(n.as_i64(), Some(0 | 1)),
        Value::String(s) => matches!(s.as_str(), "1" | "0"),
        _ => false,
    }
}

/// Reads an integer the way form input usually arrives: numbers are
/// truncated, strings contribute their leading decimal digits.
fn coerce_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => leading_int(s.trim_start()),
        _ => 0,
    }
}

fn leading_int(s: &str) -> i64 {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let mut value: i64 = 0;
    for d in digits.chars().map_while(|c| c.to_digit(10)) {
        value = value.saturating_mul(10).saturating_add(i64::from(d));
    }

    if negative { -value } else { value }
}
