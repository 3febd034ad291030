//! Password acceptability policy library
//!
//! This library decides whether a candidate password satisfies a configurable
//! policy (length, character classes, common-password blacklist, sequential,
//! keyboard and repetitive pattern avoidance) and reports every violated rule.
//! A separate advisory strength score is available for password meters.
//!
//! # Features
//!
//! - `async` (default): Enables the debounced strength-meter helper
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_BLACKLIST_PATH`: Optional file of extra common passwords, read by
//!   [`PatternCatalog::from_env`]
//!
//! # Example
//!
//! ```rust
//! use pwd_policy::{evaluate, normalize, score, PatternCatalog, StrengthTier};
//! use secrecy::SecretString;
//! use serde_json::json;
//!
//! let raw = json!({
//!     "enabled": "1",
//!     "min_length": "10",
//!     "require_uppercase": true,
//!     "prevent_common_passwords": 1,
//! });
//! let policy = normalize(raw.as_object().expect("object literal"));
//!
//! let password = SecretString::new("MyS3cur3P@ssw0rd!".to_string().into());
//! let result = evaluate(Some(&password), &policy, PatternCatalog::builtin());
//! assert!(result.is_accepted());
//!
//! let strength = score(Some(&password));
//! assert_eq!(strength.tier(), StrengthTier::VeryStrong);
//! ```

// Internal modules
mod catalog;
mod evaluator;
mod feedback;
mod policy;
mod sections;
mod strength;
mod violation;

// Public API
pub use catalog::{CatalogError, PatternCatalog, BLACKLIST_PATH_ENV};
pub use evaluator::{evaluate, validate};
pub use feedback::{example_passwords, suggestions};
pub use policy::{
    check_config, normalize, ConfigIssue, PolicyConfig, RawConfig, DEFAULT_MIN_LENGTH,
    MAX_LENGTH,
};
pub use strength::{score, StrengthReport, StrengthScore, StrengthTier};
pub use violation::{ValidationResult, ViolationKind};

#[cfg(feature = "async")]
pub use strength::score_password_tx;
