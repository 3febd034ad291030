//! Pattern catalog
//!
//! Holds the disallowed literal patterns: sequential runs, keyboard walks and
//! common passwords. The built-in catalog is built once per process and is
//! shared read-only; hosts can build their own (extended lists, fixtures) and
//! pass it by reference to the evaluator.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

const SEQUENTIAL_PATTERNS: &[&str] = &[
    "1234567890",
    "0987654321",
    "abcdefghijklmnopqrstuvwxyz",
    "zyxwvutsrqponmlkjihgfedcba",
    "qwertyuiop",
    "asdfghjkl",
    "zxcvbnm",
    "1qaz2wsx3edc4rfv5tgb6yhn7ujm8ik9ol0p",
];

#[rustfmt::skip]
const KEYBOARD_PATTERNS: &[&str] = &[
    // column walks
    "1qaz", "2wsx", "3edc", "4rfv", "5tgb", "6yhn", "7ujm",
    "zaq1", "xsw2", "cde3", "vfr4", "bgt5", "nhy6", "mju7",
    "1qaz2wsx", "2wsx3edc", "3edc4rfv", "4rfv5tgb", "5tgb6yhn", "6yhn7ujm", "7ujm8ik9", "8ik9ol0p",
    "qaz2wsx3", "wsx3edc4", "edc4rfv5", "rfv5tgb6", "tgb6yhn7", "yhn7ujm8", "ujm8ik9o", "ik9ol0p",
    // reversed
    "p0lo9ki8mju7nhy6bgt5vfr4cde3xsw2zaq1",
    "0p9o8i7u6y5t4r3e2w1q",
    // shifted
    "!qaz@wsx#edc$rfv%tgb^yhn&ujm*ik(ol)p",
    "!@#$%^&*()",
    ")(*&^%$#@!",
    // mixed
    "1qaz@wsx#edc$rfv%tgb^yhn&ujm*ik(ol)p",
    "q1w2e3r4t5y6u7i8o9p0",
    "p0o9i8u7y6t5r4e3w2q1",
];

#[rustfmt::skip]
const COMMON_PASSWORDS: &[&str] = &[
    "password", "123456", "123456789", "qwerty", "abc123",
    "password123", "admin", "letmein", "welcome", "monkey",
    "redmine", "redmine123", "admin123", "user123", "test123",
];

static BUILTIN: LazyLock<PatternCatalog> = LazyLock::new(|| {
    PatternCatalog::new(
        SEQUENTIAL_PATTERNS.iter().copied(),
        KEYBOARD_PATTERNS.iter().copied(),
        COMMON_PASSWORDS.iter().copied(),
    )
});

/// Environment variable naming an extra common-password file.
pub const BLACKLIST_PATH_ENV: &str = "PWD_BLACKLIST_PATH";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Blacklist file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read blacklist file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Blacklist file is empty")]
    EmptyFile,
}

/// Immutable sets of lowercase patterns.
///
/// The three sets are kept disjoint: a pattern is stored only in the first
/// set (sequential, keyboard, common) it is offered to.
#[derive(Debug, Clone, Default)]
pub struct PatternCatalog {
    sequential: Vec<String>,
    keyboard: Vec<String>,
    common: HashSet<String>,
}

impl PatternCatalog {
    /// Builds a catalog from arbitrary pattern lists.
    ///
    /// Entries are trimmed and lowercased; blank entries are skipped.
    pub fn new<'a>(
        sequential: impl IntoIterator<Item = &'a str>,
        keyboard: impl IntoIterator<Item = &'a str>,
        common: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut take = |patterns: &mut dyn Iterator<Item = &'a str>| -> Vec<String> {
            patterns
                .map(fold)
                .filter(|p| !p.is_empty() && seen.insert(p.clone()))
                .collect()
        };

        let sequential = take(&mut sequential.into_iter());
        let keyboard = take(&mut keyboard.into_iter());
        let common = take(&mut common.into_iter()).into_iter().collect();

        Self {
            sequential,
            keyboard,
            common,
        }
    }

    /// The process-wide built-in catalog.
    pub fn builtin() -> &'static PatternCatalog {
        &BUILTIN
    }

    /// Built-in catalog extended with the file named by `PWD_BLACKLIST_PATH`.
    ///
    /// Returns a plain copy of the built-in catalog when the variable is unset.
    ///
    /// # Errors
    ///
    /// Same as [`PatternCatalog::with_common_passwords_from_path`].
    pub fn from_env() -> Result<Self, CatalogError> {
        match std::env::var_os(BLACKLIST_PATH_ENV) {
            Some(path) => Self::builtin().with_common_passwords_from_path(PathBuf::from(path)),
            None => Ok(Self::builtin().clone()),
        }
    }

    /// Returns a copy of this catalog with extra common passwords read from a
    /// file, one per line.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File does not exist
    /// - File cannot be read
    /// - File has no non-blank line
    pub fn with_common_passwords_from_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Self, CatalogError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Blacklist loading FAILED: FileNotFound {}", path.display());
            return Err(CatalogError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;

        if content.trim().is_empty() {
            #[cfg(feature = "tracing")]
            tracing::error!("Blacklist loading FAILED: Empty file {}", path.display());
            return Err(CatalogError::EmptyFile);
        }

        let mut extended = self.clone();
        let entries: Vec<String> = content
            .lines()
            .map(fold)
            .filter(|l| !l.is_empty())
            .filter(|l| !extended.sequential.contains(l) && !extended.keyboard.contains(l))
            .collect();
        extended.common.extend(entries);

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Blacklist extended: {} passwords from {:?}",
            extended.common.len(),
            path
        );

        Ok(extended)
    }

    pub fn sequential_patterns(&self) -> &[String] {
        &self.sequential
    }

    pub fn keyboard_patterns(&self) -> &[String] {
        &self.keyboard
    }

    pub fn common_passwords(&self) -> &HashSet<String> {
        &self.common
    }

    /// True if `folded` (an already lowercased password) contains any sequential pattern.
    pub fn contains_sequential(&self, folded: &str) -> bool {
        contains_any(folded, &self.sequential)
    }

    /// True if `folded` contains any keyboard pattern.
    pub fn contains_keyboard(&self, folded: &str) -> bool {
        contains_any(folded, &self.keyboard)
    }

    /// True if `folded` is exactly a common password.
    pub fn is_common(&self, folded: &str) -> bool {
        self.common.contains(folded)
    }
}

/// Lowercase folding used on both sides of every comparison.
pub(crate) fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}

pub(crate) fn contains_any<S: AsRef<str>>(haystack: &str, patterns: &[S]) -> bool {
    patterns.iter().any(|p| haystack.contains(p.as_ref()))
}
