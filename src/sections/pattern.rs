//! Pattern analysis sections - sequential runs, keyboard walks, repetition.

use super::{fail_if, RuleContext, SectionResult};
use crate::catalog::contains_any;
use crate::violation::ViolationKind;
use std::sync::LazyLock;

const KEYBOARD_ROWS: [&str; 4] = ["1234567890", "qwertyuiop", "asdfghjkl", "zxcvbnm"];
const WINDOW_LENGTHS: std::ops::RangeInclusive<usize> = 3..=6;
const KEYPAD_DIAGONALS: [&str; 3] = ["147", "258", "369"];
const SHIFTED_RUNS: [&str; 3] = ["!@#", "$%^", "&*()"];

/// Every row window of length 3..=6, the keypad diagonals and the shifted
/// runs, each with its reverse.
static KEYBOARD_WINDOWS: LazyLock<Vec<String>> = LazyLock::new(|| {
    let mut windows: Vec<String> = Vec::new();
    let mut add = |s: &str| {
        for candidate in [s.to_string(), s.chars().rev().collect()] {
            if !windows.contains(&candidate) {
                windows.push(candidate);
            }
        }
    };

    for row in KEYBOARD_ROWS {
        for len in WINDOW_LENGTHS {
            for start in 0..=row.len().saturating_sub(len) {
                if let Some(window) = row.get(start..start + len) {
                    add(window);
                }
            }
        }
    }
    for run in KEYPAD_DIAGONALS.into_iter().chain(SHIFTED_RUNS) {
        add(run);
    }

    windows
});

/// Rejects passwords containing a catalog sequential pattern.
pub fn sequential_section(ctx: &RuleContext<'_>) -> SectionResult {
    fail_if(
        ctx.policy.prevent_sequential_chars && ctx.catalog.contains_sequential(&ctx.folded),
        ViolationKind::SequentialChars,
    )
}

/// Rejects passwords containing a catalog keyboard pattern or any generated
/// keyboard window.
pub fn keyboard_section(ctx: &RuleContext<'_>) -> SectionResult {
    if !ctx.policy.prevent_keyboard_patterns {
        return Ok(None);
    }
    fail_if(
        ctx.catalog.contains_keyboard(&ctx.folded) || contains_any(&ctx.folded, KEYBOARD_WINDOWS.as_slice()),
        ViolationKind::KeyboardPatterns,
    )
}

/// Rejects passwords with a character repeated 3+ times in a row.
pub fn repetitive_section(ctx: &RuleContext<'_>) -> SectionResult {
    fail_if(
        ctx.policy.prevent_repetitive_chars && has_run_of_three(ctx.password),
        ViolationKind::RepetitiveChars,
    )
}

fn has_run_of_three(password: &str) -> bool {
    let mut previous = None;
    let mut repeated_count = 0;
    for c in password.chars() {
        if previous == Some(c) {
            repeated_count += 1;
            if repeated_count >= 3 {
                return true;
            }
        } else {
            previous = Some(c);
            repeated_count = 1;
        }
    }
    false
}
