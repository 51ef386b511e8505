/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Pure arithmetic helpers: GCD and checked LCM, pairwise and folded.
//!
//! Free functions so they can be tested without building a task set.

use super::HyperperiodError;

/// Iterative Euclidean GCD.  `gcd(0, n) == n`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Checked LCM: `Err(HyperperiodError::Overflow { a, b })` if the result
/// does not fit in `u64`.
///
/// Divides before multiplying, `(a / gcd(a, b)) * b`, and still checks the
/// final multiplication.  Returns `Ok(0)` when either input is `0`.
pub fn lcm(a: u64, b: u64) -> Result<u64, HyperperiodError> {
    if a == 0 || b == 0 {
        return Ok(0);
    }

    let reduced = a / gcd(a, b);

    reduced
        .checked_mul(b)
        .ok_or(HyperperiodError::Overflow { a, b })
}

/// Fold a slice of periods into their GCD (the minor cycle).
///
/// Returns `0` for an empty slice.
pub fn gcd_of_slice(periods: &[u64]) -> u64 {
    periods.iter().fold(0, |acc, &p| gcd(acc, p))
}

/// Fold a slice of periods into their LCM (the major cycle).
///
/// Returns:
/// * `Ok(0)` for an empty slice.
/// * `Err` on the first overflow encountered.
pub fn lcm_of_slice(periods: &[u64]) -> Result<u64, HyperperiodError> {
    periods
        .iter()
        .try_fold(periods.first().copied().unwrap_or(0), |acc, &p| lcm(acc, p))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
