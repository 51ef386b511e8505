/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Minor and major cycle calculation.
//!
//! * **Minor cycle**: GCD of all task periods, the finest granularity at
//!   which the release pattern can change.
//! * **Major cycle** (hyperperiod): LCM of all task periods, the smallest
//!   window after which the whole schedule repeats.
//!
//! Overflow and oversized hyperperiods are distinct error variants so the
//! caller can tell "cannot be represented" from "too expensive to simulate".

pub mod math;

use tracing::{debug, info, warn};

use math::{gcd_of_slice, lcm_of_slice};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Default upper limit on the hyperperiod the simulator will replay
/// (1 000 000 ticks ≈ 16.7 minutes at 1 ms per tick).
pub const DEFAULT_HYPERPERIOD_LIMIT: u64 = 1_000_000;

// ── Error type ────────────────────────────────────────────────────────────────

/// Errors that can occur during cycle calculation.
#[derive(Debug, PartialEq, Eq)]
pub enum HyperperiodError {
    /// The period slice was empty or contained a zero.
    NoValidPeriods,

    /// LCM calculation overflowed `u64`.
    Overflow { a: u64, b: u64 },

    /// The hyperperiod exceeds the configured simulation limit.
    TooLarge { value: u64, limit: u64 },
}

impl std::fmt::Display for HyperperiodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HyperperiodError::NoValidPeriods => {
                write!(f, "no tasks with a valid (non-zero) period")
            }
            HyperperiodError::Overflow { a, b } => {
                write!(f, "LCM overflow computing lcm({a}, {b})")
            }
            HyperperiodError::TooLarge { value, limit } => write!(
                f,
                "hyperperiod {value}ms ({:.1}s) exceeds simulation limit {limit}ms ({:.1}s)",
                *value as f64 / 1_000.0,
                *limit as f64 / 1_000.0
            ),
        }
    }
}

impl std::error::Error for HyperperiodError {}

// ── CycleInfo ─────────────────────────────────────────────────────────────────

/// Result of [`analyze_cycles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleInfo {
    /// GCD of all periods.
    pub minor_cycle: u64,

    /// LCM of all periods.
    pub major_cycle: u64,
}

impl CycleInfo {
    /// Reject a major cycle above `limit` before it is simulated.
    pub fn ensure_within(&self, limit: u64) -> Result<(), HyperperiodError> {
        if self.major_cycle > limit {
            warn!(
                major_cycle = self.major_cycle,
                limit, "Hyperperiod exceeds configured simulation limit"
            );
            return Err(HyperperiodError::TooLarge {
                value: self.major_cycle,
                limit,
            });
        }
        Ok(())
    }
}

/// Compute minor and major cycle for `periods`.
///
/// # Errors
/// * [`HyperperiodError::NoValidPeriods`] for an empty slice or a zero
///   period.
/// * [`HyperperiodError::Overflow`] if the LCM exceeds `u64`.
pub fn analyze_cycles(periods: &[u64]) -> Result<CycleInfo, HyperperiodError> {
    if periods.is_empty() || periods.contains(&0) {
        warn!("No valid periods to reduce");
        return Err(HyperperiodError::NoValidPeriods);
    }

    let unique_periods: Vec<u64> = {
        let mut v = periods.to_vec();
        v.sort_unstable();
        v.dedup();
        v
    };

    let minor_cycle = gcd_of_slice(&unique_periods);
    let major_cycle = lcm_of_slice(&unique_periods)?;

    info!(
        task_count = periods.len(),
        unique_count = unique_periods.len(),
        minor_cycle,
        major_cycle,
        "Calculated cycles"
    );
    for p in &unique_periods {
        debug!(period_ms = p, releases = major_cycle / p, "  unique period");
    }

    Ok(CycleInfo {
        minor_cycle,
        major_cycle,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
