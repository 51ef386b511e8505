/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Processor-demand checks.
//!
//! # Utilization
//! `U = Σ C_i / T_i`.  A set with `U > 1.0` demands more than one CPU's worth
//! of time and cannot be scheduled by any policy; the simulator is skipped.
//! Exactly `1.0` is still schedulable by load.
//!
//! # Liu & Layland
//! Under rate-monotonic priorities a set of `n` independent periodic tasks
//! is **guaranteed** schedulable on one CPU if
//!
//! $$U \leq n \left(2^{1/n} - 1\right)$$
//!
//! | n | Bound |
//! |---|---|
//! | 1 | 1.000 |
//! | 2 | 0.828 |
//! | 3 | 0.780 |
//! | ∞ | ln(2) ≈ 0.693 |
//!
//! The bound is sufficient, not necessary, and assumes rate-monotonic
//! priorities, which user-declared priorities need not follow.  It is only
//! reported; the tick-by-tick simulation is the verdict.

use crate::task::Task;

/// Output of [`check_utilization`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Utilization {
    /// `Σ wcet / period` in declaration order.
    pub total: f64,

    /// `total > 1.0`.
    pub overloaded: bool,
}

/// Sum per-task demand and classify the set.
pub fn check_utilization(tasks: &[Task]) -> Utilization {
    let total: f64 = tasks.iter().map(Task::utilization).sum();
    Utilization {
        total,
        overloaded: total > 1.0,
    }
}

/// Liu & Layland utilisation bound for `n` tasks: `n × (2^(1/n) − 1)`.
///
/// `0.0` for `n = 0`.
pub fn liu_layland_bound(n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let nf = n as f64;
    nf * (2.0_f64.powf(1.0 / nf) - 1.0)
}

/// `None` if the set is provably RM-schedulable, otherwise
/// `Some(total_utilisation)`.
pub fn check_liu_layland(tasks: &[Task]) -> Option<f64> {
    if tasks.is_empty() {
        return None;
    }

    let total_u = check_utilization(tasks).total;
    if total_u > liu_layland_bound(tasks.len()) {
        Some(total_u)
    } else {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
