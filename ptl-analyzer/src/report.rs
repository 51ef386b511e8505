/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The assembled result of one analysis run, and its text rendering.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::simulator::{DeadlineMiss, TaskStats};
use crate::timeline::Segment;

/// Who holds the CPU during a timeline segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Occupant {
    Idle,
    Task(String),
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupant::Idle => f.write_str("IDLE"),
            Occupant::Task(name) => f.write_str(name),
        }
    }
}

impl Serialize for Occupant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Everything one analysis run produced.  Built by
/// [`Analyzer::analyze`](crate::analysis::Analyzer::analyze); read-only after.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub task_count: usize,
    /// GCD of all periods, in ticks.
    pub minor_cycle: u64,
    /// LCM of all periods, in ticks.
    pub major_cycle: u64,
    pub utilization: f64,
    /// Rate-monotonic sufficient bound for `task_count` tasks.
    pub liu_layland_bound: f64,
    pub overloaded: bool,
    /// In detection order.  Empty when overloaded.
    pub deadline_misses: Vec<DeadlineMiss>,
    /// Covers `[0, major_cycle)` exactly.  Empty when overloaded.
    pub timeline: Vec<Segment<Occupant>>,
    /// Declaration order.  Empty when overloaded.
    pub task_stats: Vec<TaskStats>,
}

impl Report {
    /// Not overloaded and no deadline missed over one hyperperiod.
    pub fn is_schedulable(&self) -> bool {
        !self.overloaded && self.deadline_misses.is_empty()
    }
}

const RULE: &str = "------------------------------";

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Schedulability Report ({} tasks) ===", self.task_count)?;
        writeln!(f, "MINOR CYCLE (GCD):         {} ms", self.minor_cycle)?;
        writeln!(f, "MAJOR CYCLE (Hyperperiod): {} ms", self.major_cycle)?;
        writeln!(f, "TOTAL CPU LOAD:            {:.2}%", self.utilization * 100.0)?;
        writeln!(
            f,
            "RM BOUND (Liu & Layland):  {:.2}%",
            self.liu_layland_bound * 100.0
        )?;

        if self.overloaded {
            return writeln!(f, "[FAIL] System is OVERLOADED (>100%).");
        }

        writeln!(f)?;
        writeln!(f, "=== Simulated Schedule (0 to {} ms) ===", self.major_cycle)?;
        writeln!(f, "Note: Simulates Fixed Priority Preemptive Scheduling.")?;
        for miss in &self.deadline_misses {
            writeln!(f, "  [!] DEADLINE MISS: {} at {}ms", miss.task, miss.tick)?;
        }

        writeln!(f, "{:<15} Running Task", "Time (ms)")?;
        writeln!(f, "{RULE}")?;
        for seg in &self.timeline {
            writeln!(f, "{:03} - {:03}        {}", seg.start, seg.end, seg.occupant)?;
        }
        writeln!(f, "{RULE}")?;

        if !self.task_stats.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "{:<16} {:>8} {:>9} {:>6} {:>8} {:>7} {:>8}",
                "Task", "Released", "Completed", "Misses", "Skipped", "Killed", "WorstRT"
            )?;
            for s in &self.task_stats {
                let worst = s
                    .worst_response
                    .map_or_else(|| "-".to_string(), |w| format!("{w}ms"));
                writeln!(
                    f,
                    "{:<16} {:>8} {:>9} {:>6} {:>8} {:>7} {:>8}",
                    s.task,
                    s.released,
                    s.completed,
                    s.deadline_misses,
                    s.skipped_releases,
                    s.aborted_jobs,
                    worst
                )?;
            }
        }

        writeln!(f)?;
        if self.deadline_misses.is_empty() {
            writeln!(f, "[OK] All deadlines met over one hyperperiod.")
        } else {
            writeln!(
                f,
                "[FAIL] {} deadline miss event(s) detected.",
                self.deadline_misses.len()
            )
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
