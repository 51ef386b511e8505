/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Schedulability analysis pipeline.
//!
//! [`Analyzer`] chains the stages below and packages their outputs into one
//! [`Report`]:
//!
//! ```text
//! TaskSet ─► analyze_cycles ─► check_utilization ─┬─► overloaded report
//!                                                 └─► Simulator ─► compress ─► Report
//! ```
//!
//! An overloaded set never reaches the simulator, so the hyperperiod limit
//! only applies to sets that would actually be replayed.
//!
//! # Example
//! ```rust,ignore
//! let set = config::load_task_set(path)?;
//! let report = Analyzer::new(AnalysisConfig::default()).analyze(&set)?;
//! println!("{report}");
//! ```

pub mod error;
pub mod feasibility;

pub use error::AnalysisError;

use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::hyperperiod::analyze_cycles;
use crate::report::{Occupant, Report};
use crate::simulator::{Slot, Simulator};
use crate::task::TaskSet;
use crate::timeline::compress;

use feasibility::{check_liu_layland, check_utilization, liu_layland_bound};

/// Runs the full pipeline with a fixed [`AnalysisConfig`].
///
/// Stateless between calls: every run allocates its own jobs and timeline,
/// so analysing the same set twice gives identical reports.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Analyse `task_set` and assemble the report.
    ///
    /// Overload and deadline misses are results, not errors.
    ///
    /// # Errors
    /// [`AnalysisError::Hyperperiod`] if the LCM overflows, or if the set is
    /// not overloaded and its major cycle exceeds
    /// [`AnalysisConfig::max_hyperperiod`].
    pub fn analyze(&self, task_set: &TaskSet) -> Result<Report, AnalysisError> {
        let tasks = task_set.tasks();
        info!(
            task_count = tasks.len(),
            global_policy = %task_set.global_policy(),
            miss_mode = ?self.config.miss_mode,
            "=== Analyzer::analyze() ==="
        );

        // ── Cycles ────────────────────────────────────────────────────────────
        let cycles = analyze_cycles(&task_set.periods())?;

        // ── Load ──────────────────────────────────────────────────────────────
        let load = check_utilization(tasks);
        let rm_bound = liu_layland_bound(tasks.len());
        info!(
            utilization = format!("{:.4}", load.total),
            overloaded = load.overloaded,
            "Utilization checked"
        );

        let mut report = Report {
            task_count: tasks.len(),
            minor_cycle: cycles.minor_cycle,
            major_cycle: cycles.major_cycle,
            utilization: load.total,
            liu_layland_bound: rm_bound,
            overloaded: load.overloaded,
            deadline_misses: Vec::new(),
            timeline: Vec::new(),
            task_stats: Vec::new(),
        };

        if load.overloaded {
            warn!(
                utilization = format!("{:.4}", load.total),
                "Task set is OVERLOADED (>100%); simulation skipped"
            );
            return Ok(report);
        }

        if let Some(total_u) = check_liu_layland(tasks) {
            warn!(
                utilization = format!("{total_u:.4}"),
                bound = format!("{rm_bound:.4}"),
                "Utilization exceeds the Liu & Layland bound; schedulability \
                 is not guaranteed under rate-monotonic priorities"
            );
        }

        // ── Simulation ────────────────────────────────────────────────────────
        cycles.ensure_within(self.config.max_hyperperiod)?;

        let mut handler = self.config.miss_mode.handler();
        let sim = Simulator::new(task_set).run(cycles.major_cycle, handler.as_mut());

        report.timeline = compress(&sim.slots)
            .into_iter()
            .map(|seg| {
                seg.map(|slot| match slot {
                    Slot::Idle => Occupant::Idle,
                    Slot::Task(i) => Occupant::Task(tasks[i].name.clone()),
                })
            })
            .collect();
        report.deadline_misses = sim.misses;
        report.task_stats = sim.stats;

        info!(
            segments = report.timeline.len(),
            deadline_misses = report.deadline_misses.len(),
            schedulable = report.is_schedulable(),
            "Analysis complete"
        );
        Ok(report)
    }
}

/// Analyse with [`AnalysisConfig::default`].
pub fn analyze(task_set: &TaskSet) -> Result<Report, AnalysisError> {
    Analyzer::default().analyze(task_set)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissMode;
    use crate::hyperperiod::HyperperiodError;
    use crate::task::{OverrunPolicy, Task};
    use crate::timeline::{expand, Segment};

    fn set(tasks: Vec<Task>) -> TaskSet {
        TaskSet::new(tasks, OverrunPolicy::Skip).unwrap()
    }

    fn names(report: &Report) -> Vec<(u64, u64, String)> {
        report
            .timeline
            .iter()
            .map(|s| (s.start, s.end, s.occupant.to_string()))
            .collect()
    }

    fn miss_ticks(report: &Report) -> Vec<u64> {
        report.deadline_misses.iter().map(|m| m.tick).collect()
    }

    fn enforcing() -> Analyzer {
        Analyzer::new(AnalysisConfig {
            miss_mode: MissMode::Enforce,
            ..Default::default()
        })
    }

    // ── scenarios ─────────────────────────────────────────────────────────────

    #[test]
    fn two_task_harmonic_set() {
        let ts = set(vec![
            Task::new("A", 4, 1).with_priority(2),
            Task::new("B", 6, 2).with_priority(1),
        ]);
        let r = analyze(&ts).unwrap();

        assert_eq!(r.minor_cycle, 2);
        assert_eq!(r.major_cycle, 12);
        assert!((r.utilization - 7.0 / 12.0).abs() < 1e-9);
        assert!(!r.overloaded);
        assert!(r.is_schedulable());

        let expected: Vec<(u64, u64, String)> = [
            (0, 1, "A"),
            (1, 3, "B"),
            (3, 4, "IDLE"),
            (4, 5, "A"),
            (5, 6, "IDLE"),
            (6, 8, "B"),
            (8, 9, "A"),
            (9, 12, "IDLE"),
        ]
        .into_iter()
        .map(|(s, e, n)| (s, e, n.to_string()))
        .collect();
        assert_eq!(names(&r), expected);
    }

    #[test]
    fn single_task_at_full_load() {
        let ts = set(vec![Task::new("Solo", 5, 5).with_deadline(5)]);
        let r = analyze(&ts).unwrap();

        assert_eq!(r.utilization, 1.0);
        assert!(!r.overloaded);
        assert_eq!((r.minor_cycle, r.major_cycle), (5, 5));
        assert_eq!(names(&r), vec![(0, 5, "Solo".to_string())]);
        assert!(r.deadline_misses.is_empty());
    }

    #[test]
    fn overloaded_set_skips_simulation() {
        let ts = set(vec![Task::new("P", 2, 2), Task::new("Q", 3, 2)]);
        let r = analyze(&ts).unwrap();

        assert!((r.utilization - 5.0 / 3.0).abs() < 1e-9);
        assert!(r.overloaded);
        assert_eq!((r.minor_cycle, r.major_cycle), (1, 6));
        assert!(r.deadline_misses.is_empty());
        assert!(r.timeline.is_empty());
        assert!(r.task_stats.is_empty());
        assert!(!r.is_schedulable());
    }

    #[test]
    fn wcet_above_period_is_overloaded_not_invalid() {
        let ts = set(vec![Task::new("X", 5, 6).with_deadline(5)]);
        let r = analyze(&ts).unwrap();
        assert!((r.utilization - 1.2).abs() < 1e-9);
        assert!(r.overloaded);
    }

    #[test]
    fn delayed_low_priority_task_misses() {
        let ts = set(vec![
            Task::new("H", 10, 3).with_priority(2),
            Task::new("X", 10, 6).with_priority(1).with_deadline(5),
        ]);
        let r = analyze(&ts).unwrap();

        assert!(!r.overloaded);
        assert!(r.deadline_misses.iter().all(|m| m.task == "X"));
        assert!(r.deadline_misses.iter().all(|m| m.tick > 5));
        assert_eq!(miss_ticks(&r), vec![6, 7, 8]);
        assert_eq!(
            names(&r),
            vec![
                (0, 3, "H".to_string()),
                (3, 9, "X".to_string()),
                (9, 10, "IDLE".to_string()),
            ]
        );
        assert!(!r.is_schedulable());
    }

    #[test]
    fn equal_priority_tie_goes_to_first_declared() {
        let ts = set(vec![
            Task::new("P", 4, 1).with_priority(3),
            Task::new("Q", 4, 1).with_priority(3),
        ]);
        for _ in 0..5 {
            let r = analyze(&ts).unwrap();
            assert_eq!(r.timeline[0].occupant, Occupant::Task("P".into()));
            assert_eq!(r.timeline[1].occupant, Occupant::Task("Q".into()));
        }
    }

    // ── properties ────────────────────────────────────────────────────────────

    #[test]
    fn timeline_covers_the_hyperperiod() {
        let ts = set(vec![
            Task::new("A", 3, 1).with_priority(3),
            Task::new("B", 5, 1).with_priority(2),
            Task::new("C", 15, 4).with_priority(1),
        ]);
        let r = analyze(&ts).unwrap();

        let ticks = expand(&r.timeline);
        assert_eq!(ticks.len() as u64, r.major_cycle);
        assert_eq!(r.timeline.first().map(|s| s.start), Some(0));
        assert_eq!(r.timeline.last().map(|s| s.end), Some(r.major_cycle));
        for pair in r.timeline.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert_ne!(pair[0].occupant, pair[1].occupant);
        }

        // Busy ticks equal total demand when nothing misses.
        let busy = ticks.iter().filter(|o| **o != Occupant::Idle).count() as u64;
        let demand: u64 = ts.tasks().iter().map(|t| t.wcet * (r.major_cycle / t.period)).sum();
        assert_eq!(busy, demand);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let ts = set(vec![
            Task::new("H", 10, 3).with_priority(2),
            Task::new("X", 10, 6).with_priority(1).with_deadline(5),
            Task::new("L", 20, 1),
        ]);
        let first = analyze(&ts).unwrap();
        let second = analyze(&ts).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn stats_count_releases_and_response() {
        let ts = set(vec![
            Task::new("A", 4, 1).with_priority(2),
            Task::new("B", 6, 2).with_priority(1),
        ]);
        let r = analyze(&ts).unwrap();

        assert_eq!(r.task_stats.len(), 2);
        assert_eq!(r.task_stats[0].released, 3);
        assert_eq!(r.task_stats[0].completed, 3);
        assert_eq!(r.task_stats[0].worst_response, Some(1));
        assert_eq!(r.task_stats[1].released, 2);
        assert_eq!(r.task_stats[1].worst_response, Some(3));
    }

    #[test]
    fn huge_relative_deadline_is_analysed_without_misses() {
        let ts = set(vec![
            Task::new("A", 4, 1).with_deadline(u64::MAX),
            Task::new("B", 8, 1),
        ]);
        let r = analyze(&ts).unwrap();
        assert!(r.is_schedulable());
        assert_eq!(r.task_stats[0].completed, 2);
    }

    // ── enforcement ───────────────────────────────────────────────────────────

    #[test]
    fn enforce_kill_cuts_the_late_job() {
        let ts = set(vec![
            Task::new("H", 10, 3).with_priority(2),
            Task::new("X", 10, 6)
                .with_priority(1)
                .with_deadline(5)
                .with_policy(OverrunPolicy::Kill),
        ]);
        let r = enforcing().analyze(&ts).unwrap();

        assert_eq!(miss_ticks(&r), vec![6]);
        assert_eq!(
            r.timeline,
            vec![
                Segment { start: 0, end: 3, occupant: Occupant::Task("H".into()) },
                Segment { start: 3, end: 6, occupant: Occupant::Task("X".into()) },
                Segment { start: 6, end: 10, occupant: Occupant::Idle },
            ]
        );
        assert_eq!(r.task_stats[1].aborted_jobs, 1);
    }

    #[test]
    fn observe_mode_ignores_kill_policy() {
        let ts = set(vec![
            Task::new("H", 10, 3).with_priority(2),
            Task::new("X", 10, 6)
                .with_priority(1)
                .with_deadline(5)
                .with_policy(OverrunPolicy::Kill),
        ]);
        let r = analyze(&ts).unwrap();
        assert_eq!(miss_ticks(&r), vec![6, 7, 8]);
        assert_eq!(r.task_stats[1].aborted_jobs, 0);
    }

    // ── errors ────────────────────────────────────────────────────────────────

    #[test]
    fn oversized_hyperperiod_is_rejected_before_simulation() {
        let ts = set(vec![Task::new("A", 997, 1), Task::new("B", 1009, 1)]);
        let err = analyze(&ts).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Hyperperiod(HyperperiodError::TooLarge { value: 1_005_973, .. })
        ));
    }

    #[test]
    fn raised_limit_admits_larger_hyperperiod() {
        let ts = set(vec![Task::new("A", 997, 1), Task::new("B", 1009, 1)]);
        let analyzer = Analyzer::new(AnalysisConfig {
            max_hyperperiod: 2_000_000,
            ..Default::default()
        });
        let r = analyzer.analyze(&ts).unwrap();
        assert_eq!(r.major_cycle, 1_005_973);
        assert!(r.is_schedulable());
    }

    #[test]
    fn overloaded_set_ignores_hyperperiod_limit() {
        let ts = set(vec![Task::new("A", 997, 997), Task::new("B", 1009, 600)]);
        let r = analyze(&ts).unwrap();
        assert!(r.overloaded);
        assert_eq!(r.major_cycle, 1_005_973);
    }

    #[test]
    fn lcm_overflow_is_an_error() {
        let ts = set(vec![Task::new("A", u64::MAX, 1), Task::new("B", u64::MAX - 1, 1)]);
        let err = analyze(&ts).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Hyperperiod(HyperperiodError::Overflow { .. })
        ));
    }
}
