/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core task data structures for the PTL analyzer.
//!
//! ```text
//! YAML / collector  ──►  Task  ──(TaskSet::new)──►  TaskSet  ──(analysis)──►  Report
//!                        ↑ declared                  ↑ validated, immutable
//! ```
//!
//! # Ownership model
//! A [`TaskSet`] is built once through its validating constructor and is
//! then only ever borrowed by the pipeline.  Jobs created by the simulator
//! refer back to their task by declaration index, never by owning a copy.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisError;

// ── Overrun policy ────────────────────────────────────────────────────────────

/// What the PTL runtime does with a job that is still running when its task
/// is due for the next release.
///
/// The "use the global policy" sentinel is not a variant: a task carries an
/// `Option<OverrunPolicy>` and `None` means "defer to
/// [`TaskSet::global_policy`]".  This makes it impossible to configure the
/// sentinel as the global policy itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrunPolicy {
    /// Drop the new release and let the late job finish.
    #[default]
    Skip,
    /// Terminate the late job and start the new one.
    Kill,
    /// Release the new job anyway and let the late one run past.
    CatchUp,
}

impl OverrunPolicy {
    /// Symbol used by the PTL C API (`PTL_OverrunPolicy_t`).
    pub fn c_symbol(self) -> &'static str {
        match self {
            OverrunPolicy::Skip => "PTL_POLICY_SKIP",
            OverrunPolicy::Kill => "PTL_POLICY_KILL",
            OverrunPolicy::CatchUp => "PTL_POLICY_CATCH_UP",
        }
    }
}

impl fmt::Display for OverrunPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OverrunPolicy::Skip => "SKIP",
            OverrunPolicy::Kill => "KILL",
            OverrunPolicy::CatchUp => "CATCH_UP",
        };
        f.write_str(s)
    }
}

// ── Task ──────────────────────────────────────────────────────────────────────

/// One periodic task as declared by the user.
///
/// All timing values are in milliseconds, which is also the simulation tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Unique task name within the set.
    pub name: String,

    /// Release period `T` in ticks.
    pub period: u64,

    /// Worst-case execution time `C` per release, in ticks.
    pub wcet: u64,

    /// Relative deadline `D` in ticks.  May be smaller than `wcet`, in which
    /// case every job of the task is guaranteed to miss.
    pub deadline: u64,

    /// Fixed priority; a higher number is more urgent.
    pub priority: i32,

    /// Per-task overrun policy, `None` to use the global one.
    pub overrun_policy: Option<OverrunPolicy>,
}

impl Task {
    /// Build a task with the collector defaults: `deadline = period`,
    /// `priority = 1`, global overrun policy.
    pub fn new(name: impl Into<String>, period: u64, wcet: u64) -> Self {
        Self {
            name: name.into(),
            period,
            wcet,
            deadline: period,
            priority: 1,
            overrun_policy: None,
        }
    }

    pub fn with_deadline(mut self, deadline: u64) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_policy(mut self, policy: OverrunPolicy) -> Self {
        self.overrun_policy = Some(policy);
        self
    }

    /// CPU demand fraction: `wcet / period`.
    pub fn utilization(&self) -> f64 {
        self.wcet as f64 / self.period as f64
    }

    /// Structural checks applied by [`TaskSet::new`].
    fn validate(&self) -> Result<(), AnalysisError> {
        let reason = if self.name.trim().is_empty() {
            Some("name must not be blank")
        } else if self.period == 0 {
            Some("period must be positive")
        } else if self.wcet == 0 {
            Some("wcet must be positive")
        } else if self.deadline == 0 {
            Some("deadline must be positive")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(AnalysisError::InvalidTask {
                task: self.name.clone(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

// ── TaskSet ───────────────────────────────────────────────────────────────────

/// Ordered, validated collection of tasks plus the global overrun policy.
///
/// Declaration order is significant: it is the last tie-break key when two
/// jobs of equal priority are released on the same tick.
#[derive(Debug, Clone, Serialize)]
pub struct TaskSet {
    tasks: Vec<Task>,
    global_policy: OverrunPolicy,
}

impl TaskSet {
    /// Validate `tasks` and freeze them into a set.
    ///
    /// # Errors
    /// * [`AnalysisError::InvalidTaskSet`] if `tasks` is empty.
    /// * [`AnalysisError::InvalidTask`] on the first task with a blank name,
    ///   a zero timing field or a name already used by an earlier task.
    pub fn new(tasks: Vec<Task>, global_policy: OverrunPolicy) -> Result<Self, AnalysisError> {
        if tasks.is_empty() {
            return Err(AnalysisError::InvalidTaskSet);
        }

        let mut seen = HashSet::new();
        for task in &tasks {
            task.validate()?;
            if !seen.insert(task.name.as_str()) {
                return Err(AnalysisError::InvalidTask {
                    task: task.name.clone(),
                    reason: "duplicate task name".to_string(),
                });
            }
        }

        Ok(Self {
            tasks,
            global_policy,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Always `false` for a constructed set; provided for API completeness.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn global_policy(&self) -> OverrunPolicy {
        self.global_policy
    }

    /// Periods in declaration order.
    pub fn periods(&self) -> Vec<u64> {
        self.tasks.iter().map(|t| t.period).collect()
    }

    /// Per-task policy if set, otherwise the global policy.
    pub fn effective_policy(&self, task: &Task) -> OverrunPolicy {
        task.overrun_policy.unwrap_or(self.global_policy)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── OverrunPolicy ─────────────────────────────────────────────────────────

    #[test]
    fn overrun_policy_c_symbols_match_ptl_api() {
        assert_eq!(OverrunPolicy::Skip.c_symbol(), "PTL_POLICY_SKIP");
        assert_eq!(OverrunPolicy::Kill.c_symbol(), "PTL_POLICY_KILL");
        assert_eq!(OverrunPolicy::CatchUp.c_symbol(), "PTL_POLICY_CATCH_UP");
    }

    #[test]
    fn overrun_policy_default_is_skip() {
        assert_eq!(OverrunPolicy::default(), OverrunPolicy::Skip);
    }

    // ── Task ──────────────────────────────────────────────────────────────────

    #[test]
    fn new_task_uses_collector_defaults() {
        let t = Task::new("A", 10, 2);
        assert_eq!(t.deadline, 10);
        assert_eq!(t.priority, 1);
        assert_eq!(t.overrun_policy, None);
    }

    #[test]
    fn task_utilization_is_correct() {
        let t = Task::new("A", 4, 1);
        assert!((t.utilization() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn wcet_larger_than_deadline_is_accepted() {
        let t = Task::new("X", 10, 6).with_deadline(5);
        assert!(TaskSet::new(vec![t], OverrunPolicy::Skip).is_ok());
    }

    // ── TaskSet::new ──────────────────────────────────────────────────────────

    #[test]
    fn empty_task_list_is_invalid_task_set() {
        let err = TaskSet::new(vec![], OverrunPolicy::Skip).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidTaskSet));
    }

    #[test]
    fn zero_period_is_rejected() {
        let err = TaskSet::new(vec![Task::new("A", 0, 1)], OverrunPolicy::Skip).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidTask { ref task, .. } if task == "A"));
    }

    #[test]
    fn zero_wcet_is_rejected() {
        let err = TaskSet::new(vec![Task::new("A", 5, 0)], OverrunPolicy::Skip).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidTask { .. }));
    }

    #[test]
    fn zero_deadline_is_rejected() {
        let t = Task::new("A", 5, 1).with_deadline(0);
        let err = TaskSet::new(vec![t], OverrunPolicy::Skip).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidTask { .. }));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = TaskSet::new(
            vec![Task::new("A", 5, 1), Task::new("A", 10, 1)],
            OverrunPolicy::Skip,
        )
        .unwrap_err();
        assert!(
            matches!(err, AnalysisError::InvalidTask { ref reason, .. } if reason.contains("duplicate"))
        );
    }

    #[test]
    fn declaration_order_is_preserved() {
        let set = TaskSet::new(
            vec![Task::new("B", 6, 1), Task::new("A", 4, 1)],
            OverrunPolicy::Kill,
        )
        .unwrap();
        let names: Vec<_> = set.tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(set.periods(), vec![6, 4]);
    }

    // ── effective_policy ──────────────────────────────────────────────────────

    #[test]
    fn effective_policy_falls_back_to_global() {
        let set = TaskSet::new(
            vec![
                Task::new("A", 5, 1),
                Task::new("B", 5, 1).with_policy(OverrunPolicy::CatchUp),
            ],
            OverrunPolicy::Kill,
        )
        .unwrap();
        assert_eq!(set.effective_policy(&set.tasks()[0]), OverrunPolicy::Kill);
        assert_eq!(set.effective_policy(&set.tasks()[1]), OverrunPolicy::CatchUp);
    }
}
