/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Tick-accurate fixed-priority preemptive simulator.
//!
//! Replays one hyperperiod `t ∈ [0, major_cycle)`.  Per tick, in order:
//!
//! 1. **Release**: every task with `t mod period == 0` gets a new job, in
//!    declaration order.
//! 2. **Prune**: jobs that finished on an earlier tick leave the queue.
//! 3. **Idle**: an empty queue makes the tick `IDLE`.
//! 4. **Select**: the first job of the [`ReadyQueue`]: highest priority,
//!    then earliest release, then declaration order.
//! 5. **Execute**: one tick of the selected job.
//! 6. **Deadline check**: `t + 1 > absolute_deadline` with work left emits a
//!    [`DeadlineMiss`] at `t + 1` and hands it to the [`MissHandler`].
//!
//! Jobs still pending after the last tick are discarded: the schedule is
//! periodic with the hyperperiod, so one window is the whole answer.
//!
//! # Cost
//! O(major_cycle × active jobs): every tick prunes and scans the queue.  The
//! hyperperiod grows with the LCM of the periods and can explode for
//! mutually prime periods, which is why [`Analyzer`](crate::analysis::Analyzer)
//! checks it against a limit before calling [`Simulator::run`].

pub mod policy;
pub mod ready_queue;

pub use policy::{EnforcePolicy, MissAction, MissHandler, ObserveOnly, ReleaseAction};
pub use ready_queue::{Job, ReadyQueue};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::hyperperiod::DEFAULT_HYPERPERIOD_LIMIT;
use crate::task::TaskSet;

// ── Output types ──────────────────────────────────────────────────────────────

/// Occupant of one simulated tick, by declaration index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Idle,
    Task(usize),
}

/// A job was still running past its absolute deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadlineMiss {
    pub task: String,
    /// Tick at which the miss was detected (`t + 1`).
    pub tick: u64,
    pub release: u64,
    pub absolute_deadline: u64,
}

/// Per-task counters over one hyperperiod.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub task: String,
    pub released: u64,
    pub completed: u64,
    /// Number of [`DeadlineMiss`] events, one per late tick executed.
    pub deadline_misses: u64,
    /// Releases that found an earlier job of the task still pending.
    pub overrun_releases: u64,
    pub skipped_releases: u64,
    pub aborted_jobs: u64,
    /// Largest `completion - release` among completed jobs.
    pub worst_response: Option<u64>,
}

impl TaskStats {
    fn new(task: &str) -> Self {
        Self {
            task: task.to_string(),
            ..Default::default()
        }
    }

    fn record_completion(&mut self, response: u64) {
        self.completed += 1;
        self.worst_response = Some(self.worst_response.map_or(response, |w| w.max(response)));
    }
}

/// Raw simulator output.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    /// One entry per tick, `len() == major_cycle`.
    pub slots: Vec<Slot>,
    pub misses: Vec<DeadlineMiss>,
    /// Indexed like the task set.
    pub stats: Vec<TaskStats>,
}

// ── Simulator ─────────────────────────────────────────────────────────────────

/// Up-front slot reservation, capped at the default hyperperiod limit.
fn slot_capacity(major_cycle: u64) -> usize {
    usize::try_from(major_cycle.min(DEFAULT_HYPERPERIOD_LIMIT)).unwrap_or(0)
}

pub struct Simulator<'a> {
    task_set: &'a TaskSet,
}

impl<'a> Simulator<'a> {
    pub fn new(task_set: &'a TaskSet) -> Self {
        Self { task_set }
    }

    /// Replay `major_cycle` ticks.
    ///
    /// Time and memory grow linearly with `major_cycle`; the caller bounds it
    /// (see [`CycleInfo::ensure_within`](crate::hyperperiod::CycleInfo::ensure_within)).
    pub fn run(&self, major_cycle: u64, handler: &mut dyn MissHandler) -> Simulation {
        let tasks = self.task_set.tasks();
        let mut queue = ReadyQueue::new();
        let mut slots = Vec::with_capacity(slot_capacity(major_cycle));
        let mut misses = Vec::new();
        let mut stats: Vec<TaskStats> = tasks.iter().map(|t| TaskStats::new(&t.name)).collect();

        info!(
            task_count = tasks.len(),
            major_cycle, "=== Simulation start ==="
        );

        for tick in 0..major_cycle {
            // 1. Release
            for (index, task) in tasks.iter().enumerate() {
                if tick % task.period != 0 {
                    continue;
                }
                if queue.pending_for(index) > 0 {
                    stats[index].overrun_releases += 1;
                    let policy = self.task_set.effective_policy(task);
                    if handler.on_overrun(task, policy, tick) == ReleaseAction::Skip {
                        stats[index].skipped_releases += 1;
                        warn!(task = %task.name, tick, "release skipped (previous job still pending)");
                        continue;
                    }
                }
                queue.push(task.priority, Job::release(index, task, tick));
                stats[index].released += 1;
                debug!(
                    task = %task.name,
                    tick,
                    deadline = tick.saturating_add(task.deadline),
                    "job released"
                );
            }

            // 2. Prune
            queue.prune_completed();

            // 3. Idle / 4. Select
            let Some(job) = queue.highest_mut() else {
                slots.push(Slot::Idle);
                continue;
            };

            // 5. Execute
            job.remaining -= 1;
            let index = job.task;
            slots.push(Slot::Task(index));

            if job.is_complete() {
                stats[index].record_completion(tick + 1 - job.release);
                continue;
            }

            // 6. Deadline check
            if tick + 1 > job.absolute_deadline {
                let task = &tasks[index];
                let miss = DeadlineMiss {
                    task: task.name.clone(),
                    tick: tick + 1,
                    release: job.release,
                    absolute_deadline: job.absolute_deadline,
                };
                stats[index].deadline_misses += 1;
                warn!(
                    task = %miss.task,
                    tick = miss.tick,
                    deadline = miss.absolute_deadline,
                    remaining = job.remaining,
                    "DEADLINE MISS"
                );

                let policy = self.task_set.effective_policy(task);
                if handler.on_miss(task, policy, &miss) == MissAction::Abort {
                    queue.pop_highest();
                    stats[index].aborted_jobs += 1;
                    warn!(task = %task.name, tick = tick + 1, "late job aborted");
                }
                misses.push(miss);
            }
        }

        info!(
            ticks = slots.len(),
            misses = misses.len(),
            discarded_jobs = queue.len(),
            "=== Simulation complete ==="
        );

        Simulation {
            slots,
            misses,
            stats,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
