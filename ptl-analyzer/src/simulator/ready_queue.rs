/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Ordered set of released, unfinished jobs.
//!
//! Jobs are keyed by [`JobKey`] = `(priority desc, release asc, declaration
//! index asc)`, so the first entry of the map is always the job to run.  The
//! key is unique: a task releases at most one job per tick.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::task::Task;

/// One release of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Declaration index of the owning task in the [`TaskSet`](crate::task::TaskSet).
    pub task: usize,
    pub release: u64,
    pub remaining: u64,
    pub absolute_deadline: u64,
}

impl Job {
    pub fn release(task_index: usize, task: &Task, tick: u64) -> Self {
        Self {
            task: task_index,
            release: tick,
            remaining: task.wcet,
            absolute_deadline: tick.saturating_add(task.deadline),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

/// Total order used to select the running job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct JobKey {
    priority: Reverse<i32>,
    release: u64,
    task: usize,
}

impl JobKey {
    fn new(priority: i32, job: &Job) -> Self {
        Self {
            priority: Reverse(priority),
            release: job.release,
            task: job.task,
        }
    }
}

#[derive(Debug, Default)]
pub struct ReadyQueue {
    jobs: BTreeMap<JobKey, Job>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly released job of a task with `priority`.
    pub fn push(&mut self, priority: i32, job: Job) {
        self.jobs.insert(JobKey::new(priority, &job), job);
    }

    /// Drop every job whose remaining execution reached zero.
    pub fn prune_completed(&mut self) {
        self.jobs.retain(|_, job| !job.is_complete());
    }

    /// The job that runs this tick, if any.
    pub fn highest_mut(&mut self) -> Option<&mut Job> {
        self.jobs.values_mut().next()
    }

    /// Remove and return the job that runs this tick.
    pub fn pop_highest(&mut self) -> Option<Job> {
        self.jobs.pop_first().map(|(_, job)| job)
    }

    /// Unfinished jobs of task `task`.
    pub fn pending_for(&self, task: usize) -> usize {
        self.jobs
            .values()
            .filter(|j| j.task == task && !j.is_complete())
            .count()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
