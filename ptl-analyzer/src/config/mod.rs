/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Task set loading and analysis settings.
//!
//! The expected YAML structure is:
//! ```yaml
//! global_policy: skip        # skip | kill | catch_up (default: skip)
//! tasks:
//!   - name: Sensor
//!     period: 10             # ms
//!     wcet: 2                # ms
//!     deadline: 8            # optional, 0 or absent = period
//!     priority: 3            # optional, default 1
//!     policy: kill           # optional, absent = global policy
//!   - period: 20             # blank name becomes "Task_2"
//!     wcet: 5
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::analysis::AnalysisError;
use crate::hyperperiod::DEFAULT_HYPERPERIOD_LIMIT;
use crate::simulator::{EnforcePolicy, MissHandler, ObserveOnly};
use crate::task::{OverrunPolicy, Task, TaskSet};

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskSetFile {
    #[serde(default)]
    global_policy: OverrunPolicy,
    #[serde(default)]
    tasks: Vec<TaskEntry>,
}

/// Per-task fields as they appear in the YAML file.
///
/// Timing fields are signed so that negative input reaches validation and
/// is reported as [`AnalysisError::InvalidTask`] instead of a parse error.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskEntry {
    #[serde(default)]
    name: Option<String>,
    period: i64,
    wcet: i64,
    #[serde(default)]
    deadline: Option<i64>,
    #[serde(default)]
    priority: Option<i32>,
    #[serde(default)]
    policy: Option<OverrunPolicy>,
}

impl TaskEntry {
    /// Apply collector defaults and convert to a [`Task`].
    ///
    /// `position` is 1-based and only used for the `Task_<n>` fallback name.
    fn into_task(self, position: usize) -> Result<Task, AnalysisError> {
        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            _ => format!("Task_{position}"),
        };

        let period = positive(&name, "period", self.period)?;
        let wcet = positive(&name, "wcet", self.wcet)?;
        let deadline = match self.deadline {
            None | Some(0) => period,
            Some(d) => positive(&name, "deadline", d)?,
        };

        Ok(Task {
            name,
            period,
            wcet,
            deadline,
            priority: self.priority.unwrap_or(1),
            overrun_policy: self.policy,
        })
    }
}

fn positive(task: &str, field: &str, value: i64) -> Result<u64, AnalysisError> {
    u64::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| AnalysisError::InvalidTask {
            task: task.to_string(),
            reason: format!("{field} must be positive (got {value})"),
        })
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Parse a task set from YAML text.
///
/// # Errors
/// Malformed YAML, or any [`AnalysisError`] raised while building the
/// [`TaskSet`] (recoverable with `downcast_ref::<AnalysisError>()`).
pub fn parse_task_set(content: &str) -> Result<TaskSet> {
    let file: TaskSetFile = serde_yaml::from_str(content).context("Failed to parse task set YAML")?;

    let tasks = file
        .tasks
        .into_iter()
        .enumerate()
        .map(|(i, entry)| entry.into_task(i + 1))
        .collect::<Result<Vec<_>, _>>()?;

    for t in &tasks {
        debug!(
            "  Task: {} | T={}ms C={}ms D={}ms | prio={} | policy={}",
            t.name,
            t.period,
            t.wcet,
            t.deadline,
            t.priority,
            t.overrun_policy
                .map_or_else(|| "GLOBAL".to_string(), |p| p.to_string()),
        );
    }

    let set = TaskSet::new(tasks, file.global_policy)?;
    Ok(set)
}

/// Read and parse the task set file at `path`.
pub fn load_task_set(path: &Path) -> Result<TaskSet> {
    info!("Loading task set from: {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot open task set file: {}", path.display()))?;

    let set = parse_task_set(&content)
        .with_context(|| format!("Invalid task set file: {}", path.display()))?;

    info!(
        task_count = set.len(),
        global_policy = %set.global_policy(),
        "Successfully loaded task set"
    );
    Ok(set)
}

// ── Analysis settings ─────────────────────────────────────────────────────────

/// How the simulator reacts to deadline misses and overrun releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissMode {
    /// Detect and report only.
    #[default]
    Observe,
    /// Apply each task's effective overrun policy.
    Enforce,
}

impl MissMode {
    pub fn handler(self) -> Box<dyn MissHandler> {
        match self {
            MissMode::Observe => Box::new(ObserveOnly),
            MissMode::Enforce => Box::new(EnforcePolicy),
        }
    }
}

/// Process-level settings handed to the [`Analyzer`](crate::analysis::Analyzer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Largest major cycle the simulator will replay, in ticks.
    pub max_hyperperiod: u64,
    pub miss_mode: MissMode,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_hyperperiod: DEFAULT_HYPERPERIOD_LIMIT,
            miss_mode: MissMode::default(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
