/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Deadline-miss and overrun handlers.
//!
//! The simulator only detects; what happens next is delegated to a
//! [`MissHandler`]:
//!
//! * `on_miss` is called for every [`DeadlineMiss`] event.
//! * `on_overrun` is called when a task is due for release while an earlier
//!   job of the same task is still pending.
//!
//! [`ObserveOnly`] leaves every job alone and is what the schedulability
//! report uses.  [`EnforcePolicy`] applies the task's effective overrun
//! policy.

use tracing::debug;

use super::DeadlineMiss;
use crate::task::{OverrunPolicy, Task};

/// What the simulator does with the late job after a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissAction {
    /// Keep the job; it competes for the CPU like any unfinished job.
    Continue,
    /// Remove the job from the ready queue without completing it.
    Abort,
}

/// What the simulator does with a release that finds an earlier job of the
/// same task still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseAction {
    Release,
    Skip,
}

pub trait MissHandler {
    fn on_miss(&mut self, task: &Task, policy: OverrunPolicy, miss: &DeadlineMiss) -> MissAction;

    fn on_overrun(&mut self, _task: &Task, _policy: OverrunPolicy, _tick: u64) -> ReleaseAction {
        ReleaseAction::Release
    }
}

/// Detect and log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObserveOnly;

impl MissHandler for ObserveOnly {
    fn on_miss(&mut self, _task: &Task, _policy: OverrunPolicy, _miss: &DeadlineMiss) -> MissAction {
        MissAction::Continue
    }
}

/// Apply the effective overrun policy of the late task.
///
/// | Policy | On miss | On overrun release |
/// |---|---|---|
/// | `Kill` | abort the late job | release |
/// | `Skip` | keep running | skip the new release |
/// | `CatchUp` | keep running | release |
#[derive(Debug, Default, Clone, Copy)]
pub struct EnforcePolicy;

impl MissHandler for EnforcePolicy {
    fn on_miss(&mut self, task: &Task, policy: OverrunPolicy, miss: &DeadlineMiss) -> MissAction {
        let action = match policy {
            OverrunPolicy::Kill => MissAction::Abort,
            OverrunPolicy::Skip | OverrunPolicy::CatchUp => MissAction::Continue,
        };
        debug!(task = %task.name, tick = miss.tick, %policy, ?action, "miss policy applied");
        action
    }

    fn on_overrun(&mut self, task: &Task, policy: OverrunPolicy, tick: u64) -> ReleaseAction {
        let action = match policy {
            OverrunPolicy::Skip => ReleaseAction::Skip,
            OverrunPolicy::Kill | OverrunPolicy::CatchUp => ReleaseAction::Release,
        };
        debug!(task = %task.name, tick, %policy, ?action, "overrun policy applied");
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OverrunPolicy; 3] = [
        OverrunPolicy::Skip,
        OverrunPolicy::Kill,
        OverrunPolicy::CatchUp,
    ];

    fn miss() -> DeadlineMiss {
        DeadlineMiss {
            task: "X".into(),
            tick: 6,
            release: 0,
            absolute_deadline: 5,
        }
    }

    #[test]
    fn observe_only_never_interferes() {
        let task = Task::new("X", 10, 6);
        let mut h = ObserveOnly;
        for policy in ALL {
            assert_eq!(h.on_miss(&task, policy, &miss()), MissAction::Continue);
            assert_eq!(h.on_overrun(&task, policy, 10), ReleaseAction::Release);
        }
    }

    #[test]
    fn enforce_policy_kill_aborts_on_miss() {
        let task = Task::new("X", 10, 6);
        let mut h = EnforcePolicy;
        assert_eq!(h.on_miss(&task, OverrunPolicy::Kill, &miss()), MissAction::Abort);
        assert_eq!(h.on_overrun(&task, OverrunPolicy::Kill, 10), ReleaseAction::Release);
    }

    #[test]
    fn enforce_policy_skip_drops_overrun_release() {
        let task = Task::new("X", 10, 6);
        let mut h = EnforcePolicy;
        assert_eq!(h.on_miss(&task, OverrunPolicy::Skip, &miss()), MissAction::Continue);
        assert_eq!(h.on_overrun(&task, OverrunPolicy::Skip, 10), ReleaseAction::Skip);
    }

    #[test]
    fn enforce_policy_catch_up_lets_everything_run() {
        let task = Task::new("X", 10, 6);
        let mut h = EnforcePolicy;
        assert_eq!(
            h.on_miss(&task, OverrunPolicy::CatchUp, &miss()),
            MissAction::Continue
        );
        assert_eq!(
            h.on_overrun(&task, OverrunPolicy::CatchUp, 10),
            ReleaseAction::Release
        );
    }
}
