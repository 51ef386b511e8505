/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error type for the analysis pipeline.
//!
//! Only structural problems are errors.  Overload and deadline misses are
//! results: they are carried inside the [`Report`](crate::report::Report) so
//! a caller still gets the computed numbers for diagnostics.
//!
//! | Variant | Raised by | When |
//! |---|---|---|
//! | `InvalidTaskSet` | [`TaskSet::new`] | empty task list |
//! | `InvalidTask` | [`TaskSet::new`], YAML loader | non-positive timing field, blank or duplicate name |
//! | `Hyperperiod` | [`Analyzer::analyze`] | LCM overflow, hyperperiod above the simulation limit |
//!
//! [`TaskSet::new`]: crate::task::TaskSet::new
//! [`Analyzer::analyze`]: super::Analyzer::analyze

use thiserror::Error;

use crate::hyperperiod::HyperperiodError;

/// Top-level error type returned while building or analysing a task set.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The task list was empty, so there are no periods to reduce.
    #[error("no tasks provided: task set is empty")]
    InvalidTaskSet,

    /// A single task failed structural validation.
    #[error("task '{task}' is invalid: {reason}")]
    InvalidTask { task: String, reason: String },

    /// Minor/major cycle could not be computed or is too large to simulate.
    #[error("cycle analysis failed")]
    Hyperperiod(#[from] HyperperiodError),
}
