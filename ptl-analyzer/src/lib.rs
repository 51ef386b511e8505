/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! PTL analyzer: offline schedulability check and tick-accurate
//! fixed-priority preemptive simulation of a periodic task set.
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task          – Task, TaskSet, OverrunPolicy
//! ├── config/       – YAML task set loader, AnalysisConfig
//! ├── hyperperiod/  – minor / major cycle (GCD / LCM)
//! ├── analysis/     – utilization check, Analyzer pipeline, AnalysisError
//! ├── simulator/    – ready queue, tick loop, miss handlers
//! ├── timeline      – run-length compression of the per-tick schedule
//! └── report        – Report and its text rendering
//! ```

pub mod analysis;
pub mod config;
pub mod hyperperiod;
pub mod report;
pub mod simulator;
pub mod task;
pub mod timeline;
