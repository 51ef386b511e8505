/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use ptl_analyzer::analysis::Analyzer;
use ptl_analyzer::config::{load_task_set, AnalysisConfig, MissMode};
use ptl_analyzer::hyperperiod::DEFAULT_HYPERPERIOD_LIMIT;
use ptl_analyzer::report::Report;

// ── CLI argument definition ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Yaml,
}

/// PTL schedulability analyzer.
///
/// Example:
///   ptl-analyzer --taskset tasks.yaml --format yaml --enforce-policy
#[derive(Debug, Parser)]
#[command(
    name = "ptl-analyzer",
    about = "Offline schedulability analysis and schedule simulation for PTL task sets",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML task set file.
    #[arg(short = 't', long = "taskset")]
    taskset: PathBuf,

    /// Report format written to stdout.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Apply each task's overrun policy in the simulation instead of only
    /// reporting misses.
    #[arg(short = 'e', long = "enforce-policy", default_value_t = false)]
    enforce_policy: bool,

    /// Largest hyperperiod (ticks) that will be simulated.
    #[arg(short = 'm', long = "max-hyperperiod", default_value_t = DEFAULT_HYPERPERIOD_LIMIT)]
    max_hyperperiod: u64,
}

impl Cli {
    fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            max_hyperperiod: self.max_hyperperiod,
            miss_mode: if self.enforce_policy {
                MissMode::Enforce
            } else {
                MissMode::Observe
            },
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn run(cli: &Cli) -> Result<Report> {
    let task_set = load_task_set(&cli.taskset)?;
    let report = Analyzer::new(cli.analysis_config())
        .analyze(&task_set)
        .with_context(|| format!("Analysis of {} failed", cli.taskset.display()))?;

    match cli.format {
        Format::Text => print!("{report}"),
        Format::Yaml => {
            let yaml = serde_yaml::to_string(&report).context("Failed to serialise report")?;
            print!("{yaml}");
        }
    }
    Ok(report)
}

fn main() {
    // Logs go to stderr so the report on stdout stays machine-readable.
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!(
        taskset         = %cli.taskset.display(),
        format          = ?cli.format,
        enforce_policy  = cli.enforce_policy,
        max_hyperperiod = cli.max_hyperperiod,
        "Configuration"
    );

    match run(&cli) {
        Ok(report) if report.is_schedulable() => {
            info!("Task set is schedulable");
        }
        Ok(report) => {
            info!(
                overloaded = report.overloaded,
                deadline_misses = report.deadline_misses.len(),
                "Task set is NOT schedulable"
            );
            process::exit(2);
        }
        Err(e) => {
            error!("{:#}", e);
            process::exit(1);
        }
    }
}
