/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use ptl_analyzer::analysis::{self, AnalysisError};
use ptl_analyzer::config::load_task_set;
use ptl_analyzer::hyperperiod::HyperperiodError;
use ptl_codegen::render_main;

/// Generate a PTL `main` C source from a task set file.
///
/// The task set is analysed first; an unschedulable set is refused unless
/// `--force` is given.
///
/// Example:
///   ptl-codegen --taskset tasks.yaml --output main_gen.c
#[derive(Debug, Parser)]
#[command(
    name = "ptl-codegen",
    about = "Emit PTL platform C source from a task set",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML task set file.
    #[arg(short = 't', long = "taskset")]
    taskset: PathBuf,

    /// Destination of the generated C source.
    #[arg(short = 'o', long = "output", default_value = "main_gen.c")]
    output: PathBuf,

    /// Generate even if the set is overloaded, misses deadlines or has a
    /// hyperperiod too large to simulate.
    #[arg(long = "force", default_value_t = false)]
    force: bool,
}

fn generate(taskset: &Path, output: &Path, force: bool) -> Result<()> {
    let task_set = load_task_set(taskset)?;

    match analysis::analyze(&task_set) {
        Ok(report) if report.is_schedulable() => {}
        Ok(report) => {
            if !force {
                bail!(
                    "task set is not schedulable (overloaded: {}, deadline misses: {}); \
                     use --force to generate anyway",
                    report.overloaded,
                    report.deadline_misses.len()
                );
            }
            warn!(
                overloaded = report.overloaded,
                deadline_misses = report.deadline_misses.len(),
                "Generating code for an unschedulable task set (--force)"
            );
        }
        Err(AnalysisError::Hyperperiod(HyperperiodError::TooLarge { value, limit })) if force => {
            warn!(
                major_cycle = value,
                limit, "Hyperperiod too large to simulate; generating unverified code (--force)"
            );
        }
        Err(e) => {
            let context = format!("Analysis of {} failed", taskset.display());
            return Err(anyhow::Error::new(e).context(context));
        }
    }

    let source = render_main(&task_set)?;
    std::fs::write(output, source)
        .with_context(|| format!("Cannot write generated source: {}", output.display()))?;

    info!("Code generated: {}", output.display());
    Ok(())
}

fn main() {
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
        taskset = %cli.taskset.display(),
        output  = %cli.output.display(),
        force   = cli.force,
        "Configuration"
    );

    if let Err(e) = generate(&cli.taskset, &cli.output, cli.force) {
        error!("{:#}", e);
        process::exit(1);
    }
}
