/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Renders a PTL platform `main` C source from a validated [`TaskSet`].
//!
//! The emitted file contains:
//!
//! * one `Job_<name>` function per task that burns `wcet` ms,
//! * a static `PTL_TaskConfig_t` table in declaration order,
//! * a `PTL_GlobalConfig_t` with tracing enabled,
//! * the `PTL_Init` / `PTL_Start` sequence.
//!
//! Tasks without their own overrun policy are written as
//! `PTL_POLICY_USE_GLOBAL` so the runtime resolves them against the global
//! policy the same way [`TaskSet::effective_policy`] does.

use std::fmt::Write as _;

use thiserror::Error;
use tracing::{debug, info};

use ptl_analyzer::task::{Task, TaskSet};

/// `PTL_MAX_TASKS` in `ptl.h`.
pub const PTL_MAX_TASKS: usize = 8;

/// Stack depth in words given to every generated task.
pub const TASK_STACK_DEPTH: u32 = 256;

const USE_GLOBAL_SYMBOL: &str = "PTL_POLICY_USE_GLOBAL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodegenError {
    #[error("PTL supports at most {max} tasks, got {count}")]
    TooManyTasks { count: usize, max: usize },

    #[error("task name '{0}' is not a valid C identifier")]
    InvalidIdentifier(String),

    /// `uxPriority` is unsigned on the target.
    #[error("task '{task}' has negative priority {priority}")]
    NegativePriority { task: String, priority: i32 },

    #[error("failed to format C source")]
    Format(#[from] std::fmt::Error),
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn check(task_set: &TaskSet) -> Result<(), CodegenError> {
    if task_set.len() > PTL_MAX_TASKS {
        return Err(CodegenError::TooManyTasks {
            count: task_set.len(),
            max: PTL_MAX_TASKS,
        });
    }
    for task in task_set.tasks() {
        if !is_c_identifier(&task.name) {
            return Err(CodegenError::InvalidIdentifier(task.name.clone()));
        }
        if task.priority < 0 {
            return Err(CodegenError::NegativePriority {
                task: task.name.clone(),
                priority: task.priority,
            });
        }
    }
    Ok(())
}

fn policy_symbol(task: &Task) -> &'static str {
    task.overrun_policy
        .map_or(USE_GLOBAL_SYMBOL, |p| p.c_symbol())
}

/// Render the complete `main` source for `task_set`.
///
/// # Errors
/// [`CodegenError`] if the set cannot be expressed as a PTL configuration.
pub fn render_main(task_set: &TaskSet) -> Result<String, CodegenError> {
    check(task_set)?;

    let tasks = task_set.tasks();
    let global = task_set.global_policy();
    let mut out = String::new();

    writeln!(out, "/* AUTO-GENERATED BY ptl-codegen. DO NOT EDIT. */")?;
    writeln!(out, "#include \"ptl.h\"")?;
    writeln!(out, "#include \"ptl_trace.h\"")?;
    writeln!(out, "#include \"uart.h\"")?;
    writeln!(out, "#include \"burner.h\"")?;
    writeln!(out)?;
    writeln!(out, "/* --- JOB FUNCTIONS --- */")?;

    for t in tasks {
        writeln!(out)?;
        writeln!(out, "void Job_{}(void *p) {{", t.name)?;
        writeln!(out, "    (void)p;")?;
        writeln!(
            out,
            "    UART_printf(\"[{}] Start (Run: {}ms)\\n\");",
            t.name, t.wcet
        )?;
        writeln!(out, "    Burn({});", t.wcet)?;
        writeln!(out, "    UART_printf(\"[{}] End\\n\");", t.name)?;
        writeln!(out, "}}")?;
    }

    writeln!(out)?;
    writeln!(out, "/* --- CONFIGURATION --- */")?;
    writeln!(out, "int main(void) {{")?;
    writeln!(out, "    UART_init();")?;
    writeln!(
        out,
        "    UART_printf(\"\\n=== AUTO-GENERATED CONFIGURATION ===\\n\");"
    )?;
    writeln!(out, "    UART_printf(\"Global Policy: {}\\n\");", global.c_symbol())?;
    writeln!(out)?;
    writeln!(out, "    static PTL_TaskConfig_t t[] = {{")?;
    for t in tasks {
        let policy = policy_symbol(t);
        debug!(task = %t.name, policy, "emitting task config");
        writeln!(out, "        /* {}: {} */", t.name, policy)?;
        writeln!(
            out,
            "        {{ \"{name}\", pdMS_TO_TICKS({period}), pdMS_TO_TICKS({deadline}), \
             {prio}, {stack}, Job_{name}, NULL, {policy} }},",
            name = t.name,
            period = t.period,
            deadline = t.deadline,
            prio = t.priority,
            stack = TASK_STACK_DEPTH,
        )?;
    }
    writeln!(out, "    }};")?;
    writeln!(out)?;
    writeln!(
        out,
        "    static PTL_GlobalConfig_t c = {{ {}, pdTRUE, {} }};",
        global.c_symbol(),
        tasks.len()
    )?;
    writeln!(out)?;
    writeln!(out, "    if (PTL_Init(&c, t, {}) == pdPASS) {{", tasks.len())?;
    writeln!(out, "        PTL_Start();")?;
    writeln!(out, "    }} else {{")?;
    writeln!(out, "        UART_printf(\"[FATAL] PTL Init Failed!\\n\");")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    /* Only reached if the scheduler fails to start. */")?;
    writeln!(out, "    for (;;) {{}}")?;
    writeln!(out)?;
    writeln!(out, "    return 0;")?;
    writeln!(out, "}}")?;

    info!(
        task_count = tasks.len(),
        global_policy = %global,
        bytes = out.len(),
        "Rendered PTL main source"
    );
    Ok(out)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
