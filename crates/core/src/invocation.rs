// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Display-only rendering of a command invocation, e.g.
//! `cargo loco task seed users key:value --environment dev`.

use crate::command::DoctorFlags;
use std::collections::BTreeMap;
use std::fmt;

/// A rendered command line. Never executed; shown in the history.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    const PROGRAM: &'static str = "cargo";
    const SUBCOMMAND: &'static str = "loco";

    fn build(mut args: Vec<String>, environment: Option<&str>) -> Self {
        let mut full = vec![Self::SUBCOMMAND.to_string()];
        full.append(&mut args);
        if let Some(env) = environment {
            full.push("--environment".into());
            full.push(env.to_string());
        }
        Self { program: Self::PROGRAM.into(), args: full }
    }

    pub fn generator(generator: &str, arguments: &[String], environment: Option<&str>) -> Self {
        let mut args = vec!["generate".to_string(), generator.to_string()];
        args.extend(arguments.iter().cloned());
        Self::build(args, environment)
    }

    pub fn task(
        task: &str,
        arguments: &[String],
        params: Option<&BTreeMap<String, String>>,
        environment: Option<&str>,
    ) -> Self {
        let mut args = vec!["task".to_string(), task.to_string()];
        args.extend(arguments.iter().cloned());
        if let Some(params) = params {
            args.extend(params.iter().map(|(key, value)| format!("{key}:{value}")));
        }
        Self::build(args, environment)
    }

    pub fn doctor(flags: DoctorFlags, environment: Option<&str>) -> Self {
        let mut args = vec!["doctor".to_string()];
        for (enabled, flag) in [
            (flags.production, "--production"),
            (flags.config, "--config"),
            (flags.graph, "--graph"),
            (flags.assistant, "--assistant"),
        ] {
            if enabled {
                args.push(flag.into());
            }
        }
        Self::build(args, environment)
    }

    pub fn job_status(job_id: &str, environment: Option<&str>) -> Self {
        let args = vec!["jobs".to_string(), "status".to_string(), job_id.to_string()];
        Self::build(args, environment)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "invocation_tests.rs"]
mod tests;
