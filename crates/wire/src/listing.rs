// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plain-text command listings (`<name> <summary>` per line).

use lc_core::ConsoleCommand;

/// Parse help-style listing output into commands.
///
/// Blank lines, section headers (`Commands:`) and option lines (`-h, --help`)
/// are skipped, as are lines with no summary after the name.
pub fn parse_listable_commands(stdout: &str) -> Vec<ConsoleCommand> {
    stdout.lines().filter_map(parse_listable_command).collect()
}

fn parse_listable_command(line: &str) -> Option<ConsoleCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.ends_with(':') || trimmed.starts_with('-') {
        return None;
    }

    let split = trimmed.find(char::is_whitespace)?;
    let (command, summary) = trimmed.split_at(split);
    let command = command.trim();
    let summary = summary.trim();
    if command.is_empty() || summary.is_empty() {
        return None;
    }

    Some(ConsoleCommand::new(command, summary))
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
