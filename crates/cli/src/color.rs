// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use lc_core::EntryStatus;
use std::io::IsTerminal;

pub mod codes {
    /// Section headers: steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Descriptions and context: medium grey
    pub const CONTEXT: u8 = 245;
    pub const SUCCESS: u8 = 108;
    pub const ERROR: u8 = 167;
    pub const RUNNING: u8 = 179;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables, then `COLOR=1` forces, then the TTY check.
pub fn should_colorize() -> bool {
    if crate::env::no_color() {
        return false;
    }
    if crate::env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Build clap `Styles` using the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER)))))
        .literal(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL)))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::CONTEXT)))))
}

fn paint(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("\x1b[38;5;{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn context(text: &str) -> String {
    paint(codes::CONTEXT, text)
}

/// Status label colored by outcome
pub fn status(status: EntryStatus) -> String {
    let code = match status {
        EntryStatus::Success => codes::SUCCESS,
        EntryStatus::Error => codes::ERROR,
        EntryStatus::Running => codes::RUNNING,
    };
    paint(code, &status.to_string())
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
