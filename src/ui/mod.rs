/*
 * pando is a decentralized, content-addressed version-control core
 * Copyright (C) 2026  Javier Lancha Vázquez <javier.lancha@gmail.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

//! Plain progress lines and severity-coded log helpers, gated on the
//! process-wide verbosity level set once from the CLI's global flags. Never
//! consulted for anything that affects core semantics.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::global::global_opts;

/// Quiet suppresses everything but errors and conflict reports; Normal is
/// the CLI default; Verbose additionally prints per-step progress spinners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl From<u32> for Verbosity {
    fn from(level: u32) -> Self {
        match level {
            0 => Verbosity::Quiet,
            1 => Verbosity::Normal,
            _ => Verbosity::Verbose,
        }
    }
}

fn verbosity() -> Verbosity {
    Verbosity::from(global_opts().verbosity)
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        if $crate::ui::verbosity_at_least($crate::ui::Verbosity::Normal) {
            println!($($arg)*)
        }
    };
}
pub use log;

pub fn verbosity_at_least(level: Verbosity) -> bool {
    verbosity() >= level
}

pub fn log_success(str: &str) {
    if verbosity_at_least(Verbosity::Normal) {
        println!("{}: {}", "Success".bold().green(), str);
    }
}

pub fn log_info(str: &str) {
    if verbosity_at_least(Verbosity::Normal) {
        println!("{}: {}", "Info".bold().cyan(), str);
    }
}

pub fn log_warning(str: &str) {
    eprintln!("{}: {}", "Warning".bold().yellow(), str);
}

pub fn log_error(str: &str) {
    eprintln!("{}: {}", "Error".bold().red(), str);
}

/// A cosmetic spinner shown around a long-running reconciliation (checkout,
/// merge). Purely decorative: hidden entirely at `Quiet` verbosity, and the
/// operation it wraps never depends on its state.
pub fn spinner(message: &str) -> ProgressBar {
    let target = if verbosity_at_least(Verbosity::Normal) {
        ProgressDrawTarget::stderr()
    } else {
        ProgressDrawTarget::hidden()
    };
    let bar = ProgressBar::with_draw_target(None, target);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(std::time::Duration::from_millis(80));
    bar
}
