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

//! Thin CLI wrapper: every subcommand opens (or initializes) a `Workspace`,
//! acquires the appropriate lock, and delegates to the core API. No core
//! logic lives here.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod branch;
pub mod checkout;
pub mod init;
pub mod log;
pub mod merge;
pub mod snapshot;
pub mod stage;
pub mod status;

#[derive(Parser, Debug)]
#[clap(
    version = env!("CARGO_PKG_VERSION"),
    about = "A decentralized, content-addressed version control tool"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(flatten)]
    pub global_args: GlobalArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[clap(about = "Initialize a new workspace")]
    Init(init::CmdArgs),

    #[clap(about = "Show the working-directory status")]
    Status(status::CmdArgs),

    #[clap(about = "Stage paths for the next snapshot")]
    Stage(stage::CmdArgs),

    #[clap(about = "Create a snapshot from the staged paths")]
    Snapshot(snapshot::CmdArgs),

    #[clap(about = "Create, list, or delete branches")]
    Branch(branch::CmdArgs),

    #[clap(about = "Switch the working directory to another branch")]
    Checkout(checkout::CmdArgs),

    #[clap(about = "Merge another branch into the current one")]
    Merge(merge::CmdArgs),

    #[clap(about = "Show the current branch's snapshot history")]
    Log(log::CmdArgs),
}

#[derive(Parser, Debug)]
pub struct GlobalArgs {
    /// Workspace root. Defaults to the current directory.
    #[clap(short, long, value_parser, default_value = ".")]
    pub root: PathBuf,

    /// Suppress all but error output.
    #[clap(short, long)]
    pub quiet: bool,

    /// Print extra progress detail.
    #[clap(short, long)]
    pub verbose: bool,
}

impl GlobalArgs {
    pub fn apply_verbosity(&self) {
        let level = if self.quiet {
            0
        } else if self.verbose {
            2
        } else {
            1
        };
        crate::global::set_verbosity(level);
    }
}
