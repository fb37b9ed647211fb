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

use clap::{Args, Subcommand};
use colored::Colorize;

use crate::commands::GlobalArgs;
use crate::error::Result;
use crate::ui;
use crate::workspace::{LockMode, Workspace};

#[derive(Args, Debug)]
pub struct CmdArgs {
    #[command(subcommand)]
    pub action: Action,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Create a new branch pointing at the current head.
    Create { name: String },
    /// List every branch, marking the current one.
    List,
    /// Delete a branch (forbidden for the current branch).
    Delete { name: String },
}

pub fn run(global: &GlobalArgs, args: &CmdArgs) -> Result<()> {
    let workspace = Workspace::open(&global.root)?;
    let mode = match args.action {
        Action::List => LockMode::Shared,
        _ => LockMode::Exclusive,
    };
    let _guard = workspace.lock(mode)?;

    match &args.action {
        Action::Create { name } => {
            workspace.branch_create(name)?;
            ui::log_success(&format!("created branch '{name}'"));
        }
        Action::List => {
            let current = workspace.current_branch()?;
            for name in workspace.branch_list()? {
                if name == current {
                    println!("* {}", name.bold().green());
                } else {
                    println!("  {name}");
                }
            }
        }
        Action::Delete { name } => {
            workspace.branch_delete(name)?;
            ui::log_success(&format!("deleted branch '{name}'"));
        }
    }

    Ok(())
}
