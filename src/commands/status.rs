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

use clap::Args;
use colored::Colorize;

use crate::commands::GlobalArgs;
use crate::error::Result;
use crate::workspace::{LockMode, Workspace};

#[derive(Args, Debug)]
pub struct CmdArgs;

pub fn run(global: &GlobalArgs, _args: &CmdArgs) -> Result<()> {
    let mut workspace = Workspace::open(&global.root)?;
    let _guard = workspace.lock(LockMode::Shared)?;
    let report = workspace.status()?;

    println!("On branch {}", workspace.current_branch()?.bold());

    print_set("Staged", &report.staged, |s| s.green());
    print_set("Modified", &report.modified, |s| s.yellow());
    print_set("Untracked", &report.untracked, |s| s.red());
    print_set("Deleted", &report.deleted, |s| s.red());

    Ok(())
}

fn print_set(
    label: &str,
    paths: &[std::path::PathBuf],
    color: impl Fn(&str) -> colored::ColoredString,
) {
    if paths.is_empty() {
        return;
    }
    println!("{label}:");
    for path in paths {
        println!("  {}", color(&path.display().to_string()));
    }
}
