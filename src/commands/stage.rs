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

use std::path::PathBuf;

use clap::Args;

use crate::commands::GlobalArgs;
use crate::error::Result;
use crate::ui;
use crate::workspace::{LockMode, Workspace};

#[derive(Args, Debug)]
pub struct CmdArgs {
    /// Paths to stage, relative to the workspace root.
    #[clap(value_parser, required = true)]
    pub paths: Vec<PathBuf>,
}

pub fn run(global: &GlobalArgs, args: &CmdArgs) -> Result<()> {
    let mut workspace = Workspace::open(&global.root)?;
    let _guard = workspace.lock(LockMode::Exclusive)?;
    workspace.stage(&args.paths)?;
    ui::log_success(&format!("staged {} path(s)", args.paths.len()));
    Ok(())
}
