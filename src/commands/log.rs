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
use crate::global::defaults::SHORT_CID_DISPLAY_LEN;
use crate::workspace::{LockMode, Workspace};

#[derive(Args, Debug)]
pub struct CmdArgs;

pub fn run(global: &GlobalArgs, _args: &CmdArgs) -> Result<()> {
    let workspace = Workspace::open(&global.root)?;
    let _guard = workspace.lock(LockMode::Shared)?;

    for (cid, snapshot) in workspace.log()? {
        println!(
            "{} {}",
            "snapshot".yellow(),
            cid.to_short_hex(SHORT_CID_DISPLAY_LEN).bold()
        );
        println!("Author: {}", snapshot.author);
        println!("Date:   {}", snapshot.timestamp);
        if snapshot.parents.len() > 1 {
            println!(
                "Merge:  {}",
                snapshot
                    .parents
                    .iter()
                    .map(|p| p.to_short_hex(SHORT_CID_DISPLAY_LEN))
                    .collect::<Vec<_>>()
                    .join(" ")
            );
        }
        println!();
        println!("    {}", snapshot.message);
        println!();
    }

    Ok(())
}
