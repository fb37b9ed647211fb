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

use crate::commands::GlobalArgs;
use crate::error::{Error, Result};
use crate::global::defaults::SHORT_CID_DISPLAY_LEN;
use crate::ui;
use crate::workspace::{LockMode, MergeReport, Workspace};

#[derive(Args, Debug)]
pub struct CmdArgs {
    /// Branch to merge into the current branch.
    pub branch: String,
}

pub fn run(global: &GlobalArgs, args: &CmdArgs) -> Result<()> {
    let mut workspace = Workspace::open(&global.root)?;
    let _guard = workspace.lock(LockMode::Exclusive)?;

    let bar = ui::spinner(&format!("merging '{}'", args.branch));
    let result = workspace.merge(&args.branch);
    bar.finish_and_clear();

    match result {
        Ok(MergeReport::AlreadyUpToDate) => {
            ui::log_info("already up to date");
            Ok(())
        }
        Ok(MergeReport::FastForward(cid)) => {
            ui::log_success(&format!(
                "fast-forwarded to {}",
                cid.to_short_hex(SHORT_CID_DISPLAY_LEN)
            ));
            Ok(())
        }
        Ok(MergeReport::Merged(cid)) => {
            ui::log_success(&format!(
                "created merge snapshot {}",
                cid.to_short_hex(SHORT_CID_DISPLAY_LEN)
            ));
            Ok(())
        }
        Err(Error::MergeConflict { paths }) => {
            ui::log_warning(&format!("merge conflict in {} path(s):", paths.len()));
            for (path, kind) in &paths {
                eprintln!("  {} ({kind})", path.display());
            }
            Err(Error::MergeConflict { paths })
        }
        Err(other) => Err(other),
    }
}
