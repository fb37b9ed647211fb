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

/// Hex characters of a CID shown in human-facing log/status output.
pub const SHORT_CID_DISPLAY_LEN: usize = 8;

pub const DEFAULT_VERBOSITY: u32 = 1;

/// Name of the branch created by `init`.
pub const DEFAULT_BRANCH: &str = "master";

pub const METADATA_DIR: &str = ".pando";
pub const OBJECT_STORE_DIR: &str = "ipfs";
pub const BRANCHES_DIR: &str = "branches";
pub const INDEX_FILE: &str = "index";
pub const CURRENT_FILE: &str = "current";
pub const CONFIG_FILE: &str = "config";
pub const LOCK_FILE: &str = "lock";

/// Environment variable consulted for a default snapshot author when no
/// explicit author is configured at `init` time.
pub const AUTHOR_ENV_VAR: &str = "PANDO_AUTHOR";
