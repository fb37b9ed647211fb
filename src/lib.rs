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

pub mod branch;
pub mod checkout;
pub mod commands;
pub mod dag;
pub mod error;
pub mod global;
pub mod index;
pub mod merge;
pub mod objects;
pub mod store;
pub mod textmerge;
pub mod treebuilder;
pub mod ui;
pub mod utils;
pub mod workdir;
pub mod workspace;

pub use error::{ConflictKind, Error, Result};
pub use global::Cid;
pub use workspace::Workspace;
