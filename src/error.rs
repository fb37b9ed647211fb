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

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::global::Cid;

/// Conflict classification for a single path during a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConflictKind {
    TextConflict,
    TypeConflict,
    AddAdd,
    ModDel,
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConflictKind::TextConflict => "TextConflict",
            ConflictKind::TypeConflict => "TypeConflict",
            ConflictKind::AddAdd => "AddAdd",
            ConflictKind::ModDel => "ModDel",
        };
        write!(f, "{s}")
    }
}

/// Every error kind the core can raise. The CLI maps each variant to one of
/// the exit codes documented in the external-interfaces section.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("'{0}' is not a pando workspace (no .pando directory)")]
    NotInitialized(PathBuf),

    #[error("'{0}' is already a pando workspace")]
    AlreadyInitialized(PathBuf),

    #[error("unknown branch '{0}'")]
    UnknownBranch(String),

    #[error("branch '{0}' already exists")]
    BranchExists(String),

    #[error("cannot delete the current branch '{0}'")]
    CannotDeleteCurrentBranch(String),

    #[error("workspace is dirty: {} modified, {} staged but not snapshotted", modified.len(), unsnapshot.len())]
    DirtyWorkspace {
        modified: Vec<PathBuf>,
        unsnapshot: Vec<PathBuf>,
    },

    #[error("nothing staged to snapshot")]
    NothingToSnapshot,

    #[error("merge conflict in {} path(s)", paths.len())]
    MergeConflict { paths: BTreeMap<PathBuf, ConflictKind> },

    #[error("object {0} is corrupt")]
    CorruptObject(Cid),

    #[error("object {0} is missing from the store")]
    MissingObject(Cid),

    #[error("path '{0}' escapes the workspace root")]
    PathOutsideWorkspace(PathBuf),

    #[error("path '{0}' is both a file and a directory prefix")]
    PathIsFile(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not acquire the workspace lock")]
    LockHeld,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes from the CLI surface: 0 success, 1 user error, 2 merge
/// conflict, 3 internal error.
impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::NotInitialized(_)
            | Error::AlreadyInitialized(_)
            | Error::UnknownBranch(_)
            | Error::BranchExists(_)
            | Error::CannotDeleteCurrentBranch(_)
            | Error::DirtyWorkspace { .. }
            | Error::NothingToSnapshot
            | Error::PathOutsideWorkspace(_)
            | Error::PathIsFile(_) => 1,
            Error::MergeConflict { .. } => 2,
            Error::CorruptObject(_)
            | Error::MissingObject(_)
            | Error::Io(_)
            | Error::LockHeld => 3,
        }
    }
}
