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

use std::path::{Path, PathBuf};

use anyhow::Result;
use pando::{ConflictKind, Error, Workspace};
use tempfile::tempdir;

use crate::test_utils::write_file;

/// `p` diverges on both sides from the common ancestor: master keeps it a
/// file but edits its content, while `b` replaces it with a directory. A
/// kind mismatch is a conflict whenever both `o` and `d` exist and disagree
/// on file-vs-tree, even if one side left `p` byte-identical to the base.
#[test]
fn a_file_turned_into_a_directory_on_one_side_conflicts() -> Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    let mut ws = Workspace::init(root, Some("tester".to_string()))?;

    write_file(root, "p", "original");
    ws.stage(&[PathBuf::from("p")])?;
    ws.snapshot("m1".to_string())?;
    ws.branch_create("b")?;

    write_file(root, "p", "master-version");
    ws.stage(&[PathBuf::from("p")])?;
    ws.snapshot("m master".to_string())?;

    ws.checkout("b")?;
    std::fs::remove_file(root.join("p"))?;
    ws.stage(&[PathBuf::from("p")])?;
    write_file(root, "p/q", "q contents");
    ws.stage(&[PathBuf::from("p/q")])?;
    ws.snapshot("m branch".to_string())?;

    ws.checkout("master")?;
    let err = ws.merge("b").expect_err("expected a merge conflict");

    match err {
        Error::MergeConflict { paths } => {
            assert_eq!(paths.get(Path::new("p")), Some(&ConflictKind::TypeConflict));
        }
        other => panic!("expected MergeConflict, got {other:?}"),
    }

    Ok(())
}
