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

#[test]
fn conflicting_edits_to_the_same_line_are_reported_and_leave_state_untouched() -> Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    let mut ws = Workspace::init(root, Some("tester".to_string()))?;

    write_file(root, "a.txt", "line1\nline2\n");
    ws.stage(&[PathBuf::from("a.txt")])?;
    ws.snapshot("m1".to_string())?;
    ws.branch_create("b")?;

    write_file(root, "a.txt", "line1\nMASTER\n");
    ws.stage(&[PathBuf::from("a.txt")])?;
    ws.snapshot("m master".to_string())?;

    ws.checkout("b")?;
    write_file(root, "a.txt", "line1\nBRANCH\n");
    ws.stage(&[PathBuf::from("a.txt")])?;
    ws.snapshot("m branch".to_string())?;

    ws.checkout("master")?;
    let err = ws.merge("b").expect_err("expected a merge conflict");

    match err {
        Error::MergeConflict { paths } => {
            assert_eq!(paths.get(Path::new("a.txt")), Some(&ConflictKind::TextConflict));
        }
        other => panic!("expected MergeConflict, got {other:?}"),
    }

    // The working directory and index are untouched by a failed merge.
    assert_eq!(std::fs::read_to_string(root.join("a.txt"))?, "line1\nMASTER\n");
    let status = ws.status()?;
    assert!(status.modified.is_empty());
    assert!(status.staged.is_empty());

    Ok(())
}
