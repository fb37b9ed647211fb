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

use anyhow::Result;
use pando::Workspace;
use pando::workspace::MergeReport;
use tempfile::tempdir;

use crate::test_utils::write_file;

#[test]
fn fast_forward_merge_moves_head_without_a_new_snapshot() -> Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    let mut ws = Workspace::init(root, Some("tester".to_string()))?;

    write_file(root, "a.txt", "hello");
    ws.stage(&[PathBuf::from("a.txt")])?;
    ws.snapshot("m1".to_string())?;

    ws.branch_create("b")?;
    ws.checkout("b")?;

    write_file(root, "b.txt", "x");
    ws.stage(&[PathBuf::from("b.txt")])?;
    let c3 = ws.snapshot("m3".to_string())?;

    ws.checkout("master")?;
    let report = ws.merge("b")?;

    match report {
        MergeReport::FastForward(head) => assert_eq!(head, c3),
        _ => panic!("expected a fast-forward merge"),
    }
    assert!(root.join("b.txt").exists());
    assert_eq!(std::fs::read_to_string(root.join("b.txt"))?, "x");

    Ok(())
}
