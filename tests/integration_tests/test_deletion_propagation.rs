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
use pando::store::ObjectStore;
use pando::workspace::MergeReport;
use pando::Workspace;
use tempfile::tempdir;

use crate::test_utils::write_file;

#[test]
fn a_deletion_on_one_branch_propagates_cleanly_into_the_other() -> Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    let mut ws = Workspace::init(root, Some("tester".to_string()))?;

    write_file(root, "x.txt", "x");
    ws.stage(&[PathBuf::from("x.txt")])?;
    ws.snapshot("m1".to_string())?;
    ws.branch_create("b")?;

    ws.checkout("b")?;
    std::fs::remove_file(root.join("x.txt"))?;
    ws.stage(&[PathBuf::from("x.txt")])?;
    ws.snapshot("delete x".to_string())?;

    ws.checkout("master")?;
    assert!(root.join("x.txt").exists());

    // `master` never moved past the fork point, so merging `b` in is a
    // fast-forward: no new merge snapshot, the head just advances to `b`'s.
    let report = ws.merge("b")?;
    let new_head = match report {
        MergeReport::FastForward(cid) => cid,
        other => panic!("expected a fast-forward, got a {other:?}"),
    };

    let tree = ws.store().get_node(&new_head)?.as_snapshot().unwrap().tree.clone();
    let flattened = pando::checkout::flatten(ws.store(), Some(&tree))?;
    assert!(!flattened.contains_key(Path::new("x.txt")));
    assert!(!root.join("x.txt").exists());

    Ok(())
}
