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
fn divergent_branches_produce_a_merge_snapshot_with_both_parents() -> Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    let mut ws = Workspace::init(root, Some("tester".to_string()))?;

    write_file(root, "a.txt", "hello");
    ws.stage(&[PathBuf::from("a.txt")])?;
    ws.snapshot("m1".to_string())?;
    ws.branch_create("b")?;

    write_file(root, "m.txt", "M");
    ws.stage(&[PathBuf::from("m.txt")])?;
    let c4 = ws.snapshot("m4".to_string())?;

    ws.checkout("b")?;
    write_file(root, "o.txt", "O");
    ws.stage(&[PathBuf::from("o.txt")])?;
    let c5 = ws.snapshot("m5".to_string())?;

    ws.checkout("master")?;
    let report = ws.merge("b")?;

    let merged_cid = match report {
        MergeReport::Merged(cid) => cid,
        _ => panic!("expected a recursive merge"),
    };

    let merge_snapshot = ws.store().get_node(&merged_cid)?.as_snapshot().unwrap().clone();
    assert_eq!(merge_snapshot.parents, vec![c4, c5]);

    let flattened = pando::checkout::flatten(ws.store(), Some(&merge_snapshot.tree))?;
    assert_eq!(flattened.len(), 3);
    assert!(flattened.contains_key(Path::new("a.txt")));
    assert!(flattened.contains_key(Path::new("m.txt")));
    assert!(flattened.contains_key(Path::new("o.txt")));

    assert!(root.join("m.txt").exists());
    assert!(root.join("o.txt").exists());

    Ok(())
}
