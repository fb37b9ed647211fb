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
use pando::store::ObjectStore;
use pando::{Cid, Workspace};
use tempfile::tempdir;

use crate::test_utils::write_file;

#[test]
fn linear_history_chains_parents_and_tree_content() -> Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    let mut ws = Workspace::init(root, Some("tester".to_string()))?;

    write_file(root, "a.txt", "hello");
    ws.stage(&[PathBuf::from("a.txt")])?;
    let c1 = ws.snapshot("m1".to_string())?;

    write_file(root, "a.txt", "hello world");
    ws.stage(&[PathBuf::from("a.txt")])?;
    let c2 = ws.snapshot("m2".to_string())?;

    let snapshot2 = ws.store().get_node(&c2)?.as_snapshot().unwrap().clone();
    assert_eq!(snapshot2.parents, vec![c1]);

    let tree2 = ws.store().get_node(&snapshot2.tree)?.as_tree().unwrap().clone();
    let file_cid = tree2.children.get("a.txt").expect("a.txt present in tree");
    let file = ws.store().get_node(file_cid)?.as_file().unwrap().clone();
    assert_eq!(file.link, Cid::from_content(b"hello world"));

    Ok(())
}
