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

//! Working-directory reconciliation: diffs two tree roots and applies the
//! delta to the workdir. Used by both `checkout` and the fast-forward path
//! of `merge`.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::global::Cid;
use crate::objects::{Object, Tree};
use crate::store::ObjectStore;
use crate::workdir::Workdir;

/// Resolves an optional tree-root CID into its `Tree`, treating `None` as
/// the empty tree (an unborn branch, or the state before the first snapshot).
pub fn load_tree(store: &dyn ObjectStore, cid: Option<&Cid>) -> Result<Option<Tree>> {
    match cid {
        None => Ok(None),
        Some(cid) => {
            let node = store.get_node(cid)?;
            Ok(node.as_tree().cloned())
        }
    }
}

/// Recursively writes every `File` leaf reachable from `cid` to the working
/// directory, rooted at `prefix`.
fn write_subtree(store: &dyn ObjectStore, workdir: &dyn Workdir, cid: &Cid, prefix: &Path) -> Result<()> {
    match store.get_node(cid)? {
        Object::Tree(tree) => {
            workdir.mkdir(prefix)?;
            for (name, child) in &tree.children {
                write_subtree(store, workdir, child, &prefix.join(name))?;
            }
            Ok(())
        }
        Object::File(file) => {
            let bytes = store.download(&file.link)?;
            workdir.write(prefix, &bytes)
        }
        Object::Snapshot(_) => unreachable!("tree links never point at a snapshot"),
    }
}

/// Diffs `base` against `new` (both possibly the empty tree) and applies the
/// delta to `workdir`, walking both trees in lockstep by child name.
pub fn apply_tree_diff(
    store: &dyn ObjectStore,
    workdir: &dyn Workdir,
    base: Option<&Tree>,
    new: Option<&Tree>,
    prefix: &Path,
) -> Result<()> {
    let empty = std::collections::BTreeMap::new();
    let base_children = base.map(|t| &t.children).unwrap_or(&empty);
    let new_children = new.map(|t| &t.children).unwrap_or(&empty);

    let mut names: Vec<&String> = base_children.keys().chain(new_children.keys()).collect();
    names.sort();
    names.dedup();

    for name in names {
        let child_path = prefix.join(name);
        let base_cid = base_children.get(name);
        let new_cid = new_children.get(name);

        match (base_cid, new_cid) {
            (None, Some(new_cid)) => write_subtree(store, workdir, new_cid, &child_path)?,
            (Some(_), None) => workdir.remove(&child_path)?,
            (Some(base_cid), Some(new_cid)) if base_cid == new_cid => { /* unchanged */ }
            (Some(base_cid), Some(new_cid)) => {
                let base_node = store.get_node(base_cid)?;
                let new_node = store.get_node(new_cid)?;
                match (&base_node, &new_node) {
                    (Object::File(_), Object::File(new_file)) => {
                        let bytes = store.download(&new_file.link)?;
                        workdir.write(&child_path, &bytes)?;
                    }
                    (Object::Tree(base_tree), Object::Tree(new_tree)) => {
                        apply_tree_diff(store, workdir, Some(base_tree), Some(new_tree), &child_path)?;
                    }
                    _ => {
                        // kind mismatch: remove the base side entirely, then
                        // write the new side fresh.
                        workdir.remove(&child_path)?;
                        write_subtree(store, workdir, new_cid, &child_path)?;
                    }
                }
            }
            (None, None) => unreachable!("name came from one of the two child maps"),
        }
    }

    Ok(())
}

/// Flattens a tree root (or the empty tree) into its path -> file-CID map,
/// the shape `Index::reinitialize` and `store::flatten_tree` both expect.
pub fn flatten(store: &dyn ObjectStore, root: Option<&Cid>) -> Result<std::collections::BTreeMap<PathBuf, Cid>> {
    crate::store::flatten_tree(store, root)
}
