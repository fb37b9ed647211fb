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

//! Three-way recursive tree merge. `merge_trees` is the structural half;
//! `textmerge::merge3` is invoked once per conflicting file for the
//! line-level half. Neither side ever mutates the working directory or
//! branch heads directly -- callers in `workspace` apply the outcome.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConflictKind, Result};
use crate::global::Cid;
use crate::objects::{File, Object, Tree};
use crate::store::ObjectStore;
use crate::textmerge;

/// Outcome of a three-way tree merge: either a new tree root with no
/// conflicts, or the full set of conflicting paths (in which case no tree
/// was written and nothing should be applied).
pub enum MergeOutcome {
    Clean(Cid),
    Conflict(BTreeMap<PathBuf, ConflictKind>),
}

/// Resolves one of the three legs (origin/dest/base) into a Tree only when
/// present; `None` is treated as the empty tree throughout this module,
/// matching the documented `NoCommonAncestor` policy.
fn as_tree<'a>(node: &'a Option<Object>) -> Option<&'a Tree> {
    node.as_ref().and_then(Object::as_tree)
}

fn load(store: &dyn ObjectStore, cid: Option<&Cid>) -> Result<Option<Object>> {
    match cid {
        None => Ok(None),
        Some(cid) => Ok(Some(store.get_node(cid)?)),
    }
}

/// Whether `a` and `b` name objects of the same kind (both trees or both
/// files). Identical CIDs are trivially the same kind without a store
/// round-trip; used by `merge_node`'s unchanged-side shortcuts to catch a
/// kind change on the *other* side before taking it wholesale.
fn same_kind(store: &dyn ObjectStore, a: &Cid, b: &Cid) -> Result<bool> {
    if a == b {
        return Ok(true);
    }
    let a_node = store.get_node(a)?;
    let b_node = store.get_node(b)?;
    Ok(a_node.is_tree() == b_node.is_tree())
}

/// Recursively merges the subtree rooted at `prefix`. Returns `Ok(Some(cid))`
/// for a surviving (possibly-unchanged) entry, `Ok(None)` for a clean
/// deletion, appending to `conflicts` whenever a cell can't be resolved.
/// Conflicted cells contribute nothing to the parent's children map; the
/// caller only trusts the returned tree cid when `conflicts` is empty once
/// the whole walk finishes.
#[allow(clippy::too_many_arguments)]
fn merge_node(
    store: &dyn ObjectStore,
    origin: Option<&Cid>,
    dest: Option<&Cid>,
    base: Option<&Cid>,
    prefix: &Path,
    conflicts: &mut BTreeMap<PathBuf, ConflictKind>,
) -> Result<Option<Cid>> {
    match (base, origin, dest) {
        (None, None, Some(d)) => Ok(Some(d.clone())),
        (None, Some(o), None) => Ok(Some(o.clone())),
        (None, Some(o), Some(d)) => {
            if o == d {
                Ok(Some(o.clone()))
            } else {
                conflicts.insert(prefix.to_path_buf(), ConflictKind::AddAdd);
                Ok(None)
            }
        }
        (Some(l), Some(o), Some(d)) => {
            if o == l && d == l {
                return Ok(Some(l.clone()));
            }
            if o == l {
                if !same_kind(store, l, d)? {
                    conflicts.insert(prefix.to_path_buf(), ConflictKind::TypeConflict);
                    return Ok(None);
                }
                return Ok(Some(d.clone()));
            }
            if d == l {
                if !same_kind(store, l, o)? {
                    conflicts.insert(prefix.to_path_buf(), ConflictKind::TypeConflict);
                    return Ok(None);
                }
                return Ok(Some(o.clone()));
            }
            if o == d {
                return Ok(Some(o.clone()));
            }
            merge_diverged(store, o, d, l, prefix, conflicts)
        }
        (Some(l), None, Some(d)) if d == l => Ok(None),
        (Some(l), Some(o), None) if o == l => Ok(None),
        (Some(_), None, Some(_)) => {
            conflicts.insert(prefix.to_path_buf(), ConflictKind::ModDel);
            Ok(None)
        }
        (Some(_), Some(_), None) => {
            conflicts.insert(prefix.to_path_buf(), ConflictKind::ModDel);
            Ok(None)
        }
        (Some(_), None, None) => Ok(None),
        (None, None, None) => unreachable!("name came from one of the three child maps"),
    }
}

/// Handles the cell where both sides changed `base` differently (and not to
/// the same value): either both are trees (recurse) or both are files
/// (3-way text merge); a file/tree kind mismatch is always a conflict.
fn merge_diverged(
    store: &dyn ObjectStore,
    o: &Cid,
    d: &Cid,
    l: &Cid,
    prefix: &Path,
    conflicts: &mut BTreeMap<PathBuf, ConflictKind>,
) -> Result<Option<Cid>> {
    let o_node = store.get_node(o)?;
    let d_node = store.get_node(d)?;
    let l_node = store.get_node(l)?;

    match (&o_node, &d_node) {
        (Object::Tree(o_tree), Object::Tree(d_tree)) => {
            let l_tree = l_node.as_tree();
            let merged = merge_trees_inner(store, Some(o_tree), Some(d_tree), l_tree, prefix, conflicts)?;
            Ok(merged)
        }
        (Object::File(o_file), Object::File(d_file)) => {
            let l_file = l_node.as_file();
            let origin_bytes = store.download(&o_file.link)?;
            let dest_bytes = store.download(&d_file.link)?;
            let base_bytes = match l_file {
                Some(f) => store.download(&f.link)?,
                None => Vec::new(),
            };

            let merged = textmerge::merge3(&origin_bytes, &base_bytes, &dest_bytes);
            if merged.conflict {
                conflicts.insert(prefix.to_path_buf(), ConflictKind::TextConflict);
                return Ok(None);
            }

            let link = store.put(&merged.bytes)?;
            let cid = store.put_object(&Object::File(File {
                path: prefix.to_string_lossy().to_string(),
                link,
            }))?;
            Ok(Some(cid))
        }
        _ => {
            conflicts.insert(prefix.to_path_buf(), ConflictKind::TypeConflict);
            Ok(None)
        }
    }
}

fn merge_trees_inner(
    store: &dyn ObjectStore,
    origin: Option<&Tree>,
    dest: Option<&Tree>,
    base: Option<&Tree>,
    prefix: &Path,
    conflicts: &mut BTreeMap<PathBuf, ConflictKind>,
) -> Result<Option<Cid>> {
    let empty = BTreeMap::new();
    let origin_children = origin.map(|t| &t.children).unwrap_or(&empty);
    let dest_children = dest.map(|t| &t.children).unwrap_or(&empty);
    let base_children = base.map(|t| &t.children).unwrap_or(&empty);

    let mut names: Vec<&String> = origin_children
        .keys()
        .chain(dest_children.keys())
        .chain(base_children.keys())
        .collect();
    names.sort();
    names.dedup();

    let mut merged_children = BTreeMap::new();
    for name in names {
        let child_path = prefix.join(name);
        let result = merge_node(
            store,
            origin_children.get(name),
            dest_children.get(name),
            base_children.get(name),
            &child_path,
            conflicts,
        )?;
        if let Some(cid) = result {
            merged_children.insert(name.clone(), cid);
        }
    }

    let tree = Tree {
        path: prefix.to_string_lossy().to_string(),
        children: merged_children,
    };
    Ok(Some(store.put_object(&Object::Tree(tree))?))
}

/// Three-way merges the tree roots `origin` (current head) and `dest`
/// (other head) against `base` (their LCA, or `None` if they share none).
/// Any of the three may be `None` (the empty tree).
pub fn merge_trees(
    store: &dyn ObjectStore,
    origin: Option<&Cid>,
    dest: Option<&Cid>,
    base: Option<&Cid>,
) -> Result<MergeOutcome> {
    let origin_node = load(store, origin)?;
    let dest_node = load(store, dest)?;
    let base_node = load(store, base)?;

    let mut conflicts = BTreeMap::new();
    let root = merge_trees_inner(
        store,
        as_tree(&origin_node),
        as_tree(&dest_node),
        as_tree(&base_node),
        Path::new("."),
        &mut conflicts,
    )?;

    if !conflicts.is_empty() {
        return Ok(MergeOutcome::Conflict(conflicts));
    }

    Ok(MergeOutcome::Clean(root.expect("root merge node is never a deletion")))
}
