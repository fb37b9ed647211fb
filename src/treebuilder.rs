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

//! Materializes a `Tree` object from the index's currently-staged paths.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::global::Cid;
use crate::index::Index;
use crate::objects::{File, Object, Tree};
use crate::store::ObjectStore;

enum Node {
    Dir(BTreeMap<String, Node>),
    File(Cid),
}

fn components_of(path: &Path) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part.to_string_lossy().to_string()),
            _ => return Err(Error::PathOutsideWorkspace(path.to_path_buf())),
        }
    }
    Ok(out)
}

fn insert(root: &mut BTreeMap<String, Node>, path: &Path, link: Cid) -> Result<()> {
    let components = components_of(path)?;
    let Some((last, dirs)) = components.split_last() else {
        return Err(Error::PathOutsideWorkspace(path.to_path_buf()));
    };

    let mut cursor = root;
    for dir in dirs {
        let node = cursor
            .entry(dir.clone())
            .or_insert_with(|| Node::Dir(BTreeMap::new()));
        match node {
            Node::Dir(children) => cursor = children,
            Node::File(_) => return Err(Error::PathIsFile(path.to_path_buf())),
        }
    }

    match cursor.get(last) {
        Some(Node::Dir(_)) => return Err(Error::PathIsFile(path.to_path_buf())),
        _ => {
            cursor.insert(last.clone(), Node::File(link));
        }
    }

    Ok(())
}

/// Recursively writes the in-memory tree to the store, bottom-up, and
/// returns the root's CID. `prefix` is the path of `dir` itself, carried so
/// every written `Tree`/`File` object embeds its own workspace-relative path.
fn write_tree(store: &dyn ObjectStore, dir: &BTreeMap<String, Node>, prefix: &Path) -> Result<Cid> {
    let mut children = BTreeMap::new();
    for (name, node) in dir {
        let child_path = prefix.join(name);
        let cid = match node {
            Node::Dir(sub) => write_tree(store, sub, &child_path)?,
            Node::File(link) => store.put_object(&Object::File(File {
                path: child_path.to_string_lossy().to_string(),
                link: link.clone(),
            }))?,
        };
        children.insert(name.clone(), cid);
    }
    store.put_object(&Object::Tree(Tree {
        path: prefix.to_string_lossy().to_string(),
        children,
    }))
}

/// Builds a `Tree` rooted at `.` from every index entry whose `stage` is
/// set, and stores it (and every intermediate `Tree`/`File` node) in the
/// object store. Entries with no `stage` (including deletions staged by
/// omission) are not part of the output.
pub fn build(store: &dyn ObjectStore, index: &Index) -> Result<Cid> {
    let mut root: BTreeMap<String, Node> = BTreeMap::new();
    for (path, entry) in index.iter() {
        if let Some(cid) = &entry.stage {
            insert(&mut root, path, cid.clone())?;
        }
    }
    write_tree(store, &root, Path::new("."))
}
