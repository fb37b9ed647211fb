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
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::global::Cid;
use crate::objects::{self, Object};

/// Content-addressable object store: a CID -> bytes KV with pinning and
/// download semantics. The sole mutator of durable storage; every method
/// MUST return identical bytes for identical CIDs.
pub trait ObjectStore: Send + Sync {
    /// Stores raw bytes and returns their CID. Idempotent: storing the same
    /// bytes twice returns the same CID and does not fail.
    fn put(&self, bytes: &[u8]) -> Result<Cid>;

    /// Raw bytes for a CID.
    fn get(&self, cid: &Cid) -> Result<Vec<u8>>;

    /// Materializes raw file content. Identical to `get` for a local
    /// backend; kept distinct so a future remote backend can tell "fetch
    /// metadata" apart from "materialize bytes".
    fn download(&self, cid: &Cid) -> Result<Vec<u8>> {
        self.get(cid)
    }

    fn exists(&self, cid: &Cid) -> Result<bool>;

    fn pin(&self, _cid: &Cid) -> Result<()> {
        Ok(())
    }

    fn unpin(&self, _cid: &Cid) -> Result<()> {
        Ok(())
    }

    /// Stores an already-constructed `Object`, encoding it canonically first.
    fn put_object(&self, object: &Object) -> Result<Cid> {
        self.put(&objects::encode(object))
    }

    /// Fetches and decodes a node into its typed `Object`.
    fn get_node(&self, cid: &Cid) -> Result<Object> {
        let bytes = self.get(cid)?;
        objects::decode(&bytes).map_err(|_| Error::CorruptObject(cid.clone()))
    }
}

/// The one object store backend this repository ships: a directory of
/// content-addressed files under `.pando/ipfs/`, sharded two hex characters
/// deep so a large history doesn't dump everything into one directory.
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, cid: &Cid) -> PathBuf {
        let hex = cid.to_hex();
        let (shard, rest) = hex.split_at(2);
        self.root.join(shard).join(rest)
    }

    fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl ObjectStore for LocalObjectStore {
    fn put(&self, bytes: &[u8]) -> Result<Cid> {
        let cid = Cid::from_content(bytes);
        let path = self.path_for(&cid);
        if !path.exists() {
            Self::atomic_write(&path, bytes)?;
        }
        Ok(cid)
    }

    fn get(&self, cid: &Cid) -> Result<Vec<u8>> {
        let path = self.path_for(cid);
        fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::MissingObject(cid.clone()),
            _ => Error::Io(e),
        })
    }

    fn exists(&self, cid: &Cid) -> Result<bool> {
        Ok(self.path_for(cid).exists())
    }
}

/// Recursively flattens a tree rooted at `root` into a `path -> CID` map
/// over every `File` leaf it reaches. `root` may be `None` (the empty
/// tree), in which case the result is empty. Used by `index::reinitialize`
/// and the checkout/merge engines, which all need "every file this tree
/// contains" rather than the tree's own shallow child list.
pub fn flatten_tree(store: &dyn ObjectStore, root: Option<&Cid>) -> Result<BTreeMap<PathBuf, Cid>> {
    let mut out = BTreeMap::new();
    if let Some(root) = root {
        flatten_into(store, root, &mut out)?;
    }
    Ok(out)
}

fn flatten_into(store: &dyn ObjectStore, cid: &Cid, out: &mut BTreeMap<PathBuf, Cid>) -> Result<()> {
    match store.get_node(cid)? {
        Object::Tree(tree) => {
            for child in tree.children.values() {
                flatten_into(store, child, out)?;
            }
        }
        Object::File(file) => {
            out.insert(PathBuf::from(file.path), cid.clone());
        }
        Object::Snapshot(_) => return Err(Error::CorruptObject(cid.clone())),
    }
    Ok(())
}
