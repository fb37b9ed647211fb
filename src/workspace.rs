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

//! The `Workspace` type ties together every component (object store, index,
//! branch registry, working directory) behind the operations a CLI (or any
//! other caller) actually invokes: init/open, status, stage, snapshot,
//! branch management, checkout and merge.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::branch::BranchRegistry;
use crate::checkout;
use crate::dag;
use crate::error::{Error, Result};
use crate::global::Cid;
use crate::global::defaults::{
    AUTHOR_ENV_VAR, BRANCHES_DIR, CONFIG_FILE, CURRENT_FILE, DEFAULT_BRANCH, INDEX_FILE,
    LOCK_FILE, METADATA_DIR, OBJECT_STORE_DIR,
};
use crate::index::Index;
use crate::merge::{self, MergeOutcome};
use crate::objects::{Object, Snapshot};
use crate::store::{LocalObjectStore, ObjectStore};
use crate::treebuilder;
use crate::workdir::LocalWorkdir;

/// `.pando/config`: everything the workspace needs to know about itself
/// beyond the object/branch/index state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub author: String,
}

impl Config {
    fn resolve_author(explicit: Option<String>) -> String {
        explicit
            .or_else(|| std::env::var(AUTHOR_ENV_VAR).ok())
            .or_else(|| std::env::var("USER").ok())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Which kind of access an operation needs on the metadata lock. The local
/// backend only offers one exclusive primitive (see `Workspace::lock`), so
/// `Shared` and `Exclusive` currently behave identically -- conservative,
/// never incorrect, and cheap to relax later if a real shared-lock backend
/// shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Shared,
    Exclusive,
}

/// RAII guard over the workspace's exclusive file lock. Unlocks on drop.
pub struct WorkspaceGuard {
    lock: fslock::LockFile,
}

impl Drop for WorkspaceGuard {
    fn drop(&mut self) {
        let _ = self.lock.unlock();
    }
}

/// Status derived from the index: the five sets described by §4.4.
pub struct StatusReport {
    pub modified: Vec<PathBuf>,
    pub staged: Vec<PathBuf>,
    pub untracked: Vec<PathBuf>,
    pub deleted: Vec<PathBuf>,
}

/// Outcome of a `merge` call, used by the CLI to decide what to print.
#[derive(Debug)]
pub enum MergeReport {
    AlreadyUpToDate,
    FastForward(Cid),
    Merged(Cid),
}

/// Owns every piece of on-disk state rooted at `root/.pando`.
pub struct Workspace {
    root: PathBuf,
    metadata_dir: PathBuf,
    config: Config,
    store: LocalObjectStore,
    workdir: LocalWorkdir,
    branches: BranchRegistry,
    index: Index,
}

impl Workspace {
    fn index_path(metadata_dir: &Path) -> PathBuf {
        metadata_dir.join(INDEX_FILE)
    }

    fn config_path(metadata_dir: &Path) -> PathBuf {
        metadata_dir.join(CONFIG_FILE)
    }

    fn current_path(metadata_dir: &Path) -> PathBuf {
        metadata_dir.join(CURRENT_FILE)
    }

    fn lock_path(metadata_dir: &Path) -> PathBuf {
        metadata_dir.join(LOCK_FILE)
    }

    /// Initializes a brand-new workspace at `root`, creating `.pando/` and
    /// an empty `master` branch as the current branch. Fails if `.pando/`
    /// already exists.
    pub fn init(root: impl Into<PathBuf>, author: Option<String>) -> Result<Self> {
        let root = root.into();
        let metadata_dir = root.join(METADATA_DIR);
        if metadata_dir.exists() {
            return Err(Error::AlreadyInitialized(root));
        }

        std::fs::create_dir_all(&metadata_dir)?;
        let store = LocalObjectStore::open(metadata_dir.join(OBJECT_STORE_DIR))?;
        let workdir = LocalWorkdir::new(root.clone());
        let branches = BranchRegistry::open(metadata_dir.join(BRANCHES_DIR), Self::current_path(&metadata_dir))?;

        let config = Config {
            author: Config::resolve_author(author),
        };
        let config_bytes = serde_yaml::to_vec(&config).expect("config serializes infallibly");
        std::fs::write(Self::config_path(&metadata_dir), config_bytes)?;

        branches.create(DEFAULT_BRANCH, None)?;
        branches.set_current(DEFAULT_BRANCH)?;

        let index = Index::new();
        index.save(&Self::index_path(&metadata_dir))?;

        Ok(Self {
            root,
            metadata_dir,
            config,
            store,
            workdir,
            branches,
            index,
        })
    }

    /// Opens an already-initialized workspace at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let metadata_dir = root.join(METADATA_DIR);
        if !metadata_dir.exists() {
            return Err(Error::NotInitialized(root));
        }

        let config_bytes = std::fs::read(Self::config_path(&metadata_dir))?;
        let config: Config = serde_yaml::from_slice(&config_bytes).unwrap_or(Config {
            author: Config::resolve_author(None),
        });

        let store = LocalObjectStore::open(metadata_dir.join(OBJECT_STORE_DIR))?;
        let workdir = LocalWorkdir::new(root.clone());
        let branches = BranchRegistry::open(metadata_dir.join(BRANCHES_DIR), Self::current_path(&metadata_dir))?;
        let index = Index::load(&Self::index_path(&metadata_dir))?;

        Ok(Self {
            root,
            metadata_dir,
            config,
            store,
            workdir,
            branches,
            index,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn save_index(&self) -> Result<()> {
        self.index.save(&Self::index_path(&self.metadata_dir))
    }

    /// Acquires the workspace-wide metadata lock for the duration of the
    /// returned guard. Blocks with no timeout, per §5.
    pub fn lock(&self, _mode: LockMode) -> Result<WorkspaceGuard> {
        let path = Self::lock_path(&self.metadata_dir);
        if !path.exists() {
            std::fs::write(&path, b"")?;
        }
        let mut lock = fslock::LockFile::open(&path).map_err(|_| Error::LockHeld)?;
        lock.lock().map_err(|_| Error::LockHeld)?;
        Ok(WorkspaceGuard { lock })
    }

    /// Non-blocking probe: returns `Ok(None)` immediately if the lock is
    /// already held elsewhere instead of blocking. `lock` is what every
    /// mutating/read-only operation actually uses; this exists only for
    /// callers that need to detect contention without waiting on it.
    pub fn try_lock(&self, _mode: LockMode) -> Result<Option<WorkspaceGuard>> {
        let path = Self::lock_path(&self.metadata_dir);
        if !path.exists() {
            std::fs::write(&path, b"")?;
        }
        let mut lock = fslock::LockFile::open(&path).map_err(|_| Error::LockHeld)?;
        if lock.try_lock().map_err(|_| Error::LockHeld)? {
            Ok(Some(WorkspaceGuard { lock }))
        } else {
            Ok(None)
        }
    }

    fn current_head(&self) -> Result<Option<Cid>> {
        let name = self.branches.current()?;
        self.branches.head(&name)
    }

    /// Rescans the working directory and returns the current derived status
    /// sets. Persists the refreshed `wdir` hashes back to disk.
    pub fn status(&mut self) -> Result<StatusReport> {
        self.index.update(&self.workdir)?;
        self.save_index()?;
        Ok(StatusReport {
            modified: self.index.modified(),
            staged: self.index.staged(),
            untracked: self.index.untracked(),
            deleted: self.index.deleted(),
        })
    }

    /// Stages the given paths: hashes current bytes, writes them to the
    /// object store, and records the resulting CID as `stage`.
    pub fn stage(&mut self, paths: &[PathBuf]) -> Result<()> {
        self.index.update(&self.workdir)?;
        self.index.stage(paths, &self.workdir, &self.store)?;
        self.save_index()
    }

    /// Builds a tree from the currently staged index entries and creates a
    /// new `Snapshot` as a child of the current branch's head.
    pub fn snapshot(&mut self, message: String) -> Result<Cid> {
        if self.index.unsnapshot().is_empty() {
            return Err(Error::NothingToSnapshot);
        }

        let tree = treebuilder::build(&self.store, &self.index)?;
        let parent = self.current_head()?;
        let snapshot = Snapshot {
            author: self.config.author.clone(),
            message,
            tree,
            parents: parent.into_iter().collect(),
            timestamp: Utc::now(),
        };
        let cid = self.store.put_object(&Object::Snapshot(snapshot))?;

        let current = self.branches.current()?;
        self.branches.set_head(&current, Some(cid.clone()))?;

        let flattened = checkout::flatten(&self.store, Some(&tree))?;
        self.index.reinitialize(flattened);
        self.save_index()?;

        Ok(cid)
    }

    pub fn branch_create(&self, name: &str) -> Result<()> {
        let head = self.current_head()?;
        self.branches.create(name, head)
    }

    pub fn branch_list(&self) -> Result<Vec<String>> {
        self.branches.list()
    }

    pub fn branch_delete(&self, name: &str) -> Result<()> {
        self.branches.delete(name)
    }

    pub fn current_branch(&self) -> Result<String> {
        self.branches.current()
    }

    fn dirty(&self) -> Option<Error> {
        let modified = self.index.modified();
        let unsnapshot = self.index.unsnapshot();
        if modified.is_empty() && unsnapshot.is_empty() {
            None
        } else {
            Some(Error::DirtyWorkspace { modified, unsnapshot })
        }
    }

    /// Reconciles the working directory to `target`'s head and makes it the
    /// current branch. Fails `DirtyWorkspace` if anything is staged or
    /// locally modified.
    pub fn checkout(&mut self, target: &str) -> Result<()> {
        if !self.branches.exists(target) {
            return Err(Error::UnknownBranch(target.to_string()));
        }
        self.index.update(&self.workdir)?;
        if let Some(err) = self.dirty() {
            return Err(err);
        }

        let current = self.branches.current()?;
        let base_tree = self.head_tree(&current)?;
        let new_tree = self.head_tree(target)?;

        checkout::apply_tree_diff(
            &self.store,
            &self.workdir,
            base_tree.as_ref(),
            new_tree.as_ref(),
            Path::new("."),
        )?;

        let new_head = self.branches.head(target)?;
        let flattened = checkout::flatten(&self.store, new_head.as_ref())?;
        self.index.reinitialize(flattened);
        self.save_index()?;
        self.branches.set_current(target)
    }

    fn head_tree(&self, branch: &str) -> Result<Option<crate::objects::Tree>> {
        let head = self.branches.head(branch)?;
        match head {
            None => Ok(None),
            Some(cid) => checkout::load_tree(&self.store, Some(&cid)),
        }
    }

    /// Merges `other` into the current branch, performing a fast-forward
    /// when possible and a recursive three-way merge otherwise.
    pub fn merge(&mut self, other: &str) -> Result<MergeReport> {
        if !self.branches.exists(other) {
            return Err(Error::UnknownBranch(other.to_string()));
        }
        self.index.update(&self.workdir)?;
        if let Some(err) = self.dirty() {
            return Err(err);
        }

        let current = self.branches.current()?;
        let o = self.branches.head(&current)?;
        let d = self.branches.head(other)?;

        if o == d {
            return Ok(MergeReport::AlreadyUpToDate);
        }

        let lca = match (&o, &d) {
            (Some(oc), Some(dc)) => dag::lca(&self.store, oc, dc)?,
            _ => None,
        };

        if lca == o {
            // Fast-forward: the current branch is an ancestor of `other`.
            let base_tree = self.head_tree(&current)?;
            let new_tree = match &d {
                Some(cid) => checkout::load_tree(&self.store, Some(cid))?,
                None => None,
            };
            checkout::apply_tree_diff(
                &self.store,
                &self.workdir,
                base_tree.as_ref(),
                new_tree.as_ref(),
                Path::new("."),
            )?;
            let flattened = checkout::flatten(&self.store, d.as_ref())?;
            self.index.reinitialize(flattened);
            self.save_index()?;
            self.branches.set_head(&current, d.clone())?;
            return Ok(MergeReport::FastForward(d.expect("non-ff-self head")));
        }

        if lca == d {
            // Current already contains `other`.
            return Ok(MergeReport::AlreadyUpToDate);
        }

        let origin_snapshot = self.snapshot_of(o.as_ref())?;
        let dest_snapshot = self.snapshot_of(d.as_ref())?;
        let base_snapshot = self.snapshot_of(lca.as_ref())?;

        let origin_tree = origin_snapshot.as_ref().map(|s| s.tree.clone());
        let dest_tree = dest_snapshot.as_ref().map(|s| s.tree.clone());
        let base_tree = base_snapshot.as_ref().map(|s| s.tree.clone());

        let outcome = merge::merge_trees(
            &self.store,
            origin_tree.as_ref(),
            dest_tree.as_ref(),
            base_tree.as_ref(),
        )?;

        let merged_cid = match outcome {
            MergeOutcome::Conflict(paths) => return Err(Error::MergeConflict { paths }),
            MergeOutcome::Clean(cid) => cid,
        };

        let origin_tree_obj = checkout::load_tree(&self.store, origin_tree.as_ref())?;
        let merged_tree_obj = checkout::load_tree(&self.store, Some(&merged_cid))?;
        checkout::apply_tree_diff(
            &self.store,
            &self.workdir,
            origin_tree_obj.as_ref(),
            merged_tree_obj.as_ref(),
            Path::new("."),
        )?;

        let flattened = checkout::flatten(&self.store, Some(&merged_cid))?;
        self.index.reinitialize(flattened);
        self.save_index()?;

        let snapshot = Snapshot {
            author: self.config.author.clone(),
            message: format!("Merged {other} into {current}"),
            tree: merged_cid,
            parents: vec![
                o.clone().expect("non-fast-forward merge always has a current head"),
                d.clone().expect("non-fast-forward merge always has an other head"),
            ],
            timestamp: Utc::now(),
        };
        let merge_cid = self.store.put_object(&Object::Snapshot(snapshot))?;
        self.branches.set_head(&current, Some(merge_cid.clone()))?;

        Ok(MergeReport::Merged(merge_cid))
    }

    fn snapshot_of(&self, cid: Option<&Cid>) -> Result<Option<Snapshot>> {
        match cid {
            None => Ok(None),
            Some(cid) => Ok(self.store.get_node(cid)?.as_snapshot().cloned()),
        }
    }

    /// Returns the current branch's snapshot history, most recent first.
    pub fn log(&self) -> Result<Vec<(Cid, Snapshot)>> {
        let head = self.current_head()?;
        let Some(head) = head else { return Ok(Vec::new()) };

        let mut out = Vec::new();
        let snapshot = self.store.get_node(&head)?;
        if let Some(snapshot) = snapshot.as_snapshot() {
            out.push((head.clone(), snapshot.clone()));
        }
        for ancestor in dag::ancestors(&self.store, &head)? {
            if let Some(snapshot) = self.store.get_node(&ancestor)?.as_snapshot() {
                out.push((ancestor, snapshot.clone()));
            }
        }
        Ok(out)
    }

    /// Exposes the underlying store for read-only inspection (`cat`-style
    /// commands).
    pub fn store(&self) -> &dyn ObjectStore {
        &self.store
    }

    pub fn index(&self) -> &Index {
        &self.index
    }
}

/// Flattened view of the index, used by `status` rendering in the CLI.
pub fn index_entries(index: &Index) -> BTreeMap<PathBuf, crate::index::IndexEntry> {
    index.iter().map(|(p, e)| (p.clone(), e.clone())).collect()
}
