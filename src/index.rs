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

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::global::{optional_cid, Cid};
use crate::store::ObjectStore;
use crate::workdir::Workdir;

/// Per-path staging state: the hash on disk, the hash last `stage`d, and the
/// hash recorded in the most recent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    #[serde(with = "optional_cid", default)]
    pub wdir: Option<Cid>,
    #[serde(with = "optional_cid", default)]
    pub stage: Option<Cid>,
    #[serde(with = "optional_cid", default)]
    pub repo: Option<Cid>,
}

/// The staging index: a flat `path -> IndexEntry` mapping persisted between
/// invocations as `.pando/index`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Index {
    entries: BTreeMap<PathBuf, IndexEntry>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let bytes = std::fs::read(path)?;
        Ok(serde_yaml::from_slice(&bytes).unwrap_or_default())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_yaml::to_vec(self).expect("index serializes infallibly");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn entry(&self, path: &Path) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    /// Rescans the working directory, recomputing `wdir` hashes while
    /// preserving `stage` and `repo`.
    pub fn update(&mut self, workdir: &dyn Workdir) -> Result<()> {
        let mut seen = BTreeSet::new();
        for path in workdir.walk()? {
            let bytes = workdir.read(&path)?;
            let hash = Cid::from_content(&bytes);
            self.entries.entry(path.clone()).or_default().wdir = Some(hash);
            seen.insert(path);
        }
        for (path, entry) in self.entries.iter_mut() {
            if !seen.contains(path) {
                entry.wdir = None;
            }
        }
        Ok(())
    }

    /// Stages the given paths. A path still present in the working directory
    /// has its current bytes hashed, put into the object store, and recorded
    /// as `stage`. A path already gone from the working directory is staged
    /// as a deletion: `stage` (and `wdir`) become `None`, so the tree builder
    /// omits it from the next snapshot.
    pub fn stage(
        &mut self,
        paths: &[PathBuf],
        workdir: &dyn Workdir,
        store: &dyn ObjectStore,
    ) -> Result<()> {
        for path in paths {
            let entry = self.entries.entry(path.clone()).or_default();
            if workdir.exists(path) {
                let bytes = workdir.read(path)?;
                let cid = store.put(&bytes)?;
                entry.wdir = Some(cid.clone());
                entry.stage = Some(cid);
            } else {
                entry.wdir = None;
                entry.stage = None;
            }
        }
        Ok(())
    }

    /// Replaces the index entirely from a tree's flattened path -> CID map,
    /// as done by checkout/merge once the working directory matches it.
    pub fn reinitialize(&mut self, flattened: BTreeMap<PathBuf, Cid>) {
        self.entries = flattened
            .into_iter()
            .map(|(path, cid)| {
                (
                    path,
                    IndexEntry {
                        wdir: Some(cid.clone()),
                        stage: Some(cid.clone()),
                        repo: Some(cid),
                    },
                )
            })
            .collect();
    }

    fn paths_where(&self, pred: impl Fn(&IndexEntry) -> bool) -> Vec<PathBuf> {
        self.entries
            .iter()
            .filter(|(_, e)| pred(e))
            .map(|(p, _)| p.clone())
            .collect()
    }

    /// `wdir == stage == repo`.
    pub fn clean(&self) -> Vec<PathBuf> {
        self.paths_where(|e| e.wdir == e.stage && e.stage == e.repo)
    }

    /// `(wdir != stage || stage empty) && wdir != repo`: the working copy
    /// disagrees with what's staged (or nothing has ever been staged for it)
    /// and also disagrees with the last snapshot. Catches unstaged edits,
    /// unstaged deletions, and brand-new untracked files alike.
    pub fn modified(&self) -> Vec<PathBuf> {
        self.paths_where(|e| (e.wdir != e.stage || e.stage.is_none()) && e.wdir != e.repo)
    }

    /// `stage` nonempty and `stage != repo`.
    pub fn staged(&self) -> Vec<PathBuf> {
        self.paths_where(|e| e.stage.is_some() && e.stage != e.repo)
    }

    /// Alias for `staged`, named per the index's own vocabulary.
    pub fn unsnapshot(&self) -> Vec<PathBuf> {
        self.staged()
    }

    /// `repo` empty and `stage` empty.
    pub fn untracked(&self) -> Vec<PathBuf> {
        self.paths_where(|e| e.repo.is_none() && e.stage.is_none())
    }

    /// `wdir` absent and `repo` nonempty.
    pub fn deleted(&self) -> Vec<PathBuf> {
        self.paths_where(|e| e.wdir.is_none() && e.repo.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &IndexEntry)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalObjectStore;
    use crate::workdir::LocalWorkdir;
    use tempfile::tempdir;

    #[test]
    fn update_tracks_wdir_hashes() {
        let dir = tempdir().unwrap();
        let wd = LocalWorkdir::new(dir.path());
        wd.write(Path::new("a.txt"), b"hello").unwrap();

        let mut index = Index::new();
        index.update(&wd).unwrap();

        let entry = index.entry(Path::new("a.txt")).unwrap();
        assert_eq!(entry.wdir, Some(Cid::from_content(b"hello")));
        assert_eq!(entry.stage, None);
        assert_eq!(entry.repo, None);
    }

    #[test]
    fn stage_then_modified_is_empty() {
        let dir = tempdir().unwrap();
        let wd = LocalWorkdir::new(dir.path());
        let store = LocalObjectStore::open(dir.path().join("store")).unwrap();
        wd.write(Path::new("a.txt"), b"hello").unwrap();

        let mut index = Index::new();
        index.update(&wd).unwrap();
        index.stage(&[PathBuf::from("a.txt")], &wd, &store).unwrap();

        assert!(index.modified().is_empty());
        assert_eq!(index.staged(), vec![PathBuf::from("a.txt")]);
    }

    #[test]
    fn staging_a_deleted_path_clears_stage() {
        let dir = tempdir().unwrap();
        let wd = LocalWorkdir::new(dir.path());
        let store = LocalObjectStore::open(dir.path().join("store")).unwrap();

        let mut index = Index::new();
        index.reinitialize(BTreeMap::from([(
            PathBuf::from("a.txt"),
            Cid::from_content(b"hello"),
        )]));

        index.update(&wd).unwrap();
        assert_eq!(index.deleted(), vec![PathBuf::from("a.txt")]);

        index.stage(&[PathBuf::from("a.txt")], &wd, &store).unwrap();
        let entry = index.entry(Path::new("a.txt")).unwrap();
        assert_eq!(entry.stage, None);
        assert_eq!(entry.wdir, None);
        assert!(entry.repo.is_some());
    }

    #[test]
    fn deleted_path_is_reported() {
        let mut index = Index::new();
        index.reinitialize(BTreeMap::from([(
            PathBuf::from("a.txt"),
            Cid::from_content(b"hello"),
        )]));

        let dir = tempdir().unwrap();
        let wd = LocalWorkdir::new(dir.path());
        index.update(&wd).unwrap();

        assert_eq!(index.deleted(), vec![PathBuf::from("a.txt")]);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let mut index = Index::new();
        index.reinitialize(BTreeMap::from([(
            PathBuf::from("a.txt"),
            Cid::from_content(b"hello"),
        )]));

        let path = dir.path().join("index");
        index.save(&path).unwrap();
        let loaded = Index::load(&path).unwrap();
        assert_eq!(loaded.entry(Path::new("a.txt")), index.entry(Path::new("a.txt")));
    }
}
