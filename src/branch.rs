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

use crate::error::{Error, Result};
use crate::global::Cid;

/// Named refs to snapshot heads, plus the current-branch pointer. Persisted
/// as one YAML file per branch under `branches/<name>` and a `current`
/// scalar file, both living under the metadata directory passed to `open`.
pub struct BranchRegistry {
    dir: PathBuf,
    current_path: PathBuf,
}

fn branch_name_is_valid(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\')
}

impl BranchRegistry {
    pub fn open(branches_dir: impl Into<PathBuf>, current_path: impl Into<PathBuf>) -> Result<Self> {
        let dir = branches_dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            current_path: current_path.into(),
        })
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    pub fn create(&self, name: &str, head: Option<Cid>) -> Result<()> {
        if !branch_name_is_valid(name) {
            return Err(Error::UnknownBranch(name.to_string()));
        }
        if self.exists(name) {
            return Err(Error::BranchExists(name.to_string()));
        }
        self.write_head(name, head)
    }

    pub fn head(&self, name: &str) -> Result<Option<Cid>> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(Error::UnknownBranch(name.to_string()));
        }
        let raw = std::fs::read_to_string(&path)?;
        let scalar: String = serde_yaml::from_str(&raw).unwrap_or_default();
        Ok(if scalar.is_empty() {
            None
        } else {
            Cid::from_hex(scalar.trim()).or(None)
        })
    }

    pub fn set_head(&self, name: &str, head: Option<Cid>) -> Result<()> {
        if !self.exists(name) {
            return Err(Error::UnknownBranch(name.to_string()));
        }
        self.write_head(name, head)
    }

    fn write_head(&self, name: &str, head: Option<Cid>) -> Result<()> {
        let scalar = head.map(|c| c.to_hex()).unwrap_or_default();
        let yaml = serde_yaml::to_string(&scalar).expect("scalar serializes infallibly");
        atomic_write(&self.path_for(name), yaml.as_bytes())
    }

    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        if !self.exists(name) {
            return Err(Error::UnknownBranch(name.to_string()));
        }
        if self.current()? == name {
            return Err(Error::CannotDeleteCurrentBranch(name.to_string()));
        }
        std::fs::remove_file(self.path_for(name))?;
        Ok(())
    }

    pub fn current(&self) -> Result<String> {
        let raw = std::fs::read_to_string(&self.current_path)?;
        Ok(serde_yaml::from_str(&raw).unwrap_or_default())
    }

    pub fn set_current(&self, name: &str) -> Result<()> {
        if !self.exists(name) {
            return Err(Error::UnknownBranch(name.to_string()));
        }
        let yaml = serde_yaml::to_string(&name.to_string()).expect("scalar serializes infallibly");
        atomic_write(&self.current_path, yaml.as_bytes())
    }
}

fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn registry(dir: &Path) -> BranchRegistry {
        BranchRegistry::open(dir.join("branches"), dir.join("current")).unwrap()
    }

    #[test]
    fn create_and_read_empty_head() {
        let dir = tempdir().unwrap();
        let reg = registry(dir.path());
        reg.create("master", None).unwrap();
        assert_eq!(reg.head("master").unwrap(), None);
    }

    #[test]
    fn create_twice_fails() {
        let dir = tempdir().unwrap();
        let reg = registry(dir.path());
        reg.create("master", None).unwrap();
        assert!(matches!(reg.create("master", None), Err(Error::BranchExists(_))));
    }

    #[test]
    fn set_head_then_read_back() {
        let dir = tempdir().unwrap();
        let reg = registry(dir.path());
        reg.create("master", None).unwrap();
        let cid = Cid::from_content(b"snapshot");
        reg.set_head("master", Some(cid.clone())).unwrap();
        assert_eq!(reg.head("master").unwrap(), Some(cid));
    }

    #[test]
    fn cannot_delete_current_branch() {
        let dir = tempdir().unwrap();
        let reg = registry(dir.path());
        reg.create("master", None).unwrap();
        reg.set_current("master").unwrap();
        assert!(matches!(
            reg.delete("master"),
            Err(Error::CannotDeleteCurrentBranch(_))
        ));
    }

    #[test]
    fn delete_non_current_branch_succeeds() {
        let dir = tempdir().unwrap();
        let reg = registry(dir.path());
        reg.create("master", None).unwrap();
        reg.create("feature", None).unwrap();
        reg.set_current("master").unwrap();
        reg.delete("feature").unwrap();
        assert!(!reg.exists("feature"));
    }

    #[test]
    fn unknown_branch_head_is_an_error() {
        let dir = tempdir().unwrap();
        let reg = registry(dir.path());
        assert!(matches!(reg.head("ghost"), Err(Error::UnknownBranch(_))));
    }
}
