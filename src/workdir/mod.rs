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

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::global::defaults::METADATA_DIR;

/// Read/write/delete access to the files under a workspace root. Paths
/// passed to every method are workspace-relative; the adapter joins them
/// with the configured root and rejects anything that escapes it.
pub trait Workdir: Send + Sync {
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()>;
    fn remove(&self, path: &Path) -> Result<()>;
    fn mkdir(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    /// All tracked paths under the root, skipping the metadata directory.
    fn walk(&self) -> Result<Vec<PathBuf>>;
}

pub struct LocalWorkdir {
    root: PathBuf,
}

impl LocalWorkdir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() || path.components().any(|c| c.as_os_str() == "..") {
            return Err(Error::PathOutsideWorkspace(path.to_path_buf()));
        }
        Ok(self.root.join(path))
    }

    fn walk_dir(&self, dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path == self.root.join(METADATA_DIR) {
                continue;
            }
            if entry.file_type()?.is_dir() {
                self.walk_dir(&path, out)?;
            } else {
                let relative = path
                    .strip_prefix(&self.root)
                    .unwrap_or(&path)
                    .to_path_buf();
                out.push(relative);
            }
        }
        Ok(())
    }
}

impl Workdir for LocalWorkdir {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(self.resolve(path)?)?)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = full.with_extension("pando-tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &full)?;
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<()> {
        let full = self.resolve(path)?;
        if full.is_dir() {
            fs::remove_dir_all(&full)?;
        } else if full.exists() {
            fs::remove_file(&full)?;
        }
        Ok(())
    }

    fn mkdir(&self, path: &Path) -> Result<()> {
        Ok(fs::create_dir_all(self.resolve(path)?)?)
    }

    fn exists(&self, path: &Path) -> bool {
        match self.resolve(path) {
            Ok(full) => full.exists(),
            Err(_) => false,
        }
    }

    fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut out = Vec::new();
        if self.root.exists() {
            self.walk_dir(&self.root, &mut out)?;
        }
        out.sort();
        Ok(out)
    }
}
