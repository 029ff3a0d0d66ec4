// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat-file store implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

use super::Store;

/// File extension added to every stored item.
const ITEM_EXT: &str = "txt";

/// Stores each value in a file named after the item ID, with a folder
/// per collection.
///
/// IDs and collection names must be file-name friendly. On disk, items
/// carry a `.txt` extension: `<base>/<collection>/<id>.txt`.
///
/// # Examples
///
/// ```no_run
/// use lumen_lib::store::{FileStore, Store};
///
/// let store = FileStore::open("/var/lib/lumen/data")?;
/// store.write("patterns", "ab", ":ab:|#F00,2s,1s")?;
/// let value = store.read("patterns", "ab")?;
/// # Ok::<(), lumen_lib::error::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    /// Opens a file store rooted at the given base path, creating the
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Fails if the base directory cannot be created.
    pub fn open(base: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base = base.into();
        fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    /// Opens a file store at the default location, `$HOME/data`.
    ///
    /// # Errors
    ///
    /// Fails if `$HOME` is not set or the directory cannot be created.
    pub fn in_home() -> Result<Self, StoreError> {
        let home = std::env::var_os("HOME").ok_or_else(|| {
            StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "HOME is not set",
            ))
        })?;
        Self::open(Path::new(&home).join("data"))
    }

    /// Returns the base path of the store.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn item_path(&self, collection: &str, id: &str) -> PathBuf {
        self.base
            .join(collection)
            .join(format!("{id}.{ITEM_EXT}"))
    }
}

impl Store for FileStore {
    fn read(&self, collection: &str, id: &str) -> Result<String, StoreError> {
        let path = self.item_path(collection, id);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NoItem {
                collection: collection.to_string(),
                id: id.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, collection: &str, id: &str, value: &str) -> Result<(), StoreError> {
        let dir = self.base.join(collection);
        fs::create_dir_all(&dir)?;
        fs::write(self.item_path(collection, id), value)?;
        Ok(())
    }

    fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        fs::remove_file(self.item_path(collection, id))?;
        Ok(())
    }

    fn remove_all(&self, collection: &str) -> Result<(), StoreError> {
        let dir = self.base.join(collection);
        if dir.exists() {
            fs::remove_dir_all(dir)?;
        }
        Ok(())
    }

    fn load(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        let dir = self.base.join(collection);
        tracing::debug!(collection, base = %dir.display(), "loading collection");
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        // Sort paths so load order is deterministic across filesystems
        let mut paths: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == ITEM_EXT))
            .collect();
        paths.sort();

        let mut items = Vec::with_capacity(paths.len());
        for path in paths {
            items.push(fs::read_to_string(path)?);
        }
        Ok(items)
    }
}
