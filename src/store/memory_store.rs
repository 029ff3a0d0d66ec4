// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory store implementation for testing store consumers.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::error::StoreError;

use super::Store;

/// An in-memory [`Store`] used to test services that rely on store
/// implementations.
///
/// Values live in a lock-guarded map of collections; the map is ordered
/// so [`Store::load`] is deterministic like the file store.
///
/// # Examples
///
/// ```
/// use lumen_lib::store::{MemoryStore, Store};
///
/// let store = MemoryStore::new();
/// store.write("patterns", "ab", ":ab:|#F00,2s,1s").unwrap();
/// assert_eq!(store.load("patterns").unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<String, BTreeMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes all data from the store.
    pub fn reset(&self) {
        self.data.write().clear();
    }
}

impl Store for MemoryStore {
    fn read(&self, collection: &str, id: &str) -> Result<String, StoreError> {
        let data = self.data.read();
        let items = data.get(collection).ok_or_else(|| StoreError::NoCollection {
            collection: collection.to_string(),
        })?;
        items.get(id).cloned().ok_or_else(|| StoreError::NoItem {
            collection: collection.to_string(),
            id: id.to_string(),
        })
    }

    fn write(&self, collection: &str, id: &str, value: &str) -> Result<(), StoreError> {
        self.data
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        if let Some(items) = self.data.write().get_mut(collection) {
            items.remove(id);
        }
        Ok(())
    }

    fn remove_all(&self, collection: &str) -> Result<(), StoreError> {
        self.data.write().remove(collection);
        Ok(())
    }

    fn load(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .data
            .read()
            .get(collection)
            .map(|items| items.values().cloned().collect())
            .unwrap_or_default())
    }
}
