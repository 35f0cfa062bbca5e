use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::image_name::ImageName;
use crate::stage::Stage;

type LockKey = (Stage, String);

/// One async mutex per (stage, filename) pair.
///
/// Entries are created on demand and dropped again once the last holder
/// releases them, so the table only ever holds names that are in use.
#[derive(Default)]
pub struct NameLocks {
    entries: DashMap<LockKey, Arc<Mutex<()>>>,
}

/// Holds every lock taken by one [`NameLocks::lock`] call until dropped.
pub struct NameGuard<'a> {
    table: &'a NameLocks,
    keys: Vec<LockKey>,
    guards: Vec<OwnedMutexGuard<()>>,
}

impl NameLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock all given keys. Keys are taken in sorted order so two callers
    /// asking for overlapping sets cannot deadlock.
    pub async fn lock<'n>(
        &self,
        keys: impl IntoIterator<Item = (Stage, &'n ImageName)>,
    ) -> NameGuard<'_> {
        let mut keys: Vec<LockKey> = keys
            .into_iter()
            .map(|(stage, name)| (stage, name.to_string()))
            .collect();
        keys.sort();
        keys.dedup();

        let mut guards = Vec::with_capacity(keys.len());
        for key in &keys {
            // The map entry must not be held across the await.
            let mutex = self.entries.entry(key.clone()).or_default().clone();
            guards.push(mutex.lock_owned().await);
        }

        NameGuard {
            table: self,
            keys,
            guards,
        }
    }

    /// Number of names currently tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Drop for NameGuard<'_> {
    fn drop(&mut self) {
        self.guards.clear();
        for key in &self.keys {
            self.table
                .entries
                .remove_if(key, |_, mutex| Arc::strong_count(mutex) == 1);
        }
    }
}
