//! In-memory store of loaded input configurations.
//!
//! The store owns its collection exclusively and serializes every operation
//! through one coarse whole-store lock: each call is atomic with respect to
//! every other call on the same store, so a concurrent reader during a reload
//! sees either the pre-reload or the post-reload state, never a torn mix.
//! There is no cross-store atomicity — a configuration read and a script read
//! each have their own boundary.
//!
//! Identity is the configuration `name`, compared case-sensitively. A full
//! refresh is `clear()` followed by repopulation; there is no diff-and-patch.

use std::sync::{Mutex, MutexGuard};

use inputcast_core::InputConfiguration;

/// Concurrency-safe collection of named [`InputConfiguration`] records.
#[derive(Default)]
pub struct ConfigStore {
    configs: Mutex<Vec<InputConfiguration>>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the store lock, recovering the data if a panicking holder
    /// poisoned it.
    fn locked(&self) -> MutexGuard<'_, Vec<InputConfiguration>> {
        self.configs.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Adds `config` unless a configuration with the same name is already
    /// present (idempotent add).
    pub fn add(&self, config: InputConfiguration) {
        let mut configs = self.locked();
        if !configs.iter().any(|c| c.name == config.name) {
            configs.push(config);
        }
    }

    /// Replaces the configuration with a matching name in place, or appends
    /// when no match exists. A replace never grows the store.
    pub fn add_or_update(&self, config: InputConfiguration) {
        let mut configs = self.locked();
        match configs.iter().position(|c| c.name == config.name) {
            Some(index) => configs[index] = config,
            None => configs.push(config),
        }
    }

    /// Removes the configuration with the given name, if present.
    pub fn remove(&self, name: &str) {
        self.locked().retain(|c| c.name != name);
    }

    /// Returns a cloned snapshot of the configuration with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<InputConfiguration> {
        self.locked().iter().find(|c| c.name == name).cloned()
    }

    /// Returns all configuration names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.locked().iter().map(|c| c.name.clone()).collect()
    }

    pub fn clear(&self) {
        self.locked().clear();
    }

    pub fn len(&self) -> usize {
        self.locked().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locked().is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
