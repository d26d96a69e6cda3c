//! In-memory store of loaded scripts.
//!
//! Mirrors the configuration store's coarse-lock discipline, with one
//! addition: [`ScriptStore::add_script`] can run the script's self-test as it
//! is admitted, so every record that came through the load pipeline carries a
//! test outcome. Scripts are destroyed only by `clear()` during a full
//! reload; there is no standalone per-script remove in this core.

use std::sync::{Mutex, MutexGuard};

use inputcast_core::Script;

/// Concurrency-safe collection of named [`Script`] records.
#[derive(Default)]
pub struct ScriptStore {
    scripts: Mutex<Vec<Script>>,
}

impl ScriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> MutexGuard<'_, Vec<Script>> {
        self.scripts.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Adds `script` unless a script with the same name is already present,
    /// optionally running its self-test first.
    pub fn add_script(&self, mut script: Script, run_test: bool) {
        if run_test {
            let outcome = script.run_test();
            if !outcome.passed {
                tracing::warn!(
                    "script {} failed its self-test: {}",
                    script.name,
                    outcome.messages.join("; ")
                );
            }
        }
        let mut scripts = self.locked();
        if !scripts.iter().any(|s| s.name == script.name) {
            scripts.push(script);
        }
    }

    /// Returns a cloned snapshot of the script with the given name
    /// (case-sensitive).
    pub fn find_by_name(&self, name: &str) -> Option<Script> {
        self.locked().iter().find(|s| s.name == name).cloned()
    }

    /// Returns all script names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.locked().iter().map(|s| s.name.clone()).collect()
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
