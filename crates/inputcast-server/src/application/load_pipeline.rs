//! Load pipelines: reconcile the in-memory stores with persisted state.
//!
//! Each pipeline clears its target store and then attempts every candidate
//! file the storage gateway enumerates. Per-item failure policy: a single
//! item's load error is logged and skipped — it never aborts the rest of the
//! batch, and nothing escapes the pipeline boundary.
//!
//! The batch itself runs on a blocking thread (`spawn_blocking`) so request
//! handlers already in flight are never blocked on disk I/O during a reload.
//! Awaiting a pipeline suspends until every item in the batch has been
//! attempted. There is no cancellation: once started, a batch runs to
//! completion.
//!
//! Items are admitted in enumeration order, which is not guaranteed stable
//! across calls.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::application::config_store::ConfigStore;
use crate::application::script_store::ScriptStore;
use crate::infrastructure::storage::Storage;

/// Clears the configuration store and repopulates it from persisted state.
pub async fn load_input_configurations(configs: Arc<ConfigStore>, storage: Arc<dyn Storage>) {
    debug!("loading input configurations");
    configs.clear();

    let admitted = tokio::task::spawn_blocking(move || {
        let mut admitted = 0usize;
        for file_name in storage.enumerate_configurations() {
            match storage.load_configuration(&file_name) {
                Ok(mut config) => {
                    config.file_name = Some(file_name);
                    configs.add(config);
                    admitted += 1;
                }
                Err(e) => {
                    error!("error loading configuration {file_name}: {e}");
                }
            }
        }
        admitted
    })
    .await;

    match admitted {
        Ok(count) => info!("loaded {count} input configurations"),
        Err(e) => error!("configuration load batch did not complete: {e}"),
    }
}

/// Clears the script store and repopulates it from persisted descriptors.
///
/// Each admitted script has its source files hydrated — a read failure for
/// one source is swallowed (contents stay unset) rather than rejecting the
/// script — and then runs its self-test.
pub async fn load_scripts(scripts: Arc<ScriptStore>, storage: Arc<dyn Storage>) {
    debug!("loading scripts");
    scripts.clear();

    let admitted = tokio::task::spawn_blocking(move || {
        let mut admitted = 0usize;
        for file_name in storage.enumerate_scripts() {
            let mut script = match storage.load_script(&file_name) {
                Ok(script) => script,
                Err(e) => {
                    error!("error loading script {file_name}: {e}");
                    continue;
                }
            };
            script.file_name = Some(file_name);

            for source in &mut script.source_files {
                match storage.load_source_contents(&source.file_name) {
                    Ok(contents) => source.contents = Some(contents),
                    Err(e) => {
                        debug!(
                            "source file {} of script {} not readable: {e}",
                            source.file_name, script.name
                        );
                    }
                }
            }

            scripts.add_script(script, true);
            admitted += 1;
        }
        admitted
    })
    .await;

    match admitted {
        Ok(count) => info!("loaded {count} scripts"),
        Err(e) => error!("script load batch did not complete: {e}"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
