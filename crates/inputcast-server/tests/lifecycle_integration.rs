//! End-to-end lifecycle tests.
//!
//! Each test boots a real [`AppHost`] against a throwaway data folder on
//! disk: real file storage, real axum listener on a loopback OS-assigned
//! port, and the real client proxy talking to it over HTTP. Only the input
//! engine is left at its logging default, so no test synthesizes actual
//! input events.

use std::path::PathBuf;
use std::sync::Arc;

use uuid::Uuid;

use inputcast_client::RemoteProxy;
use inputcast_core::{ExecutionContext, InputAction, InputConfiguration};
use inputcast_server::application::orchestrator::{AppHost, LifecycleState};
use inputcast_server::infrastructure::storage::config::AppConfig;

/// Creates a populated data root: one configuration, one script with a
/// readable source file.
fn seeded_data_root() -> PathBuf {
    let data = std::env::temp_dir().join(format!("inputcast_it_{}", Uuid::new_v4()));
    let configurations = data.join("Configurations");
    let scripts = data.join("Scripts");
    std::fs::create_dir_all(&configurations).unwrap();
    std::fs::create_dir_all(&scripts).unwrap();

    std::fs::write(
        configurations.join("demo.json"),
        r#"{"name":"demo","actions":[{"name":"greet","entries":[{"key":"G"}]}]}"#,
    )
    .unwrap();
    std::fs::write(
        scripts.join("greet.script"),
        r#"{"name":"greet","sourceFiles":[{"fileName":"greet.js"}]}"#,
    )
    .unwrap();
    std::fs::write(scripts.join("greet.js"), "function greet() {}").unwrap();

    data
}

/// Loopback config bound to an OS-assigned HTTP port.
fn test_config(data: PathBuf, beacon_port: u16) -> AppConfig {
    let mut config = AppConfig::default();
    config.data_folder = Some(data);
    config.last_ip = "127.0.0.1".to_string();
    config.last_port = 0;
    config.beacon_port = beacon_port;
    config
}

fn host_for(data: PathBuf, beacon_port: u16) -> Arc<AppHost> {
    AppHost::builder()
        .app_config(test_config(data, beacon_port))
        .build()
}

fn proxy_for(host: &AppHost) -> RemoteProxy {
    let addr = host.http_addr().expect("listener bound");
    RemoteProxy::new("127.0.0.1", addr.port())
}

#[tokio::test]
async fn test_startup_loads_persisted_state_and_serves_it() {
    // Arrange
    let data = seeded_data_root();
    let host = host_for(data.clone(), 48261);

    // Act
    host.run().await.expect("startup");

    // Assert — host state
    assert_eq!(host.state(), LifecycleState::Running);
    let context = host.registry().context().expect("context installed");
    assert_eq!(context.configs.names(), vec!["demo"]);
    let script = context.scripts.find_by_name("greet").expect("script loaded");
    assert!(script.source_files[0].is_hydrated());
    assert!(script.test_result.expect("self-test ran").passed);

    // Assert — the same state over HTTP
    let proxy = proxy_for(&host);
    let envelope = proxy.all_configurations().await.expect("transport");
    assert!(envelope.success);
    assert_eq!(envelope.content.unwrap(), vec!["demo"]);

    let envelope = proxy.all_scripts().await.expect("transport");
    assert_eq!(envelope.content.unwrap(), vec!["greet"]);

    let envelope = proxy.configuration("demo").await.expect("transport");
    let config = envelope.content.expect("configuration body");
    assert_eq!(config.actions[0].name, "greet");

    host.stop_all().await;
    std::fs::remove_dir_all(&data).ok();
}

#[tokio::test]
async fn test_save_and_remove_round_trip_through_the_api() {
    // Arrange
    let data = seeded_data_root();
    let host = host_for(data.clone(), 48262);
    host.run().await.expect("startup");
    let proxy = proxy_for(&host);

    // Act — save a new configuration
    let mut config = InputConfiguration::new("editor");
    config.actions.push(InputAction {
        name: "undo".to_string(),
        entries: Vec::new(),
    });
    let envelope = proxy.save_configuration(&config).await.expect("transport");

    // Assert — admitted and persisted
    assert!(envelope.success, "{:?}", envelope.error_message);
    assert!(data.join("Configurations/editor.json").exists());
    let envelope = proxy.all_configurations().await.expect("transport");
    let mut names = envelope.content.unwrap();
    names.sort();
    assert_eq!(names, vec!["demo", "editor"]);

    // Act — remove it again
    let envelope = proxy.remove_configuration("editor").await.expect("transport");

    // Assert — evicted and file deleted
    assert!(envelope.success, "{:?}", envelope.error_message);
    assert!(!data.join("Configurations/editor.json").exists());
    let envelope = proxy.all_configurations().await.expect("transport");
    assert_eq!(envelope.content.unwrap(), vec!["demo"]);

    host.stop_all().await;
    std::fs::remove_dir_all(&data).ok();
}

#[tokio::test]
async fn test_save_with_escaping_file_name_is_rejected_over_http() {
    // Arrange
    let data = seeded_data_root();
    let host = host_for(data.clone(), 48267);
    host.run().await.expect("startup");
    let proxy = proxy_for(&host);

    // Act — a request body whose recorded origin points outside the data root
    let mut config = InputConfiguration::new("intruder");
    config.file_name = Some("../intruder.json".to_string());
    let envelope = proxy.save_configuration(&config).await.expect("transport");

    // Assert — failed envelope, nothing written anywhere, store untouched
    assert!(!envelope.success);
    assert!(!data.join("intruder.json").exists());
    assert!(!data.join("Configurations/intruder.json").exists());
    let envelope = proxy.all_configurations().await.expect("transport");
    assert_eq!(envelope.content.unwrap(), vec!["demo"]);

    host.stop_all().await;
    std::fs::remove_dir_all(&data).ok();
}

#[tokio::test]
async fn test_execute_answers_ok_envelope() {
    // Arrange
    let data = seeded_data_root();
    let host = host_for(data.clone(), 48263);
    host.run().await.expect("startup");
    let proxy = proxy_for(&host);

    let request = ExecutionContext {
        use_foreground_window: false,
        use_desktop: true,
        process_name: String::new(),
        input_action: InputAction {
            name: "greet".to_string(),
            entries: Vec::new(),
        },
    };

    // Act
    let envelope = proxy.execute(&request).await.expect("transport");

    // Assert — the logging simulator accepts everything
    assert!(envelope.success);
    assert_eq!(envelope.content.as_deref(), Some("OK"));

    host.stop_all().await;
    std::fs::remove_dir_all(&data).ok();
}

#[tokio::test]
async fn test_stop_all_severs_the_api() {
    // Arrange
    let data = seeded_data_root();
    let host = host_for(data.clone(), 48264);
    host.run().await.expect("startup");
    let proxy = proxy_for(&host);

    // Act
    host.stop_all().await;

    // Assert — nothing resolves and nothing listens any more
    assert_eq!(host.state(), LifecycleState::Stopped);
    assert!(host.registry().context().is_err());
    assert!(host.http_addr().is_none());
    assert!(
        proxy.all_configurations().await.is_err(),
        "stopped listener must refuse connections"
    );

    std::fs::remove_dir_all(&data).ok();
}

#[tokio::test]
async fn test_reload_picks_up_files_added_on_disk() {
    // Arrange
    let data = seeded_data_root();
    let host = host_for(data.clone(), 48265);
    host.run().await.expect("startup");

    // A file dropped behind the host's back, visible only after a reload
    std::fs::write(
        data.join("Configurations/dropped.json"),
        r#"{"name":"dropped"}"#,
    )
    .unwrap();

    // Act
    host.reload_all().await;

    // Assert
    assert_eq!(host.state(), LifecycleState::Running);
    let context = host.registry().context().expect("context after reload");
    let mut names = context.configs.names();
    names.sort();
    assert_eq!(names, vec!["demo", "dropped"]);

    host.stop_all().await;
    std::fs::remove_dir_all(&data).ok();
}

#[tokio::test]
async fn test_missing_data_folder_starts_without_listener() {
    // Arrange — a data folder path that does not exist
    let data = std::env::temp_dir().join(format!("inputcast_absent_{}", Uuid::new_v4()));
    let host = host_for(data, 48266);

    // Act
    host.run().await.expect("first-run mode");

    // Assert
    assert_eq!(host.state(), LifecycleState::Running);
    assert!(host.http_addr().is_none());
    let context = host.registry().context().expect("context installed");
    assert!(context.app_config.snapshot().first_time_running);

    host.stop_all().await;
}
