//! Integration tests for the cardstack-config crate.

use std::fs;

use cardstack_config::{Config, ConfigError, InteractionConfig, ProjectRef};
use tempfile::TempDir;

#[tokio::test]
async fn config_load_from_json5_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("cardstack.json5");

    fs::write(
        &config_path,
        r#"
        {
            // Remote board
            github_project: { owner: "acme", number: 4 },
            github_token: "ghp_test_token",
            interaction: {
                drag_delay_ms: 200,
                drag_threshold: 9,
            },
        }
        "#,
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert_eq!(config.github_project, Some(ProjectRef::new("acme", 4)));
    assert_eq!(config.github_token.as_deref(), Some("ghp_test_token"));
    assert_eq!(config.interaction.drag_delay_ms, 200);
    assert_eq!(config.interaction.drag_threshold, 9);
    assert!(config.display.show_details);
}

#[test]
fn config_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("nested").join("config.json");

    let original = Config {
        github_project: Some(ProjectRef::new("acme", 1).with_repo("web")),
        interaction: InteractionConfig {
            drag_delay_ms: 100,
            drag_threshold: 2,
        },
        ..Default::default()
    };

    original.save_to(&config_path).unwrap();
    let loaded = Config::load_from(&config_path).unwrap();

    assert_eq!(loaded, original);
}

#[test]
fn config_load_nonexistent_fails() {
    let result = Config::load_from("/nonexistent/path/config.json");
    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
}

#[test]
fn config_rejects_out_of_range_delay() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("cardstack.json");
    fs::write(&config_path, r#"{ "interaction": { "drag_delay_ms": 5000 } }"#).unwrap();

    let err = Config::load_from(&config_path).unwrap_err();
    assert!(err.to_string().contains("drag_delay_ms"));
}

#[test]
fn config_rejects_malformed_project() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("cardstack.json");
    fs::write(&config_path, r#"{ "github_project": "acme" }"#).unwrap();

    assert!(Config::load_from(&config_path).is_err());
}

#[test]
fn project_ref_short_formats() {
    let by_owner: ProjectRef = "acme/3".parse().unwrap();
    let by_repo: ProjectRef = "acme/api/3".parse().unwrap();

    assert_eq!(by_owner.number(), by_repo.number());
    assert_eq!(by_repo.repo(), Some("api"));
    assert_eq!(by_owner.url(), "https://github.com/users/acme/projects/3");
}
