//! Layered configuration loading.
//!
//! Tests touching `GRIDLINK_*` variables run serially.

use std::fs;
use std::path::PathBuf;

use gridlink::config::Config;
use gridlink::error::AppError;
use serial_test::serial;
use tempfile::TempDir;

const CUTOFF_VAR: &str = "GRIDLINK_MATCHING__SCORE_CUTOFF";

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_missing_files_use_defaults() {
    std::env::remove_var(CUTOFF_VAR);
    let dir = TempDir::new().unwrap();
    let config = Config::from_figment(Config::figment(
        &dir.path().join("user.toml"),
        &dir.path().join("project.toml"),
    ))
    .unwrap();
    assert_eq!(config.matching.score_cutoff, 70.0);
    assert!(config.reference.teams.is_none());
}

#[test]
#[serial]
fn test_project_overrides_user() {
    std::env::remove_var(CUTOFF_VAR);
    let dir = TempDir::new().unwrap();
    let user = write(
        &dir,
        "user.toml",
        "[matching]\nscore_cutoff = 60\n\n[reference]\nplayers = \"/data/players.json\"\n",
    );
    let project = write(&dir, "project.toml", "[matching]\nscore_cutoff = 85.5\n");

    let config = Config::from_figment(Config::figment(&user, &project)).unwrap();
    assert_eq!(config.matching.score_cutoff, 85.5);
    assert_eq!(
        config.reference.players,
        Some(PathBuf::from("/data/players.json"))
    );
}

#[test]
#[serial]
fn test_env_overrides_files() {
    let dir = TempDir::new().unwrap();
    let project = write(&dir, "project.toml", "[matching]\nscore_cutoff = 85\n");

    std::env::set_var(CUTOFF_VAR, "92");
    let result = Config::from_figment(Config::figment(&dir.path().join("user.toml"), &project));
    std::env::remove_var(CUTOFF_VAR);

    assert_eq!(result.unwrap().matching.score_cutoff, 92.0);
}

#[test]
#[serial]
fn test_out_of_range_cutoff_fails() {
    std::env::remove_var(CUTOFF_VAR);
    let dir = TempDir::new().unwrap();
    let project = write(&dir, "project.toml", "[matching]\nscore_cutoff = 150\n");

    let err = Config::from_figment(Config::figment(&dir.path().join("user.toml"), &project))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidConfig(_)));
}

#[test]
#[serial]
fn test_malformed_value_is_config_error() {
    std::env::remove_var(CUTOFF_VAR);
    let dir = TempDir::new().unwrap();
    let project = write(&dir, "project.toml", "[matching]\nscore_cutoff = \"high\"\n");

    let err = Config::from_figment(Config::figment(&dir.path().join("user.toml"), &project))
        .unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}
