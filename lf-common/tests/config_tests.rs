//! Unit tests for root folder resolution
//!
//! Note: Uses serial_test to prevent ENV variable race conditions. Tests that
//! manipulate LEADFLOW_ROOT_FOLDER or LEADFLOW_ROOT are marked #[serial] so
//! they run sequentially, not in parallel.

use lf_common::config::{default_root_folder, RootFolderInitializer, RootFolderResolver};
use serial_test::serial;
use std::env;

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var("LEADFLOW_ROOT_FOLDER");
    env::remove_var("LEADFLOW_ROOT");

    let resolver = RootFolderResolver::new("test-module");
    let root_folder = resolver.resolve();

    assert!(!root_folder.as_os_str().is_empty());
    assert_eq!(root_folder, default_root_folder());
}

#[test]
#[serial]
fn test_resolver_env_var_priority() {
    let test_path = "/tmp/leadflow-test-env-folder";
    env::set_var("LEADFLOW_ROOT_FOLDER", test_path);

    let resolver = RootFolderResolver::new("test-module");
    let root_folder = resolver.resolve();

    env::remove_var("LEADFLOW_ROOT_FOLDER");
    assert_eq!(root_folder.to_string_lossy(), test_path);
}

#[test]
#[serial]
fn test_resolver_secondary_env_var() {
    env::remove_var("LEADFLOW_ROOT_FOLDER");
    let test_path = "/tmp/leadflow-test-short-env";
    env::set_var("LEADFLOW_ROOT", test_path);

    let resolver = RootFolderResolver::new("test-module");
    let root_folder = resolver.resolve();

    env::remove_var("LEADFLOW_ROOT");
    assert_eq!(root_folder.to_string_lossy(), test_path);
}

#[test]
#[serial]
fn test_cli_arg_beats_env_var() {
    env::set_var("LEADFLOW_ROOT_FOLDER", "/tmp/leadflow-env-loser");

    let resolver = RootFolderResolver::new("test-module")
        .with_cli_arg(Some("/tmp/leadflow-cli-winner".to_string()));
    let root_folder = resolver.resolve();

    env::remove_var("LEADFLOW_ROOT_FOLDER");
    assert_eq!(root_folder.to_string_lossy(), "/tmp/leadflow-cli-winner");
}

#[test]
fn test_initializer_database_path() {
    let initializer = RootFolderInitializer::new("/tmp/leadflow-root".into());
    assert_eq!(
        initializer.database_path().to_string_lossy(),
        "/tmp/leadflow-root/leadflow.db"
    );
}

#[test]
fn test_initializer_creates_directory() {
    let dir = tempfile::TempDir::new().expect("Should create temp dir");
    let nested = dir.path().join("deeply").join("nested").join("root");

    let initializer = RootFolderInitializer::new(nested.clone());
    initializer
        .ensure_directory_exists()
        .expect("Should create directory");

    assert!(nested.is_dir());
    // Idempotent
    initializer
        .ensure_directory_exists()
        .expect("Should tolerate existing directory");
}
