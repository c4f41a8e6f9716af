//! Tests for loading, saving and token lookup

use std::fs;

use issue_digest::config::{GlobalConfig, TokenSource};
use issue_digest::core::models::RepoRef;
use issue_digest::paths;
use serial_test::serial;
use tempfile::TempDir;

/// Sets or clears environment variables for one test, restoring them on drop
struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn new(vars: &[(&'static str, Option<&str>)]) -> Self {
        let saved = vars.iter().map(|(k, _)| (*k, std::env::var(k).ok())).collect();
        for (key, value) in vars {
            set(key, *value);
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            set(key, value.as_deref());
        }
    }
}

fn set(key: &str, value: Option<&str>) {
    // SAFETY: env-touching tests are #[serial], no other thread reads the environment
    unsafe {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }
}

// =============================================================================
// FILE HANDLING
// =============================================================================

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = GlobalConfig::load_from(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, GlobalConfig::default());
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/config.toml");

    let mut config = GlobalConfig::default();
    config.add_repo(&RepoRef::new("octo", "widgets"));
    config.plan.priority_labels = vec!["p0".to_string(), "p1".to_string()];
    config.save_to(&path).unwrap();

    let loaded = GlobalConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.current_repo().unwrap(), Some(RepoRef::new("octo", "widgets")));
}

#[cfg(unix)]
#[test]
fn test_saved_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let mut config = GlobalConfig::default();
    config.set_token("ghp_secret");
    config.save_to(&path).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_corrupt_file_is_moved_aside() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[github\ncurrent = ").unwrap();

    let err = GlobalConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("invalid config"));
    assert!(!path.exists());

    let backups: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with("config.toml.bak."))
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(backups[0].path()).unwrap(), "[github\ncurrent = ");

    // The next load starts clean
    assert_eq!(GlobalConfig::load_from(&path).unwrap(), GlobalConfig::default());
}

#[test]
#[serial]
fn test_config_path_honours_override() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    let _env = EnvGuard::new(&[(paths::CONFIG_ENV, path.to_str())]);

    assert_eq!(GlobalConfig::config_path(), path);
}

// =============================================================================
// TOKEN LOOKUP
// =============================================================================

#[test]
#[serial]
fn test_github_token_beats_gh_token_and_file() {
    let _env = EnvGuard::new(&[("GITHUB_TOKEN", Some("from-github")), ("GH_TOKEN", Some("from-gh"))]);
    let mut config = GlobalConfig::default();
    config.set_token("from-file");

    assert_eq!(
        config.token(),
        Some(("from-github".to_string(), TokenSource::Env("GITHUB_TOKEN")))
    );
}

#[test]
#[serial]
fn test_gh_token_beats_file() {
    let _env = EnvGuard::new(&[("GITHUB_TOKEN", None), ("GH_TOKEN", Some("from-gh"))]);
    let mut config = GlobalConfig::default();
    config.set_token("from-file");

    assert_eq!(config.token(), Some(("from-gh".to_string(), TokenSource::Env("GH_TOKEN"))));
}

#[test]
#[serial]
fn test_file_token_used_without_env() {
    let _env = EnvGuard::new(&[("GITHUB_TOKEN", Some("  ")), ("GH_TOKEN", None)]);
    let mut config = GlobalConfig::default();
    assert_eq!(config.token(), None);

    config.set_token(" from-file\n");
    assert_eq!(config.token(), Some(("from-file".to_string(), TokenSource::ConfigFile)));

    assert!(config.clear_token());
    assert_eq!(config.token(), None);
    assert!(!config.clear_token());
}
