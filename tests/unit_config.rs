use std::fs;
use std::path::PathBuf;

use beatbook::config::Config;

#[test]
fn config_defaults_when_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::load_from_dir(dir.path());

    assert!(config.storage.dir.is_none());
    assert_eq!(config.tasks.slot, "tasks");
    assert_eq!(config.library.min_bpm, 60);
    assert_eq!(config.library.max_bpm, 200);
}

#[test]
fn config_overrides_from_toml() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join(".beatbook.toml");
    let toml = r#"
[storage]
dir = "/var/lib/beatbook"

[tasks]
slot = "crew"

[library]
min_bpm = 100
max_bpm = 180
"#;

    fs::write(&config_path, toml)?;

    let config = Config::load_from_dir(dir.path());

    assert_eq!(config.storage.dir, Some(PathBuf::from("/var/lib/beatbook")));
    assert_eq!(config.tasks.slot, "crew");
    assert_eq!(config.library.min_bpm, 100);
    assert_eq!(config.library.max_bpm, 180);

    Ok(())
}

#[test]
fn config_load_rejects_invalid_toml() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join(".beatbook.toml");
    fs::write(&config_path, "this = [not valid").expect("write config");

    let result = Config::load(&config_path);
    assert!(result.is_err());
}

#[test]
fn invalid_config_falls_back_to_defaults_from_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join(".beatbook.toml");
    fs::write(&config_path, "[library]\nmin_bpm = 180\nmax_bpm = 90").expect("write config");

    // load_from_dir never fails; a broken file reads as defaults.
    let config = Config::load_from_dir(dir.path());
    assert_eq!(config.library.min_bpm, 60);
    assert_eq!(config.library.max_bpm, 200);
}
