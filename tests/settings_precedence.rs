//! Layered settings resolution: environment over file over defaults.

use std::path::PathBuf;

use serial_test::serial;
use templar::{load_settings, view_engine_config, EngineSettings, Registry, RenderMode};

const SCALAR_VARS: [&str; 4] = [
    "TEMPLAR_MODE",
    "TEMPLAR_CACHING",
    "TEMPLAR_PRETTY_PRINT",
    "TEMPLAR_ENCODING",
];

/// Remove every templar-related variable so tests start from a clean slate.
fn clear_env() {
    for key in SCALAR_VARS {
        std::env::remove_var(key);
    }
    let prefixed: Vec<String> = std::env::vars()
        .map(|(k, _)| k)
        .filter(|k| k.starts_with("TEMPLAR_FILTER_") || k.starts_with("TEMPLAR_HELPER_"))
        .collect();
    for key in prefixed {
        std::env::remove_var(key);
    }
}

fn write_settings(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("templar.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
#[serial]
fn test_defaults_apply_when_no_source_has_the_key() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();

    let settings = load_settings(Some(&dir.path().join("missing.toml"))).unwrap();
    assert_eq!(settings.mode, RenderMode::Xhtml);
    assert!(settings.caching);
    assert!(!settings.pretty_print);
    assert_eq!(settings.encoding, "utf-8");
}

#[test]
#[serial]
fn test_file_value_applies_when_env_is_absent() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_settings(&dir, "mode = \"html\"\ncaching = false\nencoding = \"windows-1252\"\n");

    let settings = load_settings(Some(&path)).unwrap();
    assert_eq!(settings.mode, RenderMode::Html);
    assert!(!settings.caching);
    assert_eq!(settings.encoding, "windows-1252");
    // keys the file does not set still default
    assert!(!settings.pretty_print);
}

#[test]
#[serial]
fn test_env_value_wins_over_file_value() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_settings(&dir, "mode = \"html\"\npretty-print = false\n");

    std::env::set_var("TEMPLAR_MODE", "xml");
    std::env::set_var("TEMPLAR_PRETTY_PRINT", "true");
    let settings = load_settings(Some(&path)).unwrap();
    clear_env();

    assert_eq!(settings.mode, RenderMode::Xml);
    assert!(settings.pretty_print);
}

#[test]
#[serial]
fn test_extension_merge_prefers_env_bindings() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_settings(&dir, "[filters]\nshiny = \"css\"\nplain = \"cdata\"\n");

    // Same suffix in both sources: env binding wins. Env-only suffixes are added.
    std::env::set_var("TEMPLAR_FILTER_SHINY", "js");
    std::env::set_var("TEMPLAR_HELPER_MATH", "math");
    let settings = load_settings(Some(&path)).unwrap();
    clear_env();

    assert_eq!(settings.filters.get("shiny").unwrap(), "js");
    assert_eq!(settings.filters.get("plain").unwrap(), "cdata");
    assert_eq!(settings.helpers.get("math").unwrap(), "math");
}

#[test]
#[serial]
fn test_invalid_env_value_is_fatal_and_names_the_key() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();

    std::env::set_var("TEMPLAR_CACHING", "maybe");
    let err = load_settings(Some(&dir.path().join("missing.toml"))).unwrap_err();
    clear_env();

    assert!(err.to_string().contains("TEMPLAR_CACHING"), "{err}");
}

#[test]
#[serial]
fn test_invalid_file_value_is_fatal_and_names_the_key() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_settings(&dir, "mode = \"jade\"\ncaching = false\n");

    let err = load_settings(Some(&path)).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("mode"), "{message}");
    assert!(message.contains("'jade'"), "{message}");
}

#[test]
#[serial]
fn test_valid_file_keys_apply_alongside_defaults() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    // every value valid: the caching override must not be lost
    let path = write_settings(&dir, "caching = false\n");

    let settings = load_settings(Some(&path)).unwrap();
    assert!(!settings.caching);
    assert_eq!(settings.mode, RenderMode::Xhtml);
}

#[test]
#[serial]
fn test_producer_resolves_env_bindings_against_registry() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();

    std::env::set_var("TEMPLAR_FILTER_SHINY", "css");
    let config = view_engine_config(
        Some(&dir.path().join("missing.toml")),
        &Registry::with_builtins(),
    );
    clear_env();

    assert!(config.is_ok());
}

#[test]
#[serial]
fn test_producer_fails_on_unregistered_binding() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();

    std::env::set_var("TEMPLAR_FILTER_SHINY", "com.example.shiny");
    let err = view_engine_config(
        Some(&dir.path().join("missing.toml")),
        &Registry::with_builtins(),
    )
    .unwrap_err();
    clear_env();

    let message = err.to_string();
    assert!(message.contains("filters.shiny"), "{message}");
    assert!(message.contains("com.example.shiny"), "{message}");
}

#[test]
#[serial]
fn test_settings_struct_defaults_match_loader_defaults() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();

    let loaded = load_settings(Some(&dir.path().join("missing.toml"))).unwrap();
    let defaults = EngineSettings::default();
    assert_eq!(loaded.mode, defaults.mode);
    assert_eq!(loaded.caching, defaults.caching);
    assert_eq!(loaded.pretty_print, defaults.pretty_print);
    assert_eq!(loaded.encoding, defaults.encoding);
}
