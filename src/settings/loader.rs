//! Settings file discovery and environment overlay.
//!
//! The file layer comes from `templar.toml` in the working directory (or an
//! explicit path). Environment variables prefixed `TEMPLAR_` override file
//! values key by key; the prefix families `TEMPLAR_FILTER_<NAME>` and
//! `TEMPLAR_HELPER_<NAME>` override individual extension bindings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

use super::{EngineSettings, RenderMode};

const SETTINGS_FILENAME: &str = "templar.toml";

const MODE_VAR: &str = "TEMPLAR_MODE";
const CACHING_VAR: &str = "TEMPLAR_CACHING";
const PRETTY_PRINT_VAR: &str = "TEMPLAR_PRETTY_PRINT";
const ENCODING_VAR: &str = "TEMPLAR_ENCODING";
const FILTER_VAR_PREFIX: &str = "TEMPLAR_FILTER_";
const HELPER_VAR_PREFIX: &str = "TEMPLAR_HELPER_";

/// The file layer in raw form. Values stay untyped here so that a bad value
/// for one key is a value error naming that key, not a parse failure that
/// discards the whole file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct FileSettings {
    mode: Option<toml::Value>,
    caching: Option<toml::Value>,
    pretty_print: Option<toml::Value>,
    encoding: Option<toml::Value>,
    filters: BTreeMap<String, toml::Value>,
    helpers: BTreeMap<String, toml::Value>,
}

/// Load engine settings: file layer first, then environment overrides.
///
/// A missing settings file is not an error; the file layer is simply empty.
/// An unreadable or syntactically unparseable file is logged and ignored.
/// An invalid value for a recognized key, in the file or in the environment,
/// is fatal.
pub fn load_settings(path: Option<&Path>) -> Result<EngineSettings, ConfigError> {
    let mut settings = EngineSettings::default();
    if let Some(file) = read_file_layer(path) {
        merge_file_layer(&mut settings, file)?;
    }
    apply_env_overrides(&mut settings)?;
    Ok(settings)
}

/// Read the file layer, falling back to an empty layer when the file is
/// absent, unreadable, or not valid TOML.
fn read_file_layer(path: Option<&Path>) -> Option<FileSettings> {
    let path = path.map_or_else(|| PathBuf::from(SETTINGS_FILENAME), Path::to_path_buf);
    if !path.is_file() {
        tracing::debug!(?path, "No settings file, using defaults");
        return None;
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(file) => {
                tracing::debug!(?path, "Loaded engine settings");
                Some(file)
            }
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to parse settings file, using defaults");
                None
            }
        },
        Err(e) => {
            tracing::warn!(?path, error = %e, "Failed to read settings file, using defaults");
            None
        }
    }
}

/// Apply file values over the defaults, validating each recognized key.
fn merge_file_layer(
    settings: &mut EngineSettings,
    file: FileSettings,
) -> Result<(), ConfigError> {
    if let Some(value) = file.mode {
        let label = expect_str("mode", &value)?;
        settings.mode =
            RenderMode::from_label(label).ok_or_else(|| ConfigError::InvalidValue {
                key: "mode".to_string(),
                value: label.to_string(),
                reason: "expected one of html, xml, xhtml".to_string(),
            })?;
    }
    if let Some(value) = file.caching {
        settings.caching = expect_bool("caching", &value)?;
    }
    if let Some(value) = file.pretty_print {
        settings.pretty_print = expect_bool("pretty-print", &value)?;
    }
    if let Some(value) = file.encoding {
        settings.encoding = expect_str("encoding", &value)?.to_string();
    }
    for (name, value) in file.filters {
        let binding = expect_str(&format!("filters.{name}"), &value)?.to_string();
        settings.filters.insert(name, binding);
    }
    for (name, value) in file.helpers {
        let binding = expect_str(&format!("helpers.{name}"), &value)?.to_string();
        settings.helpers.insert(name, binding);
    }
    Ok(())
}

fn expect_str<'v>(key: &str, value: &'v toml::Value) -> Result<&'v str, ConfigError> {
    value.as_str().ok_or_else(|| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: "expected a string".to_string(),
    })
}

fn expect_bool(key: &str, value: &toml::Value) -> Result<bool, ConfigError> {
    value.as_bool().ok_or_else(|| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: "expected a boolean".to_string(),
    })
}

fn apply_env_overrides(settings: &mut EngineSettings) -> Result<(), ConfigError> {
    if let Ok(value) = std::env::var(MODE_VAR) {
        settings.mode =
            RenderMode::from_label(&value).ok_or_else(|| ConfigError::InvalidValue {
                key: MODE_VAR.to_string(),
                value,
                reason: "expected one of html, xml, xhtml".to_string(),
            })?;
    }
    if let Ok(value) = std::env::var(CACHING_VAR) {
        settings.caching = parse_bool(CACHING_VAR, &value)?;
    }
    if let Ok(value) = std::env::var(PRETTY_PRINT_VAR) {
        settings.pretty_print = parse_bool(PRETTY_PRINT_VAR, &value)?;
    }
    if let Ok(value) = std::env::var(ENCODING_VAR) {
        settings.encoding = value;
    }

    // Extension families: the suffix after the prefix is the extension name,
    // lowercased to match file-layer keys. Non-Unicode entries elsewhere in
    // the process environment are skipped.
    for (key, value) in std::env::vars_os() {
        let (Some(key), Some(value)) = (key.to_str(), value.to_str()) else {
            continue;
        };
        if let Some(suffix) = key.strip_prefix(FILTER_VAR_PREFIX) {
            if !suffix.is_empty() {
                settings
                    .filters
                    .insert(suffix.to_ascii_lowercase(), value.to_string());
            }
        } else if let Some(suffix) = key.strip_prefix(HELPER_VAR_PREFIX) {
            if !suffix.is_empty() {
                settings
                    .helpers
                    .insert(suffix.to_ascii_lowercase(), value.to_string());
            }
        }
    }
    Ok(())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
