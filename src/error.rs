//! Configuration errors surfaced while loading settings or assembling the
//! engine configuration.

use thiserror::Error;

/// Errors raised while resolving engine settings into a view-engine
/// configuration. All of these abort the configuration build; there is no
/// partial-failure recovery.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("unsupported encoding label '{0}'")]
    UnsupportedEncoding(String),

    #[error(
        "could not register filter '{name}' (settings key filters.{name}): \
         no binding '{binding}' in the registry"
    )]
    UnknownFilter { name: String, binding: String },

    #[error(
        "could not register helper '{name}' (settings key helpers.{name}): \
         no binding '{binding}' in the registry"
    )]
    UnknownHelper { name: String, binding: String },
}
