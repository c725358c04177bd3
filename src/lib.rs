//! Layered configuration and factory for a Tera-backed view engine.
//!
//! Engine settings (render mode, template caching, pretty-printing, template
//! encoding, and named filter/helper bindings) are resolved with a three-layer
//! precedence: `TEMPLAR_*` environment variables, then an optional
//! `templar.toml` settings file, then hard defaults. Named extensions are
//! bound through an explicit [`Registry`] populated by the application at
//! startup; the assembled [`ViewEngineConfig`] is the artifact handed to the
//! host framework's view-rendering extension point.
//!
//! # Modules
//!
//! - [`settings`] — Typed engine settings and the layered loader
//! - [`registry`] — Startup-populated filter/helper binding registry
//! - [`config`] — Settings + registry resolution into a [`ViewEngineConfig`]
//! - [`engine`] — The [`ViewEngine`] that applies a config to Tera
//! - [`lookup`] — Shared-instance lookup through a provider catalog

pub mod config;
pub mod engine;
pub mod lookup;
pub mod registry;
pub mod settings;

mod error;
mod filters;
mod loader;

pub use config::{view_engine_config, ViewEngineConfig};
pub use engine::{teardown, EngineError, ViewEngine};
pub use error::ConfigError;
pub use loader::LoaderError;
pub use registry::Registry;
pub use settings::{load_settings, EngineSettings, RenderMode};
