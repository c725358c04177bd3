//! Assembly of engine settings into the view-engine configuration object.

use std::collections::BTreeMap;
use std::path::Path;

use encoding_rs::Encoding;
use tera::Value;

use crate::error::ConfigError;
use crate::registry::{FilterFn, Registry};
use crate::settings::{load_settings, EngineSettings, RenderMode};

/// The configuration object consumed by the host framework's view-rendering
/// extension point. Filter and helper bindings have been resolved to
/// instances; helpers are instantiated at assembly time.
#[derive(Debug)]
pub struct ViewEngineConfig {
    pub mode: RenderMode,
    pub caching: bool,
    pub pretty_print: bool,
    pub encoding: &'static Encoding,
    pub(crate) filters: BTreeMap<String, FilterFn>,
    pub(crate) helpers: BTreeMap<String, Value>,
}

impl ViewEngineConfig {
    /// Resolve settings against the registry. The first unknown binding or
    /// unsupported encoding label aborts assembly.
    pub fn assemble(settings: EngineSettings, registry: &Registry) -> Result<Self, ConfigError> {
        let encoding = Encoding::for_label(settings.encoding.as_bytes())
            .ok_or_else(|| ConfigError::UnsupportedEncoding(settings.encoding.clone()))?;

        let mut filters = BTreeMap::new();
        for (name, binding) in &settings.filters {
            let filter = registry
                .filter(binding)
                .ok_or_else(|| ConfigError::UnknownFilter {
                    name: name.clone(),
                    binding: binding.clone(),
                })?;
            filters.insert(name.clone(), filter);
        }

        let mut helpers = BTreeMap::new();
        for (name, binding) in &settings.helpers {
            let helper = registry
                .helper(binding)
                .ok_or_else(|| ConfigError::UnknownHelper {
                    name: name.clone(),
                    binding: binding.clone(),
                })?;
            helpers.insert(name.clone(), helper());
        }

        tracing::debug!(
            mode = ?settings.mode,
            caching = settings.caching,
            filters = filters.len(),
            helpers = helpers.len(),
            "Assembled view engine configuration"
        );

        Ok(Self {
            mode: settings.mode,
            caching: settings.caching,
            pretty_print: settings.pretty_print,
            encoding,
            filters,
            helpers,
        })
    }
}

/// Factory for the view-engine configuration: load layered settings, then
/// resolve them against the registry.
pub fn view_engine_config(
    path: Option<&Path>,
    registry: &Registry,
) -> Result<ViewEngineConfig, ConfigError> {
    let settings = load_settings(path)?;
    ViewEngineConfig::assemble(settings, registry)
}
