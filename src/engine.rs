//! The view engine: applies an assembled configuration to Tera.

use std::path::PathBuf;

use tera::{Context, Tera};

use crate::config::ViewEngineConfig;
use crate::loader::{load_templates, LoaderError};
use crate::settings::RenderMode;

/// A configured template engine bound to a template directory.
///
/// With caching enabled (the default) templates are compiled once and reused
/// across renders; [`ViewEngine::clear_cache`] drops the compiled set and the
/// next render reloads lazily. With caching disabled, templates are reloaded
/// from disk before every render.
#[derive(Debug)]
pub struct ViewEngine {
    tera: Tera,
    config: ViewEngineConfig,
    template_dir: PathBuf,
    base_context: Context,
    loaded: bool,
}

impl ViewEngine {
    /// Load templates from `template_dir` and apply the configuration.
    pub fn load(
        template_dir: impl Into<PathBuf>,
        config: ViewEngineConfig,
    ) -> Result<Self, EngineError> {
        let mut base_context = Context::new();
        for (name, value) in &config.helpers {
            base_context.insert(name.as_str(), value);
        }
        let mut engine = Self {
            tera: Tera::default(),
            config,
            template_dir: template_dir.into(),
            base_context,
            loaded: false,
        };
        engine.reload()?;
        Ok(engine)
    }

    /// Render a template by its root-relative name. Helper values are in
    /// scope for every render; the caller's context takes precedence on
    /// collision.
    pub fn render(&mut self, name: &str, context: &Context) -> Result<String, EngineError> {
        if !self.config.caching || !self.loaded {
            self.reload()?;
        }
        let mut ctx = self.base_context.clone();
        ctx.extend(context.clone());
        let output = self
            .tera
            .render(name, &ctx)
            .map_err(|e| EngineError::Render {
                template: name.to_string(),
                source: e,
            })?;
        if self.config.pretty_print {
            Ok(output)
        } else {
            Ok(compact(&output))
        }
    }

    /// Drop the compiled template set. The next render reloads from disk.
    pub fn clear_cache(&mut self) {
        self.tera = Tera::default();
        self.loaded = false;
        tracing::debug!("Cleared compiled template cache");
    }

    /// Number of templates currently compiled.
    pub fn cached_templates(&self) -> usize {
        self.tera.get_template_names().count()
    }

    /// The configured render mode, for the host framework.
    pub fn mode(&self) -> RenderMode {
        self.config.mode
    }

    fn reload(&mut self) -> Result<(), EngineError> {
        let templates = load_templates(&self.template_dir, self.config.encoding)?;
        let mut tera = Tera::default();
        tera.add_raw_templates(templates)
            .map_err(|e| EngineError::Parse {
                dir: self.template_dir.clone(),
                source: e,
            })?;
        for (name, filter) in &self.config.filters {
            tera.register_filter(name, *filter);
        }
        self.tera = tera;
        self.loaded = true;
        tracing::debug!(
            dir = %self.template_dir.display(),
            templates = self.cached_templates(),
            "Compiled templates"
        );
        Ok(())
    }
}

/// Explicit end-of-lifecycle teardown for a view engine: a single cache
/// clear, mirroring the engine's disposal contract.
pub fn teardown(engine: &mut ViewEngine) {
    engine.clear_cache();
}

/// Collapse blank lines and trailing whitespace for compact output.
fn compact(output: &str) -> String {
    let mut compacted = output
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    if output.ends_with('\n') && !compacted.is_empty() {
        compacted.push('\n');
    }
    compacted
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error("failed to compile templates from {dir}: {source}")]
    Parse { dir: PathBuf, source: tera::Error },

    #[error("failed to render '{template}': {source}")]
    Render { template: String, source: tera::Error },
}
