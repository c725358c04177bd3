//! Typed engine settings with layered resolution.
//!
//! Settings come from three sources, highest precedence first:
//!
//! 1. `TEMPLAR_*` environment variables
//! 2. An optional `templar.toml` settings file
//! 3. Hard defaults

mod loader;

pub use loader::load_settings;

use std::collections::BTreeMap;

/// Output mode forwarded to the view engine. Default: [`RenderMode::Xhtml`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Html,
    Xml,
    Xhtml,
}

impl Default for RenderMode {
    fn default() -> Self {
        Self::Xhtml
    }
}

impl RenderMode {
    /// Parse a mode label as it appears in a settings source.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "html" => Some(Self::Html),
            "xml" => Some(Self::Xml),
            "xhtml" => Some(Self::Xhtml),
            _ => None,
        }
    }
}

/// Engine settings as resolved from the three configuration layers.
///
/// `filters` and `helpers` map an extension name (the name templates use) to
/// a binding id looked up in the application's [`Registry`].
///
/// [`Registry`]: crate::registry::Registry
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Render mode, one of `html`, `xml`, `xhtml`.
    pub mode: RenderMode,

    /// Compiled templates are cached unless this is set to false.
    pub caching: bool,

    /// Compact output unless this is set to true.
    pub pretty_print: bool,

    /// Encoding label used when decoding template files.
    pub encoding: String,

    /// Filter name → binding id.
    pub filters: BTreeMap<String, String>,

    /// Helper name → binding id.
    pub helpers: BTreeMap<String, String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            caching: true,
            pretty_print: false,
            encoding: "utf-8".to_string(),
            filters: BTreeMap::new(),
            helpers: BTreeMap::new(),
        }
    }
}
