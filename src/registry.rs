//! Startup-populated registry of filter and helper bindings.
//!
//! Settings name extensions by binding id; the application registers the
//! matching constructors here before assembling the engine configuration.
//! A binding id referenced from settings but absent from the registry fails
//! assembly.

use std::collections::HashMap;

use tera::Value;

use crate::filters;

/// A Tera filter in fn-pointer shape.
pub type FilterFn = fn(&Value, &HashMap<String, Value>) -> tera::Result<Value>;

/// Constructor for a helper value shared with every rendered template.
pub type HelperFn = fn() -> Value;

/// Filter and helper bindings, keyed by binding id.
#[derive(Debug, Default)]
pub struct Registry {
    filters: HashMap<String, FilterFn>,
    helpers: HashMap<String, HelperFn>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the engine's stock filters:
    /// `css`, `js`, and `cdata`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_filter("css", filters::css);
        registry.register_filter("js", filters::js);
        registry.register_filter("cdata", filters::cdata);
        registry
    }

    /// Register a filter constructor under a binding id.
    pub fn register_filter(&mut self, binding: impl Into<String>, filter: FilterFn) {
        self.filters.insert(binding.into(), filter);
    }

    /// Register a helper constructor under a binding id.
    pub fn register_helper(&mut self, binding: impl Into<String>, helper: HelperFn) {
        self.helpers.insert(binding.into(), helper);
    }

    pub(crate) fn filter(&self, binding: &str) -> Option<FilterFn> {
        self.filters.get(binding).copied()
    }

    pub(crate) fn helper(&self, binding: &str) -> Option<HelperFn> {
        self.helpers.get(binding).copied()
    }
}
