//! Shared-instance lookup through a provider catalog.
//!
//! The catalog resolves a type name in four delegated steps: enumerate
//! candidates, select one, obtain an activation scope, and materialize the
//! reference. Each step receives the previous step's (possibly absent)
//! result; an absent result does not short-circuit the chain, it simply
//! propagates through to the final reference.

/// A registered implementation candidate for a requested type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub type_name: String,
}

/// An activation scope under which an instance is materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub scope: String,
}

/// A materialized shared instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedInstance {
    pub type_name: String,
}

/// The provider the lookup delegates to.
pub trait Catalog {
    /// Enumerate implementation candidates for a type name.
    fn candidates(&self, type_name: &str) -> Option<Vec<Candidate>>;

    /// Select a single candidate from the enumeration.
    fn select(&self, candidates: Option<Vec<Candidate>>) -> Option<Candidate>;

    /// Obtain the activation scope for the selected candidate.
    fn activation(&self, selected: Option<&Candidate>) -> Option<Activation>;

    /// Materialize a reference to the instance.
    fn reference(
        &self,
        selected: Option<Candidate>,
        type_name: &str,
        activation: Option<Activation>,
    ) -> Option<SharedInstance>;
}

/// Looks up shared instances by delegating through a [`Catalog`].
#[derive(Debug)]
pub struct InstanceLookup<C> {
    catalog: C,
}

impl<C: Catalog> InstanceLookup<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Resolve a new instance of the named type, or `None` when the catalog
    /// cannot provide one.
    pub fn new_instance(&self, type_name: &str) -> Option<SharedInstance> {
        let candidates = self.catalog.candidates(type_name);
        let selected = self.catalog.select(candidates);
        let activation = self.catalog.activation(selected.as_ref());
        self.catalog.reference(selected, type_name, activation)
    }
}
