//! ResourceRegistry for mapping route names to ResourceModel implementations.

use crate::domain::resource::{CustomerModel, ProductModel, ResourceModel};
use std::sync::Arc;

/// The fixed set of resources the HTTP layer exposes, in registration order.
pub struct ResourceRegistry {
    models: Vec<Arc<dyn ResourceModel>>,
}

impl ResourceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    /// The registry the server runs with: customers and products.
    pub fn standard() -> Self {
        let mut reg = Self::new();
        reg.register(CustomerModel);
        reg.register(ProductModel);
        reg
    }

    /// Registers a model. A later model with the same table name replaces the earlier one.
    pub fn register<M: ResourceModel + 'static>(&mut self, model: M) {
        self.models.retain(|m| m.table_name() != model.table_name());
        self.models.push(Arc::new(model));
    }

    pub fn models(&self) -> impl Iterator<Item = &Arc<dyn ResourceModel>> {
        self.models.iter()
    }

    /// Returns all registered table names.
    pub fn list_models(&self) -> Vec<String> {
        self.models.iter().map(|m| m.table_name().to_string()).collect()
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
