//! Data source / resource registry
//!
//! Maps type names to their implementations. Built once at startup and passed
//! to whoever dispatches operations; it is never mutated afterwards.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::error::Diagnostic;
use crate::resources::{
    DataSource, Resource, ZoneCacheReserveDataSource, ZoneCacheReserveResource,
};
use crate::schema::Schema;

/// Registered data sources and resources, keyed by type name.
#[derive(Clone, Default)]
pub struct Registry {
    data_sources: BTreeMap<&'static str, Arc<dyn DataSource>>,
    resources: BTreeMap<&'static str, Arc<dyn Resource>>,
}

/// Schemas of every registered type, as exposed to the host.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderSchema {
    pub data_sources: BTreeMap<&'static str, Schema>,
    pub resources: BTreeMap<&'static str, Schema>,
}

impl Registry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every type this crate implements.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register_data_source(Arc::new(ZoneCacheReserveDataSource));
        registry.register_resource(Arc::new(ZoneCacheReserveResource));
        registry
    }

    /// Register a data source under its type name, replacing any previous one.
    pub fn register_data_source(&mut self, data_source: Arc<dyn DataSource>) {
        let name = data_source.type_name();
        if self.data_sources.insert(name, data_source).is_some() {
            log::warn!("data source {name} registered twice, keeping the latest");
        }
    }

    /// Register a resource under its type name, replacing any previous one.
    pub fn register_resource(&mut self, resource: Arc<dyn Resource>) {
        let name = resource.type_name();
        if self.resources.insert(name, resource).is_some() {
            log::warn!("resource {name} registered twice, keeping the latest");
        }
    }

    pub fn data_source(&self, name: &str) -> Result<Arc<dyn DataSource>, Diagnostic> {
        self.data_sources
            .get(name)
            .cloned()
            .ok_or_else(|| Diagnostic::UnknownType {
                kind: "data source",
                name: name.to_string(),
            })
    }

    pub fn resource(&self, name: &str) -> Result<Arc<dyn Resource>, Diagnostic> {
        self.resources
            .get(name)
            .cloned()
            .ok_or_else(|| Diagnostic::UnknownType {
                kind: "resource",
                name: name.to_string(),
            })
    }

    /// Sorted data source type names.
    pub fn data_source_names(&self) -> Vec<&'static str> {
        self.data_sources.keys().copied().collect()
    }

    /// Sorted resource type names.
    pub fn resource_names(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }

    pub fn schemas(&self) -> ProviderSchema {
        ProviderSchema {
            data_sources: self
                .data_sources
                .iter()
                .map(|(name, ds)| (*name, ds.schema()))
                .collect(),
            resources: self
                .resources
                .iter()
                .map(|(name, r)| (*name, r.schema()))
                .collect(),
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("data_sources", &self.data_source_names())
            .field("resources", &self.resource_names())
            .finish()
    }
}
