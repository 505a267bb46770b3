use crate::grant;
use ahash::AHashMap as HashMap;
use parking_lot::RwLock;
use refgrant_controller_core::Grant;
use refgrant_controller_k8s_api::{gateway, ResourceExt};
use std::{collections::hash_map::Entry, sync::Arc};

pub type SharedIndex = Arc<RwLock<Index>>;

/// Holds all `ReferenceGrant`s by namespace.
#[derive(Debug, Default)]
pub struct Index {
    pub(crate) namespaces: HashMap<String, Namespace>,
}

#[derive(Debug, Default)]
pub(crate) struct Namespace {
    pub(crate) grants: HashMap<String, Grant>,
}

// === impl Index ===

impl Index {
    pub fn shared() -> SharedIndex {
        Arc::new(RwLock::new(Self::default()))
    }

    /// Returns a snapshot of the grants in `namespace`.
    pub fn grants(&self, namespace: &str) -> Vec<Grant> {
        self.namespaces
            .get(namespace)
            .map(|ns| ns.grants.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.namespaces.values().map(|ns| ns.grants.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

impl kubert::index::IndexNamespacedResource<gateway::ReferenceGrant> for Index {
    fn apply(&mut self, resource: gateway::ReferenceGrant) {
        let Some(namespace) = resource.namespace() else {
            tracing::warn!(name = %resource.name_any(), "ReferenceGrant has no namespace");
            return;
        };
        let name = resource.name_any();
        tracing::debug!(%namespace, %name, "Indexing ReferenceGrant");

        let grant = grant::from_spec(namespace.clone(), name.clone(), resource.spec);
        if grant.from.is_empty() || grant.to.is_empty() {
            tracing::debug!(%namespace, %name, "ReferenceGrant permits nothing");
        }

        self.namespaces
            .entry(namespace)
            .or_default()
            .grants
            .insert(name, grant);
    }

    fn delete(&mut self, namespace: String, name: String) {
        tracing::debug!(%namespace, %name, "Removing ReferenceGrant");
        if let Entry::Occupied(mut ns) = self.namespaces.entry(namespace) {
            ns.get_mut().grants.remove(&name);
            if ns.get().grants.is_empty() {
                ns.remove();
            }
        }
    }
}
