#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub use refgrant_controller_core as core;
pub use refgrant_controller_k8s_api as k8s;
pub use refgrant_controller_k8s_index as index;

mod admission;
mod args;
mod metrics;

pub use self::args::Args;

/// Serves grants from the watch-backed index.
#[derive(Clone, Debug)]
struct GrantLister(index::SharedIndex);

impl GrantLister {
    pub fn new(index: index::SharedIndex) -> Self {
        Self(index)
    }
}

#[async_trait::async_trait]
impl core::GrantProvider for GrantLister {
    async fn list_grants(&self, namespace: &str) -> anyhow::Result<Vec<core::Grant>> {
        Ok(self.0.read().grants(namespace))
    }
}
