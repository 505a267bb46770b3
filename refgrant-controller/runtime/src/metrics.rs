use crate::index::{self, SharedIndex};
use prometheus_client::{
    encoding::EncodeLabelSet,
    metrics::{counter::Counter, family::Family},
    registry::Registry,
};

/// Registers the controller's metrics at the root of `reg`.
pub fn register(reg: &mut Registry, grants: SharedIndex) -> AdmissionMetrics {
    index::metrics::register(reg, grants);
    AdmissionMetrics::register(reg.sub_registry_with_prefix("refgrant_admission"))
}

#[derive(Clone, Debug, Default)]
pub struct AdmissionMetrics {
    decisions: Family<DecisionLabels, Counter>,
}

#[derive(Clone, Hash, PartialEq, Eq, EncodeLabelSet, Debug)]
struct DecisionLabels {
    result: &'static str,
}

// === impl AdmissionMetrics ===

impl AdmissionMetrics {
    pub fn register(reg: &mut Registry) -> Self {
        let decisions = Family::<DecisionLabels, Counter>::default();
        reg.register(
            "decisions",
            "Total number of PersistentVolumeClaim admission decisions",
            decisions.clone(),
        );
        Self { decisions }
    }

    pub fn allowed(&self) {
        self.inc("allowed");
    }

    pub fn denied(&self) {
        self.inc("denied");
    }

    /// Counts requests that couldn't be evaluated.
    pub fn error(&self) {
        self.inc("error");
    }

    fn inc(&self, result: &'static str) {
        self.decisions.get_or_create(&DecisionLabels { result }).inc();
    }

    #[cfg(test)]
    pub(crate) fn get(&self, result: &'static str) -> u64 {
        self.decisions.get_or_create(&DecisionLabels { result }).get()
    }
}
