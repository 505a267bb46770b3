use crate::{CLAIM_KIND, CORE_GROUP};

/// Asks whether one object may read another object in a different namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessRequest {
    pub requesting_namespace: String,
    pub requesting_name: String,
    /// `None` is the core API group. Grants only cover core-group
    /// requesters, so a named group is never granted.
    pub requesting_group: Option<String>,
    pub requesting_kind: String,

    /// Must be non-empty; requests without a target namespace are rejected
    /// before any grant is consulted.
    pub target_namespace: String,
    /// `None` is the core API group.
    pub target_group: Option<String>,
    pub target_kind: String,
    pub target_name: String,
}

// === impl AccessRequest ===

impl AccessRequest {
    /// Builds a request on behalf of a `PersistentVolumeClaim` that uses the
    /// target as its data source.
    pub fn from_claim(
        namespace: impl ToString,
        name: impl ToString,
        target_namespace: impl ToString,
        target_group: Option<String>,
        target_kind: impl ToString,
        target_name: impl ToString,
    ) -> Self {
        Self {
            requesting_namespace: namespace.to_string(),
            requesting_name: name.to_string(),
            requesting_group: None,
            requesting_kind: CLAIM_KIND.to_string(),
            target_namespace: target_namespace.to_string(),
            target_group,
            target_kind: target_kind.to_string(),
            target_name: target_name.to_string(),
        }
    }

    pub(crate) fn target_group(&self) -> &str {
        self.target_group.as_deref().unwrap_or(CORE_GROUP)
    }
}
