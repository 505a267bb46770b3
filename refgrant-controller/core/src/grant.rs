use crate::{AccessRequest, CORE_GROUP};

/// A namespace-scoped grant permitting objects in other namespaces to
/// reference objects in `namespace`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grant {
    pub namespace: String,
    pub name: String,
    pub from: Vec<FromRule>,
    pub to: Vec<ToRule>,
}

/// Describes requesters covered by a grant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FromRule {
    /// An empty group is the core API group.
    pub group: String,
    pub kind: String,
    pub namespace: String,
}

/// Describes targets covered by a grant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToRule {
    /// An empty group is the core API group.
    pub group: String,
    pub kind: String,
    /// Absent or empty matches every object of the kind.
    pub name: Option<String>,
}

// === impl Grant ===

impl Grant {
    /// Returns true if any `from` rule covers the request's requester.
    pub fn permits_requester(&self, request: &AccessRequest) -> bool {
        self.from.iter().any(|from| from.matches(request))
    }

    /// Returns true if any `to` rule covers the request's target.
    pub fn permits_target(&self, request: &AccessRequest) -> bool {
        self.to.iter().any(|to| to.matches(request))
    }
}

// === impl FromRule ===

impl FromRule {
    /// Only core-group requesters are covered, whatever group the request
    /// names.
    pub fn matches(&self, request: &AccessRequest) -> bool {
        self.group == CORE_GROUP
            && self.kind == request.requesting_kind
            && self.namespace == request.requesting_namespace
    }
}

// === impl ToRule ===

impl ToRule {
    pub fn matches(&self, request: &AccessRequest) -> bool {
        if self.group != request.target_group() || self.kind != request.target_kind {
            return false;
        }

        match self.name.as_deref() {
            None | Some("") => true,
            Some(name) => name == request.target_name,
        }
    }
}
