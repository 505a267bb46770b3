use crate::{AccessRequest, Grant};

#[cfg(test)]
mod tests;

/// Indicates that no grant permits a request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error(
    "accessing {target_namespace}/{target_name} of {target_kind} dataSource from \
     {requesting_namespace}/{requesting_name} isn't allowed"
)]
pub struct AccessDenied {
    pub target_namespace: String,
    pub target_name: String,
    pub target_kind: String,
    pub requesting_namespace: String,
    pub requesting_name: String,
}

/// Checks a request against the grants of its target namespace.
///
/// A single grant must permit both the requester and the target; a `from`
/// rule in one grant never combines with a `to` rule in another. The grants
/// are trusted to belong to `request.target_namespace`.
pub fn check<'g>(
    request: &AccessRequest,
    grants: impl IntoIterator<Item = &'g Grant>,
) -> Result<(), AccessDenied> {
    for grant in grants {
        if !grant.permits_requester(request) {
            continue;
        }

        if grant.permits_target(request) {
            return Ok(());
        }
    }

    Err(AccessDenied::from(request))
}

pub fn is_granted<'g>(
    request: &AccessRequest,
    grants: impl IntoIterator<Item = &'g Grant>,
) -> bool {
    check(request, grants).is_ok()
}

// === impl AccessDenied ===

impl From<&AccessRequest> for AccessDenied {
    fn from(request: &AccessRequest) -> Self {
        Self {
            target_namespace: request.target_namespace.clone(),
            target_name: request.target_name.clone(),
            target_kind: request.target_kind.clone(),
            requesting_namespace: request.requesting_namespace.clone(),
            requesting_name: request.requesting_name.clone(),
        }
    }
}
