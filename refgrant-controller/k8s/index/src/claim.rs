use refgrant_controller_core::AccessRequest;
use refgrant_controller_k8s_api::{claim::cross_namespace_data_source, PersistentVolumeClaimSpec};

/// Builds the access request for a claim whose `dataSourceRef` lives in
/// another namespace.
///
/// Returns `None` when the claim doesn't reference another namespace; such
/// claims need no grant.
pub fn access_request(
    namespace: &str,
    name: &str,
    spec: &PersistentVolumeClaimSpec,
) -> Option<AccessRequest> {
    let data_source = cross_namespace_data_source(namespace, spec)?;
    Some(AccessRequest::from_claim(
        namespace,
        name,
        data_source.namespace.as_deref().unwrap_or_default(),
        data_source.api_group.clone(),
        &data_source.kind,
        &data_source.name,
    ))
}
