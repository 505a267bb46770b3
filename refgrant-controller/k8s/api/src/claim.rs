use crate::{PersistentVolumeClaimSpec, TypedObjectReference};

/// Returns the claim's `dataSourceRef` when it refers to an object outside of
/// the claim's namespace.
///
/// A reference without a namespace, or with an empty one, refers to the claim's
/// own namespace.
pub fn cross_namespace_data_source<'s>(
    claim_ns: &str,
    spec: &'s PersistentVolumeClaimSpec,
) -> Option<&'s TypedObjectReference> {
    let data_source = spec.data_source_ref.as_ref()?;
    match data_source.namespace.as_deref() {
        Some(ns) if !ns.is_empty() && ns != claim_ns => Some(data_source),
        _ => None,
    }
}
