use crate::{check, AccessDenied, AccessRequest, Grant};

/// Supplies the grants that live in a namespace.
///
/// Implementations may serve from an eventually-consistent cache, so a grant
/// that was just created may not be visible yet.
#[async_trait::async_trait]
pub trait GrantProvider {
    async fn list_grants(&self, namespace: &str) -> anyhow::Result<Vec<Grant>>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request doesn't name a target namespace, so there are no grants to
    /// consult.
    #[error("data source reference from {namespace}/{name} has no namespace")]
    Precondition { namespace: String, name: String },

    #[error("error getting ReferenceGrants in {namespace} namespace: {error}")]
    ListGrants {
        namespace: String,
        #[source]
        error: anyhow::Error,
    },

    #[error(transparent)]
    Denied(#[from] AccessDenied),
}

/// Fetches the target namespace's grants and checks the request against them.
pub async fn authorize<P>(provider: &P, request: &AccessRequest) -> Result<(), Error>
where
    P: GrantProvider + ?Sized,
{
    if request.target_namespace.is_empty() {
        return Err(Error::Precondition {
            namespace: request.requesting_namespace.clone(),
            name: request.requesting_name.clone(),
        });
    }

    let grants = provider
        .list_grants(&request.target_namespace)
        .await
        .map_err(|error| Error::ListGrants {
            namespace: request.target_namespace.clone(),
            error,
        })?;

    check(request, &grants)?;
    Ok(())
}
