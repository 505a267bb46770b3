use crate::{
    core,
    index::claim,
    k8s::{PersistentVolumeClaim, PersistentVolumeClaimSpec},
    metrics::AdmissionMetrics,
    GrantLister,
};
use anyhow::{anyhow, Result};
use futures::future;
use http_body_util::BodyExt;
use hyper::{http, Request, Response};
use kube::{core::DynamicObject, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

/// Validates `PersistentVolumeClaim`s that use a data source in another
/// namespace.
#[derive(Clone)]
pub struct Admission {
    grants: GrantLister,
    metrics: AdmissionMetrics,
    cross_namespace_enabled: bool,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read request body: {0}")]
    Request(#[source] BoxError),

    #[error("failed to encode json response: {0}")]
    Json(#[from] serde_json::Error),
}

type Review = kube::core::admission::AdmissionReview<DynamicObject>;
type AdmissionRequest = kube::core::admission::AdmissionRequest<DynamicObject>;
type AdmissionResponse = kube::core::admission::AdmissionResponse;
type AdmissionReview = kube::core::admission::AdmissionReview<DynamicObject>;

type Body = http_body_util::Full<bytes::Bytes>;
type BoxError = Box<dyn std::error::Error + Send + Sync>;

// === impl AdmissionService ===

impl<B> tower::Service<Request<B>> for Admission
where
    B: hyper::body::Body + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    type Response = Response<Body>;
    type Error = Error;
    type Future = future::BoxFuture<'static, Result<Response<Body>, Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        trace!(method = %req.method(), uri = %req.uri());
        if req.method() != http::Method::POST || req.uri().path() != "/" {
            return Box::pin(future::ok(
                Response::builder()
                    .status(http::StatusCode::NOT_FOUND)
                    .body(Body::default())
                    .expect("not found response must be valid"),
            ));
        }

        let admission = self.clone();
        Box::pin(async move {
            use bytes::Buf;
            let bytes = req
                .into_body()
                .collect()
                .await
                .map_err(|error| Error::Request(error.into()))?
                .to_bytes();
            let review: Review = match serde_json::from_reader(bytes.reader()) {
                Ok(review) => review,
                Err(error) => {
                    warn!(%error, "Failed to parse request body");
                    return json_response(AdmissionResponse::invalid(error).into_review());
                }
            };
            trace!(?review);

            let rsp = match review.try_into() {
                Ok(req) => {
                    debug!(?req);
                    admission.admit(req).await
                }
                Err(error) => {
                    warn!(%error, "Invalid admission request");
                    AdmissionResponse::invalid(error)
                }
            };
            debug!(?rsp);
            json_response(rsp.into_review())
        })
    }
}

impl Admission {
    pub(crate) fn new(
        grants: GrantLister,
        metrics: AdmissionMetrics,
        cross_namespace_enabled: bool,
    ) -> Self {
        Self {
            grants,
            metrics,
            cross_namespace_enabled,
        }
    }

    async fn admit(self, req: AdmissionRequest) -> AdmissionResponse {
        if !is_kind::<PersistentVolumeClaim>(&req) {
            return AdmissionResponse::invalid(format_args!(
                "unsupported resource type: {}.{}.{}",
                req.kind.group, req.kind.version, req.kind.kind
            ));
        }

        let rsp = AdmissionResponse::from(&req);

        // Deletions carry no object and reference nothing new.
        if req.object.is_none() {
            return rsp;
        }

        let req_ns = req.namespace.clone();
        let (obj, spec) = match parse_spec::<PersistentVolumeClaimSpec>(req) {
            Ok(spec) => spec,
            Err(error) => {
                info!(%error, "Failed to parse PersistentVolumeClaim spec");
                self.metrics.error();
                return rsp.deny(error);
            }
        };

        let ns = obj.namespace().or(req_ns).unwrap_or_default();
        let name = obj.name_any();

        let Some(request) = claim::access_request(&ns, &name, &spec) else {
            trace!(%ns, %name, "No cross-namespace data source");
            self.metrics.allowed();
            return rsp;
        };

        if !self.cross_namespace_enabled {
            info!(
                %ns,
                %name,
                target_ns = %request.target_namespace,
                "Denied; cross-namespace data sources are disabled"
            );
            self.metrics.denied();
            return rsp.deny(format_args!(
                "cross-namespace data sources are disabled; {}/{} references {} {}/{}",
                ns, name, request.target_kind, request.target_namespace, request.target_name,
            ));
        }

        match core::authorize(&self.grants, &request).await {
            Ok(()) => {
                debug!(%ns, %name, target_ns = %request.target_namespace, "Granted");
                self.metrics.allowed();
                rsp
            }
            Err(core::Error::Denied(error)) => {
                info!(%error, %ns, %name, "Denied");
                self.metrics.denied();
                rsp.deny(error)
            }
            Err(error) => {
                warn!(%error, %ns, %name, "Failed to authorize data source");
                self.metrics.error();
                rsp.deny(error)
            }
        }
    }
}

fn is_kind<T>(req: &AdmissionRequest) -> bool
where
    T: Resource,
    T::DynamicType: Default,
{
    let dt = Default::default();
    req.kind.group.eq_ignore_ascii_case(&T::group(&dt))
        && req.kind.kind.eq_ignore_ascii_case(&T::kind(&dt))
}

fn json_response(rsp: AdmissionReview) -> Result<Response<Body>, Error> {
    let bytes = serde_json::to_vec(&rsp)?;
    Ok(Response::builder()
        .status(http::StatusCode::OK)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(bytes))
        .expect("admission review response must be valid"))
}

fn parse_spec<T: DeserializeOwned>(req: AdmissionRequest) -> Result<(DynamicObject, T)> {
    let obj = req
        .object
        .ok_or_else(|| anyhow!("admission request missing 'object"))?;

    let spec = {
        let data = obj
            .data
            .get("spec")
            .cloned()
            .ok_or_else(|| anyhow!("admission request missing 'spec'"))?;
        serde_json::from_value(data)?
    };

    Ok((obj, spec))
}
