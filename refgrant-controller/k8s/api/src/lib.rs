#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod claim;
pub mod gateway;

pub use k8s_openapi::api::{
    self,
    core::v1::{PersistentVolumeClaim, PersistentVolumeClaimSpec, TypedObjectReference},
};
pub use kube::{
    api::{ObjectMeta, ResourceExt},
    Client, Resource,
};
