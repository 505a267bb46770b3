//! Cross-namespace reference authorization.
//!
//! A `ReferenceGrant` lives in the namespace of the object being referenced and
//! lists which kinds of objects, from which namespaces, may reference which
//! objects in its namespace. This crate decides whether a single
//! [`AccessRequest`] is permitted by a snapshot of those grants.
//!
//! ```text
//! [ PersistentVolumeClaim (ns1) ] --dataSourceRef--> [ VolumeSnapshot (ns2) ]
//!                                                            ^
//!                                        [ ReferenceGrant (ns2) ]
//! ```
//!
//! The matcher ([`check`]) is a pure function over already-fetched grants.
//! [`authorize`] composes it with a [`GrantProvider`] that supplies the grants of
//! the target namespace.

#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod authorize;
mod check;
mod grant;
mod request;

pub use self::{
    authorize::{authorize, Error, GrantProvider},
    check::{check, is_granted, AccessDenied},
    grant::{FromRule, Grant, ToRule},
    request::AccessRequest,
};

/// The core API group is unnamed.
pub const CORE_GROUP: &str = "";

/// The only kind of object that requests access to cross-namespace data
/// sources.
pub const CLAIM_KIND: &str = "PersistentVolumeClaim";
