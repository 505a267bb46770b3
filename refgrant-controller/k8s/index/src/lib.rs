//! ReferenceGrant index
//!
//! Maintains a snapshot of every `ReferenceGrant` in the cluster, keyed by
//! namespace, from a `kubert` watch. Grants are converted to
//! [`refgrant_controller_core::Grant`]s as they are applied so that lookups
//! only clone plain data.
//!
//! ```text
//! [ ReferenceGrant ] -> [ Index (by namespace, by name) ] -> list_grants(ns)
//! ```
//!
//! The index is eventually consistent with the API server: a grant becomes
//! visible once its watch event has been applied.

#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod claim;
pub mod grant;
mod index;
pub mod metrics;


pub use self::index::{Index, SharedIndex};
