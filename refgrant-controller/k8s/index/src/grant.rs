use refgrant_controller_core::{FromRule, Grant, ToRule};
use refgrant_controller_k8s_api::gateway::{
    ReferenceGrantFrom, ReferenceGrantSpec, ReferenceGrantTo,
};

/// Converts a `ReferenceGrant`'s spec into a [`Grant`], preserving rule order.
pub fn from_spec(namespace: String, name: String, spec: ReferenceGrantSpec) -> Grant {
    Grant {
        namespace,
        name,
        from: spec.from.into_iter().map(from_rule).collect(),
        to: spec.to.into_iter().map(to_rule).collect(),
    }
}

fn from_rule(ReferenceGrantFrom { group, kind, namespace }: ReferenceGrantFrom) -> FromRule {
    FromRule {
        group,
        kind,
        namespace,
    }
}

fn to_rule(ReferenceGrantTo { group, kind, name }: ReferenceGrantTo) -> ToRule {
    ToRule { group, kind, name }
}
