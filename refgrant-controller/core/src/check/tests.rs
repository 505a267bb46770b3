use super::*;
use crate::{FromRule, ToRule, CLAIM_KIND};

const SNAPSHOT_GROUP: &str = "snapshot.storage.k8s.io";
const SNAPSHOT_KIND: &str = "VolumeSnapshot";

fn mk_grant(
    name: &str,
    from: impl IntoIterator<Item = FromRule>,
    to: impl IntoIterator<Item = ToRule>,
) -> Grant {
    Grant {
        namespace: "ns2".to_string(),
        name: name.to_string(),
        from: from.into_iter().collect(),
        to: to.into_iter().collect(),
    }
}

fn from_claims(ns: &str) -> FromRule {
    FromRule {
        group: "".to_string(),
        kind: CLAIM_KIND.to_string(),
        namespace: ns.to_string(),
    }
}

fn to(group: &str, kind: &str, name: Option<&str>) -> ToRule {
    ToRule {
        group: group.to_string(),
        kind: kind.to_string(),
        name: name.map(Into::into),
    }
}

fn claim_request(group: Option<&str>, kind: &str, name: &str) -> AccessRequest {
    AccessRequest::from_claim("ns1", "restore", "ns2", group.map(Into::into), kind, name)
}

#[test]
fn allows_any_name_when_to_name_is_absent() {
    let grants = [mk_grant(
        "grant-0",
        [from_claims("ns1")],
        [to("", CLAIM_KIND, None)],
    )];
    let req = claim_request(None, CLAIM_KIND, "test-pvc");
    assert_eq!(check(&req, &grants), Ok(()));
    assert!(is_granted(&req, &grants));
}

#[test]
fn allows_any_name_when_to_name_is_empty() {
    let grants = [mk_grant(
        "grant-0",
        [from_claims("ns1")],
        [to("", CLAIM_KIND, Some(""))],
    )];
    assert!(is_granted(
        &claim_request(None, CLAIM_KIND, "test-pvc"),
        &grants
    ));
    assert!(is_granted(
        &claim_request(None, CLAIM_KIND, "other-pvc"),
        &grants
    ));
}

#[test]
fn denies_other_names() {
    let grants = [mk_grant(
        "grant-0",
        [from_claims("ns1")],
        [to("", CLAIM_KIND, Some("other-pvc"))],
    )];
    let req = claim_request(None, CLAIM_KIND, "test-pvc");
    let denied = check(&req, &grants).expect_err("name must not match");
    assert_eq!(denied.target_namespace, "ns2");
    assert_eq!(denied.target_name, "test-pvc");
    assert!(
        denied.to_string().contains("ns2/test-pvc"),
        "{denied} must name the target"
    );
    assert!(
        denied.to_string().contains("ns1/restore"),
        "{denied} must name the requester"
    );

    let req = claim_request(None, CLAIM_KIND, "other-pvc");
    assert!(is_granted(&req, &grants));
}

#[test]
fn denies_without_grants() {
    let req = claim_request(None, CLAIM_KIND, "test-pvc");
    assert_eq!(check(&req, &Vec::<Grant>::new()), Err(AccessDenied::from(&req)));
}

#[test]
fn denies_other_requesting_namespaces() {
    let grants = [mk_grant(
        "grant-0",
        [from_claims("ns3")],
        [to("", CLAIM_KIND, None)],
    )];
    assert!(!is_granted(
        &claim_request(None, CLAIM_KIND, "test-pvc"),
        &grants
    ));
}

#[test]
fn denies_other_requesting_kinds() {
    let grants = [mk_grant(
        "grant-0",
        [FromRule {
            group: "".to_string(),
            kind: "Pod".to_string(),
            namespace: "ns1".to_string(),
        }],
        [to("", CLAIM_KIND, None)],
    )];
    assert!(!is_granted(
        &claim_request(None, CLAIM_KIND, "test-pvc"),
        &grants
    ));
}

#[test]
fn denies_named_from_groups() {
    let grants = [mk_grant(
        "grant-0",
        [FromRule {
            group: "gateway.networking.k8s.io".to_string(),
            kind: CLAIM_KIND.to_string(),
            namespace: "ns1".to_string(),
        }],
        [to("", CLAIM_KIND, None)],
    )];
    assert!(!is_granted(
        &claim_request(None, CLAIM_KIND, "test-pvc"),
        &grants
    ));
}

#[test]
fn core_group_requires_empty_to_group() {
    let grants = [mk_grant(
        "grant-0",
        [from_claims("ns1")],
        [to(SNAPSHOT_GROUP, CLAIM_KIND, None)],
    )];
    assert!(!is_granted(
        &claim_request(None, CLAIM_KIND, "test-pvc"),
        &grants
    ));

    // An explicitly empty group is the core group.
    let grants = [mk_grant(
        "grant-0",
        [from_claims("ns1")],
        [to("", CLAIM_KIND, None)],
    )];
    assert!(is_granted(
        &claim_request(Some(""), CLAIM_KIND, "test-pvc"),
        &grants
    ));
}

#[test]
fn named_group_requires_exact_to_group() {
    let req = claim_request(Some(SNAPSHOT_GROUP), SNAPSHOT_KIND, "snap-0");

    let grants = [mk_grant(
        "grant-0",
        [from_claims("ns1")],
        [to(SNAPSHOT_GROUP, SNAPSHOT_KIND, None)],
    )];
    assert!(is_granted(&req, &grants));

    let grants = [mk_grant(
        "grant-0",
        [from_claims("ns1")],
        [to("", SNAPSHOT_KIND, None)],
    )];
    assert!(!is_granted(&req, &grants));

    let grants = [mk_grant(
        "grant-0",
        [from_claims("ns1")],
        [to("Snapshot.Storage.K8s.io", SNAPSHOT_KIND, None)],
    )];
    assert!(!is_granted(&req, &grants), "groups are case-sensitive");
}

#[test]
fn denies_other_target_kinds() {
    let grants = [mk_grant(
        "grant-0",
        [from_claims("ns1")],
        [to(SNAPSHOT_GROUP, "VolumeSnapshotContent", None)],
    )];
    assert!(!is_granted(
        &claim_request(Some(SNAPSHOT_GROUP), SNAPSHOT_KIND, "snap-0"),
        &grants
    ));
}

#[test]
fn rules_are_not_paired_by_index() {
    // The second `from` rule and the first `to` rule match.
    let grants = [mk_grant(
        "grant-0",
        [from_claims("ns3"), from_claims("ns1")],
        [
            to("", CLAIM_KIND, None),
            to(SNAPSHOT_GROUP, SNAPSHOT_KIND, Some("snap-1")),
        ],
    )];
    assert!(is_granted(
        &claim_request(None, CLAIM_KIND, "test-pvc"),
        &grants
    ));
}

#[test]
fn grants_do_not_combine() {
    let grants = [
        mk_grant("from-only", [from_claims("ns1")], [to("", "Secret", None)]),
        mk_grant("to-only", [from_claims("ns3")], [to("", CLAIM_KIND, None)]),
    ];
    let req = claim_request(None, CLAIM_KIND, "test-pvc");
    assert!(!is_granted(&req, &grants));

    // Reversing the order doesn't change the outcome.
    let reversed = grants.iter().rev();
    assert!(!is_granted(&req, reversed));
}

#[test]
fn any_grant_suffices() {
    let grants = [
        mk_grant("unrelated", [from_claims("ns3")], [to("", CLAIM_KIND, None)]),
        mk_grant(
            "named",
            [from_claims("ns1")],
            [to("", CLAIM_KIND, Some("test-pvc"))],
        ),
    ];
    let req = claim_request(None, CLAIM_KIND, "test-pvc");
    assert!(is_granted(&req, &grants));
    assert!(is_granted(&req, grants.iter().rev()));
}

#[test]
fn grant_namespace_is_not_checked() {
    let mut grant = mk_grant("grant-0", [from_claims("ns1")], [to("", CLAIM_KIND, None)]);
    grant.namespace = "elsewhere".to_string();
    assert!(is_granted(
        &claim_request(None, CLAIM_KIND, "test-pvc"),
        [&grant]
    ));
}

#[test]
fn repeated_checks_agree() {
    let grants = [mk_grant(
        "grant-0",
        [from_claims("ns1")],
        [to("", CLAIM_KIND, Some("other-pvc"))],
    )];
    let req = claim_request(None, CLAIM_KIND, "test-pvc");
    let first = check(&req, &grants);
    for _ in 0..3 {
        assert_eq!(check(&req, &grants), first);
    }
}

#[test]
fn denies_named_requesting_groups() {
    let grants = [mk_grant(
        "grant-0",
        [FromRule {
            group: SNAPSHOT_GROUP.to_string(),
            kind: CLAIM_KIND.to_string(),
            namespace: "ns1".to_string(),
        }],
        [to("", CLAIM_KIND, None)],
    )];
    let mut req = claim_request(None, CLAIM_KIND, "test-pvc");
    req.requesting_group = Some(SNAPSHOT_GROUP.to_string());
    assert!(
        !is_granted(&req, &grants),
        "only core-group requesters are granted"
    );

    // The same request is granted by a core-group rule.
    let grants = [mk_grant(
        "grant-0",
        [from_claims("ns1")],
        [to("", CLAIM_KIND, None)],
    )];
    assert!(is_granted(&req, &grants));
}

#[test]
fn concurrent_checks_agree() {
    let grants = [
        mk_grant("unrelated", [from_claims("ns3")], [to("", CLAIM_KIND, None)]),
        mk_grant(
            "named",
            [from_claims("ns1")],
            [to("", CLAIM_KIND, Some("test-pvc"))],
        ),
    ];
    let granted = claim_request(None, CLAIM_KIND, "test-pvc");
    let denied = claim_request(None, CLAIM_KIND, "other-pvc");

    std::thread::scope(|s| {
        let handles = (0..8)
            .map(|_| {
                s.spawn(|| {
                    (0..100)
                        .map(|_| (check(&granted, &grants), check(&denied, &grants)))
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            for (ok, err) in handle.join().expect("checks must not panic") {
                assert_eq!(ok, Ok(()));
                assert_eq!(err, Err(AccessDenied::from(&denied)));
            }
        }
    });
}
