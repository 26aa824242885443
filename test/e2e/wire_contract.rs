//! Wire contract tests for the canonical identifier text form.
//!
//! These exercise only the public API, the way a routing or storage service
//! consuming `entid` would. They pin the behaviors other systems persist or
//! depend on:
//!
//! 1. Text form round-trips (parse → format → parse)
//! 2. Blank text is the unassigned id, malformed text is an error
//! 3. The distributed stable hash is identical in a separate process
//! 4. Identifiers embedded in documents keep their canonical form
//!
//! ## Running
//!
//! ```bash
//! cargo test -p entid-e2e --test wire_contract
//! ```

use std::collections::BTreeMap;
use std::process::Command;

use entid::{Atom, DistributedStableHash, EntityId};
use rstest::rstest;
use serde::{Deserialize, Serialize};

const CHILD_ENV: &str = "ENTID_E2E_HASH_CHILD";
const HASH_LINE_PREFIX: &str = "entid-hash ";

const SAMPLE_IDS: &[&str] = &[
    "dealer::I9973OD",
    "boat@dealer::I9973OD",
    "boat.license@dealer::I9973OD",
    "car.vin@dealer::1A8987339HBz0909W874",
    "car.vin@dealer::1a8987339hbz0909w874",
    "user@auth::someone@example.org",
];

#[rstest]
#[case("dealer::I9973OD")]
#[case("boat@dealer::I9973OD")]
#[case("car.vin@dealer::1A8987339HBz0909W874")]
#[case("doc.v2@store::path/to::thing")]
fn canonical_text_roundtrips(#[case] text: &str) {
    let id = EntityId::parse(text).unwrap();
    assert_eq!(id.as_string(), text);
    assert_eq!(EntityId::parse(&id.as_string()).unwrap(), id);
}

#[test]
fn documented_example_parses_to_parts() {
    let id = EntityId::parse("car.vin@dealer::1A8987339HBz0909W874").unwrap();
    assert_eq!(id.entity_type().to_string(), "car");
    assert_eq!(id.schema().to_string(), "vin");
    assert_eq!(id.system().to_string(), "dealer");
    assert_eq!(id.address(), "1A8987339HBz0909W874");
}

#[test]
fn unassigned_has_empty_canonical_form() {
    assert_eq!(EntityId::EMPTY.as_string(), "");
    assert_eq!(EntityId::parse("").unwrap(), EntityId::EMPTY);
    assert_eq!(EntityId::parse("  \t ").unwrap(), EntityId::EMPTY);
}

#[rstest]
#[case("noDoubleColon")]
#[case("sys::")]
#[case("@sys::addr")]
#[case("t@::addr")]
fn malformed_text_is_rejected(#[case] text: &str) {
    assert!(EntityId::parse(text).unwrap_err().is_format_error());
    assert_eq!(EntityId::try_parse(text), None);
}

#[test]
fn optional_segments_are_omitted() {
    let id = EntityId::parse("sys::addr").unwrap();
    assert_eq!(id.system(), Atom::from_static("sys"));
    assert_eq!(id.entity_type(), Atom::ZERO);
    assert_eq!(id.schema(), Atom::ZERO);
    assert_eq!(id.address(), "addr");
    assert_eq!(id.as_string(), "sys::addr");
}

#[test]
fn address_case_is_significant() {
    let a = EntityId::parse("car.vin@dealer::1A8987339HBz0909W874").unwrap();
    let b = EntityId::parse("car.vin@dealer::1a8987339hbz0909w874").unwrap();
    assert_ne!(a, b);
    assert_ne!(a.as_string(), b.as_string());
}

#[test]
fn atom_values_are_pinned() {
    // Packed atoms feed the stable hash directly; these values must never change.
    assert_eq!(Atom::from_static("car").id(), 0x0072_6163);
    assert_eq!(Atom::from_static("vin").id(), 0x006E_6976);
    assert_eq!(Atom::from_static("dealer").id(), 0x7265_6C61_6564);
}

/// Prints hashes when run as the child process of `stable_hash_matches_child_process`.
#[test]
fn emit_hashes_for_parent() {
    if std::env::var_os(CHILD_ENV).is_none() {
        return;
    }
    for text in SAMPLE_IDS {
        let id = EntityId::parse(text).unwrap();
        println!("{HASH_LINE_PREFIX}{text} {}", id.distributed_stable_hash());
    }
}

#[test]
fn stable_hash_matches_child_process() {
    let exe = std::env::current_exe().unwrap();
    let output = Command::new(exe)
        .args([
            "emit_hashes_for_parent",
            "--exact",
            "--nocapture",
            "--test-threads=1",
        ])
        .env(CHILD_ENV, "1")
        .output()
        .unwrap();
    assert!(output.status.success(), "child test run failed");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let child: BTreeMap<String, u64> = stdout
        .lines()
        // libtest may print the test name on the same line as the first output
        .filter_map(|line| {
            line.find(HASH_LINE_PREFIX)
                .map(|at| &line[at + HASH_LINE_PREFIX.len()..])
        })
        .filter_map(|rest| rest.rsplit_once(' '))
        .map(|(text, hash)| (text.to_string(), hash.parse().unwrap()))
        .collect();
    assert_eq!(child.len(), SAMPLE_IDS.len());

    for text in SAMPLE_IDS {
        let id = EntityId::parse(text).unwrap();
        assert_eq!(child[*text], id.distributed_stable_hash(), "{text}");
    }
}

#[test]
fn stable_hash_separates_sample_ids() {
    let hashes: std::collections::HashSet<u64> = SAMPLE_IDS
        .iter()
        .map(|text| EntityId::parse(text).unwrap().distributed_stable_hash())
        .collect();
    assert_eq!(hashes.len(), SAMPLE_IDS.len());
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Shipment {
    vehicle: EntityId,
    #[serde(default)]
    buyer: EntityId,
}

#[test]
fn document_fields_keep_canonical_form() {
    let doc = serde_json::json!({
        "vehicle": "car.vin@dealer::1A8987339HBz0909W874",
        "buyer": ""
    });
    let shipment: Shipment = serde_json::from_value(doc.clone()).unwrap();
    assert!(shipment.vehicle.is_assigned());
    assert!(!shipment.buyer.is_assigned());
    assert_eq!(serde_json::to_value(&shipment).unwrap(), doc);

    let missing: Shipment =
        serde_json::from_value(serde_json::json!({ "vehicle": "dealer::X1" })).unwrap();
    assert_eq!(missing.buyer, EntityId::EMPTY);

    let bad = serde_json::from_value::<Shipment>(serde_json::json!({ "vehicle": "dealer:X1" }));
    assert!(bad.is_err());
}

#[test]
fn untyped_document_values_fall_back() {
    let values = serde_json::json!(["dealer::X1", 17, "not an id", null]);
    let readable: Vec<EntityId> = values
        .as_array()
        .unwrap()
        .iter()
        .filter_map(EntityId::read_json)
        .collect();
    assert_eq!(readable.len(), 1);
    assert_eq!(readable[0].write_json(), serde_json::json!("dealer::X1"));
}
