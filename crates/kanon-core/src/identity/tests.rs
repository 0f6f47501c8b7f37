use crate::{
    identity::{
        FnStrategy, HashAlgorithm, IdentifierStrategy, IdentifyError, RowIdentifier,
        SignatureLayout, identify,
    },
    value::Value,
};
use proptest::prelude::*;
use std::sync::Arc;

fn row(cells: &[&str]) -> Vec<Value> {
    cells.iter().map(|cell| Value::from(*cell)).collect()
}

#[test]
fn name_uuid_matches_reference_vectors() {
    // MD5 digest with version-3 and IETF variant bits applied.
    assert_eq!(
        HashAlgorithm::NameUuid.identify_text(""),
        "d41d8cd98f003204a9800998ecf8427e"
    );
    assert_eq!(
        HashAlgorithm::NameUuid.identify_text("abc"),
        "900150983cd23fb096963f7d28e17f72"
    );
}

#[test]
fn digest_algorithms_render_zero_padded_hex() {
    assert_eq!(
        HashAlgorithm::Md5.identify_text("abc"),
        "900150983cd24fb0d6963f7d28e17f72"
    );
    assert_eq!(
        HashAlgorithm::Sha256.identify_text(""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );

    let xxh = HashAlgorithm::Xxh3.identify_text("abc");
    assert_eq!(xxh.len(), 32);
    assert!(HashAlgorithm::Xxh3.is_well_formed(&xxh));
}

#[test]
fn default_identifier_uses_length_prefixed_name_uuid() {
    let signature = identify(&row(&["a", "1"])).expect("non-empty row should identify");

    assert_eq!(signature.as_str(), "5e04e82f051a33ccbad3cbb279ebaee5");
}

#[test]
fn sha256_identifier_hashes_canonical_text() {
    let identifier = RowIdentifier::from_algorithm(HashAlgorithm::Sha256);
    let signature = identifier
        .identify(&row(&["a", "1"]))
        .expect("non-empty row should identify");

    assert_eq!(
        signature.as_str(),
        "4e05abd6911b81cca42657fbc9599aa8c54ec2edbae550401d8479871cb5ca0f"
    );
}

#[test]
fn concatenated_layout_matches_bare_concatenation() {
    let identifier = RowIdentifier::default().with_layout(SignatureLayout::Concatenated);
    let signature = identifier
        .identify(&row(&["a", "1"]))
        .expect("non-empty row should identify");

    assert_eq!(signature.as_str(), "8a8bb7cd343a32ad99b7d762030857a2");
}

#[test]
fn length_prefixed_layout_separates_column_splits() {
    let identifier = RowIdentifier::default();
    let left = identifier.identify(&row(&["1", "23"])).expect("left row");
    let right = identifier.identify(&row(&["12", "3"])).expect("right row");

    assert_ne!(left, right);
    assert_eq!(
        identifier.canonical_text(&row(&["1", "23"])).expect("left text"),
        "1:12:23"
    );
}

#[test]
fn concatenated_layout_accepts_column_split_collisions() {
    let identifier = RowIdentifier::default().with_layout(SignatureLayout::Concatenated);
    let left = identifier.identify(&row(&["1", "23"])).expect("left row");
    let right = identifier.identify(&row(&["12", "3"])).expect("right row");

    assert_eq!(left, right);
}

#[test]
fn null_cells_use_configured_token() {
    let identifier = RowIdentifier::default();
    assert_eq!(
        identifier
            .canonical_text(&[Value::Null, Value::from("x")])
            .expect("row with null"),
        "4:null1:x"
    );

    let empty_token = RowIdentifier::default().with_null_token("");
    assert_eq!(
        empty_token
            .canonical_text(&[Value::Null, Value::from("x")])
            .expect("row with null"),
        "0:1:x"
    );
}

#[test]
fn empty_row_is_rejected() {
    let err = RowIdentifier::default()
        .identify(&[])
        .expect_err("empty row must be rejected");

    assert_eq!(err, IdentifyError::EmptyRow);
}

#[test]
fn injected_strategy_is_used_verbatim() {
    let strategy = FnStrategy::new("reverse", |bytes: &[u8]| {
        String::from_utf8_lossy(bytes).chars().rev().collect()
    });
    let identifier = RowIdentifier::new(Arc::new(strategy));
    let signature = identifier.identify(&row(&["ab"])).expect("row");

    assert_eq!(identifier.strategy_name(), "reverse");
    assert_eq!(signature.as_str(), "ba:2");
}

#[test]
fn strategy_output_outside_its_own_shape_is_rejected() {
    let strategy = FnStrategy::new("blank", |_: &[u8]| String::new());
    let err = RowIdentifier::new(Arc::new(strategy))
        .identify(&row(&["a"]))
        .expect_err("blank signature must be rejected");

    assert!(matches!(err, IdentifyError::MalformedSignature { .. }));
}

#[test]
fn hash_algorithm_rejects_foreign_shapes() {
    let algorithm = HashAlgorithm::NameUuid;

    assert!(algorithm.accepts("d41d8cd98f003204a9800998ecf8427e"));
    assert!(!algorithm.accepts("D41D8CD98F003204A9800998ECF8427E"));
    assert!(!algorithm.accepts("d41d8cd9-8f00-3204-a980-0998ecf8427e"));
    assert!(!algorithm.accepts(""));
}

proptest! {
    #[test]
    fn identify_is_deterministic_across_identifiers(
        cells in prop::collection::vec("[a-z0-9]{0,6}", 1..5),
    ) {
        let values: Vec<Value> = cells.iter().map(|c| Value::from(c.as_str())).collect();
        let first = RowIdentifier::default().identify(&values).expect("first");
        let second = RowIdentifier::default().identify(&values).expect("second");

        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_algorithm_emits_its_declared_shape(
        text in ".{0,32}",
        algorithm in prop_oneof![
            Just(HashAlgorithm::NameUuid),
            Just(HashAlgorithm::Md5),
            Just(HashAlgorithm::Sha256),
            Just(HashAlgorithm::Xxh3),
        ],
    ) {
        let encoded = algorithm.identify_text(&text);
        prop_assert!(algorithm.is_well_formed(&encoded));
    }
}

#[test]
fn fingerprint_covers_strategy_layout_and_null_token() {
    let base = RowIdentifier::default();
    assert_eq!(base.fingerprint(), "name_uuid/length_prefixed/4:null");

    let variants = [
        RowIdentifier::from_algorithm(HashAlgorithm::Md5),
        RowIdentifier::default().with_layout(SignatureLayout::Concatenated),
        RowIdentifier::default().with_null_token(""),
    ];
    for variant in &variants {
        assert_ne!(variant.fingerprint(), base.fingerprint());
    }
    assert_eq!(variants[2].fingerprint(), "name_uuid/length_prefixed/0:");
}
