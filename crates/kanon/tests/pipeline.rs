use kanon::{
    error::{ErrorKind, ErrorOrigin},
    load_config, min_frequency, min_frequency_partitioned,
    prelude::*,
};
use proptest::prelude::*;

fn row(cells: &[&str]) -> Vec<Value> {
    cells.iter().map(|cell| Value::from(*cell)).collect()
}

#[test]
fn quasi_identifier_table_reports_k() {
    let config = KAnonymityConfig::default();
    let rows = vec![
        vec![Value::from("1980"), Value::from("F"), Value::from(94_110_i64)],
        vec![Value::from("1980"), Value::from("F"), Value::from(94_110_i64)],
        vec![Value::from("1975"), Value::from("M"), Value::Null],
        vec![Value::from("1975"), Value::from("M"), Value::Null],
        vec![Value::from("1975"), Value::from("M"), Value::Null],
    ];

    assert_eq!(min_frequency(&rows, &config).expect("aggregate"), Some(2));
}

#[test]
fn partitioned_run_matches_single_node() {
    let config = KAnonymityConfig::default();
    let first = vec![row(&["x"]), row(&["x"]), row(&["y"]), row(&["y"]), row(&["y"])];
    let second = vec![row(&["x"]), row(&["x"]), row(&["x"]), row(&["y"])];

    let split = min_frequency_partitioned([&first, &second], &config).expect("partitioned");
    let single = min_frequency(first.iter().chain(&second), &config).expect("single node");

    assert_eq!(split, Some(4));
    assert_eq!(single, split);
}

#[test]
fn toml_config_drives_algorithm_choice() {
    let config = load_config(
        r#"
        algorithm = "sha256"
        null_token = "<null>"
        "#,
    )
    .expect("config should load");

    let mut local = KAnonymityDriver::new(AggregateMode::PartitionLocal, &config);
    local.observe(&[Value::Null]).expect("observe null");
    let partial = local.export_partial().expect("export");

    assert_eq!(partial.identifier(), "sha256/length_prefixed/6:<null>");
    assert_eq!(partial.arity(), Some(1));
    let (signature, count) = partial.iter().next().expect("one entry");
    assert_eq!(signature.len(), 64);
    assert_eq!(count, 1);
}

#[test]
fn bad_config_surfaces_public_error() {
    let err = load_config("arity = 0").expect_err("zero arity must fail");

    assert_eq!(err.kind, ErrorKind::InvalidInput);
    assert_eq!(err.origin, ErrorOrigin::Config);
}

#[test]
fn mixed_arity_surfaces_public_error() {
    let config = KAnonymityConfig::default();
    let rows = vec![row(&["a", "b"]), row(&["a"])];

    let err = min_frequency(&rows, &config).expect_err("mixed arity must fail");
    assert_eq!(err.kind, ErrorKind::InvalidInput);
    assert_eq!(err.origin, ErrorOrigin::Accumulator);
}

#[test]
fn mixed_arity_across_partitions_surfaces_public_error() {
    let config = KAnonymityConfig::default();
    let first = vec![row(&["a", "b"])];
    let second = vec![row(&["a", "b", "c"])];

    let err = min_frequency_partitioned([&first, &second], &config)
        .expect_err("partitions of different width must fail");
    assert_eq!(err.kind, ErrorKind::InvalidInput);
    assert_eq!(err.origin, ErrorOrigin::Accumulator);
}

#[test]
fn group_limit_surfaces_public_error() {
    let config = load_config("[limits]\nmax_groups = 2").expect("config should load");
    let rows = vec![row(&["a"]), row(&["b"]), row(&["c"])];

    let err = min_frequency(&rows, &config).expect_err("third group must fail");
    assert_eq!(err.kind, ErrorKind::LimitExceeded);
}

#[test]
fn custom_identifier_is_honoured_end_to_end() {
    let identifier = RowIdentifier::new(std::sync::Arc::new(FnStrategy::new(
        "length",
        |bytes: &[u8]| bytes.len().to_string(),
    )));
    let config = KAnonymityConfig::default();

    let mut combiner =
        KAnonymityDriver::with_identifier(AggregateMode::Merge, &config, identifier.clone());
    for cells in [&["ab"][..], &["cd"], &["xyz"]] {
        let mut local = KAnonymityDriver::with_identifier(
            AggregateMode::PartitionLocal,
            &config,
            identifier.clone(),
        );
        local.observe(&row(cells)).expect("observe");
        let bytes = local.export_encoded().expect("export");
        combiner.merge_encoded(&bytes).expect("merge");
    }

    // "2:ab" and "2:cd" collapse into one group under a length-only strategy.
    let result = combiner.finalize().expect("finalize");
    assert_eq!(result.groups(), 2);
    assert_eq!(result.min_frequency(), Some(1));
}

proptest! {
    #[test]
    fn any_partitioning_gives_the_same_minimum(
        cells in prop::collection::vec(prop_oneof![Just("a"), Just("b"), Just("c")], 0..32),
        cuts in prop::collection::vec(0usize..32, 0..4),
    ) {
        let config = KAnonymityConfig::default();
        let rows: Vec<Vec<Value>> = cells.iter().map(|cell| row(&[*cell])).collect();

        let mut bounds: Vec<usize> = cuts.into_iter().map(|cut| cut.min(rows.len())).collect();
        bounds.push(0);
        bounds.push(rows.len());
        bounds.sort_unstable();
        let partitions: Vec<&[Vec<Value>]> =
            bounds.windows(2).map(|pair| &rows[pair[0]..pair[1]]).collect();

        let single = min_frequency(&rows, &config).expect("single node");
        let split = min_frequency_partitioned(partitions, &config).expect("partitioned");

        prop_assert_eq!(single, split);
    }
}
