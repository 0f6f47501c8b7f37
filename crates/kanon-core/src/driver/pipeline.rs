use crate::{
    config::KAnonymityConfig,
    driver::{AggregateMode, DriverError, KAnonymityDriver},
    value::Value,
};

/// Minimum group frequency over `rows`, computed on a single node.
///
/// Returns `Ok(None)` when `rows` is empty.
pub fn min_frequency<I, R>(rows: I, config: &KAnonymityConfig) -> Result<Option<u64>, DriverError>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[Value]>,
{
    let mut driver = KAnonymityDriver::new(AggregateMode::SingleNode, config);
    for row in rows {
        driver.observe(row.as_ref())?;
    }

    Ok(driver.finalize()?.min_frequency())
}

/// Minimum group frequency over `partitions`, computed the two-level way:
/// one partition-local driver per partition, each shipping an encoded
/// partial to a single merge driver.
///
/// Every partition must produce rows of one width. Unless `arity` is
/// configured, the first non-empty partition fixes it for the combiner.
pub fn min_frequency_partitioned<P, I, R>(
    partitions: P,
    config: &KAnonymityConfig,
) -> Result<Option<u64>, DriverError>
where
    P: IntoIterator<Item = I>,
    I: IntoIterator<Item = R>,
    R: AsRef<[Value]>,
{
    let mut combiner = KAnonymityDriver::new(AggregateMode::Merge, config);

    for partition in partitions {
        let mut local = KAnonymityDriver::new(AggregateMode::PartitionLocal, config);
        for row in partition {
            local.observe(row.as_ref())?;
        }

        let bytes = local.export_encoded()?;
        combiner.merge_encoded(&bytes)?;
    }

    Ok(combiner.finalize()?.min_frequency())
}
