use crate::domain::model::{Record, SanitizedDataset};
use crate::utils::error::{PairingError, Result};
use std::collections::HashSet;

/// Converts raw JSON values into records and collapses structural duplicates.
///
/// Fails with [`PairingError::DataFormatError`] if any element is not an
/// object or carries an array/object value. Whether that failure degrades to
/// an empty dataset is up to the caller.
pub fn deduplicate_values(values: Vec<serde_json::Value>) -> Result<HashSet<Record>> {
    let records = to_records(values)?;
    Ok(deduplicate(records))
}

/// Like [`deduplicate_values`], but keeps first occurrences in input order so
/// that a seeded shuffle is reproducible across runs.
pub fn sanitize(values: Vec<serde_json::Value>) -> Result<SanitizedDataset> {
    let total = values.len();
    let dataset = SanitizedDataset::from_ordered(to_records(values)?);

    tracing::debug!(
        "Deduplicated {} records into {} unique records",
        total,
        dataset.len()
    );
    Ok(dataset)
}

fn to_records(values: Vec<serde_json::Value>) -> Result<Vec<Record>> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            Record::try_from(value).map_err(|e| match e {
                PairingError::DataFormatError { message } => PairingError::DataFormatError {
                    message: format!("record #{}: {}", index, message),
                },
                other => other,
            })
        })
        .collect()
}

pub fn deduplicate<I>(records: I) -> HashSet<Record>
where
    I: IntoIterator<Item = Record>,
{
    records.into_iter().collect()
}
