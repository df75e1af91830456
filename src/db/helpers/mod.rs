use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use log::warn;

use crate::models::{DataType, OperationType};

/// Fixed-width RFC 3339 so that text order matches time order.
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_operation(value: &str) -> Result<OperationType> {
    OperationType::from_str(value)
}

pub fn data_types_to_json<'a>(data_types: impl IntoIterator<Item = &'a DataType>) -> Result<String> {
    let identifiers: Vec<&str> = data_types.into_iter().map(DataType::as_str).collect();
    serde_json::to_string(&identifiers).context("failed to serialize data types")
}

/// Unknown identifiers are dropped so that a newer writer cannot break reads.
pub fn data_types_from_json(value: &str) -> Result<Vec<DataType>> {
    let identifiers: Vec<String> =
        serde_json::from_str(value).context("failed to parse data_types_json")?;

    Ok(identifiers
        .iter()
        .filter_map(|identifier| match identifier.parse::<DataType>() {
            Ok(data_type) => Some(data_type),
            Err(err) => {
                warn!("Skipping access log data type: {err}");
                None
            }
        })
        .collect())
}
