//! Raw access log records as read from the health data store.

use std::{collections::BTreeSet, fmt, str::FromStr};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::data_type::DataType;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Read,
    Write,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Read => "read",
            OperationType::Write => "write",
        }
    }
}

impl FromStr for OperationType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "read" => Ok(OperationType::Read),
            "write" => Ok(OperationType::Write),
            other => Err(anyhow!("unknown operation type '{other}'")),
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded read or write of health data by an app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogEntry {
    pub package_name: String,
    pub access_time: DateTime<Utc>,
    pub operation_type: OperationType,
    pub data_types: BTreeSet<DataType>,
}

impl AccessLogEntry {
    pub fn new(
        package_name: impl Into<String>,
        access_time: DateTime<Utc>,
        operation_type: OperationType,
        data_types: impl IntoIterator<Item = DataType>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            access_time,
            operation_type,
            data_types: data_types.into_iter().collect(),
        }
    }
}
