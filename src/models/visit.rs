use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use super::{app::AppMetadata, data_type::HealthDataCategory, OperationType};

/// One "recent access" row: a burst of reads and writes by a single app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub app: AppMetadata,
    /// Most recent access time that contributed to this visit.
    pub instant_time: DateTime<Utc>,
    pub is_today: bool,
    pub is_inactive: bool,
    pub data_types_read: BTreeSet<HealthDataCategory>,
    pub data_types_written: BTreeSet<HealthDataCategory>,
}

impl Visit {
    pub fn new(app: AppMetadata, instant_time: DateTime<Utc>, is_today: bool) -> Self {
        Self {
            app,
            instant_time,
            is_today,
            is_inactive: false,
            data_types_read: BTreeSet::new(),
            data_types_written: BTreeSet::new(),
        }
    }

    pub fn package_name(&self) -> &str {
        &self.app.package_name
    }

    pub fn record_access(
        &mut self,
        operation_type: OperationType,
        categories: impl IntoIterator<Item = HealthDataCategory>,
    ) {
        let target = match operation_type {
            OperationType::Read => &mut self.data_types_read,
            OperationType::Write => &mut self.data_types_written,
        };
        target.extend(categories);
    }

    /// Comma separated read categories, e.g. "Activity, Vitals".
    pub fn read_summary(&self) -> String {
        join_labels(&self.data_types_read)
    }

    pub fn written_summary(&self) -> String {
        join_labels(&self.data_types_written)
    }

    /// Clock time for today's visits, date and time otherwise.
    pub fn time_label(&self, zone: FixedOffset) -> String {
        let local = self.instant_time.with_timezone(&zone);
        if self.is_today {
            local.format("%H:%M").to_string()
        } else {
            local.format("%b %-d, %H:%M").to_string()
        }
    }
}

fn join_labels(categories: &BTreeSet<HealthDataCategory>) -> String {
    categories
        .iter()
        .map(|category| category.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn visit_at(instant: DateTime<Utc>, is_today: bool) -> Visit {
        Visit::new(AppMetadata::unknown("com.example.fit"), instant, is_today)
    }

    #[test]
    fn record_access_partitions_by_operation() {
        let mut visit = visit_at(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(), true);
        visit.record_access(OperationType::Read, [HealthDataCategory::Vitals]);
        visit.record_access(
            OperationType::Write,
            [HealthDataCategory::Activity, HealthDataCategory::Activity],
        );

        assert_eq!(visit.read_summary(), "Vitals");
        assert_eq!(visit.written_summary(), "Activity");
        assert_eq!(visit.data_types_written.len(), 1);
    }

    #[test]
    fn summary_lists_labels_in_stable_order() {
        let mut visit = visit_at(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(), true);
        visit.record_access(
            OperationType::Read,
            [HealthDataCategory::Vitals, HealthDataCategory::Activity],
        );
        assert_eq!(visit.read_summary(), "Activity, Vitals");
    }

    #[test]
    fn time_label_depends_on_today_flag() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 9, 5, 0).unwrap();
        let zone = FixedOffset::east_opt(2 * 3600).unwrap();

        assert_eq!(visit_at(instant, true).time_label(zone), "11:05");
        assert_eq!(visit_at(instant, false).time_label(zone), "May 1, 11:05");
    }
}
