//! Injected clock used for "is today" decisions.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveTime, Offset, Utc};

pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn device_zone(&self) -> FixedOffset;

    /// Start of the current local day, expressed in UTC.
    fn start_of_today(&self) -> DateTime<Utc> {
        let zone = self.device_zone();
        let local_midnight = self
            .now()
            .with_timezone(&zone)
            .date_naive()
            .and_time(NaiveTime::MIN);
        let utc_midnight = local_midnight - Duration::seconds(i64::from(zone.local_minus_utc()));
        DateTime::from_naive_utc_and_offset(utc_midnight, Utc)
    }

    fn is_today(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start_of_today()
    }
}

/// Wall clock in the device's current zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn device_zone(&self) -> FixedOffset {
        Local::now().offset().fix()
    }
}

/// Frozen clock for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    now: DateTime<Utc>,
    zone: FixedOffset,
}

impl FixedTimeSource {
    pub fn new(now: DateTime<Utc>, zone: FixedOffset) -> Self {
        Self { now, zone }
    }

    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Utc.fix())
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn device_zone(&self) -> FixedOffset {
        self.zone
    }
}
