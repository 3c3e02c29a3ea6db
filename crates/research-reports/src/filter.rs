use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use report_core::RawRecord;

use crate::time::PublishTime;

/// Keeps records published at or after a cutoff.
///
/// Fail-open: a record whose publish time is missing or cannot be resolved
/// is always kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyFilter {
    cutoff: DateTime<Utc>,
}

impl RecencyFilter {
    pub fn new<Tz: TimeZone>(cutoff: DateTime<Tz>) -> Self {
        Self {
            cutoff: cutoff.with_timezone(&Utc),
        }
    }

    /// Cutoff of `days` days before now
    pub fn within_days(days: u32) -> Self {
        Self::within_days_of(Local::now(), days)
    }

    pub fn within_days_of(now: DateTime<Local>, days: u32) -> Self {
        let cutoff = now
            .with_timezone(&Utc)
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { cutoff }
    }

    pub fn cutoff(&self) -> DateTime<Utc> {
        self.cutoff
    }

    pub fn admits_time(&self, time: &PublishTime) -> bool {
        match time.instant() {
            Some(at) => at.with_timezone(&Utc) >= self.cutoff,
            None => true,
        }
    }

    pub fn admits(&self, record: &RawRecord) -> bool {
        self.admits_time(&PublishTime::resolve(record.get("publish_at")))
    }
}
