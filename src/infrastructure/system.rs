use crate::domain::ports::{Clock, OrderIdSource};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Wall clock in UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Takes the last four hex characters of a fresh random UUID v4.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidOrderIds;

impl OrderIdSource for UuidOrderIds {
    fn suffix(&self) -> String {
        let hex = Uuid::new_v4().simple().to_string();
        hex[hex.len() - 4..].to_string()
    }
}
