use crate::domain::ports::{Clock, OrderIdSource};
use crate::domain::request::TIMESTAMP_FORMAT;
use crate::error::HppError;
use chrono::{DateTime, NaiveDateTime, Utc};

/// A clock frozen at one instant.
///
/// Used to reproduce a signature for a known timestamp, in tests or when
/// re-issuing a request.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Parses a 14-digit `YYYYMMDDHHMMSS` timestamp, read as UTC.
    pub fn parse(timestamp: &str) -> Result<Self, HppError> {
        if timestamp.len() != 14 || !timestamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(HppError::Input(format!(
                "timestamp '{timestamp}' must be 14 digits (YYYYMMDDHHMMSS)"
            )));
        }
        let naive = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| HppError::Input(format!("timestamp '{timestamp}': {e}")))?;
        Ok(Self(naive.and_utc()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Always hands out the same order id suffix.
#[derive(Debug, Clone)]
pub struct FixedOrderIds(String);

impl FixedOrderIds {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self(suffix.into())
    }
}

impl OrderIdSource for FixedOrderIds {
    fn suffix(&self) -> String {
        self.0.clone()
    }
}
