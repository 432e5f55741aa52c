use chrono::{DateTime, Utc};

/// Source of the current time used to stamp outgoing requests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of the random suffix appended to generated order ids.
pub trait OrderIdSource: Send + Sync {
    /// Returns four lower-case hex characters.
    fn suffix(&self) -> String;
}

pub type ClockBox = Box<dyn Clock>;
pub type OrderIdSourceBox = Box<dyn OrderIdSource>;
