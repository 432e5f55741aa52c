//! Implementations of the clock and order-id ports.

pub mod fixed;
pub mod system;
