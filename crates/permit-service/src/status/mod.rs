//! Read-side payment status reconciliation.

pub mod aggregator;

pub use aggregator::{PermitStatusAggregator, aggregate};
