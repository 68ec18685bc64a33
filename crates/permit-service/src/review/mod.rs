//! Staff review transitions.

pub mod service;

pub use service::ReviewService;
