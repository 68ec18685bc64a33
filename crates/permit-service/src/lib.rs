//! # permit-service
//!
//! Business logic for the staff side of the permit portal. Each service
//! orchestrates stores, the session resolver, and delivery sinks.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod board;
pub mod dispatch;
pub mod document;
pub mod filter;
pub mod review;
pub mod status;

pub use board::{BoardView, PermitBoard};
pub use dispatch::{
    ActionDispatcher, DirectoryDocumentSink, DocumentSink, InFlightChange, InFlightSet,
    PrintOutcome, ViewOutcome,
};
pub use document::{download_filename, render_document};
pub use filter::{PermitFilter, PermitSummary, filter_views, summarize, type_facets};
pub use review::ReviewService;
pub use status::{PermitStatusAggregator, aggregate};
