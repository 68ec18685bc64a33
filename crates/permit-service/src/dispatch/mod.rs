//! Guarded per-permit side effects: notify and print.

pub mod dispatcher;
pub mod inflight;
pub mod sink;

pub use dispatcher::{ActionDispatcher, PrintOutcome};
pub use inflight::{InFlightChange, InFlightGuard, InFlightSet};
pub use sink::{DirectoryDocumentSink, DocumentSink, ViewOutcome};
