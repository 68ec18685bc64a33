//! Search, type filtering, facets, and summary counts over derived views.

pub mod engine;
pub mod summary;

pub use engine::{PermitFilter, filter_views, type_facets};
pub use summary::{PermitSummary, summarize};
