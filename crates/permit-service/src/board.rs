//! The staff working set of approved permits.
//!
//! Refresh is pull-based: nothing updates until [`PermitBoard::refresh`] is
//! called, and each refresh recomputes every derived value from scratch.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use permit_core::result::AppResult;
use permit_entity::{DerivedPermitView, PermitType};

use crate::filter::{PermitFilter, PermitSummary, filter_views, summarize, type_facets};
use crate::status::PermitStatusAggregator;

/// A filtered snapshot of the board.
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    /// Matching permits, in working-set order.
    pub items: Vec<DerivedPermitView>,
    /// Counts over `items`.
    pub summary: PermitSummary,
    /// Type filter options over the whole working set.
    pub facets: Vec<PermitType>,
}

#[derive(Debug, Default)]
struct Snapshot {
    views: Vec<DerivedPermitView>,
    facets: Vec<PermitType>,
    loaded_at: Option<DateTime<Utc>>,
}

/// Holds the last loaded working set.
pub struct PermitBoard {
    aggregator: PermitStatusAggregator,
    snapshot: RwLock<Snapshot>,
}

impl PermitBoard {
    /// Creates an empty board; call [`refresh`](Self::refresh) to load.
    pub fn new(aggregator: PermitStatusAggregator) -> Self {
        Self {
            aggregator,
            snapshot: RwLock::new(Snapshot::default()),
        }
    }

    /// Reload and recompute. Returns the number of permits loaded.
    ///
    /// On error the previous snapshot is kept.
    pub async fn refresh(&self) -> AppResult<usize> {
        let views = self.aggregator.load().await?;
        let facets = type_facets(&views);
        let count = views.len();

        *self.snapshot.write().await = Snapshot {
            views,
            facets,
            loaded_at: Some(Utc::now()),
        };
        info!(permits = count, "Permit board refreshed");
        Ok(count)
    }

    /// Apply `filter` to the current snapshot.
    pub async fn view(&self, filter: &PermitFilter) -> BoardView {
        let snapshot = self.snapshot.read().await;
        let matching = filter_views(&snapshot.views, filter);
        BoardView {
            summary: summarize(&matching),
            items: matching.into_iter().cloned().collect(),
            facets: snapshot.facets.clone(),
        }
    }

    /// When the snapshot was last loaded.
    pub async fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot.read().await.loaded_at
    }
}
