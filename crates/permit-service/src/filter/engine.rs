//! Order-preserving predicate filtering.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use permit_core::types::PermitTypeId;
use permit_entity::{DerivedPermitView, PermitType};

/// Filter criteria, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitFilter {
    /// Free-text query over applicant name and permit type title.
    #[serde(default)]
    pub search_query: String,
    /// Exact permit type; `None` disables the filter.
    #[serde(default)]
    pub permit_type_id: Option<PermitTypeId>,
}

impl PermitFilter {
    /// Filter by query only.
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search_query: query.into(),
            permit_type_id: None,
        }
    }

    /// Filter by permit type only.
    pub fn of_type(permit_type_id: PermitTypeId) -> Self {
        Self {
            search_query: String::new(),
            permit_type_id: Some(permit_type_id),
        }
    }

    /// Whether a view passes every active predicate.
    pub fn matches(&self, view: &DerivedPermitView) -> bool {
        self.matches_type(view) && self.matches_query(view)
    }

    fn matches_type(&self, view: &DerivedPermitView) -> bool {
        match self.permit_type_id {
            Some(wanted) => view.permit.permit_type_id() == Some(wanted),
            None => true,
        }
    }

    fn matches_query(&self, view: &DerivedPermitView) -> bool {
        let query = self.search_query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        let title = view
            .permit
            .permit_type_title()
            .unwrap_or_default()
            .to_lowercase();
        if title.contains(&query) {
            return true;
        }

        let full_name = view.permit.applicant_full_name().to_lowercase();
        if full_name.is_empty() {
            return false;
        }
        full_name.contains(&query)
    }
}

/// Views passing `filter`, in input order.
pub fn filter_views<'a>(
    views: &'a [DerivedPermitView],
    filter: &PermitFilter,
) -> Vec<&'a DerivedPermitView> {
    views.iter().filter(|v| filter.matches(v)).collect()
}

/// Distinct permit types across `views`, sorted by title.
pub fn type_facets(views: &[DerivedPermitView]) -> Vec<PermitType> {
    let mut seen = HashSet::new();
    let mut facets: Vec<PermitType> = views
        .iter()
        .filter_map(|v| v.permit.permit_type.as_ref())
        .filter(|t| seen.insert(t.id))
        .cloned()
        .collect();
    facets.sort_by(|a, b| a.title.cmp(&b.title));
    facets
}
