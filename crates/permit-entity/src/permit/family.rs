//! Permit-type families used to pick a document template.

use serde::{Deserialize, Serialize};

/// Closed set of document families.
///
/// Resolved from a permit-type slug once, at the boundary; everything
/// downstream matches on the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermitFamily {
    /// Business permits and renewals.
    Business,
    /// Building and construction permits.
    Building,
    /// Motorela (tricycle) franchise permits.
    Motorela,
    /// Anything else.
    Generic,
}

impl PermitFamily {
    /// Families tried against a slug, in priority order.
    const PRIORITY: [(&'static str, PermitFamily); 3] = [
        ("business", PermitFamily::Business),
        ("building", PermitFamily::Building),
        ("motorela", PermitFamily::Motorela),
    ];

    /// Resolve a family by case-insensitive substring match on the slug.
    pub fn from_slug(slug: &str) -> Self {
        let slug = slug.to_lowercase();
        Self::PRIORITY
            .iter()
            .find(|(needle, _)| slug.contains(needle))
            .map(|(_, family)| *family)
            .unwrap_or(Self::Generic)
    }

    /// Return the family as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Building => "building",
            Self::Motorela => "motorela",
            Self::Generic => "generic",
        }
    }
}
