use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Server-assigned, immutable record identifier.
pub type ResourceId = u64;

/// Path-style reference string used in request bodies, e.g.
/// `/api/business_partners/7`. The backend identifies related records by
/// these paths, never by bare numeric ids or nested objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourcePath(String);

impl ResourcePath {
    pub fn business_partner(id: ResourceId) -> Self {
        Self(format!("/api/business_partners/{id}"))
    }

    pub fn account(id: ResourceId) -> Self {
        Self(format!("/api/accounts/{id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extracts the numeric id from the trailing path segment, if any.
    pub fn id(&self) -> Option<ResourceId> {
        self.0.rsplit('/').next().and_then(|s| s.parse().ok())
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Records that carry a server-assigned id.
pub trait Identified {
    fn id(&self) -> ResourceId;
}

/// A reference field as the API returns it: either the fully embedded record
/// or an id-only stub. A stub needs a secondary lookup against a previously
/// fetched collection before anything beyond the id can be trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceRef<T> {
    Embedded(T),
    Stub { id: ResourceId },
}

impl<T: Identified> ResourceRef<T> {
    pub fn id(&self) -> ResourceId {
        match self {
            Self::Embedded(record) => record.id(),
            Self::Stub { id } => *id,
        }
    }

    /// Normalizes either variant to the referenced record: an embedded record
    /// is returned directly, a stub is resolved through the lookup table.
    pub fn resolve<'a>(&'a self, lookup: &HashMap<ResourceId, &'a T>) -> Option<&'a T> {
        match self {
            Self::Embedded(record) => Some(record),
            Self::Stub { id } => lookup.get(id).copied(),
        }
    }
}

/// Builds the lookup table `resolve` expects from a fetched collection.
pub fn index_by_id<T: Identified>(items: &[T]) -> HashMap<ResourceId, &T> {
    items.iter().map(|item| (item.id(), item)).collect()
}
