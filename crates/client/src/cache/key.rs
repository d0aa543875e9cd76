//! Cache key derivation
//!
//! Every cached read is addressed by ordered segments
//! `[entity, operation, canonical-params]`. Parameters are canonicalized
//! through `serde_json::Value`, whose object maps are ordered by field
//! name, so structurally equal filters resolve to the same slot no
//! matter how they were constructed. The bare `[entity]` root is the
//! unit of invalidation and never holds data itself.

use serde::Serialize;
use srma_common::Result;
use std::fmt;
use uuid::Uuid;

/// Entity roots addressable in the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Reviews,
    Papers,
}

impl Entity {
    pub fn as_str(self) -> &'static str {
        match self {
            Entity::Reviews => "reviews",
            Entity::Papers => "papers",
        }
    }
}

/// Address of one cache slot (or, for bare roots, an invalidation target)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    segments: Vec<String>,
}

impl QueryKey {
    /// Collection read: `[entity, "list", canonical-params]`
    pub fn list<P: Serialize>(entity: Entity, params: &P) -> Result<Self> {
        let canonical = serde_json::to_value(params)?;
        Ok(Self {
            segments: vec![
                entity.as_str().to_string(),
                "list".to_string(),
                canonical.to_string(),
            ],
        })
    }

    /// Single-entity read: `[entity, "detail", id]`
    pub fn detail(entity: Entity, id: Uuid) -> Self {
        Self {
            segments: vec![
                entity.as_str().to_string(),
                "detail".to_string(),
                id.to_string(),
            ],
        }
    }

    /// Invalidation root: `[entity]`
    pub fn root(entity: Entity) -> Self {
        Self {
            segments: vec![entity.as_str().to_string()],
        }
    }

    /// Segment-wise prefix test, the membership rule for invalidation.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(":"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use srma_common::models::{PaperFilter, ReviewFilter};

    #[test]
    fn test_structurally_equal_filters_share_a_slot() {
        let a = ReviewFilter {
            skip: None,
            limit: Some(50),
        };
        let b = ReviewFilter {
            limit: Some(50),
            ..Default::default()
        };
        assert_eq!(
            QueryKey::list(Entity::Reviews, &a).unwrap(),
            QueryKey::list(Entity::Reviews, &b).unwrap()
        );
    }

    #[test]
    fn test_different_params_get_different_slots() {
        let a = QueryKey::list(Entity::Reviews, &ReviewFilter { skip: None, limit: Some(20) });
        let b = QueryKey::list(Entity::Reviews, &ReviewFilter { skip: None, limit: Some(50) });
        assert_ne!(a.unwrap(), b.unwrap());
    }

    #[test]
    fn test_unset_filters_do_not_change_the_key() {
        // {limit: 50} and {limit: 50, query: absent} are the same read.
        let a = PaperFilter {
            limit: Some(50),
            ..Default::default()
        };
        let b = PaperFilter {
            limit: Some(50),
            query: None,
            ..Default::default()
        };
        assert_eq!(
            QueryKey::list(Entity::Papers, &a).unwrap(),
            QueryKey::list(Entity::Papers, &b).unwrap()
        );
    }

    #[test]
    fn test_root_prefixes_all_keys_of_its_entity() {
        let root = QueryKey::root(Entity::Reviews);
        let id = Uuid::new_v4();
        let list = QueryKey::list(Entity::Reviews, &ReviewFilter::default()).unwrap();
        let detail = QueryKey::detail(Entity::Reviews, id);
        let other = QueryKey::detail(Entity::Papers, id);

        assert!(list.starts_with(&root));
        assert!(detail.starts_with(&root));
        assert!(!other.starts_with(&root));
        assert!(!root.starts_with(&list));
    }
}
