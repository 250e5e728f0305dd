//! DAO directory lookup.
//!
//! The governance step lists DAOs an identity can be linked to. The
//! [`DaoDirectory`] trait abstracts the remote directory; [`InMemoryDaoDirectory`]
//! serves a fixed list for tests and offline hosts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Error types for directory lookups.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Directory is not reachable
    #[error("Directory unavailable: {0}")]
    Unavailable(String),

    /// Lookup failed
    #[error("Lookup failed: {0}")]
    LookupFailed(String),
}

/// Summary of a DAO in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct DaoInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub member_count: u32,
    /// Listed publicly
    pub is_public: bool,
    /// Joining needs approval from the DAO
    pub requires_approval: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Filter for DAO listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct DaoFilter {
    /// Case-insensitive text matched against name, description and tags
    pub query: Option<String>,
    /// Only publicly listed DAOs
    #[serde(default)]
    pub public_only: bool,
    /// Only DAOs that accept members without approval
    #[serde(default)]
    pub open_only: bool,
    /// Exact tag match (case-insensitive)
    pub tag: Option<String>,
}

impl DaoFilter {
    /// Filter by free-text query.
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    /// Whether a DAO passes this filter.
    pub fn matches(&self, dao: &DaoInfo) -> bool {
        if self.public_only && !dao.is_public {
            return false;
        }
        if self.open_only && dao.requires_approval {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !dao.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                return false;
            }
        }
        match self.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                let needle = query.to_lowercase();
                dao.name.to_lowercase().contains(&needle)
                    || dao.description.to_lowercase().contains(&needle)
                    || dao.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            }
            _ => true,
        }
    }
}

/// Read-only DAO directory.
#[async_trait]
pub trait DaoDirectory: Send + Sync {
    /// List DAOs matching the filter.
    async fn list_daos(&self, filter: &DaoFilter) -> Result<Vec<DaoInfo>, DirectoryError>;
}

/// Directory backed by a fixed list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDaoDirectory {
    daos: Vec<DaoInfo>,
}

impl InMemoryDaoDirectory {
    pub fn new(daos: Vec<DaoInfo>) -> Self {
        Self { daos }
    }

    /// Add a DAO.
    pub fn with_dao(mut self, dao: DaoInfo) -> Self {
        self.daos.push(dao);
        self
    }

    pub fn len(&self) -> usize {
        self.daos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.daos.is_empty()
    }
}

#[async_trait]
impl DaoDirectory for InMemoryDaoDirectory {
    async fn list_daos(&self, filter: &DaoFilter) -> Result<Vec<DaoInfo>, DirectoryError> {
        let mut found: Vec<DaoInfo> = self
            .daos
            .iter()
            .filter(|dao| filter.matches(dao))
            .cloned()
            .collect();

        // Largest first, then alphabetical
        found.sort_by(|a, b| {
            b.member_count
                .cmp(&a.member_count)
                .then_with(|| a.name.cmp(&b.name))
        });

        debug!(matches = found.len(), total = self.daos.len(), "Listed DAOs");
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dao(id: &str, name: &str, members: u32, public: bool, approval: bool, tags: &[&str]) -> DaoInfo {
        DaoInfo {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{} community", name),
            member_count: members,
            is_public: public,
            requires_approval: approval,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn directory() -> InMemoryDaoDirectory {
        InMemoryDaoDirectory::new(vec![
            dao("dao-1", "Builders Guild", 120, true, false, &["tech"]),
            dao("dao-2", "Art Collective", 450, true, true, &["art", "culture"]),
            dao("dao-3", "Private Circle", 12, false, true, &["tech"]),
        ])
    }

    #[tokio::test]
    async fn test_list_all_sorted_by_members() {
        let daos = directory().list_daos(&DaoFilter::default()).await.unwrap();
        let ids: Vec<_> = daos.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["dao-2", "dao-1", "dao-3"]);
    }

    #[tokio::test]
    async fn test_query_is_case_insensitive() {
        let daos = directory().list_daos(&DaoFilter::query("GUILD")).await.unwrap();
        assert_eq!(daos.len(), 1);
        assert_eq!(daos[0].id, "dao-1");
    }

    #[tokio::test]
    async fn test_public_and_open_filters() {
        let filter = DaoFilter {
            public_only: true,
            open_only: true,
            ..Default::default()
        };
        let daos = directory().list_daos(&filter).await.unwrap();
        assert_eq!(daos.len(), 1);
        assert_eq!(daos[0].id, "dao-1");
    }

    #[test]
    fn test_tag_filter() {
        let filter = DaoFilter {
            tag: Some("Tech".to_string()),
            ..Default::default()
        };
        let daos = tokio_test::block_on(directory().list_daos(&filter)).unwrap();
        let ids: Vec<_> = daos.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["dao-1", "dao-3"]);
    }

    #[test]
    fn test_blank_query_matches_everything() {
        let filter = DaoFilter::query("   ");
        assert!(directory().daos.iter().all(|d| filter.matches(d)));
    }
}
