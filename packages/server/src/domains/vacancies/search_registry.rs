//! In-process store of search results awaiting export.
//!
//! Every read of `/api/vacancies` produces an immutable snapshot addressed by
//! its own `search_id`. Export looks a snapshot up by id, or falls back to the
//! most recent one when the caller sends none. The registry holds at most
//! `capacity` snapshots and evicts the oldest first.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Vacancy, VacancyFilter};

pub const DEFAULT_CAPACITY: usize = 32;

#[derive(Debug, Clone)]
pub struct SearchSnapshot {
    pub id: Uuid,
    pub filter: VacancyFilter,
    pub vacancies: Vec<Vacancy>,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    snapshots: HashMap<Uuid, Arc<SearchSnapshot>>,
    // Insertion order, oldest first. The back is the latest search.
    order: VecDeque<Uuid>,
}

/// Thread-safe, cloneable.
#[derive(Clone)]
pub struct SearchRegistry {
    inner: Arc<RwLock<Inner>>,
    capacity: usize,
}

impl Default for SearchRegistry {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl SearchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of zero is treated as one: the latest search is always kept.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            capacity: capacity.max(1),
        }
    }

    /// Record a search result and return its id.
    pub async fn record(&self, filter: VacancyFilter, vacancies: Vec<Vacancy>) -> Uuid {
        let snapshot = SearchSnapshot {
            id: Uuid::now_v7(),
            filter,
            vacancies,
            created_at: Utc::now(),
        };
        let id = snapshot.id;

        let mut inner = self.inner.write().await;
        inner.snapshots.insert(id, Arc::new(snapshot));
        inner.order.push_back(id);

        while inner.order.len() > self.capacity {
            if let Some(evicted) = inner.order.pop_front() {
                inner.snapshots.remove(&evicted);
            }
        }

        id
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<SearchSnapshot>> {
        self.inner.read().await.snapshots.get(&id).cloned()
    }

    pub async fn latest(&self) -> Option<Arc<SearchSnapshot>> {
        let inner = self.inner.read().await;
        inner
            .order
            .back()
            .and_then(|id| inner.snapshots.get(id))
            .cloned()
    }

    /// Resolve an explicit id, or the latest snapshot when `id` is `None`.
    pub async fn resolve(&self, id: Option<Uuid>) -> Option<Arc<SearchSnapshot>> {
        match id {
            Some(id) => self.get(id).await,
            None => self.latest().await,
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.snapshots.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vacancy(id: i64) -> Vacancy {
        Vacancy {
            id,
            title: format!("Vacancy {}", id),
            city: "Moscow".into(),
            specialization: "Programmer".into(),
            salary_min: 0.0,
            salary_max: 0.0,
            currency: "RUR".into(),
            url: String::new(),
        }
    }

    #[tokio::test]
    async fn empty_registry_resolves_nothing() {
        let registry = SearchRegistry::new();
        assert!(registry.is_empty().await);
        assert!(registry.resolve(None).await.is_none());
        assert!(registry.resolve(Some(Uuid::new_v4())).await.is_none());
    }

    #[tokio::test]
    async fn resolves_by_id_and_latest() {
        let registry = SearchRegistry::new();
        let first = registry
            .record(VacancyFilter::default(), vec![vacancy(1)])
            .await;
        let second = registry
            .record(VacancyFilter::default(), vec![vacancy(2), vacancy(3)])
            .await;

        let snap = registry.resolve(Some(first)).await.unwrap();
        assert_eq!(snap.vacancies, vec![vacancy(1)]);

        let latest = registry.resolve(None).await.unwrap();
        assert_eq!(latest.id, second);
        assert_eq!(latest.vacancies.len(), 2);
    }

    #[tokio::test]
    async fn snapshot_records_when_search_ran() {
        let registry = SearchRegistry::new();
        let before = Utc::now();
        let id = registry.record(VacancyFilter::default(), vec![]).await;
        let after = Utc::now();

        let snap = registry.get(id).await.unwrap();
        assert!(snap.created_at >= before && snap.created_at <= after);
    }

    #[tokio::test]
    async fn evicts_oldest_beyond_capacity() {
        let registry = SearchRegistry::with_capacity(2);
        let a = registry.record(VacancyFilter::default(), vec![]).await;
        let b = registry.record(VacancyFilter::default(), vec![]).await;
        let c = registry.record(VacancyFilter::default(), vec![]).await;

        assert_eq!(registry.len().await, 2);
        assert!(registry.get(a).await.is_none());
        assert!(registry.get(b).await.is_some());
        assert_eq!(registry.latest().await.unwrap().id, c);
    }

    #[tokio::test]
    async fn zero_capacity_keeps_latest() {
        let registry = SearchRegistry::with_capacity(0);
        registry.record(VacancyFilter::default(), vec![]).await;
        let last = registry.record(VacancyFilter::default(), vec![]).await;
        assert_eq!(registry.len().await, 1);
        assert_eq!(registry.latest().await.unwrap().id, last);
    }
}
