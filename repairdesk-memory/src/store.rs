//! Map-backed repository.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use repairdesk_query::{Filter, FindMany, Model, Mutation, QueryError, QueryResult, Repository};

/// In-memory repository for one model type.
///
/// Records are kept in insertion order, which is also the result order when
/// a query does not specify one. Clones share the same storage.
pub struct MemoryStore<M: Model> {
    records: Arc<RwLock<IndexMap<Uuid, M>>>,
}

impl<M: Model> MemoryStore<M> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Create a store pre-populated with records. Later duplicates replace
    /// earlier ones.
    pub fn with_records(records: impl IntoIterator<Item = M>) -> Self {
        let map = records.into_iter().map(|r| (r.id(), r)).collect();
        Self {
            records: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn select(&self, query: &FindMany<M>) -> Vec<M> {
        let records = self.records.read();
        let mut matched: Vec<&M> = records
            .values()
            .filter(|record| query.filter().matches(*record))
            .collect();

        let ordering = query.ordering();
        if !ordering.is_empty() {
            // Stable sort: ties keep insertion order.
            matched.sort_by(|a, b| {
                ordering
                    .iter()
                    .fold(Ordering::Equal, |acc, order| acc.then_with(|| order.compare(*a, *b)))
            });
        }

        query.pagination().apply(matched.into_iter().cloned())
    }
}

impl<M: Model> Default for MemoryStore<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Clone for MemoryStore<M> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<M: Model> fmt::Debug for MemoryStore<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("model", &M::MODEL_NAME)
            .field("len", &self.len())
            .finish()
    }
}

#[async_trait]
impl<M: Model> Repository<M> for MemoryStore<M> {
    #[instrument(skip(self, query), fields(model = M::MODEL_NAME))]
    async fn find_many(&self, query: FindMany<M>) -> QueryResult<Vec<M>> {
        let results = self.select(&query);
        debug!(
            predicates = query.filter().predicate_count(),
            returned = results.len(),
            "Executing find_many"
        );
        Ok(results)
    }

    #[instrument(skip(self, filter), fields(model = M::MODEL_NAME))]
    async fn count(&self, filter: Filter) -> QueryResult<u64> {
        let records = self.records.read();
        let count = records.values().filter(|r| filter.matches(*r)).count();
        debug!(count, "Executing count");
        Ok(count as u64)
    }

    async fn find_unique(&self, id: Uuid) -> QueryResult<Option<M>> {
        Ok(self.records.read().get(&id).cloned())
    }

    #[instrument(skip(self, record), fields(model = M::MODEL_NAME, id = %record.id()))]
    async fn create(&self, record: M) -> QueryResult<M> {
        let mut records = self.records.write();
        let id = record.id();
        if records.contains_key(&id) {
            return Err(QueryError::unique_violation(M::MODEL_NAME, "id"));
        }
        records.insert(id, record.clone());
        debug!("Executing insert");
        Ok(record)
    }

    #[instrument(skip(self, record, conflict), fields(model = M::MODEL_NAME, id = %record.id()))]
    async fn create_unique(&self, record: M, conflict: Filter, field: &str) -> QueryResult<M> {
        let mut records = self.records.write();
        let id = record.id();
        if records.contains_key(&id) {
            return Err(QueryError::unique_violation(M::MODEL_NAME, "id"));
        }
        if records.values().any(|r| conflict.matches(r)) {
            debug!(field, "Rejecting duplicate insert");
            return Err(QueryError::unique_violation(M::MODEL_NAME, field));
        }
        records.insert(id, record.clone());
        debug!("Executing insert");
        Ok(record)
    }

    #[instrument(skip(self, record), fields(model = M::MODEL_NAME, id = %record.id()))]
    async fn update(&self, record: M) -> QueryResult<M> {
        let mut records = self.records.write();
        let id = record.id();
        match records.get_mut(&id) {
            Some(slot) => {
                *slot = record.clone();
                debug!("Executing update");
                Ok(record)
            }
            None => Err(QueryError::not_found_id(M::MODEL_NAME, id)),
        }
    }

    #[instrument(skip(self, apply), fields(model = M::MODEL_NAME))]
    async fn update_with(&self, id: Uuid, apply: Mutation<M>) -> QueryResult<M> {
        let mut records = self.records.write();
        let current = records
            .get(&id)
            .ok_or_else(|| QueryError::not_found_id(M::MODEL_NAME, id))?;

        let mut next = current.clone();
        apply(&mut next)?;
        records.insert(id, next.clone());
        debug!("Executing update");
        Ok(next)
    }

    #[instrument(skip(self), fields(model = M::MODEL_NAME))]
    async fn delete(&self, id: Uuid) -> QueryResult<M> {
        let removed = self.records.write().shift_remove(&id);
        debug!(found = removed.is_some(), "Executing delete");
        removed.ok_or_else(|| QueryError::not_found_id(M::MODEL_NAME, id))
    }
}
