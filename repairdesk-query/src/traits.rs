//! Core traits tying records, models and storage together.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::QueryResult;
use crate::filter::{Filter, FilterValue};
use crate::operations::FindMany;

/// A record whose fields can be inspected by a [`Filter`].
pub trait Record: Send + Sync {
    /// Value of the attribute at `path`, or [`FilterValue::Null`] when the
    /// attribute is unset or unknown.
    fn field(&self, path: &str) -> FilterValue;

    /// Records reachable through the named relation.
    fn related(&self, relation: &str) -> Vec<&dyn Record> {
        let _ = relation;
        Vec::new()
    }
}

/// A stored entity.
pub trait Model: Record + Clone + Send + Sync + 'static {
    /// Model name used in errors and logs.
    const MODEL_NAME: &'static str;
    /// Table name used in rendered SQL.
    const TABLE_NAME: &'static str;

    /// Primary key.
    fn id(&self) -> Uuid;
}

/// A change applied to a record by [`Repository::update_with`].
pub type Mutation<M> = Box<dyn FnOnce(&mut M) -> QueryResult<()> + Send>;

/// Persistence for one model type.
///
/// Implementations own connection and transaction management; callers only
/// hand over filters and records.
#[async_trait]
pub trait Repository<M: Model>: Send + Sync {
    /// Find records matching a query, honoring its ordering and pagination.
    async fn find_many(&self, query: FindMany<M>) -> QueryResult<Vec<M>>;

    /// Find every record matching a filter.
    async fn find_all(&self, filter: Filter) -> QueryResult<Vec<M>> {
        self.find_many(FindMany::new().r#where(filter)).await
    }

    /// Count records matching a filter.
    async fn count(&self, filter: Filter) -> QueryResult<u64>;

    /// Find a record by primary key.
    async fn find_unique(&self, id: Uuid) -> QueryResult<Option<M>>;

    /// Insert a new record.
    async fn create(&self, record: M) -> QueryResult<M>;

    /// Insert a new record unless an existing one matches `conflict`.
    ///
    /// The check and the insert are one step, so concurrent callers cannot
    /// both pass. A match fails with `UniqueConstraint` on `field`.
    async fn create_unique(&self, record: M, conflict: Filter, field: &str) -> QueryResult<M>;

    /// Replace an existing record.
    async fn update(&self, record: M) -> QueryResult<M>;

    /// Read, change and write back one record as a single step.
    ///
    /// Nothing is written when `apply` fails; its error is returned as is.
    async fn update_with(&self, id: Uuid, apply: Mutation<M>) -> QueryResult<M>;

    /// Remove a record by primary key, returning it.
    async fn delete(&self, id: Uuid) -> QueryResult<M>;
}
