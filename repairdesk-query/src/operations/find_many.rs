//! FindMany operation for querying multiple records.

use std::fmt;
use std::marker::PhantomData;

use crate::filter::{Filter, FilterValue};
use crate::pagination::Pagination;
use crate::traits::Model;
use crate::types::OrderByField;

/// A query that finds multiple records.
///
/// The query is only a description; a [`Repository`](crate::Repository)
/// executes it.
///
/// # Example
///
/// ```rust,ignore
/// let orders = repo
///     .find_many(
///         FindMany::new()
///             .r#where(compose(&criteria))
///             .order_by(OrderByField::desc("received_on"))
///             .skip(0)
///             .take(10),
///     )
///     .await?;
/// ```
#[derive(Clone)]
pub struct FindMany<M: Model> {
    filter: Filter,
    order_by: Vec<OrderByField>,
    pagination: Pagination,
    _model: PhantomData<fn() -> M>,
}

impl<M: Model> FindMany<M> {
    /// Create a query matching every record.
    pub fn new() -> Self {
        Self {
            filter: Filter::None,
            order_by: Vec::new(),
            pagination: Pagination::new(),
            _model: PhantomData,
        }
    }

    /// Add a filter condition. Conditions accumulate with AND.
    pub fn r#where(mut self, filter: impl Into<Filter>) -> Self {
        let new_filter = filter.into();
        self.filter = self.filter.and_then(new_filter);
        self
    }

    /// Append an ordering. Earlier orderings take precedence.
    pub fn order_by(mut self, order: OrderByField) -> Self {
        self.order_by.push(order);
        self
    }

    /// Skip a number of records.
    pub fn skip(mut self, n: u64) -> Self {
        self.pagination = self.pagination.skip(n);
        self
    }

    /// Take a limited number of records.
    pub fn take(mut self, n: u64) -> Self {
        self.pagination = self.pagination.take(n);
        self
    }

    /// Replace the pagination.
    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// The accumulated filter.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// The orderings, in precedence order.
    pub fn ordering(&self) -> &[OrderByField] {
        &self.order_by
    }

    /// The pagination.
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Build the SQL query.
    pub fn build_sql(&self) -> (String, Vec<FilterValue>) {
        let (where_sql, params) = self.filter.to_sql(0);

        let mut sql = String::new();

        sql.push_str("SELECT * FROM ");
        sql.push_str(M::TABLE_NAME);

        if !self.filter.is_none() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            for (i, order) in self.order_by.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                order.write_sql(&mut sql);
            }
        }

        let pagination_sql = self.pagination.to_sql();
        if !pagination_sql.is_empty() {
            sql.push(' ');
            sql.push_str(&pagination_sql);
        }

        (sql, params)
    }
}

impl<M: Model> Default for FindMany<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> fmt::Debug for FindMany<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FindMany")
            .field("model", &M::MODEL_NAME)
            .field("filter", &self.filter)
            .field("order_by", &self.order_by)
            .field("pagination", &self.pagination)
            .finish()
    }
}
