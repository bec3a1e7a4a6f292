//! # repairdesk-query
//!
//! Composable search filters and repository contracts for repairdesk.
//!
//! This crate provides:
//! - A storage-agnostic [`Filter`] algebra, evaluated in memory or rendered to SQL
//! - Criteria composition: optional search fields turned into one conjunction
//! - Sorting and offset pagination
//! - The [`Repository`] contract implemented by storage backends
//!
//! ## Filters
//!
//! ```rust
//! use repairdesk_query::{Filter, FilterValue};
//!
//! // Equality filter
//! let filter = Filter::Equals("status".into(), FilterValue::from("RECEIVED"));
//!
//! // Greater than or equal filter
//! let filter = Filter::Gte("year".into(), FilterValue::Int(2018));
//!
//! // Case-insensitive substring
//! let filter = Filter::Contains("full_name".into(), "smith".into());
//!
//! // Conjunction; empty operands are dropped
//! let combined = Filter::and([
//!     Filter::Equals("status".into(), "RECEIVED".into()),
//!     Filter::None,
//!     Filter::Gte("year".into(), FilterValue::Int(2018)),
//! ]);
//! assert_eq!(combined.predicate_count(), 2);
//! ```
//!
//! ## Criteria
//!
//! See the [`criteria`] module for declaring searchable fields and
//! [`compose`] for turning them into a filter.
//!
//! ## Sorting and pagination
//!
//! ```rust
//! use repairdesk_query::{OrderByField, Pagination};
//!
//! let order = OrderByField::desc("received_on");
//! assert_eq!(order.to_sql(), "received_on DESC");
//!
//! let page = Pagination::page(2, 20);
//! assert_eq!(page.to_sql(), "LIMIT 20 OFFSET 20");
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use repairdesk_query::{QueryError, ErrorCode};
//!
//! let err = QueryError::not_found("RepairOrder");
//! assert_eq!(err.code, ErrorCode::RecordNotFound);
//! ```

pub mod criteria;
pub mod error;
pub mod filter;
pub mod logging;
pub mod operations;
pub mod pagination;
pub mod traits;
pub mod types;

pub use criteria::{Comparison, Criteria, Criterion, Strategy, active_criteria, compose, compose_with};
pub use error::{ErrorCode, ErrorContext, QueryError, QueryResult};
pub use filter::{Filter, FilterValue, Relation};
pub use operations::FindMany;
pub use pagination::Pagination;
pub use traits::{Model, Mutation, Record, Repository};
pub use types::{OrderByField, SortOrder};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::criteria::{Comparison, Criteria, Criterion, compose};
    pub use crate::error::{QueryError, QueryResult};
    pub use crate::filter::{Filter, FilterValue, Relation};
    pub use crate::operations::*;
    pub use crate::pagination::Pagination;
    pub use crate::traits::{Model, Mutation, Record, Repository};
    pub use crate::types::{OrderByField, SortOrder};
}
