//! In-memory storage backend for repairdesk.
//!
//! [`MemoryStore`] implements the [`Repository`](repairdesk_query::Repository)
//! contract over a process-local map. Filters are evaluated with
//! [`Filter::matches`](repairdesk_query::Filter::matches), so any filter that
//! renders to SQL behaves the same way here.
//!
//! # Example
//!
//! ```rust,ignore
//! use repairdesk_memory::MemoryStore;
//! use repairdesk_query::{FindMany, OrderByField, Repository};
//!
//! let store = MemoryStore::<Client>::new();
//! store.create(client).await?;
//!
//! let page = store
//!     .find_many(FindMany::new().order_by(OrderByField::asc("full_name")).take(10))
//!     .await?;
//! ```

pub mod store;

pub use store::MemoryStore;
