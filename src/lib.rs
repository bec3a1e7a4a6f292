//! # repairdesk
//!
//! A repair-shop management backend: clients, appliance models, inventory
//! and repair orders, searchable through composable criteria.
//!
//! repairdesk provides:
//! - A storage-agnostic filter algebra, evaluated in memory or rendered to SQL
//! - Criteria composition: every optional search field becomes one predicate,
//!   absent fields are skipped, and present ones are joined with AND
//! - An in-memory repository backend
//! - The shop service with validation and paging
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use repairdesk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> QueryResult<()> {
//!     let shop = RepairShop::in_memory(SearchConfig::default());
//!     let ctx = RequestContext::acting_as("front-desk");
//!
//!     shop.create_appliance_model(&ctx, NewApplianceModel {
//!         brand: "Acme".into(),
//!         model: "Smart TV 55".into(),
//!         kind: ApplianceKind::Television,
//!         year: 2021,
//!     })
//!     .await?;
//!
//!     let page = shop
//!         .search_appliance_models(
//!             &ApplianceModelCriteria { model: Some("tv".into()), ..Default::default() },
//!             PageRequest::default(),
//!         )
//!         .await?;
//!     assert_eq!(page.total, 1);
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Filters, criteria composition, queries and errors.
pub mod query {
    pub use repairdesk_query::*;
}

/// In-memory storage.
pub mod memory {
    pub use repairdesk_memory::*;
}

/// Shop entities, configuration and service.
pub mod shop {
    pub use repairdesk_shop::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use repairdesk_memory::MemoryStore;
    pub use repairdesk_query::prelude::*;
    pub use repairdesk_shop::prelude::*;
}

// Re-export key types at the crate root
pub use repairdesk_query::{Filter, FilterValue, QueryError, QueryResult, compose};
pub use repairdesk_shop::{RepairShop, ShopConfig};
