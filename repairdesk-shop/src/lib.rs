//! # repairdesk-shop
//!
//! The repair shop domain: clients, appliance models, inventory and repair
//! orders, with a criteria search over each.
//!
//! ```rust,ignore
//! use repairdesk_shop::prelude::*;
//!
//! let shop = RepairShop::in_memory(SearchConfig::default());
//! let ctx = RequestContext::acting_as("front-desk");
//!
//! let tvs = shop
//!     .search_appliance_models(
//!         &ApplianceModelCriteria {
//!             model: Some("tv".into()),
//!             year_greater_or_equal: Some(2020),
//!             ..Default::default()
//!         },
//!         PageRequest::default(),
//!     )
//!     .await?;
//! ```

pub mod config;
pub mod context;
pub mod model;
pub mod service;
pub mod validate;

pub use config::{ConfigError, LoggingConfig, SearchConfig, ServerConfig, ShopConfig};
pub use context::RequestContext;
pub use model::{
    ApplianceKind, ApplianceModel, ApplianceModelCriteria, Client, ClientCriteria, InventoryItem,
    InventoryItemCriteria, OrderStatus, PartCategory, RepairOrder, RepairOrderCriteria,
};
pub use service::{
    NewApplianceModel, NewClient, NewInventoryItem, NewRepairOrder, Page, PageRequest,
    Repositories, RepairShop,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{SearchConfig, ShopConfig};
    pub use crate::context::RequestContext;
    pub use crate::model::*;
    pub use crate::service::*;
}
