//! Route handlers, one module per resource.

pub mod appliances;
pub mod clients;
pub mod health;
pub mod inventory;
pub mod orders;

pub use appliances::{create_appliance_model, get_appliance_model, search_appliance_models};
pub use clients::{create_client, delete_client, get_client, search_clients};
pub use health::health_check;
pub use inventory::{adjust_stock, create_inventory_item, get_inventory_item, search_inventory};
pub use orders::{create_order, get_order, search_orders, update_order_status};
