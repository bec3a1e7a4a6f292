//! The repair shop service: CRUD plus criteria search over every entity.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use repairdesk_memory::MemoryStore;
use repairdesk_query::{
    Criteria, Filter, FindMany, Model, OrderByField, Pagination, QueryError, QueryResult,
    Repository, active_criteria, compose,
};

use crate::config::SearchConfig;
use crate::context::RequestContext;
use crate::model::{
    ApplianceKind, ApplianceModel, ApplianceModelCriteria, Client, ClientCriteria, InventoryItem,
    InventoryItemCriteria, OrderStatus, PartCategory, RepairOrder, RepairOrderCriteria,
};
use crate::validate;

/// Paging parameters of a search request. Pages are 1-indexed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    pub page: Option<u64>,
    pub size: Option<u64>,
}

impl PageRequest {
    /// A specific page.
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
        }
    }

    /// Resolve to a concrete `(page, size)`.
    ///
    /// Missing or zero sizes fall back to the default; sizes above the
    /// maximum are clamped. Page 0 is page 1.
    pub fn resolve(&self, config: &SearchConfig) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let size = self
            .size
            .filter(|s| *s > 0)
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size);
        (page, size)
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matches across all pages.
    pub total: u64,
    pub page: u64,
    pub size: u64,
}

impl<T> Page<T> {
    /// Check if this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Input for registering a client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Input for registering an appliance model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplianceModel {
    pub brand: String,
    pub model: String,
    pub kind: ApplianceKind,
    pub year: i32,
}

/// Input for stocking a new part.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    pub name: String,
    pub part_number: String,
    pub category: PartCategory,
    pub quantity: i64,
    pub price: Decimal,
    #[serde(default)]
    pub compatible_model_ids: Vec<Uuid>,
}

/// Input for opening a repair order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRepairOrder {
    pub client_id: Uuid,
    pub appliance_model_id: Uuid,
    pub description: String,
    /// Defaults to today.
    #[serde(default)]
    pub received_on: Option<NaiveDate>,
    #[serde(default)]
    pub estimated_cost: Option<Decimal>,
}

/// Storage for every entity.
#[derive(Clone)]
pub struct Repositories {
    pub clients: Arc<dyn Repository<Client>>,
    pub appliance_models: Arc<dyn Repository<ApplianceModel>>,
    pub inventory: Arc<dyn Repository<InventoryItem>>,
    pub orders: Arc<dyn Repository<RepairOrder>>,
}

impl Repositories {
    /// Fresh in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            clients: Arc::new(MemoryStore::<Client>::new()),
            appliance_models: Arc::new(MemoryStore::<ApplianceModel>::new()),
            inventory: Arc::new(MemoryStore::<InventoryItem>::new()),
            orders: Arc::new(MemoryStore::<RepairOrder>::new()),
        }
    }
}

/// The repair shop.
///
/// Cheap to clone; clones share storage. Writes whose checks span two
/// repositories (orders referencing clients) hold `links` for their whole
/// check-then-write sequence.
#[derive(Clone)]
pub struct RepairShop {
    repos: Repositories,
    search: SearchConfig,
    links: Arc<Mutex<()>>,
}

impl RepairShop {
    /// Create a shop over the given storage.
    pub fn new(repos: Repositories, search: SearchConfig) -> Self {
        Self {
            repos,
            search,
            links: Arc::new(Mutex::new(())),
        }
    }

    /// Create a shop backed by empty in-memory stores.
    pub fn in_memory(search: SearchConfig) -> Self {
        Self::new(Repositories::in_memory(), search)
    }

    /// Paging limits in effect.
    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    // ============== Clients ==============

    /// Register a client.
    pub async fn create_client(&self, ctx: &RequestContext, input: NewClient) -> QueryResult<Client> {
        validate::required("fullName", &input.full_name)?;
        validate::phone("phone", &input.phone)?;
        let email = input
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        if let Some(ref email) = email {
            validate::email("email", email)?;
        }

        let client = Client {
            id: Uuid::new_v4(),
            full_name: input.full_name.trim().to_string(),
            phone: input.phone.trim().to_string(),
            email,
            created_at: Utc::now(),
        };
        let client = self.repos.clients.create(client).await?;
        info!(request_id = %ctx.request_id, id = %client.id, "client created");
        Ok(client)
    }

    /// Look a client up by id.
    pub async fn get_client(&self, id: Uuid) -> QueryResult<Client> {
        find_by_id(self.repos.clients.as_ref(), id).await
    }

    /// Search clients, ordered by name.
    pub async fn search_clients(
        &self,
        criteria: &ClientCriteria,
        page: PageRequest,
    ) -> QueryResult<Page<Client>> {
        self.search(
            self.repos.clients.as_ref(),
            criteria,
            page,
            vec![OrderByField::asc("full_name")],
        )
        .await
    }

    /// Remove a client. Refused while repair orders reference them.
    pub async fn delete_client(&self, ctx: &RequestContext, id: Uuid) -> QueryResult<Client> {
        let _links = self.links.lock().await;
        find_by_id(self.repos.clients.as_ref(), id).await?;

        let open = self
            .repos
            .orders
            .count(Filter::Equals("client_id".into(), id.into()))
            .await?;
        if open > 0 {
            return Err(QueryError::foreign_key_violation(
                Client::MODEL_NAME,
                RepairOrder::MODEL_NAME,
            )
            .with_context(format!("Deleting client with {} repair order(s)", open)));
        }

        let client = self.repos.clients.delete(id).await?;
        info!(request_id = %ctx.request_id, id = %id, "client deleted");
        Ok(client)
    }

    // ============== Appliance models ==============

    /// Register an appliance model.
    pub async fn create_appliance_model(
        &self,
        ctx: &RequestContext,
        input: NewApplianceModel,
    ) -> QueryResult<ApplianceModel> {
        validate::required("brand", &input.brand)?;
        validate::required("model", &input.model)?;
        validate::year("year", input.year)?;

        let model = ApplianceModel {
            id: Uuid::new_v4(),
            brand: input.brand.trim().to_string(),
            model: input.model.trim().to_string(),
            kind: input.kind,
            year: input.year,
        };
        let model = self.repos.appliance_models.create(model).await?;
        info!(request_id = %ctx.request_id, id = %model.id, "appliance model created");
        Ok(model)
    }

    /// Look an appliance model up by id.
    pub async fn get_appliance_model(&self, id: Uuid) -> QueryResult<ApplianceModel> {
        find_by_id(self.repos.appliance_models.as_ref(), id).await
    }

    /// Search appliance models, ordered by brand then model.
    pub async fn search_appliance_models(
        &self,
        criteria: &ApplianceModelCriteria,
        page: PageRequest,
    ) -> QueryResult<Page<ApplianceModel>> {
        self.search(
            self.repos.appliance_models.as_ref(),
            criteria,
            page,
            vec![OrderByField::asc("brand"), OrderByField::asc("model")],
        )
        .await
    }

    // ============== Inventory ==============

    /// Stock a new part. Part numbers are unique.
    pub async fn create_inventory_item(
        &self,
        ctx: &RequestContext,
        input: NewInventoryItem,
    ) -> QueryResult<InventoryItem> {
        validate::required("name", &input.name)?;
        validate::required("partNumber", &input.part_number)?;
        validate::non_negative("quantity", input.quantity)?;
        validate::non_negative_amount("price", input.price)?;

        let part_number = input.part_number.trim().to_string();

        let mut seen = HashSet::new();
        let mut compatible_models = Vec::new();
        for id in input.compatible_model_ids {
            if seen.insert(id) {
                compatible_models.push(find_by_id(self.repos.appliance_models.as_ref(), id).await?);
            }
        }

        let item = InventoryItem {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            part_number,
            category: input.category,
            quantity: input.quantity,
            price: input.price,
            compatible_models,
        };
        let conflict = Filter::Equals("part_number".into(), item.part_number.as_str().into());
        let item = self
            .repos
            .inventory
            .create_unique(item, conflict, "partNumber")
            .await?;
        info!(request_id = %ctx.request_id, id = %item.id, "inventory item created");
        Ok(item)
    }

    /// Look an inventory item up by id.
    pub async fn get_inventory_item(&self, id: Uuid) -> QueryResult<InventoryItem> {
        find_by_id(self.repos.inventory.as_ref(), id).await
    }

    /// Search inventory, ordered by name.
    pub async fn search_inventory(
        &self,
        criteria: &InventoryItemCriteria,
        page: PageRequest,
    ) -> QueryResult<Page<InventoryItem>> {
        self.search(
            self.repos.inventory.as_ref(),
            criteria,
            page,
            vec![OrderByField::asc("name")],
        )
        .await
    }

    /// Add (or with a negative delta, remove) units of a part.
    pub async fn adjust_stock(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        delta: i64,
    ) -> QueryResult<InventoryItem> {
        let apply = move |item: &mut InventoryItem| -> QueryResult<()> {
            let quantity = item
                .quantity
                .checked_add(delta)
                .ok_or_else(|| QueryError::invalid_input("delta", "stock adjustment overflows"))?;
            if quantity < 0 {
                return Err(QueryError::invalid_input(
                    "delta",
                    format!("only {} unit(s) in stock", item.quantity),
                ));
            }
            item.quantity = quantity;
            Ok(())
        };
        let item = self.repos.inventory.update_with(id, Box::new(apply)).await?;
        info!(
            request_id = %ctx.request_id,
            id = %id,
            delta,
            quantity = item.quantity,
            "stock adjusted"
        );
        Ok(item)
    }

    // ============== Repair orders ==============

    /// Open a repair order for an existing client and appliance model.
    pub async fn create_order(
        &self,
        ctx: &RequestContext,
        input: NewRepairOrder,
    ) -> QueryResult<RepairOrder> {
        validate::required("description", &input.description)?;
        if let Some(cost) = input.estimated_cost {
            validate::non_negative_amount("estimatedCost", cost)?;
        }

        let _links = self.links.lock().await;

        let client = find_by_id(self.repos.clients.as_ref(), input.client_id).await?;
        let appliance =
            find_by_id(self.repos.appliance_models.as_ref(), input.appliance_model_id).await?;

        let now = Utc::now();
        let order = RepairOrder {
            id: Uuid::new_v4(),
            client_id: client.id,
            appliance,
            description: input.description.trim().to_string(),
            status: OrderStatus::Received,
            received_on: input.received_on.unwrap_or_else(|| now.date_naive()),
            estimated_cost: input.estimated_cost,
            updated_by: Some(ctx.actor_or_system().to_string()),
            updated_at: now,
        };
        let order = self.repos.orders.create(order).await?;
        info!(request_id = %ctx.request_id, id = %order.id, client = %client.id, "repair order created");
        Ok(order)
    }

    /// Look a repair order up by id.
    pub async fn get_order(&self, id: Uuid) -> QueryResult<RepairOrder> {
        find_by_id(self.repos.orders.as_ref(), id).await
    }

    /// Search repair orders, newest first.
    pub async fn search_orders(
        &self,
        criteria: &RepairOrderCriteria,
        page: PageRequest,
    ) -> QueryResult<Page<RepairOrder>> {
        self.search(
            self.repos.orders.as_ref(),
            criteria,
            page,
            vec![OrderByField::desc("received_on"), OrderByField::desc("updated_at")],
        )
        .await
    }

    /// Move a repair order to a new status, recording who did it.
    pub async fn update_order_status(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        status: OrderStatus,
    ) -> QueryResult<RepairOrder> {
        let actor = ctx.actor_or_system().to_string();
        let order = self
            .repos
            .orders
            .update_with(
                id,
                Box::new(move |order: &mut RepairOrder| -> QueryResult<()> {
                    if order.status.is_final() {
                        return Err(QueryError::invalid_input(
                            "status",
                            format!("order is already {} and cannot change", order.status),
                        ));
                    }
                    order.status = status;
                    order.updated_by = Some(actor);
                    order.updated_at = Utc::now();
                    Ok(())
                }),
            )
            .await?;
        info!(
            request_id = %ctx.request_id,
            id = %id,
            status = %status,
            actor = ctx.actor_or_system(),
            "repair order status changed"
        );
        Ok(order)
    }

    async fn search<M, C>(
        &self,
        repo: &dyn Repository<M>,
        criteria: &C,
        page: PageRequest,
        ordering: Vec<OrderByField>,
    ) -> QueryResult<Page<M>>
    where
        M: Model,
        C: Criteria,
    {
        let (page, size) = page.resolve(&self.search);
        let filter = compose(criteria);

        let total = repo.count(filter.clone()).await?;
        let query = ordering
            .into_iter()
            .fold(FindMany::new().r#where(filter), FindMany::order_by)
            .paginate(Pagination::page(page, size));
        let items = repo.find_many(query).await?;

        debug!(
            entity = C::ENTITY,
            criteria = ?active_criteria(criteria),
            total,
            page,
            size,
            returned = items.len(),
            "search executed"
        );
        Ok(Page {
            items,
            total,
            page,
            size,
        })
    }
}

async fn find_by_id<M: Model>(repo: &dyn Repository<M>, id: Uuid) -> QueryResult<M> {
    repo.find_unique(id)
        .await?
        .ok_or_else(|| QueryError::not_found_id(M::MODEL_NAME, id))
}
