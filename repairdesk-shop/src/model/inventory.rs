//! Spare parts on the shelf.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use repairdesk_query::{Comparison, Criteria, Criterion, FilterValue, Model, Record, Relation};

use super::appliance::ApplianceModel;

token_enum! {
    /// Category of a spare part.
    pub enum PartCategory as "category" {
        Pump => "PUMP",
        Motor => "MOTOR",
        Belt => "BELT",
        Seal => "SEAL",
        Filter => "FILTER",
        HeatingElement => "HEATING_ELEMENT",
        ControlBoard => "CONTROL_BOARD",
        Sensor => "SENSOR",
        Display => "DISPLAY",
        Other => "OTHER",
    }
}

/// Appliance models an inventory item fits.
pub const COMPATIBLE_MODELS: Relation = Relation::new(
    "compatible_models",
    "inventory_item_models iim, appliance_models",
    "am",
    "am.id = iim.appliance_model_id AND iim.inventory_item_id = inventory_items.id",
);

/// A stocked part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub part_number: String,
    pub category: PartCategory,
    pub quantity: i64,
    pub price: Decimal,
    #[serde(default)]
    pub compatible_models: Vec<ApplianceModel>,
}

impl Record for InventoryItem {
    fn field(&self, path: &str) -> FilterValue {
        match path {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "part_number" => self.part_number.as_str().into(),
            "category" => self.category.into(),
            "quantity" => self.quantity.into(),
            "price" => self.price.into(),
            _ => FilterValue::Null,
        }
    }

    fn related(&self, relation: &str) -> Vec<&dyn Record> {
        match relation {
            "compatible_models" => self
                .compatible_models
                .iter()
                .map(|m| m as &dyn Record)
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Model for InventoryItem {
    const MODEL_NAME: &'static str = "InventoryItem";
    const TABLE_NAME: &'static str = "inventory_items";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Inventory search parameters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryItemCriteria {
    pub name: Option<String>,
    pub part_number: Option<String>,
    #[serde(deserialize_with = "super::blank_as_none")]
    pub category: Option<PartCategory>,
    /// Items with at least this many units in stock.
    #[serde(deserialize_with = "super::blank_as_none")]
    pub min_quantity: Option<i64>,
    /// Items priced at or below this amount.
    #[serde(deserialize_with = "super::blank_as_none")]
    pub max_price: Option<Decimal>,
    /// Fragment of a compatible appliance model's name.
    pub compatible_model: Option<String>,
}

impl Criteria for InventoryItemCriteria {
    const ENTITY: &'static str = InventoryItem::MODEL_NAME;
    const CRITERIA: &'static [Criterion<Self>] = &[
        Criterion::text("name", "name", |c| c.name.as_deref().map(FilterValue::from)),
        Criterion::exact("partNumber", "part_number", |c| {
            c.part_number.as_deref().map(FilterValue::from)
        }),
        Criterion::exact("category", "category", |c| c.category.map(FilterValue::from)),
        Criterion::threshold("minQuantity", "quantity", Comparison::Gte, |c| {
            c.min_quantity.map(FilterValue::from)
        }),
        Criterion::threshold("maxPrice", "price", Comparison::Lte, |c| {
            c.max_price.map(FilterValue::from)
        }),
        Criterion::text("compatibleModel", "model", |c: &Self| {
            c.compatible_model.as_deref().map(FilterValue::from)
        })
        .through(COMPATIBLE_MODELS),
    ];
}
