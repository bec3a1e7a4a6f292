//! Repair orders.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use repairdesk_query::{Comparison, Criteria, Criterion, FilterValue, Model, Record, Relation};

use super::appliance::ApplianceModel;

token_enum! {
    /// Where a repair order is in its lifecycle.
    pub enum OrderStatus as "status" {
        Received => "RECEIVED",
        Diagnosing => "DIAGNOSING",
        WaitingForParts => "WAITING_FOR_PARTS",
        InRepair => "IN_REPAIR",
        Ready => "READY",
        Delivered => "DELIVERED",
        Cancelled => "CANCELLED",
    }
}

impl OrderStatus {
    /// Final states cannot transition anywhere else.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

/// The appliance model a repair order is for.
pub const APPLIANCE: Relation = Relation::new(
    "appliance",
    "appliance_models",
    "am",
    "am.id = repair_orders.appliance_model_id",
);

/// An appliance left at the shop for repair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairOrder {
    pub id: Uuid,
    pub client_id: Uuid,
    pub appliance: ApplianceModel,
    pub description: String,
    pub status: OrderStatus,
    pub received_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Record for RepairOrder {
    fn field(&self, path: &str) -> FilterValue {
        match path {
            "id" => self.id.into(),
            "client_id" => self.client_id.into(),
            "appliance_model_id" => self.appliance.id.into(),
            "description" => self.description.as_str().into(),
            "status" => self.status.into(),
            "received_on" => self.received_on.into(),
            "estimated_cost" => self.estimated_cost.into(),
            "updated_by" => self.updated_by.as_deref().into(),
            "updated_at" => self.updated_at.into(),
            _ => FilterValue::Null,
        }
    }

    fn related(&self, relation: &str) -> Vec<&dyn Record> {
        match relation {
            "appliance" => vec![&self.appliance as &dyn Record],
            _ => Vec::new(),
        }
    }
}

impl Model for RepairOrder {
    const MODEL_NAME: &'static str = "RepairOrder";
    const TABLE_NAME: &'static str = "repair_orders";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Repair order search parameters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepairOrderCriteria {
    #[serde(deserialize_with = "super::blank_as_none")]
    pub status: Option<OrderStatus>,
    #[serde(deserialize_with = "super::blank_as_none")]
    pub client_id: Option<Uuid>,
    pub description: Option<String>,
    /// Received on or after this day.
    #[serde(deserialize_with = "super::blank_as_none")]
    pub received_from: Option<NaiveDate>,
    /// Received on or before this day.
    #[serde(deserialize_with = "super::blank_as_none")]
    pub received_to: Option<NaiveDate>,
    /// Fragment of the appliance model's name.
    pub appliance_model: Option<String>,
}

impl Criteria for RepairOrderCriteria {
    const ENTITY: &'static str = RepairOrder::MODEL_NAME;
    const CRITERIA: &'static [Criterion<Self>] = &[
        Criterion::exact("status", "status", |c| c.status.map(FilterValue::from)),
        Criterion::exact("clientId", "client_id", |c| c.client_id.map(FilterValue::from)),
        Criterion::text("description", "description", |c| {
            c.description.as_deref().map(FilterValue::from)
        }),
        Criterion::threshold("receivedFrom", "received_on", Comparison::Gte, |c| {
            c.received_from.map(FilterValue::from)
        }),
        Criterion::threshold("receivedTo", "received_on", Comparison::Lte, |c| {
            c.received_to.map(FilterValue::from)
        }),
        Criterion::text("applianceModel", "model", |c: &Self| {
            c.appliance_model.as_deref().map(FilterValue::from)
        })
        .through(APPLIANCE),
    ];
}
