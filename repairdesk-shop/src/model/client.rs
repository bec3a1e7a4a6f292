//! Clients of the shop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use repairdesk_query::{Criteria, Criterion, FilterValue, Model, Record};

/// A client bringing appliances in for repair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Record for Client {
    fn field(&self, path: &str) -> FilterValue {
        match path {
            "id" => self.id.into(),
            "full_name" => self.full_name.as_str().into(),
            "phone" => self.phone.as_str().into(),
            "email" => self.email.as_deref().into(),
            "created_at" => self.created_at.into(),
            _ => FilterValue::Null,
        }
    }
}

impl Model for Client {
    const MODEL_NAME: &'static str = "Client";
    const TABLE_NAME: &'static str = "clients";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Client search parameters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientCriteria {
    /// Fragment of the full name.
    pub name: Option<String>,
    /// Fragment of the phone number.
    pub phone: Option<String>,
    /// Fragment of the email address.
    pub email: Option<String>,
}

impl Criteria for ClientCriteria {
    const ENTITY: &'static str = Client::MODEL_NAME;
    const CRITERIA: &'static [Criterion<Self>] = &[
        Criterion::text("name", "full_name", |c| c.name.as_deref().map(FilterValue::from)),
        Criterion::text("phone", "phone", |c| c.phone.as_deref().map(FilterValue::from)),
        Criterion::text("email", "email", |c| c.email.as_deref().map(FilterValue::from)),
    ];
}
