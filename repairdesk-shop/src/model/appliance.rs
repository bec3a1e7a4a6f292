//! Appliance models the shop services.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use repairdesk_query::{Comparison, Criteria, Criterion, FilterValue, Model, Record};

token_enum! {
    /// Kind of appliance.
    pub enum ApplianceKind as "kind" {
        WashingMachine => "WASHING_MACHINE",
        Dryer => "DRYER",
        Refrigerator => "REFRIGERATOR",
        Dishwasher => "DISHWASHER",
        Oven => "OVEN",
        Microwave => "MICROWAVE",
        Television => "TELEVISION",
        AirConditioner => "AIR_CONDITIONER",
        VacuumCleaner => "VACUUM_CLEANER",
        Other => "OTHER",
    }
}

/// A brand/model pair the shop has parts or repair history for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceModel {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub kind: ApplianceKind,
    pub year: i32,
}

impl Record for ApplianceModel {
    fn field(&self, path: &str) -> FilterValue {
        match path {
            "id" => self.id.into(),
            "brand" => self.brand.as_str().into(),
            "model" => self.model.as_str().into(),
            "kind" => self.kind.into(),
            "year" => self.year.into(),
            _ => FilterValue::Null,
        }
    }
}

impl Model for ApplianceModel {
    const MODEL_NAME: &'static str = "ApplianceModel";
    const TABLE_NAME: &'static str = "appliance_models";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Appliance model search parameters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplianceModelCriteria {
    pub brand: Option<String>,
    pub model: Option<String>,
    #[serde(deserialize_with = "super::blank_as_none")]
    pub kind: Option<ApplianceKind>,
    /// Inclusive lower bound on the model year.
    #[serde(deserialize_with = "super::blank_as_none")]
    pub year_greater_or_equal: Option<i32>,
    /// Inclusive upper bound on the model year.
    #[serde(deserialize_with = "super::blank_as_none")]
    pub year_less_or_equal: Option<i32>,
}

impl Criteria for ApplianceModelCriteria {
    const ENTITY: &'static str = ApplianceModel::MODEL_NAME;
    const CRITERIA: &'static [Criterion<Self>] = &[
        Criterion::text("brand", "brand", |c| c.brand.as_deref().map(FilterValue::from)),
        Criterion::text("model", "model", |c| c.model.as_deref().map(FilterValue::from)),
        Criterion::exact("kind", "kind", |c| c.kind.map(FilterValue::from)),
        Criterion::threshold("yearGreaterOrEqual", "year", Comparison::Gte, |c| {
            c.year_greater_or_equal.map(FilterValue::from)
        }),
        Criterion::threshold("yearLessOrEqual", "year", Comparison::Lte, |c| {
            c.year_less_or_equal.map(FilterValue::from)
        }),
    ];
}
