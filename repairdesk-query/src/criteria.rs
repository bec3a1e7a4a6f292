//! Composition of search criteria into a single filter.
//!
//! A searchable entity declares a criteria struct (one optional field per
//! search dimension) and a table of [`Criterion`] entries describing how each
//! field turns into a predicate. [`compose`] walks that table and joins every
//! active predicate with AND:
//!
//! ```rust
//! use repairdesk_query::{compose, Comparison, Criteria, Criterion, Filter, FilterValue};
//!
//! #[derive(Default)]
//! struct ModelSearch {
//!     model: Option<String>,
//!     year_from: Option<i32>,
//! }
//!
//! impl Criteria for ModelSearch {
//!     const ENTITY: &'static str = "ApplianceModel";
//!     const CRITERIA: &'static [Criterion<Self>] = &[
//!         Criterion::text("model", "model", |c| c.model.as_deref().map(FilterValue::from)),
//!         Criterion::threshold("yearFrom", "year", Comparison::Gte, |c| c.year_from.map(FilterValue::from)),
//!     ];
//! }
//!
//! // Nothing requested: match everything.
//! assert!(compose(&ModelSearch::default()).is_none());
//!
//! // One field requested: exactly that predicate.
//! let search = ModelSearch { year_from: Some(2020), ..Default::default() };
//! assert_eq!(compose(&search), Filter::Gte("year".into(), FilterValue::Int(2020)));
//! ```
//!
//! Every strategy is null-tolerant on its own: an absent value yields
//! [`Filter::None`], which the conjunction drops. Composition therefore does
//! not depend on table order.

use tracing::debug;

use crate::filter::{Filter, FilterValue, Relation};

/// Comparison used by a threshold criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Field equals the value.
    Eq,
    /// Field is greater than the value.
    Gt,
    /// Field is greater than or equal to the value.
    Gte,
    /// Field is less than the value.
    Lt,
    /// Field is less than or equal to the value.
    Lte,
}

/// Rule turning a criterion value into a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Case-insensitive substring containment.
    Text,
    /// Equality (enums, identifiers, codes).
    Exact,
    /// Ordered comparison (numbers, dates).
    Threshold(Comparison),
}

impl Strategy {
    /// Build the predicate for `path`.
    ///
    /// An absent value (none, null, blank text) yields [`Filter::None`]
    /// rather than a null check. Exact text is compared trimmed.
    pub fn apply(&self, path: &str, value: Option<FilterValue>) -> Filter {
        let value = match value {
            Some(value) if !value.is_absent() => value,
            _ => return Filter::None,
        };
        let path = path.to_string();
        match self {
            Self::Text => Filter::Contains(path, value),
            Self::Exact => match value {
                FilterValue::String(s) => Filter::Equals(path, s.trim().into()),
                value => Filter::Equals(path, value),
            },
            Self::Threshold(Comparison::Eq) => Filter::Equals(path, value),
            Self::Threshold(Comparison::Gt) => Filter::Gt(path, value),
            Self::Threshold(Comparison::Gte) => Filter::Gte(path, value),
            Self::Threshold(Comparison::Lt) => Filter::Lt(path, value),
            Self::Threshold(Comparison::Lte) => Filter::Lte(path, value),
        }
    }
}

/// One optional search dimension of a criteria struct `C`.
pub struct Criterion<C> {
    /// Public parameter name.
    pub name: &'static str,
    /// Attribute path on the record (or on the related record).
    pub path: &'static str,
    /// Matching strategy.
    pub strategy: Strategy,
    /// Join the predicate is evaluated through, if any.
    pub relation: Option<Relation>,
    /// Reads the criterion value out of the criteria struct.
    pub value: fn(&C) -> Option<FilterValue>,
}

impl<C> Criterion<C> {
    /// Declare a criterion.
    pub const fn new(
        name: &'static str,
        path: &'static str,
        strategy: Strategy,
        value: fn(&C) -> Option<FilterValue>,
    ) -> Self {
        Self {
            name,
            path,
            strategy,
            relation: None,
            value,
        }
    }

    /// Case-insensitive substring criterion.
    pub const fn text(
        name: &'static str,
        path: &'static str,
        value: fn(&C) -> Option<FilterValue>,
    ) -> Self {
        Self::new(name, path, Strategy::Text, value)
    }

    /// Equality criterion.
    pub const fn exact(
        name: &'static str,
        path: &'static str,
        value: fn(&C) -> Option<FilterValue>,
    ) -> Self {
        Self::new(name, path, Strategy::Exact, value)
    }

    /// Ordered comparison criterion.
    pub const fn threshold(
        name: &'static str,
        path: &'static str,
        comparison: Comparison,
        value: fn(&C) -> Option<FilterValue>,
    ) -> Self {
        Self::new(name, path, Strategy::Threshold(comparison), value)
    }

    /// Evaluate this criterion through a relation: the predicate must hold
    /// for at least one related record.
    pub const fn through(self, relation: Relation) -> Self {
        Self {
            name: self.name,
            path: self.path,
            strategy: self.strategy,
            relation: Some(relation),
            value: self.value,
        }
    }

    /// The predicate this criterion contributes for `criteria`.
    pub fn predicate(&self, criteria: &C) -> Filter {
        let filter = self.strategy.apply(self.path, (self.value)(criteria));
        match self.relation {
            Some(relation) => Filter::some(relation, filter),
            None => filter,
        }
    }
}

impl<C> Clone for Criterion<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Criterion<C> {}

impl<C> std::fmt::Debug for Criterion<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Criterion")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("strategy", &self.strategy)
            .field("relation", &self.relation.map(|r| r.name))
            .finish()
    }
}

/// A criteria struct with its declared field table.
pub trait Criteria: Sized + 'static {
    /// Entity the criteria search.
    const ENTITY: &'static str;
    /// One entry per optional search field.
    const CRITERIA: &'static [Criterion<Self>];
}

/// Compose the criteria into one filter.
///
/// Never fails. With nothing set the result is [`Filter::None`]; with a
/// single field set it is that field's predicate alone.
pub fn compose<C: Criteria>(criteria: &C) -> Filter {
    compose_with(C::CRITERIA, criteria)
}

/// Compose against an explicit table instead of the declared one.
pub fn compose_with<C>(table: &[Criterion<C>], criteria: &C) -> Filter {
    let filter = Filter::and(table.iter().map(|c| c.predicate(criteria)));
    debug!(
        predicates = filter.predicate_count(),
        filter = ?filter,
        "composed search filter"
    );
    filter
}

/// Names of the criteria that are active (contribute a predicate).
pub fn active_criteria<C: Criteria>(criteria: &C) -> Vec<&'static str> {
    C::CRITERIA
        .iter()
        .filter(|c| !c.predicate(criteria).is_none())
        .map(|c| c.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Record;
    use pretty_assertions::assert_eq;

    const MODELS: Relation = Relation::new(
        "compatible_models",
        "appliance_models",
        "am",
        "am.id = parts.model_id",
    );

    #[derive(Default)]
    struct PartSearch {
        name: Option<String>,
        category: Option<String>,
        min_stock: Option<i64>,
        compatible_model: Option<String>,
    }

    impl Criteria for PartSearch {
        const ENTITY: &'static str = "Part";
        const CRITERIA: &'static [Criterion<Self>] = &[
            Criterion::text("name", "name", |c| c.name.as_deref().map(FilterValue::from)),
            Criterion::exact("category", "category", |c| {
                c.category.as_deref().map(FilterValue::from)
            }),
            Criterion::threshold("minStock", "stock", Comparison::Gte, |c| {
                c.min_stock.map(FilterValue::from)
            }),
            Criterion::text("compatibleModel", "model", |c: &Self| {
                c.compatible_model.as_deref().map(FilterValue::from)
            })
            .through(MODELS),
        ];
    }

    struct Part {
        name: &'static str,
        category: &'static str,
        stock: i64,
        models: Vec<&'static str>,
    }

    struct ModelName(&'static str);

    impl Record for ModelName {
        fn field(&self, path: &str) -> FilterValue {
            match path {
                "model" => self.0.into(),
                _ => FilterValue::Null,
            }
        }
    }

    // Related records are materialized on demand for the test fixture.
    struct PartWithModels {
        part: Part,
        models: Vec<ModelName>,
    }

    impl From<Part> for PartWithModels {
        fn from(part: Part) -> Self {
            let models = part.models.iter().map(|m| ModelName(*m)).collect();
            Self { part, models }
        }
    }

    impl Record for PartWithModels {
        fn field(&self, path: &str) -> FilterValue {
            match path {
                "name" => self.part.name.into(),
                "category" => self.part.category.into(),
                "stock" => self.part.stock.into(),
                _ => FilterValue::Null,
            }
        }

        fn related(&self, relation: &str) -> Vec<&dyn Record> {
            match relation {
                "compatible_models" => self.models.iter().map(|m| m as &dyn Record).collect(),
                _ => Vec::new(),
            }
        }
    }

    fn parts() -> Vec<PartWithModels> {
        vec![
            Part { name: "Drain Pump", category: "PUMP", stock: 3, models: vec!["X100", "X200"] },
            Part { name: "Door Seal", category: "SEAL", stock: 0, models: vec!["X100"] },
            Part { name: "Pump Filter", category: "FILTER", stock: 12, models: vec!["Z9"] },
        ]
        .into_iter()
        .map(PartWithModels::from)
        .collect()
    }

    fn select(filter: &Filter) -> Vec<&'static str> {
        parts()
            .iter()
            .filter(|p| filter.matches(*p))
            .map(|p| p.part.name)
            .collect()
    }

    #[test]
    fn test_all_absent_matches_everything() {
        let filter = compose(&PartSearch::default());
        assert_eq!(filter, Filter::None);
        assert_eq!(select(&filter).len(), 3);
    }

    #[test]
    fn test_blank_text_is_absent() {
        let search = PartSearch { name: Some("  ".to_string()), ..Default::default() };
        assert!(compose(&search).is_none());
    }

    #[test]
    fn test_single_field_is_that_predicate() {
        let search = PartSearch { category: Some("SEAL".to_string()), ..Default::default() };
        assert_eq!(
            compose(&search),
            Filter::Equals("category".to_string(), FilterValue::from("SEAL"))
        );
    }

    #[test]
    fn test_exact_text_is_trimmed() {
        let search = PartSearch { category: Some(" SEAL ".to_string()), ..Default::default() };
        let filter = compose(&search);
        assert_eq!(filter, Filter::Equals("category".to_string(), FilterValue::from("SEAL")));
        assert_eq!(select(&filter), vec!["Door Seal"]);
    }

    #[test]
    fn test_text_is_case_insensitive() {
        let search = PartSearch { name: Some("pUmP".to_string()), ..Default::default() };
        assert_eq!(select(&compose(&search)), vec!["Drain Pump", "Pump Filter"]);
    }

    #[test]
    fn test_threshold_boundary() {
        let search = PartSearch { min_stock: Some(3), ..Default::default() };
        assert_eq!(select(&compose(&search)), vec!["Drain Pump", "Pump Filter"]);
    }

    #[test]
    fn test_zero_threshold_is_a_real_value() {
        let search = PartSearch { min_stock: Some(0), ..Default::default() };
        assert_eq!(compose(&search).predicate_count(), 1);
    }

    #[test]
    fn test_relation_containment() {
        let search = PartSearch { compatible_model: Some("x100".to_string()), ..Default::default() };
        let filter = compose(&search);
        assert!(matches!(filter, Filter::Some(relation, _) if relation == MODELS));
        assert_eq!(select(&filter), vec!["Drain Pump", "Door Seal"]);
    }

    #[test]
    fn test_conjunction() {
        let search = PartSearch {
            name: Some("pump".to_string()),
            compatible_model: Some("X".to_string()),
            min_stock: Some(1),
            ..Default::default()
        };
        let filter = compose(&search);
        assert_eq!(filter.predicate_count(), 3);
        assert_eq!(select(&filter), vec!["Drain Pump"]);
    }

    #[test]
    fn test_table_order_does_not_change_results() {
        let search = PartSearch {
            name: Some("p".to_string()),
            min_stock: Some(1),
            compatible_model: Some("X".to_string()),
            ..Default::default()
        };
        let mut reversed = PartSearch::CRITERIA.to_vec();
        reversed.reverse();

        let forward = compose(&search);
        let backward = compose_with(&reversed, &search);
        assert_ne!(forward, backward);
        assert_eq!(select(&forward), select(&backward));
    }

    #[test]
    fn test_compose_is_idempotent() {
        let search = PartSearch { name: Some("seal".to_string()), ..Default::default() };
        assert_eq!(compose(&search), compose(&search));
    }

    #[test]
    fn test_active_criteria() {
        let search = PartSearch {
            name: Some("pump".to_string()),
            category: Some(String::new()),
            min_stock: Some(2),
            ..Default::default()
        };
        assert_eq!(active_criteria(&search), vec!["name", "minStock"]);
    }

    #[test]
    fn test_strategy_apply_none() {
        assert!(Strategy::Text.apply("name", None).is_none());
        assert!(Strategy::Exact.apply("name", Some(FilterValue::Null)).is_none());
        assert!(
            Strategy::Threshold(Comparison::Lte)
                .apply("stock", Some(FilterValue::Int(5)))
                .eq(&Filter::Lte("stock".to_string(), FilterValue::Int(5)))
        );
    }
}
