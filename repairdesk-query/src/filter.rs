//! Filter types for building WHERE clauses and evaluating them against records.
//!
//! A [`Filter`] is storage-agnostic: the same value can be rendered to a
//! parameterized SQL fragment with [`Filter::to_sql`] or checked against an
//! in-memory [`Record`] with [`Filter::matches`].

use std::cmp::Ordering;
use std::fmt::Write;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use uuid::Uuid;

use crate::traits::Record;

/// A filter value that can be used in comparisons.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Exact decimal value (prices, costs).
    Decimal(Decimal),
    /// String value.
    String(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Point in time.
    Timestamp(DateTime<Utc>),
}

impl FilterValue {
    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this value carries no filtering intent.
    ///
    /// Null and blank strings are absent; everything else is a real value.
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Compare two values.
    ///
    /// Numeric kinds compare across `Int`, `Float` and `Decimal`, and dates
    /// compare against timestamps by calendar day. Any other pairing of
    /// different kinds is incomparable and yields `None`.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Self::Decimal(a), Self::Decimal(b)) => Some(a.cmp(b)),
            (Self::Decimal(a), Self::Int(b)) => Some(a.cmp(&Decimal::from(*b))),
            (Self::Int(a), Self::Decimal(b)) => Some(Decimal::from(*a).cmp(b)),
            (Self::Decimal(a), Self::Float(b)) => Decimal::from_f64(*b).map(|b| a.cmp(&b)),
            (Self::Float(a), Self::Decimal(b)) => Decimal::from_f64(*a).map(|a| a.cmp(b)),
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            (Self::Timestamp(a), Self::Date(b)) => Some(a.date_naive().cmp(b)),
            (Self::Date(a), Self::Timestamp(b)) => Some(a.cmp(&b.date_naive())),
            _ => None,
        }
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Decimal> for FilterValue {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Uuid> for FilterValue {
    fn from(v: Uuid) -> Self {
        Self::String(v.to_string())
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

/// A join from one record to a collection of related records.
///
/// `name` addresses the relation in memory (see [`Record::related`]); the
/// remaining fields describe the same join for SQL rendering, where the
/// nested predicate's columns are qualified with `alias`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    /// Relation name on the owning record.
    pub name: &'static str,
    /// Table (or join expression) holding the related rows.
    pub table: &'static str,
    /// Alias of `table` inside the subquery.
    pub alias: &'static str,
    /// Correlation condition tying related rows to the outer row.
    pub on: &'static str,
}

impl Relation {
    /// Declare a relation.
    pub const fn new(
        name: &'static str,
        table: &'static str,
        alias: &'static str,
        on: &'static str,
    ) -> Self {
        Self {
            name,
            table,
            alias,
            on,
        }
    }
}

/// A complete filter that can be converted to SQL or evaluated in memory.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// No filter (always true).
    None,

    /// Equals comparison.
    Equals(String, FilterValue),

    /// Less than comparison.
    Lt(String, FilterValue),
    /// Less than or equal comparison.
    Lte(String, FilterValue),
    /// Greater than comparison.
    Gt(String, FilterValue),
    /// Greater than or equal comparison.
    Gte(String, FilterValue),

    /// Case-insensitive substring containment.
    Contains(String, FilterValue),

    /// At least one related record satisfies the nested filter.
    Some(Relation, Box<Filter>),

    /// Logical AND of multiple filters.
    And(Vec<Filter>),
}

impl Filter {
    /// Create an empty filter (matches everything).
    pub fn none() -> Self {
        Self::None
    }

    /// Check if this filter is empty.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Create an AND filter.
    ///
    /// Empty operands are dropped, so a conjunction of nothing is
    /// [`Filter::None`] and a conjunction of one filter is that filter.
    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        let mut filters: Vec<_> = filters.into_iter().filter(|f| !f.is_none()).collect();
        match filters.len() {
            0 => Self::None,
            1 => filters.swap_remove(0),
            _ => Self::And(filters),
        }
    }

    /// Create a relation filter. An empty nested filter stays empty.
    pub fn some(relation: Relation, filter: Filter) -> Self {
        if filter.is_none() {
            return Self::None;
        }
        Self::Some(relation, Box::new(filter))
    }

    /// Combine with another filter using AND.
    pub fn and_then(self, other: Filter) -> Self {
        if self.is_none() {
            return other;
        }
        if other.is_none() {
            return self;
        }
        match self {
            Self::And(mut filters) => {
                filters.push(other);
                Self::And(filters)
            }
            _ => Self::And(vec![self, other]),
        }
    }

    /// Number of leaf predicates in this filter.
    pub fn predicate_count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Some(_, inner) => inner.predicate_count(),
            Self::And(filters) => filters.iter().map(Self::predicate_count).sum(),
            _ => 1,
        }
    }

    /// Evaluate this filter against a record.
    ///
    /// Comparisons against a null or incomparable field never match.
    pub fn matches(&self, record: &dyn Record) -> bool {
        match self {
            Self::None => true,
            Self::Equals(col, val) => {
                let field = record.field(col);
                if val.is_null() {
                    field.is_null()
                } else {
                    field.compare(val) == Some(Ordering::Equal)
                }
            }
            Self::Lt(col, val) => record.field(col).compare(val) == Some(Ordering::Less),
            Self::Lte(col, val) => matches!(
                record.field(col).compare(val),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Self::Gt(col, val) => record.field(col).compare(val) == Some(Ordering::Greater),
            Self::Gte(col, val) => matches!(
                record.field(col).compare(val),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Self::Contains(col, val) => match (record.field(col), val) {
                (FilterValue::String(haystack), FilterValue::String(needle)) => {
                    haystack.to_lowercase().contains(&needle.to_lowercase())
                }
                _ => false,
            },
            Self::Some(relation, inner) => record
                .related(relation.name)
                .into_iter()
                .any(|related| inner.matches(related)),
            Self::And(filters) => filters.iter().all(|f| f.matches(record)),
        }
    }

    /// Generate SQL for this filter with parameter placeholders.
    /// Returns (sql, params) where params are the values to bind.
    ///
    /// Placeholders are numbered from `param_offset + 1` in the order the
    /// params vector is filled.
    pub fn to_sql(&self, param_offset: usize) -> (String, Vec<FilterValue>) {
        let mut sql = String::new();
        let mut params = Vec::new();
        self.write_sql(&mut sql, None, param_offset, &mut params);
        (sql, params)
    }

    fn write_sql(
        &self,
        sql: &mut String,
        alias: Option<&str>,
        param_offset: usize,
        params: &mut Vec<FilterValue>,
    ) {
        match self {
            Self::None => sql.push_str("TRUE"),

            Self::Equals(col, val) if val.is_null() => {
                write_column(sql, alias, col);
                sql.push_str(" IS NULL");
            }
            Self::Equals(col, val) => write_comparison(sql, alias, col, "=", val, param_offset, params),

            Self::Lt(col, val) => write_comparison(sql, alias, col, "<", val, param_offset, params),
            Self::Lte(col, val) => write_comparison(sql, alias, col, "<=", val, param_offset, params),
            Self::Gt(col, val) => write_comparison(sql, alias, col, ">", val, param_offset, params),
            Self::Gte(col, val) => write_comparison(sql, alias, col, ">=", val, param_offset, params),

            Self::Contains(col, val) => {
                let pattern = match val {
                    FilterValue::String(s) => FilterValue::String(format!("%{}%", escape_like(s))),
                    other => other.clone(),
                };
                params.push(pattern);
                sql.push_str("LOWER(");
                write_column(sql, alias, col);
                let _ = write!(
                    sql,
                    ") LIKE LOWER(${}) ESCAPE '\\'",
                    param_offset + params.len()
                );
            }

            Self::Some(relation, inner) => {
                let _ = write!(
                    sql,
                    "EXISTS (SELECT 1 FROM {} {} WHERE {} AND ",
                    relation.table, relation.alias, relation.on
                );
                inner.write_sql(sql, Some(relation.alias), param_offset, params);
                sql.push(')');
            }

            Self::And(filters) => {
                if filters.is_empty() {
                    sql.push_str("TRUE");
                    return;
                }
                sql.push('(');
                for (i, filter) in filters.iter().enumerate() {
                    if i > 0 {
                        sql.push_str(" AND ");
                    }
                    filter.write_sql(sql, alias, param_offset, params);
                }
                sql.push(')');
            }
        }
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::None
    }
}

fn write_column(sql: &mut String, alias: Option<&str>, col: &str) {
    if let Some(alias) = alias {
        sql.push_str(alias);
        sql.push('.');
    }
    sql.push_str(col);
}

fn write_comparison(
    sql: &mut String,
    alias: Option<&str>,
    col: &str,
    op: &str,
    val: &FilterValue,
    param_offset: usize,
    params: &mut Vec<FilterValue>,
) {
    params.push(val.clone());
    write_column(sql, alias, col);
    let _ = write!(sql, " {} ${}", op, param_offset + params.len());
}

/// Escape LIKE wildcards so user text matches literally.
fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Part {
        name: &'static str,
        stock: i64,
        models: Vec<ApplianceRow>,
    }

    struct ApplianceRow {
        model: &'static str,
    }

    impl Record for ApplianceRow {
        fn field(&self, path: &str) -> FilterValue {
            match path {
                "model" => self.model.into(),
                _ => FilterValue::Null,
            }
        }
    }

    impl Record for Part {
        fn field(&self, path: &str) -> FilterValue {
            match path {
                "name" => self.name.into(),
                "stock" => self.stock.into(),
                _ => FilterValue::Null,
            }
        }

        fn related(&self, relation: &str) -> Vec<&dyn Record> {
            match relation {
                "models" => self.models.iter().map(|m| m as &dyn Record).collect(),
                _ => Vec::new(),
            }
        }
    }

    const MODELS: Relation = Relation::new(
        "models",
        "appliance_models",
        "am",
        "am.part_id = parts.id",
    );

    fn belt() -> Part {
        Part {
            name: "Drive Belt",
            stock: 4,
            models: vec![
                ApplianceRow { model: "WX100" },
                ApplianceRow { model: "WX200" },
            ],
        }
    }

    #[test]
    fn test_filter_value_from() {
        assert_eq!(FilterValue::from(42i32), FilterValue::Int(42));
        assert_eq!(FilterValue::from("hello"), FilterValue::String("hello".to_string()));
        assert_eq!(FilterValue::from(true), FilterValue::Bool(true));
        assert_eq!(FilterValue::from(None::<i64>), FilterValue::Null);
    }

    #[test]
    fn test_absent_values() {
        assert!(FilterValue::Null.is_absent());
        assert!(FilterValue::from("   ").is_absent());
        assert!(!FilterValue::from("x").is_absent());
        assert!(!FilterValue::Int(0).is_absent());
    }

    #[test]
    fn test_compare_across_numeric_kinds() {
        let price = FilterValue::Decimal(Decimal::new(1999, 2));
        assert_eq!(price.compare(&FilterValue::Int(20)), Some(Ordering::Less));
        let twenty = FilterValue::Decimal(Decimal::new(2000, 2));
        assert_eq!(FilterValue::Float(20.0).compare(&twenty), Some(Ordering::Equal));
        assert_eq!(FilterValue::Int(3).compare(&FilterValue::from("3")), None);
    }

    #[test]
    fn test_and_drops_empty_operands() {
        assert_eq!(Filter::and([Filter::None, Filter::None]), Filter::None);

        let only = Filter::Gte("stock".to_string(), FilterValue::Int(1));
        assert_eq!(Filter::and([Filter::None, only.clone()]), only);
    }

    #[test]
    fn test_and_then() {
        let f = Filter::None
            .and_then(Filter::Equals("name".to_string(), "Belt".into()))
            .and_then(Filter::Gt("stock".to_string(), FilterValue::Int(0)));
        assert_eq!(f.predicate_count(), 2);
    }

    #[test]
    fn test_some_with_empty_inner_is_empty() {
        assert!(Filter::some(MODELS, Filter::None).is_none());
    }

    #[test]
    fn test_matches_contains_ignores_case() {
        let f = Filter::Contains("name".to_string(), "BELT".into());
        assert!(f.matches(&belt()));

        let f = Filter::Contains("name".to_string(), "pump".into());
        assert!(!f.matches(&belt()));
    }

    #[test]
    fn test_matches_thresholds() {
        let part = belt();
        assert!(Filter::Gte("stock".to_string(), FilterValue::Int(4)).matches(&part));
        assert!(!Filter::Gt("stock".to_string(), FilterValue::Int(4)).matches(&part));
        assert!(Filter::Lte("stock".to_string(), FilterValue::Int(4)).matches(&part));
        assert!(!Filter::Lt("stock".to_string(), FilterValue::Int(4)).matches(&part));
    }

    #[test]
    fn test_null_field_never_matches_comparison() {
        let f = Filter::Gte("missing".to_string(), FilterValue::Int(0));
        assert!(!f.matches(&belt()));
    }

    #[test]
    fn test_matches_relation() {
        let f = Filter::some(MODELS, Filter::Contains("model".to_string(), "x100".into()));
        assert!(f.matches(&belt()));

        let f = Filter::some(MODELS, Filter::Contains("model".to_string(), "Z9".into()));
        assert!(!f.matches(&belt()));
    }

    #[test]
    fn test_filter_equals_sql() {
        let filter = Filter::Equals("email".to_string(), "test@example.com".into());
        let (sql, params) = filter.to_sql(0);
        assert_eq!(sql, "email = $1");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_filter_equals_null_sql() {
        let filter = Filter::Equals("deleted_at".to_string(), FilterValue::Null);
        let (sql, params) = filter.to_sql(0);
        assert_eq!(sql, "deleted_at IS NULL");
        assert!(params.is_empty());
    }

    #[test]
    fn test_filter_contains_sql() {
        let filter = Filter::Contains("name".to_string(), "50%_off".into());
        let (sql, params) = filter.to_sql(0);
        assert_eq!(sql, r"LOWER(name) LIKE LOWER($1) ESCAPE '\'");
        assert_eq!(params, vec![FilterValue::String(r"%50\%\_off%".to_string())]);
    }

    #[test]
    fn test_filter_and_sql_numbers_placeholders() {
        let filter = Filter::and([
            Filter::Gte("stock".to_string(), FilterValue::Int(2)),
            Filter::Lte("price".to_string(), FilterValue::Int(50)),
            Filter::Equals("category".to_string(), "BELT".into()),
        ]);
        let (sql, params) = filter.to_sql(0);
        assert_eq!(sql, "(stock >= $1 AND price <= $2 AND category = $3)");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_filter_sql_with_offset() {
        let filter = Filter::Gt("stock".to_string(), FilterValue::Int(0));
        let (sql, _) = filter.to_sql(3);
        assert_eq!(sql, "stock > $4");
    }

    #[test]
    fn test_filter_relation_sql() {
        let filter = Filter::and([
            Filter::Gte("stock".to_string(), FilterValue::Int(1)),
            Filter::some(MODELS, Filter::Contains("model".to_string(), "X100".into())),
        ]);
        let (sql, params) = filter.to_sql(0);
        assert_eq!(
            sql,
            r"(stock >= $1 AND EXISTS (SELECT 1 FROM appliance_models am WHERE am.part_id = parts.id AND LOWER(am.model) LIKE LOWER($2) ESCAPE '\'))"
        );
        assert_eq!(params[1], FilterValue::String("%X100%".to_string()));
    }

    #[test]
    fn test_empty_filter_sql() {
        assert_eq!(Filter::None.to_sql(0).0, "TRUE");
    }
}
