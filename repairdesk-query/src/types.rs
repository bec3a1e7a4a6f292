//! Common types used in query building.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use crate::traits::Record;

/// Sort order for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9, oldest first).
    Asc,
    /// Descending order (Z-A, 9-0, newest first).
    Desc,
}

impl SortOrder {
    /// Get the SQL keyword for this sort order.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_sql())
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::Asc
    }
}

/// Order by specification for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByField {
    /// The column name to order by.
    pub column: Cow<'static, str>,
    /// The sort order.
    pub order: SortOrder,
}

impl OrderByField {
    /// Create a new order by field.
    pub fn new(column: impl Into<Cow<'static, str>>, order: SortOrder) -> Self {
        Self {
            column: column.into(),
            order,
        }
    }

    /// Create an ascending order.
    pub fn asc(column: impl Into<Cow<'static, str>>) -> Self {
        Self::new(column, SortOrder::Asc)
    }

    /// Create a descending order.
    pub fn desc(column: impl Into<Cow<'static, str>>) -> Self {
        Self::new(column, SortOrder::Desc)
    }

    /// Generate the SQL for this order by field.
    pub fn to_sql(&self) -> String {
        let mut sql = String::with_capacity(self.column.len() + 5);
        self.write_sql(&mut sql);
        sql
    }

    /// Write the SQL directly to a buffer.
    #[inline]
    pub fn write_sql(&self, buffer: &mut String) {
        buffer.push_str(&self.column);
        buffer.push(' ');
        buffer.push_str(self.order.as_sql());
    }

    /// Compare two records by this field.
    ///
    /// Nulls sort after every value in ascending order (and therefore first
    /// in descending order); incomparable values are treated as equal.
    pub fn compare(&self, a: &dyn Record, b: &dyn Record) -> Ordering {
        let left = a.field(&self.column);
        let right = b.field(&self.column);
        let ordering = match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => left.compare(&right).unwrap_or(Ordering::Equal),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterValue;

    struct Row(Option<i64>);

    impl Record for Row {
        fn field(&self, _path: &str) -> FilterValue {
            self.0.into()
        }
    }

    #[test]
    fn test_order_by_sql() {
        assert_eq!(OrderByField::desc("received_on").to_sql(), "received_on DESC");
        assert_eq!(OrderByField::asc("name").to_sql(), "name ASC");
    }

    #[test]
    fn test_compare_direction() {
        let asc = OrderByField::asc("n");
        let desc = OrderByField::desc("n");
        assert_eq!(asc.compare(&Row(Some(1)), &Row(Some(2))), Ordering::Less);
        assert_eq!(desc.compare(&Row(Some(1)), &Row(Some(2))), Ordering::Greater);
    }

    #[test]
    fn test_compare_nulls_last_ascending() {
        let asc = OrderByField::asc("n");
        assert_eq!(asc.compare(&Row(None), &Row(Some(2))), Ordering::Greater);
        assert_eq!(asc.compare(&Row(None), &Row(None)), Ordering::Equal);
    }
}
