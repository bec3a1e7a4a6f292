//! Shop entities and their search criteria.
//!
//! Each entity implements [`Record`](repairdesk_query::Record) so composed
//! filters can be evaluated against it, and declares a criteria struct whose
//! [`Criteria`](repairdesk_query::Criteria) table lists its search fields.

/// Declare a closed set of SCREAMING_SNAKE_CASE tokens.
///
/// Generates serde support, `as_str`, `Display`, a case-insensitive
/// `FromStr` rejecting unknown tokens with `InvalidParameter`, and a
/// conversion into `FilterValue`. Deserialization goes through `FromStr`,
/// so query strings and JSON bodies accept the same spellings.
macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $field:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $token:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $token)]
                $variant
            ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The wire token.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = repairdesk_query::QueryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let token = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(token))
                    .ok_or_else(|| {
                        repairdesk_query::QueryError::invalid_input(
                            $field,
                            format!("unknown value `{}`", s),
                        )
                    })
            }
        }

        impl TryFrom<String> for $name {
            type Error = repairdesk_query::QueryError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for repairdesk_query::FilterValue {
            fn from(value: $name) -> Self {
                repairdesk_query::FilterValue::String(value.as_str().to_string())
            }
        }
    };
}

/// Deserialize an optional typed criterion, treating blank input as absent.
///
/// Query strings deliver every value as text and JSON may deliver numbers;
/// both are parsed with the target's `FromStr`. Non-blank tokens that fail to
/// parse are still errors.
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    let raw = match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) => text,
        Some(Raw::Integer(n)) => n.to_string(),
        Some(Raw::Float(n)) => n.to_string(),
        None => return Ok(None),
    };
    let token = raw.trim();
    if token.is_empty() {
        return Ok(None);
    }
    token.parse().map(Some).map_err(serde::de::Error::custom)
}

pub mod appliance;
pub mod client;
pub mod inventory;
pub mod order;

pub use appliance::{ApplianceKind, ApplianceModel, ApplianceModelCriteria};
pub use client::{Client, ClientCriteria};
pub use inventory::{InventoryItem, InventoryItemCriteria, PartCategory};
pub use order::{OrderStatus, RepairOrder, RepairOrderCriteria};
