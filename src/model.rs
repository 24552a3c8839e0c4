//! Order snapshot types consumed by the receipt renderer.
//!
//! These mirror the camelCase JSON produced by the order-management side.
//! Loading never fails on a badly typed field: text slots accept strings and
//! numbers, number slots accept numbers only, and anything else reads as
//! absent. Item text and numbers stay raw until [`crate::normalize`] sees
//! them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, deserialize_with = "lenient_string")]
    pub order_number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub order_type: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub table_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cashier_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub items: Vec<LineItem>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub payments: Vec<Payment>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub subtotal: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub tax_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total: Option<f64>,
}

/// One purchased product entry, as stored on the order.
///
/// Every field is kept as raw JSON because older orders carry numbers,
/// strings, nulls or nothing at all in any of these slots.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub product_name: Option<Value>,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub variant: Option<Value>,
    #[serde(default)]
    pub notes: Option<Value>,
}

impl LineItem {
    pub fn new(product_name: &str, quantity: f64, price: f64) -> Self {
        Self {
            product_name: Some(Value::from(product_name)),
            quantity: Some(Value::from(quantity)),
            price: Some(Value::from(price)),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default, deserialize_with = "lenient_text")]
    pub method: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub tip: Option<f64>,
}

/// Merchant configuration. Every field falls back to a default when absent,
/// empty or zero; see [`crate::settings::ResolvedSettings`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, deserialize_with = "lenient_text")]
    pub cafe_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cafe_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cafe_phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub tax_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub receipt_footer: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub currency: Option<String>,
}

/// Strings as-is, numbers in their plain form, anything else absent.
pub(crate) fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_from_value(&value))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

/// Arrays load entry by entry; an unreadable entry becomes a default one and
/// a non-array reads as empty.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        _ => return Ok(Vec::new()),
    };
    Ok(entries
        .into_iter()
        .map(|entry| serde_json::from_value(entry).unwrap_or_default())
        .collect())
}
