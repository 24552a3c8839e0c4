//! Line-item field normalization.
//!
//! Receipts must print even when an order carries corrupted items, so every
//! rule here falls back to a safe default instead of failing.

use serde_json::Value;

use crate::format::display_number;
use crate::model::LineItem;

pub const DEFAULT_ITEM_NAME: &str = "Item";
pub const DEFAULT_QUANTITY: f64 = 1.0;
pub const DEFAULT_UNIT_PRICE: f64 = 0.0;

/// A line item with every display field populated.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedItem {
    pub name: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub variant: Option<String>,
    pub notes: Option<String>,
}

impl NormalizedItem {
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity
    }
}

pub fn normalize_item(item: &LineItem) -> NormalizedItem {
    NormalizedItem {
        name: item_name(item),
        quantity: item_quantity(item),
        unit_price: item_price(item),
        variant: json_text(item.variant.as_ref()),
        notes: json_text(item.notes.as_ref()),
    }
}

pub fn item_name(item: &LineItem) -> String {
    json_text(item.product_name.as_ref()).unwrap_or_else(|| DEFAULT_ITEM_NAME.to_string())
}

/// Quantity must be a real JSON number above zero. Numeric strings do not count.
pub fn item_quantity(item: &LineItem) -> f64 {
    json_number(item.quantity.as_ref())
        .filter(|quantity| *quantity > 0.0)
        .unwrap_or(DEFAULT_QUANTITY)
}

/// Unit price must be a real JSON number. Negative prices pass through.
pub fn item_price(item: &LineItem) -> f64 {
    json_number(item.price.as_ref()).unwrap_or(DEFAULT_UNIT_PRICE)
}

fn json_number(value: Option<&Value>) -> Option<f64> {
    value
        .filter(|value| value.is_number())
        .and_then(Value::as_f64)
        .filter(|number| !number.is_nan())
}

/// Non-empty strings, and numbers other than zero, shown as text.
fn json_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => number
            .as_f64()
            .filter(|number| *number != 0.0 && !number.is_nan())
            .map(display_number),
        _ => None,
    }
}
