//! Merchant settings resolution.
//!
//! A setting counts as configured only when it is non-empty (strings) or
//! non-zero (numbers); anything else falls back to the shop default.

use crate::format::DEFAULT_CURRENCY;
use crate::model::Settings;

pub const DEFAULT_CAFE_NAME: &str = "Desi Beats Cafe";
pub const DEFAULT_TAX_PERCENTAGE: f64 = 16.0;
pub const DEFAULT_RECEIPT_FOOTER: &str = "Thank you for your visit!";

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub cafe_name: String,
    pub cafe_address: Option<String>,
    pub cafe_phone: Option<String>,
    pub tax_percentage: f64,
    pub receipt_footer: String,
}

impl Default for ResolvedSettings {
    fn default() -> Self {
        Self {
            cafe_name: DEFAULT_CAFE_NAME.to_string(),
            cafe_address: None,
            cafe_phone: None,
            tax_percentage: DEFAULT_TAX_PERCENTAGE,
            receipt_footer: DEFAULT_RECEIPT_FOOTER.to_string(),
        }
    }
}

impl ResolvedSettings {
    pub fn resolve(settings: Option<&Settings>) -> Self {
        let Some(settings) = settings else {
            return Self::default();
        };
        Self {
            cafe_name: configured_text(settings.cafe_name.as_deref())
                .unwrap_or_else(|| DEFAULT_CAFE_NAME.to_string()),
            cafe_address: configured_text(settings.cafe_address.as_deref()),
            cafe_phone: configured_text(settings.cafe_phone.as_deref()),
            tax_percentage: configured_number(settings.tax_percentage)
                .unwrap_or(DEFAULT_TAX_PERCENTAGE),
            receipt_footer: configured_text(settings.receipt_footer.as_deref())
                .unwrap_or_else(|| DEFAULT_RECEIPT_FOOTER.to_string()),
        }
    }
}

/// Currency symbol for every amount on the document.
pub fn resolve_currency(settings: Option<&Settings>) -> String {
    settings
        .and_then(|settings| configured_text(settings.currency.as_deref()))
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
}

pub(crate) fn configured_text(value: Option<&str>) -> Option<String> {
    value.filter(|text| !text.is_empty()).map(str::to_string)
}

pub(crate) fn configured_number(value: Option<f64>) -> Option<f64> {
    value.filter(|number| *number != 0.0 && !number.is_nan())
}
