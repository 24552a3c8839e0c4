use crate::format::{display_number, format_date_time, format_price};
use crate::model::{Order, Payment, Settings};
use crate::normalize::{normalize_item, NormalizedItem};
use crate::settings::{configured_number, configured_text, ResolvedSettings};

/// Number of copies every receipt document carries.
pub const COPIES_PER_DOCUMENT: u32 = 2;

const DEFAULT_PAYMENT_METHOD: &str = "cash";

/// One self-contained receipt copy (an HTML fragment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCopy {
    pub copy_number: u32,
    pub html: String,
}

impl RenderedCopy {
    pub fn as_str(&self) -> &str {
        &self.html
    }
}

pub(crate) fn esc(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn row(label: &str, value: &str) -> String {
    format!("<div class=\"row\"><span>{label}</span><span>{value}</span></div>")
}

/// First character upper-cased, the rest untouched (`dine-in` → `Dine-in`).
pub fn order_type_label(order_type: &str) -> String {
    let mut chars = order_type.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `credit_card` → `CREDIT CARD`; missing methods show as cash.
pub fn payment_method_label(method: Option<&str>) -> String {
    configured_text(method)
        .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string())
        .to_uppercase()
        .replace('_', " ")
}

fn item_rows(body: &mut String, item: &NormalizedItem, currency: &str) {
    let variant = item
        .variant
        .as_deref()
        .map(|variant| format!(" ({})", esc(variant)))
        .unwrap_or_default();
    body.push_str(&format!(
        "<tr><td class=\"qty\">{}x</td><td class=\"name\">{}{}</td><td class=\"price\">{}</td></tr>",
        display_number(item.quantity),
        esc(&item.name),
        variant,
        esc(&format_price(item.line_total(), currency))
    ));
    if let Some(notes) = item.notes.as_deref() {
        body.push_str(&format!(
            "<tr><td></td><td colspan=\"2\" class=\"note\">Note: {}</td></tr>",
            esc(notes)
        ));
    }
}

fn payment_row(payment: &Payment, currency: &str) -> String {
    let amount = configured_number(payment.amount).unwrap_or(0.0);
    let tip = payment
        .tip
        .filter(|tip| *tip > 0.0)
        .map(|tip| format!(" (+{} tip)", esc(&format_price(tip, currency))))
        .unwrap_or_default();
    row(
        &esc(&payment_method_label(payment.method.as_deref())),
        &format!("{}{}", esc(&format_price(amount, currency)), tip),
    )
}

fn payments_block(payments: &[Payment], currency: &str) -> String {
    if payments.is_empty() {
        return String::new();
    }
    let mut block = String::from("<div class=\"section-title\">Payment</div>");
    for payment in payments {
        block.push_str(&payment_row(payment, currency));
    }
    block.push_str("<div class=\"dashed-line\"></div>");
    block
}

fn amount(value: Option<f64>) -> f64 {
    configured_number(value).unwrap_or(0.0)
}

/// Render one copy of the receipt for `order`.
///
/// `settings` may be absent; every merchant field then uses the shop default.
/// Malformed item data is normalized, never rejected.
pub fn render_copy(
    order: &Order,
    settings: Option<&Settings>,
    currency: &str,
    copy_number: u32,
) -> RenderedCopy {
    let shop = ResolvedSettings::resolve(settings);
    let money = |value: f64| esc(&format_price(value, currency));

    let mut body = String::from("<div class=\"receipt-copy\">");
    body.push_str(&format!(
        "<div class=\"copy-label\">Copy {copy_number} of {COPIES_PER_DOCUMENT}</div>"
    ));

    body.push_str("<div class=\"header\">");
    body.push_str(&format!(
        "<div class=\"cafe-name\">{}</div>",
        esc(&shop.cafe_name)
    ));
    if let Some(address) = shop.cafe_address.as_deref() {
        body.push_str(&format!("<div class=\"cafe-info\">{}</div>", esc(address)));
    }
    if let Some(phone) = shop.cafe_phone.as_deref() {
        body.push_str(&format!("<div class=\"cafe-info\">Tel: {}</div>", esc(phone)));
    }
    body.push_str("</div><div class=\"dashed-line\"></div>");

    body.push_str("<div class=\"order-info\">");
    body.push_str(&row("Order #:", &esc(&order.order_number)));
    body.push_str(&row("Date:", &esc(&format_date_time(&order.created_at))));
    if let Some(table) = configured_text(order.table_name.as_deref()) {
        body.push_str(&row("Table:", &esc(&table)));
    }
    body.push_str(&row("Type:", &esc(&order_type_label(&order.order_type))));
    if let Some(cashier) = configured_text(order.cashier_name.as_deref()) {
        body.push_str(&row("Cashier:", &esc(&cashier)));
    }
    body.push_str("</div><div class=\"dashed-line\"></div>");

    body.push_str(
        "<div class=\"section-title\">Items</div><table class=\"items-table\"><tbody>",
    );
    for item in &order.items {
        item_rows(&mut body, &normalize_item(item), currency);
    }
    body.push_str("</tbody></table><div class=\"dashed-line\"></div>");

    body.push_str("<div class=\"totals\">");
    body.push_str(&row("Subtotal:", &money(amount(order.subtotal))));
    body.push_str(&row(
        &format!("Tax ({}%):", display_number(shop.tax_percentage)),
        &money(amount(order.tax_amount)),
    ));
    body.push_str("</div><div class=\"dashed-line\"></div>");

    body.push_str("<div class=\"grand-total\">");
    body.push_str(&row("TOTAL:", &money(amount(order.total))));
    body.push_str("</div><div class=\"dashed-line\"></div>");

    body.push_str(&payments_block(&order.payments, currency));

    body.push_str(&format!(
        "<div class=\"footer\"><div>{}</div></div>",
        esc(&shop.receipt_footer)
    ));
    body.push_str("</div>");

    RenderedCopy {
        copy_number,
        html: body,
    }
}
