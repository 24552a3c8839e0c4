//! Two-copy receipt document assembly.

use tracing::debug;

use crate::model::{Order, Settings};
use crate::receipt_renderer::{esc, render_copy, RenderedCopy, COPIES_PER_DOCUMENT};
use crate::settings::resolve_currency;

pub const CUT_MARKER: &str = "CUT HERE";

const RECEIPT_STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
@page { size: 80mm auto; margin: 0; }
body { font-family: 'Courier New', 'Consolas', monospace; font-size: 12px; line-height: 1.3; color: #000; background: #fff; width: 80mm; margin: 0 auto; padding: 0; -webkit-print-color-adjust: exact; print-color-adjust: exact; }
.receipt-copy { padding: 8px 5px; }
.copy-label { text-align: center; font-size: 10px; font-weight: bold; margin-bottom: 8px; padding: 2px; background: #f0f0f0; border: 1px solid #ccc; }
.header { text-align: center; margin-bottom: 8px; }
.cafe-name { font-size: 16px; font-weight: bold; margin-bottom: 4px; }
.cafe-info { font-size: 11px; color: #333; }
.dashed-line { border: none; border-top: 1px dashed #000; margin: 6px 0; }
.order-info { margin: 6px 0; }
.row { display: flex; justify-content: space-between; margin: 2px 0; }
.section-title { font-weight: bold; margin: 6px 0 4px 0; font-size: 12px; }
.items-table { width: 100%; border-collapse: collapse; }
.items-table td { padding: 2px 0; vertical-align: top; }
.items-table .qty { width: 25px; text-align: left; }
.items-table .name { text-align: left; }
.items-table .price { text-align: right; white-space: nowrap; }
.items-table .note { font-size: 10px; font-style: italic; color: #555; padding-left: 10px; }
.totals { margin: 6px 0; }
.grand-total { font-size: 14px; font-weight: bold; }
.footer { text-align: center; margin-top: 8px; font-size: 11px; }
.cut-line { margin: 15px 0; text-align: center; position: relative; }
.cut-line-dashes { border: none; border-top: 2px dashed #000; margin: 10px 0; }
.scissors-icon { display: inline-block; font-size: 16px; margin: 0 5px; }
.cut-text { font-size: 10px; color: #666; display: flex; align-items: center; justify-content: center; gap: 5px; }
@media print {
  body { width: 80mm; padding: 0; margin: 0; }
  .copy-label { background: #eee !important; -webkit-print-color-adjust: exact; print-color-adjust: exact; }
}
"#;

/// The finished printable artifact: both copies inside one HTML page.
#[derive(Debug, Clone)]
pub struct ReceiptDocument {
    pub title: String,
    pub copies: [RenderedCopy; 2],
    pub html: String,
}

impl ReceiptDocument {
    pub fn as_html(&self) -> &str {
        &self.html
    }
}

fn cut_separator() -> String {
    format!(
        "<div class=\"cut-line\"><div class=\"cut-text\">\
         <span class=\"scissors-icon\">&#9986;</span>\
         <span>- - - - - - - - - {CUT_MARKER} - - - - - - - - -</span>\
         <span class=\"scissors-icon\">&#9986;</span>\
         </div><div class=\"cut-line-dashes\"></div></div>"
    )
}

fn html_shell(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8"/>
<title>{}</title>
<style>{}</style>
</head>
<body>{}</body>
</html>"#,
        esc(title),
        RECEIPT_STYLE,
        body
    )
}

/// Build the print document for `order`.
///
/// The document always carries exactly two copies separated by one cut
/// marker. `copies` is accepted for callers that pass a configured count,
/// but it does not change the output.
pub fn assemble_document(
    order: &Order,
    settings: Option<&Settings>,
    copies: u32,
) -> ReceiptDocument {
    if copies != COPIES_PER_DOCUMENT {
        debug!(
            order_number = %order.order_number,
            requested = copies,
            "Receipt copy count is fixed at two; ignoring requested count"
        );
    }

    let currency = resolve_currency(settings);
    let first = render_copy(order, settings, &currency, 1);
    let second = render_copy(order, settings, &currency, 2);

    let title = format!("Receipt #{}", order.order_number);
    let body = format!("{}{}{}", first.as_str(), cut_separator(), second.as_str());
    let html = html_shell(&title, &body);

    ReceiptDocument {
        title,
        copies: [first, second],
        html,
    }
}
