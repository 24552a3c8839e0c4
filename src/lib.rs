//! Printable two-copy receipts for the cafe POS.
//!
//! An [`Order`] plus optional merchant [`Settings`] becomes one HTML
//! [`ReceiptDocument`] holding two receipt copies and a cut marker, which
//! [`print_receipt`] stages on a host rendering surface and sends to the
//! print dialog. [`signed_image`] resolves product image references into
//! short-lived display URLs.

pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod print;
pub mod receipt_renderer;
pub mod settings;
pub mod signed_image;
pub mod spool;

pub use config::{PrintConfig, SignedImageConfig};
pub use document::{assemble_document, ReceiptDocument};
pub use error::{ImageError, PrintError};
pub use format::{format_date_time, format_price};
pub use model::{LineItem, Order, Payment, Settings};
pub use normalize::{normalize_item, NormalizedItem};
pub use print::{print_receipt, PrintHost, PrintSurface};
pub use receipt_renderer::{render_copy, RenderedCopy};
pub use signed_image::{AuthToken, ImageSource, SignedImageClient};
pub use spool::{FileSpoolHost, Opener};
