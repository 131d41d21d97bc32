//! The internal invoice model: typed, named fields assembled from the
//! upstream record store's opaque column keys.
//!
//! The model is built once by the aggregator and consumed once by the
//! composer. Monetary and date fields are opaque display strings from
//! upstream; the issue date is the only field that gets a format transform.

pub mod date;
pub mod error;
pub mod fields;
mod invoice;
mod payee;

pub use error::ModelError;
pub use invoice::{InvoiceHeader, LineItem, LineItemRef};
pub use payee::PayeeInfo;

use std::collections::HashMap;

/// A raw upstream record: a flat mapping of opaque field key to value.
pub type RawRecord = HashMap<String, serde_json::Value>;

/// The aggregate consumed by the composer: one header, the line items in
/// reference-list order, and the payee record.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceModel {
    pub header: InvoiceHeader,
    pub line_items: Vec<LineItem>,
    pub payee: PayeeInfo,
}
