//! The record fetch adapter: read-only access to the upstream structured
//! record store.
//!
//! The aggregator only sees the `RecordStore` trait; the concrete `CodaStore`
//! speaks the store's row API over HTTP. Each read returns a flat mapping of
//! opaque field key to value — interpretation of those keys belongs to the
//! model crate's fixed mapping tables.

mod coda;
mod error;
mod refs;

pub use coda::{CodaStore, StoreConfig};
pub use error::StoreError;
pub use refs::parse_line_item_refs;

use async_trait::async_trait;
use invoicepress_model::{LineItemRef, RawRecord};

/// Read operations against the upstream record store.
///
/// Retries, timeouts, and transport concerns live behind this boundary; the
/// caller treats every failure as "data unavailable".
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The invoice header row, with display-formatted values.
    async fn get_header(&self, invoice_row_id: &str) -> Result<RawRecord, StoreError>;

    /// The header's ordered line-item reference list. Resolved from the
    /// rich-format view of the same row, so it is a separate read.
    async fn get_line_item_refs(
        &self,
        invoice_row_id: &str,
    ) -> Result<Vec<LineItemRef>, StoreError>;

    /// One line-item row, addressed by its table/row reference pair.
    async fn get_line_item(&self, table_id: &str, row_id: &str)
    -> Result<RawRecord, StoreError>;

    /// The singleton payee-info row.
    async fn get_payee_info(&self) -> Result<RawRecord, StoreError>;
}
