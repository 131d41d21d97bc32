//! The invoice model aggregator.
//!
//! Resolves the three upstream record sets — header, ordered line items,
//! payee info — concurrently and joins them into one `InvoiceModel`. The
//! aggregation is all-or-nothing: any failed resolution aborts the whole
//! build with an error naming the failed part.

mod error;

pub use error::{AggregateError, Part};

use futures::future::try_join_all;
use invoicepress_model::{InvoiceHeader, InvoiceModel, LineItem, PayeeInfo};
use invoicepress_store::RecordStore;
use std::time::Duration;

/// Builds the invoice model for one invoice identifier.
///
/// The header, line-item set, and payee record resolve concurrently; within
/// the line-item set every row fetch fans out concurrently and the results
/// join positionally, so the output sequence always matches the header's
/// reference-list order regardless of network completion order.
pub async fn build_model(
    store: &dyn RecordStore,
    invoice_id: &str,
) -> Result<InvoiceModel, AggregateError> {
    let header_fut = async {
        store
            .get_header(invoice_id)
            .await
            .map_err(AggregateError::unavailable(Part::Header))
    };
    let items_fut = resolve_line_items(store, invoice_id);
    let payee_fut = async {
        store
            .get_payee_info()
            .await
            .map_err(AggregateError::unavailable(Part::Payee))
    };

    let (header_raw, line_items, payee_raw) =
        tokio::try_join!(header_fut, items_fut, payee_fut)?;

    let header = InvoiceHeader::from_fields(&header_raw)?;
    let payee = PayeeInfo::from_fields(&payee_raw)?;

    log::debug!(
        "aggregated invoice '{}' with {} line items",
        header.invoice_name,
        line_items.len()
    );

    Ok(InvoiceModel {
        header,
        line_items,
        payee,
    })
}

/// `build_model` under a caller-supplied deadline. If the deadline expires
/// before all three resolutions complete, the build aborts with
/// `DeadlineExceeded` — never a partial model.
pub async fn build_model_with_deadline(
    store: &dyn RecordStore,
    invoice_id: &str,
    deadline: Duration,
) -> Result<InvoiceModel, AggregateError> {
    match tokio::time::timeout(deadline, build_model(store, invoice_id)).await {
        Ok(result) => result,
        Err(_) => Err(AggregateError::DeadlineExceeded),
    }
}

async fn resolve_line_items(
    store: &dyn RecordStore,
    invoice_id: &str,
) -> Result<Vec<LineItem>, AggregateError> {
    // The reference list comes from the rich view of the header row, so a
    // failure here counts against the header resolution.
    let refs = store
        .get_line_item_refs(invoice_id)
        .await
        .map_err(AggregateError::unavailable(Part::Header))?;

    let fetches = refs.into_iter().enumerate().map(|(index, item_ref)| {
        async move {
            let raw = store
                .get_line_item(&item_ref.table_id, &item_ref.row_id)
                .await
                .map_err(AggregateError::unavailable(Part::LineItem(index)))?;
            LineItem::from_fields(&raw).map_err(AggregateError::from)
        }
    });

    // try_join_all yields results in input order, which is what corrects the
    // sequence against out-of-order completion.
    try_join_all(fetches).await
}
