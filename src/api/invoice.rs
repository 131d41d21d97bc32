use crate::error::{Result, ServiceError};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct InvoiceParams {
    /// Row id of the invoice in the record store.
    pub row: Option<String>,
}

/// Fetches, composes and renders one invoice, returned as `application/pdf`.
pub async fn get_invoice(
    State(state): State<AppState>,
    Query(params): Query<InvoiceParams>,
) -> Result<impl IntoResponse> {
    let row_id = params
        .row
        .filter(|r| !r.is_empty())
        .ok_or_else(|| ServiceError::InvalidRequest("missing 'row' query parameter".into()))?;

    tracing::info!("Invoice request for row '{}'", row_id);

    // Bound concurrent renders; waiting here is fine, failing is not.
    let _permit = state
        .render_semaphore
        .acquire()
        .await
        .map_err(|_| ServiceError::ServiceOverloaded)?;

    let deadline = Duration::from_millis(state.config.limits.aggregate_deadline_ms);
    let model =
        invoicepress_aggregate::build_model_with_deadline(state.store.as_ref(), &row_id, deadline)
            .await?;

    let document = invoicepress_compose::compose(&model)?;
    let pdf_bytes = invoicepress_render::collect_pdf(state.engine.as_ref(), &document).await?;

    tracing::info!(
        "Invoice '{}' rendered for row '{}' ({} bytes)",
        model.header.invoice_name,
        row_id,
        pdf_bytes.len()
    );

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/pdf")],
        pdf_bytes,
    ))
}
