//! HTTP implementation of `RecordStore` against a Coda-style row API.

use crate::{refs, RecordStore, StoreError};
use async_trait::async_trait;
use invoicepress_model::{LineItemRef, RawRecord};
use serde::Deserialize;

/// Explicit adapter configuration. Credentials arrive here from the service
/// configuration layer; the adapter itself never reads process environment.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// API root, e.g. `https://coda.io/apis/v1`.
    pub endpoint_base: String,
    /// Bearer token for the Authorization header.
    pub auth_token: String,
    /// The document holding all invoice tables.
    pub doc_id: String,
    /// The table holding invoice header rows.
    pub invoice_table_id: String,
    /// Table and row addressing the singleton payee record.
    pub payee_table_id: String,
    pub payee_row_id: String,
}

/// The row-API envelope: every row read returns its cells under `values`.
#[derive(Deserialize)]
struct RowEnvelope {
    values: RawRecord,
}

pub struct CodaStore {
    http: reqwest::Client,
    config: StoreConfig,
}

impl CodaStore {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config })
    }

    fn row_url(&self, table_id: &str, row_id: &str) -> String {
        format!(
            "{}/docs/{}/tables/{}/rows/{}",
            self.config.endpoint_base.trim_end_matches('/'),
            self.config.doc_id,
            table_id,
            row_id
        )
    }

    async fn fetch_row(&self, url: String) -> Result<RawRecord, StoreError> {
        log::debug!("fetching row {url}");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.auth_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let envelope: RowEnvelope = response.json().await?;
        Ok(envelope.values)
    }
}

#[async_trait]
impl RecordStore for CodaStore {
    async fn get_header(&self, invoice_row_id: &str) -> Result<RawRecord, StoreError> {
        self.fetch_row(self.row_url(&self.config.invoice_table_id, invoice_row_id))
            .await
    }

    async fn get_line_item_refs(
        &self,
        invoice_row_id: &str,
    ) -> Result<Vec<LineItemRef>, StoreError> {
        // The reference list only appears in the rich value format.
        let url = format!(
            "{}?valueFormat=rich",
            self.row_url(&self.config.invoice_table_id, invoice_row_id)
        );
        let record = self.fetch_row(url).await?;
        refs::parse_line_item_refs(&record)
    }

    async fn get_line_item(
        &self,
        table_id: &str,
        row_id: &str,
    ) -> Result<RawRecord, StoreError> {
        self.fetch_row(self.row_url(table_id, row_id)).await
    }

    async fn get_payee_info(&self) -> Result<RawRecord, StoreError> {
        self.fetch_row(self.row_url(&self.config.payee_table_id, &self.config.payee_row_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CodaStore {
        CodaStore::new(StoreConfig {
            endpoint_base: "https://coda.io/apis/v1/".into(),
            auth_token: "secret".into(),
            doc_id: "_vA8L1464t".into(),
            invoice_table_id: "grid-invoices".into(),
            payee_table_id: "grid-payee".into(),
            payee_row_id: "i-payee".into(),
        })
        .unwrap()
    }

    #[test]
    fn row_url_joins_without_double_slash() {
        assert_eq!(
            store().row_url("grid-invoices", "i-42"),
            "https://coda.io/apis/v1/docs/_vA8L1464t/tables/grid-invoices/rows/i-42"
        );
    }
}
