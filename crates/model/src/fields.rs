//! The fixed correspondence between upstream column identifiers and model
//! fields.
//!
//! Field keys are opaque identifiers assigned by the record store; the
//! mapping is a hard-coded table, never inferred. A key missing from a
//! fetched record is a `ModelError::MissingField`, not an empty cell in the
//! rendered document.

use crate::{ModelError, RawRecord};
use serde_json::Value;

/// Column ids on the invoice header row.
pub mod header {
    pub const INVOICE_NAME: &str = "c-JlGsEx_iDw";
    pub const INVOICE_DATE: &str = "c-SjcwnH9IeL";
    pub const SUBTOTAL: &str = "c-fJIV0aQVpk";
    pub const VAT: &str = "c-fWNVW_8fI9";
    pub const TOTAL: &str = "c-pAZr2nAHAH";
    pub const PROJECT: &str = "c-baog3ln3TV";
    pub const CLIENT_CONTACT: &str = "c-pnVZrEc79t";
    pub const DESCRIPTION: &str = "c-m0YYVpia4p";
    pub const PROJECT_CODE: &str = "c-wOi0A9rzXo";
    /// The rich-format reference list linking the header to its line items.
    pub const LINE_ITEMS: &str = "c-wDErSNUHhH";
}

/// Column ids on a line-item row.
pub mod line_item {
    pub const DESCRIPTION: &str = "c-lON9r7KWCY";
    pub const QUANTITY: &str = "c-d-Ap6Ai8tk";
    pub const RATE: &str = "c-_n8K74vQwz";
    pub const TOTAL: &str = "c-7BarwIK037";
}

/// Column ids on the singleton payee-info row.
pub mod payee {
    pub const ADDRESS: &str = "c-HgbqeaSnVS";
    pub const CONTACT_NAME: &str = "c-W_GP1tCFwr";
    pub const CONTACT_EMAIL: &str = "c-kM6ojhPnXo";
    pub const CONTACT_NUMBER: &str = "c-t1CJ3DyQrq";
    pub const PAYEE_NAME: &str = "c-JMVThJUSFU";
    pub const ACCOUNT_NUMBER: &str = "c-KhjemaFGJS";
    pub const SORT_CODE: &str = "c-EKGH4k2Kap";
    pub const VAT_NUMBER: &str = "c-iFcVE5Azuv";
}

/// Renders an upstream value as its display string. Nulls collapse to the
/// empty string; numbers keep their JSON textual form.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        // Structured values (rich-format cells) have no display form here.
        _ => String::new(),
    }
}

/// Looks up a required key and renders it as a display string.
pub fn require_string(
    record: &RawRecord,
    record_name: &'static str,
    key: &'static str,
) -> Result<String, ModelError> {
    record
        .get(key)
        .map(display_string)
        .ok_or(ModelError::MissingField {
            record: record_name,
            key,
        })
}

/// Looks up a required numeric key, accepting either a JSON number or a
/// numeric string.
pub fn require_number(
    record: &RawRecord,
    record_name: &'static str,
    key: &'static str,
) -> Result<f64, ModelError> {
    let value = record.get(key).ok_or(ModelError::MissingField {
        record: record_name,
        key,
    })?;
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ModelError::BadQuantity(n.to_string())),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ModelError::BadQuantity(s.clone())),
        other => Err(ModelError::BadQuantity(other.to_string())),
    }
}
