use crate::fields::{self, header, line_item};
use crate::{date, ModelError, RawRecord};

/// The invoice header record, with the issue date already reformatted for
/// display. Monetary fields stay as the opaque display strings upstream
/// produced; no arithmetic is ever performed on them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InvoiceHeader {
    pub invoice_name: String,
    /// Display form, `DD/MM/YYYY`.
    pub invoice_date: String,
    pub project: String,
    pub project_code: String,
    pub description: String,
    /// The "FAO" line on the document: who at the client this is for.
    pub client_contact: String,
    pub subtotal: String,
    pub vat: String,
    pub total: String,
}

impl InvoiceHeader {
    pub fn from_fields(record: &RawRecord) -> Result<Self, ModelError> {
        Ok(Self {
            invoice_name: fields::require_string(record, "header", header::INVOICE_NAME)?,
            invoice_date: date::to_display(&fields::require_string(
                record,
                "header",
                header::INVOICE_DATE,
            )?)?,
            project: fields::require_string(record, "header", header::PROJECT)?,
            project_code: fields::require_string(record, "header", header::PROJECT_CODE)?,
            description: fields::require_string(record, "header", header::DESCRIPTION)?,
            client_contact: fields::require_string(record, "header", header::CLIENT_CONTACT)?,
            subtotal: fields::require_string(record, "header", header::SUBTOTAL)?,
            vat: fields::require_string(record, "header", header::VAT)?,
            total: fields::require_string(record, "header", header::TOTAL)?,
        })
    }
}

/// One invoiced line. Order within the model is the order of the header's
/// reference list and is significant.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub rate: String,
    pub total: String,
}

impl LineItem {
    pub fn from_fields(record: &RawRecord) -> Result<Self, ModelError> {
        Ok(Self {
            description: fields::require_string(record, "line item", line_item::DESCRIPTION)?,
            quantity: fields::require_number(record, "line item", line_item::QUANTITY)?,
            rate: fields::require_string(record, "line item", line_item::RATE)?,
            total: fields::require_string(record, "line item", line_item::TOTAL)?,
        })
    }

    /// The quantity as rendered in the table: `4` becomes `4x`, fractional
    /// quantities keep their fraction.
    pub fn quantity_label(&self) -> String {
        if self.quantity.fract() == 0.0 {
            format!("{}x", self.quantity as i64)
        } else {
            format!("{}x", self.quantity)
        }
    }
}

/// A reference to one line-item row: the table it lives in plus its row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemRef {
    pub table_id: String,
    pub row_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn header_record() -> RawRecord {
        [
            (header::INVOICE_NAME, json!("#007")),
            (header::INVOICE_DATE, json!("2024-01-03T00:00:00.000Z")),
            (header::PROJECT, json!("Website refresh")),
            (header::PROJECT_CODE, json!("WR-12")),
            (header::DESCRIPTION, json!("Design and build")),
            (header::CLIENT_CONTACT, json!("accounts@client.example")),
            (header::SUBTOTAL, json!("100.00")),
            (header::VAT, json!("20.00")),
            (header::TOTAL, json!("120.00")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    #[test]
    fn header_maps_and_reformats_date() {
        let h = InvoiceHeader::from_fields(&header_record()).unwrap();
        assert_eq!(h.invoice_name, "#007");
        assert_eq!(h.invoice_date, "03/01/2024");
        assert_eq!(h.subtotal, "100.00");
    }

    #[test]
    fn header_missing_key_fails() {
        let mut rec = header_record();
        rec.remove(header::TOTAL);
        assert!(InvoiceHeader::from_fields(&rec).is_err());
    }

    #[test]
    fn quantity_label_drops_trailing_zero() {
        let item = LineItem {
            description: "Day rate".into(),
            quantity: 4.0,
            rate: "350.00".into(),
            total: "1400.00".into(),
        };
        assert_eq!(item.quantity_label(), "4x");
    }

    #[test]
    fn quantity_label_keeps_fraction() {
        let item = LineItem {
            description: "Half day".into(),
            quantity: 0.5,
            rate: "350.00".into(),
            total: "175.00".into(),
        };
        assert_eq!(item.quantity_label(), "0.5x");
    }
}
