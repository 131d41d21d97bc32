//! Extraction of the line-item reference list from a rich-format header row.

use crate::StoreError;
use invoicepress_model::fields::header;
use invoicepress_model::{LineItemRef, RawRecord};
use serde_json::Value;

/// Pulls the ordered `(table_id, row_id)` reference pairs out of a
/// rich-format header record. The list order is significant and is preserved
/// as-is.
pub fn parse_line_item_refs(record: &RawRecord) -> Result<Vec<LineItemRef>, StoreError> {
    let value = record.get(header::LINE_ITEMS).ok_or_else(|| {
        StoreError::UnexpectedShape(format!(
            "header row has no line-item column '{}'",
            header::LINE_ITEMS
        ))
    })?;

    let entries = value.as_array().ok_or_else(|| {
        StoreError::UnexpectedShape("line-item column is not a reference list".into())
    })?;

    entries.iter().map(parse_ref).collect()
}

fn parse_ref(entry: &Value) -> Result<LineItemRef, StoreError> {
    let table_id = entry
        .get("tableId")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::UnexpectedShape("reference entry lacks tableId".into()))?;
    let row_id = entry
        .get("rowId")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::UnexpectedShape("reference entry lacks rowId".into()))?;
    Ok(LineItemRef {
        table_id: table_id.to_string(),
        row_id: row_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rich_header(refs: Value) -> RawRecord {
        [(header::LINE_ITEMS.to_string(), refs)].into_iter().collect()
    }

    #[test]
    fn extracts_refs_in_list_order() {
        let record = rich_header(json!([
            { "tableId": "grid-items", "rowId": "i-2" },
            { "tableId": "grid-items", "rowId": "i-1" },
        ]));
        let refs = parse_line_item_refs(&record).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].row_id, "i-2");
        assert_eq!(refs[1].row_id, "i-1");
    }

    #[test]
    fn empty_list_is_valid() {
        let record = rich_header(json!([]));
        assert!(parse_line_item_refs(&record).unwrap().is_empty());
    }

    #[test]
    fn missing_column_is_a_shape_error() {
        let record = RawRecord::new();
        assert!(matches!(
            parse_line_item_refs(&record),
            Err(StoreError::UnexpectedShape(_))
        ));
    }

    #[test]
    fn malformed_entry_is_a_shape_error() {
        let record = rich_header(json!([{ "tableId": "grid-items" }]));
        assert!(parse_line_item_refs(&record).is_err());
    }
}
