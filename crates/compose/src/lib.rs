//! The layout composer: a pure, deterministic transform from an
//! `InvoiceModel` to a layout tree.
//!
//! No I/O, no clocks, no randomness — composing the same model twice yields
//! structurally identical trees. Styling is declarative and attached to the
//! nodes as they are built; the only computed rule is the horizontal rule
//! emphasis in `rules`, a pure function of the table's shape.

mod blocks;
mod error;
mod palette;
mod rules;
mod table;

pub use error::ComposeError;
pub use rules::rule_above;

use invoicepress_doctree::Document;
use invoicepress_model::InvoiceModel;
use invoicepress_style::{Margins, PageLayout, PageSize};

/// Composes the full invoice document for one model.
///
/// Fails before building any node if the totals section cannot be
/// synthesized (empty subtotal/VAT/total display strings); missing
/// non-totals fields render as empty content instead.
pub fn compose(model: &InvoiceModel) -> Result<Document, ComposeError> {
    let totals = table::Totals::try_from_header(&model.header)?;

    Ok(Document {
        page: PageLayout {
            size: PageSize::A4,
            margins: Some(Margins {
                top: 30.0,
                right: 40.0,
                bottom: 20.0,
                left: 40.0,
            }),
        },
        content: vec![
            blocks::header_block(&model.header),
            blocks::info_block(&model.header),
            table::line_items_table(&model.line_items, &totals),
            blocks::payee_block(&model.payee),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoicepress_doctree::{BlockNode, InlineNode, TableCell, TableNode};
    use invoicepress_model::{InvoiceHeader, LineItem, PayeeInfo};

    fn model_with_items(count: usize) -> InvoiceModel {
        let line_items = (0..count)
            .map(|i| LineItem {
                description: format!("Item {i}"),
                quantity: (i + 1) as f64,
                rate: "50.00".into(),
                total: "50.00".into(),
            })
            .collect();
        InvoiceModel {
            header: InvoiceHeader {
                invoice_name: "#007".into(),
                invoice_date: "03/01/2024".into(),
                project: "Website refresh".into(),
                project_code: "WR-12".into(),
                description: "Design and build".into(),
                client_contact: "accounts@client.example".into(),
                subtotal: "100.00".into(),
                vat: "20.00".into(),
                total: "120.00".into(),
            },
            line_items,
            payee: PayeeInfo {
                address: "1 High Street".into(),
                contact_name: "J. Unwin".into(),
                contact_email: "josh@example.com".into(),
                contact_number: "07000 000000".into(),
                payee_name: "Josh Unwin".into(),
                account_number: "12345678".into(),
                sort_code: "01-02-03".into(),
                vat_number: "GB123456789".into(),
            },
        }
    }

    fn items_table(doc: &Document) -> &TableNode {
        match &doc.content[2] {
            BlockNode::Table(table) => table,
            other => panic!("expected line-items table, got {}", other.kind()),
        }
    }

    fn inline_text(nodes: &[InlineNode]) -> String {
        let mut out = String::new();
        for node in nodes {
            match node {
                InlineNode::Text(s) => out.push_str(s),
                InlineNode::Styled { children, .. } => out.push_str(&inline_text(children)),
                InlineNode::LineBreak => out.push('\n'),
            }
        }
        out
    }

    fn cell_text(cell: &TableCell) -> String {
        cell.content
            .iter()
            .map(|block| match block {
                BlockNode::Paragraph { children, .. } => inline_text(children),
                _ => String::new(),
            })
            .collect()
    }

    #[test]
    fn table_has_header_items_and_three_totals_rows() {
        for n in [0usize, 1, 2, 7] {
            let doc = compose(&model_with_items(n)).unwrap();
            assert_eq!(items_table(&doc).rows.len(), n + 1 + 3, "n = {n}");
        }
    }

    #[test]
    fn quantity_renders_with_x_suffix() {
        let doc = compose(&model_with_items(4)).unwrap();
        let table = items_table(&doc);
        // Row 4 is the fourth line item, quantity 4.
        assert_eq!(cell_text(&table.rows[4].cells[2]), "4x");
    }

    #[test]
    fn totals_rows_read_in_accounting_order() {
        let doc = compose(&model_with_items(2)).unwrap();
        let table = items_table(&doc);
        let rows = &table.rows;
        let n = rows.len();

        let subtotal_row = &rows[n - 3];
        assert_eq!(cell_text(&subtotal_row.cells[0]), "Sub Total");
        assert_eq!(cell_text(subtotal_row.cells.last().unwrap()), "100.00");

        let vat_row = &rows[n - 2];
        assert_eq!(cell_text(&vat_row.cells[0]), "VAT (20%)");
        assert_eq!(cell_text(vat_row.cells.last().unwrap()), "20.00");

        let total_row = &rows[n - 1];
        assert_eq!(cell_text(&total_row.cells[1]), "Total");
        assert_eq!(cell_text(total_row.cells.last().unwrap()), "120.00");
    }

    #[test]
    fn every_row_spans_the_full_grid() {
        let doc = compose(&model_with_items(3)).unwrap();
        let table = items_table(&doc);
        for row in &table.rows {
            assert_eq!(row.span_width(), table.column_count());
        }
    }

    #[test]
    fn thick_rule_sits_above_the_total_row_only() {
        for n in [0usize, 2, 5] {
            let doc = compose(&model_with_items(n)).unwrap();
            let table = items_table(&doc);
            let last = table.rows.len() - 1;
            for (index, row) in table.rows.iter().enumerate() {
                let top = row.cells[0].style.border_top.as_ref();
                if index == 0 {
                    assert!(top.is_none(), "outer edge must carry no rule");
                } else if index == last {
                    assert_eq!(top.unwrap().width, 3.0, "n = {n}");
                } else {
                    assert_eq!(top.unwrap().width, 1.0, "n = {n}, row {index}");
                }
            }
        }
    }

    #[test]
    fn composing_twice_is_structurally_identical() {
        let model = model_with_items(3);
        assert_eq!(compose(&model).unwrap(), compose(&model).unwrap());
    }

    #[test]
    fn empty_subtotal_refuses_composition() {
        let mut model = model_with_items(1);
        model.header.subtotal = "  ".into();
        assert!(matches!(
            compose(&model),
            Err(ComposeError::MissingTotalValue("subtotal"))
        ));
    }

    #[test]
    fn payee_block_is_absolutely_positioned() {
        let doc = compose(&model_with_items(1)).unwrap();
        match &doc.content[3] {
            BlockNode::Positioned { origin, .. } => {
                assert_eq!((origin.x, origin.y), (40.0, 710.0));
            }
            other => panic!("expected positioned footer, got {}", other.kind()),
        }
    }
}
