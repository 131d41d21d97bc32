//! The line-items table: header row, one row per item, and the synthesized
//! totals section.

use crate::rules;
use crate::ComposeError;
use invoicepress_doctree::{
    BlockNode, ColumnDef, InlineNode, TableCell, TableNode, TableRow,
};
use invoicepress_model::{InvoiceHeader, LineItem};
use invoicepress_style::{ElementStyle, Margins, TextAlign};

const HEADINGS: [&str; 4] = ["Description", "Rate", "Quantity", "Total"];

/// The three scalars of the totals section, validated before any row is
/// built.
pub(crate) struct Totals {
    subtotal: String,
    vat: String,
    total: String,
}

impl Totals {
    pub(crate) fn try_from_header(header: &InvoiceHeader) -> Result<Self, ComposeError> {
        let require = |value: &str, name: &'static str| {
            if value.trim().is_empty() {
                Err(ComposeError::MissingTotalValue(name))
            } else {
                Ok(value.to_string())
            }
        };
        Ok(Self {
            subtotal: require(&header.subtotal, "subtotal")?,
            vat: require(&header.vat, "VAT")?,
            total: require(&header.total, "total")?,
        })
    }
}

pub(crate) fn line_items_table(items: &[LineItem], totals: &Totals) -> BlockNode {
    let mut rows = Vec::with_capacity(items.len() + 4);

    rows.push(TableRow::new(
        HEADINGS
            .iter()
            .map(|heading| text_cell(heading).with_style(ElementStyle::bold()))
            .collect(),
    ));

    for item in items {
        rows.push(TableRow::new(vec![
            text_cell(&item.description),
            text_cell(&item.rate),
            text_cell(&item.quantity_label()),
            text_cell(&item.total),
        ]));
    }

    rows.push(TableRow::new(vec![
        label_cell("Sub Total").spanning(3),
        text_cell(&totals.subtotal),
    ]));
    rows.push(TableRow::new(vec![
        label_cell("VAT (20%)").spanning(3),
        text_cell(&totals.vat),
    ]));
    rows.push(TableRow::new(vec![
        TableCell::default(),
        label_cell("Total").spanning(2),
        text_cell(&totals.total),
    ]));

    // Rule emphasis depends on the final row count, so it is applied only
    // once every row exists.
    let total_rows = rows.len();
    for (index, row) in rows.iter_mut().enumerate() {
        if let Some(rule) = rules::rule_above(index, total_rows) {
            for cell in &mut row.cells {
                cell.style.border_top = Some(rule.clone());
            }
        }
    }

    BlockNode::Table(TableNode {
        style: ElementStyle {
            margin: Some(Margins::x(20.0)),
            padding: Some(Margins {
                top: 7.0,
                right: 5.0,
                bottom: 7.0,
                left: 5.0,
            }),
            ..Default::default()
        },
        columns: vec![
            ColumnDef::flex(),
            ColumnDef::fixed(80.0),
            ColumnDef::fixed(60.0),
            ColumnDef::fixed(80.0),
        ],
        header_rows: 1,
        rows,
    })
}

fn text_cell(text: &str) -> TableCell {
    TableCell::new(vec![BlockNode::Paragraph {
        style: ElementStyle::default(),
        children: vec![InlineNode::Text(text.to_string())],
    }])
}

/// A totals label: bold, pushed against the value column.
fn label_cell(text: &str) -> TableCell {
    text_cell(text).with_style(ElementStyle {
        font_weight: Some(invoicepress_style::FontWeight::Bold),
        text_align: Some(TextAlign::Right),
        ..Default::default()
    })
}
