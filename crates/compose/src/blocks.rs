//! The non-table blocks of the invoice: branding header, project/client
//! info box, and the fixed-position payee footer.

use crate::palette::{BRAND_NAME, INFO_FILL, RULE_LIGHT};
use invoicepress_doctree::{
    BlockNode, ColumnDef, InlineNode, TableCell, TableNode, TableRow,
};
use invoicepress_model::{InvoiceHeader, PayeeInfo};
use invoicepress_style::{
    Border, ElementStyle, FontStyle, FontWeight, Margins, TextAlign,
};
use invoicepress_types::Point;

/// Branding on the left, invoice name and issue date right-aligned.
pub(crate) fn header_block(header: &InvoiceHeader) -> BlockNode {
    BlockNode::Columns {
        style: ElementStyle::default(),
        children: vec![
            BlockNode::Paragraph {
                style: ElementStyle {
                    font_size: Some(40.0),
                    font_weight: Some(FontWeight::Bold),
                    ..Default::default()
                },
                children: vec![InlineNode::Text(BRAND_NAME.to_string())],
            },
            BlockNode::Paragraph {
                style: ElementStyle {
                    text_align: Some(TextAlign::Right),
                    ..Default::default()
                },
                children: vec![
                    bold_run("INVOICE "),
                    InlineNode::Text(header.invoice_name.clone()),
                    InlineNode::LineBreak,
                    bold_run("DATE "),
                    InlineNode::Text(header.invoice_date.clone()),
                ],
            },
        ],
    }
}

/// The shaded info box: a label/value mini-table for the project details
/// next to the free-text FAO line.
pub(crate) fn info_block(header: &InvoiceHeader) -> BlockNode {
    let details = TableNode {
        style: ElementStyle::default(),
        columns: vec![ColumnDef::fixed(70.0), ColumnDef::flex()],
        header_rows: 0,
        rows: vec![
            label_value_row("Project", &header.project),
            label_value_row("Reference", &header.project_code),
            label_value_row("Summary", &header.description),
        ],
    };

    let attention = BlockNode::Paragraph {
        style: ElementStyle::default(),
        children: vec![
            bold_run("FAO:"),
            InlineNode::LineBreak,
            InlineNode::Text(header.client_contact.clone()),
        ],
    };

    let box_cell = TableCell::new(vec![BlockNode::Columns {
        style: ElementStyle::default(),
        children: vec![BlockNode::Table(details), attention],
    }])
    .with_style(ElementStyle {
        background_color: Some(INFO_FILL),
        padding: Some(Margins::all(20.0)),
        ..Default::default()
    });

    BlockNode::Table(TableNode {
        style: ElementStyle {
            margin: Some(Margins::y(20.0)),
            ..Default::default()
        },
        columns: vec![ColumnDef::flex()],
        header_rows: 0,
        rows: vec![TableRow::new(vec![box_cell])],
    })
}

/// Three columns anchored near the page bottom: address, the nested
/// account-details mini-table, and contact info, plus a centered note.
pub(crate) fn payee_block(payee: &PayeeInfo) -> BlockNode {
    let account_details = TableNode {
        style: ElementStyle::default(),
        columns: vec![ColumnDef::fixed(52.0), ColumnDef::flex()],
        header_rows: 0,
        rows: vec![
            TableRow::new(vec![
                TableCell::new(vec![paragraph("To be made payable to:")]).spanning(2),
            ]),
            label_value_row("Name", &payee.payee_name),
            label_value_row("Acc Number", &payee.account_number),
            label_value_row("Sort Code", &payee.sort_code),
            label_value_row("VAT Number", &payee.vat_number),
        ],
    };

    let contact = BlockNode::Paragraph {
        style: ElementStyle::default(),
        children: vec![
            InlineNode::Text(payee.contact_name.clone()),
            InlineNode::LineBreak,
            InlineNode::Text(payee.contact_number.clone()),
            InlineNode::LineBreak,
            InlineNode::Text(payee.contact_email.clone()),
        ],
    };

    let note = TableCell::new(vec![BlockNode::Paragraph {
        style: ElementStyle {
            text_align: Some(TextAlign::Center),
            font_style: Some(FontStyle::Italic),
            ..Default::default()
        },
        children: vec![InlineNode::Text(
            "Please include invoice number on payment reference where possible.".to_string(),
        )],
    }])
    .spanning(3);

    let footer = TableNode {
        style: ElementStyle {
            font_size: Some(10.0),
            padding: Some(Margins::y(2.0)),
            ..Default::default()
        },
        columns: vec![ColumnDef::flex(), ColumnDef::flex(), ColumnDef::flex()],
        header_rows: 1,
        rows: vec![
            TableRow::new(vec![
                footer_heading("Address"),
                footer_heading("Account Details"),
                footer_heading("Contact"),
            ]),
            TableRow::new(vec![
                TableCell::new(vec![paragraph(&payee.address)]),
                TableCell::new(vec![BlockNode::Table(account_details)]),
                TableCell::new(vec![contact]),
            ]),
            TableRow::new(vec![note]),
        ],
    };

    BlockNode::Positioned {
        origin: Point::new(40.0, 710.0),
        child: Box::new(BlockNode::Table(footer)),
    }
}

fn paragraph(text: &str) -> BlockNode {
    BlockNode::Paragraph {
        style: ElementStyle::default(),
        children: vec![InlineNode::Text(text.to_string())],
    }
}

fn bold_run(text: &str) -> InlineNode {
    InlineNode::Styled {
        style: ElementStyle::bold(),
        children: vec![InlineNode::Text(text.to_string())],
    }
}

fn label_value_row(label: &str, value: &str) -> TableRow {
    TableRow::new(vec![
        TableCell::new(vec![paragraph(label)]).with_style(ElementStyle::bold()),
        TableCell::new(vec![paragraph(value)]),
    ])
}

fn footer_heading(label: &str) -> TableCell {
    TableCell::new(vec![paragraph(label)]).with_style(ElementStyle {
        font_weight: Some(FontWeight::Bold),
        border_bottom: Some(Border::solid(1.0, RULE_LIGHT)),
        ..Default::default()
    })
}
