//! The layout tree: the in-memory representation of a fully composed
//! document, handed whole to a rendering engine.
//!
//! The tree is purely data. Nodes carry their styling declaratively via
//! `ElementStyle` and hold no identity beyond their position in the tree.
//! Everything derives `PartialEq` so a composition can be compared
//! structurally against another run.

use invoicepress_style::{Dimension, ElementStyle, PageLayout};
use invoicepress_types::Point;

/// The root of a composed document: page geometry plus block content.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page: PageLayout,
    pub content: Vec<BlockNode>,
}

/// A block-level element in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockNode {
    /// A generic block container.
    Block {
        style: ElementStyle,
        children: Vec<BlockNode>,
    },
    /// A paragraph of inline content.
    Paragraph {
        style: ElementStyle,
        children: Vec<InlineNode>,
    },
    /// Side-by-side columns, one per child.
    Columns {
        style: ElementStyle,
        children: Vec<BlockNode>,
    },
    /// A table.
    Table(TableNode),
    /// A block anchored at an absolute page position (measured from the
    /// top-left corner) instead of flowing with the content.
    Positioned { origin: Point, child: Box<BlockNode> },
}

impl BlockNode {
    pub fn style(&self) -> Option<&ElementStyle> {
        match self {
            BlockNode::Block { style, .. } => Some(style),
            BlockNode::Paragraph { style, .. } => Some(style),
            BlockNode::Columns { style, .. } => Some(style),
            BlockNode::Table(table) => Some(&table.style),
            BlockNode::Positioned { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            BlockNode::Block { .. } => "block",
            BlockNode::Paragraph { .. } => "paragraph",
            BlockNode::Columns { .. } => "columns",
            BlockNode::Table(_) => "table",
            BlockNode::Positioned { .. } => "positioned",
        }
    }
}

/// An inline-level element within a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineNode {
    /// A run of plain text.
    Text(String),
    /// A styled run.
    Styled {
        style: ElementStyle,
        children: Vec<InlineNode>,
    },
    /// A hard line break within the paragraph.
    LineBreak,
}

// --- Table structures ---

#[derive(Debug, Clone, PartialEq)]
pub struct TableNode {
    pub style: ElementStyle,
    pub columns: Vec<ColumnDef>,
    /// Leading rows treated as the table header.
    pub header_rows: usize,
    pub rows: Vec<TableRow>,
}

impl TableNode {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnDef {
    /// `Dimension::Pt` is a fixed width; `Dimension::Auto` shares the
    /// remaining table width with the other flexible columns.
    pub width: Dimension,
}

impl ColumnDef {
    pub fn fixed(points: f32) -> Self {
        Self {
            width: Dimension::Pt(points),
        }
    }

    pub fn flex() -> Self {
        Self {
            width: Dimension::Auto,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Number of grid columns this row's cells cover, spans included.
    pub fn span_width(&self) -> usize {
        self.cells.iter().map(|c| c.col_span).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub style: ElementStyle,
    pub col_span: usize,
    pub content: Vec<BlockNode>,
}

impl Default for TableCell {
    fn default() -> Self {
        Self {
            style: ElementStyle::default(),
            col_span: 1,
            content: Vec::new(),
        }
    }
}

impl TableCell {
    pub fn new(content: Vec<BlockNode>) -> Self {
        Self {
            content,
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = style;
        self
    }

    pub fn spanning(mut self, cols: usize) -> Self {
        self.col_span = cols;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_span_width_counts_spans() {
        let row = TableRow::new(vec![
            TableCell::default().spanning(3),
            TableCell::default(),
        ]);
        assert_eq!(row.span_width(), 4);
    }

    #[test]
    fn default_cell_spans_one_column() {
        assert_eq!(TableCell::default().col_span, 1);
    }
}
