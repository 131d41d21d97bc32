//! Single-pass painter: walks the layout tree and emits a one-page PDF.
//!
//! Metrics are approximate (average character widths for the built-in
//! Helvetica faces) and nothing wraps or paginates. The painter honors the
//! declarative styles the composer attached: fills, per-edge borders, text
//! alignment, fixed and flexible column widths, nested tables, and
//! absolutely positioned blocks.

use crate::RenderError;
use invoicepress_doctree::{BlockNode, Document, InlineNode, TableNode, TableRow};
use invoicepress_style::{
    Dimension, ElementStyle, FontStyle, FontWeight, Margins, TextAlign,
};
use invoicepress_types::Color;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document as PdfDocument, Object, Stream};

const LINE_SPACING: f32 = 1.3;
const DEFAULT_FONT_SIZE: f32 = 12.0;
const DEFAULT_CELL_PADDING: f32 = 2.0;
const DEFAULT_PAGE_MARGIN: f32 = 40.0;

/// Inherited text attributes, resolved top-down as the tree is walked.
#[derive(Clone)]
struct TextCtx {
    size: f32,
    weight: FontWeight,
    style: FontStyle,
    align: TextAlign,
    color: Color,
}

impl Default for TextCtx {
    fn default() -> Self {
        Self {
            size: DEFAULT_FONT_SIZE,
            weight: FontWeight::Regular,
            style: FontStyle::Normal,
            align: TextAlign::Left,
            color: Color::default(),
        }
    }
}

impl TextCtx {
    fn apply(&self, style: &ElementStyle) -> TextCtx {
        TextCtx {
            size: style.font_size.unwrap_or(self.size),
            weight: style
                .font_weight
                .clone()
                .unwrap_or_else(|| self.weight.clone()),
            style: style
                .font_style
                .clone()
                .unwrap_or_else(|| self.style.clone()),
            align: style
                .text_align
                .clone()
                .unwrap_or_else(|| self.align.clone()),
            color: style.color.unwrap_or(self.color),
        }
    }

    fn font_name(&self) -> &'static str {
        match (&self.weight, &self.style) {
            (FontWeight::Bold, FontStyle::Italic) => "F4",
            (FontWeight::Bold, FontStyle::Normal) => "F2",
            (FontWeight::Regular, FontStyle::Italic) => "F3",
            (FontWeight::Regular, FontStyle::Normal) => "F1",
        }
    }

    /// Average glyph advance as a fraction of the font size.
    fn char_factor(&self) -> f32 {
        if self.weight == FontWeight::Bold {
            0.56
        } else {
            0.52
        }
    }
}

struct Run {
    text: String,
    ctx: TextCtx,
}

impl Run {
    fn width(&self) -> f32 {
        self.text.chars().count() as f32 * self.ctx.size * self.ctx.char_factor()
    }
}

/// Accumulates content-stream operations; y runs downward from the page top
/// and is flipped into PDF space on emit.
struct Canvas {
    ops: Vec<Operation>,
    page_height: f32,
}

impl Canvas {
    fn flip(&self, y: f32) -> f32 {
        self.page_height - y
    }

    fn fill_rect(&mut self, x: f32, y_top: f32, w: f32, h: f32, color: Color) {
        self.ops.push(Operation::new(
            "rg",
            vec![
                (color.r as f32 / 255.0).into(),
                (color.g as f32 / 255.0).into(),
                (color.b as f32 / 255.0).into(),
            ],
        ));
        self.ops.push(Operation::new(
            "re",
            vec![
                x.into(),
                self.flip(y_top + h).into(),
                w.into(),
                h.into(),
            ],
        ));
        self.ops.push(Operation::new("f", vec![]));
    }

    fn hline(&mut self, x0: f32, x1: f32, y: f32, stroke_width: f32, color: Color) {
        self.ops.push(Operation::new(
            "RG",
            vec![
                (color.r as f32 / 255.0).into(),
                (color.g as f32 / 255.0).into(),
                (color.b as f32 / 255.0).into(),
            ],
        ));
        self.ops
            .push(Operation::new("w", vec![stroke_width.into()]));
        let py = self.flip(y);
        self.ops
            .push(Operation::new("m", vec![x0.into(), py.into()]));
        self.ops
            .push(Operation::new("l", vec![x1.into(), py.into()]));
        self.ops.push(Operation::new("S", vec![]));
    }

    fn text(&mut self, x: f32, baseline: f32, run: &Run) {
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![run.ctx.font_name().into(), run.ctx.size.into()],
        ));
        self.ops.push(Operation::new(
            "rg",
            vec![
                (run.ctx.color.r as f32 / 255.0).into(),
                (run.ctx.color.g as f32 / 255.0).into(),
                (run.ctx.color.b as f32 / 255.0).into(),
            ],
        ));
        self.ops.push(Operation::new(
            "Td",
            vec![x.into(), self.flip(baseline).into()],
        ));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_winansi(&run.text))],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }
}

/// Best-effort WinAnsi encoding: Latin-1 passes through, everything else
/// degrades to '?'.
fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) <= 0xFF { c as u8 } else { b'?' })
        .collect()
}

pub(crate) fn paint(doc: &Document) -> Result<Vec<u8>, RenderError> {
    let (page_w, page_h) = doc.page.size.dimensions_pt();
    let margins = doc
        .page
        .margins
        .unwrap_or_else(|| Margins::all(DEFAULT_PAGE_MARGIN));
    let mut canvas = Canvas {
        ops: Vec::new(),
        page_height: page_h,
    };
    let ctx = TextCtx::default();
    let content_width = page_w - margins.left - margins.right;

    let mut y = margins.top;
    for block in &doc.content {
        if let BlockNode::Positioned { origin, child } = block {
            let available = (page_w - origin.x - margins.right).max(0.0);
            draw_block(&mut canvas, child, origin.x, origin.y, available, &ctx);
        } else {
            y += draw_block(&mut canvas, block, margins.left, y, content_width, &ctx);
        }
    }

    build_pdf(canvas.ops, page_w, page_h)
}

// --- Measurement (must agree with drawing) ---

fn measure_block(block: &BlockNode, width: f32, ctx: &TextCtx) -> f32 {
    match block {
        BlockNode::Paragraph { style, children } => {
            let margin = style.margin.unwrap_or_default();
            margin.top + paragraph_height(children, &ctx.apply(style)) + margin.bottom
        }
        BlockNode::Block { style, children } => {
            let margin = style.margin.unwrap_or_default();
            let padding = style.padding.unwrap_or_default();
            let inner = width - margin.left - margin.right - padding.left - padding.right;
            let child_ctx = ctx.apply(style);
            let content: f32 = children
                .iter()
                .map(|c| measure_block(c, inner, &child_ctx))
                .sum();
            margin.top + padding.top + content + padding.bottom + margin.bottom
        }
        BlockNode::Columns { style, children } => {
            let margin = style.margin.unwrap_or_default();
            let child_ctx = ctx.apply(style);
            let col_w = if children.is_empty() {
                width
            } else {
                (width - margin.left - margin.right) / children.len() as f32
            };
            let tallest = children
                .iter()
                .map(|c| measure_block(c, col_w, &child_ctx))
                .fold(0.0, f32::max);
            margin.top + tallest + margin.bottom
        }
        BlockNode::Table(table) => {
            let margin = table.style.margin.unwrap_or_default();
            let inner_w = width - margin.left - margin.right;
            let tctx = ctx.apply(&table.style);
            let cols = column_widths(table, inner_w);
            let rows: f32 = table
                .rows
                .iter()
                .map(|row| row_height(table, row, &cols, &tctx))
                .sum();
            margin.top + rows + margin.bottom
        }
        // Absolutely positioned content takes no space in the flow.
        BlockNode::Positioned { .. } => 0.0,
    }
}

fn measure_blocks(blocks: &[BlockNode], width: f32, ctx: &TextCtx) -> f32 {
    blocks.iter().map(|b| measure_block(b, width, ctx)).sum()
}

fn paragraph_height(children: &[InlineNode], ctx: &TextCtx) -> f32 {
    lines_of(children, ctx)
        .iter()
        .map(|line| line_size(line, ctx) * LINE_SPACING)
        .sum()
}

fn line_size(line: &[Run], ctx: &TextCtx) -> f32 {
    line.iter()
        .map(|run| run.ctx.size)
        .fold(ctx.size, f32::max)
}

fn lines_of(children: &[InlineNode], ctx: &TextCtx) -> Vec<Vec<Run>> {
    let mut lines = vec![Vec::new()];
    flatten_inline(children, ctx, &mut lines);
    lines
}

fn flatten_inline(children: &[InlineNode], ctx: &TextCtx, lines: &mut Vec<Vec<Run>>) {
    for node in children {
        match node {
            InlineNode::Text(text) => {
                if let Some(line) = lines.last_mut() {
                    line.push(Run {
                        text: text.clone(),
                        ctx: ctx.clone(),
                    });
                }
            }
            InlineNode::Styled { style, children } => {
                flatten_inline(children, &ctx.apply(style), lines);
            }
            InlineNode::LineBreak => lines.push(Vec::new()),
        }
    }
}

// --- Drawing ---

fn draw_block(canvas: &mut Canvas, block: &BlockNode, x: f32, y: f32, width: f32, ctx: &TextCtx) -> f32 {
    match block {
        BlockNode::Paragraph { style, children } => {
            let margin = style.margin.unwrap_or_default();
            let inner_w = width - margin.left - margin.right;
            let used = draw_paragraph(
                canvas,
                children,
                x + margin.left,
                y + margin.top,
                inner_w,
                &ctx.apply(style),
            );
            margin.top + used + margin.bottom
        }
        BlockNode::Block { style, children } => {
            let margin = style.margin.unwrap_or_default();
            let padding = style.padding.unwrap_or_default();
            let inner_x = x + margin.left + padding.left;
            let inner_w = width - margin.left - margin.right - padding.left - padding.right;
            let child_ctx = ctx.apply(style);

            if let Some(bg) = style.background_color {
                let height = measure_block(block, width, ctx) - margin.top - margin.bottom;
                canvas.fill_rect(
                    x + margin.left,
                    y + margin.top,
                    width - margin.left - margin.right,
                    height,
                    bg,
                );
            }

            let mut cursor = y + margin.top + padding.top;
            for child in children {
                cursor += draw_block(canvas, child, inner_x, cursor, inner_w, &child_ctx);
            }
            cursor - y + padding.bottom + margin.bottom
        }
        BlockNode::Columns { style, children } => {
            let margin = style.margin.unwrap_or_default();
            let child_ctx = ctx.apply(style);
            if children.is_empty() {
                return margin.top + margin.bottom;
            }
            let col_w = (width - margin.left - margin.right) / children.len() as f32;
            let mut tallest = 0.0f32;
            for (i, child) in children.iter().enumerate() {
                let used = draw_block(
                    canvas,
                    child,
                    x + margin.left + i as f32 * col_w,
                    y + margin.top,
                    col_w,
                    &child_ctx,
                );
                tallest = tallest.max(used);
            }
            margin.top + tallest + margin.bottom
        }
        BlockNode::Table(table) => draw_table(canvas, table, x, y, width, ctx),
        BlockNode::Positioned { origin, child } => {
            draw_block(canvas, child, origin.x, origin.y, width, ctx);
            0.0
        }
    }
}

fn draw_blocks(canvas: &mut Canvas, blocks: &[BlockNode], x: f32, y: f32, width: f32, ctx: &TextCtx) -> f32 {
    let mut cursor = y;
    for block in blocks {
        cursor += draw_block(canvas, block, x, cursor, width, ctx);
    }
    cursor - y
}

fn draw_paragraph(canvas: &mut Canvas, children: &[InlineNode], x: f32, y: f32, width: f32, ctx: &TextCtx) -> f32 {
    let lines = lines_of(children, ctx);
    let mut cursor = y;
    for line in &lines {
        let size = line_size(line, ctx);
        let line_width: f32 = line.iter().map(Run::width).sum();
        let mut pen_x = match ctx.align {
            TextAlign::Left => x,
            TextAlign::Right => x + (width - line_width).max(0.0),
            TextAlign::Center => x + ((width - line_width) / 2.0).max(0.0),
        };
        let baseline = cursor + size;
        for run in line {
            if !run.text.is_empty() {
                canvas.text(pen_x, baseline, run);
            }
            pen_x += run.width();
        }
        cursor += size * LINE_SPACING;
    }
    cursor - y
}

fn column_widths(table: &TableNode, width: f32) -> Vec<f32> {
    let mut fixed_total = 0.0f32;
    let mut flex_count = 0usize;
    for col in &table.columns {
        match col.width {
            Dimension::Pt(v) => fixed_total += v,
            Dimension::Percent(p) => fixed_total += width * p / 100.0,
            Dimension::Auto => flex_count += 1,
        }
    }
    let share = if flex_count > 0 {
        ((width - fixed_total) / flex_count as f32).max(0.0)
    } else {
        0.0
    };
    table
        .columns
        .iter()
        .map(|col| match col.width {
            Dimension::Pt(v) => v,
            Dimension::Percent(p) => width * p / 100.0,
            Dimension::Auto => share,
        })
        .collect()
}

fn cell_span_width(cols: &[f32], col_index: usize, span: usize) -> f32 {
    cols.iter().skip(col_index).take(span.max(1)).sum()
}

fn cell_padding(table: &TableNode, cell_style: &ElementStyle) -> Margins {
    cell_style
        .padding
        .or(table.style.padding)
        .unwrap_or_else(|| Margins::all(DEFAULT_CELL_PADDING))
}

fn row_height(table: &TableNode, row: &TableRow, cols: &[f32], tctx: &TextCtx) -> f32 {
    let mut height = 0.0f32;
    let mut col_index = 0usize;
    for cell in &row.cells {
        let span = cell.col_span.max(1);
        let pad = cell_padding(table, &cell.style);
        let inner_w = cell_span_width(cols, col_index, span) - pad.left - pad.right;
        let content = measure_blocks(&cell.content, inner_w, &tctx.apply(&cell.style));
        height = height.max(pad.top + content + pad.bottom);
        col_index += span;
    }
    height
}

fn draw_table(canvas: &mut Canvas, table: &TableNode, x: f32, y: f32, width: f32, ctx: &TextCtx) -> f32 {
    let margin = table.style.margin.unwrap_or_default();
    let inner_w = width - margin.left - margin.right;
    let x0 = x + margin.left;
    let tctx = ctx.apply(&table.style);
    let cols = column_widths(table, inner_w);

    let mut cursor = y + margin.top;
    for row in &table.rows {
        let height = row_height(table, row, &cols, &tctx);
        let mut col_index = 0usize;
        let mut cx = x0;
        for cell in &row.cells {
            let span = cell.col_span.max(1);
            let cell_w = cell_span_width(&cols, col_index, span);
            let pad = cell_padding(table, &cell.style);

            if let Some(bg) = cell.style.background_color {
                canvas.fill_rect(cx, cursor, cell_w, height, bg);
            }
            if let Some(rule) = &cell.style.border_top {
                canvas.hline(cx, cx + cell_w, cursor, rule.width, rule.color);
            }
            if let Some(rule) = &cell.style.border_bottom {
                canvas.hline(cx, cx + cell_w, cursor + height, rule.width, rule.color);
            }

            draw_blocks(
                canvas,
                &cell.content,
                cx + pad.left,
                cursor + pad.top,
                cell_w - pad.left - pad.right,
                &tctx.apply(&cell.style),
            );

            cx += cell_w;
            col_index += span;
        }
        cursor += height;
    }
    (cursor - y) + margin.bottom
}

// --- PDF assembly ---

fn build_pdf(ops: Vec<Operation>, page_w: f32, page_h: f32) -> Result<Vec<u8>, RenderError> {
    let mut doc = PdfDocument::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for (name, base_font) in [
        ("F1", "Helvetica"),
        ("F2", "Helvetica-Bold"),
        ("F3", "Helvetica-Oblique"),
        ("F4", "Helvetica-BoldOblique"),
    ] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => base_font,
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(name, font_id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => Object::Dictionary(fonts) });

    let content = Content { operations: ops };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.0.into(), 0.0.into(), page_w.into(), page_h.into()],
        "Contents" => content_id,
        "Resources" => resources_id,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}
