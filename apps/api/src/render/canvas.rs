//! Page-aware drawing surface.
//!
//! `Canvas` accumulates drawing operations per page and knows the page
//! geometry, but nothing about the resume template. Vertical position is an
//! explicit `Cursor` value: every drawing call takes the cursor it starts at
//! and returns the cursor where it ended, so callers thread layout state
//! through their steps instead of sharing a mutable position.
//!
//! Pagination: before any line is emitted, the canvas checks whether its
//! bottom would pass the break threshold and, if so, opens a new page and
//! emits the line at the top margin. Multi-line text is checked line by line
//! and can therefore flow across a page break; a single line never splits.

use crate::layout::font_metrics::{get_metrics, FontStyle, PT_PER_MM};
use crate::layout::page::PageConfig;
use crate::layout::wrap::{flow_runs, wrap_text, Run};
use crate::render::RenderError;

/// Placeholder for the final page count, resolved in [`Canvas::finish`].
pub const PAGE_COUNT_ALIAS: &str = "{nb}";
/// Placeholder for the current page number in footer text.
pub const PAGE_NUMBER_TOKEN: &str = "{page}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontStyle,
    pub size_pt: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(font: FontStyle, size_pt: f32, color: Rgb) -> Self {
        Self {
            font,
            size_pt,
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A single drawing operation. Coordinates are millimetres from the top-left
/// corner of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        x_mm: f32,
        y_mm: f32,
        w_mm: f32,
        h_mm: f32,
        color: Rgb,
    },
    Text {
        x_mm: f32,
        baseline_mm: f32,
        style: TextStyle,
        text: String,
    },
    Rule {
        x1_mm: f32,
        x2_mm: f32,
        y_mm: f32,
        width_mm: f32,
        color: Rgb,
    },
    /// Clickable area opening `uri`.
    Link {
        x_mm: f32,
        y_mm: f32,
        w_mm: f32,
        h_mm: f32,
        uri: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

#[cfg(test)]
impl Page {
    /// All text drawn on this page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Explicit layout position: page index and distance from the page top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y_mm: f32,
}

impl Cursor {
    pub fn advance(self, dy_mm: f32) -> Self {
        Self {
            y_mm: self.y_mm + dy_mm,
            ..self
        }
    }

    pub fn at(self, y_mm: f32) -> Self {
        Self { y_mm, ..self }
    }
}

/// One cell of a horizontal row.
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    /// `None` extends the cell to the right margin.
    pub width_mm: Option<f32>,
    pub text: &'a str,
    pub style: TextStyle,
    pub align: Align,
    /// When set, the drawn text becomes a link to this URI.
    pub link: Option<&'a str>,
}

impl<'a> Cell<'a> {
    pub fn new(width_mm: Option<f32>, text: &'a str, style: TextStyle, align: Align) -> Self {
        Self {
            width_mm,
            text,
            style,
            align,
            link: None,
        }
    }

    pub fn with_link(mut self, uri: Option<&'a str>) -> Self {
        self.link = uri;
        self
    }
}

/// A styled piece of flowing text.
#[derive(Debug, Clone, Copy)]
pub struct FlowRun<'a> {
    pub font: FontStyle,
    pub color: Rgb,
    pub text: &'a str,
}

/// Footer drawn when a page is closed.
///
/// `text` may contain [`PAGE_NUMBER_TOKEN`] and [`PAGE_COUNT_ALIAS`].
#[derive(Debug, Clone)]
pub struct Footer {
    pub text: String,
    pub style: TextStyle,
    /// Distance from the page bottom to the top of the footer cell.
    pub offset_from_bottom_mm: f32,
    pub height_mm: f32,
}

pub struct Canvas {
    config: PageConfig,
    footer: Option<Footer>,
    pages: Vec<Page>,
    /// (page, op index) of every text op holding the page-count alias.
    alias_ops: Vec<(usize, usize)>,
}

impl Canvas {
    /// Opens a canvas with its first page. Returns the cursor at the top margin.
    pub fn new(config: PageConfig, footer: Option<Footer>) -> (Self, Cursor) {
        let cursor = Cursor {
            page: 0,
            y_mm: config.margin_top_mm,
        };
        let canvas = Self {
            config,
            footer,
            pages: vec![Page::default()],
            alias_ops: Vec::new(),
        };
        (canvas, cursor)
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Starts a new page if an element of `height_mm` would not fit below
    /// `cursor`. Returns the cursor the element should be drawn at.
    pub fn ensure_room(&mut self, cursor: Cursor, height_mm: f32) -> Result<Cursor, RenderError> {
        if cursor.y_mm + height_mm > self.config.break_threshold_mm() {
            self.add_page()
        } else {
            Ok(cursor)
        }
    }

    pub fn fill_rect(&mut self, page: usize, x_mm: f32, y_mm: f32, w_mm: f32, h_mm: f32, color: Rgb) {
        self.push(
            page,
            DrawOp::FillRect {
                x_mm,
                y_mm,
                w_mm,
                h_mm,
                color,
            },
        );
    }

    /// Draws a horizontal rule at the cursor without moving it.
    pub fn rule(&mut self, cursor: Cursor, x1_mm: f32, x2_mm: f32, width_mm: f32, color: Rgb) {
        self.push(
            cursor.page,
            DrawOp::Rule {
                x1_mm,
                x2_mm,
                y_mm: cursor.y_mm,
                width_mm,
                color,
            },
        );
    }

    /// Draws cells left to right from the left margin on one line of
    /// `height_mm`. Returns the cursor below the line.
    pub fn row(
        &mut self,
        cursor: Cursor,
        height_mm: f32,
        cells: &[Cell<'_>],
    ) -> Result<Cursor, RenderError> {
        let cursor = self.ensure_room(cursor, height_mm)?;
        let mut x = self.config.margin_left_mm;
        for cell in cells {
            let width = cell
                .width_mm
                .unwrap_or_else(|| self.config.right_edge_mm() - x);
            self.draw_cell(cursor, x, width, height_mm, cell);
            x += width;
        }
        Ok(cursor.advance(height_mm))
    }

    /// Draws `text` wrapped to the content width, one row per line.
    /// Returns the cursor below the last line.
    pub fn paragraph(
        &mut self,
        cursor: Cursor,
        line_height_mm: f32,
        text: &str,
        style: TextStyle,
        align: Align,
    ) -> Result<Cursor, RenderError> {
        let max_width = self.config.content_width_mm() - 2.0 * self.config.cell_padding_mm;
        let mut cursor = cursor;
        for line in wrap_text(text, style.font, style.size_pt, max_width) {
            cursor = self.row(cursor, line_height_mm, &[Cell::new(None, &line, style, align)])?;
        }
        Ok(cursor)
    }

    /// Draws differently styled runs as one flowing text starting at the left
    /// margin, wrapping back to it.
    ///
    /// Returns the cursor at the top of the last line, so the caller decides
    /// how far to advance past it.
    pub fn flow(
        &mut self,
        cursor: Cursor,
        line_height_mm: f32,
        size_pt: f32,
        runs: &[FlowRun<'_>],
    ) -> Result<Cursor, RenderError> {
        let wrap_runs: Vec<Run<'_>> = runs
            .iter()
            .map(|r| Run {
                style: r.font,
                text: r.text,
            })
            .collect();
        let lines = flow_runs(&wrap_runs, size_pt, self.config.content_width_mm());

        let mut cursor = cursor;
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                cursor = cursor.advance(line_height_mm);
            }
            cursor = self.ensure_room(cursor, line_height_mm)?;
            let baseline = baseline_mm(cursor.y_mm, line_height_mm, size_pt);
            for span in line {
                let run = &runs[span.run];
                self.push(
                    cursor.page,
                    DrawOp::Text {
                        x_mm: self.config.margin_left_mm + span.offset_mm,
                        baseline_mm: baseline,
                        style: TextStyle::new(run.font, size_pt, run.color),
                        text: span.text.clone(),
                    },
                );
            }
        }
        Ok(cursor)
    }

    /// Closes the last page and resolves the page-count alias.
    pub fn finish(mut self) -> Vec<Page> {
        self.close_page();
        let total = self.pages.len().to_string();
        for &(page, index) in &self.alias_ops {
            if let Some(DrawOp::Text { text, .. }) = self.pages[page].ops.get_mut(index) {
                *text = text.replace(PAGE_COUNT_ALIAS, &total);
            }
        }
        self.pages
    }

    // ── internals ────────────────────────────────────────────────────────────

    fn push(&mut self, page: usize, op: DrawOp) {
        if let Some(p) = self.pages.get_mut(page) {
            p.ops.push(op);
        }
    }

    fn add_page(&mut self) -> Result<Cursor, RenderError> {
        if self.pages.len() >= self.config.max_pages {
            return Err(RenderError::PageLimitExceeded {
                limit: self.config.max_pages,
            });
        }
        self.close_page();
        self.pages.push(Page::default());
        Ok(Cursor {
            page: self.pages.len() - 1,
            y_mm: self.config.margin_top_mm,
        })
    }

    fn close_page(&mut self) {
        let Some(footer) = self.footer.clone() else {
            return;
        };
        let page = self.pages.len() - 1;
        let text = footer
            .text
            .replace(PAGE_NUMBER_TOKEN, &(page + 1).to_string());
        let cursor = Cursor {
            page,
            y_mm: self.config.height_mm - footer.offset_from_bottom_mm,
        };
        let has_alias = text.contains(PAGE_COUNT_ALIAS);
        let cell = Cell::new(None, &text, footer.style, Align::Center);
        self.draw_cell(cursor, self.config.margin_left_mm, self.config.content_width_mm(), footer.height_mm, &cell);
        if has_alias {
            self.alias_ops.push((page, self.pages[page].ops.len() - 1));
        }
    }

    fn draw_cell(&mut self, cursor: Cursor, x_mm: f32, width_mm: f32, height_mm: f32, cell: &Cell<'_>) {
        if cell.text.is_empty() {
            return;
        }
        let padding = self.config.cell_padding_mm;
        let text_w = get_metrics(cell.style.font).width_mm(cell.text, cell.style.size_pt);
        let text_x = match cell.align {
            Align::Left => x_mm + padding,
            Align::Center => x_mm + (width_mm - text_w) / 2.0,
            Align::Right => x_mm + width_mm - padding - text_w,
        };

        self.push(
            cursor.page,
            DrawOp::Text {
                x_mm: text_x,
                baseline_mm: baseline_mm(cursor.y_mm, height_mm, cell.style.size_pt),
                style: cell.style,
                text: cell.text.to_string(),
            },
        );

        if let Some(uri) = cell.link {
            self.push(
                cursor.page,
                DrawOp::Link {
                    x_mm: text_x,
                    y_mm: cursor.y_mm,
                    w_mm: text_w,
                    h_mm: height_mm,
                    uri: uri.to_string(),
                },
            );
        }
    }
}

/// Vertically centres a line of `size_pt` text in a cell of `height_mm`.
fn baseline_mm(top_mm: f32, height_mm: f32, size_pt: f32) -> f32 {
    top_mm + 0.5 * height_mm + 0.3 * (size_pt / PT_PER_MM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::page::default_page_config;

    const BODY: TextStyle = TextStyle::new(FontStyle::Regular, 10.0, Rgb::BLACK);

    fn page_footer() -> Footer {
        Footer {
            text: format!("Page {PAGE_NUMBER_TOKEN}/{PAGE_COUNT_ALIAS}"),
            style: TextStyle::new(FontStyle::Italic, 8.0, Rgb(128, 128, 128)),
            offset_from_bottom_mm: 15.0,
            height_mm: 10.0,
        }
    }

    #[test]
    fn test_row_advances_cursor_by_height() {
        let (mut canvas, cursor) = Canvas::new(default_page_config(), None);
        let next = canvas
            .row(cursor, 6.0, &[Cell::new(None, "Hello", BODY, Align::Left)])
            .unwrap();
        assert_eq!(next, cursor.advance(6.0));
        assert_eq!(canvas.page_count(), 1);
    }

    #[test]
    fn test_row_breaks_page_when_line_would_overflow() {
        let (mut canvas, cursor) = Canvas::new(default_page_config(), None);
        let near_bottom = cursor.at(275.0);
        let next = canvas
            .row(near_bottom, 5.0, &[Cell::new(None, "Overflow", BODY, Align::Left)])
            .unwrap();
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(next, Cursor { page: 1, y_mm: 15.0 });
        let pages = canvas.finish();
        assert_eq!(pages[1].texts().collect::<Vec<_>>(), vec!["Overflow"]);
        assert!(pages[0].texts().next().is_none());
    }

    #[test]
    fn test_row_fits_exactly_at_threshold() {
        let (mut canvas, cursor) = Canvas::new(default_page_config(), None);
        canvas
            .row(cursor.at(272.0), 5.0, &[Cell::new(None, "Fits", BODY, Align::Left)])
            .unwrap();
        assert_eq!(canvas.page_count(), 1);
    }

    #[test]
    fn test_alignment_positions() {
        let config = default_page_config();
        let (mut canvas, cursor) = Canvas::new(config.clone(), None);
        canvas
            .row(
                cursor,
                6.0,
                &[
                    Cell::new(Some(130.0), "Left", BODY, Align::Left),
                    Cell::new(None, "Right", BODY, Align::Right),
                ],
            )
            .unwrap();
        canvas
            .row(cursor.advance(6.0), 6.0, &[Cell::new(None, "Mid", BODY, Align::Center)])
            .unwrap();
        let pages = canvas.finish();
        let xs: Vec<f32> = pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x_mm, .. } => Some(*x_mm),
                _ => None,
            })
            .collect();
        let metrics = get_metrics(FontStyle::Regular);
        assert!((xs[0] - 11.0).abs() < 1e-4);
        let right_w = metrics.width_mm("Right", 10.0);
        assert!((xs[1] - (200.0 - 1.0 - right_w)).abs() < 1e-3);
        let mid_w = metrics.width_mm("Mid", 10.0);
        assert!((xs[2] - (10.0 + (190.0 - mid_w) / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn test_paragraph_flows_across_pages() {
        let (mut canvas, cursor) = Canvas::new(default_page_config(), None);
        let text = "word ".repeat(400);
        let end = canvas
            .paragraph(cursor.at(260.0), 5.0, &text, BODY, Align::Left)
            .unwrap();
        assert!(canvas.page_count() >= 2);
        assert_eq!(end.page, canvas.page_count() - 1);
        let pages = canvas.finish();
        assert!(pages[0].texts().count() >= 1);
        assert!(pages[1].texts().count() >= 1);
    }

    #[test]
    fn test_link_cell_emits_link_op() {
        let (mut canvas, cursor) = Canvas::new(default_page_config(), None);
        canvas
            .row(
                cursor,
                5.0,
                &[Cell::new(Some(140.0), "AWS Cert", BODY, Align::Left)
                    .with_link(Some("https://aws.example/cert"))],
            )
            .unwrap();
        let pages = canvas.finish();
        assert!(pages[0].ops.iter().any(|op| matches!(
            op,
            DrawOp::Link { uri, .. } if uri == "https://aws.example/cert"
        )));
    }

    #[test]
    fn test_empty_cell_draws_nothing() {
        let (mut canvas, cursor) = Canvas::new(default_page_config(), None);
        canvas
            .row(cursor, 5.0, &[Cell::new(None, "", BODY, Align::Left)])
            .unwrap();
        assert!(canvas.finish()[0].ops.is_empty());
    }

    #[test]
    fn test_footer_resolves_page_count_alias() {
        let (mut canvas, cursor) = Canvas::new(default_page_config(), Some(page_footer()));
        let mut cursor = cursor;
        for _ in 0..2 {
            cursor = canvas.ensure_room(cursor.at(280.0), 5.0).unwrap();
        }
        let pages = canvas.finish();
        assert_eq!(pages.len(), 3);
        for (i, page) in pages.iter().enumerate() {
            let footer: Vec<_> = page.texts().collect();
            assert_eq!(footer, vec![format!("Page {}/3", i + 1)]);
        }
    }

    #[test]
    fn test_alias_in_body_text_is_left_alone() {
        let (mut canvas, cursor) = Canvas::new(default_page_config(), Some(page_footer()));
        canvas
            .row(cursor, 5.0, &[Cell::new(None, "literal {nb}", BODY, Align::Left)])
            .unwrap();
        let pages = canvas.finish();
        let texts: Vec<_> = pages[0].texts().collect();
        assert_eq!(texts, vec!["literal {nb}", "Page 1/1"]);
    }

    #[test]
    fn test_page_limit_exceeded() {
        let config = PageConfig {
            max_pages: 2,
            ..default_page_config()
        };
        let (mut canvas, cursor) = Canvas::new(config, None);
        let cursor = canvas.ensure_room(cursor.at(280.0), 5.0).unwrap();
        assert_eq!(cursor.page, 1);
        let err = canvas.ensure_room(cursor.at(280.0), 5.0).unwrap_err();
        assert!(matches!(err, RenderError::PageLimitExceeded { limit: 2 }));
    }

    #[test]
    fn test_flow_returns_top_of_last_line() {
        let (mut canvas, cursor) = Canvas::new(default_page_config(), None);
        let items = "Rust, Go, Python, TypeScript, Kubernetes, Terraform, ".repeat(6);
        let end = canvas
            .flow(
                cursor,
                5.0,
                10.0,
                &[
                    FlowRun { font: FontStyle::Bold, color: Rgb(35, 76, 106), text: "Tools: " },
                    FlowRun { font: FontStyle::Regular, color: Rgb::BLACK, text: &items },
                ],
            )
            .unwrap();
        let pages = canvas.finish();
        let lines = {
            let mut ys: Vec<f32> = pages[0]
                .ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Text { baseline_mm, .. } => Some(*baseline_mm),
                    _ => None,
                })
                .collect();
            ys.dedup();
            ys.len()
        };
        assert!(lines > 1);
        assert!((end.y_mm - (10.0 + 5.0 * (lines as f32 - 1.0))).abs() < 1e-3);
    }
}
