//! PDF rendering of planned flashcard sheets.
//!
//! Fronts are top-centred in bold, backs centred in their card. Text shrinks
//! one point at a time until it fits, never below [`MIN_FONT_PT`].

use flashdeck_core::layout::{
    CardPlacement, PagePlan, SheetPlan, CARD_HEIGHT, CARD_WIDTH, COLUMNS, MARGIN, PAGE_HEIGHT,
    PAGE_WIDTH, ROWS,
};
use flashdeck_core::Side;
use pdf_oxide::writer::{PageBuilder, PdfWriter, PdfWriterConfig, TextLayout};
use thiserror::Error;

pub const FRONT_FONT: &str = "Helvetica-Bold";
pub const BACK_FONT: &str = "Helvetica";
const FOOTER_FONT: &str = "Helvetica";
const FOOTER_PT: f32 = 9.0;
pub const MIN_FONT_PT: u32 = 8;
const LINE_SPACING: f32 = 1.2;
const MARKER_LENGTH: f32 = 12.0;
const MARKER_GAP: f32 = 6.0;

const PAGE_W: f32 = PAGE_WIDTH as f32;
const PAGE_H: f32 = PAGE_HEIGHT as f32;
const EDGE: f32 = MARGIN as f32;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF generation failed: {0}")]
    Write(String),
}

impl From<pdf_oxide::error::Error> for PdfError {
    fn from(err: pdf_oxide::error::Error) -> Self {
        Self::Write(err.to_string())
    }
}

/// Wrapped lines with their widths, at the size that fits the box.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub font_pt: f32,
    pub lines: Vec<(String, f32)>,
}

impl FittedText {
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * line_height(self.font_pt)
    }
}

fn line_height(font_pt: f32) -> f32 {
    font_pt * LINE_SPACING
}

/// Maps plan coordinates onto the physical page.
///
/// The back offset is applied first, then the optional half turn about the
/// page centre.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frame {
    dx: f32,
    dy: f32,
    rotated: bool,
}

impl Frame {
    fn for_page(page: &PagePlan) -> Self {
        Self {
            dx: page.offset_x_pt as f32,
            dy: page.offset_y_pt as f32,
            rotated: page.rotated,
        }
    }

    /// Physical bottom-left corner of the `width` × `height` box at `(x, y)`.
    fn place(&self, x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
        let (x, y) = (x + self.dx, y + self.dy);
        if self.rotated {
            (PAGE_W - x - width, PAGE_H - y - height)
        } else {
            (x, y)
        }
    }
}

/// Renders sheet plans with the base-14 Helvetica fonts.
pub struct PdfRenderer {
    layout: TextLayout,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self {
            layout: TextLayout::new(),
        }
    }

    /// Render each sheet as a front page followed by its back page.
    pub fn render(&self, sheets: &[SheetPlan]) -> Result<Vec<u8>, PdfError> {
        let config = PdfWriterConfig::default().with_title("Flashcards");
        let mut writer = PdfWriter::with_config(config);

        for sheet in sheets {
            self.draw_page(&mut writer, &sheet.front);
            self.draw_page(&mut writer, &sheet.back);
        }

        let bytes = writer.finish()?;
        tracing::debug!(sheets = sheets.len(), bytes = bytes.len(), "rendered PDF");
        Ok(bytes)
    }

    /// Wrap `text` to `width`, shrinking from `base_pt` until it fits `height`.
    ///
    /// Paragraph breaks (`"\n\n"`) become an empty line.
    pub fn fit(&self, text: &str, font: &str, base_pt: u32, width: f32, height: f32) -> FittedText {
        let mut size = base_pt.max(MIN_FONT_PT);
        loop {
            let fitted = self.wrap(text, font, size as f32, width);
            if size == MIN_FONT_PT || fitted.height() <= height {
                return fitted;
            }
            size -= 1;
        }
    }

    fn wrap(&self, text: &str, font: &str, font_pt: f32, width: f32) -> FittedText {
        let mut lines = Vec::new();
        for (i, paragraph) in text.split("\n\n").enumerate() {
            if i > 0 {
                lines.push((String::new(), 0.0));
            }
            lines.extend(self.layout.wrap_text(paragraph, font, font_pt, width));
        }
        FittedText { font_pt, lines }
    }

    fn draw_page(&self, writer: &mut PdfWriter, plan: &PagePlan) {
        let frame = Frame::for_page(plan);
        let mut page = writer.add_page(PAGE_W, PAGE_H);

        draw_cut_lines(&mut page, frame);
        if plan.corner_markers {
            draw_corner_markers(&mut page, frame);
        }
        for card in &plan.cards {
            self.draw_card(&mut page, frame, card, plan.side);
        }
        if let Some(footer) = &plan.footer {
            self.draw_footer(&mut page, frame, footer);
        }

        page.finish();
    }

    fn draw_card(&self, page: &mut PageBuilder<'_>, frame: Frame, card: &CardPlacement, side: Side) {
        let (w, h) = (card.width as f32, card.height as f32);
        let (x, y) = frame.place(card.x as f32, card.y as f32, w, h);

        match side {
            Side::Front => {
                let fitted = self.fit(&card.text, FRONT_FONT, card.font_pt, w * 0.9, h * 0.8);
                let lh = line_height(fitted.font_pt);
                let top = y + h - lh * 1.5;
                for (i, (line, line_w)) in fitted.lines.iter().enumerate() {
                    let baseline = top - i as f32 * lh;
                    draw_text(page, line, x + (w - line_w) / 2.0, baseline, FRONT_FONT, fitted.font_pt);
                }
            }
            Side::Back => {
                let fitted = self.fit(&card.text, BACK_FONT, card.font_pt, w, h);
                let lh = line_height(fitted.font_pt);
                let bottom = y + (h - fitted.height()) / 2.0;
                let count = fitted.lines.len();
                for (i, (line, line_w)) in fitted.lines.iter().enumerate() {
                    let baseline = bottom + (count - 1 - i) as f32 * lh;
                    draw_text(page, line, x + (w - line_w) / 2.0, baseline, BACK_FONT, fitted.font_pt);
                }
            }
        }
    }

    /// Bottom-right, just below the margin.
    fn draw_footer(&self, page: &mut PageBuilder<'_>, frame: Frame, footer: &str) {
        let width = self
            .layout
            .font_manager()
            .text_width(footer, FOOTER_FONT, FOOTER_PT);
        let (x, y) = frame.place(PAGE_W - EDGE - width, EDGE - 14.0, width, FOOTER_PT);
        draw_text(page, footer, x, y, FOOTER_FONT, FOOTER_PT);
    }
}

fn draw_text(page: &mut PageBuilder<'_>, text: &str, x: f32, y: f32, font: &str, font_pt: f32) {
    if !text.is_empty() {
        page.add_text(text, x, y, font, font_pt);
    }
}

/// A horizontal or vertical rule, drawn as a zero-area rectangle.
fn rule(page: &mut PageBuilder<'_>, frame: Frame, x: f32, y: f32, width: f32, height: f32) {
    let (x, y) = frame.place(x, y, width, height);
    page.draw_rect(x, y, width, height);
}

fn draw_cut_lines(page: &mut PageBuilder<'_>, frame: Frame) {
    for col in 1..COLUMNS {
        let x = EDGE + col as f32 * CARD_WIDTH as f32;
        rule(page, frame, x, EDGE, 0.0, PAGE_H - 2.0 * EDGE);
    }
    for row in 1..ROWS {
        let y = EDGE + row as f32 * CARD_HEIGHT as f32;
        rule(page, frame, EDGE, y, PAGE_W - 2.0 * EDGE, 0.0);
    }
}

fn draw_corner_markers(page: &mut PageBuilder<'_>, frame: Frame) {
    let (l, o) = (MARKER_LENGTH, MARKER_GAP);
    let (left, right) = (EDGE, PAGE_W - EDGE);
    let (bottom, top) = (EDGE, PAGE_H - EDGE);

    rule(page, frame, left - o, bottom, 0.0, l);
    rule(page, frame, left, bottom - o, l, 0.0);
    rule(page, frame, right + o, bottom, 0.0, l);
    rule(page, frame, right - l, bottom - o, l, 0.0);
    rule(page, frame, left - o, top - l, 0.0, l);
    rule(page, frame, left, top + o, l, 0.0);
    rule(page, frame, right + o, top - l, 0.0, l);
    rule(page, frame, right - l, top + o, l, 0.0);
}
