//! Print geometry for duplex flashcard sheets.
//!
//! A sheet is one US Letter page of fronts followed by one page of backs,
//! laid out as a 2 × 4 grid. Back cards are moved to the grid slot that ends
//! up behind their front once the paper is flipped. All lengths are in
//! PostScript points with the origin at the bottom-left of the page.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::types::{CardRecord, Side};

pub const PAGE_WIDTH: f64 = 612.0;
pub const PAGE_HEIGHT: f64 = 792.0;
pub const MARGIN: f64 = 36.0;
pub const COLUMNS: usize = 2;
pub const ROWS: usize = 4;
pub const CARDS_PER_SHEET: usize = COLUMNS * ROWS;
pub const CARD_WIDTH: f64 = (PAGE_WIDTH - 2.0 * MARGIN) / COLUMNS as f64;
pub const CARD_HEIGHT: f64 = (PAGE_HEIGHT - 2.0 * MARGIN) / ROWS as f64;
/// Padding between a card edge and its text box.
pub const CARD_INSET: f64 = 10.0;

pub const FRONT_FONT_RANGE: (u32, u32) = (10, 36);
pub const BACK_FONT_RANGE: (u32, u32) = (10, 20);

/// How the printer flips the paper between front and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplexMode {
    /// Long-edge flip; columns are mirrored on the back.
    #[serde(rename = "mirrored")]
    Mirrored,
    /// Long-edge flip with the printer already compensating.
    #[serde(rename = "non_mirrored")]
    NonMirrored,
    /// Short-edge flip; the whole back page is rotated 180°.
    #[serde(rename = "rotated_180")]
    Rotated180,
}

impl Default for DuplexMode {
    fn default() -> Self {
        Self::Mirrored
    }
}

impl DuplexMode {
    pub fn rotates_back_page(&self) -> bool {
        matches!(self, Self::Rotated180)
    }
}

/// Cell of the card grid, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSlot {
    pub row: usize,
    pub col: usize,
}

impl GridSlot {
    /// Slot of the `n`th card on a sheet, filled row by row.
    pub fn for_index(n: usize) -> Self {
        Self {
            row: n / COLUMNS,
            col: n % COLUMNS,
        }
    }
}

/// Slot on the back page that lines up with `front`.
pub fn map_back_position(front: GridSlot, mode: DuplexMode) -> GridSlot {
    match mode {
        DuplexMode::Mirrored => GridSlot {
            row: front.row,
            col: COLUMNS - 1 - front.col,
        },
        DuplexMode::NonMirrored => front,
        DuplexMode::Rotated180 => GridSlot {
            row: ROWS - 1 - front.row,
            col: COLUMNS - 1 - front.col,
        },
    }
}

/// Bottom-left corner of a card.
pub fn card_origin(slot: GridSlot) -> (f64, f64) {
    let x = MARGIN + slot.col as f64 * CARD_WIDTH;
    let y = PAGE_HEIGHT - MARGIN - (slot.row + 1) as f64 * CARD_HEIGHT;
    (x, y)
}

pub fn mm_to_pt(mm: f64) -> f64 {
    mm * 72.0 / 25.4
}

/// Print options for a deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    pub duplex_mode: DuplexMode,
    /// Back page drift correction, in millimetres.
    pub offset_x_mm: f64,
    pub offset_y_mm: f64,
    pub corner_markers: bool,
    pub show_footer: bool,
    /// Supports `{subject}`, `{unit}`, `{lesson}` and `{page}`.
    pub footer_template: String,
    pub subject: String,
    pub unit: String,
    pub lesson: String,
    pub front_font_pt: u32,
    pub back_font_pt: u32,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            duplex_mode: DuplexMode::default(),
            offset_x_mm: 0.0,
            offset_y_mm: 0.0,
            corner_markers: false,
            show_footer: false,
            footer_template: "{subject} \u{2022} {unit}".to_string(),
            subject: String::new(),
            unit: String::new(),
            lesson: String::new(),
            front_font_pt: 20,
            back_font_pt: 14,
        }
    }
}

impl PrintConfig {
    pub fn validate(&self) -> Result<()> {
        check_font(Side::Front, self.front_font_pt, FRONT_FONT_RANGE)?;
        check_font(Side::Back, self.back_font_pt, BACK_FONT_RANGE)?;
        render_footer(&self.footer_template, &self.footer_fields(), 1)?;
        Ok(())
    }

    pub fn footer_fields(&self) -> FooterFields<'_> {
        FooterFields {
            subject: &self.subject,
            unit: &self.unit,
            lesson: &self.lesson,
        }
    }

    fn footer(&self, page: usize) -> Result<Option<String>> {
        if !self.show_footer {
            return Ok(None);
        }
        let text = render_footer(&self.footer_template, &self.footer_fields(), page)?;
        Ok(Some(text).filter(|t| !t.is_empty()))
    }
}

fn check_font(side: Side, size: u32, (min, max): (u32, u32)) -> Result<()> {
    if (min..=max).contains(&size) {
        Ok(())
    } else {
        Err(LayoutError::FontSize {
            side,
            size,
            min,
            max,
        })
    }
}

/// Values substituted into a footer template.
#[derive(Debug, Clone, Copy, Default)]
pub struct FooterFields<'a> {
    pub subject: &'a str,
    pub unit: &'a str,
    pub lesson: &'a str,
}

/// Expand footer placeholders. `{{` and `}}` produce literal braces.
pub fn render_footer(template: &str, fields: &FooterFields<'_>, page: usize) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        match ch {
            '{' => {
                if chars.next_if(|&(_, c)| c == '{').is_some() {
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    return Err(LayoutError::UnclosedPlaceholder { position: i });
                }
                match name.as_str() {
                    "subject" => out.push_str(fields.subject),
                    "unit" => out.push_str(fields.unit),
                    "lesson" => out.push_str(fields.lesson),
                    "page" => out.push_str(&page.to_string()),
                    _ => return Err(LayoutError::UnknownPlaceholder { name }),
                }
            }
            '}' => {
                if chars.next_if(|&(_, c)| c == '}').is_none() {
                    return Err(LayoutError::UnmatchedBrace { position: i });
                }
                out.push('}');
            }
            c => out.push(c),
        }
    }

    Ok(out)
}

/// Where one side of a card is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardPlacement {
    /// Index into the deck's records.
    pub record_index: usize,
    pub slot: GridSlot,
    /// Text box, inset from the card edges.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: String,
    /// Starting size; the renderer may shrink it to fit.
    pub font_pt: u32,
}

/// One printed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagePlan {
    pub page_number: usize,
    pub side: Side,
    pub rotated: bool,
    pub offset_x_pt: f64,
    pub offset_y_pt: f64,
    pub corner_markers: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    pub cards: Vec<CardPlacement>,
}

/// A front page and the back page printed on its reverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetPlan {
    pub index: usize,
    pub front: PagePlan,
    pub back: PagePlan,
}

/// Lay out every record onto sheets of eight.
pub fn plan_sheets(records: &[CardRecord], config: &PrintConfig) -> Result<Vec<SheetPlan>> {
    config.validate()?;

    let sheets = records
        .chunks(CARDS_PER_SHEET)
        .enumerate()
        .map(|(sheet, cards)| -> Result<SheetPlan> {
            let first = sheet * CARDS_PER_SHEET;
            let front_page = 2 * sheet + 1;
            let back_page = front_page + 1;

            let front_cards = cards
                .iter()
                .enumerate()
                .map(|(n, record)| {
                    let slot = GridSlot::for_index(n);
                    place(first + n, slot, &record.front, config.front_font_pt)
                })
                .collect();

            let back_cards = cards
                .iter()
                .enumerate()
                .map(|(n, record)| {
                    let slot = map_back_position(GridSlot::for_index(n), config.duplex_mode);
                    place(first + n, slot, &record.back, config.back_font_pt)
                })
                .collect();

            Ok(SheetPlan {
                index: sheet,
                front: PagePlan {
                    page_number: front_page,
                    side: Side::Front,
                    rotated: false,
                    offset_x_pt: 0.0,
                    offset_y_pt: 0.0,
                    corner_markers: config.corner_markers,
                    footer: config.footer(front_page)?,
                    cards: front_cards,
                },
                back: PagePlan {
                    page_number: back_page,
                    side: Side::Back,
                    rotated: config.duplex_mode.rotates_back_page(),
                    offset_x_pt: mm_to_pt(config.offset_x_mm),
                    offset_y_pt: mm_to_pt(config.offset_y_mm),
                    corner_markers: config.corner_markers,
                    footer: config.footer(back_page)?,
                    cards: back_cards,
                },
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        records = records.len(),
        sheets = sheets.len(),
        mode = ?config.duplex_mode,
        "planned sheets"
    );

    Ok(sheets)
}

fn place(record_index: usize, slot: GridSlot, text: &str, font_pt: u32) -> CardPlacement {
    let (x, y) = card_origin(slot);
    CardPlacement {
        record_index,
        slot,
        x: x + CARD_INSET,
        y: y + CARD_INSET,
        width: CARD_WIDTH - 2.0 * CARD_INSET,
        height: CARD_HEIGHT - 2.0 * CARD_INSET,
        text: text.to_string(),
        font_pt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn slot(row: usize, col: usize) -> GridSlot {
        GridSlot { row, col }
    }

    fn deck(n: usize) -> Vec<CardRecord> {
        (1..=n)
            .map(|i| CardRecord::new(format!("term {}", i), format!("def {}", i)))
            .collect()
    }

    #[test]
    fn card_dimensions() {
        assert_eq!(CARD_WIDTH, 270.0);
        assert_eq!(CARD_HEIGHT, 180.0);
        assert_eq!(CARDS_PER_SHEET, 8);
    }

    #[test]
    fn origin_of_top_left_and_bottom_right() {
        assert_eq!(card_origin(slot(0, 0)), (36.0, 576.0));
        assert_eq!(card_origin(slot(3, 1)), (306.0, 36.0));
    }

    #[test]
    fn mirrored_swaps_columns() {
        assert_eq!(map_back_position(slot(0, 0), DuplexMode::Mirrored), slot(0, 1));
        assert_eq!(map_back_position(slot(2, 1), DuplexMode::Mirrored), slot(2, 0));
    }

    #[test]
    fn non_mirrored_keeps_slot() {
        assert_eq!(map_back_position(slot(3, 1), DuplexMode::NonMirrored), slot(3, 1));
    }

    #[test]
    fn rotated_flips_rows_and_columns() {
        assert_eq!(map_back_position(slot(0, 0), DuplexMode::Rotated180), slot(3, 1));
        assert_eq!(map_back_position(slot(1, 1), DuplexMode::Rotated180), slot(2, 0));
        assert!(DuplexMode::Rotated180.rotates_back_page());
        assert!(!DuplexMode::Mirrored.rotates_back_page());
    }

    #[test]
    fn millimetres_to_points() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-9);
        assert_eq!(mm_to_pt(0.0), 0.0);
    }

    #[test]
    fn footer_substitutes_placeholders() {
        let fields = FooterFields {
            subject: "Biology",
            unit: "Cells",
            lesson: "3",
        };
        assert_eq!(
            render_footer("{subject} \u{2022} {unit} / {lesson} p{page}", &fields, 4).unwrap(),
            "Biology \u{2022} Cells / 3 p4"
        );
        assert_eq!(render_footer("{{page}} {page}", &fields, 2).unwrap(), "{page} 2");
    }

    #[test]
    fn footer_rejects_bad_templates() {
        let fields = FooterFields::default();
        assert_eq!(
            render_footer("{chapter}", &fields, 1),
            Err(LayoutError::UnknownPlaceholder {
                name: "chapter".to_string()
            })
        );
        assert_eq!(
            render_footer("ab {page", &fields, 1),
            Err(LayoutError::UnclosedPlaceholder { position: 3 })
        );
        assert_eq!(
            render_footer("a } b", &fields, 1),
            Err(LayoutError::UnmatchedBrace { position: 2 })
        );
    }

    #[test]
    fn config_rejects_font_sizes_out_of_range() {
        let config = PrintConfig {
            back_font_pt: 24,
            ..PrintConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(LayoutError::FontSize {
                side: Side::Back,
                size: 24,
                min: 10,
                max: 20
            })
        );
        assert!(PrintConfig::default().validate().is_ok());
    }

    #[test]
    fn plan_splits_into_sheets_of_eight() {
        let sheets = plan_sheets(&deck(9), &PrintConfig::default()).unwrap();
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].front.cards.len(), 8);
        assert_eq!(sheets[1].front.cards.len(), 1);
        assert_eq!(sheets[1].front.page_number, 3);
        assert_eq!(sheets[1].back.page_number, 4);

        let last = &sheets[1].back.cards[0];
        assert_eq!(last.record_index, 8);
        assert_eq!(last.text, "def 9");
        assert_eq!(last.slot, slot(0, 1));
        assert_eq!(last.font_pt, 14);
        assert_eq!((last.x, last.y), (316.0, 586.0));
        assert_eq!((last.width, last.height), (250.0, 160.0));
    }

    #[test]
    fn plan_of_empty_deck_has_no_sheets() {
        assert!(plan_sheets(&[], &PrintConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn back_page_carries_rotation_and_offset() {
        let config = PrintConfig {
            duplex_mode: DuplexMode::Rotated180,
            offset_x_mm: 25.4,
            offset_y_mm: -25.4,
            ..PrintConfig::default()
        };
        let sheets = plan_sheets(&deck(1), &config).unwrap();
        let back = &sheets[0].back;
        assert!(back.rotated);
        assert!((back.offset_x_pt - 72.0).abs() < 1e-9);
        assert!((back.offset_y_pt + 72.0).abs() < 1e-9);
        assert_eq!(back.cards[0].slot, slot(3, 1));
        assert!(!sheets[0].front.rotated);
    }

    #[test]
    fn footers_follow_page_numbers() {
        let config = PrintConfig {
            show_footer: true,
            footer_template: "{subject} p{page}".to_string(),
            subject: "Bio".to_string(),
            ..PrintConfig::default()
        };
        let sheets = plan_sheets(&deck(10), &config).unwrap();
        let footers: Vec<_> = sheets
            .iter()
            .flat_map(|s| [s.front.footer.clone(), s.back.footer.clone()])
            .collect();
        assert_eq!(
            footers,
            vec![
                Some("Bio p1".to_string()),
                Some("Bio p2".to_string()),
                Some("Bio p3".to_string()),
                Some("Bio p4".to_string()),
            ]
        );
    }

    #[test]
    fn hidden_or_empty_footer_is_omitted() {
        let sheets = plan_sheets(&deck(1), &PrintConfig::default()).unwrap();
        assert_eq!(sheets[0].front.footer, None);

        let config = PrintConfig {
            show_footer: true,
            footer_template: "{subject}".to_string(),
            ..PrintConfig::default()
        };
        let sheets = plan_sheets(&deck(1), &config).unwrap();
        assert_eq!(sheets[0].back.footer, None);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: PrintConfig =
            serde_json::from_str(r#"{"duplex_mode":"rotated_180","show_footer":true}"#).unwrap();
        assert_eq!(config.duplex_mode, DuplexMode::Rotated180);
        assert!(config.show_footer);
        assert_eq!(config.front_font_pt, 20);
    }
}
