//! Layout of the scorecards.
//!
//! Every card has the same width: one label column and `MAX_ATTEMPTS` attempt
//! columns, whatever the number of attempts configured. A card is made of,
//! from top to bottom:
//!
//! 1. the name of the event (single height)
//! 2. the name of the climber (double height)
//! 3. the category, session and bib (double height)
//! 4. a blank spacer row (single height)
//! 5. one row per climb, with the attempt boxes (double height)
//! 6. the scoring notes, if any: a label row and a text row (single height)
//!
//! Cards are printed two per page. The first card of a page is padded to
//! `FIRST_CARD_UNITS` row units and followed by one blank row. The second card
//! is padded to `SECOND_CARD_UNITS` row units, and the next page starts two
//! rows further down.

use log::{debug, info, warn};

use crate::config::{
    CardSettings, ClimbAssignments, ClimberRecord, PlacedCard, SkipReason, MAX_ATTEMPTS,
};
use crate::sheet::{CellStyle, RowHeight, Sheet, SheetError};

pub const NO_CLIMBS_REASON: &str = "No climbs assigned to category";

/// Columns used by a card: the label column and the attempt columns.
pub const CARD_COLUMNS: usize = 1 + MAX_ATTEMPTS as usize;

// Padding targets, in row units, for the two cards of a page.
// They fit the default card geometry and are not derived from the settings.
pub const FIRST_CARD_UNITS: u32 = 33;
pub const SECOND_CARD_UNITS: u32 = 34;

// Blank rows after the first card of a page.
const FIRST_CARD_TRAILER_ROWS: usize = 1;
// Blank rows between two pages.
const PAGE_GAP_ROWS: usize = 2;

const EVENT_STYLE: CellStyle = CellStyle::PLAIN.bold();
const HEADER_STYLE: CellStyle = CellStyle::PLAIN.bold().font_size(14);
const GRID_STYLE: CellStyle = CellStyle::PLAIN.boxed();
const NOTES_LABEL_STYLE: CellStyle = CellStyle::PLAIN.bold();
const NOTES_STYLE: CellStyle = CellStyle::PLAIN.wrapped();

/// The cards and the climbers that did not get one.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct LayoutResult {
    pub cards: Vec<PlacedCard>,
    pub skipped: Vec<SkipReason>,
}

/// Position within the card being written.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
struct CardCursor {
    row: usize,
    rows: usize,
    units: u32,
}

impl CardCursor {
    fn new(row: usize) -> CardCursor {
        CardCursor {
            row,
            rows: 0,
            units: 0,
        }
    }

    /// Claims the next row of the card.
    fn next_row(&mut self, sheet: &mut dyn Sheet, height: RowHeight) -> Result<usize, SheetError> {
        let row = self.row;
        sheet.set_row_height(row, height)?;
        self.row += 1;
        self.rows += 1;
        self.units += height.units();
        Ok(row)
    }
}

fn merged(
    sheet: &mut dyn Sheet,
    row: usize,
    col: usize,
    width: usize,
    value: &str,
    style: CellStyle,
) -> Result<(), SheetError> {
    sheet.merge(row, col, width)?;
    sheet.write_cell(row, col, value, style)
}

/// Lays out the cards, one after the other, on the sheet.
pub struct CardLayout<'a> {
    settings: &'a CardSettings,
    assignments: &'a ClimbAssignments,
    attempts: usize,
    // First free row of the sheet.
    row: usize,
    successful_cards: usize,
    // The last card closed a page: the next one starts after a gap.
    page_gap_pending: bool,
}

impl<'a> CardLayout<'a> {
    pub fn new(settings: &'a CardSettings, assignments: &'a ClimbAssignments) -> CardLayout<'a> {
        if settings.attempt_count > MAX_ATTEMPTS {
            info!(
                "CardLayout: {} attempts requested, only {} fit on a card",
                settings.attempt_count, MAX_ATTEMPTS
            );
        }
        CardLayout {
            settings,
            assignments,
            attempts: settings.effective_attempts() as usize,
            row: 0,
            successful_cards: 0,
            page_gap_pending: false,
        }
    }

    pub fn successful_cards(&self) -> usize {
        self.successful_cards
    }

    /// Places the card of one climber.
    ///
    /// A failure of the sheet is reported as a skip reason, and the next card
    /// starts where this one would have started.
    pub fn place(
        &mut self,
        sheet: &mut dyn Sheet,
        climber: &ClimberRecord,
    ) -> Result<PlacedCard, SkipReason> {
        let climbs: &[String] = match self.assignments.get(&climber.category) {
            Some(climbs) if !climbs.is_empty() => climbs,
            _ => {
                info!(
                    "CardLayout: no climbs for {} in category {:?}",
                    climber.full_name, climber.category
                );
                return Err(SkipReason {
                    name: climber.full_name.clone(),
                    category: Some(climber.category.clone()),
                    reason: NO_CLIMBS_REASON.to_string(),
                });
            }
        };
        let shown = climbs.len().min(self.settings.climb_count as usize);

        let first_row = if self.page_gap_pending {
            self.row + PAGE_GAP_ROWS
        } else {
            self.row
        };
        let mut cursor = CardCursor::new(first_row);
        if let Err(e) = self.write_card(sheet, &mut cursor, climber, &climbs[..shown]) {
            warn!(
                "CardLayout: failed to write the card of {}: {}",
                climber.full_name, e
            );
            if let Err(e2) = sheet.clear_rows(first_row, cursor.row) {
                warn!("CardLayout: could not clear rows {}..{}: {}", first_row, cursor.row, e2);
            }
            return Err(SkipReason {
                name: climber.full_name.clone(),
                category: Some(climber.category.clone()),
                reason: format!("Error creating scorecard: {}", e),
            });
        }

        let first_of_page = self.successful_cards % 2 == 0;
        let target_units = if first_of_page {
            FIRST_CARD_UNITS
        } else {
            SECOND_CARD_UNITS
        };
        let overflow = cursor.units > target_units;
        if overflow {
            warn!(
                "CardLayout: the card of {} uses {} row units, more than the {} reserved for it",
                climber.full_name, cursor.units, target_units
            );
        }
        let padding = target_units.saturating_sub(cursor.units) as usize;
        self.row = cursor.row + padding;
        if first_of_page {
            self.row += FIRST_CARD_TRAILER_ROWS;
        }
        self.page_gap_pending = !first_of_page;
        self.successful_cards += 1;

        let card = PlacedCard {
            name: climber.full_name.clone(),
            first_row,
            rows_emitted: cursor.rows,
            units_used: cursor.units,
            target_units,
            overflow,
        };
        debug!("CardLayout: placed {:?}", card);
        Ok(card)
    }

    fn write_card(
        &self,
        sheet: &mut dyn Sheet,
        cursor: &mut CardCursor,
        climber: &ClimberRecord,
        climbs: &[String],
    ) -> Result<(), SheetError> {
        let row = cursor.next_row(sheet, RowHeight::Single)?;
        merged(sheet, row, 0, CARD_COLUMNS, &self.settings.event_name, EVENT_STYLE)?;

        let row = cursor.next_row(sheet, RowHeight::Double)?;
        merged(sheet, row, 0, CARD_COLUMNS, &climber.full_name, HEADER_STYLE)?;

        let row = cursor.next_row(sheet, RowHeight::Double)?;
        let field_width = (CARD_COLUMNS - 1) / 2;
        sheet.write_cell(
            row,
            0,
            &format!("Category: {}", climber.category),
            HEADER_STYLE,
        )?;
        merged(
            sheet,
            row,
            1,
            field_width,
            &format!("Session: {}", climber.session),
            HEADER_STYLE,
        )?;
        merged(
            sheet,
            row,
            1 + field_width,
            field_width,
            &format!("Bib: {}", climber.bib),
            HEADER_STYLE,
        )?;

        // Spacer
        cursor.next_row(sheet, RowHeight::Single)?;

        let label = self.settings.event_kind.climb_label();
        for climb in climbs {
            let row = cursor.next_row(sheet, RowHeight::Double)?;
            sheet.write_cell(row, 0, &format!("{} {}", label, climb), GRID_STYLE)?;
            for attempt in 1..=self.attempts {
                sheet.write_cell(row, attempt, &attempt.to_string(), GRID_STYLE)?;
            }
        }

        if let Some(notes) = self.settings.notes() {
            let row = cursor.next_row(sheet, RowHeight::Single)?;
            sheet.write_cell(row, 0, "Scoring:", NOTES_LABEL_STYLE)?;
            let row = cursor.next_row(sheet, RowHeight::Single)?;
            merged(sheet, row, 0, CARD_COLUMNS, notes, NOTES_STYLE)?;
        }
        Ok(())
    }
}

/// Lays out the cards of all the climbers, in the given order.
///
/// This never stops on a climber: any climber that cannot be placed is
/// reported in the skipped list.
pub fn layout_cards(
    sheet: &mut dyn Sheet,
    climbers: &[ClimberRecord],
    assignments: &ClimbAssignments,
    settings: &CardSettings,
) -> LayoutResult {
    let mut layout = CardLayout::new(settings, assignments);
    let mut res = LayoutResult::default();
    for climber in climbers {
        match layout.place(sheet, climber) {
            Ok(card) => res.cards.push(card),
            Err(skip) => res.skipped.push(skip),
        }
    }
    info!(
        "layout_cards: {} cards, {} skipped",
        res.cards.len(),
        res.skipped.len()
    );
    res
}
