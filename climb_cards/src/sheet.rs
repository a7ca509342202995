//! The rendering surface.
//!
//! The layout engine and the roster builder do not know where the cards end up.
//! They send positioned, styled cells to a [`Sheet`].

use std::collections::BTreeMap;
use std::fmt::Display;

/// Height of a row, in row units.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RowHeight {
    Single,
    Double,
}

impl RowHeight {
    pub fn units(&self) -> u32 {
        match self {
            RowHeight::Single => 1,
            RowHeight::Double => 2,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Align {
    Left,
    Center,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct CellStyle {
    pub bold: bool,
    pub font_size: u32,
    pub border: bool,
    pub align: Align,
    pub wrap: bool,
}

impl CellStyle {
    pub const PLAIN: CellStyle = CellStyle {
        bold: false,
        font_size: 10,
        border: false,
        align: Align::Left,
        wrap: false,
    };

    pub const fn bold(self) -> CellStyle {
        CellStyle { bold: true, ..self }
    }

    pub const fn font_size(self, font_size: u32) -> CellStyle {
        CellStyle { font_size, ..self }
    }

    pub const fn boxed(self) -> CellStyle {
        CellStyle {
            border: true,
            align: Align::Center,
            ..self
        }
    }

    pub const fn wrapped(self) -> CellStyle {
        CellStyle { wrap: true, ..self }
    }
}

/// A failure reported by a rendering surface.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SheetError {
    pub message: String,
}

impl SheetError {
    pub fn new(message: impl Into<String>) -> SheetError {
        SheetError {
            message: message.into(),
        }
    }
}

impl std::error::Error for SheetError {}

impl Display for SheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A surface receiving cell instructions. Rows and columns start at 0.
pub trait Sheet {
    fn write_cell(
        &mut self,
        row: usize,
        col: usize,
        value: &str,
        style: CellStyle,
    ) -> Result<(), SheetError>;

    /// Merges `width` cells of a row, starting at `col`.
    fn merge(&mut self, row: usize, col: usize, width: usize) -> Result<(), SheetError>;

    fn set_row_height(&mut self, row: usize, height: RowHeight) -> Result<(), SheetError>;

    /// Removes everything written in the rows `first..last`.
    fn clear_rows(&mut self, first: usize, last: usize) -> Result<(), SheetError>;
}

/// A cell of a [`GridSheet`].
#[derive(PartialEq, Debug, Clone)]
pub struct GridCell {
    pub value: String,
    pub style: CellStyle,
    /// Number of merged columns, starting with this one.
    pub span: usize,
}

/// An in-memory sheet. The command line tool serializes it to files.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct GridSheet {
    pub name: String,
    cells: BTreeMap<(usize, usize), GridCell>,
    heights: BTreeMap<usize, RowHeight>,
}

impl GridSheet {
    pub fn new(name: &str) -> GridSheet {
        GridSheet {
            name: name.to_string(),
            ..GridSheet::default()
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.cells.get(&(row, col))
    }

    pub fn value(&self, row: usize, col: usize) -> Option<&str> {
        self.cell(row, col).map(|c| c.value.as_str())
    }

    /// All the cells, ordered by row then column.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &GridCell)> {
        self.cells.iter().map(|((r, c), cell)| (*r, *c, cell))
    }

    pub fn row_height(&self, row: usize) -> RowHeight {
        self.heights.get(&row).cloned().unwrap_or(RowHeight::Single)
    }

    /// The number of rows up to the last written one.
    pub fn num_rows(&self) -> usize {
        let last_cell = self.cells.keys().map(|(r, _)| r + 1).max().unwrap_or(0);
        let last_height = self.heights.keys().map(|r| r + 1).max().unwrap_or(0);
        last_cell.max(last_height)
    }

    pub fn num_cols(&self) -> usize {
        self.cells
            .iter()
            .map(|((_, c), cell)| c + cell.span.max(1))
            .max()
            .unwrap_or(0)
    }

    /// The values of the sheet as a dense table. Missing cells are empty.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let num_cols = self.num_cols();
        let mut rows = vec![vec![String::new(); num_cols]; self.num_rows()];
        for ((r, c), cell) in self.cells.iter() {
            rows[*r][*c] = cell.value.clone();
        }
        rows
    }
}

impl Sheet for GridSheet {
    fn write_cell(
        &mut self,
        row: usize,
        col: usize,
        value: &str,
        style: CellStyle,
    ) -> Result<(), SheetError> {
        let span = self.cell(row, col).map(|c| c.span).unwrap_or(1);
        self.cells.insert(
            (row, col),
            GridCell {
                value: value.to_string(),
                style,
                span,
            },
        );
        Ok(())
    }

    fn merge(&mut self, row: usize, col: usize, width: usize) -> Result<(), SheetError> {
        if width == 0 {
            return Err(SheetError::new(format!(
                "cannot merge zero cells at row {} column {}",
                row, col
            )));
        }
        self.cells
            .entry((row, col))
            .or_insert(GridCell {
                value: String::new(),
                style: CellStyle::PLAIN,
                span: 1,
            })
            .span = width;
        Ok(())
    }

    fn set_row_height(&mut self, row: usize, height: RowHeight) -> Result<(), SheetError> {
        self.heights.insert(row, height);
        Ok(())
    }

    fn clear_rows(&mut self, first: usize, last: usize) -> Result<(), SheetError> {
        self.cells.retain(|(r, _), _| *r < first || *r >= last);
        self.heights.retain(|r, _| *r < first || *r >= last);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_keeps_merges() {
        let mut g = GridSheet::new("test");
        g.merge(1, 0, 3).unwrap();
        g.write_cell(1, 0, "Title", CellStyle::PLAIN.bold()).unwrap();
        g.set_row_height(2, RowHeight::Double).unwrap();
        assert_eq!(g.cell(1, 0).unwrap().span, 3);
        assert!(g.cell(1, 0).unwrap().style.bold);
        assert_eq!(g.num_rows(), 3);
        assert_eq!(g.num_cols(), 3);
        assert_eq!(g.row_height(2), RowHeight::Double);
        assert_eq!(g.row_height(0), RowHeight::Single);
        assert_eq!(
            g.to_rows(),
            vec![vec!["", "", ""], vec!["Title", "", ""], vec!["", "", ""]]
        );
        assert!(g.merge(0, 0, 0).is_err());
    }

    #[test]
    fn clearing_rows() {
        let mut g = GridSheet::new("test");
        for r in 0..4 {
            g.write_cell(r, 0, "x", CellStyle::PLAIN).unwrap();
        }
        g.clear_rows(1, 3).unwrap();
        assert_eq!(g.value(0, 0), Some("x"));
        assert_eq!(g.value(1, 0), None);
        assert_eq!(g.value(2, 0), None);
        assert_eq!(g.value(3, 0), Some("x"));
    }
}
