//! Grid access.
//!
//! The engine reads and writes cells only through [`GridAccessor`], addressed
//! by 1-based `(row, column)`. Row 1 is the header row.

use medicor_model::CellValue;

use crate::error::GridError;

/// First row holding case data.
pub const FIRST_DATA_ROW: usize = 2;

/// Read/write access to a rectangular grid of cells.
pub trait GridAccessor {
    /// Number of rows, header row included.
    fn row_count(&self) -> usize;

    /// Number of columns, taken from the header row.
    fn column_count(&self) -> usize;

    /// Header text of `column`, empty when out of range.
    fn header_text(&self, column: usize) -> String;

    /// Typed value of a cell. Addresses outside the grid read as empty.
    fn value(&self, row: usize, column: usize) -> CellValue;

    /// Display text of a cell.
    fn text(&self, row: usize, column: usize) -> String {
        self.value(row, column).to_text()
    }

    /// Replace a data cell.
    ///
    /// # Errors
    ///
    /// Returns an error when the address is outside the grid or in the header
    /// row. The cell is left untouched in that case.
    fn set_value(&mut self, row: usize, column: usize, value: CellValue)
    -> Result<(), GridError>;

    /// Row numbers of the data rows.
    fn data_rows(&self) -> std::ops::RangeInclusive<usize> {
        FIRST_DATA_ROW..=self.row_count()
    }
}

/// In-memory grid with a header row and uniformly wide data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    /// Build a grid, padding short data rows with empty cells.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::RaggedRow`] when a data row is wider than the
    /// header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, GridError> {
        let width = headers.len();
        let mut padded = Vec::with_capacity(rows.len());
        for (idx, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(GridError::RaggedRow {
                    row: idx + FIRST_DATA_ROW,
                    expected: width,
                    found: row.len(),
                });
            }
            row.resize(width, CellValue::Empty);
            padded.push(row);
        }
        Ok(Self {
            headers,
            rows: padded,
        })
    }

    /// Build a grid from raw text, one `Vec` per data row.
    ///
    /// # Errors
    ///
    /// Same as [`SheetGrid::new`].
    pub fn from_text_rows<H, R, C>(headers: H, rows: R) -> Result<Self, GridError>
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let headers = headers.into_iter().map(Into::into).collect();
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(CellValue::text).collect())
            .collect();
        Self::new(headers, rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows in order, without the header row.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Display text of every cell of a data row.
    pub fn row_text(&self, row: usize) -> Vec<String> {
        (1..=self.column_count())
            .map(|column| self.text(row, column))
            .collect()
    }

    fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        let row_idx = row.checked_sub(FIRST_DATA_ROW)?;
        let col_idx = column.checked_sub(1)?;
        self.rows.get(row_idx)?.get(col_idx)
    }
}

impl GridAccessor for SheetGrid {
    fn row_count(&self) -> usize {
        self.rows.len() + 1
    }

    fn column_count(&self) -> usize {
        self.headers.len()
    }

    fn header_text(&self, column: usize) -> String {
        column
            .checked_sub(1)
            .and_then(|idx| self.headers.get(idx))
            .cloned()
            .unwrap_or_default()
    }

    fn value(&self, row: usize, column: usize) -> CellValue {
        if row == 1 {
            return CellValue::text(self.header_text(column));
        }
        self.cell(row, column).cloned().unwrap_or_default()
    }

    fn set_value(
        &mut self,
        row: usize,
        column: usize,
        value: CellValue,
    ) -> Result<(), GridError> {
        if row == 1 {
            return Err(GridError::HeaderRow { column });
        }
        let rows = self.row_count();
        let columns = self.column_count();
        let out_of_bounds = GridError::OutOfBounds {
            row,
            column,
            rows,
            columns,
        };
        let row_idx = row
            .checked_sub(FIRST_DATA_ROW)
            .ok_or_else(|| out_of_bounds.clone())?;
        let cell = column
            .checked_sub(1)
            .and_then(|col_idx| self.rows.get_mut(row_idx)?.get_mut(col_idx))
            .ok_or(out_of_bounds)?;
        *cell = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> SheetGrid {
        SheetGrid::from_text_rows(
            ["In", "Start", "Out"],
            vec![vec!["08:00", "", "14:00"], vec!["09:00"]],
        )
        .unwrap()
    }

    #[test]
    fn short_rows_are_padded() {
        let grid = grid();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.column_count(), 3);
        assert_eq!(grid.value(3, 3), CellValue::Empty);
        assert_eq!(grid.row_text(3), vec!["09:00", "", ""]);
    }

    #[test]
    fn wide_rows_are_rejected() {
        let err = SheetGrid::from_text_rows(["A"], vec![vec!["1", "2"]]).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRow {
                row: 2,
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn header_row_reads_as_text_and_refuses_writes() {
        let mut grid = grid();
        assert_eq!(grid.text(1, 2), "Start");
        assert_eq!(grid.header_text(3), "Out");
        assert_eq!(grid.header_text(0), "");
        let err = grid.set_value(1, 2, CellValue::text("x")).unwrap_err();
        assert_eq!(err, GridError::HeaderRow { column: 2 });
    }

    #[test]
    fn out_of_bounds_reads_are_empty_and_writes_fail() {
        let mut grid = grid();
        assert_eq!(grid.value(9, 1), CellValue::Empty);
        assert_eq!(grid.value(2, 0), CellValue::Empty);
        let err = grid.set_value(2, 4, CellValue::text("x")).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { column: 4, .. }));
        assert_eq!(grid.row_text(2), vec!["08:00", "", "14:00"]);
    }

    #[test]
    fn writes_replace_the_cell() {
        let mut grid = grid();
        grid.set_value(2, 2, CellValue::text("11:00")).unwrap();
        assert_eq!(grid.text(2, 2), "11:00");
        assert_eq!(grid.data_rows(), 2..=3);
    }
}
