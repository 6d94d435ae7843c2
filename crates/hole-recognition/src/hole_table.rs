//! Forming-tool callouts in a generated hole table.
//!
//! The host writes forming tools into the hole table as raw size/depth
//! strings. Each recognised row gets a new row underneath carrying the tool's
//! name, with the tag and quantity columns merged across both rows.

use tracing::{debug, info, instrument};

use crate::error::RecognitionError;

/// Editable table annotation on a drawing sheet.
pub trait TableEditor {
    fn row_count(&self) -> usize;

    fn cell_text(&self, row: usize, column: usize) -> Option<&str>;

    /// Insert an empty row directly below `row`.
    fn insert_row_after(&mut self, row: usize) -> Result<(), RecognitionError>;

    fn set_cell_text(&mut self, row: usize, column: usize, text: &str) -> Result<(), RecognitionError>;

    /// Merge the rectangle spanning the two cells, inclusive.
    fn merge_cells(
        &mut self,
        first_row: usize,
        first_column: usize,
        last_row: usize,
        last_column: usize,
    ) -> Result<(), RecognitionError>;
}

/// Column holding the size/depth callout.
pub const SIZE_COLUMN: usize = 1;

/// Size/depth callouts of known forming tools and the name written under
/// them. Looked up in order; the first exact match wins.
pub const FORMING_TOOLS: [(&str, &str); 10] = [
    ("<MOD-DIAM>0.150<HOLE-DEPTH>0.019", "10-32 E&T"),
    ("<MOD-DIAM>0.150<HOLE-DEPTH>0.027", "10-32 E&T"),
    ("<MOD-DIAM>0.178", "10-32 TAP"),
    ("<MOD-DIAM>0.150<HOLE-DEPTH>0.086", "8-32 E&T"),
    ("<MOD-DIAM>0.150<HOLE-DEPTH>0.016", "8-32 E&T"),
    ("<MOD-DIAM>0.150<HOLE-DEPTH>0.011", "8-32 E&T"),
    ("<MOD-DIAM>0.189", "1/4-20 E&T"),
    ("<MOD-DIAM>0.138<HOLE-DEPTH>0.011", "6-32 E&T"),
    ("<MOD-DIAM>0.060 THRU", "BRIDGE PUNCH"),
    ("<MOD-DIAM>0.875<HOLE-DEPTH>0.075", "0.875in GROMMET"),
];

/// Name of the forming tool whose callout is exactly `text`.
pub fn forming_tool_label(text: &str) -> Option<&'static str> {
    FORMING_TOOLS
        .iter()
        .find(|(callout, _)| *callout == text)
        .map(|(_, label)| *label)
}

/// Rows whose size column names a forming tool, ascending.
pub fn forming_tool_rows(table: &dyn TableEditor) -> Vec<(usize, &'static str)> {
    (0..table.row_count())
        .filter_map(|row| {
            let text = table.cell_text(row, SIZE_COLUMN)?;
            forming_tool_label(text).map(|label| (row, label))
        })
        .collect()
}

/// Add a tool-name row under every forming-tool row. Returns the number of
/// rows inserted.
#[instrument(skip(table), fields(rows = table.row_count()))]
pub fn annotate_forming_tools(table: &mut dyn TableEditor) -> Result<usize, RecognitionError> {
    let rows = forming_tool_rows(table);
    for (shift, (row, label)) in rows.iter().enumerate() {
        let loc = row + shift;
        table.insert_row_after(loc)?;
        table.set_cell_text(loc + 1, SIZE_COLUMN, label)?;
        table.merge_cells(loc, 0, loc + 1, 0)?;
        table.merge_cells(loc, 2, loc + 1, 2)?;
        debug!(row = loc, label, "annotated forming tool");
    }
    info!(inserted = rows.len(), "annotated hole table");
    Ok(rows.len())
}

/// A table held in memory, for previews and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryTable {
    pub rows: Vec<Vec<String>>,
    /// Merged rectangles as `(first_row, first_column, last_row, last_column)`.
    pub merges: Vec<(usize, usize, usize, usize)>,
}

impl MemoryTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            merges: Vec::new(),
        }
    }

    fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    fn check(&self, row: usize, column: usize) -> Result<(), RecognitionError> {
        if row >= self.rows.len() || column >= self.column_count() {
            return Err(RecognitionError::TableEdit {
                row,
                column,
                reason: format!("outside {}x{} table", self.rows.len(), self.column_count()),
            });
        }
        Ok(())
    }
}

impl TableEditor for MemoryTable {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell_text(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    fn insert_row_after(&mut self, row: usize) -> Result<(), RecognitionError> {
        self.check(row, 0)?;
        let width = self.column_count();
        self.rows.insert(row + 1, vec![String::new(); width]);
        Ok(())
    }

    fn set_cell_text(&mut self, row: usize, column: usize, text: &str) -> Result<(), RecognitionError> {
        self.check(row, column)?;
        let cells = &mut self.rows[row];
        if cells.len() <= column {
            cells.resize(column + 1, String::new());
        }
        cells[column] = text.to_string();
        Ok(())
    }

    fn merge_cells(
        &mut self,
        first_row: usize,
        first_column: usize,
        last_row: usize,
        last_column: usize,
    ) -> Result<(), RecognitionError> {
        self.check(first_row, first_column)?;
        self.check(last_row, last_column)?;
        self.merges.push((first_row, first_column, last_row, last_column));
        Ok(())
    }
}
