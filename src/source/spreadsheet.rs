//! Row Extractor over the first worksheet of a workbook

use super::{Row, SourceError, SourceResult};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::debug;

/// Lazy iterator over the data rows of one worksheet
///
/// Row 0 is taken as the header. Each yielded [`Row`] holds the trimmed
/// text of every non-empty cell; a whitespace-only cell becomes `""`.
#[derive(Debug)]
pub struct SpreadsheetRows {
    range: Range<Data>,
    headers: Vec<Option<String>>,
    /// Sheet row of the range's first row, 0-based
    first_row: usize,
    next: usize,
}

impl SpreadsheetRows {
    pub fn from_range(range: Range<Data>) -> Self {
        let headers = (0..range.width())
            .map(|col| {
                range
                    .get((0, col))
                    .and_then(cell_text)
                    .filter(|name| !name.is_empty())
            })
            .collect();
        let first_row = range.start().map_or(0, |(row, _)| row as usize);
        Self {
            range,
            headers,
            first_row,
            next: 1,
        }
    }

    /// Column names from the header row, in sheet order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().flatten().map(String::as_str)
    }
}

impl ExactSizeIterator for SpreadsheetRows {}

impl Iterator for SpreadsheetRows {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.next >= self.range.height() {
            return None;
        }
        let idx = self.next;
        self.next += 1;

        let mut row = Row::new(self.first_row + idx + 1);
        for (col, header) in self.headers.iter().enumerate() {
            let Some(header) = header else { continue };
            if let Some(text) = self.range.get((idx, col)).and_then(cell_text) {
                row.fields.insert(header.clone(), text);
            }
        }
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.range.height().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

/// Open a workbook and return the rows of its first worksheet
pub fn open_rows(path: impl AsRef<Path>) -> SourceResult<SpreadsheetRows> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SourceError::NoWorksheet(path.to_path_buf()))??;
    let rows = SpreadsheetRows::from_range(range);
    let headers: Vec<&str> = rows.headers().collect();
    debug!(path = %path.display(), ?headers, rows = rows.len(), "reading first worksheet");
    Ok(rows)
}

/// Render a cell the way the converter keys on it, or `None` if empty
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        // Whole numbers are ids like 10101, never 10101.0
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            format!("{}", *f as i64)
        }
        other => other.to_string().trim().to_string(),
    };
    Some(text)
}
