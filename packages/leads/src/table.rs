//! In-memory lead table.
//!
//! A deliberately small column-oriented-by-name, row-stored table: just
//! enough to select, filter, group, and chunk a lead export. Every cell is
//! a string; an empty (or whitespace-only) cell is "missing".

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::LeadsError;

/// A header row plus string rows of equal width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Borrowed view of one row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a LeadTable,
    index: usize,
}

impl<'a> Row<'a> {
    /// Position of this row in its table.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Trimmed cell value, or `None` if the column is absent or the cell
    /// is empty.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.table.value(self.index, column)
    }

    /// Like [`Row::get`] but missing values become `""`.
    #[must_use]
    pub fn get_or_empty(&self, column: &str) -> &'a str {
        self.get(column).unwrap_or("")
    }

    /// First present value among `columns`.
    #[must_use]
    pub fn first_of(&self, columns: &[&str]) -> Option<&'a str> {
        columns.iter().find_map(|c| self.get(c))
    }
}

impl LeadTable {
    /// Builds a table. Rows are padded or truncated to the header width.
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Reads a CSV export with a header row.
    ///
    /// Ragged rows are tolerated and squared up to the header width.
    ///
    /// # Errors
    ///
    /// Returns [`LeadsError::Csv`] if the input is not valid CSV.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, LeadsError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        log::debug!("Read {} rows x {} columns", rows.len(), headers.len());

        Ok(Self::new(headers, rows))
    }

    /// Reads a CSV export from disk.
    ///
    /// # Errors
    ///
    /// Returns [`LeadsError::Io`] if the file cannot be opened, or
    /// [`LeadsError::Csv`] if it is not valid CSV.
    pub fn from_path(path: &Path) -> Result<Self, LeadsError> {
        let file = std::fs::File::open(path).map_err(|e| LeadsError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_csv_reader(file)
    }

    /// Column names in order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Raw rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows (excluding the header).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of `column`, if present.
    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Whether `column` is present.
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Trimmed value at `(row, column)`; `None` when absent or empty.
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        let value = self.rows.get(row)?.get(col)?.trim();
        (!value.is_empty()).then_some(value)
    }

    /// Iterates rows as [`Row`] views.
    pub fn iter(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.rows.len()).map(move |index| Row { table: self, index })
    }

    /// Keeps the rows for which `keep` returns `true`.
    #[must_use]
    pub fn filter_rows(&self, mut keep: impl FnMut(Row<'_>) -> bool) -> Self {
        let rows = self
            .iter()
            .filter(|row| keep(*row))
            .map(|row| self.rows[row.index].clone())
            .collect();
        Self {
            headers: self.headers.clone(),
            rows,
        }
    }

    /// Projects onto `columns` in the given order. Columns the table does
    /// not have come out as empty cells.
    #[must_use]
    pub fn select(&self, columns: &[&str]) -> Self {
        let indices: Vec<Option<usize>> = columns.iter().map(|c| self.column_index(c)).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|i| i.map_or_else(String::new, |i| row[i].clone()))
                    .collect()
            })
            .collect();
        Self {
            headers: columns.iter().map(|c| (*c).to_string()).collect(),
            rows,
        }
    }

    /// Appends `column`, or replaces it if it already exists.
    ///
    /// `values` shorter than the table leave the remaining cells empty.
    #[must_use]
    pub fn with_column(mut self, column: &str, values: Vec<String>) -> Self {
        let mut values = values.into_iter();
        if let Some(col) = self.column_index(column) {
            for row in &mut self.rows {
                row[col] = values.next().unwrap_or_default();
            }
        } else {
            self.headers.push(column.to_string());
            for row in &mut self.rows {
                row.push(values.next().unwrap_or_default());
            }
        }
        self
    }

    /// Splits rows by the value of `column`, passed through `key`.
    ///
    /// Rows for which `key` returns `None` are grouped under `"UNKNOWN"`.
    #[must_use]
    pub fn group_by(
        &self,
        column: &str,
        key: impl Fn(&str) -> Option<String>,
    ) -> BTreeMap<String, Self> {
        let mut groups: BTreeMap<String, Self> = BTreeMap::new();
        for row in self.iter() {
            let group = row
                .get(column)
                .and_then(&key)
                .unwrap_or_else(|| "UNKNOWN".to_string());
            groups
                .entry(group)
                .or_insert_with(|| Self {
                    headers: self.headers.clone(),
                    rows: Vec::new(),
                })
                .rows
                .push(self.rows[row.index].clone());
        }
        groups
    }

    /// Splits into consecutive tables of at most `max_rows` rows.
    ///
    /// `max_rows == 0` means no limit.
    #[must_use]
    pub fn chunks(&self, max_rows: usize) -> Vec<Self> {
        if max_rows == 0 || self.rows.len() <= max_rows {
            return vec![self.clone()];
        }
        self.rows
            .chunks(max_rows)
            .map(|chunk| Self {
                headers: self.headers.clone(),
                rows: chunk.to_vec(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LeadTable {
        LeadTable::from_csv_reader(
            "FIRST_NAME,PERSONAL_STATE,PERSONAL_ADDRESS\n\
             Ann,IL,1 N Main St\n\
             Bob,WI,\n\
             Cy,IL,  2 Oak Ave  \n"
                .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn reads_csv() {
        let table = sample();
        assert_eq!(table.len(), 3);
        assert_eq!(table.headers(), ["FIRST_NAME", "PERSONAL_STATE", "PERSONAL_ADDRESS"]);
        assert_eq!(table.value(0, "FIRST_NAME"), Some("Ann"));
    }

    #[test]
    fn empty_cells_are_missing_and_values_trimmed() {
        let table = sample();
        assert_eq!(table.value(1, "PERSONAL_ADDRESS"), None);
        assert_eq!(table.value(2, "PERSONAL_ADDRESS"), Some("2 Oak Ave"));
        assert_eq!(table.value(0, "NOPE"), None);
        assert_eq!(table.value(99, "FIRST_NAME"), None);
    }

    #[test]
    fn squares_up_ragged_rows() {
        let table = LeadTable::from_csv_reader("A,B,C\n1\n1,2,3,4\n".as_bytes()).unwrap();
        assert_eq!(table.rows()[0], ["1", "", ""]);
        assert_eq!(table.rows()[1], ["1", "2", "3"]);
    }

    #[test]
    fn filters_rows() {
        let table = sample().filter_rows(|row| row.get("PERSONAL_ADDRESS").is_some());
        assert_eq!(table.len(), 2);
        assert_eq!(table.value(1, "FIRST_NAME"), Some("Cy"));
    }

    #[test]
    fn selects_columns_in_order() {
        let table = sample().select(&["PERSONAL_STATE", "MISSING", "FIRST_NAME"]);
        assert_eq!(table.headers(), ["PERSONAL_STATE", "MISSING", "FIRST_NAME"]);
        assert_eq!(table.rows()[0], ["IL", "", "Ann"]);
    }

    #[test]
    fn appends_and_replaces_columns() {
        let table = sample()
            .with_column("EXTRA", vec!["x".to_string(), "y".to_string()])
            .with_column("FIRST_NAME", vec!["A".to_string(); 3]);
        assert_eq!(table.headers().len(), 4);
        assert_eq!(table.value(1, "EXTRA"), Some("y"));
        assert_eq!(table.value(2, "EXTRA"), None);
        assert_eq!(table.value(2, "FIRST_NAME"), Some("A"));
    }

    #[test]
    fn groups_by_column() {
        let table = sample().with_column("PERSONAL_STATE", vec![
            "IL".to_string(),
            "WI".to_string(),
            String::new(),
        ]);
        let groups = table.group_by("PERSONAL_STATE", |s| Some(s.to_string()));
        assert_eq!(groups.keys().collect::<Vec<_>>(), ["IL", "UNKNOWN", "WI"]);
        assert_eq!(groups["IL"].len(), 1);
    }

    #[test]
    fn chunks_rows() {
        let table = sample();
        let chunks = table.chunks(2);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 2);
        assert_eq!(chunks[1].len(), 1);
        assert_eq!(table.chunks(3).len(), 1);
        assert_eq!(table.chunks(0).len(), 1);
    }

    #[test]
    fn row_helpers() {
        let table = sample();
        let row = table.iter().nth(1).unwrap();
        assert_eq!(row.index(), 1);
        assert_eq!(row.get_or_empty("PERSONAL_ADDRESS"), "");
        assert_eq!(row.first_of(&["PERSONAL_ADDRESS", "FIRST_NAME"]), Some("Bob"));
    }
}
