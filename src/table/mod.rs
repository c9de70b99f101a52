// src/table/mod.rs

pub mod sink;
pub mod source;

pub use sink::{write_table, write_to};
pub use source::{read_from, read_table};

/// One field. Everything read from disk is `Some`; `None` only appears
/// where the engine appends an empty-address sentinel.
pub type Cell = Option<String>;

pub type Row = Vec<Cell>;

/// An in-memory delimited table. Row 0 is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Build a table where every cell is present.
    pub fn from_strings<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|c| Some(c.into())).collect())
                .collect(),
        }
    }

    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (`row`, `col`) as text; `None` when missing or absent.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }
}
