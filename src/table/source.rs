// src/table/source.rs

use csv::ReaderBuilder;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, instrument};

use super::{Row, Table};
use crate::error::{GeocoderError, Result};

/// Load a delimited file into memory, header row included, in stored order.
#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| GeocoderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_from(file)?;
    debug!(rows = table.len(), "loaded table");
    Ok(table)
}

/// Same as [`read_table`] over any reader.
pub fn read_from<R: Read>(reader: R) -> Result<Table> {
    // row 0 is data to us, not a csv header
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row: Row = record.iter().map(|s| Some(s.to_string())).collect();
        rows.push(row);
    }
    Ok(Table::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn keeps_header_and_order() -> Result<()> {
        let data = "Name,Address\nAlice,1 Main St\nBob,\n";
        let table = read_from(Cursor::new(data))?;

        assert_eq!(
            table,
            Table::from_strings(vec![
                vec!["Name", "Address"],
                vec!["Alice", "1 Main St"],
                vec!["Bob", ""],
            ])
        );
        Ok(())
    }

    #[test]
    fn quoted_fields_and_ragged_rows() -> Result<()> {
        let data = "id,address,note\n1,\"10 Downing St, London\"\n2,\"\",x,extra\n";
        let table = read_from(Cursor::new(data))?;

        assert_eq!(table.len(), 3);
        assert_eq!(table.cell(1, 1), Some("10 Downing St, London"));
        assert_eq!(table.rows()[1].len(), 2);
        assert_eq!(table.rows()[2].len(), 4);
        assert_eq!(table.cell(2, 1), Some(""));
        Ok(())
    }

    #[test]
    fn reads_from_disk() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(b"Address\n221B Baker Street\n")?;

        let table = read_table(tmp.path())?;
        assert_eq!(table.cell(1, 0), Some("221B Baker Street"));
        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_table("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, GeocoderError::Io { .. }));
    }
}
