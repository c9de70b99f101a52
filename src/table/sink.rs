// src/table/sink.rs

use csv::WriterBuilder;
use std::{fs::File, io::Write, path::Path};
use tracing::{debug, instrument};

use super::Table;
use crate::error::{GeocoderError, Result};

/// Write every row of `table` to `path`, truncating any existing file.
#[instrument(level = "info", skip(path, table), fields(path = %path.as_ref().display(), rows = table.len()))]
pub fn write_table<P: AsRef<Path>>(path: P, table: &Table) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| GeocoderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_to(file, table)?;
    debug!("wrote table");
    Ok(())
}

/// Same as [`write_table`] over any writer. Absent cells become empty fields.
pub fn write_to<W: Write>(writer: W, table: &Table) -> Result<()> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);
    for row in table.rows() {
        wtr.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::read_table;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn absent_cells_are_blank_fields() -> Result<()> {
        let table = Table::new(vec![
            vec![Some("Name".into()), Some("Latitude".into())],
            vec![Some("Bob".into()), None],
        ]);
        let mut out = Vec::new();
        write_to(&mut out, &table)?;

        assert_eq!(String::from_utf8(out)?, "Name,Latitude\nBob,\n");
        Ok(())
    }

    #[test]
    fn quotes_fields_with_delimiters() -> Result<()> {
        let table = Table::from_strings(vec![vec!["10 Downing St, London", "x"]]);
        let mut out = Vec::new();
        write_to(&mut out, &table)?;

        assert_eq!(String::from_utf8(out)?, "\"10 Downing St, London\",x\n");
        Ok(())
    }

    #[test]
    fn file_written_then_read_back_keeps_layout() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.csv");
        let table = Table::from_strings(vec![
            vec!["Name", "Address", "Latitude", "Longitude"],
            vec!["Alice", "1 Main St", "40.0", "-74.0"],
        ]);

        write_table(&path, &table)?;
        assert_eq!(read_table(&path)?, table);
        Ok(())
    }
}
