//! Non-interactive output: the filtered table as tab-separated text.
//!
//! Cells holding a tab, a quote or a line break are quoted, so free-text descriptions
//! never split a row.

use crate::columns::ColumnVisibility;
use crate::dataset::record::DiveRecord;
use crate::error::Result;
use std::io::Write;

/// Write a header record and one record per dive, visible columns only.
pub fn write_table<W: Write>(
    out: &mut W,
    rows: &[&DiveRecord],
    columns: &ColumnVisibility,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(out);
    write_rows(&mut writer, rows, columns)?;
    writer.flush()?;
    Ok(())
}

fn write_rows<W: Write>(
    writer: &mut csv::Writer<W>,
    rows: &[&DiveRecord],
    columns: &ColumnVisibility,
) -> Result<()> {
    let columns = columns.visible_columns();
    writer.write_record(columns.iter().map(|c| c.label))?;

    for record in rows {
        writer.write_record(columns.iter().map(|c| c.cell(record)))?;
    }
    Ok(())
}
