//! Write a [`CatalogTable`] to CSV or Parquet.
//!
//! Both layouts have a `name` column followed by one nullable float column
//! per catalog field; missing values are empty cells / nulls.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::catalog::table::CatalogTable;

/// Export dispatching on the file extension (`csv`, `parquet`/`pq`).
pub fn export_table(table: &CatalogTable, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => write_csv(table, path),
        "parquet" | "pq" => write_parquet(table, path),
        other => bail!("Unsupported export extension: .{other}"),
    }
}

/// Column header with its unit, e.g. `ra [deg]`.
fn header(table: &CatalogTable, column: &str) -> String {
    match table.unit_of(column) {
        Some(unit) => format!("{column} [{unit}]"),
        None => column.to_string(),
    }
}

pub fn write_csv(table: &CatalogTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut head = vec!["name".to_string()];
    head.extend(table.columns.iter().map(|c| header(table, c)));
    writer.write_record(&head).context("writing CSV header")?;

    for row in &table.rows {
        let mut record = vec![row.name.clone()];
        record.extend(
            table
                .columns
                .iter()
                .map(|c| row.value(c).map(|v| v.to_string()).unwrap_or_default()),
        );
        writer
            .write_record(&record)
            .with_context(|| format!("writing CSV row {}", row.name))?;
    }
    writer.flush().context("flushing CSV")?;
    log::info!("Exported {} rows to {}", table.len(), path.display());
    Ok(())
}

fn record_batch(table: &CatalogTable) -> Result<RecordBatch> {
    let mut fields = vec![Field::new("name", DataType::Utf8, false)];
    let mut arrays: Vec<ArrayRef> = vec![Arc::new(StringArray::from(
        table.rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
    ))];

    for column in &table.columns {
        fields.push(Field::new(header(table, column), DataType::Float64, true));
        arrays.push(Arc::new(Float64Array::from(table.column(column))));
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
        .context("building record batch")
}

pub fn write_parquet(table: &CatalogTable, path: &Path) -> Result<()> {
    let batch = record_batch(table)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    log::info!("Exported {} rows to {}", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::{GalaxyDoc, Measurement};
    use crate::catalog::table::{CatalogRow, Selection};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    fn table() -> CatalogTable {
        let a = GalaxyDoc::new("A")
            .with_field("ra", vec![Measurement::new(1.5, "R").with_unit("deg")])
            .with_field("radial_velocity", vec![Measurement::new(999.9, "R")]);
        let b = GalaxyDoc::new("B").with_field("ra", vec![Measurement::new(2.5, "R").with_unit("deg")]);
        CatalogTable::from_rows(vec![
            CatalogRow::from_doc(&a, &Selection::new()),
            CatalogRow::from_doc(&b, &Selection::new()),
        ])
    }

    #[test]
    fn csv_has_units_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        export_table(&table(), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, vec!["name", "ra [deg]", "radial_velocity"]);
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][1], "1.5");
        assert_eq!(&rows[0][2], "");
        assert_eq!(&rows[1][0], "B");
    }

    #[test]
    fn parquet_round_trips_row_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.parquet");
        export_table(&table(), &path).unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file).unwrap().build().unwrap();
        let rows: usize = reader.map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(rows, 2);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(export_table(&table(), &dir.path().join("out.xlsx")).is_err());
    }
}
