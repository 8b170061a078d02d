use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::io::{Read, Write};
use tracing::debug;

use crate::error::ImportError;
use keyhole_core::{BulkImporter, ImportReport, ImportRow};

/// Input column holding the long URL. Matching is case-insensitive and
/// whitespace-trimmed.
pub const URL_COLUMN: &str = "long_url";

/// Column appended to the output dataset.
pub const SHORT_URL_COLUMN: &str = "short_url";

/// A parsed input dataset: headers, data records, and the resolved URL
/// column index.
#[derive(Debug, Clone)]
pub struct UrlTable {
    headers: StringRecord,
    records: Vec<StringRecord>,
    url_column: usize,
}

impl UrlTable {
    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Extracts the pipeline rows, one per data record in order.
    ///
    /// Records too short to reach the URL column yield rows with no URL
    /// rather than being dropped.
    pub fn rows(&self) -> Vec<ImportRow> {
        self.records
            .iter()
            .map(|record| match record.get(self.url_column) {
                Some(cell) if !cell.is_empty() => ImportRow::new(cell),
                _ => ImportRow::empty(),
            })
            .collect()
    }
}

/// Finds the URL column among the headers.
///
/// Header names are compared trimmed and lowercased, so ` Long_URL `
/// matches. The whole batch is rejected here, before any row is processed,
/// when no header matches.
pub fn resolve_url_column(headers: &StringRecord) -> Result<usize, ImportError> {
    headers
        .iter()
        .position(|header| header.trim().to_lowercase() == URL_COLUMN)
        .ok_or_else(|| ImportError::MissingColumn {
            column: URL_COLUMN,
            headers: headers.iter().collect::<Vec<_>>().join(", "),
        })
}

/// Reads a CSV dataset and resolves its URL column.
pub fn read_table<R: Read>(reader: R) -> Result<UrlTable, ImportError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let url_column = resolve_url_column(&headers)?;

    let mut records = Vec::new();
    for result in csv_reader.into_records() {
        records.push(result?);
    }

    debug!(rows = records.len(), url_column, "loaded input dataset");
    Ok(UrlTable {
        headers,
        records,
        url_column,
    })
}

/// Writes the dataset back out with a `short_url` column appended.
///
/// Every input column and every row is preserved in order; skipped and
/// failed rows get an empty short URL cell.
pub fn write_augmented<W: Write>(
    table: &UrlTable,
    report: &ImportReport,
    writer: W,
) -> Result<(), ImportError> {
    let mut csv_writer = WriterBuilder::new().flexible(true).from_writer(writer);

    let mut headers = table.headers.clone();
    headers.push_field(SHORT_URL_COLUMN);
    csv_writer.write_record(&headers)?;

    for (record, outcome) in table.records.iter().zip(&report.outcomes) {
        let mut row = record.clone();
        row.push_field(outcome.short_url().unwrap_or(""));
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Runs a full CSV import: parse, pipeline, augment.
pub async fn import_csv<R: Read, W: Write>(
    importer: &dyn BulkImporter,
    input: R,
    output: W,
) -> Result<ImportReport, ImportError> {
    let table = read_table(input)?;
    let report = importer.import_rows(table.rows()).await;
    write_augmented(&table, &report, output)?;
    Ok(report)
}
