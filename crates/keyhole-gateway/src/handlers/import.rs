use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::info;

use crate::error::Result;
use crate::state::AppState;
use keyhole_ingest::{read_table, write_augmented};

/// Handles the bulk upload path: CSV body in, augmented CSV out.
///
/// The response carries the same rows in the same order with a `short_url`
/// column appended. A dataset without a `long_url` column is rejected
/// before any row is processed.
pub async fn import_handler(State(state): State<AppState>, body: Bytes) -> Result<Response> {
    let table = read_table(body.as_ref())?;
    let report = state.importer().import_rows(table.rows()).await;

    info!(
        total = report.len(),
        shortened = report.shortened(),
        invalid = report.invalid(),
        failed = report.failed(),
        "processed upload"
    );

    let mut output = Vec::new();
    write_augmented(&table, &report, &mut output)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"short_links.csv\"",
            ),
        ],
        output,
    )
        .into_response())
}
