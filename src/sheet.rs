//! FedRAMP baseline sheet — download and control extraction.
//!
//! The published workbook carries one worksheet per baseline. The moderate
//! sheet's control identifiers sit in an unlabeled column: the first grid row
//! is a merged title row (empty above the control column), the second row
//! holds the real column titles, and the data starts on the third.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Published FedRAMP baseline workbook.
pub const FEDRAMP_SHEET_URL: &str =
    "https://www.fedramp.gov/assets/resources/documents/FedRAMP_Security_Controls_Baseline.xlsx";

const SHEET_FILENAME: &str = "fedrampcontrols.xlsx";
const BASELINE_SHEET: &str = "Moderate Baseline Controls";

/// Zero-based grid column holding the control identifiers.
const CONTROL_COLUMN: usize = 3;

// ─── Fetching ────────────────────────────────────────────────────────────────

/// Download the baseline workbook into the workspace.
///
/// The response body is written out as-is: no status check, no timeout, no
/// retry. A non-success response lands on disk unchanged and surfaces as a
/// parse failure downstream.
pub async fn fetch_sheet(workspace: &Path) -> Result<PathBuf> {
    info!(url = FEDRAMP_SHEET_URL, "fetching FedRAMP controls sheet");

    let client = build_client()?;
    let dest = workspace.join(SHEET_FILENAME);

    let mut file = tokio::fs::File::create(&dest)
        .await
        .context("failed to create sheet file")?;

    let mut response = client
        .get(FEDRAMP_SHEET_URL)
        .send()
        .await
        .context("failed to fetch FedRAMP controls sheet")?;

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)
            .await
            .context("failed to write sheet chunk")?;
    }
    file.flush().await?;

    Ok(dest)
}

fn build_client() -> Result<reqwest::Client> {
    // No timeout: a stalled connection blocks the run indefinitely.
    reqwest::Client::builder()
        .build()
        .context("failed to build HTTP client")
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// Read the moderate-baseline control identifiers from the workbook.
///
/// Fatal if the worksheet is missing or the control column has grown a label
/// in the title row — the sheet layout changed and the fixed offset no
/// longer holds.
pub fn moderate_controls(sheet_path: &Path) -> Result<Vec<String>> {
    let mut workbook = open_workbook_auto(sheet_path)
        .with_context(|| format!("failed to open workbook at {}", sheet_path.display()))?;
    let range = workbook
        .worksheet_range(BASELINE_SHEET)
        .with_context(|| format!("worksheet '{BASELINE_SHEET}' not found"))?;
    let controls = extract_controls(&range)?;
    debug!(count = controls.len(), "extracted moderate baseline controls");
    Ok(controls)
}

/// Pull the control column out of the sheet grid.
///
/// Row 0 is the title row (control column must be unlabeled there), row 1 the
/// column titles, rows 2.. the data. Empty cells are skipped; duplicates pass
/// through in sheet order.
fn extract_controls(range: &Range<Data>) -> Result<Vec<String>> {
    let mut rows = range.rows();

    let title_row = rows.next().context("worksheet is empty")?;
    if let Some(cell) = title_row.get(CONTROL_COLUMN) {
        ensure!(
            matches!(cell, Data::Empty),
            "control column is labeled '{cell}' in the title row; sheet layout changed"
        );
    }

    // Column-titles row, not a data value.
    let _column_titles = rows.next();

    Ok(rows
        .filter_map(|row| row.get(CONTROL_COLUMN))
        .filter_map(cell_text)
        .collect())
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        other => Some(other.to_string()),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
