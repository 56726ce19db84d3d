use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use scraper_core::DataRow;

use crate::persist::{AtomicFileWriter, PersistError};

pub const CSV_HEADER: &str = "School Name,Number,Address,Website,Email";
pub const CSV_FILE_PREFIX: &str = "scraped_data_";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// CSV text for the full result set, or `None` when there are no rows.
///
/// Only the five display columns are written. Every field is quoted;
/// lines are joined with `\n` without a trailing newline.
pub fn render_csv(rows: &[DataRow]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for row in rows {
        let fields = [
            row.school_name.as_str(),
            row.number.as_str(),
            row.address.as_str(),
            row.website.as_str(),
            row.email.as_deref().unwrap_or(""),
        ];
        let line = fields
            .iter()
            .map(|field| quote(field))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }
    Some(lines.join("\n"))
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Write `scraped_data_<token>.csv` into `output_dir`.
///
/// Returns `Ok(None)` without touching the filesystem when there are no rows.
pub fn export_csv(
    output_dir: &Path,
    rows: &[DataRow],
    token: &str,
) -> Result<Option<PathBuf>, ExportError> {
    let Some(content) = render_csv(rows) else {
        return Ok(None);
    };

    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    let path = writer.write_new(&format!("{CSV_FILE_PREFIX}{token}"), "csv", &content)?;
    engine_info!("Exported {} rows to {:?}", rows.len(), path);
    Ok(Some(path))
}
