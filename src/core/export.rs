// LogSniff - core/export.rs
//
// Text, CSV, and JSON output of discovered log files.
// Writes to any Write trait object; `target` names the destination in errors.

use crate::core::model::DiscoveredLog;
use crate::util::error::ExportError;
use std::io::{BufWriter, Write};

/// Output encodings for a list of discovered logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One path per line.
    #[default]
    Text,
    Json,
    Csv,
}

/// Write `logs` in `format`. Returns the number of records written.
pub fn export<W: Write>(
    format: OutputFormat,
    logs: &[DiscoveredLog],
    writer: W,
    target: &str,
) -> Result<usize, ExportError> {
    match format {
        OutputFormat::Text => export_text(logs, writer, target),
        OutputFormat::Json => export_json(logs, writer, target),
        OutputFormat::Csv => export_csv(logs, writer, target),
    }
}

/// One path per line, no header.
pub fn export_text<W: Write>(
    logs: &[DiscoveredLog],
    writer: W,
    target: &str,
) -> Result<usize, ExportError> {
    let io_err = |source| ExportError::Io {
        target: target.to_string(),
        source,
    };

    let mut out = BufWriter::new(writer);
    for log in logs {
        writeln!(out, "{}", log.path.display()).map_err(io_err)?;
    }
    out.flush().map_err(io_err)?;
    Ok(logs.len())
}

/// Writes: path, matched_by
pub fn export_csv<W: Write>(
    logs: &[DiscoveredLog],
    writer: W,
    target: &str,
) -> Result<usize, ExportError> {
    let csv_err = |source| ExportError::Csv {
        target: target.to_string(),
        source,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["path", "matched_by"])
        .map_err(csv_err)?;

    for log in logs {
        csv_writer
            .write_record([
                log.path.display().to_string().as_str(),
                log.matched_by.label(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|source| ExportError::Io {
        target: target.to_string(),
        source,
    })?;

    Ok(logs.len())
}

/// JSON array of `{ "path": ..., "matched_by": ... }` objects.
pub fn export_json<W: Write>(
    logs: &[DiscoveredLog],
    mut writer: W,
    target: &str,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(&mut writer, logs).map_err(|source| ExportError::Json {
        target: target.to_string(),
        source,
    })?;
    writeln!(writer).map_err(|source| ExportError::Io {
        target: target.to_string(),
        source,
    })?;
    Ok(logs.len())
}
