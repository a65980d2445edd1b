//! JSON rendering and file output.
//!
//! The document is written to a temporary file next to the destination and
//! renamed over it once complete, so an interrupted or failed write never
//! leaves a truncated file at the destination.

use std::io::Write;
use std::path::Path;

use crate::error::{OutputError, OutputResult};
use crate::models::JobRecord;

/// Default output filename when none is given.
pub const DEFAULT_OUTPUT_FILE: &str = "career_compass_data.json";

/// Render records as a pretty-printed JSON array (2-space indent).
pub fn render_json(records: &[JobRecord]) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write `content` to `path` atomically.
pub fn write_atomic(path: &Path, content: &str) -> OutputResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_err = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".career_compass")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    // Temp files are created owner-only; the result should look like any other file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| OutputError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

/// Render and write records, returning the number of bytes written.
pub fn write_records(path: &Path, records: &[JobRecord]) -> OutputResult<usize> {
    let json = render_json(records)?;
    write_atomic(path, &json)?;
    Ok(json.len())
}
