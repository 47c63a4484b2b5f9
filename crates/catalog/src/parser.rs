//! Parser for catalog files.
//!
//! Two layouts are accepted:
//! - a single JSON array of offerings (`catalog.json`)
//! - one JSON object per line (`catalog.jsonl` / `.ndjson`), blank lines skipped
//!
//! The layout is picked from the file extension, falling back to sniffing the
//! first non-whitespace character (`[` means array).

use crate::error::{CatalogError, Result};
use crate::types::Offering;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read and parse a catalog file in either layout
pub fn parse_catalog_file(path: &Path) -> Result<Vec<Offering>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(e),
    })?;

    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let is_lines = match path.extension().and_then(|e| e.to_str()) {
        Some("jsonl") | Some("ndjson") => true,
        Some("json") => false,
        _ => !content.trim_start().starts_with('['),
    };

    if is_lines {
        parse_catalog_lines(&content, &file)
    } else {
        parse_catalog_json(&content, &file)
    }
}

/// Parse a JSON array of offerings
pub fn parse_catalog_json(content: &str, file: &str) -> Result<Vec<Offering>> {
    serde_json::from_str(content).map_err(|e| CatalogError::ParseError {
        file: file.to_string(),
        line: e.line(),
        reason: e.to_string(),
    })
}

/// Parse one offering per line
pub fn parse_catalog_lines(content: &str, file: &str) -> Result<Vec<Offering>> {
    let mut offerings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let offering: Offering =
            serde_json::from_str(line_trimmed).map_err(|e| CatalogError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: e.to_string(),
            })?;
        offerings.push(offering);
    }

    Ok(offerings)
}
