//! Filesystem adapter for ASC exports
//!
//! Discovers `.asc` files from CLI inputs (files, directories or glob
//! patterns) and reads them as Latin-1 text, the fixed encoding ALV software
//! writes. Everything here sits outside the pure parsing core.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::constants::{ASC_FILE_EXTENSION, GLOB_META_CHARS};
use crate::{Error, Result};

/// Decoded contents of one ASC file
#[derive(Debug, Clone, PartialEq)]
pub struct AscSource {
    /// File name component, used as the record's source name
    pub filename: String,

    /// Decoded lines without line terminators
    pub lines: Vec<String>,
}

impl AscSource {
    pub fn new(filename: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            filename: filename.into(),
            lines,
        }
    }

    /// Build a source from raw file bytes
    pub fn from_bytes(filename: impl Into<String>, bytes: &[u8]) -> Self {
        let text = decode_latin1(bytes);
        Self::new(filename, text.lines().map(str::to_string).collect())
    }
}

/// Decode Latin-1 (ISO 8859-1) bytes; every byte maps to the code point of the same value
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| char::from(byte)).collect()
}

/// Read and decode one ASC file
pub fn read_asc_file(path: &Path) -> Result<AscSource> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let source = AscSource::from_bytes(filename, &bytes);
    debug!(
        "Read {} ({} bytes, {} lines)",
        path.display(),
        bytes.len(),
        source.lines.len()
    );
    Ok(source)
}

/// Whether a path has the ASC extension (case-insensitive)
pub fn is_asc_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ASC_FILE_EXTENSION))
}

/// Resolve CLI inputs into a sorted, de-duplicated list of ASC files
///
/// Files are taken as given, directories are searched recursively for ASC
/// files, and inputs containing glob metacharacters are expanded as patterns.
pub fn discover_asc_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for input in inputs {
        let input_str = input.to_string_lossy();

        if input.is_file() {
            files.insert(input.clone());
        } else if input.is_dir() {
            let found = walk_directory(input)?;
            debug!("Found {} ASC files under {}", found.len(), input.display());
            files.extend(found);
        } else if input_str.contains(GLOB_META_CHARS) {
            let found = expand_pattern(&input_str)?;
            debug!("Pattern {} matched {} ASC files", input_str, found.len());
            files.extend(found);
        } else {
            return Err(Error::file_not_found(input.display().to_string()));
        }
    }

    info!("Discovered {} ASC files", files.len());
    Ok(files.into_iter().collect())
}

fn walk_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(|e| {
            Error::directory_traversal(format!("Failed to walk {}", dir.display()), e)
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && is_asc_file(path) {
            found.push(path.to_path_buf());
        }
    }

    Ok(found)
}

fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|e| Error::glob_pattern(pattern, e))?;

    let mut found = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| {
            let message = format!("Failed to read {}", e.path().display());
            Error::io(message, std::io::Error::from(e))
        })?;
        if path.is_file() && is_asc_file(&path) {
            found.push(path);
        }
    }

    Ok(found)
}
