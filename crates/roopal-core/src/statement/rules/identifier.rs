//! Invoice identifiers derived from file names.

use std::path::Path;

use uuid::Uuid;

use super::patterns::UUID_V4;

/// Find a version-4 shaped UUID in the file name (not the directory) of `path`.
pub fn identifier_from_file_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    UUID_V4.find(stem).map(|m| m.as_str().to_string())
}

/// Generate a fresh random version-4 identifier.
pub fn new_identifier() -> String {
    Uuid::new_v4().to_string()
}

/// Identifier for a document: taken from its file name, or freshly generated.
pub fn resolve_identifier(path: &Path) -> String {
    identifier_from_file_name(path).unwrap_or_else(new_identifier)
}
