//! export::writer
//!
//! Pretty JSON output with atomic replacement.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::ExportError;

/// Indentation used for every exported file.
const INDENT: &[u8] = b"    ";

/// Serialize `value` as JSON indented with four spaces.
///
/// # Example
///
/// ```
/// use wooflat::export::to_pretty_json;
///
/// let bytes = to_pretty_json(&serde_json::json!({"label": "Books"})).unwrap();
/// assert_eq!(String::from_utf8(bytes).unwrap(), "{\n    \"label\": \"Books\"\n}");
/// ```
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| ExportError::Serialize(e.to_string()))?;
    Ok(buf)
}

/// Write `value` as pretty JSON to `path`.
///
/// Creates parent directories if needed. Writes to a temp file in the same
/// directory and renames it over `path`, so readers never see a partial file.
/// The temp file is removed if any step fails.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ExportError> {
    let contents = to_pretty_json(value)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExportError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("json.tmp");
    if let Err(e) = write_and_rename(&temp_path, path, &contents) {
        if temp_path.exists() {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                tracing::warn!(path = %temp_path.display(), error = %cleanup, "could not remove temp file");
            }
        }
        return Err(e);
    }
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote export file");
    Ok(())
}

fn write_and_rename(temp_path: &Path, path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    let io_err = |p: &Path| {
        let p = p.to_path_buf();
        move |e: std::io::Error| ExportError::Io { path: p, source: e }
    };

    let mut file = fs::File::create(temp_path).map_err(io_err(temp_path))?;
    file.write_all(contents).map_err(io_err(temp_path))?;
    file.sync_all().map_err(io_err(temp_path))?;
    drop(file);

    fs::rename(temp_path, path).map_err(io_err(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{FlatEntry, SlugRef};
    use tempfile::TempDir;

    #[test]
    fn flat_entries_use_four_space_indent() {
        let entries = vec![FlatEntry {
            label: "Books".into(),
            value: vec![SlugRef::new("books")],
        }];
        let text = String::from_utf8(to_pretty_json(&entries).unwrap()).unwrap();
        let expected = "[\n    {\n        \"label\": \"Books\",\n        \"value\": [\n            {\n                \"slug\": \"books\"\n            }\n        ]\n    }\n]";
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_list_is_compact() {
        let entries: Vec<FlatEntry> = Vec::new();
        assert_eq!(to_pretty_json(&entries).unwrap(), b"[]");
    }

    #[test]
    fn write_creates_directories_and_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/out.json");

        write_json_atomic(&path, &serde_json::json!([1, 2])).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[\n    1,\n    2\n]");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn write_replaces_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.json");
        fs::write(&path, "old").unwrap();

        write_json_atomic(&path, &serde_json::json!("new")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "\"new\"");
    }

    #[test]
    fn failed_write_removes_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.txt"), "x").unwrap();

        let err = write_json_atomic(&path, &serde_json::json!([1])).unwrap_err();

        assert!(matches!(err, ExportError::Io { path: ref failed, .. } if *failed == path));
        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.join("keep.txt").exists());
    }
}
