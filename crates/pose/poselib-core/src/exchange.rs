//! Library import/export as standalone JSON files.
//!
//! File shape: `{ "library_name": string, "poses": [ { "name": string, "data": string } ] }`.
//! `data` stays a JSON *string* holding the encoded pose payload, so files written by
//! older exporters load unchanged.
//!
//! Import is lenient per pose: missing or wrong-typed fields fall back to defaults
//! instead of rejecting the whole file. Only a non-object document or a non-array
//! `poses` value is a format error.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value as JsonValue};

use crate::error::{PoseError, Result};
use crate::store::{Library, Pose, Store};

pub const DEFAULT_IMPORTED_LIBRARY_NAME: &str = "Imported Library";
pub const DEFAULT_POSE_NAME: &str = "Unnamed Pose";
pub const EMPTY_POSE_DATA: &str = "{}";

#[derive(Serialize)]
struct LibraryFile<'a> {
    library_name: &'a str,
    poses: Vec<PoseEntry<'a>>,
}

#[derive(Serialize)]
struct PoseEntry<'a> {
    name: &'a str,
    data: &'a str,
}

/// Encode `library` in the export format, pretty-printed with four-space indents.
pub fn library_to_json(library: &Library) -> Result<String> {
    let file = LibraryFile {
        library_name: &library.name,
        poses: library
            .poses
            .iter()
            .map(|p| PoseEntry {
                name: &p.name,
                data: &p.data,
            })
            .collect(),
    };

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    file.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| PoseError::format(e.to_string()))
}

/// Decode an export document into a detached [`Library`] (first pose selected).
pub fn parse_library_json(s: &str) -> Result<Library> {
    let doc: JsonValue =
        serde_json::from_str(s).map_err(|e| PoseError::format(format!("parse error: {e}")))?;
    let JsonValue::Object(obj) = doc else {
        return Err(PoseError::format("expected a JSON object at the top level"));
    };

    let name = string_field(&obj, "library_name").unwrap_or(DEFAULT_IMPORTED_LIBRARY_NAME);

    let poses = match obj.get("poses") {
        None | Some(JsonValue::Null) => Vec::new(),
        Some(JsonValue::Array(items)) => items.iter().map(pose_from_entry).collect(),
        Some(_) => return Err(PoseError::format("'poses' must be an array")),
    };

    Ok(Library::with_poses(name, poses))
}

fn pose_from_entry(entry: &JsonValue) -> Pose {
    let obj = entry.as_object();
    let name = obj
        .and_then(|o| string_field(o, "name"))
        .unwrap_or(DEFAULT_POSE_NAME);
    let data = obj
        .and_then(|o| string_field(o, "data"))
        .unwrap_or(EMPTY_POSE_DATA);
    Pose::new(name, data)
}

fn string_field<'a>(obj: &'a Map<String, JsonValue>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(JsonValue::as_str)
}

/// Write `library` to `path`, replacing any existing file.
pub fn export_library(library: &Library, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let text = library_to_json(library)?;
    fs::write(path, text).map_err(|e| PoseError::io(path, e))?;
    log::info!(
        "exported library '{}' ({} poses) to {}",
        library.name,
        library.poses.len(),
        path.display()
    );
    Ok(())
}

/// Read a library file, append it to `store` and select it. Returns the new index.
///
/// `store` is untouched when reading or parsing fails.
pub fn import_library(store: &mut Store, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| PoseError::io(path, e))?;
    let library = parse_library_json(&text)?;
    log::info!(
        "imported library '{}' ({} poses) from {}",
        library.name,
        library.poses.len(),
        path.display()
    );
    Ok(store.push_library(library))
}
