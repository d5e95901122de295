//! Dot-path addressing over JSON documents.
//!
//! A path is a dot-separated list of segments (`address.city`,
//! `friends.0.first`). On objects a segment is a key; on arrays it must be a
//! decimal index. The engine only ever touches a document through [`get`],
//! [`set`] and [`delete`].

use std::fmt;

use indexmap::IndexMap;

use crate::value::Value;

/// How far past the end of an array a write may land; the gap is padded with `null`.
pub const MAX_INDEX_GAP: usize = 1024;

/// Errors raised when a path cannot be used for writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path is empty
    Empty,

    /// The path contains an empty segment (`a..b`, `a.`)
    EmptySegment(String),

    /// A non-numeric segment was used on an array
    NotAnIndex { path: String, segment: String },

    /// An array write lands more than [`MAX_INDEX_GAP`] past the end
    IndexOutOfRange { path: String, index: usize },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Empty => write!(f, "Path is empty"),
            PathError::EmptySegment(path) => write!(f, "Path '{}' contains an empty segment", path),
            PathError::NotAnIndex { path, segment } => write!(
                f,
                "Path '{}': segment '{}' is not an array index",
                path, segment
            ),
            PathError::IndexOutOfRange { path, index } => write!(
                f,
                "Path '{}': index {} is too far past the end of the array",
                path, index
            ),
        }
    }
}

impl std::error::Error for PathError {}

fn segments(path: &str) -> Result<Vec<&str>, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(PathError::EmptySegment(path.to_string()));
    }
    Ok(segments)
}

fn as_index(segment: &str) -> Option<usize> {
    if segment.bytes().all(|b| b.is_ascii_digit()) {
        segment.parse().ok()
    } else {
        None
    }
}

/// Looks up the value at `path`. The empty path addresses the document itself.
pub fn get<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(document);
    }

    path.split('.').try_fold(document, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(arr) => as_index(segment).and_then(|i| arr.get(i)),
        _ => None,
    })
}

/// Writes `value` at `path` and returns the updated document.
///
/// Missing or scalar intermediates are replaced by a container: an array when
/// the segment that addresses into it is numeric, an object otherwise. Array
/// writes past the end pad with `null`, up to [`MAX_INDEX_GAP`] elements.
pub fn set(mut document: Value, path: &str, value: Value) -> Result<Value, PathError> {
    let segments = segments(path)?;
    set_at(&mut document, &segments, value, path)?;
    Ok(document)
}

fn set_at(current: &mut Value, path: &[&str], value: Value, full: &str) -> Result<(), PathError> {
    let Some((segment, rest)) = path.split_first() else {
        *current = value;
        return Ok(());
    };

    match current {
        Value::Object(map) => {
            let child = map.entry(segment.to_string()).or_insert(Value::Null);
            set_at(child, rest, value, full)
        }
        Value::Array(arr) => {
            let index = as_index(segment).ok_or_else(|| PathError::NotAnIndex {
                path: full.to_string(),
                segment: segment.to_string(),
            })?;
            if index.saturating_sub(arr.len()) > MAX_INDEX_GAP {
                return Err(PathError::IndexOutOfRange {
                    path: full.to_string(),
                    index,
                });
            }
            while arr.len() <= index {
                arr.push(Value::Null);
            }
            set_at(&mut arr[index], rest, value, full)
        }
        other => {
            *other = if as_index(segment).is_some() {
                Value::Array(vec![])
            } else {
                Value::Object(IndexMap::new())
            };
            set_at(other, path, value, full)
        }
    }
}

/// Removes the field at `path` and returns the updated document.
/// Deleting a path that does not exist is a no-op.
pub fn delete(mut document: Value, path: &str) -> Value {
    if let Ok(segments) = segments(path) {
        delete_at(&mut document, &segments);
    }
    document
}

fn delete_at(current: &mut Value, path: &[&str]) {
    let Some((segment, rest)) = path.split_first() else {
        return;
    };

    match current {
        Value::Object(map) => {
            if rest.is_empty() {
                map.shift_remove(*segment);
            } else if let Some(child) = map.get_mut(*segment) {
                delete_at(child, rest);
            }
        }
        Value::Array(arr) => {
            let Some(index) = as_index(segment) else {
                return;
            };
            if index >= arr.len() {
                return;
            }
            if rest.is_empty() {
                arr.remove(index);
            } else {
                delete_at(&mut arr[index], rest);
            }
        }
        _ => {} // no-op
    }
}

/// Decodes a JSON document.
pub fn from_slice(bytes: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice::<serde_json::Value>(bytes).map(Value::from)
}

/// Encodes a document as compact JSON, keeping key order.
pub fn to_vec(document: Value) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&serde_json::Value::from(document))
}
