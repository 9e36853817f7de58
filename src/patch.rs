//! RFC 6902 JSON-Patch over a generic JSON tree.
//!
//! The typed DTO never sees the patch mechanism: the target is serialized to
//! a [`serde_json::Value`], each operation is applied in document order, and
//! the result is deserialized back into the DTO type. Any structural failure
//! along the way is a [`PatchError`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const APPLICATION_JSON_PATCH: &str = "application/json-patch+json";

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("invalid pointer '{0}'")]
    InvalidPointer(String),
    #[error("path '{0}' not found")]
    PathNotFound(String),
    #[error("invalid array index in '{0}'")]
    InvalidIndex(String),
    #[error("test failed at '{0}'")]
    TestFailed(String),
    #[error("patched document does not fit the target shape: {0}")]
    Shape(#[source] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOp {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: Value },
}

/// An ordered RFC 6902 patch document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPatch(pub Vec<PatchOp>);

/// Applies `patch` to `target`, yielding a new value of the same type.
pub fn apply<T>(patch: &JsonPatch, target: &T) -> Result<T, PatchError>
where
    T: Serialize + DeserializeOwned,
{
    let mut doc = serde_json::to_value(target).map_err(PatchError::Shape)?;
    for op in &patch.0 {
        apply_op(&mut doc, op)?;
    }
    serde_json::from_value(doc).map_err(PatchError::Shape)
}

fn apply_op(doc: &mut Value, op: &PatchOp) -> Result<(), PatchError> {
    match op {
        PatchOp::Add { path, value } => add(doc, path, value.clone()),
        PatchOp::Remove { path } => remove(doc, path).map(|_| ()),
        PatchOp::Replace { path, value } => replace(doc, path, value.clone()),
        PatchOp::Move { from, path } => {
            // A location cannot be moved into one of its own children.
            if path.starts_with(&format!("{from}/")) {
                return Err(PatchError::InvalidPointer(path.clone()));
            }
            let value = remove(doc, from)?;
            add(doc, path, value)
        }
        PatchOp::Copy { from, path } => {
            let value = lookup(doc, from)?.clone();
            add(doc, path, value)
        }
        PatchOp::Test { path, value } => {
            if lookup(doc, path)? == value {
                Ok(())
            } else {
                Err(PatchError::TestFailed(path.clone()))
            }
        }
    }
}

/// Splits a non-root pointer into its parent pointer and unescaped final
/// reference token.
fn split_parent(pointer: &str) -> Result<(&str, String), PatchError> {
    if !pointer.starts_with('/') {
        return Err(PatchError::InvalidPointer(pointer.to_string()));
    }
    let cut = pointer.rfind('/').unwrap_or(0);
    let token = pointer[cut + 1..].replace("~1", "/").replace("~0", "~");
    Ok((&pointer[..cut], token))
}

fn lookup<'a>(doc: &'a Value, pointer: &str) -> Result<&'a Value, PatchError> {
    doc.pointer(pointer)
        .ok_or_else(|| PatchError::PathNotFound(pointer.to_string()))
}

fn parse_index(token: &str, pointer: &str) -> Result<usize, PatchError> {
    token
        .parse()
        .map_err(|_| PatchError::InvalidIndex(pointer.to_string()))
}

fn add(doc: &mut Value, pointer: &str, value: Value) -> Result<(), PatchError> {
    if pointer.is_empty() {
        *doc = value;
        return Ok(());
    }
    let (parent, token) = split_parent(pointer)?;
    let parent = doc
        .pointer_mut(parent)
        .ok_or_else(|| PatchError::PathNotFound(pointer.to_string()))?;
    match parent {
        Value::Object(map) => {
            map.insert(token, value);
            Ok(())
        }
        Value::Array(items) => {
            if token == "-" {
                items.push(value);
            } else {
                let index = parse_index(&token, pointer)?;
                if index > items.len() {
                    return Err(PatchError::InvalidIndex(pointer.to_string()));
                }
                items.insert(index, value);
            }
            Ok(())
        }
        _ => Err(PatchError::PathNotFound(pointer.to_string())),
    }
}

fn remove(doc: &mut Value, pointer: &str) -> Result<Value, PatchError> {
    if pointer.is_empty() {
        return Err(PatchError::InvalidPointer(pointer.to_string()));
    }
    let (parent, token) = split_parent(pointer)?;
    let parent = doc
        .pointer_mut(parent)
        .ok_or_else(|| PatchError::PathNotFound(pointer.to_string()))?;
    match parent {
        Value::Object(map) => map
            .remove(&token)
            .ok_or_else(|| PatchError::PathNotFound(pointer.to_string())),
        Value::Array(items) => {
            let index = parse_index(&token, pointer)?;
            if index >= items.len() {
                return Err(PatchError::PathNotFound(pointer.to_string()));
            }
            Ok(items.remove(index))
        }
        _ => Err(PatchError::PathNotFound(pointer.to_string())),
    }
}

fn replace(doc: &mut Value, pointer: &str, value: Value) -> Result<(), PatchError> {
    let target = doc
        .pointer_mut(pointer)
        .ok_or_else(|| PatchError::PathNotFound(pointer.to_string()))?;
    *target = value;
    Ok(())
}
