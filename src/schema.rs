//! Schema loading and structural validation of API payloads.
//!
//! The published schema lives as a JSON document at a fixed relative path and
//! is compiled per validation. Any `$schema` marker is removed before
//! compilation, matching how the suite has always consumed the document.

use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};

/// Fixed relative path of the published countries schema.
pub const SCHEMA_PATH: &str = "schemas/restcountries.json";

/// Load a schema document from `path`.
///
/// # Errors
///
/// Returns [`Error::SchemaFile`] when the file cannot be read (including when
/// it does not exist) and [`Error::SchemaParse`] when it is not valid JSON.
pub fn load(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| Error::SchemaFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| Error::SchemaParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Validate `instance` against `schema`.
///
/// All findings are collected, not just the first, so a failure message names
/// every violating location.
///
/// # Errors
///
/// Returns [`Error::SchemaValidation`] listing each finding, or a single
/// compilation finding when the schema itself is malformed.
pub fn validate(schema: &Value, instance: &Value) -> Result<()> {
    let mut schema = schema.clone();
    if let Some(object) = schema.as_object_mut() {
        object.remove("$schema");
    }
    let validator = jsonschema::validator_for(&schema).map_err(|error| {
        Error::SchemaValidation {
            errors: vec![format!("schema did not compile: {error}")],
        }
    })?;
    let errors: Vec<String> = validator
        .iter_errors(instance)
        .map(|error| format!("{} at {}", error, error.instance_path()))
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::SchemaValidation { errors })
    }
}
