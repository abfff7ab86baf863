//! Loading option bags and base attributes for the command line.

use navclass_core::Attributes;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::config::toml_to_json;

/// Input errors
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("{0} must contain an object at the top level")]
    NotAnObject(String),
}

/// Load an options bag from a JSON or TOML file, or JSON on stdin for `-`.
///
/// TOML is picked by the `.toml` extension; everything else is read as JSON.
pub fn load_options(path: &Path) -> Result<Value, InputError> {
    let label = path.display().to_string();
    let contents = if label == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| InputError::Io {
                path: label.clone(),
                message: e.to_string(),
            })?;
        buf
    } else {
        fs::read_to_string(path).map_err(|e| InputError::Io {
            path: label.clone(),
            message: e.to_string(),
        })?
    };

    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    let value = if is_toml {
        parse_toml_options(&contents, &label)?
    } else {
        serde_json::from_str(&contents).map_err(|e| InputError::Parse {
            path: label.clone(),
            message: e.to_string(),
        })?
    };

    if !value.is_object() {
        return Err(InputError::NotAnObject(label));
    }
    Ok(value)
}

fn parse_toml_options(contents: &str, label: &str) -> Result<Value, InputError> {
    let table: toml::Value = toml::from_str(contents).map_err(|e| InputError::Parse {
        path: label.to_string(),
        message: e.to_string(),
    })?;
    Ok(toml_to_json(table))
}

/// Parse base attributes given as a JSON object of strings.
pub fn parse_attributes(json: &str) -> Result<Attributes, InputError> {
    serde_json::from_str(json).map_err(|e| InputError::Parse {
        path: "--atts".to_string(),
        message: e.to_string(),
    })
}
