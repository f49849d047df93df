// Pack file loading. A pack is a JSON object bundling chip and/or program
// records; records themselves stay opaque JSON objects and are forwarded to
// the server untouched.

use crate::error::PackError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

/// One chip or program record, exactly as it appears in the pack.
pub type Record = Map<String, Value>;

/// Which register call a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Chip,
    Program,
}

impl RecordKind {
    /// Tag sent in the `type` field of the register payload.
    pub fn wire_tag(self) -> &'static str {
        match self {
            RecordKind::Chip => "chip",
            RecordKind::Program => "program",
        }
    }

    /// Short label used in progress output.
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Chip => "chip",
            RecordKind::Program => "prog",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_tag())
    }
}

/// Parsed pack. Missing or `null` arrays are treated as empty.
#[derive(Debug, Default, Deserialize)]
pub struct Pack {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub chips: Vec<Record>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub programs: Vec<Record>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Record>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Record>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Pack {
    /// Read and validate a pack file.
    ///
    /// The top-level value must be an object; anything else (including an
    /// array literal) is reported as [`PackError::Shape`]. Emptiness is not
    /// checked here, see [`Pack::is_empty`].
    pub fn load(path: &Path) -> Result<Self, PackError> {
        let text = std::fs::read_to_string(path).map_err(|source| PackError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&text).map_err(|source| PackError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_value(path, value)
    }

    fn from_value(path: &Path, value: Value) -> Result<Self, PackError> {
        if !value.is_object() {
            return Err(PackError::Shape {
                path: path.to_path_buf(),
                found: json_type_name(&value),
            });
        }
        serde_json::from_value(value).map_err(|source| PackError::Records {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty() && self.programs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chips.len() + self.programs.len()
    }

    /// All records in upload order: chips first, then programs, each in file
    /// order. Programs may reference chips by name, so the server needs the
    /// chips registered first.
    pub fn records(&self) -> impl Iterator<Item = (RecordKind, &Record)> {
        self.chips
            .iter()
            .map(|c| (RecordKind::Chip, c))
            .chain(self.programs.iter().map(|p| (RecordKind::Program, p)))
    }
}

/// Display name of a record.
pub fn record_name(record: &Record) -> Option<String> {
    display_field(record, "name")
}

/// Field rendered for display: strings as is, other non-null values as
/// compact JSON, `null` or absent as `None`.
pub(crate) fn display_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
