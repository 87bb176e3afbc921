mod document;
mod field;
mod table;

pub use document::{Document, DocumentBatch};
pub use field::FieldDef;
pub use table::TableSchema;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, StrataError};

/// Schema description file consumed by `strata generate`.
///
/// ```toml
/// [[tables]]
/// name = "users"
/// fields = [
///     { name = "id", type = "INT PRIMARY KEY" },
///     { name = "email", type = "VARCHAR(100)" },
/// ]
///
/// [[collections]]
/// name = "users"
/// documents = [{ name = "John", age = 30 }]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaFile {
    #[serde(default)]
    pub tables: Vec<TableSchema>,

    #[serde(default)]
    pub collections: Vec<DocumentBatch>,
}

impl SchemaFile {
    /// Load a schema description from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| StrataError::Config(format!("Failed to read schema file: {}", e)))?;

        Self::parse_toml(&content)
    }

    /// Parse a schema description from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| StrataError::Config(format!("Failed to parse schema: {}", e)))
    }
}
