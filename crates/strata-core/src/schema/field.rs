use serde::{Deserialize, Serialize};

/// A single column: its name and the raw DDL fragment that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Column name.
    pub name: String,

    /// Type and constraints, e.g. `VARCHAR(50) NOT NULL`.
    #[serde(rename = "type")]
    pub sql_type: String,
}

impl FieldDef {
    /// Create a new field definition.
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
        }
    }

    /// Render the column line without indentation or trailing comma.
    pub fn to_sql(&self) -> String {
        format!("{} {}", self.name, self.sql_type)
    }
}

impl<N: Into<String>, T: Into<String>> From<(N, T)> for FieldDef {
    fn from((name, sql_type): (N, T)) -> Self {
        Self::new(name, sql_type)
    }
}
