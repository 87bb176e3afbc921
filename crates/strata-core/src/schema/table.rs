use serde::{Deserialize, Serialize};

use super::field::FieldDef;

/// A table to create: its name and columns in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name.
    pub name: String,

    /// Columns, rendered in this order.
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

impl TableSchema {
    /// Create an empty table schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a column.
    pub fn field(mut self, name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        self.fields.push(FieldDef::new(name, sql_type));
        self
    }

    /// Build a schema from `(name, type)` pairs.
    pub fn with_fields<I, F>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldDef>,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Render a `CREATE TABLE` block.
    ///
    /// The block ends with `);` followed by a blank line so several blocks
    /// can be concatenated. Only the last column omits its comma.
    pub fn to_create_sql(&self, if_not_exists: bool) -> String {
        let mut sql = if if_not_exists {
            format!("CREATE TABLE IF NOT EXISTS {} (\n", self.name)
        } else {
            format!("CREATE TABLE {} (\n", self.name)
        };

        let last = self.fields.len().saturating_sub(1);
        for (i, field) in self.fields.iter().enumerate() {
            sql.push_str("    ");
            sql.push_str(&field.to_sql());
            if i < last {
                sql.push(',');
            }
            sql.push('\n');
        }

        sql.push_str(");\n\n");
        sql
    }
}
