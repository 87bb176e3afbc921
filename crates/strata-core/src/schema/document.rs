use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// A free-form document.
pub type Document = Map<String, Value>;

/// Documents to seed into one MongoDB collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentBatch {
    /// Target collection.
    pub name: String,

    /// Documents, inserted in this order.
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl DocumentBatch {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: Vec::new(),
        }
    }

    /// Append a document. Non-object values are stored under a `value` key.
    pub fn document(mut self, document: Value) -> Self {
        let document = match document {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        self.documents.push(document);
        self
    }

    /// Render one `insertOne` line per document.
    pub fn to_script(&self) -> Result<String> {
        let mut script = String::new();
        for document in &self.documents {
            let json = serde_json::to_string(document)?;
            script.push_str(&format!(
                "db.collection('{}').insertOne({});\n",
                escape_single_quoted(&self.name),
                json
            ));
        }
        Ok(script)
    }
}

fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_script_one_line_per_document() {
        let batch = DocumentBatch::new("users")
            .document(json!({"name": "John", "age": 30, "city": "New York"}))
            .document(json!({"name": "Alice", "age": 25, "city": "San Francisco"}));

        let script = batch.to_script().unwrap();
        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(lines.len(), 2);

        let prefix = "db.collection('users').insertOne(";
        assert!(lines[0].starts_with(prefix));
        assert!(lines[0].ends_with(");"));
        let body = &lines[0][prefix.len()..lines[0].len() - 2];
        let parsed: Value = serde_json::from_str(body).unwrap();
        assert_eq!(parsed, json!({"name": "John", "age": 30, "city": "New York"}));
        assert!(lines[1].contains(r#""name":"Alice""#));
    }

    #[test]
    fn test_empty_batch_renders_nothing() {
        assert_eq!(DocumentBatch::new("empty").to_script().unwrap(), "");
    }

    #[test]
    fn test_collection_name_is_escaped() {
        let batch = DocumentBatch::new("it's").document(json!({"a": 1}));
        let script = batch.to_script().unwrap();
        assert!(script.starts_with(r"db.collection('it\'s')"));
    }

    #[test]
    fn test_scalar_document_is_wrapped() {
        let batch = DocumentBatch::new("numbers").document(json!(7));
        assert_eq!(batch.documents[0].get("value"), Some(&json!(7)));
    }
}
