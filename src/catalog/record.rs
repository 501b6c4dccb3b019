use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single cat in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cat {
    /// Unique, immutable identifier
    pub id: u64,

    pub name: String,

    pub breed: String,

    pub description: String,

    /// Display attributes the engine does not interpret (e.g. `imageUrl`)
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Cat {
    /// Create a cat with no extra display attributes
    pub fn new(
        id: u64,
        name: impl Into<String>,
        breed: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            breed: breed.into(),
            description: description.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Attach an opaque display attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Every field as a `(key, string value)` pair, ready for template substitution
    pub fn fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("id".to_string(), self.id.to_string()),
            ("name".to_string(), self.name.clone()),
            ("breed".to_string(), self.breed.clone()),
            ("description".to_string(), self.description.clone()),
        ];

        for (key, value) in &self.extra {
            fields.push((key.clone(), value_to_string(value)));
        }

        fields
    }
}

/// Coerce a JSON value to the text a template should show for it
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
