use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use treediff::{value::Key, Delegate};

/// A changed value, with containers reduced to a short summary.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ValueRepr {
    String(String),
    Number(serde_json::Number),
    Boolean(bool),
    Null,
    Array(String),
    Object(String),
}

impl ValueRepr {
    fn from_json_value(val: &JsonValue) -> Self {
        match val {
            JsonValue::Null => ValueRepr::Null,
            JsonValue::Bool(b) => ValueRepr::Boolean(*b),
            JsonValue::Number(n) => ValueRepr::Number(n.clone()),
            JsonValue::String(s) => ValueRepr::String(s.clone()),
            JsonValue::Array(arr) => ValueRepr::Array(format!("[Array len={}]", arr.len())),
            JsonValue::Object(map) => ValueRepr::Object(format!("{{Object keys={}}}", map.len())),
        }
    }

    pub fn format_for_display(&self) -> String {
        match self {
            ValueRepr::String(s) => {
                let escaped = s
                    .replace('\\', "\\\\")
                    .replace('\n', "\\n")
                    .replace('\'', "\\'");
                format!("'{escaped}'")
            }
            ValueRepr::Number(n) => n.to_string(),
            ValueRepr::Boolean(b) => b.to_string(),
            ValueRepr::Null => "null".to_string(),
            ValueRepr::Array(s) | ValueRepr::Object(s) => s.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
}

/// One difference between two keyed batches.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Change {
    /// Request key followed by the field path, e.g.
    /// `createShape:g1a2b_004.elementProperties.size.width.magnitude`.
    pub path: String,
    pub change_type: ChangeType,
    pub old_value: Option<ValueRepr>,
    pub new_value: Option<ValueRepr>,
}

impl Change {
    /// The request key part of `path`.
    pub fn request_key(&self) -> &str {
        self.path
            .split_once('.')
            .map_or(self.path.as_str(), |(key, _)| key)
    }

    /// The field path inside the request, empty for whole-request changes.
    pub fn field_path(&self) -> &str {
        self.path.split_once('.').map_or("", |(_, rest)| rest)
    }
}

/// treediff delegate collecting [`Change`]s with dotted paths.
#[derive(Debug, Default)]
pub(crate) struct ChangeCollector {
    pub(crate) changes: Vec<Change>,
    current_path: Vec<String>,
}

impl ChangeCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn segment(&self, key: &Key) -> String {
        match key {
            Key::String(s) if self.current_path.is_empty() => s.clone(),
            Key::String(s) => format!(".{s}"),
            Key::Index(i) => format!("[{i}]"),
        }
    }

    /// Current path, extended by `key` for added/removed entries, which treediff
    /// reports without pushing the key first.
    fn path_with(&self, key: Option<&Key>) -> String {
        let mut path = self.current_path.concat();
        if let Some(key) = key {
            path.push_str(&self.segment(key));
        }
        path
    }
}

impl<'a> Delegate<'a, Key, JsonValue> for ChangeCollector {
    fn push(&mut self, key: &Key) {
        let segment = self.segment(key);
        self.current_path.push(segment);
    }

    fn pop(&mut self) {
        self.current_path.pop();
    }

    fn removed<'b>(&mut self, key: &'b Key, value: &'a JsonValue) {
        self.changes.push(Change {
            path: self.path_with(Some(key)),
            change_type: ChangeType::Removed,
            old_value: Some(ValueRepr::from_json_value(value)),
            new_value: None,
        });
    }

    fn added<'b>(&mut self, key: &'b Key, value: &'a JsonValue) {
        self.changes.push(Change {
            path: self.path_with(Some(key)),
            change_type: ChangeType::Added,
            old_value: None,
            new_value: Some(ValueRepr::from_json_value(value)),
        });
    }

    fn modified(&mut self, old: &'a JsonValue, new: &'a JsonValue) {
        self.changes.push(Change {
            path: self.path_with(None),
            change_type: ChangeType::Modified,
            old_value: Some(ValueRepr::from_json_value(old)),
            new_value: Some(ValueRepr::from_json_value(new)),
        });
    }
}
