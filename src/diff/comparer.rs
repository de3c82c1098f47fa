use std::collections::HashMap;

use log::debug;
use serde_json::{Map, Value as JsonValue};
use treediff::diff;

use super::error::{DiffError, Result};
use super::formatting::{summary, unified_diff};
use super::structured::{Change, ChangeCollector};
use crate::models::requests::Request;

/// Builder for a [`BatchComparer`].
#[derive(Default)]
pub struct BatchComparerBuilder {
    base: Option<Vec<Request>>,
}

impl BatchComparerBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// The batch every later batch is compared against.
    pub fn set_base(mut self, base: Vec<Request>) -> Self {
        self.base = Some(base);
        self
    }

    pub fn build(self) -> Result<BatchComparer> {
        let base = self.base.ok_or(DiffError::MissingBase)?;
        Ok(BatchComparer {
            base_keyed: keyed(&base)?,
        })
    }
}

/// Compares request batches against a stored base.
pub struct BatchComparer {
    base_keyed: JsonValue,
}

impl BatchComparer {
    pub fn compare(&self, other: &[Request]) -> Result<BatchComparison> {
        let other_keyed = keyed(other)?;
        let mut collector = ChangeCollector::new();
        diff(&self.base_keyed, &other_keyed, &mut collector);
        debug!("[BatchComparer::compare] {} changes", collector.changes.len());
        Ok(BatchComparison {
            old_text: serde_json::to_string_pretty(&self.base_keyed)?,
            new_text: serde_json::to_string_pretty(&other_keyed)?,
            changes: collector.changes,
        })
    }
}

/// Result of one comparison.
pub struct BatchComparison {
    old_text: String,
    new_text: String,
    changes: Vec<Change>,
}

impl BatchComparison {
    pub fn structured(&self) -> &[Change] {
        &self.changes
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Git-style diff of the keyed batches.
    pub fn unified_diff(&self) -> Result<String> {
        unified_diff(&self.old_text, &self.new_text)
    }

    /// Changes grouped by request.
    pub fn summary(&self) -> Result<String> {
        summary(&self.changes)
    }
}

/// Batch as an object keyed by `name:objectId`, with `#n` appended for the n-th
/// repeat of the same key (several text styles on one shape, for instance).
fn keyed(requests: &[Request]) -> Result<JsonValue> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut map = Map::new();
    for (index, request) in requests.iter().enumerate() {
        let value = serde_json::to_value(request)?;
        let name = request.name();
        let body = value.get(name).cloned().unwrap_or(JsonValue::Null);
        let target = body
            .get("objectId")
            .or_else(|| body.get("groupObjectId"))
            .and_then(JsonValue::as_str)
            .map_or_else(|| index.to_string(), str::to_string);
        let base_key = format!("{name}:{target}");
        let count = seen.entry(base_key.clone()).or_insert(0);
        *count += 1;
        let key = if *count == 1 {
            base_key
        } else {
            format!("{base_key}#{count}")
        };
        map.insert(key, body);
    }
    Ok(JsonValue::Object(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::IdGenerator;
    use crate::layout::Rect;
    use crate::models::requests::PredefinedLayout;
    use crate::models::shape::ShapeType;
    use crate::surface::{BatchRecorder, PresentationSurface};

    fn batch(left: f64) -> Vec<Request> {
        let mut recorder = BatchRecorder::new(IdGenerator::new("d"));
        recorder.add_slide("s1", PredefinedLayout::Blank);
        recorder
            .insert_shape("s1", "box", ShapeType::Rectangle, Rect::new(left, 10.0, 50.0, 20.0))
            .unwrap();
        recorder.into_requests()
    }

    #[test]
    fn moved_shape_is_one_modified_field() {
        let comparison = BatchComparerBuilder::new()
            .set_base(batch(10.0))
            .build()
            .unwrap()
            .compare(&batch(25.0))
            .unwrap();
        let changes = comparison.structured();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].request_key(), "createShape:box");
        assert_eq!(changes[0].field_path(), "elementProperties.transform.translateX");
        let text = comparison.unified_diff().unwrap();
        assert!(text.lines().any(|l| l.starts_with('-') && l.contains("\"translateX\": 10.0")));
        assert!(text.lines().any(|l| l.starts_with('+') && l.contains("\"translateX\": 25.0")));
        assert!(comparison.summary().unwrap().contains("~ elementProperties.transform.translateX: 10.0 -> 25.0"));
    }

    #[test]
    fn added_requests_are_keyed_not_shifted() {
        let mut longer = batch(10.0);
        longer.insert(1, Request::DeleteObject(crate::models::requests::DeleteObjectRequest {
            object_id: "old".into(),
        }));
        let comparison = BatchComparerBuilder::new()
            .set_base(batch(10.0))
            .build()
            .unwrap()
            .compare(&longer)
            .unwrap();
        assert_eq!(comparison.structured().len(), 1);
        assert_eq!(comparison.structured()[0].path, "deleteObject:old");
        assert_eq!(comparison.structured()[0].change_type, crate::diff::ChangeType::Added);
    }

    #[test]
    fn identical_batches_report_nothing() {
        let comparison = BatchComparerBuilder::new()
            .set_base(batch(10.0))
            .build()
            .unwrap()
            .compare(&batch(10.0))
            .unwrap();
        assert!(!comparison.has_changes());
        assert!(comparison.unified_diff().unwrap().contains("No changes detected."));
    }

    #[test]
    fn missing_base_is_an_error() {
        assert!(matches!(BatchComparerBuilder::new().build(), Err(DiffError::MissingBase)));
    }
}
