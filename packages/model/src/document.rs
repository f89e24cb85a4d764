//! # Documents
//!
//! The persisted shape is plain JSON:
//!
//! ```text
//! { "schemaVersion": 2, "blocks": [ ... ], "globalSettings": { ... } }
//! ```
//!
//! Older representations are migrated in [`migrate`] before they are decoded,
//! so a stored document is never silently misread.

use crate::block::Block;
use crate::error::{ModelError, ModelResult};
use crate::positions::{check_unique_ids, renumber};
use crate::settings::GlobalSettings;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Current on-disk schema version
pub const SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub schema_version: u32,
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub global_settings: GlobalSettings,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new(), GlobalSettings::default())
    }
}

impl Document {
    /// Build a document; positions are renumbered from array order
    pub fn new(mut blocks: Vec<Block>, global_settings: GlobalSettings) -> Self {
        renumber(&mut blocks);
        Self {
            schema_version: SCHEMA_VERSION,
            blocks,
            global_settings,
        }
    }

    pub fn from_json(source: &str) -> ModelResult<Self> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    /// Decode any supported schema version
    pub fn from_value(value: Value) -> ModelResult<Self> {
        let value = migrate(value)?;
        let mut document: Document = serde_json::from_value(value)?;

        // Array order is authoritative; stored positions may be stale.
        renumber(&mut document.blocks);
        check_unique_ids(&document.blocks)?;
        document.global_settings.check()?;

        Ok(document)
    }

    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Version stored in a raw document; absent means version 1
pub fn schema_version_of(value: &Value) -> ModelResult<u64> {
    match value.get("schemaVersion") {
        None | Some(Value::Null) => Ok(1),
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| ModelError::Malformed(format!("schemaVersion {n} is not an integer"))),
        Some(other) => Err(ModelError::Malformed(format!("schemaVersion {other} is not a number"))),
    }
}

/// Upgrade a raw document to [`SCHEMA_VERSION`]
pub fn migrate(mut value: Value) -> ModelResult<Value> {
    let mut version = schema_version_of(&value)?;
    if version > SCHEMA_VERSION as u64 || version == 0 {
        return Err(ModelError::UnsupportedSchema {
            found: version,
            latest: SCHEMA_VERSION,
        });
    }

    while version < SCHEMA_VERSION as u64 {
        value = match version {
            1 => migrate_v1(value)?,
            other => {
                return Err(ModelError::UnsupportedSchema {
                    found: other,
                    latest: SCHEMA_VERSION,
                })
            }
        };
        version += 1;
        debug!(version, "Migrated document schema");
    }

    Ok(value)
}

/// v1 documents:
/// - carry no `schemaVersion`
/// - name the block discriminant `kind`
/// - store `contentWidth` instead of `maxWidth`
/// - may store pixel sizes as strings such as `"600px"`
fn migrate_v1(value: Value) -> ModelResult<Value> {
    let Value::Object(mut root) = value else {
        return Err(ModelError::Malformed("document root must be an object".to_string()));
    };

    if let Some(Value::Object(settings)) = root.get_mut("globalSettings") {
        if let Some(width) = settings.remove("contentWidth") {
            settings.entry("maxWidth").or_insert(width);
        }
        for key in ["maxWidth", "mobileBreakpoint"] {
            if let Some(value) = settings.get_mut(key) {
                *value = pixels_to_number(value)?;
            }
        }
    }

    if let Some(Value::Array(blocks)) = root.get_mut("blocks") {
        for block in blocks.iter_mut() {
            let Value::Object(block) = block else {
                return Err(ModelError::Malformed("block must be an object".to_string()));
            };
            if let Some(kind) = block.remove("kind") {
                block.entry("type").or_insert(kind);
            }
            block.remove("position");
        }
    }

    root.insert("schemaVersion".to_string(), Value::from(2u32));
    Ok(Value::Object(root))
}

fn pixels_to_number(value: &Value) -> ModelResult<Value> {
    match value {
        Value::String(s) => {
            let digits = s.trim().trim_end_matches("px").trim();
            digits
                .parse::<u32>()
                .map(Value::from)
                .map_err(|_| ModelError::Malformed(format!("cannot read pixel value {s:?}")))
        }
        other => Ok(other.clone()),
    }
}

/// Empty v2 document value, handy for tools that build documents by hand
pub fn empty_document_value() -> Value {
    let mut root = Map::new();
    root.insert("schemaVersion".to_string(), Value::from(SCHEMA_VERSION));
    root.insert("blocks".to_string(), Value::Array(Vec::new()));
    root.insert(
        "globalSettings".to_string(),
        serde_json::to_value(GlobalSettings::default()).unwrap_or_default(),
    );
    Value::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockData, BlockKind};
    use serde_json::json;

    #[test]
    fn test_round_trip_current_schema() {
        let doc = Document::new(
            vec![
                Block::new("hero-1", BlockData::default_for(BlockKind::Hero)),
                Block::new("footer-1", BlockData::default_for(BlockKind::Footer)),
            ],
            GlobalSettings::default(),
        );

        let json = doc.to_json().unwrap();
        let back = Document::from_json(&json).unwrap();
        assert_eq!(back, doc);
        assert_eq!(back.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_migrates_v1_document() {
        let v1 = json!({
            "blocks": [
                { "id": "b", "kind": "text", "content": { "body": "second" }, "position": 7 },
                { "id": "a", "kind": "heading", "content": { "text": "first" }, "position": 7 }
            ],
            "globalSettings": { "contentWidth": "640px", "mobileBreakpoint": "500px" }
        });

        let doc = Document::from_value(v1).unwrap();
        assert_eq!(doc.schema_version, 2);
        assert_eq!(doc.global_settings.max_width, 640);
        assert_eq!(doc.global_settings.mobile_breakpoint, 500);
        assert_eq!(doc.blocks[0].id, "b");
        assert_eq!(doc.blocks[0].position, 0);
        assert_eq!(doc.blocks[1].position, 1);
        assert_eq!(doc.blocks[1].kind(), Some(BlockKind::Heading));
    }

    #[test]
    fn test_rejects_future_schema() {
        let err = Document::from_value(json!({ "schemaVersion": 9, "blocks": [] })).unwrap_err();
        assert_eq!(err, ModelError::UnsupportedSchema { found: 9, latest: SCHEMA_VERSION });
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let value = json!({
            "schemaVersion": 2,
            "blocks": [
                { "id": "a", "type": "spacer", "content": {}, "settings": {}, "position": 0 },
                { "id": "a", "type": "spacer", "content": {}, "settings": {}, "position": 1 }
            ]
        });
        assert_eq!(
            Document::from_value(value).unwrap_err(),
            ModelError::DuplicateBlockId("a".to_string())
        );
    }

    #[test]
    fn test_empty_document_value_decodes() {
        let doc = Document::from_value(empty_document_value()).unwrap();
        assert!(doc.blocks.is_empty());
    }
}
