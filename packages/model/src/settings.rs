use crate::block::merge_object;
use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Document-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    /// Colour behind the content area
    pub background_color: String,
    /// Colour of the centred content column
    pub content_background_color: String,
    /// Width of the content column in pixels
    pub max_width: u32,
    pub font_family: String,
    /// Viewport width in pixels below which the mobile layout applies
    pub mobile_breakpoint: u32,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            background_color: "#f4f4f4".to_string(),
            content_background_color: "#ffffff".to_string(),
            max_width: 600,
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            mobile_breakpoint: 480,
        }
    }
}

impl GlobalSettings {
    /// Merge a partial change and validate the result
    pub fn apply_patch(&self, fields: &Map<String, Value>) -> ModelResult<Self> {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(unknown) = fields.keys().find(|key| value.get(key.as_str()).is_none()) {
            return Err(ModelError::InvalidSettings(format!("unknown setting: {unknown}")));
        }
        merge_object(&mut value, fields);
        let merged: GlobalSettings =
            serde_json::from_value(value).map_err(|e| ModelError::InvalidSettings(e.to_string()))?;
        merged.check()?;
        Ok(merged)
    }

    pub fn check(&self) -> ModelResult<()> {
        if self.max_width == 0 {
            return Err(ModelError::InvalidSettings("maxWidth must be positive".to_string()));
        }
        if self.mobile_breakpoint == 0 {
            return Err(ModelError::InvalidSettings(
                "mobileBreakpoint must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
