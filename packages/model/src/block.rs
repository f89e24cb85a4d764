//! # Blocks
//!
//! A block is one typed unit of document content. The block kind decides the
//! shape of its `content` and `settings`, so the payload is modeled as the
//! [`BlockData`] sum type rather than a loose JSON bag.
//!
//! The serialized shape stays flat:
//!
//! ```text
//! { "id": "text-1a2b-3", "type": "text", "content": {...}, "settings": {...}, "position": 0 }
//! ```
//!
//! Stored documents may contain blocks this build cannot interpret (a newer
//! block type, or a payload that no longer matches its shape). Those load as
//! [`BlockData::Unsupported`] and round-trip untouched; construction APIs never
//! produce them.

use crate::defaults::type_defaults;
use crate::error::{ModelError, ModelResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Closed set of block kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Logo,
    Spacer,
    Hero,
    Heading,
    Text,
    Button,
    Image,
    Divider,
    Footer,
}

impl BlockKind {
    pub const ALL: [BlockKind; 9] = [
        BlockKind::Logo,
        BlockKind::Spacer,
        BlockKind::Hero,
        BlockKind::Heading,
        BlockKind::Text,
        BlockKind::Button,
        BlockKind::Image,
        BlockKind::Divider,
        BlockKind::Footer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Logo => "logo",
            BlockKind::Spacer => "spacer",
            BlockKind::Hero => "hero",
            BlockKind::Heading => "heading",
            BlockKind::Text => "text",
            BlockKind::Button => "button",
            BlockKind::Image => "image",
            BlockKind::Divider => "divider",
            BlockKind::Footer => "footer",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Kinds that carry a primary text field
    pub fn is_text_bearing(&self) -> bool {
        matches!(
            self,
            BlockKind::Hero
                | BlockKind::Heading
                | BlockKind::Text
                | BlockKind::Button
                | BlockKind::Footer
        )
    }

    /// Kinds that frame the top of a document (skipped by prepend)
    pub fn is_wrapper(&self) -> bool {
        matches!(self, BlockKind::Logo | BlockKind::Spacer)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// Box-level style overrides shared by every kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
}

/// Typography overrides for text-bearing kinds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<u32>,
}

// ---------------------------------------------------------------------------
// Content payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LogoContent {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpacerContent {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HeroContent {
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subheadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HeadingContent {
    pub text: String,
    #[serde(default = "default_heading_level")]
    pub level: u8,
}

fn default_heading_level() -> u8 {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TextContent {
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ButtonContent {
    pub label: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImageContent {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DividerContent {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FooterContent {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsubscribe_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

// ---------------------------------------------------------------------------
// Settings payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogoSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(flatten)]
    pub frame: FrameStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacerSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(flatten)]
    pub frame: FrameStyle,
}

/// Settings for kinds that are just typography plus a frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypographySettings {
    #[serde(flatten)]
    pub text: TextStyle,
    #[serde(flatten)]
    pub frame: FrameStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(flatten)]
    pub text: TextStyle,
    #[serde(flatten)]
    pub frame: FrameStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(flatten)]
    pub frame: FrameStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<u32>,
    #[serde(flatten)]
    pub frame: FrameStyle,
}

// ---------------------------------------------------------------------------
// BlockData
// ---------------------------------------------------------------------------

/// Typed payload of a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBlockData", into = "RawBlockData")]
pub enum BlockData {
    Logo {
        content: LogoContent,
        settings: LogoSettings,
    },
    Spacer {
        content: SpacerContent,
        settings: SpacerSettings,
    },
    Hero {
        content: HeroContent,
        settings: TypographySettings,
    },
    Heading {
        content: HeadingContent,
        settings: TypographySettings,
    },
    Text {
        content: TextContent,
        settings: TypographySettings,
    },
    Button {
        content: ButtonContent,
        settings: ButtonSettings,
    },
    Image {
        content: ImageContent,
        settings: ImageSettings,
    },
    Divider {
        content: DividerContent,
        settings: DividerSettings,
    },
    Footer {
        content: FooterContent,
        settings: TypographySettings,
    },
    /// A stored block this build cannot interpret
    Unsupported {
        type_name: String,
        content: Value,
        settings: Value,
    },
}

fn typed<T: DeserializeOwned>(kind: BlockKind, field: &'static str, value: Value) -> ModelResult<T> {
    let value = if value.is_null() {
        Value::Object(Map::new())
    } else {
        value
    };
    serde_json::from_value(value).map_err(|e| ModelError::invalid_payload(kind, field, e.to_string()))
}

/// Typed settings; keys the kind does not recognise are rejected
fn typed_settings<T: DeserializeOwned + Serialize>(kind: BlockKind, value: Value) -> ModelResult<T> {
    let settings: T = typed(kind, "settings", value.clone())?;

    if let (Value::Object(input), Ok(Value::Object(known))) = (&value, serde_json::to_value(&settings)) {
        let mut unknown: Vec<&str> = input
            .iter()
            .filter(|(key, v)| !v.is_null() && !known.contains_key(key.as_str()))
            .map(|(key, _)| key.as_str())
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            return Err(ModelError::invalid_payload(
                kind,
                "settings",
                format!("unknown setting(s): {}", unknown.join(", ")),
            ));
        }
    }

    Ok(settings)
}

impl BlockData {
    /// Build a typed payload from its wire parts, validating the shape
    pub fn from_parts(type_name: &str, content: Value, settings: Value) -> ModelResult<Self> {
        let kind = BlockKind::parse(type_name)
            .ok_or_else(|| ModelError::UnknownBlockType(type_name.to_string()))?;

        let data = match kind {
            BlockKind::Logo => BlockData::Logo {
                content: typed(kind, "content", content)?,
                settings: typed_settings(kind, settings)?,
            },
            BlockKind::Spacer => BlockData::Spacer {
                content: typed(kind, "content", content)?,
                settings: typed_settings(kind, settings)?,
            },
            BlockKind::Hero => BlockData::Hero {
                content: typed(kind, "content", content)?,
                settings: typed_settings(kind, settings)?,
            },
            BlockKind::Heading => BlockData::Heading {
                content: typed(kind, "content", content)?,
                settings: typed_settings(kind, settings)?,
            },
            BlockKind::Text => BlockData::Text {
                content: typed(kind, "content", content)?,
                settings: typed_settings(kind, settings)?,
            },
            BlockKind::Button => BlockData::Button {
                content: typed(kind, "content", content)?,
                settings: typed_settings(kind, settings)?,
            },
            BlockKind::Image => BlockData::Image {
                content: typed(kind, "content", content)?,
                settings: typed_settings(kind, settings)?,
            },
            BlockKind::Divider => BlockData::Divider {
                content: typed(kind, "content", content)?,
                settings: typed_settings(kind, settings)?,
            },
            BlockKind::Footer => BlockData::Footer {
                content: typed(kind, "content", content)?,
                settings: typed_settings(kind, settings)?,
            },
        };

        data.check()?;
        Ok(data)
    }

    /// Split back into wire parts
    pub fn to_parts(&self) -> (String, Value, Value) {
        fn parts<C: Serialize, S: Serialize>(kind: BlockKind, content: &C, settings: &S) -> (String, Value, Value) {
            (
                kind.as_str().to_string(),
                serde_json::to_value(content).unwrap_or_default(),
                serde_json::to_value(settings).unwrap_or_default(),
            )
        }

        match self {
            BlockData::Logo { content, settings } => parts(BlockKind::Logo, content, settings),
            BlockData::Spacer { content, settings } => parts(BlockKind::Spacer, content, settings),
            BlockData::Hero { content, settings } => parts(BlockKind::Hero, content, settings),
            BlockData::Heading { content, settings } => parts(BlockKind::Heading, content, settings),
            BlockData::Text { content, settings } => parts(BlockKind::Text, content, settings),
            BlockData::Button { content, settings } => parts(BlockKind::Button, content, settings),
            BlockData::Image { content, settings } => parts(BlockKind::Image, content, settings),
            BlockData::Divider { content, settings } => parts(BlockKind::Divider, content, settings),
            BlockData::Footer { content, settings } => parts(BlockKind::Footer, content, settings),
            BlockData::Unsupported {
                type_name,
                content,
                settings,
            } => (type_name.clone(), content.clone(), settings.clone()),
        }
    }

    /// Constraints serde cannot express
    fn check(&self) -> ModelResult<()> {
        match self {
            BlockData::Heading { content, .. } if !(1..=3).contains(&content.level) => Err(
                ModelError::invalid_payload(BlockKind::Heading, "content", format!("level {} is not 1-3", content.level)),
            ),
            BlockData::Spacer { settings, .. } if settings.height == Some(0) => Err(
                ModelError::invalid_payload(BlockKind::Spacer, "settings", "height must be positive"),
            ),
            BlockData::Image { settings, .. } if settings.width == Some(0) => Err(
                ModelError::invalid_payload(BlockKind::Image, "settings", "width must be positive"),
            ),
            _ => {
                if let Some(size) = self.text_style().and_then(|style| style.font_size) {
                    if size == 0 {
                        let kind = self.kind().unwrap_or(BlockKind::Text);
                        return Err(ModelError::invalid_payload(kind, "settings", "fontSize must be positive"));
                    }
                }
                Ok(())
            }
        }
    }

    /// Default payload for a freshly created block
    pub fn default_for(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Logo => BlockData::Logo {
                content: LogoContent {
                    src: String::new(),
                    alt: "Logo".to_string(),
                    link: None,
                },
                settings: LogoSettings::default(),
            },
            BlockKind::Spacer => BlockData::Spacer {
                content: SpacerContent {},
                settings: SpacerSettings::default(),
            },
            BlockKind::Hero => BlockData::Hero {
                content: HeroContent {
                    headline: "Your headline here".to_string(),
                    subheadline: None,
                    image: None,
                    button_label: None,
                    button_url: None,
                },
                settings: TypographySettings::default(),
            },
            BlockKind::Heading => BlockData::Heading {
                content: HeadingContent {
                    text: "Heading".to_string(),
                    level: default_heading_level(),
                },
                settings: TypographySettings::default(),
            },
            BlockKind::Text => BlockData::Text {
                content: TextContent {
                    body: "Write something here.".to_string(),
                },
                settings: TypographySettings::default(),
            },
            BlockKind::Button => BlockData::Button {
                content: ButtonContent {
                    label: "Learn more".to_string(),
                    url: String::new(),
                },
                settings: ButtonSettings::default(),
            },
            BlockKind::Image => BlockData::Image {
                content: ImageContent {
                    src: String::new(),
                    alt: String::new(),
                    link: None,
                },
                settings: ImageSettings::default(),
            },
            BlockKind::Divider => BlockData::Divider {
                content: DividerContent {},
                settings: DividerSettings::default(),
            },
            BlockKind::Footer => BlockData::Footer {
                content: FooterContent {
                    text: "You are receiving this email because you subscribed.".to_string(),
                    unsubscribe_url: None,
                    address: None,
                },
                settings: TypographySettings::default(),
            },
        }
    }

    /// Kind of this payload, `None` for unsupported blocks
    pub fn kind(&self) -> Option<BlockKind> {
        match self {
            BlockData::Logo { .. } => Some(BlockKind::Logo),
            BlockData::Spacer { .. } => Some(BlockKind::Spacer),
            BlockData::Hero { .. } => Some(BlockKind::Hero),
            BlockData::Heading { .. } => Some(BlockKind::Heading),
            BlockData::Text { .. } => Some(BlockKind::Text),
            BlockData::Button { .. } => Some(BlockKind::Button),
            BlockData::Image { .. } => Some(BlockKind::Image),
            BlockData::Divider { .. } => Some(BlockKind::Divider),
            BlockData::Footer { .. } => Some(BlockKind::Footer),
            BlockData::Unsupported { .. } => None,
        }
    }

    /// Wire name of the type, including unsupported ones
    pub fn type_name(&self) -> &str {
        match self {
            BlockData::Unsupported { type_name, .. } => type_name,
            other => other.kind().map(|kind| kind.as_str()).unwrap_or_default(),
        }
    }

    pub fn is(&self, kind: BlockKind) -> bool {
        self.kind() == Some(kind)
    }

    pub fn frame(&self) -> Option<&FrameStyle> {
        match self {
            BlockData::Logo { settings, .. } => Some(&settings.frame),
            BlockData::Spacer { settings, .. } => Some(&settings.frame),
            BlockData::Hero { settings, .. }
            | BlockData::Heading { settings, .. }
            | BlockData::Text { settings, .. }
            | BlockData::Footer { settings, .. } => Some(&settings.frame),
            BlockData::Button { settings, .. } => Some(&settings.frame),
            BlockData::Image { settings, .. } => Some(&settings.frame),
            BlockData::Divider { settings, .. } => Some(&settings.frame),
            BlockData::Unsupported { .. } => None,
        }
    }

    pub fn text_style(&self) -> Option<&TextStyle> {
        match self {
            BlockData::Hero { settings, .. }
            | BlockData::Heading { settings, .. }
            | BlockData::Text { settings, .. }
            | BlockData::Footer { settings, .. } => Some(&settings.text),
            BlockData::Button { settings, .. } => Some(&settings.text),
            _ => None,
        }
    }

    pub fn text_style_mut(&mut self) -> Option<&mut TextStyle> {
        match self {
            BlockData::Hero { settings, .. }
            | BlockData::Heading { settings, .. }
            | BlockData::Text { settings, .. }
            | BlockData::Footer { settings, .. } => Some(&mut settings.text),
            BlockData::Button { settings, .. } => Some(&mut settings.text),
            _ => None,
        }
    }

    /// The primary text of a text-bearing block
    pub fn primary_text(&self) -> Option<&str> {
        match self {
            BlockData::Hero { content, .. } => Some(&content.headline),
            BlockData::Heading { content, .. } => Some(&content.text),
            BlockData::Text { content, .. } => Some(&content.body),
            BlockData::Button { content, .. } => Some(&content.label),
            BlockData::Footer { content, .. } => Some(&content.text),
            _ => None,
        }
    }

    /// Font size after applying the kind's default
    pub fn effective_font_size(&self) -> Option<u32> {
        let kind = self.kind()?;
        let style = self.text_style()?;
        style.font_size.or(type_defaults(kind).font_size)
    }
}

/// Wire form of a block payload
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBlockData {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    content: Value,
    #[serde(default)]
    settings: Value,
}

impl TryFrom<RawBlockData> for BlockData {
    type Error = ModelError;

    fn try_from(raw: RawBlockData) -> Result<Self, Self::Error> {
        BlockData::from_parts(&raw.type_name, raw.content, raw.settings)
    }
}

impl From<BlockData> for RawBlockData {
    fn from(data: BlockData) -> Self {
        let (type_name, content, settings) = data.to_parts();
        Self {
            type_name,
            content,
            settings,
        }
    }
}

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// One block of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBlock", into = "RawBlock")]
pub struct Block {
    pub id: String,
    /// Index in the owning document; written only by `positions::renumber`
    pub position: usize,
    pub data: BlockData,
}

impl Block {
    pub fn new(id: impl Into<String>, data: BlockData) -> Self {
        Self {
            id: id.into(),
            position: 0,
            data,
        }
    }

    pub fn kind(&self) -> Option<BlockKind> {
        self.data.kind()
    }

    pub fn is(&self, kind: BlockKind) -> bool {
        self.data.is(kind)
    }

    /// Merge a partial change into this block's content/settings.
    ///
    /// Keys set to `null` are removed. The merged payload is re-validated; on
    /// failure the block is left unchanged and the error returned.
    pub fn apply_patch(&self, patch: &BlockPatch) -> ModelResult<Block> {
        if let BlockData::Unsupported { .. } = self.data {
            return Err(ModelError::UnsupportedBlock(self.id.clone()));
        }

        let (type_name, mut content, mut settings) = self.data.to_parts();
        if let Some(fields) = &patch.content {
            merge_object(&mut content, fields);
        }
        if let Some(fields) = &patch.settings {
            merge_object(&mut settings, fields);
        }

        Ok(Block {
            id: self.id.clone(),
            position: self.position,
            data: BlockData::from_parts(&type_name, content, settings)?,
        })
    }
}

/// Shallow merge of `fields` into `target`; `null` deletes a key
pub fn merge_object(target: &mut Value, fields: &Map<String, Value>) {
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(map) = target {
        for (key, value) in fields {
            if value.is_null() {
                map.remove(key);
            } else {
                map.insert(key.clone(), value.clone());
            }
        }
    }
}

/// A scoped partial change to one block, addressed by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPatch {
    pub block_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Map<String, Value>>,
}

impl BlockPatch {
    pub fn new(block_id: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
            content: None,
            settings: None,
        }
    }

    pub fn content(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.content
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Wire form of a block; loading is lenient
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBlock {
    id: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    content: Value,
    #[serde(default)]
    settings: Value,
    #[serde(default)]
    position: usize,
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        let data = match BlockData::from_parts(&raw.type_name, raw.content.clone(), raw.settings.clone()) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(block_id = %raw.id, error = %err, "Loading block as unsupported");
                BlockData::Unsupported {
                    type_name: raw.type_name,
                    content: raw.content,
                    settings: raw.settings,
                }
            }
        };

        Block {
            id: raw.id,
            position: raw.position,
            data,
        }
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        let (type_name, content, settings) = block.data.to_parts();
        RawBlock {
            id: block.id,
            type_name,
            content,
            settings,
            position: block.position,
        }
    }
}
