//! Style resolution.
//!
//! A block's inline style is built from three layers, most specific last:
//! document [`GlobalSettings`], the kind's [`type_defaults`], then the block's
//! own settings. Declarations keep insertion order so output is stable.

use blockmail_model::{type_defaults, BlockData, BlockKind, FrameStyle, GlobalSettings, TextStyle};

/// Ordered CSS declarations; setting an existing property replaces it in place
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations {
    entries: Vec<(&'static str, String)>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    pub fn set_opt<V: Into<String>>(&mut self, property: &'static str, value: Option<V>) {
        if let Some(value) = value {
            self.set(property, value);
        }
    }

    pub fn with(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Overlay `other` on top of `self`
    pub fn merge(mut self, other: &Declarations) -> Self {
        for (property, value) in &other.entries {
            self.set(property, value.clone());
        }
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Keep only the listed properties, in their existing order
    pub fn only(&self, properties: &[&str]) -> Declarations {
        Declarations {
            entries: self
                .entries
                .iter()
                .filter(|(name, _)| properties.contains(name))
                .cloned()
                .collect(),
        }
    }

    /// Drop the listed properties
    pub fn without(&self, properties: &[&str]) -> Declarations {
        Declarations {
            entries: self
                .entries
                .iter()
                .filter(|(name, _)| !properties.contains(name))
                .cloned()
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as an inline `style` attribute value
    pub fn to_inline(&self) -> String {
        self.entries
            .iter()
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Properties that belong on the block's table cell rather than its text
pub const FRAME_PROPERTIES: &[&str] = &["padding", "background-color", "text-align"];

pub fn global_layer(settings: &GlobalSettings) -> Declarations {
    Declarations::new().with("font-family", settings.font_family.clone())
}

pub fn type_layer(kind: BlockKind) -> Declarations {
    let defaults = type_defaults(kind);
    let mut layer = Declarations::new();
    layer.set("padding", defaults.padding);
    layer.set_opt("background-color", defaults.background_color);
    layer.set("text-align", defaults.align.as_str());
    layer.set_opt("font-size", defaults.font_size.map(px));
    layer.set_opt("font-weight", defaults.font_weight.map(|w| w.to_string()));
    layer.set_opt("line-height", defaults.line_height.map(px));
    layer.set_opt("color", defaults.color);
    layer
}

pub fn block_layer(data: &BlockData) -> Declarations {
    let mut layer = Declarations::new();
    if let Some(frame) = data.frame() {
        frame_overrides(&mut layer, frame);
    }
    if let Some(text) = data.text_style() {
        text_overrides(&mut layer, text);
    }
    layer
}

fn frame_overrides(layer: &mut Declarations, frame: &FrameStyle) {
    layer.set_opt("padding", frame.padding.clone());
    layer.set_opt("background-color", frame.background_color.clone());
    layer.set_opt("text-align", frame.align.map(|a| a.as_str()));
}

fn text_overrides(layer: &mut Declarations, text: &TextStyle) {
    layer.set_opt("font-size", text.font_size.map(px));
    layer.set_opt("font-weight", text.font_weight.map(|w| w.to_string()));
    layer.set_opt("line-height", text.line_height.map(px));
    layer.set_opt("color", text.color.clone());
}

/// Effective declarations for a supported block
pub fn resolve(kind: BlockKind, data: &BlockData, settings: &GlobalSettings) -> Declarations {
    global_layer(settings)
        .merge(&type_layer(kind))
        .merge(&block_layer(data))
}

pub fn px(value: u32) -> String {
    format!("{}px", value)
}
