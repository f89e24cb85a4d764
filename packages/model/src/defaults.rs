//! Type-level style defaults.
//!
//! These sit between a block's own settings and the document's global
//! settings. The renderer and the composition rules both read them, so an
//! effective value means the same thing everywhere.

use crate::block::{Align, BlockKind};

/// Default style values for one block kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeDefaults {
    pub font_size: Option<u32>,
    pub font_weight: Option<u16>,
    pub line_height: Option<u32>,
    pub color: Option<&'static str>,
    pub background_color: Option<&'static str>,
    pub padding: &'static str,
    pub align: Align,
}

const BASE: TypeDefaults = TypeDefaults {
    font_size: None,
    font_weight: None,
    line_height: None,
    color: None,
    background_color: None,
    padding: "0",
    align: Align::Left,
};

pub fn type_defaults(kind: BlockKind) -> TypeDefaults {
    match kind {
        BlockKind::Logo => TypeDefaults {
            padding: "24px 32px",
            align: Align::Center,
            ..BASE
        },
        BlockKind::Spacer => BASE,
        BlockKind::Hero => TypeDefaults {
            font_size: Some(32),
            font_weight: Some(700),
            line_height: Some(40),
            color: Some("#1a1a1a"),
            padding: "48px 32px",
            align: Align::Center,
            ..BASE
        },
        BlockKind::Heading => TypeDefaults {
            font_size: Some(24),
            font_weight: Some(700),
            line_height: Some(32),
            color: Some("#1a1a1a"),
            padding: "16px 32px 8px",
            ..BASE
        },
        BlockKind::Text => TypeDefaults {
            font_size: Some(16),
            font_weight: Some(400),
            line_height: Some(24),
            color: Some("#333333"),
            padding: "8px 32px",
            ..BASE
        },
        BlockKind::Button => TypeDefaults {
            font_size: Some(16),
            font_weight: Some(700),
            color: Some("#ffffff"),
            background_color: None,
            padding: "16px 32px",
            align: Align::Center,
            ..BASE
        },
        BlockKind::Image => TypeDefaults {
            padding: "0",
            align: Align::Center,
            ..BASE
        },
        BlockKind::Divider => TypeDefaults {
            color: Some("#e0e0e0"),
            padding: "16px 32px",
            ..BASE
        },
        BlockKind::Footer => TypeDefaults {
            font_size: Some(12),
            font_weight: Some(400),
            line_height: Some(18),
            color: Some("#888888"),
            padding: "24px 32px",
            align: Align::Center,
            ..BASE
        },
    }
}

pub const DEFAULT_SPACER_HEIGHT: u32 = 24;
pub const DEFAULT_DIVIDER_THICKNESS: u32 = 1;
pub const DEFAULT_BUTTON_COLOR: &str = "#2563eb";
pub const DEFAULT_BUTTON_RADIUS: u32 = 4;
pub const DEFAULT_LOGO_WIDTH: u32 = 160;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_bearing_kinds_have_font_sizes() {
        for kind in BlockKind::ALL {
            if kind.is_text_bearing() {
                assert!(type_defaults(kind).font_size.is_some(), "{kind} lacks a font size");
            }
        }
    }
}
