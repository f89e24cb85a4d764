//! # Section templates
//!
//! A section template is a named, ordered group of block payloads with no
//! ids or positions yet. Insertion clones the payloads and binds fresh ids.

use crate::block::{
    BlockData, BlockKind, ButtonContent, ButtonSettings, DividerContent, DividerSettings, FooterContent,
    HeadingContent, HeroContent, ImageContent, ImageSettings, LogoContent, LogoSettings, SpacerContent,
    SpacerSettings, TextContent, TypographySettings,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionTemplate {
    pub id: String,
    pub name: String,
    pub blocks: Vec<BlockData>,
}

impl SectionTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, blocks: Vec<BlockData>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            blocks,
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn kinds(&self) -> Vec<BlockKind> {
        self.blocks.iter().filter_map(BlockData::kind).collect()
    }
}

/// Sections shipped with the editor
pub fn builtin_sections() -> Vec<SectionTemplate> {
    vec![
        SectionTemplate::new(
            "header",
            "Header",
            vec![
                BlockData::Logo {
                    content: LogoContent {
                        src: "asset:logo".to_string(),
                        alt: "Company logo".to_string(),
                        link: None,
                    },
                    settings: LogoSettings::default(),
                },
                BlockData::Spacer {
                    content: SpacerContent {},
                    settings: SpacerSettings {
                        height: Some(16),
                        ..Default::default()
                    },
                },
            ],
        ),
        SectionTemplate::new(
            "call-to-action",
            "Call to action",
            vec![
                BlockData::Heading {
                    content: HeadingContent {
                        text: "Ready to get started?".to_string(),
                        level: 2,
                    },
                    settings: TypographySettings::default(),
                },
                BlockData::Text {
                    content: TextContent {
                        body: "Join thousands of teams already on board.".to_string(),
                    },
                    settings: TypographySettings::default(),
                },
                BlockData::Button {
                    content: ButtonContent {
                        label: "Get started".to_string(),
                        url: "https://example.com/start".to_string(),
                    },
                    settings: ButtonSettings::default(),
                },
            ],
        ),
        SectionTemplate::new(
            "feature",
            "Feature highlight",
            vec![
                BlockData::Image {
                    content: ImageContent {
                        src: "asset:feature".to_string(),
                        alt: "Feature screenshot".to_string(),
                        link: None,
                    },
                    settings: ImageSettings::default(),
                },
                BlockData::Heading {
                    content: HeadingContent {
                        text: "What's new".to_string(),
                        level: 2,
                    },
                    settings: TypographySettings::default(),
                },
                BlockData::Text {
                    content: TextContent {
                        body: "A short description of the feature.".to_string(),
                    },
                    settings: TypographySettings::default(),
                },
            ],
        ),
        SectionTemplate::new(
            "welcome",
            "Welcome hero",
            vec![BlockData::Hero {
                content: HeroContent {
                    headline: "Welcome aboard".to_string(),
                    subheadline: Some("We're glad you're here.".to_string()),
                    image: None,
                    button_label: None,
                    button_url: None,
                },
                settings: TypographySettings::default(),
            }],
        ),
        SectionTemplate::new(
            "footer",
            "Footer",
            vec![
                BlockData::Divider {
                    content: DividerContent {},
                    settings: DividerSettings::default(),
                },
                BlockData::Footer {
                    content: FooterContent {
                        text: "You are receiving this email because you subscribed.".to_string(),
                        unsubscribe_url: Some("https://example.com/unsubscribe".to_string()),
                        address: None,
                    },
                    settings: TypographySettings::default(),
                },
            ],
        ),
    ]
}

pub fn find_builtin(id: &str) -> Option<SectionTemplate> {
    builtin_sections().into_iter().find(|section| section.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_section_ids_are_unique() {
        let sections = builtin_sections();
        let mut ids: Vec<_> = sections.iter().map(|s| s.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), sections.len());
    }

    #[test]
    fn test_template_round_trips_through_json() {
        let template = find_builtin("call-to-action").unwrap();
        let json = serde_json::to_string(&template).unwrap();
        let back: SectionTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, template);
        assert_eq!(back.kinds(), vec![BlockKind::Heading, BlockKind::Text, BlockKind::Button]);
    }

    #[test]
    fn test_invalid_template_block_is_rejected() {
        let json = r#"{ "id": "x", "name": "X", "blocks": [ { "type": "text", "content": {} } ] }"#;
        assert!(serde_json::from_str::<SectionTemplate>(json).is_err());
    }
}
