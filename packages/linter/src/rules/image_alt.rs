use crate::diagnostic::{RuleViolation, Severity};
use crate::rules::CompositionRule;
use blockmail_model::{Block, BlockData};

/// Images and logos need alternative text for screen readers and for
/// clients that block images
pub struct ImageAltTextRule;

impl CompositionRule for ImageAltTextRule {
    fn id(&self) -> &'static str {
        "image-alt-text"
    }

    fn description(&self) -> &'static str {
        "Images must have alternative text"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn detect(&self, blocks: &[Block]) -> Vec<RuleViolation> {
        blocks
            .iter()
            .filter(|block| match &block.data {
                BlockData::Image { content, .. } => content.alt.trim().is_empty(),
                BlockData::Logo { content, .. } => content.alt.trim().is_empty(),
                _ => false,
            })
            .map(|block| {
                self.violation(
                    &block.id,
                    format!(
                        "The {} has no alt text. Describe it for readers who cannot see images.",
                        block.data.type_name()
                    ),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::blocks;
    use blockmail_model::{ImageContent, ImageSettings};

    fn image(id: &str, alt: &str) -> Block {
        Block::new(
            id,
            BlockData::Image {
                content: ImageContent {
                    src: "https://example.com/a.png".to_string(),
                    alt: alt.to_string(),
                    link: None,
                },
                settings: ImageSettings::default(),
            },
        )
    }

    #[test]
    fn test_missing_alt_is_reported() {
        let rule = ImageAltTextRule;
        let doc = blocks(vec![image("image-1", "  "), image("image-2", "A product photo")]);

        let violations = rule.detect(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].block_id, "image-1");
        assert!(!violations[0].auto_fixable);
        assert!(rule.fix(&doc, "image-1").is_none());
    }
}
