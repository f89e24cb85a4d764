use crate::diagnostic::{RuleViolation, Severity};
use crate::rules::CompositionRule;
use blockmail_model::{Block, BlockData};

/// Every call to action needs somewhere to go
pub struct ButtonLinkRule;

fn is_dead_link(url: Option<&str>) -> bool {
    match url.map(str::trim) {
        None | Some("") | Some("#") => true,
        Some(_) => false,
    }
}

impl CompositionRule for ButtonLinkRule {
    fn id(&self) -> &'static str {
        "button-link"
    }

    fn description(&self) -> &'static str {
        "Buttons must link somewhere"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn detect(&self, blocks: &[Block]) -> Vec<RuleViolation> {
        let mut violations = Vec::new();

        for block in blocks {
            match &block.data {
                BlockData::Button { content, .. } if is_dead_link(Some(content.url.as_str())) => {
                    violations.push(self.violation(
                        &block.id,
                        format!("Button '{}' has no link", content.label),
                    ));
                }
                BlockData::Hero { content, .. } => {
                    let has_label = content
                        .button_label
                        .as_deref()
                        .is_some_and(|label| !label.trim().is_empty());
                    if has_label && is_dead_link(content.button_url.as_deref()) {
                        violations.push(self.violation(&block.id, "Hero button has no link".to_string()));
                    }
                }
                _ => {}
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::blocks;
    use blockmail_model::{ButtonContent, ButtonSettings, HeroContent, TypographySettings};

    fn button(id: &str, url: &str) -> Block {
        Block::new(
            id,
            BlockData::Button {
                content: ButtonContent {
                    label: "Shop".to_string(),
                    url: url.to_string(),
                },
                settings: ButtonSettings::default(),
            },
        )
    }

    #[test]
    fn test_empty_and_hash_urls_are_errors() {
        let rule = ButtonLinkRule;
        let doc = blocks(vec![
            button("button-1", ""),
            button("button-2", "#"),
            button("button-3", "https://example.com"),
        ]);

        let violations = rule.detect(&doc);
        let ids: Vec<&str> = violations.iter().map(|v| v.block_id.as_str()).collect();
        assert_eq!(ids, vec!["button-1", "button-2"]);
        assert!(violations.iter().all(|v| v.severity == Severity::Error && !v.auto_fixable));
    }

    #[test]
    fn test_hero_button_label_without_url() {
        let rule = ButtonLinkRule;
        let hero = |id: &str, label: Option<&str>, url: Option<&str>| {
            Block::new(
                id,
                BlockData::Hero {
                    content: HeroContent {
                        headline: "Hello".to_string(),
                        subheadline: None,
                        image: None,
                        button_label: label.map(str::to_string),
                        button_url: url.map(str::to_string),
                    },
                    settings: TypographySettings::default(),
                },
            )
        };
        let doc = blocks(vec![
            hero("hero-1", Some("Go"), None),
            hero("hero-2", None, None),
            hero("hero-3", Some("Go"), Some("https://example.com")),
        ]);

        let violations = rule.detect(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].block_id, "hero-1");
    }
}
