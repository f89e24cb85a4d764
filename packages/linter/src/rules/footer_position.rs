use crate::diagnostic::{RuleViolation, Severity};
use crate::rules::CompositionRule;
use blockmail_model::{index_of, renumber, Block, BlockKind};

/// Footers close the email; nothing but other footers may follow one
pub struct FooterPositionRule;

fn misplaced(blocks: &[Block], index: usize) -> bool {
    blocks[index].is(BlockKind::Footer) && blocks[index + 1..].iter().any(|block| !block.is(BlockKind::Footer))
}

impl CompositionRule for FooterPositionRule {
    fn id(&self) -> &'static str {
        "footer-position"
    }

    fn description(&self) -> &'static str {
        "The footer must be the last block"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn applies_to(&self, blocks: &[Block]) -> bool {
        blocks.iter().any(|block| block.is(BlockKind::Footer))
    }

    fn detect(&self, blocks: &[Block]) -> Vec<RuleViolation> {
        (0..blocks.len())
            .filter(|index| misplaced(blocks, *index))
            .map(|index| {
                self.violation(
                    &blocks[index].id,
                    "Footer is followed by other content. Move it to the end of the email.".to_string(),
                )
                .fixable(true)
            })
            .collect()
    }

    fn fix(&self, blocks: &[Block], block_id: &str) -> Option<Vec<Block>> {
        let index = index_of(blocks, block_id)?;
        if !misplaced(blocks, index) {
            return None;
        }

        let mut fixed = blocks.to_vec();
        let footer = fixed.remove(index);
        fixed.push(footer);
        renumber(&mut fixed);
        Some(fixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{block, blocks};

    #[test]
    fn test_trailing_footer_is_fine() {
        let rule = FooterPositionRule;
        let doc = blocks(vec![block("text-1", BlockKind::Text), block("footer-1", BlockKind::Footer)]);

        assert!(rule.detect(&doc).is_empty());
    }

    #[test]
    fn test_moves_footer_to_end() {
        let rule = FooterPositionRule;
        let doc = blocks(vec![
            block("footer-1", BlockKind::Footer),
            block("text-1", BlockKind::Text),
            block("button-1", BlockKind::Button),
        ]);

        let violations = rule.detect(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Error);

        let fixed = rule.fix(&doc, "footer-1").unwrap();
        let ids: Vec<&str> = fixed.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["text-1", "button-1", "footer-1"]);
        assert_eq!(fixed[2].position, 2);
        assert!(rule.detect(&fixed).is_empty());
    }

    #[test]
    fn test_consecutive_trailing_footers_allowed() {
        let rule = FooterPositionRule;
        let doc = blocks(vec![
            block("text-1", BlockKind::Text),
            block("footer-1", BlockKind::Footer),
            block("footer-2", BlockKind::Footer),
        ]);

        assert!(rule.detect(&doc).is_empty());
        assert!(rule.fix(&doc, "footer-1").is_none());
    }
}
