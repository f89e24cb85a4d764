use crate::diagnostic::{RuleViolation, Severity};
use crate::rules::CompositionRule;
use blockmail_model::{Block, BlockData};

/// Flags blocks the renderer can only show as a placeholder
pub struct UnsupportedBlockRule;

impl CompositionRule for UnsupportedBlockRule {
    fn id(&self) -> &'static str {
        "unsupported-block"
    }

    fn description(&self) -> &'static str {
        "Blocks of unknown type or with invalid content"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn detect(&self, blocks: &[Block]) -> Vec<RuleViolation> {
        blocks
            .iter()
            .filter_map(|block| match &block.data {
                BlockData::Unsupported { type_name, .. } => Some(self.violation(
                    &block.id,
                    format!(
                        "Block type '{}' is not supported or its content is invalid; it renders as a placeholder",
                        type_name
                    ),
                )),
                _ => None,
            })
            .collect()
    }
}
