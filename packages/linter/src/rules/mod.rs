mod adjacent_heavy;
mod button_link;
mod font_size_range;
mod footer_position;
mod heading_hierarchy;
mod image_alt;
mod unsupported;

pub use adjacent_heavy::NoAdjacentHeavyBlocksRule;
pub use button_link::ButtonLinkRule;
pub use font_size_range::{font_size_bounds, FontSizeRangeRule};
pub use footer_position::FooterPositionRule;
pub use heading_hierarchy::{next_step_above, HeadingHierarchyRule, TYPE_SCALE};
pub use image_alt::ImageAltTextRule;
pub use unsupported::UnsupportedBlockRule;

use crate::diagnostic::{RuleViolation, Severity};
use blockmail_model::Block;

/// A whole-document composition rule.
///
/// `detect` sees the full block sequence, so rules can reason about
/// neighbours. `fix` must be pure and return `None` when the violation it is
/// asked to repair is no longer present.
pub trait CompositionRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    fn severity(&self) -> Severity;

    /// Cheap pre-check; rules that cannot fire on `blocks` return false
    fn applies_to(&self, _blocks: &[Block]) -> bool {
        true
    }

    fn detect(&self, blocks: &[Block]) -> Vec<RuleViolation>;

    /// Repair the violation on `block_id`
    fn fix(&self, _blocks: &[Block], _block_id: &str) -> Option<Vec<Block>> {
        None
    }

    fn violation(&self, block_id: &str, message: String) -> RuleViolation {
        RuleViolation::new(block_id, self.id(), self.severity(), message)
    }
}

/// Ordered set of rules; declaration order breaks ties in reports
pub struct RuleRegistry {
    rules: Vec<Box<dyn CompositionRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(NoAdjacentHeavyBlocksRule),
                Box::new(FontSizeRangeRule),
                Box::new(HeadingHierarchyRule),
                Box::new(FooterPositionRule),
                Box::new(ImageAltTextRule),
                Box::new(ButtonLinkRule),
                Box::new(UnsupportedBlockRule),
            ],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn CompositionRule>] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&dyn CompositionRule> {
        self.rules.iter().find(|rule| rule.id() == id).map(|rule| rule.as_ref())
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn CompositionRule>) {
        self.rules.push(rule);
    }

    /// Remove a rule by id; returns whether it was registered
    pub fn disable(&mut self, id: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|rule| rule.id() != id);
        self.rules.len() != before
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rules.iter().map(|rule| rule.id()).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use blockmail_model::{Block, BlockData, BlockKind, TextStyle};

    pub fn block(id: &str, kind: BlockKind) -> Block {
        Block::new(id, BlockData::default_for(kind))
    }

    pub fn sized(id: &str, kind: BlockKind, font_size: u32) -> Block {
        let mut block = block(id, kind);
        if let Some(style) = block.data.text_style_mut() {
            *style = TextStyle {
                font_size: Some(font_size),
                ..Default::default()
            };
        }
        block
    }

    pub fn blocks(mut blocks: Vec<Block>) -> Vec<Block> {
        blockmail_model::renumber(&mut blocks);
        blocks
    }
}
