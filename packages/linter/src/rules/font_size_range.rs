use crate::diagnostic::{RuleViolation, Severity};
use crate::rules::CompositionRule;
use blockmail_model::{index_of, Block, BlockKind};

/// Inclusive font-size bounds in px for each text-bearing kind
pub fn font_size_bounds(kind: BlockKind) -> Option<(u32, u32)> {
    match kind {
        BlockKind::Hero => Some((24, 48)),
        BlockKind::Heading => Some((18, 40)),
        BlockKind::Text | BlockKind::Button => Some((12, 22)),
        BlockKind::Footer => Some((10, 14)),
        BlockKind::Logo | BlockKind::Spacer | BlockKind::Image | BlockKind::Divider => None,
    }
}

/// Keeps effective font sizes inside the per-kind bounds
pub struct FontSizeRangeRule;

impl FontSizeRangeRule {
    fn out_of_range(block: &Block) -> Option<(u32, u32, u32)> {
        let (min, max) = font_size_bounds(block.kind()?)?;
        let size = block.data.effective_font_size()?;
        (size < min || size > max).then_some((size, min, max))
    }
}

impl CompositionRule for FontSizeRangeRule {
    fn id(&self) -> &'static str {
        "font-size-range"
    }

    fn description(&self) -> &'static str {
        "Font sizes must stay within the range for their block type"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn detect(&self, blocks: &[Block]) -> Vec<RuleViolation> {
        blocks
            .iter()
            .filter_map(|block| {
                let (size, min, max) = Self::out_of_range(block)?;
                Some(
                    self.violation(
                        &block.id,
                        format!(
                            "Font size {}px is outside the {}px-{}px range for {} blocks",
                            size,
                            min,
                            max,
                            block.data.type_name()
                        ),
                    )
                    .fixable(true),
                )
            })
            .collect()
    }

    fn fix(&self, blocks: &[Block], block_id: &str) -> Option<Vec<Block>> {
        let index = index_of(blocks, block_id)?;
        let (size, min, max) = Self::out_of_range(&blocks[index])?;

        let mut fixed = blocks.to_vec();
        let style = fixed[index].data.text_style_mut()?;
        style.font_size = Some(size.clamp(min, max));
        Some(fixed)
    }
}
