use crate::diagnostic::{RuleViolation, Severity};
use crate::rules::{font_size_bounds, CompositionRule};
use blockmail_model::{index_of, Block, BlockKind};

/// Font-size steps (px) used to measure emphasis
pub const TYPE_SCALE: [u32; 13] = [10, 12, 14, 16, 18, 20, 22, 24, 28, 32, 36, 40, 48];

/// Smallest scale step strictly larger than `size`
pub fn next_step_above(size: u32) -> Option<u32> {
    TYPE_SCALE.iter().copied().find(|step| *step > size)
}

/// A heading must be at least one type-scale step larger than the body text
/// next to it
pub struct HeadingHierarchyRule;

struct Finding {
    heading_size: u32,
    body_size: u32,
    /// Size the fix raises the heading to, when one is within heading bounds
    target: Option<u32>,
}

impl HeadingHierarchyRule {
    fn inspect(blocks: &[Block], index: usize) -> Option<Finding> {
        let heading = &blocks[index];
        if !heading.is(BlockKind::Heading) {
            return None;
        }
        let heading_size = heading.data.effective_font_size()?;

        let before = index.checked_sub(1).and_then(|i| blocks.get(i));
        let after = blocks.get(index + 1);
        let body_size = [before, after]
            .into_iter()
            .flatten()
            .filter(|block| block.is(BlockKind::Text))
            .filter_map(|block| block.data.effective_font_size())
            .max()?;

        let required = next_step_above(body_size);
        if required.is_some_and(|required| heading_size >= required) {
            return None;
        }

        let (min, max) = font_size_bounds(BlockKind::Heading)?;
        let target = required.map(|required| required.max(min)).filter(|target| *target <= max);

        Some(Finding {
            heading_size,
            body_size,
            target,
        })
    }
}

impl CompositionRule for HeadingHierarchyRule {
    fn id(&self) -> &'static str {
        "heading-hierarchy"
    }

    fn description(&self) -> &'static str {
        "Headings should be visibly larger than adjacent body text"
    }

    fn severity(&self) -> Severity {
        Severity::Suggestion
    }

    fn applies_to(&self, blocks: &[Block]) -> bool {
        blocks.iter().any(|block| block.is(BlockKind::Heading))
    }

    fn detect(&self, blocks: &[Block]) -> Vec<RuleViolation> {
        (0..blocks.len())
            .filter_map(|index| {
                let finding = Self::inspect(blocks, index)?;
                let message = format!(
                    "Heading at {}px does not stand out from {}px body text",
                    finding.heading_size, finding.body_size
                );
                Some(
                    self.violation(&blocks[index].id, message)
                        .fixable(finding.target.is_some()),
                )
            })
            .collect()
    }

    fn fix(&self, blocks: &[Block], block_id: &str) -> Option<Vec<Block>> {
        let index = index_of(blocks, block_id)?;
        let target = Self::inspect(blocks, index)?.target?;

        let mut fixed = blocks.to_vec();
        fixed[index].data.text_style_mut()?.font_size = Some(target);
        Some(fixed)
    }
}
