use crate::diagnostic::{RuleViolation, Severity};
use crate::rules::CompositionRule;
use blockmail_model::{index_of, renumber, Block, BlockData, BlockKind};

/// Two visually heavy blocks of the same kind must not touch
pub struct NoAdjacentHeavyBlocksRule;

const HEAVY_KINDS: [BlockKind; 2] = [BlockKind::Hero, BlockKind::Image];

impl CompositionRule for NoAdjacentHeavyBlocksRule {
    fn id(&self) -> &'static str {
        "no-adjacent-heavy-blocks"
    }

    fn description(&self) -> &'static str {
        "Separate consecutive hero or image blocks"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn applies_to(&self, blocks: &[Block]) -> bool {
        blocks.len() > 1
    }

    fn detect(&self, blocks: &[Block]) -> Vec<RuleViolation> {
        blocks
            .windows(2)
            .filter_map(|pair| {
                let kind = heavy_pair(&pair[0], &pair[1])?;
                Some(
                    self.violation(
                        &pair[1].id,
                        format!(
                            "Block '{}' is the second {} block in a row. Separate them so each one stands out.",
                            pair[1].id, kind
                        ),
                    )
                    .fixable(true),
                )
            })
            .collect()
    }

    fn fix(&self, blocks: &[Block], block_id: &str) -> Option<Vec<Block>> {
        let index = index_of(blocks, block_id)?;
        if index == 0 {
            return None;
        }
        heavy_pair(&blocks[index - 1], &blocks[index])?;

        let mut fixed = blocks.to_vec();
        let spacer = Block::new(
            spacer_id(blocks, block_id),
            BlockData::default_for(BlockKind::Spacer),
        );
        fixed.insert(index, spacer);
        renumber(&mut fixed);
        Some(fixed)
    }
}

fn heavy_pair(first: &Block, second: &Block) -> Option<BlockKind> {
    let kind = second.kind()?;
    (HEAVY_KINDS.contains(&kind) && first.is(kind)).then_some(kind)
}

/// Deterministic id for the separator inserted before `block_id`
fn spacer_id(blocks: &[Block], block_id: &str) -> String {
    let base = format!("spacer-fix-{}", block_id);
    let taken = |id: &str| blocks.iter().any(|block| block.id == id);

    if !taken(&base) {
        return base;
    }
    let mut suffix = 2;
    loop {
        let candidate = format!("{}-{}", base, suffix);
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
