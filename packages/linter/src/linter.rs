use crate::diagnostic::RuleViolation;
use crate::rules::RuleRegistry;
use blockmail_model::{index_of, renumber, Block};
use tracing::{debug, info, instrument};

/// Upper bound on fix-all passes; each pass re-validates the accumulated result
pub const MAX_FIX_PASSES: usize = 8;

/// Runs a [`RuleRegistry`] over whole documents
#[derive(Debug, Default)]
pub struct Linter {
    registry: RuleRegistry,
}

impl Linter {
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Violations ordered by block position, then by rule declaration order
    #[instrument(skip_all, fields(blocks = blocks.len()))]
    pub fn validate(&self, blocks: &[Block]) -> Vec<RuleViolation> {
        let mut found = Vec::new();

        for (rule_index, rule) in self.registry.rules().iter().enumerate() {
            if !rule.applies_to(blocks) {
                continue;
            }
            for violation in rule.detect(blocks) {
                let position = index_of(blocks, &violation.block_id).unwrap_or(usize::MAX);
                found.push((position, rule_index, violation));
            }
        }

        // stable: a rule's own ordering survives for the same block
        found.sort_by_key(|(position, rule_index, _)| (*position, *rule_index));
        debug!(count = found.len(), "validated document");

        found.into_iter().map(|(_, _, violation)| violation).collect()
    }

    /// Apply the fix for one violation. Returns the input unchanged when the
    /// rule is unknown, the violation is gone, or it cannot be fixed.
    pub fn auto_fix(&self, blocks: &[Block], block_id: &str, rule_id: &str) -> Vec<Block> {
        let Some(rule) = self.registry.get(rule_id) else {
            debug!(rule_id, "auto-fix for unknown rule ignored");
            return blocks.to_vec();
        };

        let still_present = rule.applies_to(blocks)
            && rule
                .detect(blocks)
                .iter()
                .any(|violation| violation.is(block_id, rule_id) && violation.auto_fixable);
        if !still_present {
            debug!(block_id, rule_id, "violation no longer present");
            return blocks.to_vec();
        }

        match rule.fix(blocks, block_id) {
            Some(mut fixed) => {
                renumber(&mut fixed);
                debug!(block_id, rule_id, "applied fix");
                fixed
            }
            None => blocks.to_vec(),
        }
    }

    /// Fix everything fixable, repeating until nothing fixable remains or a
    /// pass makes no progress
    #[instrument(skip_all, fields(blocks = blocks.len()))]
    pub fn auto_fix_all(&self, blocks: &[Block]) -> Vec<Block> {
        let mut current = blocks.to_vec();

        for pass in 0..MAX_FIX_PASSES {
            let fixable: Vec<RuleViolation> = self
                .validate(&current)
                .into_iter()
                .filter(|violation| violation.auto_fixable)
                .collect();
            if fixable.is_empty() {
                break;
            }

            let mut changed = false;
            for violation in &fixable {
                let next = self.auto_fix(&current, &violation.block_id, &violation.rule_id);
                if next != current {
                    current = next;
                    changed = true;
                }
            }

            info!(pass, fixes = fixable.len(), "auto-fix pass");
            if !changed {
                break;
            }
        }

        current
    }
}

/// Validate with the built-in rules
pub fn validate(blocks: &[Block]) -> Vec<RuleViolation> {
    Linter::default().validate(blocks)
}

/// Fix one violation with the built-in rules
pub fn auto_fix(blocks: &[Block], block_id: &str, rule_id: &str) -> Vec<Block> {
    Linter::default().auto_fix(blocks, block_id, rule_id)
}

/// Fix every fixable violation with the built-in rules
pub fn auto_fix_all(blocks: &[Block]) -> Vec<Block> {
    Linter::default().auto_fix_all(blocks)
}
