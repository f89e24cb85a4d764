//! # Blockmail Linter
//!
//! Composition rules over a whole block sequence. Each rule detects
//! violations and may offer a pure fix; [`Linter::auto_fix_all`] applies
//! fixes until the document stops changing.

mod diagnostic;
mod linter;
mod rules;

pub use diagnostic::{RuleViolation, Severity};
pub use linter::{auto_fix, auto_fix_all, validate, Linter, MAX_FIX_PASSES};
pub use rules::{
    font_size_bounds, next_step_above, ButtonLinkRule, CompositionRule, FontSizeRangeRule, FooterPositionRule,
    HeadingHierarchyRule, ImageAltTextRule, NoAdjacentHeavyBlocksRule, RuleRegistry, UnsupportedBlockRule,
    TYPE_SCALE,
};
