//! Position bookkeeping.
//!
//! `position` always equals the array index. [`renumber`] is the only code
//! that writes it; every insert, remove, move or reorder ends with a call.

use crate::block::Block;
use crate::error::{ModelError, ModelResult};
use std::collections::HashSet;

/// Reassign every block's position to its index
pub fn renumber(blocks: &mut [Block]) {
    for (index, block) in blocks.iter_mut().enumerate() {
        block.position = index;
    }
}

pub fn index_of(blocks: &[Block], id: &str) -> Option<usize> {
    blocks.iter().position(|block| block.id == id)
}

pub fn find<'a>(blocks: &'a [Block], id: &str) -> Option<&'a Block> {
    blocks.iter().find(|block| block.id == id)
}

pub fn positions_are_dense(blocks: &[Block]) -> bool {
    blocks
        .iter()
        .enumerate()
        .all(|(index, block)| block.position == index)
}

pub fn has_unique_ids(blocks: &[Block]) -> bool {
    let mut seen = HashSet::with_capacity(blocks.len());
    blocks.iter().all(|block| seen.insert(block.id.as_str()))
}

/// Fail on the first duplicated id
pub fn check_unique_ids(blocks: &[Block]) -> ModelResult<()> {
    let mut seen = HashSet::with_capacity(blocks.len());
    for block in blocks {
        if !seen.insert(block.id.as_str()) {
            return Err(ModelError::DuplicateBlockId(block.id.clone()));
        }
    }
    Ok(())
}
