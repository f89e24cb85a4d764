//! # Block mutations
//!
//! Single-block edits on a snapshot. Each mutation validates against the
//! snapshot it is applied to and produces a new snapshot; the input is never
//! modified. Results are always renumbered.
//!
//! ### InsertBlock
//! - Creates a block of `kind` with default content at `index` (0..=len)
//!
//! ### UpdateBlock
//! - Shallow merge into the block's content/settings; `null` deletes a key
//! - The merged payload must still match the block's type
//!
//! ### MoveBlock
//! - `index` is the block's index in the resulting sequence
//!
//! ### DuplicateBlock
//! - Deep copy placed right after the original, with a fresh id

use crate::history::HistorySnapshot;
use blockmail_model::{index_of, renumber, Block, BlockData, BlockKind, BlockPatch, IdGenerator, ModelError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a default block of `kind`
    InsertBlock { index: usize, kind: BlockKind },

    /// Partial update of one block's content/settings
    UpdateBlock { patch: BlockPatch },

    RemoveBlock { block_id: String },

    MoveBlock { block_id: String, index: usize },

    DuplicateBlock { block_id: String },

    /// Partial update of the global settings
    UpdateGlobalSettings { patch: Map<String, Value> },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Index {index} is out of range for {len} blocks")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid change: {0}")]
    InvalidChange(#[from] ModelError),
}

/// Outcome of a successful mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    pub snapshot: HistorySnapshot,
    /// Id of the block created by insert/duplicate
    pub created_id: Option<String>,
}

impl Mutation {
    /// Check the mutation against `snapshot` without applying it
    pub fn validate(&self, snapshot: &HistorySnapshot) -> Result<(), MutationError> {
        let len = snapshot.blocks.len();
        match self {
            Mutation::InsertBlock { index, .. } if *index > len => {
                Err(MutationError::IndexOutOfRange { index: *index, len })
            }
            Mutation::MoveBlock { index, .. } if *index >= len => {
                Err(MutationError::IndexOutOfRange { index: *index, len })
            }
            _ => {
                if let Some(block_id) = self.target_id() {
                    if index_of(&snapshot.blocks, block_id).is_none() {
                        return Err(MutationError::BlockNotFound(block_id.to_string()));
                    }
                }
                Ok(())
            }
        }
    }

    /// Block addressed by this mutation, if any
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Mutation::UpdateBlock { patch } => Some(&patch.block_id),
            Mutation::RemoveBlock { block_id }
            | Mutation::MoveBlock { block_id, .. }
            | Mutation::DuplicateBlock { block_id } => Some(block_id),
            Mutation::InsertBlock { .. } | Mutation::UpdateGlobalSettings { .. } => None,
        }
    }

    /// Apply to `snapshot`, producing a new snapshot
    pub fn apply(&self, snapshot: &HistorySnapshot, ids: &mut IdGenerator) -> Result<MutationResult, MutationError> {
        self.validate(snapshot)?;

        let mut blocks = snapshot.blocks.clone();
        let mut global_settings = snapshot.global_settings.clone();
        let mut created_id = None;

        match self {
            Mutation::InsertBlock { index, kind } => {
                let id = fresh_id(&blocks, ids, kind.as_str());
                blocks.insert(*index, Block::new(id.clone(), BlockData::default_for(*kind)));
                created_id = Some(id);
            }

            Mutation::UpdateBlock { patch } => {
                let index = Self::locate(&blocks, &patch.block_id)?;
                blocks[index] = blocks[index].apply_patch(patch)?;
            }

            Mutation::RemoveBlock { block_id } => {
                let index = Self::locate(&blocks, block_id)?;
                blocks.remove(index);
            }

            Mutation::MoveBlock { block_id, index } => {
                let from = Self::locate(&blocks, block_id)?;
                let block = blocks.remove(from);
                blocks.insert(*index, block);
            }

            Mutation::DuplicateBlock { block_id } => {
                let index = Self::locate(&blocks, block_id)?;
                let original = &blocks[index];
                let id = fresh_id(&blocks, ids, original.data.type_name());
                let copy = Block::new(id.clone(), original.data.clone());
                blocks.insert(index + 1, copy);
                created_id = Some(id);
            }

            Mutation::UpdateGlobalSettings { patch } => {
                global_settings = global_settings.apply_patch(patch)?;
            }
        }

        renumber(&mut blocks);
        Ok(MutationResult {
            snapshot: HistorySnapshot {
                blocks,
                global_settings,
            },
            created_id,
        })
    }

    fn locate(blocks: &[Block], block_id: &str) -> Result<usize, MutationError> {
        index_of(blocks, block_id).ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))
    }
}

fn fresh_id(blocks: &[Block], ids: &mut IdGenerator, type_hint: &str) -> String {
    loop {
        let id = ids.new_id_for(type_hint);
        if index_of(blocks, &id).is_none() {
            return id;
        }
    }
}
