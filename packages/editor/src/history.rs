//! # Edit history
//!
//! Snapshot-based undo/redo with a logical version clock.
//!
//! ## Design
//!
//! - The unit of history is a whole [`HistorySnapshot`]; stacks hold values,
//!   never diffs
//! - `update` pushes the current snapshot onto the undo stack and clears redo
//! - Every change of the visible snapshot (update, undo, redo) bumps the
//!   version and is handed to the [`Persister`], if one is attached
//! - Undo/redo on an empty stack is a no-op returning `false`
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new();
//! history.initialize(HistorySnapshot::new(blocks, settings))?;
//!
//! history.update(SnapshotPatch::blocks(edited))?;
//! assert!(history.undo());
//! assert!(history.redo());
//! ```

use crate::errors::{EditorError, EditorResult};
use crate::persistence::Persister;
use blockmail_model::{check_unique_ids, renumber, Block, Document, GlobalSettings};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default number of undo levels kept
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Complete `(blocks, settings)` value at one point in history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    pub blocks: Vec<Block>,
    pub global_settings: GlobalSettings,
}

impl HistorySnapshot {
    pub fn new(mut blocks: Vec<Block>, global_settings: GlobalSettings) -> Self {
        renumber(&mut blocks);
        Self {
            blocks,
            global_settings,
        }
    }

    pub fn into_document(self) -> Document {
        Document::new(self.blocks, self.global_settings)
    }
}

impl From<Document> for HistorySnapshot {
    fn from(document: Document) -> Self {
        Self::new(document.blocks, document.global_settings)
    }
}

/// Partial replacement of a snapshot; absent parts are carried over
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotPatch {
    pub blocks: Option<Vec<Block>>,
    pub global_settings: Option<GlobalSettings>,
}

impl SnapshotPatch {
    pub fn blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks: Some(blocks),
            global_settings: None,
        }
    }

    pub fn global_settings(global_settings: GlobalSettings) -> Self {
        Self {
            blocks: None,
            global_settings: Some(global_settings),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_none() && self.global_settings.is_none()
    }
}

impl From<HistorySnapshot> for SnapshotPatch {
    fn from(snapshot: HistorySnapshot) -> Self {
        Self {
            blocks: Some(snapshot.blocks),
            global_settings: Some(snapshot.global_settings),
        }
    }
}

/// A snapshot stamped with the logical version it was committed at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedSnapshot {
    pub version: u64,
    pub snapshot: HistorySnapshot,
}

/// Undo/redo state machine over snapshots
#[derive(Debug)]
pub struct History {
    current: Option<HistorySnapshot>,

    /// Previous snapshots (most recent last)
    undo_stack: Vec<HistorySnapshot>,

    /// Undone snapshots (most recent last)
    redo_stack: Vec<HistorySnapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    version: u64,

    persister: Option<Persister>,
}

impl History {
    /// Create a new history with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            current: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            version: 0,
            persister: None,
        }
    }

    /// Send every committed snapshot to `persister`
    pub fn with_persister(mut self, persister: Persister) -> Self {
        self.persister = Some(persister);
        self
    }

    pub fn persister(&self) -> Option<&Persister> {
        self.persister.as_ref()
    }

    /// Set the baseline snapshot. Version stays at 0 and nothing is persisted.
    pub fn initialize(&mut self, snapshot: HistorySnapshot) -> EditorResult<()> {
        if self.current.is_some() {
            return Err(EditorError::AlreadyInitialized);
        }
        let snapshot = normalize(snapshot)?;
        debug!(blocks = snapshot.blocks.len(), "history initialized");
        self.current = Some(snapshot);
        Ok(())
    }

    /// Record a new current snapshot. Returns the new version.
    pub fn update(&mut self, patch: SnapshotPatch) -> EditorResult<u64> {
        let current = self.current.as_ref().ok_or(EditorError::NotInitialized)?;

        let next = normalize(HistorySnapshot {
            blocks: patch.blocks.unwrap_or_else(|| current.blocks.clone()),
            global_settings: patch.global_settings.unwrap_or_else(|| current.global_settings.clone()),
        })?;

        if let Some(previous) = self.current.take() {
            self.undo_stack.push(previous);
            if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
                self.undo_stack.remove(0);
            }
        }
        self.redo_stack.clear();

        Ok(self.commit(next))
    }

    /// Step back one snapshot
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        if let Some(current) = self.current.take() {
            self.redo_stack.push(current);
        }
        self.commit(previous);
        true
    }

    /// Step forward one undone snapshot
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        if let Some(current) = self.current.take() {
            self.undo_stack.push(current);
        }
        self.commit(next);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn current(&self) -> Option<&HistorySnapshot> {
        self.current.as_ref()
    }

    /// Logical version of the current snapshot
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    fn commit(&mut self, snapshot: HistorySnapshot) -> u64 {
        self.version += 1;
        if let Some(persister) = &self.persister {
            persister.submit(VersionedSnapshot {
                version: self.version,
                snapshot: snapshot.clone(),
            });
        }
        info!(version = self.version, blocks = snapshot.blocks.len(), "history commit");
        self.current = Some(snapshot);
        self.version
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

/// Renumber and check the invariants a snapshot must satisfy
fn normalize(mut snapshot: HistorySnapshot) -> EditorResult<HistorySnapshot> {
    renumber(&mut snapshot.blocks);
    check_unique_ids(&snapshot.blocks)?;
    snapshot.global_settings.check()?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockmail_model::{BlockData, BlockKind};

    fn snapshot(ids: &[&str]) -> HistorySnapshot {
        HistorySnapshot::new(
            ids.iter()
                .map(|id| Block::new(*id, BlockData::default_for(BlockKind::Text)))
                .collect(),
            GlobalSettings::default(),
        )
    }

    #[test]
    fn test_history_creation() {
        let history = History::new();
        assert_eq!(history.undo_levels(), 0);
        assert_eq!(history.redo_levels(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.current().is_none());
    }

    #[test]
    fn test_initialize_twice_fails() {
        let mut history = History::new();
        history.initialize(snapshot(&["a"])).unwrap();
        assert_eq!(
            history.initialize(snapshot(&["b"])),
            Err(EditorError::AlreadyInitialized)
        );
        assert_eq!(history.version(), 0);
    }

    #[test]
    fn test_update_before_initialize_fails() {
        let mut history = History::new();
        assert_eq!(
            history.update(SnapshotPatch::blocks(vec![])),
            Err(EditorError::NotInitialized)
        );
        assert!(!history.undo());
    }

    #[test]
    fn test_update_undo_redo() {
        let s0 = snapshot(&["a"]);
        let s1 = snapshot(&["a", "b"]);
        let s2 = snapshot(&["a", "b", "c"]);

        let mut history = History::new();
        history.initialize(s0.clone()).unwrap();
        history.update(s1.clone().into()).unwrap();
        history.update(s2.clone().into()).unwrap();

        assert!(history.undo());
        assert_eq!(history.current(), Some(&s1));
        assert!(history.redo());
        assert_eq!(history.current(), Some(&s2));
        assert_eq!(history.version(), 4);

        assert!(history.undo());
        assert!(history.undo());
        assert_eq!(history.current(), Some(&s0));
        assert!(!history.can_undo());
        assert!(!history.undo());
        assert_eq!(history.current(), Some(&s0));
    }

    #[test]
    fn test_update_clears_redo() {
        let mut history = History::new();
        history.initialize(snapshot(&["a"])).unwrap();
        history.update(snapshot(&["b"]).into()).unwrap();
        history.undo();
        assert_eq!(history.redo_levels(), 1);

        history.update(snapshot(&["c"]).into()).unwrap();
        assert_eq!(history.redo_levels(), 0);
        assert!(!history.redo());
    }

    #[test]
    fn test_partial_patch_keeps_other_half() {
        let mut history = History::new();
        history.initialize(snapshot(&["a"])).unwrap();

        let settings = GlobalSettings {
            max_width: 640,
            ..Default::default()
        };
        history.update(SnapshotPatch::global_settings(settings)).unwrap();

        let current = history.current().unwrap();
        assert_eq!(current.blocks.len(), 1);
        assert_eq!(current.global_settings.max_width, 640);
    }

    #[test]
    fn test_update_renumbers_and_rejects_duplicates() {
        let mut history = History::new();
        history.initialize(snapshot(&["a"])).unwrap();

        let mut blocks = snapshot(&["x", "y"]).blocks;
        blocks.reverse();
        history.update(SnapshotPatch::blocks(blocks)).unwrap();
        assert!(blockmail_model::positions_are_dense(&history.current().unwrap().blocks));

        let duplicated = snapshot(&["x", "x"]).blocks;
        assert!(matches!(
            history.update(SnapshotPatch::blocks(duplicated)),
            Err(EditorError::Model(_))
        ));
        assert_eq!(history.undo_levels(), 1);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut history = History::with_max_levels(2);
        history.initialize(snapshot(&[])).unwrap();

        for i in 0..3 {
            history.update(snapshot(&[format!("b{}", i).as_str()]).into()).unwrap();
        }

        assert_eq!(history.undo_levels(), 2);
    }
}
