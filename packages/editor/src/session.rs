//! # Edit Session Management
//!
//! An EditSession owns one document's history and id allocator. Every edit
//! (mutation, section insertion, generated change) becomes exactly one
//! history update.
//!
//! External content generation is serialized: one [`RequestTicket`] may be
//! outstanding at a time, and its result is applied atomically.

use crate::errors::{EditorError, EditorResult};
use crate::history::{History, HistorySnapshot, SnapshotPatch};
use crate::mutations::{Mutation, MutationError};
use crate::sections::{self, Insertion, Placement};
use blockmail_model::{Block, BlockPatch, Document, GlobalSettings, IdGenerator, SectionTemplate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

/// Where a section template goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionTarget {
    Index(usize),
    Relative { target_id: String, placement: Placement },
    Replace { target_id: String },
    Append,
    Prepend,
}

/// Proof of the single in-flight generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Result of an external generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeneratedChange {
    /// Whole-document regeneration; `None` keeps the current settings
    #[serde(rename_all = "camelCase")]
    Replace {
        blocks: Vec<Block>,
        global_settings: Option<GlobalSettings>,
    },

    /// Targeted edits addressed by block id
    Patch(Vec<BlockPatch>),
}

/// Single-user edit session over one document
pub struct EditSession {
    /// Document key; seeds the id generator
    pub id: String,

    history: History,

    ids: IdGenerator,

    active_request: Option<RequestTicket>,

    next_ticket: u64,
}

impl EditSession {
    /// Create new edit session with a default history
    pub fn new(id: impl Into<String>, document: Document) -> EditorResult<Self> {
        Self::with_history(id, document, History::new())
    }

    /// Create a session over a preconfigured (uninitialized) history
    pub fn with_history(id: impl Into<String>, document: Document, mut history: History) -> EditorResult<Self> {
        let id = id.into();
        let ids = IdGenerator::for_blocks(&id, &document.blocks);
        history.initialize(HistorySnapshot::from(document))?;

        Ok(Self {
            id,
            history,
            ids,
            active_request: None,
            next_ticket: 0,
        })
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn snapshot(&self) -> Option<&HistorySnapshot> {
        self.history.current()
    }

    pub fn blocks(&self) -> &[Block] {
        self.snapshot().map(|snapshot| snapshot.blocks.as_slice()).unwrap_or(&[])
    }

    /// Current state as a serializable document
    pub fn document(&self) -> Option<Document> {
        self.snapshot().cloned().map(HistorySnapshot::into_document)
    }

    pub fn version(&self) -> u64 {
        self.history.version()
    }

    /// Apply a block mutation. Returns the id of a created block, if any.
    pub fn apply(&mut self, mutation: Mutation) -> EditorResult<Option<String>> {
        let current = self.history.current().ok_or(EditorError::NotInitialized)?;
        let result = mutation.apply(current, &mut self.ids)?;
        self.history.update(result.snapshot.into())?;
        debug!(?mutation, "applied mutation");
        Ok(result.created_id)
    }

    /// Insert a section template. Returns the new block ids.
    pub fn insert_section(&mut self, template: &SectionTemplate, target: SectionTarget) -> EditorResult<Vec<String>> {
        let blocks = self
            .history
            .current()
            .map(|snapshot| snapshot.blocks.as_slice())
            .unwrap_or(&[]);
        let Insertion { blocks, inserted_ids } = match &target {
            SectionTarget::Index(index) => sections::insert_at(template, blocks, *index, &mut self.ids),
            SectionTarget::Relative { target_id, placement } => {
                sections::insert_relative(template, blocks, target_id, *placement, &mut self.ids)
            }
            SectionTarget::Replace { target_id } => sections::replace(template, blocks, target_id, &mut self.ids),
            SectionTarget::Append => sections::append(template, blocks, &mut self.ids),
            SectionTarget::Prepend => sections::prepend(template, blocks, &mut self.ids),
        }?;

        self.history.update(SnapshotPatch::blocks(blocks))?;
        info!(template = %template.id, ?target, "inserted section");
        Ok(inserted_ids)
    }

    /// Replace the block sequence wholesale (e.g. with an auto-fix result)
    pub fn replace_blocks(&mut self, blocks: Vec<Block>) -> EditorResult<u64> {
        self.history.update(SnapshotPatch::blocks(blocks))
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Claim the generation slot
    pub fn begin_request(&mut self) -> EditorResult<RequestTicket> {
        if self.active_request.is_some() {
            return Err(EditorError::RequestInFlight);
        }
        self.next_ticket += 1;
        let ticket = RequestTicket(self.next_ticket);
        self.active_request = Some(ticket);
        debug!(ticket = ticket.id(), "generation request started");
        Ok(ticket)
    }

    pub fn request_in_flight(&self) -> bool {
        self.active_request.is_some()
    }

    /// Release the slot without applying anything
    pub fn cancel_request(&mut self, ticket: RequestTicket) -> bool {
        if self.active_request == Some(ticket) {
            self.active_request = None;
            debug!(ticket = ticket.id(), "generation request cancelled");
            true
        } else {
            false
        }
    }

    /// Apply a generated change as one history update and release the slot.
    /// The change is all-or-nothing.
    pub fn complete_request(&mut self, ticket: RequestTicket, change: GeneratedChange) -> EditorResult<u64> {
        if self.active_request != Some(ticket) {
            return Err(EditorError::UnknownTicket(ticket.id()));
        }
        self.active_request = None;

        let current = self.history.current().ok_or(EditorError::NotInitialized)?;
        let patch = match change {
            GeneratedChange::Replace {
                blocks,
                global_settings,
            } => SnapshotPatch {
                blocks: Some(dedupe_ids(blocks, &mut self.ids)),
                global_settings,
            },
            GeneratedChange::Patch(patches) => {
                let mut blocks = current.blocks.clone();
                for patch in &patches {
                    let block = blocks
                        .iter_mut()
                        .find(|block| block.id == patch.block_id)
                        .ok_or_else(|| MutationError::BlockNotFound(patch.block_id.clone()))?;
                    *block = block.apply_patch(patch)?;
                }
                SnapshotPatch::blocks(blocks)
            }
        };

        let version = self.history.update(patch)?;
        info!(ticket = ticket.id(), version, "applied generated change");
        Ok(version)
    }
}

/// Give every repeated id after its first occurrence a fresh one
fn dedupe_ids(mut blocks: Vec<Block>, ids: &mut IdGenerator) -> Vec<Block> {
    let mut seen: HashSet<String> = blocks.iter().map(|block| block.id.clone()).collect();
    let mut first_use = HashSet::new();

    for block in &mut blocks {
        if first_use.insert(block.id.clone()) {
            continue;
        }
        let fresh = loop {
            let candidate = ids.new_id_for(block.data.type_name());
            if !seen.contains(&candidate) {
                break candidate;
            }
        };
        seen.insert(fresh.clone());
        block.id = fresh;
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockmail_model::{find_builtin, BlockData, BlockKind};

    fn document(ids: &[(&str, BlockKind)]) -> Document {
        Document::new(
            ids.iter()
                .map(|(id, kind)| Block::new(*id, BlockData::default_for(*kind)))
                .collect(),
            GlobalSettings::default(),
        )
    }

    #[test]
    fn test_session_creation() {
        let session = EditSession::new("client-1", document(&[("a", BlockKind::Text)])).unwrap();

        assert_eq!(session.id, "client-1");
        assert_eq!(session.blocks().len(), 1);
        assert_eq!(session.version(), 0);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_mutation_is_one_undo_step() {
        let mut session = EditSession::new("doc", document(&[("a", BlockKind::Text)])).unwrap();

        let created = session
            .apply(Mutation::InsertBlock {
                index: 1,
                kind: BlockKind::Button,
            })
            .unwrap()
            .unwrap();
        assert_eq!(session.blocks()[1].id, created);

        assert!(session.undo());
        assert_eq!(session.blocks().len(), 1);
        assert!(session.redo());
        assert_eq!(session.blocks().len(), 2);
    }

    #[test]
    fn test_failed_mutation_leaves_history_untouched() {
        let mut session = EditSession::new("doc", document(&[("a", BlockKind::Text)])).unwrap();

        let err = session
            .apply(Mutation::RemoveBlock {
                block_id: "missing".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, EditorError::Mutation(MutationError::BlockNotFound("missing".to_string())));
        assert_eq!(session.version(), 0);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_insert_section_targets() {
        let mut session =
            EditSession::new("doc", document(&[("logo", BlockKind::Logo), ("footer", BlockKind::Footer)])).unwrap();
        let template = find_builtin("feature").unwrap();

        let appended = session.insert_section(&template, SectionTarget::Append).unwrap();
        assert_eq!(session.blocks().last().unwrap().id, "footer");
        assert_eq!(session.blocks()[1].id, appended[0]);

        let err = session
            .insert_section(
                &template,
                SectionTarget::Relative {
                    target_id: "nope".to_string(),
                    placement: Placement::Before,
                },
            )
            .unwrap_err();
        assert!(matches!(err, EditorError::Structural(_)));
    }

    #[test]
    fn test_second_request_is_rejected() {
        let mut session = EditSession::new("doc", document(&[])).unwrap();

        let ticket = session.begin_request().unwrap();
        assert_eq!(session.begin_request(), Err(EditorError::RequestInFlight));

        assert!(session.cancel_request(ticket));
        assert!(!session.cancel_request(ticket));
        assert!(session.begin_request().is_ok());
    }

    #[test]
    fn test_replace_change_is_single_update() {
        let mut session = EditSession::new("doc", document(&[("a", BlockKind::Text)])).unwrap();
        let ticket = session.begin_request().unwrap();

        let generated = vec![
            Block::new("x", BlockData::default_for(BlockKind::Hero)),
            Block::new("x", BlockData::default_for(BlockKind::Text)),
            Block::new("y", BlockData::default_for(BlockKind::Footer)),
        ];
        session
            .complete_request(
                ticket,
                GeneratedChange::Replace {
                    blocks: generated,
                    global_settings: None,
                },
            )
            .unwrap();

        let blocks = session.blocks();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].id, "x");
        assert_ne!(blocks[1].id, "x");
        assert!(blockmail_model::has_unique_ids(blocks));
        assert!(!session.request_in_flight());

        assert!(session.undo());
        assert_eq!(session.blocks().len(), 1);
    }

    #[test]
    fn test_patch_change_is_atomic() {
        let mut session =
            EditSession::new("doc", document(&[("a", BlockKind::Text), ("b", BlockKind::Heading)])).unwrap();

        let ticket = session.begin_request().unwrap();
        let err = session
            .complete_request(
                ticket,
                GeneratedChange::Patch(vec![
                    BlockPatch::new("a").content("body", "Updated"),
                    BlockPatch::new("missing").content("body", "x"),
                ]),
            )
            .unwrap_err();
        assert!(matches!(err, EditorError::Mutation(MutationError::BlockNotFound(_))));
        assert_eq!(session.blocks()[0].data.primary_text(), Some("Write something here."));

        let ticket = session.begin_request().unwrap();
        session
            .complete_request(
                ticket,
                GeneratedChange::Patch(vec![BlockPatch::new("b").content("text", "New heading")]),
            )
            .unwrap();
        assert_eq!(session.blocks()[1].data.primary_text(), Some("New heading"));
    }

    #[test]
    fn test_stale_ticket_rejected() {
        let mut session = EditSession::new("doc", document(&[])).unwrap();
        let ticket = session.begin_request().unwrap();
        session.cancel_request(ticket);

        let result = session.complete_request(ticket, GeneratedChange::Patch(vec![]));
        assert_eq!(result, Err(EditorError::UnknownTicket(ticket.id())));
    }
}
