//! # Blockmail Editor
//!
//! Editing engine for block email documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: typed blocks, settings, templates    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Section insertion (pure)                 │
//! │  - Block mutations (pure, validated)        │
//! │  - Snapshot undo/redo with version clock    │
//! │  - One generation request at a time         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ persistence: background worker, newest wins │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Snapshots are values**: history stores whole `(blocks, settings)` states
//! 2. **Pure transforms**: insertion and mutations return new sequences
//! 3. **Positions are derived**: every result is renumbered before it is stored
//! 4. **Storage follows the user**: every visible change is queued for saving,
//!    and an older version never overwrites a newer one
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blockmail_editor::{EditSession, Mutation, SectionTarget};
//!
//! let mut session = EditSession::new("newsletter-42", document)?;
//! let header = blockmail_model::find_builtin("header").unwrap();
//! session.insert_section(&header, SectionTarget::Prepend)?;
//! session.apply(Mutation::RemoveBlock { block_id: "text-1".into() })?;
//! session.undo();
//! ```

mod errors;
mod history;
mod mutations;
mod persistence;
pub mod sections;
mod session;

pub use errors::{EditorError, EditorResult};
pub use history::{History, HistorySnapshot, SnapshotPatch, VersionedSnapshot, DEFAULT_HISTORY_LIMIT};
pub use mutations::{Mutation, MutationError, MutationResult};
pub use persistence::{PersistError, PersistenceBackend, Persister, SaveStatus};
pub use sections::{Insertion, Placement, StructuralError};
pub use session::{EditSession, GeneratedChange, RequestTicket, SectionTarget};
