//! # Blockmail Model
//!
//! Typed document model for the block editor: blocks, global settings,
//! section templates, identifier allocation and position bookkeeping.
//!
//! Invariants every other crate relies on:
//!
//! 1. `position` equals the block's index (see [`positions::renumber`])
//! 2. block ids are unique within a document
//! 3. a block's content/settings always match its kind ([`BlockData::from_parts`])

pub mod assets;
pub mod block;
pub mod defaults;
pub mod document;
pub mod error;
pub mod id_generator;
pub mod positions;
pub mod settings;
pub mod template;

pub use assets::{image_ref, resolve_assets, AssetCatalog, AssetResolver, ImageRef, PLACEHOLDER_IMAGE_URL};
pub use block::{
    Align, Block, BlockData, BlockKind, BlockPatch, ButtonContent, ButtonSettings, DividerContent,
    DividerSettings, FooterContent, FrameStyle, HeadingContent, HeroContent, ImageContent, ImageSettings,
    LogoContent, LogoSettings, SpacerContent, SpacerSettings, TextContent, TextStyle, TypographySettings,
};
pub use defaults::{type_defaults, TypeDefaults};
pub use document::{migrate, Document, SCHEMA_VERSION};
pub use error::{ModelError, ModelResult};
pub use id_generator::IdGenerator;
pub use positions::{check_unique_ids, has_unique_ids, index_of, positions_are_dense, renumber};
pub use settings::GlobalSettings;
pub use template::{builtin_sections, find_builtin, SectionTemplate};
