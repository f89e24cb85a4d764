//! # Section insertion
//!
//! Clones a [`SectionTemplate`] into a block sequence. Every operation is
//! pure: the input slice and template are never touched, the returned
//! sequence is renumbered, and inserted ids are disjoint from existing ones.

use blockmail_model::{index_of, renumber, Block, BlockKind, IdGenerator, SectionTemplate};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("Block not found: {0}")]
    NotFound(String),

    #[error("Index {index} is out of range for {len} blocks")]
    OutOfRange { index: usize, len: usize },
}

/// Side of the target block to insert on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// Result of a successful insertion
#[derive(Debug, Clone, PartialEq)]
pub struct Insertion {
    pub blocks: Vec<Block>,
    /// Ids of the new blocks, in document order
    pub inserted_ids: Vec<String>,
}

pub type InsertResult = Result<Insertion, StructuralError>;

/// Insert at `index` (0..=len)
pub fn insert_at(template: &SectionTemplate, blocks: &[Block], index: usize, ids: &mut IdGenerator) -> InsertResult {
    if index > blocks.len() {
        return Err(StructuralError::OutOfRange {
            index,
            len: blocks.len(),
        });
    }

    let new_blocks = instantiate(template, blocks, ids);
    let inserted_ids: Vec<String> = new_blocks.iter().map(|block| block.id.clone()).collect();

    let mut result = Vec::with_capacity(blocks.len() + new_blocks.len());
    result.extend_from_slice(&blocks[..index]);
    result.extend(new_blocks);
    result.extend_from_slice(&blocks[index..]);
    renumber(&mut result);

    debug!(template = %template.id, index, count = inserted_ids.len(), "inserted section");
    Ok(Insertion {
        blocks: result,
        inserted_ids,
    })
}

/// Insert next to the block `target_id`
pub fn insert_relative(
    template: &SectionTemplate,
    blocks: &[Block],
    target_id: &str,
    placement: Placement,
    ids: &mut IdGenerator,
) -> InsertResult {
    let index = index_of(blocks, target_id).ok_or_else(|| StructuralError::NotFound(target_id.to_string()))?;
    let index = match placement {
        Placement::Before => index,
        Placement::After => index + 1,
    };
    insert_at(template, blocks, index, ids)
}

/// Swap the block `target_id` for the template's blocks
pub fn replace(template: &SectionTemplate, blocks: &[Block], target_id: &str, ids: &mut IdGenerator) -> InsertResult {
    let index = index_of(blocks, target_id).ok_or_else(|| StructuralError::NotFound(target_id.to_string()))?;

    let mut remaining = blocks.to_vec();
    remaining.remove(index);
    insert_at(template, &remaining, index, ids)
}

/// Insert at the end, keeping a trailing footer last
pub fn append(template: &SectionTemplate, blocks: &[Block], ids: &mut IdGenerator) -> InsertResult {
    let index = match blocks.last() {
        Some(last) if last.is(BlockKind::Footer) => blocks.len() - 1,
        _ => blocks.len(),
    };
    insert_at(template, blocks, index, ids)
}

/// Insert at the start, after any leading logo/spacer run
pub fn prepend(template: &SectionTemplate, blocks: &[Block], ids: &mut IdGenerator) -> InsertResult {
    let index = blocks
        .iter()
        .take_while(|block| block.kind().is_some_and(|kind| kind.is_wrapper()))
        .count();
    insert_at(template, blocks, index, ids)
}

/// Deep-copy the template payloads and bind ids not already in `existing`
fn instantiate(template: &SectionTemplate, existing: &[Block], ids: &mut IdGenerator) -> Vec<Block> {
    let taken: HashSet<&str> = existing.iter().map(|block| block.id.as_str()).collect();

    template
        .blocks
        .iter()
        .map(|data| {
            // the generator is monotonic, so only pre-existing ids can clash
            let id = loop {
                let candidate = ids.new_id_for(data.type_name());
                if !taken.contains(candidate.as_str()) {
                    break candidate;
                }
            };
            Block::new(id, data.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockmail_model::{find_builtin, BlockData, HeroContent, TypographySettings};

    fn block(id: &str, kind: BlockKind) -> Block {
        Block::new(id, BlockData::default_for(kind))
    }

    fn doc(mut blocks: Vec<Block>) -> Vec<Block> {
        renumber(&mut blocks);
        blocks
    }

    fn three_blocks() -> SectionTemplate {
        find_builtin("call-to-action").unwrap()
    }

    fn ids_of(blocks: &[Block]) -> Vec<&str> {
        blocks.iter().map(|block| block.id.as_str()).collect()
    }

    #[test]
    fn test_insert_before_footer_scenario() {
        let blocks = doc(vec![
            block("spacer-1", BlockKind::Spacer),
            Block::new(
                "hero-1",
                BlockData::Hero {
                    content: HeroContent {
                        headline: "Hi".to_string(),
                        subheadline: None,
                        image: None,
                        button_label: None,
                        button_url: None,
                    },
                    settings: TypographySettings::default(),
                },
            ),
            block("footer-1", BlockKind::Footer),
        ]);
        let mut ids = IdGenerator::new("doc");

        let insertion = insert_relative(&three_blocks(), &blocks, "footer-1", Placement::Before, &mut ids).unwrap();

        assert_eq!(insertion.blocks.len(), 6);
        assert_eq!(
            insertion.blocks.iter().map(|b| b.position).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 5]
        );
        assert_eq!(insertion.blocks.last().unwrap().id, "footer-1");
        assert_eq!(insertion.inserted_ids.len(), 3);
        assert!(insertion.inserted_ids.iter().all(|id| !ids_of(&blocks).contains(&id.as_str())));
        let inserted: Vec<&str> = insertion.inserted_ids.iter().map(String::as_str).collect();
        assert_eq!(&ids_of(&insertion.blocks)[2..5], inserted.as_slice());
    }

    #[test]
    fn test_insert_at_bounds() {
        let blocks = doc(vec![block("text-1", BlockKind::Text)]);
        let mut ids = IdGenerator::new("doc");

        assert!(insert_at(&three_blocks(), &blocks, 1, &mut ids).is_ok());
        assert_eq!(
            insert_at(&three_blocks(), &blocks, 2, &mut ids),
            Err(StructuralError::OutOfRange { index: 2, len: 1 })
        );
    }

    #[test]
    fn test_insert_into_empty_document() {
        let mut ids = IdGenerator::new("doc");
        let insertion = insert_at(&three_blocks(), &[], 0, &mut ids).unwrap();
        assert_eq!(insertion.blocks.len(), 3);
        assert_eq!(
            insertion.blocks.iter().filter_map(|b| b.kind()).collect::<Vec<_>>(),
            three_blocks().kinds()
        );
    }

    #[test]
    fn test_relative_to_missing_target() {
        let blocks = doc(vec![block("text-1", BlockKind::Text)]);
        let mut ids = IdGenerator::new("doc");

        assert_eq!(
            insert_relative(&three_blocks(), &blocks, "nope", Placement::After, &mut ids),
            Err(StructuralError::NotFound("nope".to_string()))
        );
        assert_eq!(
            replace(&three_blocks(), &blocks, "nope", &mut ids),
            Err(StructuralError::NotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_insert_after() {
        let blocks = doc(vec![block("text-1", BlockKind::Text), block("text-2", BlockKind::Text)]);
        let mut ids = IdGenerator::new("doc");

        let insertion = insert_relative(&three_blocks(), &blocks, "text-1", Placement::After, &mut ids).unwrap();
        let result = ids_of(&insertion.blocks);
        assert_eq!(result[0], "text-1");
        assert_eq!(result[4], "text-2");
    }

    #[test]
    fn test_replace_splices_at_target() {
        let blocks = doc(vec![
            block("text-1", BlockKind::Text),
            block("image-1", BlockKind::Image),
            block("text-2", BlockKind::Text),
        ]);
        let mut ids = IdGenerator::new("doc");

        let insertion = replace(&three_blocks(), &blocks, "image-1", &mut ids).unwrap();
        let result = ids_of(&insertion.blocks);
        assert_eq!(result.len(), 5);
        assert_eq!(result[0], "text-1");
        assert_eq!(result[4], "text-2");
        assert!(!result.contains(&"image-1"));
        assert!(blockmail_model::positions_are_dense(&insertion.blocks));
    }

    #[test]
    fn test_append_keeps_footer_last() {
        let mut ids = IdGenerator::new("doc");

        let with_footer = doc(vec![block("text-1", BlockKind::Text), block("footer-1", BlockKind::Footer)]);
        let insertion = append(&three_blocks(), &with_footer, &mut ids).unwrap();
        assert_eq!(insertion.blocks.last().unwrap().id, "footer-1");
        assert_eq!(insertion.blocks[0].id, "text-1");

        let without_footer = doc(vec![block("text-1", BlockKind::Text)]);
        let insertion = append(&three_blocks(), &without_footer, &mut ids).unwrap();
        assert_eq!(insertion.blocks[0].id, "text-1");
        assert_eq!(insertion.blocks.len(), 4);
    }

    #[test]
    fn test_prepend_skips_wrapper_run() {
        let mut ids = IdGenerator::new("doc");
        let blocks = doc(vec![
            block("logo-1", BlockKind::Logo),
            block("spacer-1", BlockKind::Spacer),
            block("text-1", BlockKind::Text),
            block("spacer-2", BlockKind::Spacer),
        ]);

        let insertion = prepend(&three_blocks(), &blocks, &mut ids).unwrap();
        let result = ids_of(&insertion.blocks);
        assert_eq!(&result[..2], &["logo-1", "spacer-1"]);
        assert_eq!(result[5], "text-1");

        let plain = doc(vec![block("text-1", BlockKind::Text)]);
        let insertion = prepend(&three_blocks(), &plain, &mut ids).unwrap();
        assert_eq!(insertion.blocks.last().unwrap().id, "text-1");
    }

    #[test]
    fn test_generated_ids_skip_existing_ones() {
        let mut earlier = IdGenerator::new("doc");
        let clash = earlier.new_id(BlockKind::Heading);
        let blocks = doc(vec![block(&clash, BlockKind::Heading)]);

        let mut ids = IdGenerator::new("doc");
        let insertion = insert_at(&three_blocks(), &blocks, 0, &mut ids).unwrap();

        assert!(!insertion.inserted_ids.contains(&clash));
        assert!(blockmail_model::has_unique_ids(&insertion.blocks));
    }

    #[test]
    fn test_template_is_copied_not_aliased() {
        let template = three_blocks();
        let mut ids = IdGenerator::new("doc");

        let mut insertion = insert_at(&template, &[], 0, &mut ids).unwrap();
        if let BlockData::Heading { content, .. } = &mut insertion.blocks[0].data {
            content.text = "Changed".to_string();
        }

        assert_eq!(template, three_blocks());
    }
}
