use crate::block::{Block, BlockKind};
use crc32fast::Hasher;

/// Stable seed for a document key using CRC32
pub fn get_document_seed(key: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential block id generator for one document.
///
/// Ids look like `hero-1c291ca3-4`: kind prefix, document seed, counter.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(document_key: &str) -> Self {
        Self::from_seed(get_document_seed(document_key))
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Resume numbering after the highest counter already used in `blocks`
    pub fn for_blocks(document_key: &str, blocks: &[Block]) -> Self {
        let mut generator = Self::new(document_key);
        let marker = format!("-{}-", generator.seed);
        generator.count = blocks
            .iter()
            .filter_map(|block| {
                let (_, suffix) = block.id.rsplit_once(&marker)?;
                suffix.parse::<u64>().ok()
            })
            .max()
            .unwrap_or(0);
        generator
    }

    /// Generate the next id for a block of `kind`
    pub fn new_id(&mut self, kind: BlockKind) -> String {
        self.new_id_for(kind.as_str())
    }

    /// Generate the next id under an arbitrary type prefix
    pub fn new_id_for(&mut self, type_hint: &str) -> String {
        self.count += 1;
        format!("{}-{}-{}", type_hint, self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockData;

    #[test]
    fn test_document_seed_is_stable() {
        assert_eq!(get_document_seed("newsletter-42"), get_document_seed("newsletter-42"));
        assert_ne!(get_document_seed("newsletter-42"), get_document_seed("newsletter-43"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::new("doc");

        let id1 = gen.new_id(BlockKind::Hero);
        let id2 = gen.new_id(BlockKind::Text);

        assert!(id1.starts_with("hero-"));
        assert!(id1.ends_with("-1"));
        assert!(id2.starts_with("text-"));
        assert!(id2.ends_with("-2"));
        assert!(id1.contains(gen.seed()));
    }

    #[test]
    fn test_for_blocks_resumes_after_existing_ids() {
        let mut first = IdGenerator::new("doc");
        let blocks: Vec<Block> = (0..3)
            .map(|_| Block::new(first.new_id(BlockKind::Text), BlockData::default_for(BlockKind::Text)))
            .collect();

        let mut resumed = IdGenerator::for_blocks("doc", &blocks);
        let next = resumed.new_id(BlockKind::Text);
        assert!(next.ends_with("-4"));
        assert!(blocks.iter().all(|block| block.id != next));
    }
}
