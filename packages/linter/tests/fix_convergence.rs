use blockmail_linter::{auto_fix_all, validate};
use blockmail_model::{renumber, Block, BlockData, BlockKind};
use proptest::prelude::*;

fn arb_block() -> impl Strategy<Value = (BlockKind, Option<u32>)> {
    (
        prop::sample::select(BlockKind::ALL.to_vec()),
        prop::option::of(6u32..64),
    )
}

fn build(specs: Vec<(BlockKind, Option<u32>)>) -> Vec<Block> {
    let mut blocks: Vec<Block> = specs
        .into_iter()
        .enumerate()
        .map(|(i, (kind, font_size))| {
            let mut data = BlockData::default_for(kind);
            if let Some(style) = data.text_style_mut() {
                style.font_size = font_size;
            }
            Block::new(format!("{}-{}", kind, i), data)
        })
        .collect();
    renumber(&mut blocks);
    blocks
}

proptest! {
    #[test]
    fn fix_all_is_idempotent(specs in prop::collection::vec(arb_block(), 0..16)) {
        let blocks = build(specs);

        let once = auto_fix_all(&blocks);
        let twice = auto_fix_all(&once);

        prop_assert_eq!(&once, &twice);
    }

    #[test]
    fn fix_all_leaves_nothing_fixable(specs in prop::collection::vec(arb_block(), 0..16)) {
        let fixed = auto_fix_all(&build(specs));

        prop_assert!(validate(&fixed).iter().all(|v| !v.auto_fixable));
        prop_assert!(fixed.iter().enumerate().all(|(i, b)| b.position == i));
    }

    #[test]
    fn fix_all_keeps_ids_unique(specs in prop::collection::vec(arb_block(), 0..16)) {
        let fixed = auto_fix_all(&build(specs));

        let mut ids: Vec<&str> = fixed.iter().map(|b| b.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), fixed.len());
    }
}
