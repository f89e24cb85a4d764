use blockmail_compiler_html::render;
use blockmail_model::{builtin_sections, Block, GlobalSettings, IdGenerator};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn document(repeat: usize) -> Vec<Block> {
    let mut ids = IdGenerator::new("bench");
    let mut blocks = Vec::new();
    for _ in 0..repeat {
        for section in builtin_sections() {
            for data in section.blocks {
                let kind = data.kind().expect("builtin sections are supported");
                blocks.push(Block::new(ids.new_id(kind), data));
            }
        }
    }
    blockmail_model::renumber(&mut blocks);
    blocks
}

fn render_small_document(c: &mut Criterion) {
    let blocks = document(1);
    let settings = GlobalSettings::default();

    c.bench_function("render_small_document", |b| {
        b.iter(|| render(black_box(&blocks), black_box(&settings)))
    });
}

fn render_large_document(c: &mut Criterion) {
    let blocks = document(20);
    let settings = GlobalSettings::default();

    c.bench_function("render_large_document", |b| {
        b.iter(|| render(black_box(&blocks), black_box(&settings)))
    });
}

criterion_group!(benches, render_small_document, render_large_document);
criterion_main!(benches);
