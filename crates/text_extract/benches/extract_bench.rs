use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dom::{Node, assign_node_ids, parse_fragment};
use text_extract::{EngineQuirks, ExtractConfig, Extractor};

const SMALL_BLOCKS: usize = 64;
const LARGE_BLOCKS: usize = 10_000;

fn make_document(blocks: usize) -> Node {
    let mut markup = String::with_capacity(blocks * 64);
    for i in 0..blocks {
        if i % 3 == 0 {
            markup.push_str("line <b>bold</b>&nbsp;text<br>");
        } else {
            markup.push_str("<div>block <span>with <em>inline</em></span> content</div>");
        }
    }
    let mut root = Node::editable_root(parse_fragment(&markup));
    assign_node_ids(&mut root);
    root
}

fn bench_extract_small(c: &mut Criterion) {
    let root = make_document(SMALL_BLOCKS);
    let config = ExtractConfig::default();
    let quirks = EngineQuirks::native();
    c.bench_function("bench_extract_small", |b| {
        b.iter(|| {
            let text = Extractor::new(&config, &quirks).text(black_box(&root));
            black_box(text.len());
        });
    });
}

fn bench_extract_large(c: &mut Criterion) {
    let root = make_document(LARGE_BLOCKS);
    let config = ExtractConfig::default();
    let quirks = EngineQuirks::native();
    c.bench_function("bench_extract_large", |b| {
        b.iter(|| {
            let text = Extractor::new(&config, &quirks).text(black_box(&root));
            black_box(text.len());
        });
    });
}

fn bench_extract_with_override(c: &mut Criterion) {
    let root = make_document(LARGE_BLOCKS);
    let config = ExtractConfig::default();
    let quirks = EngineQuirks::native();
    let bold = |n: &Node| (n.name() == Some("b")).then(|| "*".to_string());
    c.bench_function("bench_extract_with_override", |b| {
        b.iter(|| {
            let text = Extractor::new(&config, &quirks)
                .with_override(Some(&bold))
                .text(black_box(&root));
            black_box(text.len());
        });
    });
}

criterion_group!(
    benches,
    bench_extract_small,
    bench_extract_large,
    bench_extract_with_override
);
criterion_main!(benches);
