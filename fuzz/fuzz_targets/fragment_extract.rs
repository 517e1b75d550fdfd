#![no_main]

use dom::{Node, assign_node_ids, escape_text, parse_fragment};
use libfuzzer_sys::fuzz_target;
use text_extract::{EngineQuirks, ExtractConfig, Extractor, NoArtifacts};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let mut root = Node::editable_root(parse_fragment(input));
    assign_node_ids(&mut root);
    let config = ExtractConfig::default();
    let text = Extractor::new(&config, &NoArtifacts).text(&root);
    let _ = Extractor::new(&config, &EngineQuirks::legacy()).text(&root);

    // Escaped text with line breaks reads back exactly.
    let markup = escape_text(&text).replace('\n', "<br>");
    let reread = Node::editable_root(parse_fragment(&markup));
    assert_eq!(Extractor::new(&config, &NoArtifacts).text(&reread), text);
});
