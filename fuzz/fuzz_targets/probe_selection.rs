#![no_main]

use dom::{Node, assign_node_ids, parse_fragment};
use libfuzzer_sys::fuzz_target;
use selection_core::{LinearProbe, ProbeSelectionBackend, SelectionBackend, TextLayout};

fuzz_target!(|data: &[u8]| {
    let Some((&caret, rest)) = data.split_first() else {
        return;
    };
    let Ok(input) = std::str::from_utf8(rest) else {
        return;
    };

    let mut root = Node::editable_root(parse_fragment(input));
    assign_node_ids(&mut root);
    let len = TextLayout::new(&root).len();

    // Content diffing must terminate and never panic, wherever the caret is.
    let mut probe = LinearProbe::new();
    let at = if len == 0 { 0 } else { caret as usize % (len + 1) };
    probe.place(at, at);
    let backend = ProbeSelectionBackend::new(probe);
    if let Ok(locus) = backend.current_locus(&root) {
        let _ = backend.local_offset(&root, locus.leaf);
    }
    let _ = backend.selected_span(&root);
});
