use crate::artifacts::{ArtifactFilter, LeafContext, NoArtifacts, Pass};
use dom::{BreakingTags, Node, is_line_break, normalize_space};

/// Host hook that substitutes its own text for an element's subtree.
///
/// Returning `None` or an empty string means "extract normally".
pub type NodeOverride<'a> = &'a dyn Fn(&Node) -> Option<String>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Strip exactly one trailing `"\n"` from the document text.
    pub trim_trailing_newline: bool,
    pub breaking: BreakingTags,
}

impl ExtractConfig {
    /// Keeps the trailing newline a final breaking element leaves behind.
    pub fn verbatim() -> Self {
        Self::default()
    }

    /// Reports the logical last line: one trailing newline is trimmed.
    pub fn logical_lines() -> Self {
        Self {
            trim_trailing_newline: true,
            ..Self::default()
        }
    }
}

/// Recursive text walker.
///
/// Each breaking element starts a new block; blocks are joined with `"\n"`.
/// An empty block still counts, so two boundaries with nothing between them
/// leave a blank line.
pub struct Extractor<'a> {
    config: &'a ExtractConfig,
    filter: &'a dyn ArtifactFilter,
    node_override: Option<NodeOverride<'a>>,
}

impl<'a> Extractor<'a> {
    pub fn new(config: &'a ExtractConfig, filter: &'a dyn ArtifactFilter) -> Self {
        Self {
            config,
            filter,
            node_override: None,
        }
    }

    pub fn with_override(mut self, node_override: Option<NodeOverride<'a>>) -> Self {
        self.node_override = node_override;
        self
    }

    /// Text of everything under `root`, with the trailing-newline policy applied.
    pub fn text(&self, root: &Node) -> String {
        let mut out = self.extract_text(root.children(), false);
        if self.config.trim_trailing_newline && out.ends_with('\n') {
            out.pop();
        }
        out
    }

    /// Text of `nodes` as one scan. With `suppress_breaks_at_top` set,
    /// breaking elements in `nodes` are treated as inline.
    pub fn extract_text(&self, nodes: &[Node], suppress_breaks_at_top: bool) -> String {
        self.walk(nodes, suppress_breaks_at_top, false)
    }

    fn walk(&self, nodes: &[Node], suppress: bool, after_break: bool) -> String {
        let mut text = String::new();
        let mut blocks: Vec<String> = Vec::new();

        for (position, node) in nodes.iter().enumerate() {
            match node {
                Node::Element { name, children, .. } => {
                    if let Some(replacement) = self.replacement(node) {
                        log::trace!(target: "editable.extract", "override <{name}>: {replacement:?}");
                        text.push_str(&replacement);
                    } else if !suppress && self.config.breaking.contains(name) {
                        log::trace!(target: "editable.extract", "flush at <{name}>: {text:?}");
                        blocks.push(std::mem::take(&mut text));
                        text = self.walk(children, true, true);
                    } else if is_line_break(name) {
                        // Inside a suppressed block a break still ends the line.
                        text.push('\n');
                    } else {
                        text.push_str(&self.walk(children, suppress, false));
                    }
                }
                Node::Text { text: value, .. } => {
                    let cx = LeafContext {
                        position,
                        after_break,
                        pass: Pass::Extract,
                    };
                    if self.filter.is_artifact_leaf(value, &cx) {
                        log::trace!(target: "editable.extract", "dropped artifact leaf at {position}");
                        continue;
                    }
                    text.push_str(&normalize_space(value));
                }
                Node::Comment { .. } => {}
            }
        }

        if blocks.is_empty() {
            return text;
        }
        blocks.push(text);
        blocks.join("\n")
    }

    fn replacement(&self, node: &Node) -> Option<String> {
        let f = self.node_override?;
        f(node).filter(|s| !s.is_empty())
    }
}

/// [`Extractor::extract_text`] with the default breaking set and no artifact filtering.
pub fn extract_text(
    nodes: &[Node],
    suppress_breaks_at_top: bool,
    node_override: Option<NodeOverride<'_>>,
) -> String {
    let config = ExtractConfig::default();
    Extractor::new(&config, &NoArtifacts)
        .with_override(node_override)
        .extract_text(nodes, suppress_breaks_at_top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineQuirks;

    fn text(nodes: Vec<Node>) -> String {
        extract_text(&nodes, false, None)
    }

    #[test]
    fn inline_content_is_concatenated() {
        let out = text(vec![
            Node::text("a"),
            Node::element("b", vec![Node::text("b")]),
            Node::element("span", vec![Node::element("em", vec![Node::text("c")])]),
        ]);
        assert_eq!(out, "abc");
    }

    #[test]
    fn breaks_and_blocks_flush() {
        let out = text(vec![
            Node::text("A"),
            Node::element("br", vec![]),
            Node::text("B"),
            Node::element("br", vec![]),
        ]);
        assert_eq!(out, "A\nB\n");

        let out = text(vec![Node::element("div", vec![Node::text("A")])]);
        assert_eq!(out, "\nA");
    }

    #[test]
    fn nested_blocks_collapse_to_one_boundary() {
        let out = text(vec![
            Node::text("A"),
            Node::element(
                "div",
                vec![Node::element("div", vec![Node::element("div", vec![Node::text("B")])])],
            ),
        ]);
        assert_eq!(out, "A\nB");
    }

    #[test]
    fn block_nested_in_inline_still_breaks() {
        let out = text(vec![
            Node::text("A"),
            Node::element("span", vec![Node::element("p", vec![Node::text("B")])]),
        ]);
        assert_eq!(out, "A\nB");
    }

    #[test]
    fn line_break_inside_block_is_kept() {
        let out = text(vec![Node::element(
            "div",
            vec![Node::text("a"), Node::element("br", vec![]), Node::text("b")],
        )]);
        assert_eq!(out, "\na\nb");
    }

    #[test]
    fn suppressed_top_level_treats_blocks_as_inline() {
        let nodes = vec![Node::element("p", vec![Node::text("x")]), Node::text("y")];
        assert_eq!(extract_text(&nodes, true, None), "xy");
    }

    #[test]
    fn override_replaces_subtree() {
        let nodes = vec![
            Node::text("hi "),
            Node::element("img", vec![]).with_attribute("alt", Some(":)")),
            Node::element("span", vec![Node::text("there")]),
        ];
        let alt = |n: &Node| n.attr("alt").flatten().map(str::to_string);
        assert_eq!(extract_text(&nodes, false, Some(&alt)), "hi :)there");

        let empty = |_: &Node| Some(String::new());
        assert_eq!(extract_text(&nodes, false, Some(&empty)), "hi there");
    }

    #[test]
    fn nbsp_reads_as_space() {
        assert_eq!(text(vec![Node::text("a\u{00A0}\u{00A0}b")]), "a  b");
    }

    #[test]
    fn comments_contribute_nothing() {
        assert_eq!(text(vec![Node::text("a"), Node::comment("x"), Node::text("b")]), "ab");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(text(vec![]), "");
    }

    #[test]
    fn trailing_newline_policy() {
        let root = Node::editable_root(vec![
            Node::text("A"),
            Node::element("br", vec![]),
            Node::text("B"),
            Node::element("br", vec![]),
        ]);
        let verbatim = ExtractConfig::verbatim();
        let logical = ExtractConfig::logical_lines();
        assert_eq!(Extractor::new(&verbatim, &NoArtifacts).text(&root), "A\nB\n");
        assert_eq!(Extractor::new(&logical, &NoArtifacts).text(&root), "A\nB");
    }

    #[test]
    fn leading_newline_artifact_is_dropped_only_when_asked() {
        let root = Node::editable_root(vec![
            Node::text("a"),
            Node::element("div", vec![Node::text("\n"), Node::text("b")]),
        ]);
        let config = ExtractConfig::default();
        assert_eq!(Extractor::new(&config, &NoArtifacts).text(&root), "a\n\nb");
        let legacy = EngineQuirks::legacy();
        assert_eq!(Extractor::new(&config, &legacy).text(&root), "a\nb");
    }

    #[test]
    fn custom_breaking_set() {
        let config = ExtractConfig {
            breaking: BreakingTags::custom(&["section"]),
            ..ExtractConfig::default()
        };
        let root = Node::editable_root(vec![
            Node::text("a"),
            Node::element("div", vec![Node::text("b")]),
            Node::element("section", vec![Node::text("c")]),
        ]);
        assert_eq!(Extractor::new(&config, &NoArtifacts).text(&root), "ab\nc");
    }
}
