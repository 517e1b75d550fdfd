use dom::{Node, parse_fragment};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use text_extract::{ArtifactFilter, EngineQuirks, ExtractConfig, Extractor, NoArtifacts};

const FORMAT_V1: &str = "extraction-v1";

#[derive(Debug, Deserialize)]
struct Manifest {
    format: String,
    cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
struct Case {
    id: String,
    markup: String,
    expected: String,
    #[serde(default)]
    trim_trailing_newline: bool,
    #[serde(default)]
    quirks: Quirks,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Quirks {
    #[default]
    None,
    Native,
    Legacy,
}

fn load(name: &str) -> Manifest {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read fixture {path:?}: {err}"));
    toml::from_str(&content).unwrap_or_else(|err| panic!("failed to parse fixture {path:?}: {err}"))
}

#[test]
fn extraction_fixtures() {
    let manifest = load("extraction.toml");
    assert_eq!(manifest.format, FORMAT_V1, "unsupported fixture format");
    assert!(!manifest.cases.is_empty());

    let native = EngineQuirks::native();
    let legacy = EngineQuirks::legacy();
    let mut failures = Vec::new();

    for case in &manifest.cases {
        let root = Node::editable_root(parse_fragment(&case.markup));
        let config = ExtractConfig {
            trim_trailing_newline: case.trim_trailing_newline,
            ..ExtractConfig::default()
        };
        let filter: &dyn ArtifactFilter = match case.quirks {
            Quirks::None => &NoArtifacts,
            Quirks::Native => &native,
            Quirks::Legacy => &legacy,
        };
        let actual = Extractor::new(&config, filter).text(&root);
        if actual != case.expected {
            failures.push(format!(
                "{}: expected {:?}, got {:?}",
                case.id, case.expected, actual
            ));
        }
    }

    assert!(failures.is_empty(), "fixture failures:\n{}", failures.join("\n"));
}
