use text_extract::ExtractConfig;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditableConfig {
    pub extract: ExtractConfig,
}

impl EditableConfig {
    /// `text()` reports the logical last line: one trailing newline is dropped.
    pub fn logical_lines() -> Self {
        Self {
            extract: ExtractConfig::logical_lines(),
        }
    }
}
