use super::{Container, ProbeRange, ProbeSurface};
use crate::backend::SelectionBackend;
use crate::error::SelectionError;
use crate::leaves::{collect_leaves, leaf_value};
use crate::range::{Locus, SelectionHandle, SelectionRange};
use dom::{BreakingTags, Id, Node, char_len, normalize_space};
use memchr::memmem;
use text_extract::{ArtifactFilter, EngineQuirks};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Chars moved per probe extension while bracketing. Extension repeats
    /// until a move falls short, so this only bounds the work per call.
    pub step: usize,
    /// Breaking elements seen by the artifact filter while collecting leaves.
    /// Keep it equal to the extraction config's set.
    pub breaking: BreakingTags,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            step: 1000,
            breaking: BreakingTags::standard(),
        }
    }
}

/// What the backend itself committed, with the engine's view at the time.
#[derive(Debug)]
struct Committed {
    leaf: Id,
    range: SelectionRange,
    before: String,
    selected: String,
}

/// Backend for engines that only offer a steppable text range.
///
/// Loci are recovered by content diffing: the text before the caret is
/// consumed leaf by leaf, greedily, in document order. Leaf text repeated
/// earlier in the document can make it settle on the wrong leaf; that is a
/// known limit of the approach, not something callers can rely on.
///
/// A caret at the end of one leaf and at the start of the next look the same
/// to the engine. Selections made through [`SelectionBackend::select`] are
/// therefore remembered and answered from memory for as long as the engine
/// still reports exactly what it reported when they were committed.
pub struct ProbeSelectionBackend<S: ProbeSurface> {
    surface: S,
    config: ProbeConfig,
    filter: Box<dyn ArtifactFilter>,
    committed: Option<Committed>,
}

impl<S: ProbeSurface> ProbeSelectionBackend<S> {
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, ProbeConfig::default())
    }

    pub fn with_config(surface: S, config: ProbeConfig) -> Self {
        Self {
            surface,
            config,
            filter: Box::new(EngineQuirks::legacy()),
            committed: None,
        }
    }

    pub fn with_filter(mut self, filter: impl ArtifactFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Host access to the engine, e.g. to move the caret as a user would.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn step(&self) -> isize {
        self.config.step.clamp(1, isize::MAX as usize) as isize
    }

    fn active(&self, root: &Node) -> Result<S::Range, SelectionError> {
        let range = self.surface.selection_range(root);
        if range.container() == Container::Body {
            return Err(SelectionError::NoSelection);
        }
        Ok(range)
    }

    /// Normalized text from the start of the document to the start of `range`.
    fn preceding_text(&self, range: &S::Range) -> String {
        let step = self.step();
        let mut probe = range.clone();
        probe.collapse(true);
        while probe.move_start(-step) == -step {}
        normalize_space(&probe.text()).into_owned()
    }

    fn remembered(&self, root: &Node, range: &S::Range) -> Option<&Committed> {
        let committed = self.committed.as_ref()?;
        leaf_value(root, committed.leaf)?;
        let unchanged = normalize_space(&range.text()) == committed.selected.as_str()
            && self.preceding_text(range) == committed.before;
        unchanged.then_some(committed)
    }

    fn diff_locus(&self, root: &Node, range: &S::Range) -> Result<Locus, SelectionError> {
        let snapshot = self.preceding_text(range);
        let leaves = collect_leaves(root.children(), self.filter.as_ref(), &self.config.breaking);
        let mut rest = snapshot.as_str();
        let mut candidate = None;

        for leaf in &leaves {
            let value = leaf.normalized();
            if value.is_empty() {
                continue;
            }
            if let Some(at) = memmem::find(rest.as_bytes(), value.as_bytes()) {
                rest = &rest[at + value.len()..];
                candidate = Some(*leaf);
                continue;
            }
            if let Some(offset) = caret_within(&value, rest) {
                log::trace!(target: "editable.probe", "leaf {} contains the caret at {offset}", leaf.id.0);
                return Ok(Locus::new(leaf.id, offset));
            }
        }

        let Some(candidate) = candidate else {
            return Err(SelectionError::NoSelection);
        };
        if rest.is_empty() {
            return Ok(Locus::new(candidate.id, candidate.len()));
        }
        log::trace!(
            target: "editable.probe",
            "{} snapshot chars left unmatched after leaf {}",
            char_len(rest),
            candidate.id.0
        );
        let offset = self.probe_offset(range, &candidate.normalized());
        Err(SelectionError::AmbiguousMatch {
            best: Locus::new(candidate.id, offset),
        })
    }

    /// Step the start of `range` back one char at a time until the bracketed
    /// text is a prefix of `value`, or the probe leaves its element.
    fn probe_offset(&self, range: &S::Range, value: &str) -> usize {
        let mut probe = range.clone();
        probe.collapse(true);
        let mut container = probe.container();

        for step in 1..=char_len(value) {
            if probe.move_start(-1) != -1 {
                break;
            }
            let next = probe.container();
            if next != container {
                log::trace!(target: "editable.probe", "container changed after {step} steps");
                return step - 1;
            }
            container = next;
            if value.starts_with(normalize_space(&probe.text()).as_ref()) {
                return step;
            }
        }
        0
    }

    /// Shrink a range bracketing the whole document down to the first run of
    /// text equal to `value`.
    fn bracket(&self, range: &mut S::Range, value: &str) -> bool {
        let step = self.step();
        while range.move_start(-step) == -step {}
        while range.move_end(step) == step {}

        let text = normalize_space(&range.text()).into_owned();
        let mut rest = text.as_str();
        while !rest.starts_with(value) {
            let mut chars = rest.chars();
            if chars.next().is_none() || range.move_start(1) != 1 {
                return false;
            }
            rest = chars.as_str();
        }
        while rest != value {
            let mut chars = rest.chars();
            if chars.next_back().is_none() || range.move_end(-1) != -1 {
                return false;
            }
            rest = chars.as_str();
        }
        true
    }
}

/// Chars of `value` before the caret, when the unconsumed snapshot `rest`
/// ends inside `value`.
///
/// `rest` may open with engine text no collected leaf accounts for, such as
/// filtered indentation. The longest suffix of `rest` that `value` starts with
/// wins; a `rest` of whitespace only puts the caret at the start of `value`.
fn caret_within(value: &str, rest: &str) -> Option<usize> {
    let inside = rest
        .char_indices()
        .map(|(at, _)| &rest[at..])
        .find(|tail| tail.len() < value.len() && value.starts_with(tail));
    match inside {
        Some(tail) => Some(char_len(tail)),
        None => rest.chars().all(char::is_whitespace).then_some(0),
    }
}

impl<S: ProbeSurface> SelectionBackend for ProbeSelectionBackend<S> {
    fn artifacts(&self) -> &dyn ArtifactFilter {
        self.filter.as_ref()
    }

    fn current_locus(&self, root: &Node) -> Result<Locus, SelectionError> {
        let range = self.active(root)?;
        if let Some(committed) = self.remembered(root, &range) {
            return Ok(Locus::new(committed.leaf, committed.range.start));
        }
        self.diff_locus(root, &range)
    }

    fn local_offset(&self, root: &Node, leaf: Id) -> Result<usize, SelectionError> {
        let range = self.active(root)?;
        if let Some(committed) = self.remembered(root, &range)
            && committed.leaf == leaf
        {
            return Ok(committed.range.start);
        }
        let value = leaf_value(root, leaf).ok_or(SelectionError::LeafNotFound(leaf))?;
        Ok(self.probe_offset(&range, &normalize_space(value)))
    }

    fn select(
        &mut self,
        root: &Node,
        leaf: Id,
        start: usize,
        end: usize,
    ) -> Result<SelectionHandle, SelectionError> {
        self.committed = None;
        let value = leaf_value(root, leaf).ok_or(SelectionError::LeafNotFound(leaf))?;
        let value = normalize_space(value);
        if value.is_empty() {
            // Empty leaves occupy no characters the engine could bracket.
            return Err(SelectionError::LeafNotFound(leaf));
        }

        let mut range = self.surface.selection_range(root);
        if range.container() == Container::Body {
            log::debug!(target: "editable.probe", "probe resolved to the body; focusing the root");
            self.surface.focus(root);
            range = self.surface.selection_range(root);
            if range.container() == Container::Body {
                return Err(SelectionError::NoSelection);
            }
        }

        if !self.bracket(&mut range, &value) {
            log::debug!(target: "editable.probe", "could not bracket leaf {}", leaf.0);
            return Err(SelectionError::LeafNotFound(leaf));
        }

        let len = char_len(&value);
        let selection = SelectionRange::new(start, end).clamp_to(len);
        range.move_start(selection.start as isize);
        range.move_end(-((len - selection.end) as isize));
        self.surface.commit(&range);

        self.committed = Some(Committed {
            leaf,
            range: selection,
            before: self.preceding_text(&range),
            selected: normalize_space(&range.text()).into_owned(),
        });
        Ok(SelectionHandle {
            leaf,
            range: selection,
        })
    }

    fn selected_span(&self, root: &Node) -> Result<SelectionHandle, SelectionError> {
        let range = self.active(root)?;
        if let Some(committed) = self.remembered(root, &range) {
            return Ok(SelectionHandle {
                leaf: committed.leaf,
                range: committed.range,
            });
        }
        let locus = match self.diff_locus(root, &range) {
            Ok(locus) => locus,
            Err(SelectionError::AmbiguousMatch { best }) => best,
            Err(err) => return Err(err),
        };
        let len = leaf_value(root, locus.leaf).map_or(0, char_len);
        let selected = char_len(&range.text());
        Ok(SelectionHandle {
            leaf: locus.leaf,
            range: SelectionRange::new(locus.offset, locus.offset + selected).clamp_to(len),
        })
    }

    fn clear(&mut self) {
        self.committed = None;
        self.surface.blur();
    }
}
