// crates/seclens-app/src/diff.rs
// Side-by-side line diff between the submitted and the fixed code

use similar::{ChangeTag, TextDiff};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Unchanged,
    /// A removed line paired with its replacement
    Modified,
    Removed,
    Added,
}

impl RowKind {
    /// CSS classes for the (old, new) cells
    pub fn cell_classes(self) -> (&'static str, &'static str) {
        match self {
            RowKind::Unchanged => ("diff-cell", "diff-cell"),
            RowKind::Modified => ("diff-cell diff-removed", "diff-cell diff-added"),
            RowKind::Removed => ("diff-cell diff-removed", "diff-cell diff-empty"),
            RowKind::Added => ("diff-cell diff-empty", "diff-cell diff-added"),
        }
    }
}

/// One side of a row; `number` is 1-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRow {
    pub kind: RowKind,
    pub old: Option<DiffLine>,
    pub new: Option<DiffLine>,
}

/// Turns two texts into rows for the split view. Implementations do no I/O.
pub trait DiffRenderer: Send + Sync {
    fn render(&self, original: &str, modified: &str) -> Vec<DiffRow>;
}

/// Renderer installed through Leptos context at composition time
#[derive(Clone)]
pub struct DiffRendererContext(pub Arc<dyn DiffRenderer>);

impl DiffRendererContext {
    pub fn new(renderer: impl DiffRenderer + 'static) -> Self {
        Self(Arc::new(renderer))
    }

    pub fn render(&self, original: &str, modified: &str) -> Vec<DiffRow> {
        self.0.render(original, modified)
    }
}

/// What the diff tab shows: the skeleton until the first frame has painted
/// and a renderer is installed, rows after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffPane {
    Loading,
    Ready(Vec<DiffRow>),
}

impl DiffPane {
    pub fn resolve(
        renderer: Option<&DiffRendererContext>,
        ready: bool,
        original: &str,
        modified: &str,
    ) -> Self {
        match renderer {
            Some(renderer) if ready => DiffPane::Ready(renderer.render(original, modified)),
            _ => DiffPane::Loading,
        }
    }
}

/// Line diff via `similar`. Runs of deletions and insertions are zipped
/// into `Modified` rows; the leftover side becomes `Removed` or `Added`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitDiffRenderer;

impl DiffRenderer for SplitDiffRenderer {
    fn render(&self, original: &str, modified: &str) -> Vec<DiffRow> {
        let diff = TextDiff::from_lines(original, modified);
        let mut rows = Vec::new();
        let mut removed = Vec::new();
        let mut added = Vec::new();

        for change in diff.iter_all_changes() {
            let text = change.value().trim_end_matches(['\r', '\n']).to_string();
            match change.tag() {
                ChangeTag::Equal => {
                    flush_pending(&mut rows, &mut removed, &mut added);
                    rows.push(DiffRow {
                        kind: RowKind::Unchanged,
                        old: change.old_index().map(|i| DiffLine {
                            number: i + 1,
                            text: text.clone(),
                        }),
                        new: change.new_index().map(|i| DiffLine {
                            number: i + 1,
                            text,
                        }),
                    });
                }
                ChangeTag::Delete => {
                    if let Some(i) = change.old_index() {
                        removed.push(DiffLine { number: i + 1, text });
                    }
                }
                ChangeTag::Insert => {
                    if let Some(i) = change.new_index() {
                        added.push(DiffLine { number: i + 1, text });
                    }
                }
            }
        }
        flush_pending(&mut rows, &mut removed, &mut added);

        rows
    }
}

fn flush_pending(rows: &mut Vec<DiffRow>, removed: &mut Vec<DiffLine>, added: &mut Vec<DiffLine>) {
    let mut removed = removed.drain(..);
    let mut added = added.drain(..);
    loop {
        let kind = match (!removed.as_slice().is_empty(), !added.as_slice().is_empty()) {
            (true, true) => RowKind::Modified,
            (true, false) => RowKind::Removed,
            (false, true) => RowKind::Added,
            (false, false) => break,
        };
        rows.push(DiffRow {
            kind,
            old: removed.next(),
            new: added.next(),
        });
    }
}
