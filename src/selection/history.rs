//! Per-document expansion history backing "shrink selection".
//!
//! The expander itself is stateless. To shrink, the server remembers which
//! range each expansion started from and retraces those steps. A history only
//! describes one revision of a document, so edits and closes drop it.

use dashmap::DashMap;
use tower_lsp_server::ls_types::Range;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    from: Range,
    to: Range,
}

#[derive(Debug, Default)]
pub struct SelectionHistory {
    steps: DashMap<Url, Vec<Step>>,
}

impl SelectionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember that `from` was expanded into `to`.
    ///
    /// Continuing from the last recorded result extends the current session;
    /// expanding anything else starts a new one.
    pub fn record(&self, uri: &Url, from: Range, to: Range) {
        let mut steps = self.steps.entry(uri.clone()).or_default();
        if steps.last().is_some_and(|last| last.to != from) {
            steps.clear();
        }
        steps.push(Step { from, to });
    }

    /// The range that was expanded into `current`, if `current` is the latest
    /// recorded expansion.
    pub fn shrink(&self, uri: &Url, current: Range) -> Option<Range> {
        let mut steps = self.steps.get_mut(uri)?;
        if steps.last()?.to != current {
            return None;
        }
        steps.pop().map(|step| step.from)
    }

    /// Forget the history of one document.
    pub fn clear(&self, uri: &Url) {
        self.steps.remove(uri);
    }

    pub fn depth(&self, uri: &Url) -> usize {
        self.steps.get(uri).map(|steps| steps.len()).unwrap_or(0)
    }
}
