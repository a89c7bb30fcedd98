//! Active block and highlight reconciliation.
//!
//! Two mechanisms can highlight a block in the PDF view: a rectangle overlay
//! computed from the block's bbox, or the view's own text search. Only one of
//! them is ever active; [`Highlight`] holds whichever one it is.

pub mod scheduler;

use crate::model::{ExtractionMethod, TextBlock};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use scheduler::{RenderSurface, SearchScheduler};

/// Tunables for choosing between overlay and search highlighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightPolicy {
    /// Azure blocks always use the overlay, even with a long selection.
    pub azure_overlay_only: bool,
    /// Selections of at most this many characters use the overlay.
    pub min_search_len: usize,
    pub search_debounce_ms: u64,
}

impl Default for HighlightPolicy {
    fn default() -> Self {
        HighlightPolicy {
            azure_overlay_only: true,
            min_search_len: 2,
            search_debounce_ms: 100,
        }
    }
}

impl HighlightPolicy {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub keyword: String,
    pub match_case: bool,
    pub whole_words: bool,
}

impl SearchQuery {
    /// Case-insensitive, substring search.
    pub fn new(keyword: &str) -> Self {
        SearchQuery {
            keyword: keyword.to_string(),
            match_case: false,
            whole_words: false,
        }
    }
}

/// The single active highlight mechanism.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Highlight {
    #[default]
    None,
    Overlay { block_index: usize, page: usize },
    Search(SearchQuery),
}

impl Highlight {
    pub fn is_overlay(&self) -> bool {
        matches!(self, Highlight::Overlay { .. })
    }

    pub fn is_search(&self) -> bool {
        matches!(self, Highlight::Search(_))
    }
}

/// Pick the highlight mechanism for the active block.
pub fn choose_highlight(
    block_index: usize,
    block: &TextBlock,
    selected_text: Option<&str>,
    policy: &HighlightPolicy,
) -> Highlight {
    let overlay = Highlight::Overlay {
        block_index,
        page: block.page,
    };

    if policy.azure_overlay_only && block.method == ExtractionMethod::Azure {
        return overlay;
    }
    match selected_text {
        Some(text) if text.chars().count() > policy.min_search_len => {
            Highlight::Search(SearchQuery::new(text))
        }
        _ => overlay,
    }
}

/// First block, in list order, whose text contains `needle` verbatim.
pub fn find_block_containing(blocks: &[TextBlock], needle: &str) -> Option<usize> {
    blocks.iter().position(|b| b.text.contains(needle))
}

/// Transient per-document selection. Reset on every new submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionState {
    active_block: Option<TextBlock>,
    selected_text: Option<String>,
    active_index: Option<usize>,
}

impl SelectionState {
    /// Zero or one block.
    pub fn active_blocks(&self) -> &[TextBlock] {
        self.active_block.as_slice()
    }

    pub fn active_block(&self) -> Option<&TextBlock> {
        self.active_block.as_ref()
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selected_text.as_deref()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn reset(&mut self) {
        *self = SelectionState::default();
    }

    /// A block clicked in the list. Drops any free-text selection.
    pub fn click(&mut self, index: usize, block: TextBlock) {
        self.active_block = Some(block);
        self.active_index = Some(index);
        self.selected_text = None;
    }

    /// A free-text selection no block contains. The active block is kept.
    pub fn set_selected_text(&mut self, text: &str) {
        self.selected_text = Some(text.to_string());
    }

    /// A free-text selection that matched `block`.
    pub fn select(&mut self, index: usize, block: TextBlock, text: &str) {
        self.active_block = Some(block);
        self.active_index = Some(index);
        self.selected_text = Some(text.to_string());
    }
}

/// Result of feeding a free-text selection to the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SelectionOutcome {
    /// Blank selection, nothing changed.
    Ignored,
    /// No block contains the selection. Active block and highlight kept.
    NoMatch,
    Matched { index: usize, highlight: Highlight },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn block(text: &str, method: ExtractionMethod) -> TextBlock {
        TextBlock {
            text: text.into(),
            page: 3,
            bbox: BBox::new(0.0, 0.0, 10.0, 10.0),
            width: 100.0,
            height: 100.0,
            method,
        }
    }

    #[test]
    fn test_short_selection_uses_overlay_for_every_method() {
        let policy = HighlightPolicy::default();
        for method in [
            ExtractionMethod::PyMuPdf,
            ExtractionMethod::Google,
            ExtractionMethod::Azure,
            ExtractionMethod::Other("x".into()),
        ] {
            let b = block("ab cd", method);
            assert!(choose_highlight(0, &b, Some("ab"), &policy).is_overlay());
            assert!(choose_highlight(0, &b, Some("é"), &policy).is_overlay());
        }
    }

    #[test]
    fn test_no_selected_text_uses_overlay() {
        let b = block("anything", ExtractionMethod::Google);
        assert_eq!(
            choose_highlight(7, &b, None, &HighlightPolicy::default()),
            Highlight::Overlay {
                block_index: 7,
                page: 3
            }
        );
    }

    #[test]
    fn test_long_selection_uses_search() {
        let b = block("the quick brown fox", ExtractionMethod::PyMuPdf);
        let h = choose_highlight(0, &b, Some("quick"), &HighlightPolicy::default());
        assert_eq!(h, Highlight::Search(SearchQuery::new("quick")));
        if let Highlight::Search(q) = h {
            assert!(!q.match_case);
            assert!(!q.whole_words);
        }
    }

    #[test]
    fn test_azure_bypasses_search() {
        let b = block("the quick brown fox", ExtractionMethod::Azure);
        let mut policy = HighlightPolicy::default();
        assert!(choose_highlight(0, &b, Some("quick"), &policy).is_overlay());

        policy.azure_overlay_only = false;
        assert!(choose_highlight(0, &b, Some("quick"), &policy).is_search());
    }

    #[test]
    fn test_threshold_counts_chars_not_bytes() {
        let b = block("åäö", ExtractionMethod::Google);
        // 3 chars, 6 bytes
        assert!(choose_highlight(0, &b, Some("åäö"), &HighlightPolicy::default()).is_search());
    }

    #[test]
    fn test_find_block_containing_first_match() {
        let blocks = vec![
            block("alpha beta", ExtractionMethod::PyMuPdf),
            block("beta gamma", ExtractionMethod::PyMuPdf),
        ];
        assert_eq!(find_block_containing(&blocks, "beta"), Some(0));
        assert_eq!(find_block_containing(&blocks, "gamma"), Some(1));
        assert_eq!(find_block_containing(&blocks, "Gamma"), None);
        assert_eq!(find_block_containing(&blocks, "alpha beta gamma"), None);
    }

    #[test]
    fn test_selection_state_transitions() {
        let mut s = SelectionState::default();
        assert!(s.active_blocks().is_empty());

        s.select(1, block("x", ExtractionMethod::Google), "x");
        assert_eq!(s.selected_text(), Some("x"));
        assert_eq!(s.active_index(), Some(1));

        s.click(4, block("y", ExtractionMethod::Google));
        assert_eq!(s.selected_text(), None);
        assert_eq!(s.active_index(), Some(4));
        assert_eq!(s.active_blocks().len(), 1);
        assert_eq!(s.active_blocks()[0].text, "y");

        s.reset();
        assert_eq!(s, SelectionState::default());
    }
}
