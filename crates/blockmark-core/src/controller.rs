use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::extraction::ExtractionService;
use crate::geometry::{overlay_box, OverlayBox, Rotation};
use crate::model::{ExtractionResult, TextBlock};
use crate::ordering::{self, Section};
use crate::selection::{
    choose_highlight, find_block_containing, Highlight, HighlightPolicy, RenderSurface,
    SearchQuery, SearchScheduler, SelectionOutcome, SelectionState,
};
use crate::text;
use serde::Serialize;
use std::time::Instant;

/// Ticket for one in-flight extraction request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub seq: u64,
    pub source_url: String,
    pub file_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Applied,
    /// A newer submission was started before this one finished.
    Stale,
}

/// The document currently shown: proxied PDF plus its ordered blocks.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub source_url: String,
    pub file_url: String,
    pub text: String,
    pub blocks: Vec<TextBlock>,
}

/// One row of the block list as displayed.
#[derive(Debug, Clone, Serialize)]
pub struct BlockRow<'a> {
    pub index: usize,
    pub block: &'a TextBlock,
    pub new_section: bool,
    pub active: bool,
}

/// Page-level state owner. Everything the viewer shows is derived from here.
pub struct Controller {
    policy: HighlightPolicy,
    section_gap: f64,
    next_seq: u64,
    in_flight: Option<u64>,
    document: Option<Document>,
    selection: SelectionState,
    highlight: Highlight,
    scheduler: SearchScheduler,
}

impl Controller {
    pub fn new(config: &ViewerConfig) -> Self {
        Controller {
            policy: config.highlight.clone(),
            section_gap: config.section_gap,
            next_seq: 0,
            in_flight: None,
            document: None,
            selection: SelectionState::default(),
            highlight: Highlight::None,
            scheduler: SearchScheduler::new(config.highlight.search_debounce()),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The submit control is disabled while a request is pending.
    pub fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Ordered blocks of the current document.
    pub fn blocks(&self) -> &[TextBlock] {
        self.document
            .as_ref()
            .map(|d| d.blocks.as_slice())
            .unwrap_or(&[])
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    pub fn pending_search(&self) -> Option<&SearchQuery> {
        self.scheduler.pending()
    }

    /// Start a request. Any earlier request still in flight becomes stale.
    pub fn begin_submission(&mut self, source_url: &str, file_url: String) -> Submission {
        self.next_seq += 1;
        let seq = self.next_seq;
        if let Some(prev) = self.in_flight.replace(seq) {
            tracing::debug!(prev, seq, "superseding in-flight extraction request");
        }
        Submission {
            seq,
            source_url: source_url.to_string(),
            file_url,
        }
    }

    /// Apply a finished request. An accepted document clears whatever the
    /// surface still shows from the previous one.
    pub fn complete_submission(
        &mut self,
        submission: &Submission,
        result: Result<ExtractionResult, ViewerError>,
        surface: &mut dyn RenderSurface,
        now: Instant,
    ) -> Result<SubmissionStatus, ViewerError> {
        let status = self.accept(submission, result)?;
        if status == SubmissionStatus::Applied {
            self.scheduler.reschedule(surface, None, now);
        }
        Ok(status)
    }

    /// Apply a finished request to the controller's own state only.
    pub(crate) fn accept(
        &mut self,
        submission: &Submission,
        result: Result<ExtractionResult, ViewerError>,
    ) -> Result<SubmissionStatus, ViewerError> {
        if self.in_flight != Some(submission.seq) {
            tracing::debug!(
                seq = submission.seq,
                url = %submission.source_url,
                "discarding stale extraction response"
            );
            return Ok(SubmissionStatus::Stale);
        }
        self.in_flight = None;

        let extracted = match result {
            Ok(extracted) => extracted,
            Err(e) => {
                tracing::error!(url = %submission.source_url, error = %e, "extraction failed");
                return Err(e);
            }
        };

        let total = extracted.blocks.len();
        let mut blocks: Vec<TextBlock> = extracted
            .blocks
            .into_iter()
            .filter(|b| match b.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "dropping block");
                    false
                }
            })
            .collect();
        ordering::order_in_place(&mut blocks);

        tracing::info!(
            url = %submission.source_url,
            blocks = blocks.len(),
            dropped = total - blocks.len(),
            "extraction applied"
        );

        self.document = Some(Document {
            source_url: submission.source_url.clone(),
            file_url: submission.file_url.clone(),
            text: extracted.text,
            blocks,
        });
        self.selection.reset();
        self.highlight = Highlight::None;
        self.scheduler.cancel();

        Ok(SubmissionStatus::Applied)
    }

    /// Fetch `source_url` from `service` and apply the result.
    pub fn submit(
        &mut self,
        service: &dyn ExtractionService,
        source_url: &str,
        surface: &mut dyn RenderSurface,
        now: Instant,
    ) -> Result<SubmissionStatus, ViewerError> {
        let submission = self.begin_submission(source_url, service.file_url(source_url));
        let result = service.extract(source_url);
        self.complete_submission(&submission, result, surface, now)
    }

    /// A block clicked in the list: always an overlay on that block's page.
    pub fn click_block(
        &mut self,
        index: usize,
        surface: &mut dyn RenderSurface,
        now: Instant,
    ) -> Result<&Highlight, ViewerError> {
        let block = self
            .blocks()
            .get(index)
            .cloned()
            .ok_or_else(|| ViewerError::BlockIndexOutOfRange {
                index,
                len: self.blocks().len(),
            })?;

        tracing::debug!(index, page = block.page, "block clicked");
        self.selection.click(index, block);
        self.apply_highlight(index, surface, now);
        Ok(&self.highlight)
    }

    /// Free text selected in the extracted-text pane.
    pub fn select_text(
        &mut self,
        raw: &str,
        surface: &mut dyn RenderSurface,
        now: Instant,
    ) -> SelectionOutcome {
        let selected = raw.trim();
        if selected.is_empty() {
            return SelectionOutcome::Ignored;
        }

        let Some(index) = find_block_containing(self.blocks(), selected) else {
            tracing::debug!(selected, "selection matches no block");
            self.selection.set_selected_text(selected);
            return SelectionOutcome::NoMatch;
        };

        let block = self.blocks()[index].clone();
        self.selection.select(index, block, selected);
        self.apply_highlight(index, surface, now);

        SelectionOutcome::Matched {
            index,
            highlight: self.highlight.clone(),
        }
    }

    fn apply_highlight(&mut self, index: usize, surface: &mut dyn RenderSurface, now: Instant) {
        let Some(block) = self.selection.active_block() else {
            return;
        };
        let highlight =
            choose_highlight(index, block, self.selection.selected_text(), &self.policy);

        let query = match &highlight {
            Highlight::Search(q) => Some(q.clone()),
            _ => None,
        };
        self.scheduler.reschedule(surface, query, now);
        self.highlight = highlight;
    }

    /// Run the debounced search highlight if it is due.
    pub fn poll(&mut self, surface: &mut dyn RenderSurface, now: Instant) -> Option<SearchQuery> {
        self.scheduler.poll(surface, now)
    }

    /// Overlay painter: the box to draw on `page_index`, if the active highlight is an overlay there.
    pub fn overlay_for_page(&self, page_index: usize, rotation: Rotation) -> Option<OverlayBox> {
        let Highlight::Overlay { block_index, page } = &self.highlight else {
            return None;
        };
        if *page != page_index {
            return None;
        }
        overlay_box(self.blocks().get(*block_index)?, rotation)
    }

    pub fn rows(&self) -> Vec<BlockRow<'_>> {
        let blocks = self.blocks();
        let active = self.selection.active_index();
        blocks
            .iter()
            .enumerate()
            .map(|(i, block)| BlockRow {
                index: i,
                block,
                new_section: ordering::is_new_section_with_gap(
                    block,
                    i.checked_sub(1).map(|p| &blocks[p]),
                    self.section_gap,
                ),
                active: active == Some(i),
            })
            .collect()
    }

    pub fn sections(&self) -> Vec<Section> {
        ordering::sections(self.blocks(), self.section_gap)
    }

    /// Extracted text split on page-break markers.
    pub fn pages(&self) -> Vec<String> {
        self.document
            .as_ref()
            .map(|d| text::split_pages(&d.text))
            .unwrap_or_default()
    }
}
