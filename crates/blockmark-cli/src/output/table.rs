use blockmark_core::controller::{BlockRow, Controller};
use blockmark_core::geometry::{transform_for, OverlayBox, PixelBox};
use blockmark_core::model::TextBlock;
use blockmark_core::selection::{Highlight, SelectionOutcome};
use blockmark_core::text::preview;

const PREVIEW_CHARS: usize = 60;

pub fn format_document(controller: &Controller) -> String {
    let mut out = String::new();

    let Some(doc) = controller.document() else {
        return "No document loaded.\n".into();
    };

    out.push_str(&format!("=== {} ===\n\n", doc.source_url));
    out.push_str(&format!("  PDF view: {}\n", doc.file_url));
    out.push_str(&format!(
        "  {} block(s) in {} section(s)\n",
        doc.blocks.len(),
        controller.sections().len()
    ));

    let rows = controller.rows();
    if !rows.is_empty() {
        out.push('\n');
        out.push_str(&format_rows(&rows));
    }

    let pages = controller.pages();
    if !pages.is_empty() {
        out.push_str("\nExtracted text:\n");
        for (i, page) in pages.iter().enumerate() {
            if pages.len() > 1 {
                out.push_str(&format!("\n--- Page {} ---\n", i + 1));
            } else {
                out.push('\n');
            }
            for line in page.lines() {
                out.push_str(&format!("  {line}\n"));
            }
        }
    }

    out
}

pub fn format_rows(rows: &[BlockRow<'_>]) -> String {
    let mut out = String::new();
    let width = rows.len().saturating_sub(1).to_string().len();
    let mut page: Option<usize> = None;

    for row in rows {
        if row.new_section {
            if page != Some(row.block.page) {
                out.push_str(&format!("  Page {}\n", row.block.page + 1));
                page = Some(row.block.page);
            } else {
                out.push_str("  ·\n");
            }
        }
        let marker = if row.active { '>' } else { ' ' };
        out.push_str(&format!(
            "  {} [{:>width$}] {:<8} {}  {}\n",
            marker,
            row.index,
            row.block.method.to_string(),
            row.block.bbox,
            preview(&row.block.text, PREVIEW_CHARS),
            width = width
        ));
    }

    out
}

pub fn format_overlay(
    index: usize,
    block: &TextBlock,
    overlay: Option<&OverlayBox>,
    pixels: Option<&PixelBox>,
) -> String {
    let mut out = format!(
        "Block {} (page {}, {}): {}\n",
        index,
        block.page + 1,
        block.method,
        preview(&block.text, PREVIEW_CHARS)
    );
    out.push_str(&format!(
        "  source bbox {} on {}x{}, scale {:.4}\n",
        block.bbox,
        block.width,
        block.height,
        transform_for(&block.method).factor()
    ));
    if !block.method.is_known() {
        out.push_str("  unrecognized extraction method, coordinates used as-is\n");
    }

    match overlay {
        Some(o) => {
            out.push_str(&format!(
                "  overlay at {}: left {:.2}%  top {:.2}%  width {:.2}%  height {:.2}%\n",
                o.rotation, o.left, o.top, o.width, o.height
            ));
            if let Some(px) = pixels {
                out.push_str(&format!(
                    "  pixels: left {:.1}  top {:.1}  width {:.1}  height {:.1}\n",
                    px.left, px.top, px.width, px.height
                ));
            }
        }
        None => out.push_str("  no overlay drawn\n"),
    }

    out
}

pub fn format_selection(
    selected: &str,
    outcome: &SelectionOutcome,
    controller: &Controller,
    overlay: Option<&OverlayBox>,
) -> String {
    let mut out = format!("Selection: \"{}\"\n", selected.trim());

    match outcome {
        SelectionOutcome::Ignored => out.push_str("  empty selection, nothing changed\n"),
        SelectionOutcome::NoMatch => {
            out.push_str("  no single block contains this text; highlight unchanged\n")
        }
        SelectionOutcome::Matched { index, highlight } => {
            if let Some(block) = controller.blocks().get(*index) {
                out.push_str(&format!(
                    "  matched block {} (page {}, {})\n",
                    index,
                    block.page + 1,
                    block.method
                ));
            }
            match highlight {
                Highlight::Search(q) => out.push_str(&format!(
                    "  highlight: text search for \"{}\" (match case: {}, whole words: {})\n",
                    q.keyword, q.match_case, q.whole_words
                )),
                Highlight::Overlay { page, .. } => {
                    out.push_str(&format!("  highlight: rectangle overlay on page {}\n", page + 1));
                    if let Some(o) = overlay {
                        out.push_str(&format!(
                            "  overlay at {}: left {:.2}%  top {:.2}%  width {:.2}%  height {:.2}%\n",
                            o.rotation, o.left, o.top, o.width, o.height
                        ));
                    }
                }
                Highlight::None => out.push_str("  highlight: none\n"),
            }
        }
    }

    out
}
