use crate::model::{ExtractionMethod, TextBlock};
use serde::Serialize;
use std::ops::Range;

/// Vertical gap (native units) above which two google blocks on one page are split.
pub const DEFAULT_SECTION_GAP: f64 = 20.0;

/// Reading order: page ascending, then top edge ascending. Stable under ties.
pub fn order(blocks: &[TextBlock]) -> Vec<TextBlock> {
    let mut ordered = blocks.to_vec();
    order_in_place(&mut ordered);
    ordered
}

pub fn order_in_place(blocks: &mut [TextBlock]) {
    blocks.sort_by(|a, b| a.page.cmp(&b.page).then(a.bbox.y0.total_cmp(&b.bbox.y0)));
}

/// Whether `curr` opens a new display section, using the default gap threshold.
pub fn is_new_section(curr: &TextBlock, prev: Option<&TextBlock>) -> bool {
    is_new_section_with_gap(curr, prev, DEFAULT_SECTION_GAP)
}

pub fn is_new_section_with_gap(curr: &TextBlock, prev: Option<&TextBlock>, gap: f64) -> bool {
    let Some(prev) = prev else {
        return true;
    };
    if curr.page != prev.page {
        return true;
    }
    match curr.method {
        ExtractionMethod::Google => curr.bbox.y0 - prev.bbox.y1 > gap,
        _ => false,
    }
}

/// A run of consecutive ordered blocks between section breaks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub page: usize,
    pub range: Range<usize>,
}

/// Group an already ordered block list into sections.
pub fn sections(ordered: &[TextBlock], gap: f64) -> Vec<Section> {
    let mut out: Vec<Section> = Vec::new();

    for (i, block) in ordered.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| &ordered[p]);
        if is_new_section_with_gap(block, prev, gap) {
            out.push(Section {
                page: block.page,
                range: i..i + 1,
            });
        } else if let Some(current) = out.last_mut() {
            current.range.end = i + 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn block(text: &str, page: usize, y0: f64, y1: f64, method: ExtractionMethod) -> TextBlock {
        TextBlock {
            text: text.into(),
            page,
            bbox: BBox::new(0.0, y0, 100.0, y1),
            width: 612.0,
            height: 792.0,
            method,
        }
    }

    fn texts(blocks: &[TextBlock]) -> Vec<&str> {
        blocks.iter().map(|b| b.text.as_str()).collect()
    }

    #[test]
    fn test_order_by_page_then_top() {
        let blocks = vec![
            block("p1-low", 1, 300.0, 320.0, ExtractionMethod::PyMuPdf),
            block("p0-low", 0, 500.0, 520.0, ExtractionMethod::PyMuPdf),
            block("p1-high", 1, 50.0, 70.0, ExtractionMethod::PyMuPdf),
            block("p0-high", 0, 10.0, 30.0, ExtractionMethod::PyMuPdf),
        ];
        assert_eq!(
            texts(&order(&blocks)),
            vec!["p0-high", "p0-low", "p1-high", "p1-low"]
        );
    }

    #[test]
    fn test_order_is_idempotent() {
        let blocks = vec![
            block("c", 2, 5.0, 6.0, ExtractionMethod::Azure),
            block("a", 0, 9.0, 10.0, ExtractionMethod::Azure),
            block("b", 0, 1.0, 2.0, ExtractionMethod::Azure),
        ];
        let once = order(&blocks);
        assert_eq!(order(&once), once);
    }

    #[test]
    fn test_order_stable_under_ties() {
        let blocks = vec![
            block("first", 0, 40.0, 50.0, ExtractionMethod::Google),
            block("earlier", 0, 10.0, 20.0, ExtractionMethod::Google),
            block("second", 0, 40.0, 60.0, ExtractionMethod::Google),
            block("third", 0, 40.0, 45.0, ExtractionMethod::Google),
        ];
        assert_eq!(
            texts(&order(&blocks)),
            vec!["earlier", "first", "second", "third"]
        );
    }

    #[test]
    fn test_first_block_always_new_section() {
        let b = block("x", 3, 100.0, 120.0, ExtractionMethod::PyMuPdf);
        assert!(is_new_section(&b, None));
    }

    #[test]
    fn test_page_change_breaks_section() {
        let prev = block("a", 0, 700.0, 720.0, ExtractionMethod::PyMuPdf);
        let curr = block("b", 1, 10.0, 20.0, ExtractionMethod::PyMuPdf);
        assert!(is_new_section(&curr, Some(&prev)));
    }

    #[test]
    fn test_google_gap_threshold() {
        let prev = block("a", 0, 100.0, 120.0, ExtractionMethod::Google);
        let near = block("b", 0, 140.0, 150.0, ExtractionMethod::Google);
        let far = block("c", 0, 140.5, 150.0, ExtractionMethod::Google);
        // exactly 20 units is not a break
        assert!(!is_new_section(&near, Some(&prev)));
        assert!(is_new_section(&far, Some(&prev)));
    }

    #[test]
    fn test_other_methods_ignore_gap() {
        let prev = block("a", 0, 100.0, 120.0, ExtractionMethod::PyMuPdf);
        let curr = block("b", 0, 600.0, 620.0, ExtractionMethod::PyMuPdf);
        assert!(!is_new_section(&curr, Some(&prev)));
    }

    #[test]
    fn test_sections_grouping() {
        let ordered = order(&[
            block("g1", 0, 10.0, 20.0, ExtractionMethod::Google),
            block("g2", 0, 25.0, 35.0, ExtractionMethod::Google),
            block("g3", 0, 200.0, 210.0, ExtractionMethod::Google),
            block("p1", 1, 10.0, 20.0, ExtractionMethod::PyMuPdf),
            block("p2", 1, 500.0, 520.0, ExtractionMethod::PyMuPdf),
        ]);
        let s = sections(&ordered, DEFAULT_SECTION_GAP);
        assert_eq!(
            s,
            vec![
                Section { page: 0, range: 0..2 },
                Section { page: 0, range: 2..3 },
                Section { page: 1, range: 3..5 },
            ]
        );
        assert!(sections(&[], DEFAULT_SECTION_GAP).is_empty());
    }
}
