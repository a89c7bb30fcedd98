//! Block geometry: native bbox -> page percentages -> rotated overlay box.

pub mod dispatch;
pub mod rotation;

use crate::model::TextBlock;
use serde::{Deserialize, Serialize};

pub use dispatch::{scale_for_method, transform_for, CoordinateTransform};
pub use rotation::{resolve_for_rotation, OverlayBox, PixelBox, Rotation};

/// Rectangle in percent (0-100) of the reference page's width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub top: f64,
    pub left: f64,
    pub width_pct: f64,
    pub height_pct: f64,
}

/// Map a block's native bbox into page percentages.
///
/// Returns `None` when the block's source dimensions cannot be divided by.
/// Rotation is not applied here; see [`resolve_for_rotation`].
pub fn normalize(block: &TextBlock) -> Option<NormalizedRect> {
    if !(block.width.is_finite() && block.width > 0.0)
        || !(block.height.is_finite() && block.height > 0.0)
    {
        tracing::warn!(
            page = block.page,
            width = block.width,
            height = block.height,
            "cannot normalize block with zero or non-finite source size"
        );
        return None;
    }

    let s = scale_for_method(&block.method, &block.bbox);
    Some(NormalizedRect {
        top: s.y0 / block.height * 100.0,
        left: s.x0 / block.width * 100.0,
        width_pct: s.width() / block.width * 100.0,
        height_pct: s.height() / block.height * 100.0,
    })
}

/// Normalize and place on a page rendered at `rotation`.
pub fn overlay_box(block: &TextBlock, rotation: Rotation) -> Option<OverlayBox> {
    normalize(block).map(|rect| resolve_for_rotation(&rect, rotation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, ExtractionMethod};

    fn block(method: ExtractionMethod, bbox: BBox, width: f64, height: f64) -> TextBlock {
        TextBlock {
            text: "t".into(),
            page: 0,
            bbox,
            width,
            height,
            method,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_google_block_scaled_before_percentages() {
        let b = block(
            ExtractionMethod::Google,
            BBox::new(10.0, 10.0, 50.0, 40.0),
            1000.0,
            1200.0,
        );
        // scaled bbox is [2.4, 2.4, 12, 9.6]
        let r = normalize(&b).unwrap();
        assert!(approx(r.left, 2.4 / 1000.0 * 100.0));
        assert!(approx(r.top, 2.4 / 1200.0 * 100.0));
        assert!(approx(r.width_pct, (12.0 - 2.4) / 1000.0 * 100.0));
        assert!(approx(r.height_pct, (9.6 - 2.4) / 1200.0 * 100.0));
    }

    #[test]
    fn test_pymupdf_block_unscaled() {
        let b = block(
            ExtractionMethod::PyMuPdf,
            BBox::new(61.2, 79.2, 306.0, 158.4),
            612.0,
            792.0,
        );
        let r = normalize(&b).unwrap();
        assert!(approx(r.left, 10.0));
        assert!(approx(r.top, 10.0));
        assert!(approx(r.width_pct, 40.0));
        assert!(approx(r.height_pct, 10.0));
    }

    #[test]
    fn test_zero_size_is_not_normalized() {
        let b = block(ExtractionMethod::Azure, BBox::new(0.0, 0.0, 1.0, 1.0), 0.0, 10.0);
        assert!(normalize(&b).is_none());
        assert!(overlay_box(&b, Rotation::Deg90).is_none());
    }

    #[test]
    fn test_overlay_box_forwards_rotation() {
        let b = block(
            ExtractionMethod::PyMuPdf,
            BBox::new(0.0, 0.0, 50.0, 25.0),
            100.0,
            100.0,
        );
        let o = overlay_box(&b, Rotation::Deg180).unwrap();
        assert_eq!(o.rotation, Rotation::Deg180);
        assert!(approx(o.left, 50.0));
        assert!(approx(o.top, 75.0));
    }
}
