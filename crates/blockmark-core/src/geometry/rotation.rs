use super::NormalizedRect;
use crate::error::ViewerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Page rotation as reported by the render surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Accepts any multiple of 90, including negative values.
    pub fn from_degrees(degrees: i32) -> Result<Rotation, ViewerError> {
        if degrees % 90 != 0 {
            return Err(ViewerError::ConfigInvalid(format!(
                "rotation must be a multiple of 90 degrees, got {degrees}"
            )));
        }
        Ok(match degrees.rem_euclid(360) {
            0 => Rotation::Deg0,
            90 => Rotation::Deg90,
            180 => Rotation::Deg180,
            _ => Rotation::Deg270,
        })
    }

    pub fn degrees(&self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Overlay position on a rotated page, as CSS percentages of the displayed page box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: Rotation,
}

/// Absolute pixel box for a rendered page of known size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl OverlayBox {
    /// `page_width`/`page_height` are the size of the page as displayed (after rotation).
    pub fn to_pixels(&self, page_width: f64, page_height: f64) -> PixelBox {
        PixelBox {
            left: self.left / 100.0 * page_width,
            top: self.top / 100.0 * page_height,
            width: self.width / 100.0 * page_width,
            height: self.height / 100.0 * page_height,
        }
    }
}

/// Default page CSS resolver: places an unrotated rect on a page shown at `rotation`.
pub fn resolve_for_rotation(rect: &NormalizedRect, rotation: Rotation) -> OverlayBox {
    let NormalizedRect {
        top,
        left,
        width_pct: w,
        height_pct: h,
    } = *rect;

    let (left, top, width, height) = match rotation {
        Rotation::Deg0 => (left, top, w, h),
        Rotation::Deg90 => (100.0 - top - h, left, h, w),
        Rotation::Deg180 => (100.0 - left - w, 100.0 - top - h, w, h),
        Rotation::Deg270 => (top, 100.0 - left - w, h, w),
    };

    OverlayBox {
        left,
        top,
        width,
        height,
        rotation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> NormalizedRect {
        NormalizedRect {
            top: 10.0,
            left: 20.0,
            width_pct: 30.0,
            height_pct: 5.0,
        }
    }

    #[test]
    fn test_from_degrees() {
        assert_eq!(Rotation::from_degrees(0).unwrap(), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(450).unwrap(), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(-90).unwrap(), Rotation::Deg270);
        assert_eq!(Rotation::from_degrees(180).unwrap().degrees(), 180);
        assert!(Rotation::from_degrees(45).is_err());
    }

    #[test]
    fn test_unrotated_passthrough() {
        let b = resolve_for_rotation(&rect(), Rotation::Deg0);
        assert_eq!((b.left, b.top, b.width, b.height), (20.0, 10.0, 30.0, 5.0));
    }

    #[test]
    fn test_quarter_turns_swap_extent() {
        let b = resolve_for_rotation(&rect(), Rotation::Deg90);
        assert_eq!((b.left, b.top, b.width, b.height), (85.0, 20.0, 5.0, 30.0));

        let b = resolve_for_rotation(&rect(), Rotation::Deg270);
        assert_eq!((b.left, b.top, b.width, b.height), (10.0, 50.0, 5.0, 30.0));
    }

    #[test]
    fn test_half_turn_mirrors_both_axes() {
        let b = resolve_for_rotation(&rect(), Rotation::Deg180);
        assert_eq!((b.left, b.top, b.width, b.height), (50.0, 85.0, 30.0, 5.0));
        assert_eq!(b.rotation, Rotation::Deg180);
    }

    #[test]
    fn test_to_pixels() {
        let px = resolve_for_rotation(&rect(), Rotation::Deg0).to_pixels(600.0, 800.0);
        assert_eq!(px.left, 120.0);
        assert_eq!(px.top, 80.0);
        assert_eq!(px.width, 180.0);
        assert_eq!(px.height, 40.0);
    }
}
