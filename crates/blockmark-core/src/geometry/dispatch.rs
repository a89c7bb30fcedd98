use crate::model::{BBox, ExtractionMethod};

/// Resolution the Google OCR backend rasterizes pages at.
pub const GOOGLE_OCR_DPI: f64 = 300.0;

/// PDF user-space resolution (points per inch).
pub const PDF_POINT_DPI: f64 = 72.0;

/// How a method's native bbox maps into the unit system of its `width`/`height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateTransform {
    Identity,
    Uniform(f64),
}

impl CoordinateTransform {
    pub fn apply(&self, bbox: &BBox) -> BBox {
        match self {
            CoordinateTransform::Identity => *bbox,
            CoordinateTransform::Uniform(factor) => bbox.scaled(*factor),
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            CoordinateTransform::Identity => 1.0,
            CoordinateTransform::Uniform(factor) => *factor,
        }
    }
}

/// Transform table keyed by extraction method.
///
/// Azure and unrecognized methods fall back to identity. That mapping is
/// only verified for the methods listed here.
pub fn transform_for(method: &ExtractionMethod) -> CoordinateTransform {
    match method {
        ExtractionMethod::PyMuPdf => CoordinateTransform::Identity,
        ExtractionMethod::Google => CoordinateTransform::Uniform(PDF_POINT_DPI / GOOGLE_OCR_DPI),
        ExtractionMethod::Azure => CoordinateTransform::Identity,
        ExtractionMethod::Other(_) => CoordinateTransform::Identity,
    }
}

pub fn scale_for_method(method: &ExtractionMethod, bbox: &BBox) -> BBox {
    transform_for(method).apply(bbox)
}
