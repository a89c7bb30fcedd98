use crate::error::ViewerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Axis-aligned rectangle `[x0, y0, x1, y1]`, serialized as a 4-element array.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        BBox { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Multiply every coordinate by `factor`.
    pub fn scaled(&self, factor: f64) -> BBox {
        BBox {
            x0: self.x0 * factor,
            y0: self.y0 * factor,
            x1: self.x1 * factor,
            y1: self.y1 * factor,
        }
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }
}

impl From<[f64; 4]> for BBox {
    fn from(a: [f64; 4]) -> Self {
        BBox::new(a[0], a[1], a[2], a[3])
    }
}

impl Serialize for BBox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BBox {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <[f64; 4]>::deserialize(deserializer)?;
        Ok(BBox::from(raw))
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.1}, {:.1}, {:.1}, {:.1}]",
            self.x0, self.y0, self.x1, self.y1
        )
    }
}

/// Engine that produced a block. Decides which coordinate convention its bbox uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExtractionMethod {
    PyMuPdf,
    Google,
    Azure,
    /// Any tag the viewer does not know. Kept verbatim.
    Other(String),
}

impl ExtractionMethod {
    pub fn from_tag(tag: &str) -> ExtractionMethod {
        match tag {
            "pymupdf" => ExtractionMethod::PyMuPdf,
            "google" => ExtractionMethod::Google,
            "azure" => ExtractionMethod::Azure,
            other => ExtractionMethod::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            ExtractionMethod::PyMuPdf => "pymupdf",
            ExtractionMethod::Google => "google",
            ExtractionMethod::Azure => "azure",
            ExtractionMethod::Other(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ExtractionMethod::Other(_))
    }
}

impl Default for ExtractionMethod {
    fn default() -> Self {
        ExtractionMethod::Other(String::new())
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMethod::Other(tag) if tag.is_empty() => write!(f, "unknown"),
            m => write!(f, "{}", m.tag()),
        }
    }
}

impl Serialize for ExtractionMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for ExtractionMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(ExtractionMethod::from_tag(&tag))
    }
}

/// One text unit reported by the extraction backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    /// Zero-based page index.
    pub page: usize,
    pub bbox: BBox,
    /// Width of the source page or image that `bbox` was measured against.
    pub width: f64,
    /// Height of the source page or image that `bbox` was measured against.
    pub height: f64,
    #[serde(default)]
    pub method: ExtractionMethod,
}

impl TextBlock {
    /// Check the geometry invariants the normalizer relies on.
    pub fn validate(&self) -> Result<(), ViewerError> {
        let b = &self.bbox;
        if [b.x0, b.y0, b.x1, b.y1].iter().any(|v| !v.is_finite()) {
            return Err(ViewerError::InvalidBlock(format!(
                "page {} block has non-finite bbox {}",
                self.page, b
            )));
        }
        if b.x1 < b.x0 || b.y1 < b.y0 {
            return Err(ViewerError::InvalidBlock(format!(
                "page {} block has inverted bbox {}",
                self.page, b
            )));
        }
        if !(self.width.is_finite() && self.width > 0.0)
            || !(self.height.is_finite() && self.height > 0.0)
        {
            return Err(ViewerError::InvalidBlock(format!(
                "page {} block has unusable source size {}x{}",
                self.page, self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Response body of the extraction endpoint for one submitted URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub text: String,
    #[serde(default)]
    pub blocks: Vec<TextBlock>,
}
