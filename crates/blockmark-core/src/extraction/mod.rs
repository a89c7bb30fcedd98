pub mod http;

use crate::error::ViewerError;
use crate::model::ExtractionResult;

/// Trait for backends that turn a PDF URL into text and text blocks.
pub trait ExtractionService: Send + Sync {
    /// Fetch the full text and blocks for the PDF at `source_url`.
    fn extract(&self, source_url: &str) -> Result<ExtractionResult, ViewerError>;

    /// URL the PDF view should load for `source_url`. Defaults to the source itself.
    fn file_url(&self, source_url: &str) -> String {
        source_url.to_string()
    }

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
