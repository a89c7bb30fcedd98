pub mod config;
pub mod controller;
pub mod error;
pub mod extraction;
pub mod geometry;
pub mod model;
pub mod ordering;
pub mod selection;
pub mod text;

use config::ViewerConfig;
use controller::{Controller, SubmissionStatus};
use error::ViewerError;
use extraction::ExtractionService;

/// Main API entry point: fetch a PDF's extraction and return a controller showing it.
///
/// Blocks are validated and put in reading order; the selection starts empty.
pub fn open_document(
    service: &dyn ExtractionService,
    source_url: &str,
    config: &ViewerConfig,
) -> Result<Controller, ViewerError> {
    let mut controller = Controller::new(config);

    tracing::info!(url = source_url, backend = service.backend_name(), "opening document");
    let submission = controller.begin_submission(source_url, service.file_url(source_url));
    // Nothing has been painted yet, so there is no surface to clear.
    match controller.accept(&submission, service.extract(source_url))? {
        SubmissionStatus::Applied => Ok(controller),
        // A fresh controller has only one submission in flight.
        SubmissionStatus::Stale => Err(ViewerError::Network(format!(
            "extraction of {source_url} was superseded"
        ))),
    }
}

/// Open a document from an already-fetched extraction result (e.g. a saved JSON response).
pub fn open_result(
    source_url: &str,
    file_url: String,
    result: model::ExtractionResult,
    config: &ViewerConfig,
) -> Result<Controller, ViewerError> {
    let mut controller = Controller::new(config);
    let submission = controller.begin_submission(source_url, file_url);
    controller.accept(&submission, Ok(result))?;
    Ok(controller)
}
