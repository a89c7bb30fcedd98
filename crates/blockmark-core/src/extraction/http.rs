use crate::config::ServiceConfig;
use crate::error::ViewerError;
use crate::extraction::ExtractionService;
use crate::model::ExtractionResult;
use std::time::Duration;

/// Extraction backend reached over HTTP.
///
/// `GET {base}/extract/{source}` returns the JSON body; `GET {base}/proxy-pdf/{source}`
/// streams the PDF itself from the backend's origin.
pub struct HttpExtractionService {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpExtractionService {
    pub fn new(config: &ServiceConfig) -> Result<Self, ViewerError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ViewerError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(HttpExtractionService {
            base_url: trim_base(&config.base_url),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn extract_url(&self, source_url: &str) -> String {
        endpoint_url(&self.base_url, "extract", source_url)
    }

    pub fn proxy_url(&self, source_url: &str) -> String {
        endpoint_url(&self.base_url, "proxy-pdf", source_url)
    }

    /// Download the PDF bytes through the proxy endpoint.
    pub fn fetch_pdf(&self, source_url: &str) -> Result<Vec<u8>, ViewerError> {
        let url = self.proxy_url(source_url);
        let response = self.get(&url)?;
        let bytes = response
            .bytes()
            .map_err(|e| ViewerError::Network(format!("failed to read PDF body: {e}")))?;
        tracing::debug!(%url, bytes = bytes.len(), "downloaded PDF via proxy");
        Ok(bytes.to_vec())
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, ViewerError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ViewerError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ViewerError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }
}

impl ExtractionService for HttpExtractionService {
    fn extract(&self, source_url: &str) -> Result<ExtractionResult, ViewerError> {
        let url = self.extract_url(source_url);
        tracing::debug!(%url, "requesting extraction");

        let body = self
            .get(&url)?
            .text()
            .map_err(|e| ViewerError::Network(format!("failed to read response body: {e}")))?;

        parse_response(&body)
    }

    fn file_url(&self, source_url: &str) -> String {
        self.proxy_url(source_url)
    }

    fn backend_name(&self) -> &str {
        "http"
    }
}

/// Decode an extraction response body.
pub fn parse_response(body: &str) -> Result<ExtractionResult, ViewerError> {
    serde_json::from_str(body).map_err(|e| ViewerError::Decode(e.to_string()))
}

/// `{base}/{endpoint}/{percent-encoded source}`. The source is one path segment.
pub fn endpoint_url(base_url: &str, endpoint: &str, source_url: &str) -> String {
    format!(
        "{}/{}/{}",
        trim_base(base_url),
        endpoint,
        urlencoding::encode(source_url)
    )
}

fn trim_base(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}
