pub mod extract;
pub mod locate;
pub mod proxy;
pub mod select;

use blockmark_core::config::{self, ViewerConfig};
use blockmark_core::controller::Controller;
use blockmark_core::error::ViewerError;
use blockmark_core::extraction::http::HttpExtractionService;
use blockmark_core::model::ExtractionResult;
use std::path::{Path, PathBuf};

/// Settings shared by every command.
pub struct Context {
    pub config: ViewerConfig,
}

impl Context {
    pub fn load(config_path: Option<&Path>, base_url: Option<String>) -> Result<Self, ViewerError> {
        let mut config = match config_path {
            Some(path) => config::load_config(path)?,
            None => ViewerConfig::default(),
        };
        if let Some(base_url) = base_url {
            config.service.base_url = base_url;
            config::validate_config(&config)?;
        }
        tracing::debug!(base_url = %config.service.base_url, "configuration loaded");
        Ok(Context { config })
    }

    pub fn service(&self) -> Result<HttpExtractionService, ViewerError> {
        HttpExtractionService::new(&self.config.service)
    }

    /// Open `url` from the backend, or from a saved response when `input` is given.
    pub fn open(&self, url: &str, input: Option<PathBuf>) -> Result<Controller, ViewerError> {
        let service = self.service()?;
        match input {
            Some(path) => {
                let bytes = std::fs::read(&path)?;
                let result: ExtractionResult = serde_json::from_slice(&bytes)?;
                blockmark_core::open_result(url, service.proxy_url(url), result, &self.config)
            }
            None => blockmark_core::open_document(&service, url, &self.config),
        }
    }
}

/// Render surface for a terminal: always ready, remembers what it was asked to search.
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    pub searches: Vec<String>,
}

impl blockmark_core::selection::RenderSurface for ConsoleSurface {
    fn is_ready(&self) -> bool {
        true
    }

    fn highlight(&mut self, keyword: &str, _match_case: bool, _whole_words: bool) {
        self.searches.push(keyword.to_string());
    }

    fn clear_highlights(&mut self) {
        self.searches.clear();
    }
}
