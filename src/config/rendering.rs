//! PDF rendering configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::document::{PandocProposalRenderer, DEFAULT_PDF_ENGINE};

/// External converter settings
#[derive(Debug, Clone, Deserialize)]
pub struct RenderingConfig {
    /// Path to the pandoc executable (searched on PATH when unset)
    pub pandoc_path: Option<String>,

    /// PDF engine passed to pandoc
    #[serde(default = "default_pdf_engine")]
    pub pdf_engine: String,

    /// Conversion timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl RenderingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidRenderTimeout);
        }
        if self.pdf_engine.trim().is_empty() {
            return Err(ValidationError::EmptyPdfEngine);
        }
        Ok(())
    }

    /// Renderer configured from these settings.
    pub fn renderer(&self) -> PandocProposalRenderer {
        let renderer = PandocProposalRenderer::new()
            .with_pdf_engine(self.pdf_engine.clone())
            .with_pdf_timeout(self.timeout_secs);
        match &self.pandoc_path {
            Some(path) => renderer.with_pandoc_path(path.clone()),
            None => renderer,
        }
    }
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            pandoc_path: None,
            pdf_engine: default_pdf_engine(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_pdf_engine() -> String {
    DEFAULT_PDF_ENGINE.to_string()
}

fn default_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RenderingConfig::default();
        assert_eq!(config.pdf_engine, "wkhtmltopdf");
        assert_eq!(config.timeout_secs, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = RenderingConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidRenderTimeout));
    }

    #[test]
    fn blank_engine_is_rejected() {
        let config = RenderingConfig {
            pdf_engine: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyPdfEngine));
    }
}
