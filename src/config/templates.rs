//! Narrative template configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where narrative templates are read from
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
    /// Directory holding `<section>.md` Handlebars templates
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

impl TemplatesConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyTemplateDir);
        }
        Ok(())
    }
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("templates")
}
