//! Typed service configuration.
//!
//! Settings come from `PROPOSAL_BUILDER__<SECTION>__<KEY>` environment
//! variables (a `.env` file is honoured in development). Every key has a
//! default, so the service starts with an empty environment.
//!
//! ```no_run
//! use proposal_builder::config::AppConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! config.validate()?;
//! println!("listening on {}", config.server.socket_addr()?);
//! # Ok(())
//! # }
//! ```

mod error;
mod estimation;
mod rendering;
mod server;
mod templates;

pub use error::{ConfigError, ValidationError};
pub use estimation::EstimationConfig;
pub use rendering::RenderingConfig;
pub use server::{CorsPolicy, Environment, ServerConfig};
pub use templates::TemplatesConfig;

use serde::Deserialize;

use crate::domain::catalog::ProposalCatalog;

/// Environment variable prefix shared by every setting.
pub const ENV_PREFIX: &str = "PROPOSAL_BUILDER";

/// All service settings, one struct per section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    /// Where narrative templates live
    pub templates: TemplatesConfig,
    /// HTML to PDF conversion
    pub rendering: RenderingConfig,
    /// Rate card overrides
    pub estimation: EstimationConfig,
}

impl AppConfig {
    /// Reads `.env` if present, then the process environment.
    ///
    /// `PROPOSAL_BUILDER__RENDERING__PDF_ENGINE=weasyprint` sets
    /// `rendering.pdf_engine`; nested keys are separated by `__`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::LoadError`] when a value does not parse into its field type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks every section, stopping at the first invalid one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.templates.validate()?;
        self.rendering.validate()?;
        self.estimation.validate()
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// Standard catalog with the configured rate card.
    pub fn catalog(&self) -> ProposalCatalog {
        ProposalCatalog::standard().with_rates(self.estimation.rate_card())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Environment variables are process-global.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "PROPOSAL_BUILDER__SERVER__PORT",
        "PROPOSAL_BUILDER__SERVER__ENVIRONMENT",
        "PROPOSAL_BUILDER__TEMPLATES__DIR",
        "PROPOSAL_BUILDER__RENDERING__PDF_ENGINE",
        "PROPOSAL_BUILDER__ESTIMATION__HOURS_PER_DAY",
        "PROPOSAL_BUILDER__ESTIMATION__FALLBACK_CURRENCY",
    ];

    /// Loads with `vars` set, restoring a clean environment afterwards.
    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        for var in VARS {
            env::remove_var(var);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let loaded = AppConfig::load();
        for (key, _) in vars {
            env::remove_var(key);
        }
        loaded
    }

    #[test]
    fn empty_environment_yields_valid_defaults() {
        let config = load_with(&[]).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.templates.dir, PathBuf::from("templates"));
        assert_eq!(config.rendering.pdf_engine, "wkhtmltopdf");
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn nested_variables_override_each_section() {
        let config = load_with(&[
            ("PROPOSAL_BUILDER__SERVER__PORT", "3000"),
            ("PROPOSAL_BUILDER__TEMPLATES__DIR", "/srv/templates"),
            ("PROPOSAL_BUILDER__RENDERING__PDF_ENGINE", "weasyprint"),
            ("PROPOSAL_BUILDER__ESTIMATION__HOURS_PER_DAY", "7.5"),
            ("PROPOSAL_BUILDER__ESTIMATION__FALLBACK_CURRENCY", "EUR"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.templates.dir, PathBuf::from("/srv/templates"));
        assert_eq!(config.rendering.pdf_engine, "weasyprint");

        let catalog = config.catalog();
        assert_eq!(catalog.rates.hours_per_day(), 7.5);
        assert_eq!(catalog.rates.fallback_currency(), "EUR");
    }

    #[test]
    fn production_environment_is_recognised() {
        let config = load_with(&[("PROPOSAL_BUILDER__SERVER__ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn non_numeric_port_fails_to_load() {
        let result = load_with(&[("PROPOSAL_BUILDER__SERVER__PORT", "eighty")]);
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn validate_reports_first_invalid_section() {
        let mut config = AppConfig::default();
        config.estimation.fallback_currency = "dollars".to_string();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidCurrency(_))
        ));
    }
}
