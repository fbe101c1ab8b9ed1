//! Configuration loading
//!
//! Sources are merged in this order, later ones winning:
//!
//! 1. Built-in defaults
//! 2. A TOML file: the explicit path, else `CAPTURELAB_CONFIG_PATH`, else
//!    `capturelab.toml` in the working directory if it exists
//! 3. Environment variables with the `CAPTURELAB_` prefix, using `__` between
//!    section and key (`CAPTURELAB_SIMULATION__ITERATIONS=5`). A `.env` file
//!    is loaded first if present.
//!
//! CLI flags are applied on top by the caller.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::types::{BindingPolicy, DelayPlan};

pub const ENV_PREFIX: &str = "CAPTURELAB";
pub const CONFIG_PATH_VAR: &str = "CAPTURELAB_CONFIG_PATH";
const DEFAULT_CONFIG_NAME: &str = "capturelab";

/// Order in which a loop's delays are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DelayOrder {
    Uniform,
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub iterations: i64,
    pub policy: BindingPolicy,
    /// Base delay for every plan
    pub delay_ms: u64,
    pub order: DelayOrder,
    /// Per-iteration increment for ascending/descending plans
    pub step_ms: u64,
}

impl SimulationConfig {
    pub fn delay_plan(&self) -> DelayPlan {
        let base = Duration::from_millis(self.delay_ms);
        let step = Duration::from_millis(self.step_ms);
        match self.order {
            DelayOrder::Uniform => DelayPlan::Uniform { delay: base },
            DelayOrder::Ascending => DelayPlan::Ascending { base, step },
            DelayOrder::Descending => DelayPlan::Descending { base, step },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub level: String,
}

impl Config {
    /// Load configuration from the default sources
    pub fn load() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    fn validate(&self) -> Result<()> {
        if self.simulation.iterations < 0 {
            bail!(
                "simulation.iterations must be non-negative, got {}",
                self.simulation.iterations
            );
        }
        if self.logging.level.trim().is_empty() {
            bail!("logging.level must not be empty");
        }
        Ok(())
    }
}

pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    inline_toml: Option<String>,
    use_env: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            config_path: None,
            inline_toml: None,
            use_env: true,
        }
    }
}

impl ConfigBuilder {
    /// Config file path (overrides default search)
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// TOML text merged after the config file
    pub fn inline_toml(mut self, source: impl Into<String>) -> Self {
        self.inline_toml = Some(source.into());
        self
    }

    /// Whether to read `.env` and `CAPTURELAB_*` variables
    pub fn use_env(mut self, use_env: bool) -> Self {
        self.use_env = use_env;
        self
    }

    pub fn build(self) -> Result<Config> {
        if self.use_env {
            // Missing .env is fine
            let _ = dotenvy::dotenv();
        }

        let mut builder = config::Config::builder()
            .set_default("simulation.iterations", 3)?
            .set_default("simulation.policy", "shared")?
            .set_default("simulation.delay_ms", 100)?
            .set_default("simulation.order", "uniform")?
            .set_default("simulation.step_ms", 100)?
            .set_default("logging.level", "info")?;

        let path = self.config_path.or_else(|| {
            if self.use_env {
                std::env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from)
            } else {
                None
            }
        });

        builder = match &path {
            Some(path) => builder.add_source(config::File::from(path.as_path()).required(true)),
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        if let Some(source) = &self.inline_toml {
            builder = builder.add_source(config::File::from_str(source, config::FileFormat::Toml));
        }

        if self.use_env {
            builder = builder.add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let config: Config = builder
            .build()
            .and_then(|c| c.try_deserialize::<Config>())
            .with_context(|| match &path {
                Some(path) => format!("Failed to load configuration from {}", path.display()),
                None => "Failed to load configuration".to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }
}
