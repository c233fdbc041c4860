use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for docflow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocflowConfig {
    /// Observability settings
    pub observability: ObservabilityConfig,
    /// Lifecycle/workflow settings
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Enable tracing output
    pub tracing_enabled: bool,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON instead of human-readable lines
    pub json_logs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Characters of content shown in status previews
    pub preview_chars: usize,
}

impl Default for DocflowConfig {
    fn default() -> Self {
        Self {
            observability: ObservabilityConfig {
                tracing_enabled: true,
                log_level: "info".to_string(),
                json_logs: false,
            },
            workflow: WorkflowConfig {
                preview_chars: crate::lifecycle::DEFAULT_PREVIEW_CHARS,
            },
        }
    }
}

impl DocflowConfig {
    /// Load configuration with precedence:
    /// 1. Default values
    /// 2. docflow.toml in the working directory
    /// 3. Environment variables (prefixed with DOCFLOW_)
    pub fn load() -> Result<Self> {
        let mut builder = Self::builder_with_defaults()?;

        if Path::new("docflow.toml").exists() {
            builder = builder.add_source(File::with_name("docflow"));
        }

        builder = builder.add_source(
            Environment::with_prefix("DOCFLOW")
                .separator("_")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load from an explicit file path layered over defaults
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::builder_with_defaults()?
            .add_source(File::from(path.as_ref()))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    fn builder_with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = DocflowConfig::default();
        Ok(Config::builder()
            .set_default(
                "observability.tracing_enabled",
                defaults.observability.tracing_enabled,
            )?
            .set_default("observability.log_level", defaults.observability.log_level)?
            .set_default("observability.json_logs", defaults.observability.json_logs)?
            .set_default(
                "workflow.preview_chars",
                defaults.workflow.preview_chars as u64,
            )?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<DocflowConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = DocflowConfig::load_env_file();
        DocflowConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static DocflowConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let _config = config()?;
    tracing::debug!("Configuration loaded successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = DocflowConfig::default();
        assert!(cfg.observability.tracing_enabled);
        assert_eq!(cfg.observability.log_level, "info");
        assert!(!cfg.observability.json_logs);
        assert_eq!(cfg.workflow.preview_chars, 30);
    }

    #[test]
    fn config_round_trips_through_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docflow.toml");

        let mut cfg = DocflowConfig::default();
        cfg.observability.log_level = "debug".to_string();
        cfg.workflow.preview_chars = 12;
        cfg.save_to_file(&path).unwrap();

        let loaded = DocflowConfig::load_from(&path).unwrap();
        assert_eq!(loaded.observability.log_level, "debug");
        assert_eq!(loaded.workflow.preview_chars, 12);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[observability]\nlog_level = \"warn\"\n").unwrap();

        let loaded = DocflowConfig::load_from(&path).unwrap();
        assert_eq!(loaded.observability.log_level, "warn");
        assert_eq!(loaded.workflow.preview_chars, 30);
    }
}
