use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::git::remote_address;

/// One repository managed by the fleet.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepoSpec {
    /// Repository name within the configured organization
    pub name: String,
    /// Free-form description, for humans only
    #[serde(default)]
    pub description: Option<String>,
}

/// Main configuration structure for repo-fleet.
///
/// Loaded once at startup, validated, and passed into the orchestrator by
/// value; never read from ambient global state.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FleetConfig {
    /// Human-readable project name, used only for console output
    pub project_name: String,
    /// GitHub organization every repository belongs to
    pub organization: String,
    /// Parent directory all working directories live under, resolved once per
    /// run. Defaults to the parent of the current directory.
    #[serde(default = "default_base_dir")]
    pub base_dir: String,
    /// Ordered fleet; scripted operations follow this order
    #[serde(default)]
    pub repositories: Vec<RepoSpec>,
}

fn default_base_dir() -> String {
    "..".to_string()
}

impl FleetConfig {
    /// Load configuration with precedence:
    /// 1. Configuration files (fleet.toml, .fleet-rc)
    /// 2. Environment variables (prefixed with FLEET_)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();
        let mut found_file = false;

        if Path::new("fleet.toml").exists() {
            builder = builder.add_source(File::with_name("fleet"));
            found_file = true;
        }

        if Path::new(".fleet-rc").exists() {
            builder = builder.add_source(File::with_name(".fleet-rc"));
            found_file = true;
        }

        if !found_file {
            bail!(
                "no fleet configuration found; create fleet.toml with project_name, \
                 organization, and a [[repositories]] entry per repository"
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("FLEET")
                .separator("_")
                .try_parsing(true),
        );

        let config: FleetConfig = builder
            .build()
            .context("failed to read fleet configuration")?
            .try_deserialize()
            .context("fleet configuration has an invalid shape")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the orchestrator must never see.
    pub fn validate(&self) -> Result<()> {
        if self.organization.trim().is_empty() {
            bail!("fleet configuration: organization must not be empty");
        }
        for (index, repo) in self.repositories.iter().enumerate() {
            if repo.name.trim().is_empty() {
                bail!("fleet configuration: repository #{index} has an empty name");
            }
        }
        Ok(())
    }

    /// Expected `origin` URL for a repository in this fleet.
    pub fn expected_remote(&self, name: &str) -> String {
        remote_address(&self.organization, name)
    }

    /// Resolve the base directory once; all working directories are derived
    /// from it as `base_dir / repository name`.
    pub fn resolved_base_dir(&self) -> Result<PathBuf> {
        Path::new(&self.base_dir)
            .canonicalize()
            .with_context(|| format!("base directory '{}' does not exist", self.base_dir))
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
