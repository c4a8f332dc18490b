//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated configuration folder
//! - Writing a type catalog file
//! - Building SDK clients and CLI commands bound to both

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use viewcfg_sdk::{Client, TypeCatalog, VisualizerOptions};

use crate::fixtures;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use viewcfg_testing::TestWorld;
///
/// let world = TestWorld::new().with_sample_catalog();
/// let result = world.run(&["defaults", "Crm.Person"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    config_folder: PathBuf,
    catalog_path: PathBuf,
    auto_save: bool,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_folder = temp_dir.path().join("Configs");
        let catalog_path = temp_dir.path().join("catalog.json");

        Self {
            temp_dir,
            config_folder,
            catalog_path,
            auto_save: true,
            env_vars: HashMap::new(),
        }
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Folder the store writes documents to.
    pub fn config_folder(&self) -> &Path {
        &self.config_folder
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Write the sample catalog (`Crm.Person`, `Shop.Order`).
    pub fn with_sample_catalog(self) -> Self {
        fixtures::write_catalog(&self.catalog_path).expect("Failed to write catalog");
        self
    }

    pub fn without_auto_save(mut self) -> Self {
        self.auto_save = false;
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// A path inside the temp root, for export targets and import sources.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    pub fn options(&self) -> VisualizerOptions {
        VisualizerOptions {
            auto_save: self.auto_save,
            ..VisualizerOptions::default()
        }
        .with_configuration_folder(self.config_folder.clone())
    }

    /// SDK client over this world's folder and catalog (built-ins only when
    /// no catalog file was written).
    pub fn client(&self) -> Result<Client> {
        let catalog = if self.catalog_path.exists() {
            TypeCatalog::from_json(&std::fs::read_to_string(&self.catalog_path)?)?
        } else {
            TypeCatalog::new()
        };
        Ok(Client::builder()
            .options(self.options())
            .catalog(catalog)
            .build())
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// The caller must provide the base command (e.g., from `cargo_bin_cmd!("viewcfg")`).
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--config-folder").arg(&self.config_folder);
        if self.catalog_path.exists() {
            cmd.arg("--catalog").arg(&self.catalog_path);
        }
        if !self.auto_save {
            cmd.arg("--no-auto-save");
        }

        cmd.current_dir(self.temp_dir.path());
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the `viewcfg` binary with this environment and `args`.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("viewcfg")
            .map_err(|e| anyhow::anyhow!("Failed to find viewcfg binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
