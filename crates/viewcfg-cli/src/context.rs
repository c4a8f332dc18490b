use anyhow::{Context, Result};
use std::path::Path;
use viewcfg_sdk::types::{TypeDescriptor, TypeIdentity};
use viewcfg_sdk::{Client, TypeCatalog, VisualizerOptions};

use crate::args::Cli;
use crate::types::OutputFormat;

/// Everything a handler needs: the client and how to print
pub struct CliContext {
    pub client: Client,
    pub format: OutputFormat,
}

impl CliContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut options = match &cli.options {
            Some(path) => VisualizerOptions::load_from(path)?,
            None => match VisualizerOptions::default_path() {
                Ok(path) => VisualizerOptions::load_from(&path)?,
                Err(_) => VisualizerOptions::default(),
            },
        }
        .with_env_overrides();

        if let Some(folder) = &cli.config_folder {
            options = options.with_configuration_folder(folder.clone());
        }
        if cli.no_auto_save {
            options.auto_save = false;
        }

        let catalog = match &cli.catalog {
            Some(path) => load_catalog(path)?,
            None => TypeCatalog::new(),
        };

        Ok(Self {
            client: viewcfg_sdk::Client::builder()
                .options(options)
                .catalog(catalog)
                .build(),
            format: cli.format,
        })
    }

    /// Accepts `Full.Name, assembly` or a bare full name
    pub fn resolve_type(&self, name: &str) -> Result<TypeDescriptor> {
        let found = match TypeIdentity::parse(name) {
            Some(identity) => self.client.catalog().resolve(&identity),
            None => self.client.catalog().find_by_name(name.trim()),
        };
        found.with_context(|| format!("Unknown type '{}' (not in the catalog)", name))
    }
}

fn load_catalog(path: &Path) -> Result<TypeCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    TypeCatalog::from_json(&content)
        .with_context(|| format!("Invalid catalog {}", path.display()))
}
