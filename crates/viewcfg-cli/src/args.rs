use crate::types::{LogLevel, ModeArg, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "viewcfg")]
#[command(about = "Derive, inspect and move display configurations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Folder holding the stored documents (overrides options and environment)
    #[arg(long, global = true)]
    pub config_folder: Option<PathBuf>,

    /// JSON array of type descriptors to load on top of the built-ins
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Options file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub options: Option<PathBuf>,

    /// Do not write generated defaults or imports to the folder
    #[arg(long, global = true)]
    pub no_auto_save: bool,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the derived default configuration without touching the folder
    Defaults {
        /// `Full.Name` or `Full.Name, assembly`
        type_name: String,
    },

    /// Load (or create) the configuration of a type and print it
    Show {
        type_name: String,

        /// Only the properties visible in this mode, in display order
        #[arg(long)]
        mode: Option<ModeArg>,
    },

    /// Write the configuration of a type to a file
    Export {
        type_name: String,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Validate a document and make it the stored configuration
    Import { file: PathBuf },

    /// Check a document against the catalog
    Validate { file: PathBuf },

    /// Parse a value with a property's settings and print it formatted
    Format {
        type_name: String,
        property: String,
        value: String,
    },
}
