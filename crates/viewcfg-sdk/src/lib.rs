//! viewcfg-sdk: display configuration for host applications.
//!
//! # Overview
//!
//! `viewcfg-sdk` gives a host one handle, [`Client`], for everything it needs
//! to show typed data: derive a per-type display configuration from a type
//! descriptor, keep it cached and persisted as JSON, format and parse values
//! with it, and edit it with undo/redo.
//!
//! # Quickstart
//!
//! ```no_run
//! use viewcfg_sdk::{Client, VisualizerOptions};
//! use viewcfg_sdk::types::{DisplayMode, TypeDescriptor, Value, builtin};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(VisualizerOptions::default());
//!
//! let person = TypeDescriptor::object("Crm.Person", "crm")
//!     .with_property("Name", builtin::string())
//!     .with_property("Age", builtin::i32());
//! client.register_type(person.clone());
//!
//! let config = client.get_or_create_config(&person).await;
//! let age = config.read().property("Age").cloned();
//! if let Some(age) = age {
//!     println!("{}", client.format(&Value::Int(42), &age.type_config));
//!     println!("visible in list: {}", age.settings_for(DisplayMode::List).visible);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! This SDK is a facade over:
//! - `viewcfg-types`: configs, descriptors, values, change records
//! - `viewcfg-engine`: strategies, formatters, validation, edit history
//! - `viewcfg-runtime`: options, the configuration cache and the JSON store
//!
//! ## Editing
//!
//! ```no_run
//! use viewcfg_sdk::{Client, VisualizerOptions};
//! use viewcfg_sdk::types::{DisplayField, DisplayMode, TypeDescriptor, builtin};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(VisualizerOptions::default());
//! let person = TypeDescriptor::object("Crm.Person", "crm").with_property("Name", builtin::string());
//! let config = client.get_or_create_config(&person).await;
//!
//! let mut session = client.edit(config.clone());
//! session.set_mode_setting("Name", DisplayMode::List, DisplayField::Order, 1)?;
//! session.undo()?;
//! client.save_config(&config).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;

pub use client::{Client, ClientBuilder};
pub use error::{Error, Result};

pub use viewcfg_engine::{
    ChangeTracker, EditSession, FORMAT_PLACEHOLDER, LocalZone, PropertyNode, SharedConfig,
    TypeCatalog, TypeDisplayStrategy,
};
pub use viewcfg_runtime::{LogConfig, LogFormat, VisualizerOptions, init_logging};

/// Data model re-exported from `viewcfg-types`
pub mod types {
    pub use viewcfg_types::{
        Alignment, ChangeTarget, ConfigurationChange, DateTimeKind, DateTimeValue, DisplayField,
        DisplayMode, DisplaySettings, DisplayType, EnumMember, EnumValue, Length,
        PropertyDescriptor, PropertyVisualConfig, SettingValue, TypeDescriptor,
        TypeDisplayConfig, TypeIdentity, TypeTraits, Value, VisualConfig, builtin, keys,
    };
}
