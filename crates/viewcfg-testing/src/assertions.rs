//! Custom assertions for viewcfg documents and configs.
//!
//! Provides high-level assertions that make tests more readable:
//! - Stored document presence and identity
//! - Property ordering and visibility per display mode
//! - JSON structure checks on CLI output

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use viewcfg_sdk::types::{DisplayMode, TypeIdentity, VisualConfig};

/// Path of the stored document for `identity` inside `folder`.
pub fn document_path(folder: &Path, identity: &TypeIdentity) -> PathBuf {
    folder.join(format!("{}.json", identity.full_name))
}

/// Read a stored document as untyped JSON.
pub fn read_document(folder: &Path, identity: &TypeIdentity) -> Result<Value> {
    let path = document_path(folder, identity);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Expected document at {}", path.display()))?;
    Ok(serde_json::from_str(&content)?)
}

/// Assert a stored document exists and names the expected type and assembly.
pub fn assert_document_for(folder: &Path, identity: &TypeIdentity) -> Result<()> {
    let doc = read_document(folder, identity)?;
    let type_name = doc["TypeFullName"]
        .as_str()
        .context("Expected 'TypeFullName' in document")?;
    let assembly = doc["AssemblyName"]
        .as_str()
        .context("Expected 'AssemblyName' in document")?;

    if type_name != identity.full_name || assembly != identity.assembly {
        anyhow::bail!(
            "Document holds {}, {} but expected {}",
            type_name,
            assembly,
            identity
        );
    }
    Ok(())
}

/// Assert the visible properties of `mode`, in display order.
pub fn assert_visible_order(config: &VisualConfig, mode: DisplayMode, expected: &[&str]) -> Result<()> {
    let actual: Vec<&str> = config
        .visible_properties(mode)
        .iter()
        .map(|p| p.property_path.as_str())
        .collect();

    if actual != expected {
        anyhow::bail!("Expected {} order {:?}, got {:?}", mode, expected, actual);
    }
    Ok(())
}

/// Assert the number of entries in the `Properties` map of a document.
pub fn assert_property_count(doc: &Value, expected: usize) -> Result<()> {
    let properties = doc["Properties"]
        .as_object()
        .context("Expected 'Properties' object in document")?;

    if properties.len() != expected {
        anyhow::bail!("Expected {} properties, got {}", expected, properties.len());
    }
    Ok(())
}
