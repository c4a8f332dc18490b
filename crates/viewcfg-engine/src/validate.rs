use std::collections::HashSet;
use viewcfg_types::{Length, TypeDescriptor, VisualConfig};

use crate::catalog::TypeCatalog;
use crate::error::ValidationError;

/// Major schema version this build reads
pub const SUPPORTED_MAJOR: &str = "1";

fn version_supported(version: &str) -> bool {
    let major = version.split('.').next().unwrap_or_default();
    major == SUPPORTED_MAJOR
        && version
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}

/// Check a loaded or imported document against the catalog.
///
/// Returns the resolved descriptor of the configured type.
pub fn validate(config: &VisualConfig, catalog: &TypeCatalog) -> Result<TypeDescriptor, ValidationError> {
    let ty = catalog
        .resolve(&config.identity())
        .ok_or_else(|| ValidationError::UnresolvableType {
            type_name: config.type_full_name.clone(),
            assembly: config.assembly_name.clone(),
        })?;

    if !version_supported(&config.version) {
        return Err(ValidationError::UnsupportedVersion(config.version.clone()));
    }

    if config.max_depth < 1 {
        return Err(ValidationError::InvalidMaxDepth(config.max_depth));
    }

    let mut seen = HashSet::new();
    for mode in &config.supported_modes {
        if !seen.insert(*mode) {
            return Err(ValidationError::DuplicateMode(mode.to_string()));
        }
    }

    for (key, property) in &config.properties {
        if key != &property.property_path {
            return Err(ValidationError::PathMismatch {
                key: key.clone(),
                property_path: property.property_path.clone(),
            });
        }

        if ty.property_at(key).is_none() {
            return Err(ValidationError::UnknownProperty {
                type_name: config.type_full_name.clone(),
                property_path: key.clone(),
            });
        }

        for (mode, settings) in &property.mode_settings {
            for raw in [&settings.width, &settings.height] {
                if Length::parse(raw).is_err() {
                    return Err(ValidationError::InvalidLength {
                        property_path: key.clone(),
                        mode: mode.to_string(),
                        value: raw.clone(),
                    });
                }
            }
        }
    }

    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewcfg_types::{DisplayMode, TypeIdentity, builtin};

    use crate::DisplayStrategyRegistry;

    fn setup() -> (TypeCatalog, VisualConfig) {
        let ty = TypeDescriptor::object("Crm.Person", "crm")
            .with_property("Name", builtin::string())
            .with_property("Age", builtin::i32());
        let config = DisplayStrategyRegistry::new().create_default_config(&ty);
        let catalog = TypeCatalog::new();
        catalog.register(ty);
        (catalog, config)
    }

    #[test]
    fn test_valid_config() {
        let (catalog, config) = setup();
        let ty = validate(&config, &catalog).unwrap();
        assert_eq!(ty.identity, TypeIdentity::new("Crm.Person", "crm"));
    }

    #[test]
    fn test_unresolvable_type() {
        let (catalog, mut config) = setup();
        config.assembly_name = "other".to_string();
        assert!(matches!(
            validate(&config, &catalog),
            Err(ValidationError::UnresolvableType { .. })
        ));
    }

    #[test]
    fn test_structural_checks() {
        let (catalog, config) = setup();

        let mut bad = config.clone();
        bad.version = "2.0".to_string();
        assert_eq!(
            validate(&bad, &catalog).unwrap_err(),
            ValidationError::UnsupportedVersion("2.0".to_string())
        );

        let mut bad = config.clone();
        bad.max_depth = 0;
        assert_eq!(validate(&bad, &catalog).unwrap_err(), ValidationError::InvalidMaxDepth(0));

        let mut bad = config.clone();
        bad.supported_modes.push(DisplayMode::List);
        assert!(matches!(validate(&bad, &catalog), Err(ValidationError::DuplicateMode(_))));

        let mut bad = config.clone();
        let mut moved = bad.properties.remove("Age").unwrap();
        moved.property_path = "Years".to_string();
        bad.properties.insert("Age".to_string(), moved.clone());
        assert!(matches!(validate(&bad, &catalog), Err(ValidationError::PathMismatch { .. })));

        let mut bad = config.clone();
        bad.properties.remove("Age");
        bad.properties.insert("Years".to_string(), moved);
        assert!(matches!(validate(&bad, &catalog), Err(ValidationError::UnknownProperty { .. })));

        let mut bad = config;
        if let Some(settings) = bad
            .property_mut("Name")
            .and_then(|p| p.mode_settings.get_mut(&DisplayMode::Card))
        {
            settings.width = "wide".to_string();
        }
        assert!(matches!(validate(&bad, &catalog), Err(ValidationError::InvalidLength { .. })));
    }

    #[test]
    fn test_version_parsing() {
        assert!(version_supported("1.0"));
        assert!(version_supported("1.12"));
        assert!(version_supported("1"));
        assert!(!version_supported("1.x"));
        assert!(!version_supported("10.0"));
        assert!(!version_supported(""));
    }
}
