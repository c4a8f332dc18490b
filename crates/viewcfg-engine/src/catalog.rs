use dashmap::DashMap;
use viewcfg_types::{TypeDescriptor, TypeIdentity, builtin};

use crate::error::Result;

/// Known type descriptors keyed by identity.
///
/// Stands in for runtime type lookup: import validation and the editor
/// resolve `(full name, assembly)` pairs here.
#[derive(Debug)]
pub struct TypeCatalog {
    types: DashMap<String, TypeDescriptor>,
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeCatalog {
    /// Catalog pre-loaded with the built-in primitives
    pub fn new() -> Self {
        let catalog = Self::empty();
        for ty in builtin::all() {
            catalog.register(ty);
        }
        catalog
    }

    pub fn empty() -> Self {
        Self {
            types: DashMap::new(),
        }
    }

    /// Load descriptors from a JSON array on top of the built-ins
    pub fn from_json(json: &str) -> Result<Self> {
        let descriptors: Vec<TypeDescriptor> = serde_json::from_str(json)?;
        let catalog = Self::new();
        for ty in descriptors {
            catalog.register(ty);
        }
        Ok(catalog)
    }

    /// Register a descriptor together with every type it references.
    /// A later registration of the same identity replaces the earlier one.
    pub fn register(&self, ty: TypeDescriptor) {
        for property in &ty.properties {
            self.register_nested(&property.ty);
        }
        if let Some(element) = &ty.element {
            self.register_nested(element);
        }
        self.types.insert(ty.identity.cache_key(), ty);
    }

    fn register_nested(&self, ty: &TypeDescriptor) {
        let key = ty.identity.cache_key();
        if !self.types.contains_key(&key) {
            self.register(ty.clone());
        }
    }

    pub fn resolve(&self, identity: &TypeIdentity) -> Option<TypeDescriptor> {
        self.types
            .get(&identity.cache_key())
            .map(|entry| entry.value().clone())
    }

    pub fn contains(&self, identity: &TypeIdentity) -> bool {
        self.types.contains_key(&identity.cache_key())
    }

    /// Look up by full name alone; the lowest assembly name wins on ambiguity
    pub fn find_by_name(&self, full_name: &str) -> Option<TypeDescriptor> {
        self.types
            .iter()
            .filter(|entry| entry.value().identity.full_name == full_name)
            .map(|entry| entry.value().clone())
            .min_by(|a, b| a.identity.assembly.cmp(&b.identity.assembly))
    }

    /// Identities of every registered type, sorted
    pub fn identities(&self) -> Vec<TypeIdentity> {
        let mut ids: Vec<TypeIdentity> = self
            .types
            .iter()
            .map(|entry| entry.value().identity.clone())
            .collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_preloaded() {
        let catalog = TypeCatalog::new();
        assert_eq!(catalog.len(), builtin::all().len());
        assert!(catalog.contains(&builtin::identity(builtin::DATETIME)));
    }

    #[test]
    fn test_register_includes_referenced_types() {
        let catalog = TypeCatalog::new();
        let address = TypeDescriptor::object("Shop.Address", "shop").with_property("City", builtin::string());
        let customer = TypeDescriptor::object("Shop.Customer", "shop").with_property("Address", address);
        catalog.register(customer);

        assert!(catalog.contains(&TypeIdentity::new("Shop.Address", "shop")));
        assert_eq!(
            catalog.find_by_name("Shop.Customer").unwrap().identity.assembly,
            "shop"
        );
        assert!(catalog.find_by_name("Shop.Missing").is_none());
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"identity": {"fullName": "Shop.Status", "assembly": "shop"},
             "traits": {"enumeration": true},
             "members": [{"name": "Open"}, {"name": "Closed"}]}
        ]"#;
        let catalog = TypeCatalog::from_json(json).unwrap();
        let status = catalog.resolve(&TypeIdentity::new("Shop.Status", "shop")).unwrap();
        assert!(status.traits.enumeration);
        assert_eq!(status.members.len(), 2);

        assert!(TypeCatalog::from_json("{").is_err());
    }
}
