use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a host type: full name plus the module/assembly declaring it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeIdentity {
    pub full_name: String,
    pub assembly: String,
}

impl TypeIdentity {
    pub fn new(full_name: impl Into<String>, assembly: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            assembly: assembly.into(),
        }
    }

    /// Cache key; the assembly part keeps same-named types apart
    pub fn cache_key(&self) -> String {
        format!("{}, {}", self.full_name, self.assembly)
    }

    /// Parse `"Full.Name, Assembly"`
    pub fn parse(qualified: &str) -> Option<Self> {
        let (full_name, assembly) = qualified.split_once(',')?;
        let full_name = full_name.trim();
        let assembly = assembly.trim();
        if full_name.is_empty() || assembly.is_empty() {
            return None;
        }
        Some(Self::new(full_name, assembly))
    }

    /// Last segment of the full name
    pub fn simple_name(&self) -> &str {
        self.full_name.rsplit('.').next().unwrap_or(&self.full_name)
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.full_name, self.assembly)
    }
}

/// Capabilities used by the classification policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeTraits {
    /// Scalar machine type (integers, floats, char, ...)
    pub primitive: bool,
    /// Enumeration with named members
    pub enumeration: bool,
    /// Exposes an iterable/sequence capability
    pub iterable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumMember {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EnumMember {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn described(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}

/// Host-supplied description of a type, in place of runtime reflection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    pub identity: TypeIdentity,
    #[serde(default)]
    pub traits: TypeTraits,
    /// Public properties, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<EnumMember>,
    /// Item type of a sequence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<Box<TypeDescriptor>>,
}

impl TypeDescriptor {
    fn bare(identity: TypeIdentity, traits: TypeTraits) -> Self {
        Self {
            identity,
            traits,
            properties: Vec::new(),
            members: Vec::new(),
            element: None,
        }
    }

    pub fn primitive(full_name: &str, assembly: &str) -> Self {
        Self::bare(
            TypeIdentity::new(full_name, assembly),
            TypeTraits {
                primitive: true,
                ..TypeTraits::default()
            },
        )
    }

    pub fn enumeration(full_name: &str, assembly: &str, members: Vec<EnumMember>) -> Self {
        let mut ty = Self::bare(
            TypeIdentity::new(full_name, assembly),
            TypeTraits {
                enumeration: true,
                ..TypeTraits::default()
            },
        );
        ty.members = members;
        ty
    }

    pub fn sequence(full_name: &str, assembly: &str, element: TypeDescriptor) -> Self {
        let mut ty = Self::bare(
            TypeIdentity::new(full_name, assembly),
            TypeTraits {
                iterable: true,
                ..TypeTraits::default()
            },
        );
        ty.element = Some(Box::new(element));
        ty
    }

    pub fn object(full_name: &str, assembly: &str) -> Self {
        Self::bare(TypeIdentity::new(full_name, assembly), TypeTraits::default())
    }

    /// Builder: append a public property
    pub fn with_property(mut self, name: &str, ty: TypeDescriptor) -> Self {
        self.properties.push(PropertyDescriptor {
            name: name.to_string(),
            ty,
        });
        self
    }

    /// Builder: mark as iterable (e.g. a structured collection type)
    pub fn iterable(mut self) -> Self {
        self.traits.iterable = true;
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Resolve a dot-delimited property path to the descriptor of its type
    pub fn property_at(&self, path: &str) -> Option<&TypeDescriptor> {
        let mut current = self;
        for segment in path.split('.') {
            current = &current.property(segment)?.ty;
        }
        Some(current)
    }

    pub fn member(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Built-in primitive-like types, matched exactly by the strategy table
pub mod builtin {
    use super::{TypeDescriptor, TypeIdentity};

    pub const ASSEMBLY: &str = "core";

    pub const STRING: &str = "string";
    pub const I32: &str = "i32";
    pub const I64: &str = "i64";
    pub const U32: &str = "u32";
    pub const U64: &str = "u64";
    pub const F32: &str = "f32";
    pub const F64: &str = "f64";
    pub const DECIMAL: &str = "decimal";
    pub const DATETIME: &str = "datetime";
    pub const BOOL: &str = "bool";

    pub const INTEGERS: [&str; 4] = [I32, I64, U32, U64];
    pub const FLOATS: [&str; 3] = [F32, F64, DECIMAL];

    pub fn identity(name: &str) -> TypeIdentity {
        TypeIdentity::new(name, ASSEMBLY)
    }

    pub fn is_integer(full_name: &str) -> bool {
        INTEGERS.contains(&full_name)
    }

    /// The string type is not a machine primitive, but it is not structured either
    pub fn string() -> TypeDescriptor {
        TypeDescriptor::object(STRING, ASSEMBLY).iterable()
    }

    pub fn i32() -> TypeDescriptor {
        TypeDescriptor::primitive(I32, ASSEMBLY)
    }

    pub fn i64() -> TypeDescriptor {
        TypeDescriptor::primitive(I64, ASSEMBLY)
    }

    pub fn u32() -> TypeDescriptor {
        TypeDescriptor::primitive(U32, ASSEMBLY)
    }

    pub fn u64() -> TypeDescriptor {
        TypeDescriptor::primitive(U64, ASSEMBLY)
    }

    pub fn f32() -> TypeDescriptor {
        TypeDescriptor::primitive(F32, ASSEMBLY)
    }

    pub fn f64() -> TypeDescriptor {
        TypeDescriptor::primitive(F64, ASSEMBLY)
    }

    pub fn decimal() -> TypeDescriptor {
        TypeDescriptor::object(DECIMAL, ASSEMBLY)
    }

    pub fn datetime() -> TypeDescriptor {
        TypeDescriptor::object(DATETIME, ASSEMBLY)
    }

    pub fn bool() -> TypeDescriptor {
        TypeDescriptor::primitive(BOOL, ASSEMBLY)
    }

    /// Every built-in descriptor, used to seed catalogs
    pub fn all() -> Vec<TypeDescriptor> {
        vec![
            string(),
            i32(),
            i64(),
            u32(),
            u64(),
            f32(),
            f64(),
            decimal(),
            datetime(),
            bool(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_includes_assembly() {
        let a = TypeIdentity::new("Shop.Order", "shop-core");
        let b = TypeIdentity::new("Shop.Order", "shop-legacy");
        assert_ne!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key(), "Shop.Order, shop-core");
    }

    #[test]
    fn test_identity_parse() {
        let id = TypeIdentity::parse("Shop.Order, shop-core").unwrap();
        assert_eq!(id.full_name, "Shop.Order");
        assert_eq!(id.assembly, "shop-core");
        assert_eq!(id.simple_name(), "Order");
        assert!(TypeIdentity::parse("Shop.Order").is_none());
        assert!(TypeIdentity::parse(", x").is_none());
    }

    #[test]
    fn test_property_at_nested_path() {
        let address = TypeDescriptor::object("Shop.Address", "shop").with_property("City", builtin::string());
        let customer = TypeDescriptor::object("Shop.Customer", "shop")
            .with_property("Name", builtin::string())
            .with_property("Address", address);

        let city = customer.property_at("Address.City").unwrap();
        assert_eq!(city.identity, builtin::identity(builtin::STRING));
        assert!(customer.property_at("Address.Zip").is_none());
        assert!(customer.property_at("Name.Length").is_none());
    }

    #[test]
    fn test_descriptor_json_shape() {
        let status = TypeDescriptor::enumeration(
            "Shop.Status",
            "shop",
            vec![EnumMember::described("Open", "Open order"), EnumMember::new("Closed")],
        );
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["identity"]["fullName"], "Shop.Status");
        assert_eq!(json["traits"]["enumeration"], true);
        assert_eq!(json["members"][0]["description"], "Open order");
        assert!(json.get("properties").is_none());

        let back: TypeDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(back, status);
    }
}
