//! Sample type descriptors and item values.
//!
//! Two small domains are used across the integration tests:
//! - `Crm.Person`: flat, three primitive-like properties
//! - `Shop.Order`: enum, collection and nested object properties

use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::Path;
use viewcfg_types::{DateTimeValue, EnumMember, EnumValue, TypeDescriptor, Value, builtin};

pub const CRM: &str = "crm";
pub const SHOP: &str = "shop";

/// `Name: string, Age: i32, Created: datetime`
pub fn person() -> TypeDescriptor {
    TypeDescriptor::object("Crm.Person", CRM)
        .with_property("Name", builtin::string())
        .with_property("Age", builtin::i32())
        .with_property("Created", builtin::datetime())
}

pub fn address() -> TypeDescriptor {
    TypeDescriptor::object("Shop.Address", SHOP)
        .with_property("Street", builtin::string())
        .with_property("City", builtin::string())
}

pub fn order_status() -> TypeDescriptor {
    TypeDescriptor::enumeration(
        "Shop.OrderStatus",
        SHOP,
        vec![
            EnumMember::described("Pending", "Awaiting payment"),
            EnumMember::new("Shipped"),
            EnumMember::new("Delivered"),
        ],
    )
}

pub fn tags() -> TypeDescriptor {
    TypeDescriptor::sequence("Shop.TagList", SHOP, builtin::string())
}

pub fn order() -> TypeDescriptor {
    TypeDescriptor::object("Shop.Order", SHOP)
        .with_property("Id", builtin::i64())
        .with_property("Customer", builtin::string())
        .with_property("Total", builtin::decimal())
        .with_property("Placed", builtin::datetime())
        .with_property("Paid", builtin::bool())
        .with_property("Status", order_status())
        .with_property("Tags", tags())
        .with_property("ShipTo", address())
}

/// Catalog file content listing the sample types
pub fn catalog_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&vec![person(), order()])?)
}

pub fn write_catalog(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, catalog_json()?)?;
    Ok(())
}

fn object(fields: Vec<(&str, Value)>) -> Value {
    Value::Object(
        fields
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<BTreeMap<_, _>>(),
    )
}

/// An order placed 2024-03-05 14:30:15 UTC
pub fn order_item() -> Value {
    let placed = NaiveDate::from_ymd_opt(2024, 3, 5)
        .and_then(|d| d.and_hms_opt(14, 30, 15))
        .expect("valid timestamp");

    object(vec![
        ("Id", Value::Int(1001)),
        ("Customer", Value::text("Ada Lovelace")),
        ("Total", Value::Float(1234.5)),
        ("Placed", Value::DateTime(DateTimeValue::utc(placed))),
        ("Paid", Value::Bool(true)),
        ("Status", Value::Enum(EnumValue::described("Pending", "Awaiting payment"))),
        (
            "Tags",
            Value::List(vec![Value::text("gift"), Value::text("express")]),
        ),
        (
            "ShipTo",
            object(vec![
                ("Street", Value::text("12 Analytical Row")),
                ("City", Value::text("London")),
            ]),
        ),
    ])
}
