// Strategy classification and formatter round trips through the public API
use chrono::{FixedOffset, NaiveDate};
use std::sync::Arc;
use viewcfg_engine::{DisplayStrategyRegistry, LocalZone, TypeCatalog, ValueFormatterRegistry};
use viewcfg_types::{
    DateTimeValue, DisplayType, EnumMember, TypeDescriptor, TypeDisplayConfig, Value, builtin, keys,
};

fn registries() -> (DisplayStrategyRegistry, ValueFormatterRegistry) {
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    let formatters = ValueFormatterRegistry::new()
        .with_local_zone(LocalZone::Fixed(plus_two))
        .with_catalog(Arc::new(TypeCatalog::new()));
    (DisplayStrategyRegistry::new(), formatters)
}

fn config_for(registry: &DisplayStrategyRegistry, ty: &TypeDescriptor) -> TypeDisplayConfig {
    let mut config = registry.get_strategy(ty).default_config();
    config.type_name = ty.identity.full_name.clone();
    config
}

#[test]
fn test_unmatched_types_fall_through_in_order() {
    let (registry, _) = registries();
    let color = TypeDescriptor::enumeration("Paint.Color", "paint", vec![EnumMember::new("Red")]);
    let palette = TypeDescriptor::sequence("Paint.Palette", "paint", color.clone());
    let brush = TypeDescriptor::object("Paint.Brush", "paint").with_property("Size", builtin::i32());
    let glyph = TypeDescriptor::primitive("char", "core");

    assert_eq!(registry.classify(&builtin::bool()), DisplayType::Boolean);
    assert_eq!(registry.classify(&color), DisplayType::Enum);
    assert_eq!(registry.classify(&palette), DisplayType::Collection);
    assert_eq!(registry.classify(&brush), DisplayType::ComplexObject);
    assert_eq!(registry.classify(&glyph), DisplayType::Text);
}

#[test]
fn test_number_round_trip() {
    let (registry, formatters) = registries();
    let total = config_for(&registry, &builtin::decimal());
    let count = config_for(&registry, &builtin::i64());

    let text = formatters.format(&Value::Float(98765.25), &total);
    assert_eq!(text, "98,765.25");
    assert_eq!(formatters.parse(&text, &total).unwrap(), Value::Float(98765.25));

    let text = formatters.format(&Value::Int(-4200), &count);
    assert_eq!(text, "-4,200.00");
    assert_eq!(formatters.parse(&text, &count).unwrap(), Value::Int(-4200));
}

#[test]
fn test_datetime_round_trip_in_display_clock() {
    let (registry, formatters) = registries();
    let config = config_for(&registry, &builtin::datetime());
    let moment = NaiveDate::from_ymd_opt(2023, 11, 30)
        .unwrap()
        .and_hms_opt(23, 15, 0)
        .unwrap();

    let local = Value::DateTime(DateTimeValue::local(moment));
    let text = formatters.format(&local, &config);
    assert_eq!(text, "2023-11-30 23:15:00");
    assert_eq!(formatters.parse(&text, &config).unwrap(), local);

    // A UTC value is shown in the fixed +02:00 zone
    let utc = Value::DateTime(DateTimeValue::utc(moment));
    assert_eq!(formatters.format(&utc, &config), "2023-12-01 01:15:00");

    let utc_config = config.clone().with(keys::USE_LOCAL_TIME, false);
    let text = formatters.format(&utc, &utc_config);
    assert_eq!(formatters.parse(&text, &utc_config).unwrap(), utc);
}

#[test]
fn test_string_round_trip() {
    let (registry, formatters) = registries();
    let config = config_for(&registry, &builtin::string());
    let value = Value::text("Grace Hopper");

    let text = formatters.format(&value, &config);
    assert_eq!(text, "Grace Hopper");
    assert_eq!(formatters.parse(&text, &config).unwrap(), value);
}

#[test]
fn test_text_truncation_is_one_way() {
    let (registry, formatters) = registries();
    let config = config_for(&registry, &builtin::string()).with(keys::MAX_LENGTH, 5);
    assert_eq!(formatters.format(&Value::text("Grace Hopper"), &config), "Grace...");
}
