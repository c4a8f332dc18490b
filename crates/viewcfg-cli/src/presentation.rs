//! Plain-text rendering of configs for the terminal.

use std::fmt::Write;
use viewcfg_types::{DisplayMode, VisualConfig};

/// Every property with its display type and per-mode settings
pub fn render_config(config: &VisualConfig) -> String {
    let mut out = String::new();
    let modes: Vec<&str> = config.supported_modes.iter().map(|m| m.as_str()).collect();
    let _ = writeln!(out, "{}", config.identity());
    let _ = writeln!(
        out,
        "  version {}, max depth {}, modes {}",
        config.version,
        config.max_depth,
        modes.join(", ")
    );

    for property in config.properties.values() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  {} [{}] \"{}\"",
            property.property_path, property.type_config.display_type, property.display_name
        );
        for mode in &config.supported_modes {
            let s = property.settings_for(*mode);
            let _ = writeln!(
                out,
                "    {:<6} visible={} order={} width={} read-only={}",
                mode.as_str(),
                s.visible,
                s.order,
                s.width,
                s.is_read_only
            );
        }
    }
    out
}

/// Visible properties of one mode, in display order
pub fn render_mode(config: &VisualConfig, mode: DisplayMode) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", config.identity(), mode);
    for property in config.visible_properties(mode) {
        let s = property.settings_for(mode);
        let _ = writeln!(
            out,
            "  {:>4}  {:<24} {}",
            s.order, property.property_path, property.display_name
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewcfg_sdk::{Client, VisualizerOptions};
    use viewcfg_types::{TypeDescriptor, builtin};

    fn config() -> VisualConfig {
        let ty = TypeDescriptor::object("Crm.Person", "crm")
            .with_property("Name", builtin::string())
            .with_property("Age", builtin::i32());
        Client::new(VisualizerOptions::default()).default_config(&ty)
    }

    #[test]
    fn test_render_config_lists_every_mode() {
        let text = render_config(&config());
        assert!(text.starts_with("Crm.Person, crm\n"));
        assert!(text.contains("  Age [Number] \"Age\""));
        assert!(text.contains("    Card   visible=true order=100 width=200 read-only=true"));
        assert!(text.contains("    Detail visible=true order=100 width=* read-only=false"));
    }

    #[test]
    fn test_render_mode_skips_hidden() {
        let mut config = config();
        config
            .property_mut("Age")
            .unwrap()
            .mode_settings
            .get_mut(&DisplayMode::List)
            .unwrap()
            .visible = false;

        let text = render_mode(&config, DisplayMode::List);
        assert!(text.contains("Name"));
        assert!(!text.contains("Age"));
    }
}
