use viewcfg_types::{
    Alignment, ChangeTarget, ConfigurationChange, DisplayField, DisplayMode, DisplaySettings,
    Length, PropertyVisualConfig, SettingValue, VisualConfig,
};

use crate::SharedConfig;
use crate::error::EditError;
use crate::history::ChangeTracker;

fn invalid(target: &ChangeTarget, reason: impl Into<String>) -> EditError {
    EditError::InvalidValue {
        target: target.to_string(),
        reason: reason.into(),
    }
}

fn read_field(settings: &DisplaySettings, field: DisplayField) -> SettingValue {
    match field {
        DisplayField::Visible => settings.visible.into(),
        DisplayField::Order => settings.order.into(),
        DisplayField::Width => settings.width.as_str().into(),
        DisplayField::Height => settings.height.as_str().into(),
        DisplayField::Alignment => SettingValue::enum_name(settings.alignment.as_str()),
        DisplayField::IsReadOnly => settings.is_read_only.into(),
        DisplayField::Format => settings.format.clone().into(),
    }
}

fn write_field(
    settings: &mut DisplaySettings,
    field: DisplayField,
    value: &SettingValue,
    target: &ChangeTarget,
) -> Result<(), EditError> {
    match field {
        DisplayField::Visible | DisplayField::IsReadOnly => {
            let flag = value.as_bool().ok_or_else(|| invalid(target, "expected a boolean"))?;
            if field == DisplayField::Visible {
                settings.visible = flag;
            } else {
                settings.is_read_only = flag;
            }
        }
        DisplayField::Order => {
            settings.order = value
                .as_i64()
                .and_then(|i| i32::try_from(i).ok())
                .ok_or_else(|| invalid(target, "expected a 32-bit integer"))?;
        }
        DisplayField::Width | DisplayField::Height => {
            let raw = value.as_str().ok_or_else(|| invalid(target, "expected text"))?;
            Length::parse(raw).map_err(|e| invalid(target, e.to_string()))?;
            if field == DisplayField::Width {
                settings.width = raw.to_string();
            } else {
                settings.height = raw.to_string();
            }
        }
        DisplayField::Alignment => {
            let name = value
                .as_enum_name()
                .ok_or_else(|| invalid(target, "expected an alignment name"))?;
            settings.alignment = name
                .parse::<Alignment>()
                .map_err(|e| invalid(target, e.to_string()))?;
        }
        DisplayField::Format => {
            settings.format = match value {
                SettingValue::Null => None,
                SettingValue::Text(s) => Some(s.clone()),
                _ => return Err(invalid(target, "expected text or null")),
            };
        }
    }
    Ok(())
}

fn property_mut<'a>(config: &'a mut VisualConfig, path: &str) -> Result<&'a mut PropertyVisualConfig, EditError> {
    config
        .property_mut(path)
        .ok_or_else(|| EditError::UnknownProperty(path.to_string()))
}

/// Write `value` into the addressed slot of `config`, returning what was there
fn apply_target(
    config: &mut VisualConfig,
    path: &str,
    target: &ChangeTarget,
    value: &SettingValue,
) -> Result<SettingValue, EditError> {
    match target {
        ChangeTarget::MaxDepth => {
            let depth = value
                .as_i64()
                .filter(|d| *d >= 1)
                .and_then(|d| u32::try_from(d).ok())
                .ok_or_else(|| invalid(target, "expected an integer of at least 1"))?;
            let old = SettingValue::Int(i64::from(config.max_depth));
            config.max_depth = depth;
            Ok(old)
        }
        ChangeTarget::DisplayName => {
            let name = value.as_str().ok_or_else(|| invalid(target, "expected text"))?;
            let property = property_mut(config, path)?;
            let old = SettingValue::text(property.display_name.as_str());
            property.display_name = name.to_string();
            Ok(old)
        }
        ChangeTarget::TypeSetting { key } => {
            let property = property_mut(config, path)?;
            Ok(property.type_config.set(key, value.clone()).unwrap_or(SettingValue::Null))
        }
        ChangeTarget::ModeSetting { mode, field } => {
            if !config.supports(*mode) {
                return Err(EditError::UnsupportedMode(mode.to_string()));
            }
            let property = property_mut(config, path)?;
            let settings = property.mode_settings.entry(*mode).or_default();
            let old = read_field(settings, *field);
            write_field(settings, *field, value, target)?;
            Ok(old)
        }
    }
}

/// Editing a shared config with undo/redo.
///
/// Every successful edit is recorded; undo and redo re-apply the recorded
/// old or new value. Not meant to be shared between threads.
#[derive(Debug)]
pub struct EditSession {
    config: SharedConfig,
    tracker: ChangeTracker,
    dirty: bool,
}

impl EditSession {
    pub fn new(config: SharedConfig) -> Self {
        Self::with_tracker(config, ChangeTracker::default())
    }

    pub fn with_tracker(config: SharedConfig, tracker: ChangeTracker) -> Self {
        Self {
            config,
            tracker,
            dirty: false,
        }
    }

    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Call after the config has been persisted
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Apply an edit and record it. Returns `None` when the value was already set.
    pub fn apply(
        &mut self,
        path: &str,
        target: ChangeTarget,
        value: SettingValue,
    ) -> Result<Option<ConfigurationChange>, EditError> {
        let mut config = self.config.write();
        let old = apply_target(&mut config, path, &target, &value)?;
        if old == value {
            return Ok(None);
        }
        config.touch();
        drop(config);

        let change = ConfigurationChange::new(path, target, old, value);
        self.tracker.track_change(change.clone());
        self.dirty = true;
        Ok(Some(change))
    }

    pub fn set_display_name(&mut self, path: &str, name: &str) -> Result<Option<ConfigurationChange>, EditError> {
        self.apply(path, ChangeTarget::DisplayName, SettingValue::text(name))
    }

    pub fn set_type_setting(
        &mut self,
        path: &str,
        key: &str,
        value: impl Into<SettingValue>,
    ) -> Result<Option<ConfigurationChange>, EditError> {
        self.apply(
            path,
            ChangeTarget::TypeSetting {
                key: key.to_string(),
            },
            value.into(),
        )
    }

    pub fn set_mode_setting(
        &mut self,
        path: &str,
        mode: DisplayMode,
        field: DisplayField,
        value: impl Into<SettingValue>,
    ) -> Result<Option<ConfigurationChange>, EditError> {
        self.apply(path, ChangeTarget::ModeSetting { mode, field }, value.into())
    }

    pub fn set_max_depth(&mut self, depth: u32) -> Result<Option<ConfigurationChange>, EditError> {
        self.apply("", ChangeTarget::MaxDepth, SettingValue::Int(i64::from(depth)))
    }

    fn replay(&mut self, change: &ConfigurationChange, value: &SettingValue) -> Result<(), EditError> {
        let mut config = self.config.write();
        apply_target(&mut config, change.property_path(), change.target(), value)?;
        config.touch();
        self.dirty = true;
        Ok(())
    }

    /// Revert the most recent change; `None` when there is nothing to undo.
    /// A change that no longer applies stays on the undo stack.
    pub fn undo(&mut self) -> Result<Option<ConfigurationChange>, EditError> {
        let Some(change) = self.tracker.peek_undo().cloned() else {
            return Ok(None);
        };
        self.replay(&change, change.old_value())?;
        self.tracker.undo();
        Ok(Some(change))
    }

    pub fn redo(&mut self) -> Result<Option<ConfigurationChange>, EditError> {
        let Some(change) = self.tracker.peek_redo().cloned() else {
            return Ok(None);
        };
        self.replay(&change, change.new_value())?;
        self.tracker.redo();
        Ok(Some(change))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::RwLock;
    use std::sync::Arc;
    use viewcfg_types::{TypeDescriptor, builtin, keys};

    use crate::DisplayStrategyRegistry;

    fn session() -> EditSession {
        let ty = TypeDescriptor::object("Crm.Person", "crm")
            .with_property("Name", builtin::string())
            .with_property("Age", builtin::i32());
        let config = DisplayStrategyRegistry::new().create_default_config(&ty);
        EditSession::new(Arc::new(RwLock::new(config)))
    }

    #[test]
    fn test_edit_then_undo_redo() {
        let mut session = session();
        session
            .set_mode_setting("Name", DisplayMode::List, DisplayField::Order, 1)
            .unwrap();
        session.set_display_name("Name", "Full name").unwrap();
        assert!(session.is_dirty());

        let undone = session.undo().unwrap().unwrap();
        assert_eq!(undone.target(), &ChangeTarget::DisplayName);
        assert_eq!(session.config().read().property("Name").unwrap().display_name, "Name");

        session.undo().unwrap();
        assert_eq!(
            session.config().read().property("Name").unwrap().settings_for(DisplayMode::List).order,
            100
        );

        session.redo().unwrap();
        assert_eq!(
            session.config().read().property("Name").unwrap().settings_for(DisplayMode::List).order,
            1
        );
    }

    #[test]
    fn test_type_setting_and_max_depth() {
        let mut session = session();
        let change = session.set_type_setting("Age", keys::UNIT, "years").unwrap().unwrap();
        assert_eq!(change.old_value(), &SettingValue::text(""));

        session.set_max_depth(5).unwrap();
        assert_eq!(session.config().read().max_depth, 5);
        session.undo().unwrap();
        assert_eq!(session.config().read().max_depth, 3);
    }

    #[test]
    fn test_invalid_edits_are_rejected_and_not_recorded() {
        let mut session = session();
        assert!(matches!(
            session.set_mode_setting("Name", DisplayMode::Card, DisplayField::Width, "wide"),
            Err(EditError::InvalidValue { .. })
        ));
        assert!(matches!(
            session.set_display_name("Missing", "x"),
            Err(EditError::UnknownProperty(_))
        ));
        assert!(session.set_max_depth(0).is_err());
        assert!(!session.tracker().can_undo());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_unchanged_value_is_not_recorded() {
        let mut session = session();
        let change = session
            .set_mode_setting("Name", DisplayMode::Detail, DisplayField::Width, "*")
            .unwrap();
        assert!(change.is_none());
        assert!(!session.tracker().can_undo());
    }

    #[test]
    fn test_unsupported_mode() {
        let mut session = session();
        session.config().write().supported_modes = vec![DisplayMode::List];
        assert!(matches!(
            session.set_mode_setting("Name", DisplayMode::Card, DisplayField::Visible, false),
            Err(EditError::UnsupportedMode(_))
        ));
    }

    #[test]
    fn test_failed_undo_keeps_history() {
        let mut session = session();
        session.set_display_name("Name", "Full name").unwrap();

        // The shared config is replaced by one without the edited property
        let original = session.config().read().clone();
        let trimmed = TypeDescriptor::object("Crm.Person", "crm").with_property("Age", builtin::i32());
        *session.config().write() = DisplayStrategyRegistry::new().create_default_config(&trimmed);

        assert!(matches!(session.undo(), Err(EditError::UnknownProperty(_))));
        assert_eq!(session.tracker().undo_len(), 1);
        assert_eq!(session.tracker().redo_len(), 0);

        *session.config().write() = original;
        session.undo().unwrap();
        assert_eq!(session.config().read().property("Name").unwrap().display_name, "Name");
        assert_eq!(session.tracker().redo_len(), 1);
    }

    #[test]
    fn test_failed_redo_keeps_history() {
        let mut session = session();
        session.set_display_name("Name", "Full name").unwrap();
        session.undo().unwrap();

        let trimmed = TypeDescriptor::object("Crm.Person", "crm").with_property("Age", builtin::i32());
        *session.config().write() = DisplayStrategyRegistry::new().create_default_config(&trimmed);

        assert!(session.redo().is_err());
        assert_eq!(session.tracker().undo_len(), 0);
        assert_eq!(session.tracker().redo_len(), 1);
    }
}
