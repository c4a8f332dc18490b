pub mod change;
pub mod config;
pub mod descriptor;
pub mod display;
pub mod error;
pub mod setting;
pub mod value;

pub use change::{ChangeTarget, ConfigurationChange, DisplayField};
pub use config::{PropertyVisualConfig, TypeDisplayConfig, VisualConfig};
pub use descriptor::{EnumMember, PropertyDescriptor, TypeDescriptor, TypeIdentity, TypeTraits, builtin};
pub use display::{Alignment, DisplayMode, DisplaySettings, DisplayType, Length, UiHandle};
pub use error::{Error, Result};
pub use setting::{SettingValue, keys};
pub use value::{DateTimeKind, DateTimeValue, EnumValue, Value};
