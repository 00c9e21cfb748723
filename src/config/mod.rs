//! Configuration management.

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{AccountConfig, Config, LimitsConfig, OptionsConfig, TargetConfig};
pub use modes::ScanMode;
pub use validation::{validate_config, validate_username};
