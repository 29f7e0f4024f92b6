//! Group configuration
//!
//! This module contains the configuration system components:
//! - `types`: the group document (`template.json` / `template.yaml`) and its parts
//! - `loader`: template root discovery and group configuration loading

pub mod loader;
pub mod types;

pub use loader::{discover_root, discover_root_from};
pub use types::{
    GroupConfig, InputParam, NamingRule, OutputConfig, ParamType, TemplateDefinition,
};
