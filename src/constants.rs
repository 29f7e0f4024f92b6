//! Constants used throughout codesmith

/// Template root directory looked up in the current working directory
pub const LOCAL_ROOT_DIR: &str = ".code-generator";

/// Environment variable pointing at a template root
pub const ROOT_ENV_VAR: &str = "CODE_GENERATOR_PATH";

/// Group configuration file names in order of preference
pub const GROUP_CONFIG_FILENAMES: &[&str] =
    &["template.json", "template.yaml", "template.yml"];

/// Reserved key injected into mappings that carry extracted rule payloads
pub const RULES_KEY: &str = "_rules";

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Template file extensions per backend
pub mod extensions {
    pub const HANDLEBARS: &[&str] = &["hbs", "handlebars"];
    pub const JINJA: &[&str] = &["j2", "jinja", "jinja2"];
}

/// Defaults applied to module generation metadata
pub mod defaults {
    pub const AUTHOR: &str = "Code Generator";
    pub const VERSION: &str = "1.0.0";
    pub const EMAIL: &str = "example.com";
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
    pub const ENUM_VALUE_TYPE: &str = "String";
    /// Prefix of generated enumeration constant names
    pub const ENUM_CODE_PREFIX: &str = "V";
    /// Catalog entry name of the optional enumeration template
    pub const ENUM_TEMPLATE: &str = "enum";
}

/// Exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
