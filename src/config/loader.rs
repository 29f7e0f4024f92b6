//! Template root discovery and group configuration loading

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::types::GroupConfig;
use crate::constants::{GROUP_CONFIG_FILENAMES, LOCAL_ROOT_DIR, ROOT_ENV_VAR};
use crate::error::{Error, Result};
use crate::ext::PathExt;

/// Finds the template root from the process' working directory and environment.
pub fn discover_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    discover_root_from(&cwd, std::env::var_os(ROOT_ENV_VAR))
}

/// `<cwd>/.code-generator` when it exists, otherwise the directory named by
/// the environment value when that exists.
pub fn discover_root_from(cwd: &Path, env_value: Option<OsString>) -> Option<PathBuf> {
    let local = cwd.join(LOCAL_ROOT_DIR);
    if local.is_dir() {
        debug!("Using local template root: {}", local.display());
        return Some(local);
    }

    let from_env = PathBuf::from(env_value.filter(|value| !value.is_empty())?);
    if from_env.is_dir() {
        debug!("Using template root from {ROOT_ENV_VAR}: {}", from_env.display());
        return Some(from_env);
    }
    None
}

impl GroupConfig {
    /// Loads the first configuration file found in `group_dir`.
    pub fn load<P: AsRef<Path>>(group_dir: P) -> Result<Self> {
        let group_dir = group_dir.as_ref();

        for file_name in GROUP_CONFIG_FILENAMES.iter() {
            let config_path = group_dir.join(file_name);
            if !config_path.is_file() {
                continue;
            }

            let content = std::fs::read_to_string(&config_path)?;
            let parsed = match *file_name {
                "template.json" => serde_json::from_str(&content).map_err(|e| e.to_string()),
                _ => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            };
            debug!("Loaded group configuration: {}", config_path.display());

            return parsed.map_err(|reason| Error::ConfigParse {
                path: config_path.display().to_string(),
                reason,
            });
        }

        Err(Error::ConfigNotFound(format!(
            "no {} in '{}'",
            GROUP_CONFIG_FILENAMES.join(", "),
            group_dir.to_str_checked()?
        )))
    }
}
