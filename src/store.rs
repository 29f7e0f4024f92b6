//! Template store for browsing a template root.
//!
//! A template root holds one directory per group. Each group directory
//! carries a configuration file (see [`GroupConfig::load`]) and the template
//! files it declares:
//!
//! ```text
//! .code-generator/
//! └── java/
//!     ├── template.json
//!     ├── entity.java.hbs
//!     └── controller.java.j2
//! ```

use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::config::{discover_root, GroupConfig};
use crate::constants::{LOCAL_ROOT_DIR, ROOT_ENV_VAR};
use crate::error::{Error, Result};
use crate::ioutils::{list_dirs, list_files, read_text};
use crate::renderer::TemplateKind;

/// Read-only view over a template root.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    /// Locates the template root from the working directory or environment.
    pub fn discover() -> Result<Self> {
        let root = discover_root().ok_or_else(|| {
            Error::ConfigNotFound(format!(
                "create a {LOCAL_ROOT_DIR} directory or set {ROOT_ENV_VAR}"
            ))
        })?;
        Ok(Self { root })
    }

    /// Creates a TemplateStore over an explicit directory.
    pub fn with_dir(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of `group`. Group names are single path components.
    pub fn group_dir(&self, group: &str) -> Result<PathBuf> {
        let mut components = Path::new(group).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(group)),
            _ => Err(Error::InvalidInput(format!("invalid group name '{group}'"))),
        }
    }

    /// Group names, sorted.
    pub fn groups(&self) -> Vec<String> {
        list_dirs(&self.root)
            .into_iter()
            .filter_map(|dir| dir.file_name()?.to_str().map(str::to_string))
            .collect()
    }

    /// Files of `group` with a recognized template extension, sorted.
    pub fn template_files(&self, group: &str) -> Result<Vec<String>> {
        let files = list_files(self.group_dir(group)?)
            .into_iter()
            .filter(|path| TemplateKind::from_path(path).is_some())
            .filter_map(|path| path.file_name()?.to_str().map(str::to_string))
            .collect();
        Ok(files)
    }

    pub fn load_group(&self, group: &str) -> Result<GroupConfig> {
        GroupConfig::load(self.group_dir(group)?)
    }

    /// Reads a template file relative to its group directory.
    pub fn read_template(&self, group: &str, file: &str) -> Result<String> {
        let path = self.group_dir(group)?.join(file);
        debug!("Reading template {}", path.display());
        read_text(path)
    }
}
