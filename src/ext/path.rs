use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Extension trait for Path to provide conversions used while laying out generated files
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use codesmith::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("test");
    /// assert_eq!(path.to_str_checked().unwrap(), "test");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// Appends every segment of a dotted package name as a directory.
    ///
    /// # Examples
    /// ```
    /// use codesmith::ext::PathExt;
    /// use std::path::{Path, PathBuf};
    ///
    /// let path = Path::new("src/main/java").join_package("com.acme.user");
    /// assert_eq!(path, PathBuf::from("src/main/java/com/acme/user"));
    /// ```
    fn join_package(&self, package: &str) -> PathBuf;

    /// Lowercased final extension, if any.
    fn extension_lowercase(&self) -> Option<String>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::Other(anyhow::anyhow!(
                "Path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn join_package(&self, package: &str) -> PathBuf {
        package
            .split('.')
            .filter(|segment| !segment.is_empty())
            .fold(self.to_path_buf(), |path, segment| path.join(segment))
    }

    fn extension_lowercase(&self) -> Option<String> {
        self.extension().and_then(|ext| ext.to_str()).map(str::to_lowercase)
    }
}
