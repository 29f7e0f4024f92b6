use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::constants::STDIN_INDICATOR;
use crate::error::{Error, Result};

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    std::fs::create_dir_all(dest_path).map_err(Error::IoError)
}

/// Writes `content` to `dest_path`, creating missing parent directories.
pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    let base_path = std::env::current_dir().unwrap_or_default();
    let abs_path = if dest_path.is_absolute() {
        dest_path.to_path_buf()
    } else {
        base_path.join(dest_path)
    };

    if let Some(parent) = abs_path.parent() {
        create_dir_all(parent)?;
    }
    debug!("Writing {} bytes to {}", content.len(), abs_path.display());
    std::fs::write(abs_path, content).map_err(Error::IoError)
}

pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    std::fs::read_to_string(path.as_ref()).map_err(Error::IoError)
}

/// Immediate subdirectories of `root`, sorted by name.
pub fn list_dirs<P: AsRef<Path>>(root: P) -> Vec<PathBuf> {
    list_entries(root, |entry| entry.file_type().is_dir())
}

/// Immediate files of `root`, sorted by name.
pub fn list_files<P: AsRef<Path>>(root: P) -> Vec<PathBuf> {
    list_entries(root, |entry| entry.file_type().is_file())
}

fn list_entries<P, F>(root: P, keep: F) -> Vec<PathBuf>
where
    P: AsRef<Path>,
    F: Fn(&walkdir::DirEntry) -> bool,
{
    WalkDir::new(root.as_ref())
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| keep(entry))
        .map(|entry| entry.into_path())
        .collect()
}

pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::IoError)?;
    Ok(buf)
}

/// Resolves a JSON argument given inline, as `-` for stdin, or from a file.
pub fn read_json_input(
    inline: Option<&str>,
    file: Option<&Path>,
) -> Result<serde_json::Value> {
    let buf = match (inline, file) {
        (Some(STDIN_INDICATOR), _) => read_from(std::io::stdin())?,
        (Some(inline), _) => inline.to_string(),
        (None, Some(file)) => read_text(file)?,
        (None, None) => {
            return Err(Error::InvalidInput(
                "expected inline JSON, '-' for stdin, or --file".into(),
            ))
        }
    };
    Ok(serde_json::from_str(&buf)?)
}
