//! This module provides the `SettingsLoader` struct, responsible for loading
//! machine settings from files, strings, and directories of `.enigma` files.

use crate::parser::parse;
use crate::types::{EnigmaError, MachineConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// `SettingsLoader` is a utility struct for loading machine settings documents.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Loads machine settings from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(MachineConfig)` if the file is successfully read and parsed.
    /// * `Err(EnigmaError::FileError)` if the file cannot be read.
    /// * `Err(EnigmaError::ParseError)` or `Err(EnigmaError::ValidationError)`
    ///   if the file content is not a valid settings document.
    pub fn load_settings(path: &Path) -> Result<MachineConfig, EnigmaError> {
        let content = fs::read_to_string(path).map_err(|e| {
            EnigmaError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads machine settings from the provided string content.
    ///
    /// Useful for settings that are not stored in files, e.g. user input.
    pub fn load_from_string(content: &str) -> Result<MachineConfig, EnigmaError> {
        parse(content)
    }

    /// Loads every settings file (`.enigma` extension) from a given directory.
    ///
    /// Directories and files with other extensions are skipped. Each element
    /// of the returned vector records either a successfully loaded settings
    /// file (with its path) or the error it produced.
    pub fn load_dir(directory: &Path) -> Vec<Result<(PathBuf, MachineConfig), EnigmaError>> {
        if !directory.exists() {
            return vec![Err(EnigmaError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(EnigmaError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(EnigmaError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                if path.is_dir() || path.extension().is_none_or(|ext| ext != "enigma") {
                    return None;
                }

                match Self::load_settings(&path) {
                    Ok(config) => Some(Ok((path, config))),
                    Err(e) => Some(Err(EnigmaError::FileError(format!(
                        "Failed to load settings from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}
