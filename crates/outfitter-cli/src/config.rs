//! Configuration read from environment variables.

use std::path::PathBuf;

use crate::error::AppError;

/// Directory holding `items.yaml` and `shops/`.
pub const CONTENT_DIR_VAR: &str = "OUTFITTER_CONTENT_DIR";
/// JSON file persisting item counts.
pub const SAVE_FILE_VAR: &str = "OUTFITTER_SAVE_FILE";
/// Balance of a new session.
pub const STARTING_COINS_VAR: &str = "OUTFITTER_STARTING_COINS";

/// Runtime configuration of the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `items.yaml` and `shops/*.yaml`.
    pub content_dir: PathBuf,
    /// JSON save file.
    pub save_file: PathBuf,
    /// Balance of a new session.
    pub starting_coins: u32,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from a variable lookup, applying defaults
    /// for unset variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let content_dir = lookup(CONTENT_DIR_VAR).unwrap_or_else(|| "content".to_string());
        let save_file =
            lookup(SAVE_FILE_VAR).unwrap_or_else(|| "outfitter-save.json".to_string());
        let starting_coins: u32 = lookup(STARTING_COINS_VAR)
            .unwrap_or_else(|| "50".to_string())
            .trim()
            .parse()
            .map_err(|e| {
                AppError::Config(format!("{STARTING_COINS_VAR} must be a valid u32: {e}"))
            })?;

        Ok(Self {
            content_dir: PathBuf::from(content_dir),
            save_file: PathBuf::from(save_file),
            starting_coins,
        })
    }

    /// Path of the item catalog file.
    #[must_use]
    pub fn items_path(&self) -> PathBuf {
        self.content_dir.join("items.yaml")
    }

    /// Directory of the shop catalog files.
    #[must_use]
    pub fn shops_dir(&self) -> PathBuf {
        self.content_dir.join("shops")
    }
}
