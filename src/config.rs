//! Runtime settings read from the environment.

use std::env;
use std::path::PathBuf;

/// Default model for collaborator prompts.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
/// Default completion budget per collaborator call.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
/// Default directory for snapshots.
pub const DEFAULT_LOG_DIR: &str = "logs";
/// Default name of the generated project directory.
pub const DEFAULT_PROJECT_NAME: &str = "converted_project";

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Model identifier sent with every completion request.
    pub model: String,
    /// Maximum tokens per completion.
    pub max_tokens: u32,
    /// Root directory for run snapshots.
    pub log_dir: PathBuf,
    /// Directory name of the generated project below the output root.
    pub project_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
        }
    }
}

impl Settings {
    /// Loads `.env` if present, then reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `RAILSHIFT_MAX_TOKENS` is set but not a positive integer.
    pub fn from_env() -> Result<Self, String> {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `RAILSHIFT_MAX_TOKENS` is set but not a positive integer.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let max_tokens = match non_empty("RAILSHIFT_MAX_TOKENS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| format!("RAILSHIFT_MAX_TOKENS must be a positive integer, got '{raw}'"))?,
            None => defaults.max_tokens,
        };

        Ok(Self {
            model: non_empty("RAILSHIFT_MODEL").or_else(|| non_empty("MODEL_NAME")).unwrap_or(defaults.model),
            max_tokens,
            log_dir: non_empty("RAILSHIFT_LOG_DIR").map_or(defaults.log_dir, PathBuf::from),
            project_name: non_empty("RAILSHIFT_PROJECT_NAME").unwrap_or(defaults.project_name),
        })
    }
}
