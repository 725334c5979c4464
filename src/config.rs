// Settings module: where the lookup scripts send their requests.
//
// Values are layered: built-in defaults, then an optional JSON file, then
// `POCKET_*` environment variables. The file lives in the user's config
// directory unless `--config` names one explicitly.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{AppError, AppResult};

pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
pub const DEFAULT_RECIPE_URL: &str = "https://www.themealdb.com/api/json/v1/1";
pub const DEFAULT_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes";
pub const DEFAULT_BOOKS_MAX_RESULTS: u32 = 5;

const CONFIG_DIR_NAME: &str = "pocket-scripts";
const CONFIG_FILE_NAME: &str = "config.json";

/// Endpoints and limits used by the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub dictionary_url: String,
    pub recipe_url: String,
    pub books_url: String,
    pub books_max_results: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dictionary_url: DEFAULT_DICTIONARY_URL.into(),
            recipe_url: DEFAULT_RECIPE_URL.into(),
            books_url: DEFAULT_BOOKS_URL.into(),
            books_max_results: DEFAULT_BOOKS_MAX_RESULTS,
        }
    }
}

/// Shape of the config file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    dictionary_url: Option<String>,
    recipe_url: Option<String>,
    books_url: Option<String>,
    books_max_results: Option<u32>,
}

impl Settings {
    /// Load settings for this run. An explicit `path` must exist; the
    /// default location is only read when present.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let mut settings = Self::default();

        match path {
            Some(path) => settings.apply_file(path)?,
            None => {
                if let Some(path) = default_config_path().filter(|p| p.is_file()) {
                    settings.apply_file(&path)?;
                }
            }
        }

        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    fn apply_file(&mut self, path: &Path) -> AppResult<()> {
        debug!(path = %path.display(), "reading settings file");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let file: SettingsFile = serde_json::from_str(&contents)
            .map_err(|e| AppError::Config(format!("invalid {}: {}", path.display(), e)))?;

        if let Some(url) = file.dictionary_url {
            self.dictionary_url = url;
        }
        if let Some(url) = file.recipe_url {
            self.recipe_url = url;
        }
        if let Some(url) = file.books_url {
            self.books_url = url;
        }
        if let Some(max) = file.books_max_results {
            self.books_max_results = max;
        }
        Ok(())
    }

    /// Override from environment variables. `lookup` stands in for
    /// `std::env::var` so tests do not touch the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("POCKET_DICTIONARY_URL") {
            debug!(%url, "dictionary url from environment");
            self.dictionary_url = url;
        }
        if let Some(url) = lookup("POCKET_RECIPE_URL") {
            debug!(%url, "recipe url from environment");
            self.recipe_url = url;
        }
        if let Some(url) = lookup("POCKET_BOOKS_URL") {
            debug!(%url, "books url from environment");
            self.books_url = url;
        }
        if let Some(raw) = lookup("POCKET_BOOKS_MAX_RESULTS") {
            self.books_max_results = raw.trim().parse().map_err(|_| {
                AppError::Config(format!("POCKET_BOOKS_MAX_RESULTS is not a number: {raw:?}"))
            })?;
        }
        Ok(())
    }
}

/// `<config dir>/pocket-scripts/config.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
