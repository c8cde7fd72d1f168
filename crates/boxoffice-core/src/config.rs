//! Configuration loading for boxoffice.toml

use camino::{Utf8Path, Utf8PathBuf};
use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "boxoffice.toml";

/// Root configuration from boxoffice.toml
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct BoxOfficeConfig {
    /// Directory holding the four data files.
    #[garde(length(min = 1))]
    pub data_dir: String,
    #[garde(dive)]
    pub files: DataFiles,
    /// Flush every store after each change instead of only at exit.
    #[garde(skip)]
    pub autosave: bool,
}

impl Default for BoxOfficeConfig {
    fn default() -> Self {
        Self {
            data_dir: ".".to_string(),
            files: DataFiles::default(),
            autosave: false,
        }
    }
}

/// File names of the four stores, relative to `data_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct DataFiles {
    #[garde(custom(validate_file_name))]
    pub theater: String,
    #[garde(custom(validate_file_name))]
    pub music: String,
    #[garde(custom(validate_file_name))]
    pub customers: String,
    #[garde(custom(validate_file_name))]
    pub bookings: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            theater: "theater.csv".to_string(),
            music: "music.csv".to_string(),
            customers: "customers.csv".to_string(),
            bookings: "bookings.csv".to_string(),
        }
    }
}

impl DataFiles {
    fn first_duplicate(&self) -> Option<&str> {
        let names: [&str; 4] = [&self.theater, &self.music, &self.customers, &self.bookings];
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Some(name);
            }
        }
        None
    }
}

#[allow(clippy::ptr_arg, clippy::trivially_copy_pass_by_ref)]
fn validate_file_name(value: &String, _ctx: &()) -> garde::Result {
    if value.is_empty() || value == "." || value == ".." {
        return Err(garde::Error::new(format!(
            "'{value}' is not a file name - try something like 'customers.csv'"
        )));
    }
    if value.contains(['/', '\\']) {
        return Err(garde::Error::new(format!(
            "'{value}' must be a plain file name - set data_dir to move the files"
        )));
    }
    Ok(())
}

/// Error type for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config read error: {0}")]
    Io(String),
    #[error("config parse error: {0}")]
    Parse(String),
    #[error("config validation error: {0}")]
    Validation(String),
}

impl BoxOfficeConfig {
    /// Parse and validate configuration text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is invalid and
    /// `ConfigError::Validation` if a setting is out of bounds.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        if let Some(name) = config.files.first_duplicate() {
            return Err(ConfigError::Validation(format!(
                "files: '{name}' is used by more than one store"
            )));
        }

        Ok(config)
    }

    /// Load configuration from a TOML file with validation.
    ///
    /// A relative `data_dir` is taken relative to the directory holding the file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`BoxOfficeConfig::from_toml`].
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(format!("{path}: {e}")))?;
        let mut config = Self::from_toml(&content)?;
        let base = path.parent().filter(|dir| !dir.as_str().is_empty());
        if let Some(dir) = base.filter(|_| config.data_dir().is_relative()) {
            config.data_dir = dir.join(&config.data_dir).into_string();
        }
        Ok(config)
    }

    /// Load `explicit` if given (it must exist), else `boxoffice.toml` from the
    /// working directory if present, else defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` with details if loading or validation fails.
    pub fn load(explicit: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let default_path = Utf8Path::new(CONFIG_FILE);
        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Utf8Path {
        Utf8Path::new(&self.data_dir)
    }

    #[must_use]
    pub fn theater_path(&self) -> Utf8PathBuf {
        self.data_dir().join(&self.files.theater)
    }

    #[must_use]
    pub fn music_path(&self) -> Utf8PathBuf {
        self.data_dir().join(&self.files.music)
    }

    #[must_use]
    pub fn customers_path(&self) -> Utf8PathBuf {
        self.data_dir().join(&self.files.customers)
    }

    #[must_use]
    pub fn bookings_path(&self) -> Utf8PathBuf {
        self.data_dir().join(&self.files.bookings)
    }
}
