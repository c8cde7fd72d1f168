//! Init command - write boxoffice.toml with defaults

use anyhow::{Result, anyhow};
use boxoffice_core::BoxOfficeConfig;
use boxoffice_core::config::CONFIG_FILE;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

use crate::cli::InitArgs;

/// Default boxoffice.toml template
const DEFAULT_CONFIG: &str = include_str!("../templates/default.boxoffice.toml");

/// Write the default boxoffice.toml into `args.path` and create its data
/// directory next to it.
///
/// With `data_dir` (the global `--data-dir` flag) the config records that
/// directory instead, made absolute against the working directory so later
/// runs find it from anywhere.
///
/// # Errors
///
/// Returns an error if:
/// - The target directory does not exist or is not a directory
/// - The config file already exists and `--force` is not set
/// - Writing the config file or creating the data directory fails
pub fn run_init(args: InitArgs, data_dir: Option<&Utf8Path>) -> Result<()> {
    let target_dir = absolute(&args.path)?;

    if !target_dir.exists() {
        return Err(anyhow!("Target directory does not exist: {target_dir}"));
    }
    if !target_dir.is_dir() {
        return Err(anyhow!("Target path is not a directory: {target_dir}"));
    }

    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() && !args.force {
        return Err(anyhow!(
            "{CONFIG_FILE} already exists at {config_path}\nUse --force to overwrite"
        ));
    }

    let content = match data_dir {
        Some(dir) => with_data_dir(&absolute(dir)?),
        None => DEFAULT_CONFIG.to_string(),
    };
    fs::write(&config_path, &content)?;
    println!("✓ Created {CONFIG_FILE} at {config_path}");

    // Read it back the way every other command will.
    let config = BoxOfficeConfig::from_file(&config_path)?;
    let data_dir = config.data_dir();
    fs::create_dir_all(data_dir)?;
    println!("✓ Ensured data dir at {data_dir}");
    tracing::debug!(%config_path, %data_dir, "initialized");
    Ok(())
}

fn absolute(path: &Utf8Path) -> Result<Utf8PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()?;
    Ok(Utf8PathBuf::from_path_buf(cwd)
        .map_err(|_| anyhow!("non-utf8 path"))?
        .join(path))
}

/// The template with its `data_dir` line pointing at `dir`.
fn with_data_dir(dir: &Utf8Path) -> String {
    let quoted = toml::Value::String(dir.to_string()).to_string();
    DEFAULT_CONFIG.replacen("data_dir = \"data\"", &format!("data_dir = {quoted}"), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = BoxOfficeConfig::from_toml(DEFAULT_CONFIG);
        assert!(
            config.is_ok(),
            "Default config must match BoxOfficeConfig: {:?}",
            config.err()
        );
    }

    #[test]
    fn default_config_keeps_default_file_names() {
        let config = BoxOfficeConfig::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.files, BoxOfficeConfig::default().files);
        assert_eq!(config.data_dir, "data");
        assert!(!config.autosave);
    }

    #[test]
    fn data_dir_override_is_written_quoted() {
        let content = with_data_dir(Utf8Path::new("/srv/box \"office\""));
        let config = BoxOfficeConfig::from_toml(&content).unwrap();
        assert_eq!(config.data_dir, "/srv/box \"office\"");
        assert_eq!(config.files, BoxOfficeConfig::default().files);
    }
}
