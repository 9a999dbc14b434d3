//! Configuration loading.
//!
//! `./shipaudit.toml` is used when present, `--config` selects another file.
//! Values from the file are overlaid on the built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use shipaudit_types::ConfigFile;

use crate::env_expand::expand_env_vars;

pub const DEFAULT_CONFIG_PATH: &str = "shipaudit.toml";

/// Parses one config file after env expansion. Fields it leaves out stay `None`.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    debug!("Loading config from '{}'", path.display());

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let expanded = expand_env_vars(&text)
        .with_context(|| format!("expand env vars in '{}'", path.display()))?;

    toml::from_str(&expanded).with_context(|| format!("parse config '{}'", path.display()))
}

/// The effective configuration: built-in defaults, then the user file if any.
pub fn load_config(path: Option<PathBuf>) -> Result<ConfigFile> {
    let user_path = path.or_else(|| {
        let p = PathBuf::from(DEFAULT_CONFIG_PATH);
        if p.exists() { Some(p) } else { None }
    });

    let built_in = ConfigFile::built_in();
    let Some(path) = user_path else {
        debug!("No config file found, using built-in defaults");
        return Ok(built_in);
    };

    info!("Loading config from: {}", path.display());
    let user = load_config_file(&path)?;

    Ok(ConfigFile {
        defaults: built_in.defaults.overlay(user.defaults),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipaudit_types::FailOn;
    use tempfile::TempDir;

    fn write(dir: &TempDir, text: &str) -> PathBuf {
        let p = dir.path().join("shipaudit.toml");
        std::fs::write(&p, text).unwrap();
        p
    }

    #[test]
    fn user_values_override_built_in() {
        let td = TempDir::new().unwrap();
        let p = write(
            &td,
            "[defaults]\nweight_tolerance_kg = 0.25\nfail_on = \"issue\"\n",
        );

        let cfg = load_config(Some(p)).unwrap();
        assert_eq!(cfg.defaults.weight_tolerance_kg, Some(0.25));
        assert_eq!(cfg.defaults.fail_on, Some(FailOn::Issue));
        assert_eq!(
            cfg.defaults.input.as_deref(),
            Some(shipaudit_types::DEFAULT_INPUT_PATH)
        );
    }

    #[test]
    fn empty_file_is_the_built_in_config() {
        let td = TempDir::new().unwrap();
        let p = write(&td, "");
        assert_eq!(load_config(Some(p)).unwrap(), ConfigFile::built_in());
    }

    #[test]
    fn expands_env_before_parsing() {
        unsafe {
            std::env::set_var("SHIPAUDIT_TEST_LOADER_OUT", "reports/today.csv");
        }
        let td = TempDir::new().unwrap();
        let p = write(&td, "[defaults]\noutput = \"${SHIPAUDIT_TEST_LOADER_OUT}\"\n");

        let cfg = load_config_file(&p).unwrap();
        assert_eq!(cfg.defaults.output.as_deref(), Some("reports/today.csv"));
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let td = TempDir::new().unwrap();
        let p = write(&td, "[defaults]\nfail_on = \"sometimes\"\n");

        let err = load_config_file(&p).unwrap_err();
        assert!(format!("{err:#}").contains("parse config"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let td = TempDir::new().unwrap();
        let err = load_config(Some(td.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("read config"));
    }
}
