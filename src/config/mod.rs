pub mod schema;

pub use schema::GigaToolsConfig;

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory holding `gigatools.toml`; falls back to the working directory
/// when no home directory can be determined.
pub fn default_home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".gigatools"))
        .unwrap_or_else(|| PathBuf::from(".gigatools"))
}

/// Default config file location (~/.gigatools/gigatools.toml).
pub fn default_config_path() -> PathBuf {
    default_home_dir().join("gigatools.toml")
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Read the TOML file at `path`. A missing file means "use the built-in
/// GigaChat defaults"; any other read or parse failure aborts startup.
pub fn load_config(path: &Path) -> Result<GigaToolsConfig> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(GigaToolsConfig::default()),
        Err(e) => {
            return Err(e).with_context(|| format!("cannot read {}", path.display()));
        }
    };
    toml::from_str(&contents).with_context(|| format!("invalid settings in {}", path.display()))
}
