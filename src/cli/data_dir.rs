//! Data directory resolution
//!
//! Resolution priority:
//! 1. --data-dir <path> flag (highest priority, must exist)
//! 2. $STUDY_COPILOT_HOME env var
//! 3. Platform data dir (`dirs::data_dir()/study-copilot`)
//! 4. Current directory "."

use crate::cli::{Error, Result};
use crate::config::CONFIG_FILE;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const HOME_ENV: &str = "STUDY_COPILOT_HOME";

const APP_DIR: &str = "study-copilot";

/// Resolve the data directory
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    resolve_with_home(explicit, std::env::var_os(HOME_ENV))
}

fn resolve_with_home(explicit: Option<&Path>, home: Option<OsString>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_dir() {
            return Err(Error::DataDir(format!(
                "'{}' does not exist or is not a directory",
                path.display()
            )));
        }
        return Ok(path.to_path_buf());
    }

    if let Some(home) = home.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }

    Ok(dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Config file: explicit path, else `<data_dir>/config.toml`
pub fn resolve_config_path(explicit: Option<&Path>, data_dir: &Path) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| data_dir.join(CONFIG_FILE))
}
