use std::fs;

use super::{DataDir, StoreError};
use crate::model::config::AppConfig;

/// Read `taskbook.toml` from the data directory. A missing file yields the
/// defaults; a file that does not parse is an error.
pub fn read_config(dir: &DataDir) -> Result<AppConfig, StoreError> {
    let path = dir.config_file();
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
    Ok(toml::from_str(&text)?)
}
