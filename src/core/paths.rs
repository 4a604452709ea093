//! File system locations and small file helpers.

use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use crate::error::{RankingError, Result};
use crate::{CONFIG_ENV_VAR, DATA_DIR_ENV_VAR};

const APP_DIR: &str = "badminton-cli";

/// Data directory: `$BADMINTON_CLI_DATA_DIR`, else `~/.local/share/badminton-cli` (platform equivalent)
pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV_VAR).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|base| base.join(APP_DIR))
        .ok_or(RankingError::MissingDirectory { kind: "data" })
}

/// Path: <data_dir>/rankings.db
pub fn database_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("rankings.db"))
}

/// Path: <data_dir>/excel
pub fn excel_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("excel"))
}

/// Config file: `$BADMINTON_CLI_CONFIG`, else `~/.config/badminton-cli/config.toml`
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|base| base.join(APP_DIR).join("config.toml"))
        .ok_or(RankingError::MissingDirectory { kind: "config" })
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file, creating parent directories
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("file.txt");

        write_string(&path, "hello").unwrap();
        assert_eq!(try_read_to_string(&path).as_deref(), Some("hello"));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(try_read_to_string(&dir.path().join("missing")).is_none());
    }

    #[test]
    fn test_default_locations_share_data_dir() {
        // Only the relationship is checked; the env override is exercised in tests/
        if let (Ok(data), Ok(db), Ok(excel)) = (data_dir(), database_path(), excel_dir()) {
            assert_eq!(db, data.join("rankings.db"));
            assert_eq!(excel, data.join("excel"));
        }
    }
}
