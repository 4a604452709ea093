//! User configuration: the persisted "player of interest" (POI).
//!
//! Commands receive a [`ConfigService`] instead of touching the file directly. The
//! store and the search index never depend on it.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::debug;

use crate::cli::types::PlayerId;
use crate::core::paths::{config_path, try_read_to_string, write_string};
use crate::Result;

const POI_KEY: &str = "poi";

/// Get/set/clear access to the default player ID
pub trait ConfigService {
    fn get_poi(&self) -> Result<Option<PlayerId>>;
    fn set_poi(&self, player_id: &PlayerId) -> Result<()>;
    fn clear_poi(&self) -> Result<()>;
}

/// TOML file backed config. Keys other than `poi` are kept as they are.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Config at the default location (or `$BADMINTON_CLI_CONFIG`)
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(config_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Table> {
        match try_read_to_string(&self.path) {
            Some(text) => Ok(toml::from_str::<Table>(&text)?),
            None => Ok(Table::new()),
        }
    }

    fn save(&self, table: &Table) -> Result<()> {
        let text = toml::to_string(table)?;
        write_string(&self.path, &text)?;
        debug!(path = %self.path.display(), "saved config");
        Ok(())
    }
}

impl ConfigService for FileConfigStore {
    fn get_poi(&self) -> Result<Option<PlayerId>> {
        let table = self.load()?;
        Ok(table
            .get(POI_KEY)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(PlayerId::new))
    }

    fn set_poi(&self, player_id: &PlayerId) -> Result<()> {
        let mut table = self.load()?;
        table.insert(POI_KEY.to_string(), Value::String(player_id.to_string()));
        self.save(&table)
    }

    fn clear_poi(&self) -> Result<()> {
        let mut table = self.load()?;
        if table.remove(POI_KEY).is_some() {
            self.save(&table)?;
        }
        Ok(())
    }
}

/// Process-local config, for callers that must not touch the user's file
#[derive(Debug, Default)]
pub struct MemoryConfig {
    poi: RefCell<Option<PlayerId>>,
}

impl ConfigService for MemoryConfig {
    fn get_poi(&self) -> Result<Option<PlayerId>> {
        Ok(self.poi.borrow().clone())
    }

    fn set_poi(&self, player_id: &PlayerId) -> Result<()> {
        *self.poi.borrow_mut() = Some(player_id.clone());
        Ok(())
    }

    fn clear_poi(&self) -> Result<()> {
        self.poi.borrow_mut().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FileConfigStore {
        FileConfigStore::new(dir.path().join("nested").join("config.toml"))
    }

    #[test]
    fn test_missing_file_has_no_poi() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store(&dir).get_poi().unwrap(), None);
    }

    #[test]
    fn test_set_get_clear() {
        let dir = TempDir::new().unwrap();
        let config = store(&dir);

        config.set_poi(&PlayerId::new("01-150083")).unwrap();
        assert_eq!(config.get_poi().unwrap(), Some(PlayerId::new("01-150083")));

        config.set_poi(&PlayerId::new("02-000001")).unwrap();
        assert_eq!(config.get_poi().unwrap(), Some(PlayerId::new("02-000001")));

        config.clear_poi().unwrap();
        assert_eq!(config.get_poi().unwrap(), None);
        // clearing twice is fine
        config.clear_poi().unwrap();
    }

    #[test]
    fn test_unknown_keys_survive() {
        let dir = TempDir::new().unwrap();
        let config = store(&dir);
        write_string(config.path(), "theme = \"dark\"\nwidth = 100\n").unwrap();

        config.set_poi(&PlayerId::new("01-1")).unwrap();
        config.clear_poi().unwrap();

        let table: Table = toml::from_str(&try_read_to_string(config.path()).unwrap()).unwrap();
        assert_eq!(table.get("theme").and_then(Value::as_str), Some("dark"));
        assert_eq!(table.get("width").and_then(Value::as_integer), Some(100));
        assert!(table.get("poi").is_none());
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let config = store(&dir);
        write_string(config.path(), "poi = ").unwrap();
        assert!(config.get_poi().is_err());
    }

    #[test]
    fn test_memory_config() {
        let config = MemoryConfig::default();
        assert_eq!(config.get_poi().unwrap(), None);
        config.set_poi(&PlayerId::new("01-1")).unwrap();
        assert_eq!(config.get_poi().unwrap(), Some(PlayerId::new("01-1")));
        config.clear_poi().unwrap();
        assert_eq!(config.get_poi().unwrap(), None);
    }
}
