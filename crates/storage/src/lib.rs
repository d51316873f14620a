// In crates/storage/src/lib.rs

use app_config::StorageSettings;
use std::path::{Path, PathBuf};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{DataSource, PersistedState};

/// A JSON file holding the persisted dashboard state.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(settings.state_path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted state. A file that does not exist yet is an
    /// empty default state, not an error.
    pub fn load(&self) -> Result<PersistedState> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No state file yet, starting fresh");
                Ok(PersistedState::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the state, creating parent directories as needed.
    ///
    /// The content goes to a sibling temp file first and is renamed into
    /// place, so a crash never leaves a half-written state file.
    pub fn save(&self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(state)?)?;
        std::fs::rename(&tmp, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            annotations = state.annotations.len(),
            "State file saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::new(dir.path().join("absent.json"));
        assert_eq!(file.load().unwrap(), PersistedState::default());
    }

    #[test]
    fn save_then_load_keeps_notes_and_source() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::new(dir.path().join("nested/state.json"));

        let mut state = PersistedState::default();
        state.annotations.insert("t-1".into(), "chased the breakout".into());
        state.data_source = DataSource::Wallet;
        file.save(&state).unwrap();

        assert_eq!(file.load().unwrap(), state);
        assert!(!dir.path().join("nested/state.json.tmp").exists());
    }

    #[test]
    fn only_persisted_fields_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::new(dir.path().join("state.json"));
        file.save(&PersistedState::default()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        let mut keys: Vec<_> = raw.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["annotations", "data_source"]);
        assert_eq!(raw["data_source"], "mock");
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(StateFile::new(path).load(), Err(Error::Malformed(_))));
    }

    #[test]
    fn parses_data_source_names() {
        assert_eq!("Wallet".parse::<DataSource>().unwrap(), DataSource::Wallet);
        assert!(matches!(
            "chain".parse::<DataSource>(),
            Err(Error::InvalidDataSource(name)) if name == "chain"
        ));
    }
}
