//! Isolated test environment with a temporary store.

use super::{KeepCommand, TestNote};
use notekeep::backend::SqliteStore;
use notekeep::domain::NoteId;
use notekeep::engine::NoteStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment backed by a SQLite file in a temp directory.
///
/// The directory, store and config path are removed on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the environment's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the SQLite store used by commands.
    pub fn store_path(&self) -> PathBuf {
        self.root.join("data").join("notes.db")
    }

    /// Returns the config path handed to commands (absent unless written).
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Opens the store directly, bypassing the CLI.
    pub fn open_store(&self) -> NoteStore<SqliteStore> {
        let backend = SqliteStore::open(&self.store_path()).expect("Failed to open store");
        NoteStore::open(backend, "keep").expect("Failed to initialize store")
    }

    /// Saves a note directly and returns its id.
    pub fn add_note(&self, test_note: &TestNote) -> NoteId {
        let mut note = test_note.to_note();
        self.open_store()
            .save(&mut note)
            .expect("Failed to save test note")
            .id()
    }

    /// Creates a KeepCommand configured for this test environment.
    pub fn cmd(&self) -> KeepCommand {
        KeepCommand::new()
            .store(&self.store_path())
            .config(&self.config_path())
    }

    /// Writes a file to the test environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_add_note_allocates_ids() {
        let env = TestEnv::new();
        let first = env.add_note(&TestNote::new("one"));
        let second = env.add_note(&TestNote::new("two").tag("home"));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
        assert!(env.store_path().exists());
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--store");
        assert_eq!(args[1], env.store_path().to_string_lossy());
    }
}
