use super::{Result, Storage, StorageError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Keeps each key in its own `<dir>/<key>.json` file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are fixed identifiers, but never let one escape the directory
        let safe: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        fs::write(self.path_for(key), value).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::new(dir.path());
        assert_eq!(store.get("election-users").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStorage::new(dir.path().join("nested"));
        store.set("election-users", "[]").unwrap();
        store.set("election-users", "[1]").unwrap();
        assert_eq!(store.get("election-users").unwrap().as_deref(), Some("[1]"));
        assert!(dir.path().join("nested/election-users.json").exists());
    }

    #[test]
    fn test_key_cannot_escape_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::new(dir.path());
        let path = store.path_for("../outside");
        assert_eq!(path, dir.path().join("___outside.json"));
    }

    #[test]
    fn test_unreadable_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::new(dir.path());
        // A directory where the file should be
        fs::create_dir_all(dir.path().join("election-users.json")).unwrap();
        assert!(matches!(
            store.get("election-users"),
            Err(StorageError::Io { .. })
        ));
    }
}
