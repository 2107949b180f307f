//! Read/write helpers over the local filesystem

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Recoverable persistence failure
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("corrupt JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("corrupt number in {path}: {text:?}")]
    Number { path: PathBuf, text: String },
}

impl PersistError {
    fn io(path: &Path, source: io::Error) -> Self {
        PersistError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read a file, mapping "not found" to `None`
fn read_optional(path: &Path) -> Result<Option<String>, PersistError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PersistError::io(path, e)),
    }
}

/// Replace `path` atomically with `contents`
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), PersistError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| PersistError::io(dir, e))?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, contents).map_err(|e| PersistError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| PersistError::io(path, e))
}

/// Load a JSON document. `Ok(None)` when the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistError> {
    let Some(text) = read_optional(path)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| PersistError::Json {
            path: path.to_path_buf(),
            source,
        })
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    let json = serde_json::to_vec_pretty(value).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomic(path, &json)
}

/// Load a single decimal integer. `Ok(None)` when the file does not exist.
pub fn read_number(path: &Path) -> Result<Option<u64>, PersistError> {
    let Some(text) = read_optional(path)? else {
        return Ok(None);
    };
    text.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| PersistError::Number {
            path: path.to_path_buf(),
            text,
        })
}

pub fn write_number(path: &Path, value: u64) -> Result<(), PersistError> {
    write_atomic(path, value.to_string().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_files_are_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nothing.json");
        assert!(read_json::<Vec<u32>>(&path).unwrap().is_none());
        assert!(read_number(&path).unwrap().is_none());
    }

    #[test]
    fn test_number_roundtrip_with_whitespace() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("high_score.txt");
        write_number(&path, 230).unwrap();
        assert_eq!(read_number(&path).unwrap(), Some(230));

        fs::write(&path, "  40\n").unwrap();
        assert_eq!(read_number(&path).unwrap(), Some(40));
    }

    #[test]
    fn test_corrupt_number() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("high_score.txt");
        fs::write(&path, "lots").unwrap();
        assert!(matches!(
            read_number(&path),
            Err(PersistError::Number { text, .. }) if text == "lots"
        ));
    }

    #[test]
    fn test_corrupt_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("board.json");
        fs::write(&path, "[{\"name\":").unwrap();
        assert!(matches!(
            read_json::<Vec<u32>>(&path),
            Err(PersistError::Json { .. })
        ));
    }

    #[test]
    fn test_write_creates_parent_dirs_and_leaves_no_tmp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("board.json");
        write_json(&path, &vec![1u32, 2, 3]).unwrap();
        assert_eq!(read_json::<Vec<u32>>(&path).unwrap(), Some(vec![1, 2, 3]));
        assert!(!dir.path().join("nested").join("board.json.tmp").exists());
    }
}
