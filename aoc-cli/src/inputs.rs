//! Puzzle inputs stored on disk

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Read-only view of a directory of puzzle inputs
///
/// Directory structure: `{root}/{year}/day{day:02}.txt`
#[derive(Debug, Clone)]
pub struct InputStore {
    root: PathBuf,
}

impl InputStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Where the input for year/day is expected
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.root
            .join(year.to_string())
            .join(format!("day{:02}.txt", day))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Input contents, or None if the file does not exist
    pub fn get(&self, year: u16, day: u8) -> Result<Option<String>, InputError> {
        let path = self.input_path(year, day);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(InputError { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_input(root: &std::path::Path, year: u16, day: u8, content: &str) {
        let dir = root.join(year.to_string());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("day{:02}.txt", day)), content).unwrap();
    }

    #[test]
    fn test_input_path_format() {
        let store = InputStore::new(PathBuf::from("inputs"));
        assert_eq!(
            store.input_path(2023, 1),
            PathBuf::from("inputs").join("2023").join("day01.txt")
        );
        assert!(store.input_path(2023, 25).ends_with("2023/day25.txt"));
    }

    #[test]
    fn test_missing_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(!store.contains(2023, 17));
        assert!(store.get(2023, 17).unwrap().is_none());
    }

    #[test]
    fn test_reads_existing_input() {
        let temp = TempDir::new().unwrap();
        write_input(temp.path(), 2023, 17, "2413\n3215\n");
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(store.contains(2023, 17));
        assert_eq!(store.get(2023, 17).unwrap().as_deref(), Some("2413\n3215\n"));
        assert!(!store.contains(2023, 16));
    }

    #[test]
    fn test_directory_in_place_of_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("2023").join("day21.txt")).unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(!store.contains(2023, 21));
        let err = store.get(2023, 21).unwrap_err();
        assert!(err.path.ends_with("day21.txt"));
    }
}
