//! Live filesystem adapter using `std::fs` and `walkdir`.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), PortError> {
        Ok(std::fs::create_dir_all(path)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>, PortError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_files_is_sorted_and_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LiveFileSystem;
        fs.write(&dir.path().join("b.rb"), "").unwrap();
        fs.write(&dir.path().join("a/z.rb"), "").unwrap();
        fs.write(&dir.path().join("a/c.rb"), "").unwrap();

        let files: Vec<String> = fs
            .walk_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();

        assert_eq!(files, vec!["a/c.rb", "a/z.rb", "b.rb"]);
    }

    #[test]
    fn walk_files_errors_on_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LiveFileSystem.walk_files(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blog/templates/posts/index.html");
        LiveFileSystem.write(&path, "hi").unwrap();
        assert_eq!(LiveFileSystem.read_to_string(&path).unwrap(), "hi");
    }
}
