//! Files picked by the user for a single upload sequence

use std::path::{Path, PathBuf};

use color_eyre::{eyre, Report};
use tokio::fs;

/// A single local file queued for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Name sent to the server, the last component of `path`
    pub name: String,
    /// Size in bytes at the moment of selection
    pub size: u64,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size: u64, path: impl Into<PathBuf>) -> Self {
        SelectedFile {
            name: name.into(),
            size,
            path: path.into(),
        }
    }

    /// Reads metadata of a local file, rejecting directories
    pub async fn from_path(path: &Path) -> eyre::Result<Self> {
        let metadata = fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(Report::msg(format!("{} is not a regular file", path.display())));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Report::msg(format!("{} has no file name", path.display())))?;
        Ok(SelectedFile::new(name, metadata.len(), path))
    }
}

/// Ordered selection of files, uploaded in the order they were picked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedFileSet {
    files: Vec<SelectedFile>,
}

impl SelectedFileSet {
    pub fn new(files: Vec<SelectedFile>) -> Self {
        SelectedFileSet { files }
    }

    /// Builds the selection from paths given on the command line
    pub async fn from_paths(paths: &[PathBuf]) -> eyre::Result<Self> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(SelectedFile::from_path(path).await?);
        }
        Ok(SelectedFileSet { files })
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sum of all file sizes
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_total_size_sums_all_files() {
        let set = SelectedFileSet::new(vec![
            SelectedFile::new("a.txt", 10, "/tmp/a.txt"),
            SelectedFile::new("b.txt", 0, "/tmp/b.txt"),
            SelectedFile::new("c.txt", 32, "/tmp/c.txt"),
        ]);
        assert_eq!(set.total_size(), 42);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_empty_set() {
        let set = SelectedFileSet::default();
        assert!(set.is_empty());
        assert_eq!(set.total_size(), 0);
    }

    #[tokio::test]
    async fn test_from_paths_keeps_order_and_sizes() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("second-alphabetically.bin");
        let second = dir.path().join("a-first.bin");
        std::fs::File::create(&first).unwrap().write_all(&[0u8; 5]).unwrap();
        std::fs::File::create(&second).unwrap().write_all(&[0u8; 3]).unwrap();

        let set = SelectedFileSet::from_paths(&[first.clone(), second.clone()])
            .await
            .unwrap();

        assert_eq!(set.files()[0].name, "second-alphabetically.bin");
        assert_eq!(set.files()[0].size, 5);
        assert_eq!(set.files()[1].name, "a-first.bin");
        assert_eq!(set.files()[1].path, second);
        assert_eq!(set.total_size(), 8);
    }

    #[tokio::test]
    async fn test_from_paths_rejects_directories() {
        let dir = tempdir().unwrap();
        let res = SelectedFileSet::from_paths(&[dir.path().to_path_buf()]).await;
        assert!(res.unwrap_err().to_string().contains("is not a regular file"));
    }

    #[tokio::test]
    async fn test_from_paths_rejects_missing_files() {
        let dir = tempdir().unwrap();
        let res = SelectedFileSet::from_paths(&[dir.path().join("missing.txt")]).await;
        assert!(res.is_err());
    }
}
