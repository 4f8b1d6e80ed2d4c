use std::path::{Path, PathBuf};

use eyre::Result;

/// Trait for types that represent a generated unit
pub trait GeneratedFile {
    /// Get the file name of the unit (e.g. `UserDto.g.cs`)
    fn file_name(&self) -> String;

    /// Render the unit content
    fn render(&self) -> String;

    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.file_name())
    }

    /// Write the unit to disk
    fn write(&self, base: &Path) -> Result<WriteResult> {
        File::new(self.path(base), self.render()).write()
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already held identical content and was left untouched
    Unchanged,
}

/// A file to be generated
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write the file unless it already holds exactly this content.
    pub fn write(&self) -> Result<WriteResult> {
        if let Ok(existing) = std::fs::read_to_string(&self.path)
            && existing == self.content
        {
            return Ok(WriteResult::Unchanged);
        }
        write_file(&self.path, &self.content)?;
        Ok(WriteResult::Written)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("UserDto.g.cs");

        write_file(&path, "nested").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_file_write_overwrites_different_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("UserDto.g.cs");

        fs::write(&path, "original").unwrap();

        let file = File::new(&path, "updated");
        let result = file.write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
    }

    #[test]
    fn test_file_write_identical_content_is_unchanged() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("UserDto.g.cs");

        let file = File::new(&path, "same");
        assert_eq!(file.write().unwrap(), WriteResult::Written);
        assert_eq!(file.write().unwrap(), WriteResult::Unchanged);
        assert_eq!(fs::read_to_string(&path).unwrap(), "same");
    }

    #[test]
    fn test_generated_file_path() {
        struct Unit;
        impl GeneratedFile for Unit {
            fn file_name(&self) -> String {
                "OrderDto.g.cs".to_string()
            }
            fn render(&self) -> String {
                "// unit\n".to_string()
            }
        }

        let temp = TempDir::new().unwrap();
        let result = Unit.write(temp.path()).unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(
            fs::read_to_string(temp.path().join("OrderDto.g.cs")).unwrap(),
            "// unit\n"
        );
    }
}
