use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Where config text lives. `read` yields `Ok(None)` when nothing is stored yet.
pub trait ConfigSource {
    fn read(&self) -> Result<Option<String>, String>;
    fn write(&self, text: &str) -> Result<(), String>;
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileSource {
    fn read(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("Failed to read {}: {}", self.path.display(), err)),
        }
    }

    fn write(&self, text: &str) -> Result<(), String> {
        std::fs::write(&self.path, text).map_err(|e| format!("Failed to write {}: {}", self.path.display(), e))
    }
}

/// Keeps the text in memory; handy for tests and for one-off overrides.
#[derive(Default)]
pub struct MemorySource {
    text: Mutex<Option<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Mutex::new(Some(text.into())),
        }
    }
}

impl ConfigSource for MemorySource {
    fn read(&self) -> Result<Option<String>, String> {
        let text = self.text.lock().map_err(|_| "Memory config source poisoned".to_string())?;
        Ok(text.clone())
    }

    fn write(&self, text: &str) -> Result<(), String> {
        let mut stored = self.text.lock().map_err(|_| "Memory config source poisoned".to_string())?;
        *stored = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_none() {
        let source = FileSource::new("this_file_does_not_exist.yaml");
        assert_eq!(source.read(), Ok(None));
    }

    #[test]
    fn test_file_text_reads_back() {
        let random_number: u32 = rand::random();
        let path = std::env::temp_dir().join(format!("temp_tictactoe_source_{}.yaml", random_number));
        let source = FileSource::new(path.clone());
        source.write("depth_limit: 3\n").unwrap();
        assert_eq!(source.read(), Ok(Some("depth_limit: 3\n".to_string())));
        assert_eq!(source.path(), path.as_path());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_memory_source_starts_empty() {
        let source = MemorySource::new();
        assert_eq!(source.read(), Ok(None));
        source.write("a: 1\n").unwrap();
        assert_eq!(source.read(), Ok(Some("a: 1\n".to_string())));
    }
}
