use std::fs::{self, File};
use std::io::{self, Cursor, Read, Seek};
use std::path::{Path, PathBuf};

/// Read-only, seekable input that every worker opens independently.
pub trait ByteSource: Sync {
    type Reader: Read + Seek;

    /// Open a fresh reader positioned at offset 0
    fn open(&self) -> io::Result<Self::Reader>;

    /// Total input size in bytes
    fn size(&self) -> io::Result<u64>;

    /// Path used in errors and diagnostics
    fn path(&self) -> &Path;
}

/// Input backed by a file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ByteSource for FileSource {
    type Reader = File;

    fn open(&self) -> io::Result<File> {
        File::open(&self.path)
    }

    fn size(&self) -> io::Result<u64> {
        // Unreadable files must fail here, not later inside a worker
        File::open(&self.path)?;
        let metadata = fs::metadata(&self.path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            ));
        }
        Ok(metadata.len())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// In-memory input, mostly for tests and library callers with a buffer at hand
impl<'a> ByteSource for &'a [u8] {
    type Reader = Cursor<&'a [u8]>;

    fn open(&self) -> io::Result<Self::Reader> {
        Ok(Cursor::new(*self))
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.len() as u64)
    }

    fn path(&self) -> &Path {
        Path::new("<memory>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_size_and_open() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"hello world").unwrap();

        let source = FileSource::new(file.path());
        assert_eq!(source.size().unwrap(), 11);

        let mut contents = String::new();
        source.open().unwrap().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "hello world");
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.txt"));
        assert!(source.size().is_err());
        assert!(source.open().is_err());
    }

    #[test]
    fn test_memory_source() {
        let source: &[u8] = b"abc";
        assert_eq!(source.size().unwrap(), 3);
        assert_eq!(source.path(), Path::new("<memory>"));
    }
}
