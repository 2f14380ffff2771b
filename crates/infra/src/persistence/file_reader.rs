// crates/infra/src/persistence/file_reader.rs
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use suite_select_shared_kernel::{InfraResult, InfrastructureError};

/// Class files larger than this are not worth parsing for a header.
pub const MAX_CLASS_FILE_BYTES: u64 = 64 * 1024 * 1024;

/// Convenience helpers for reading files with consistent error handling.
pub struct FileReader;

impl FileReader {
    /// Open the file at `path` with buffered reading.
    pub fn open_buffered(path: &Path) -> InfraResult<BufReader<File>> {
        File::open(path).map(BufReader::new).map_err(|source| file_read(path, source))
    }

    /// Read the entire file, refusing anything above `limit` bytes.
    pub fn read_bounded(path: &Path, limit: u64) -> InfraResult<Vec<u8>> {
        let mut reader = Self::open_buffered(path)?.take(limit + 1);
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).map_err(|source| file_read(path, source))?;
        if buf.len() as u64 > limit {
            return Err(file_read(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, format!("file exceeds {limit} bytes")),
            ));
        }
        Ok(buf)
    }

    /// Read a UTF-8 text file (settings and the like).
    pub fn read_to_string(path: &Path) -> InfraResult<String> {
        let mut text = String::new();
        Self::open_buffered(path)?.read_to_string(&mut text).map_err(|source| file_read(path, source))?;
        Ok(text)
    }
}

fn file_read(path: &Path, source: std::io::Error) -> InfrastructureError {
    InfrastructureError::FileRead { path: path.to_path_buf(), source }
}
