//! Env file creation and loading.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::defaults::default_content;
use super::mode::Mode;
use super::ConfigError;

/// Location of a mode's env file after [`ensure_env_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFile {
    pub path: PathBuf,
    /// Whether the file was written by this call.
    pub created: bool,
}

/// Makes sure `dir` exists and contains `.env.<mode>`.
///
/// A missing file is created with the mode's default content. An existing
/// file is never opened for writing.
pub fn ensure_env_file(dir: &Path, mode: &Mode) -> Result<EnvFile, ConfigError> {
    std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDirError {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let path = dir.join(mode.file_name());
    let write_err = |e: std::io::Error| ConfigError::WriteError {
        path: path.clone(),
        source: e,
    };

    match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => {
            write_default(&path, file, default_content(mode)).map_err(write_err)?;
            info!(path = %path.display(), "created default env file");
            Ok(EnvFile {
                path,
                created: true,
            })
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(EnvFile {
            path,
            created: false,
        }),
        Err(e) => Err(write_err(e)),
    }
}

/// Writes `content` to a freshly created file at `path`.
///
/// A failed write removes the file so the next run recreates it instead of
/// treating a partial file as user-owned.
fn write_default<W: Write>(path: &Path, mut file: W, content: &str) -> std::io::Result<()> {
    if let Err(e) = file.write_all(content.as_bytes()).and_then(|()| file.flush()) {
        drop(file);
        let _ = std::fs::remove_file(path);
        return Err(e);
    }
    Ok(())
}

/// Reads an env file as UTF-8 text.
///
/// Invalid byte sequences decode to U+FFFD rather than failing the read.
pub fn read_env_file(path: &Path) -> Result<String, ConfigError> {
    let bytes = std::fs::read(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
