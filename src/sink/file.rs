use super::{Sink, SinkError};
use regex::Regex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::debug;

// Allowed subdirectory characters: word characters, dot, slash, hyphen.
static ILLEGAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w./\-]").expect("allowlist pattern compiles"));
static SLASH_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/+").expect("slash pattern compiles"));

/// Sanitize a user-supplied subdirectory fragment: strip characters outside
/// the allowlist, collapse duplicate slashes, trim leading and trailing
/// slashes. Returns `None` when nothing survives.
pub fn sanitize_subdir(raw: &str) -> Option<String> {
    let cleaned = ILLEGAL_CHARS.replace_all(raw, "");
    let cleaned = SLASH_RUNS.replace_all(&cleaned, "/");
    let cleaned = cleaned.trim_matches('/');
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Appends rendered text to `<log_dir>/<subdir?>/<file_name>.log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSink {
    log_dir: PathBuf,
    subdir: Option<String>,
    file_name: String,
}

impl FileSink {
    pub fn new(log_dir: PathBuf, file_name: String) -> Self {
        Self {
            log_dir,
            subdir: None,
            file_name,
        }
    }

    pub fn subdir(&self) -> Option<&str> {
        self.subdir.as_deref()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn set_file_name(&mut self, file_name: String) {
        self.file_name = file_name;
    }

    /// Store an already-sanitized subdirectory and make sure it exists.
    /// Creation happens here, lazily on target change, not on every write.
    pub fn set_subdir(&mut self, subdir: String) -> Result<(), SinkError> {
        self.subdir = Some(subdir);
        self.ensure_dir()
    }

    /// Full path of the target log file under the current configuration.
    pub fn path(&self) -> PathBuf {
        self.dir_path().join(format!("{}.log", self.file_name))
    }

    fn dir_path(&self) -> PathBuf {
        match &self.subdir {
            Some(subdir) => self.log_dir.join(subdir),
            None => self.log_dir.clone(),
        }
    }

    fn ensure_dir(&self) -> Result<(), SinkError> {
        let dir = self.dir_path();
        if dir.is_dir() {
            return Ok(());
        }
        let mut builder = std::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o777);
        }
        builder.create(&dir).map_err(|source| SinkError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        debug!(path = %dir.display(), "created log directory");
        Ok(())
    }
}

impl Sink for FileSink {
    fn write(&mut self, text: &str) -> Result<(), SinkError> {
        let path = self.path();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| SinkError::Append {
                path: path.clone(),
                source,
            })?;
        file.write_all(text.as_bytes())
            .map_err(|source| SinkError::Append { path, source })?;
        Ok(())
    }
}
