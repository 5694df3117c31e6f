use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// 未指定副檔名時套用的預設副檔名。 / Extension appended when a save path has none.
pub const DEFAULT_EXTENSION: &str = "txt";

const TEMP_SUFFIX: &str = ".tmp_textpad";

/// 文件載入或儲存時可能發生的錯誤。 / Errors that can occur while loading or saving a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path} is not valid UTF-8 text")]
    InvalidEncoding { path: PathBuf },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// 以 UTF-8 讀取整個檔案，不做任何行尾轉換。 / Reads a whole file as UTF-8 without touching line endings.
pub fn load(path: impl AsRef<Path>) -> Result<String, DocumentError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| DocumentError::InvalidEncoding {
        path: path.to_path_buf(),
    })
}

/// 將文字原樣寫入路徑，覆寫既有檔案。 / Writes `contents` verbatim to `path`, replacing any existing file.
pub fn save(path: impl AsRef<Path>, contents: &str) -> Result<(), DocumentError> {
    let path = path.as_ref();
    write_atomic(path, contents.as_bytes()).map_err(|source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// 沒有副檔名的路徑補上 `.txt`。 / Appends `.txt` to a path that has no extension.
pub fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

/// 取得顯示於視窗標題的檔名。 / Returns the base name shown in the window title.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    // Symlinks are written through so the link itself survives.
    let target = match fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            // 新檔案沒有需要保護的內容，直接建立即可。 / A new file has nothing to protect.
            let mut file = File::create(path)?;
            file.write_all(bytes)?;
            return file.sync_all();
        }
        Err(err) => return Err(err),
    };
    let permissions = fs::metadata(&target)?.permissions();

    // 先寫入暫存檔再重新命名，避免出現部分寫入的情況。 / Temp file plus rename guards against partial writes.
    let parent = target.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp_file = tempfile::Builder::new()
        .prefix(".textpad-")
        .suffix(TEMP_SUFFIX)
        .tempfile_in(parent)?;
    tmp_file.write_all(bytes)?;
    tmp_file.as_file().set_permissions(permissions)?;
    tmp_file.as_file().sync_all()?;
    tmp_file.persist(&target).map_err(|err| err.error)?;
    Ok(())
}
