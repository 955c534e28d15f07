use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CopyError {
    #[error("コピー先を{}回試しましたが確保できませんでした: {}", .attempts, .path.display())]
    AttemptsExhausted { path: PathBuf, attempts: usize },
}

pub fn indexed_path(desired: &Path, attempt: usize, width: usize) -> PathBuf {
    if attempt == 0 {
        return desired.to_path_buf();
    }

    let parent = desired.parent().unwrap_or_else(|| Path::new(""));
    let stem = desired
        .file_stem()
        .map(|v| v.to_string_lossy().to_string())
        .unwrap_or_else(|| "file".to_string());

    match desired.extension() {
        Some(ext) => parent.join(format!(
            "{}_{:0width$}.{}",
            stem,
            attempt,
            ext.to_string_lossy(),
            width = width
        )),
        None => parent.join(format!("{}_{:0width$}", stem, attempt, width = width)),
    }
}

// 存在チェックとコピーの間の競合を避けるため、排他作成のままコピーする。
pub fn copy_exclusive(source: &Path, destination: &Path) -> io::Result<u64> {
    let mut reader = File::open(source)?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)?;
    io::copy(&mut reader, &mut writer)
}

pub fn copy_unique(
    source: &Path,
    desired: &Path,
    max_attempts: usize,
    suffix_width: usize,
) -> Result<PathBuf, CopyError> {
    for attempt in 0..max_attempts {
        let candidate = indexed_path(desired, attempt, suffix_width);
        match copy_exclusive(source, &candidate) {
            Ok(_) => {
                println!("コピーしました: {}", candidate.display());
                return Ok(candidate);
            }
            Err(err) => {
                eprintln!("コピーできませんでした: {} ({})", candidate.display(), err);
            }
        }
    }

    Err(CopyError::AttemptsExhausted {
        path: desired.to_path_buf(),
        attempts: max_attempts,
    })
}
