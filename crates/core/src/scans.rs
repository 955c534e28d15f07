use crate::copy::copy_unique;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub extensions: Vec<String>,
    pub max_copy_attempts: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            extensions: vec!["jpg".to_string(), "jpeg".to_string()],
            max_copy_attempts: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScanReport {
    pub copied: usize,
    pub failed: usize,
}

// スキャン画像を作成日時順に並べ、総数の桁数でゼロ埋めした連番で保存する。
pub fn sequence_scans(options: &ScanOptions) -> Result<ScanReport> {
    if !options.source.exists() {
        anyhow::bail!("移動元フォルダが存在しません: {}", options.source.display());
    }

    let source_root = fs::canonicalize(&options.source).with_context(|| {
        format!(
            "移動元フォルダを解決できませんでした: {}",
            options.source.display()
        )
    })?;
    fs::create_dir_all(&options.destination).with_context(|| {
        format!(
            "保存先フォルダを作成できませんでした: {}",
            options.destination.display()
        )
    })?;
    let destination_root = fs::canonicalize(&options.destination).with_context(|| {
        format!(
            "保存先フォルダを解決できませんでした: {}",
            options.destination.display()
        )
    })?;

    let mut files = Vec::<(PathBuf, SystemTime)>::new();
    for entry in WalkDir::new(&source_root) {
        let entry = entry
            .with_context(|| format!("フォルダ走査に失敗しました: {}", source_root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if !has_registered_extension(&path, &options.extensions) {
            continue;
        }
        let created = creation_time(&path)
            .with_context(|| format!("作成日時を取得できませんでした: {}", path.display()))?;
        files.push((path, created));
    }

    files.sort_by_key(|(_, created)| *created);

    let width = files.len().to_string().len();
    let mut report = ScanReport::default();

    for (index, (path, _)) in files.iter().enumerate() {
        let name = format!("{:0width$}.jpg", index + 1, width = width);
        let desired = destination_root.join(name);
        match copy_unique(path, &desired, options.max_copy_attempts, 3) {
            Ok(_) => report.copied += 1,
            Err(err) => {
                eprintln!("連番コピーできませんでした: {} ({err})", path.display());
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

fn has_registered_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            extensions
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}

// birthtimeを返さないファイルシステムでは更新日時で代用する。
fn creation_time(path: &Path) -> std::io::Result<SystemTime> {
    let meta = fs::metadata(path)?;
    meta.created().or_else(|_| meta.modified())
}
