use crate::classify::{extension_of, ExtensionRegistry, MediaKind};
use crate::copy::copy_unique;
use crate::dest::map_destination_dir;
use crate::name::timestamp_basename;
use crate::resolve::resolve_capture_time;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct OrganizeOptions {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub registry: ExtensionRegistry,
    pub date_tags: Vec<String>,
    pub max_copy_attempts: usize,
    pub suffix_width: usize,
}

impl Default for OrganizeOptions {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            registry: ExtensionRegistry::default(),
            date_tags: vec!["DateTimeOriginal".to_string()],
            max_copy_attempts: 100,
            suffix_width: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NameSource {
    ExifCaptureTime,
    FileModified,
    OriginalName,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyRecord {
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
    pub kind: MediaKind,
    pub name_source: NameSource,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrganizeStats {
    pub scanned_files: usize,
    pub copied: usize,
    pub by_capture_time: usize,
    pub by_file_modified: usize,
    pub by_original_name: usize,
    pub unrecognized: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub stats: OrganizeStats,
    pub records: Vec<CopyRecord>,
}

pub fn organize(options: &OrganizeOptions) -> Result<OrganizeReport> {
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

    println!(
        "{} のファイルをリネームして {} に保存します",
        source_root.display(),
        destination_root.display()
    );

    let mut stats = OrganizeStats::default();
    let mut records = Vec::new();

    for entry in WalkDir::new(&source_root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("フォルダ走査に失敗しました: {err}");
                stats.failed += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        stats.scanned_files += 1;

        match process_file(path, &source_root, &destination_root, options) {
            Ok(record) => {
                stats.copied += 1;
                match record.name_source {
                    NameSource::ExifCaptureTime => stats.by_capture_time += 1,
                    NameSource::FileModified => stats.by_file_modified += 1,
                    NameSource::OriginalName => stats.by_original_name += 1,
                }
                if record.kind == MediaKind::Unrecognized {
                    stats.unrecognized += 1;
                }
                records.push(record);
            }
            Err(err) => {
                eprintln!("リネームできませんでした: {} ({err:#})", path.display());
                stats.failed += 1;
            }
        }
    }

    Ok(OrganizeReport {
        source: source_root,
        destination: destination_root,
        stats,
        records,
    })
}

fn process_file(
    path: &Path,
    source_root: &Path,
    destination_root: &Path,
    options: &OrganizeOptions,
) -> Result<CopyRecord> {
    println!("リネーム中: {}", path.display());

    let kind = options.registry.classify(path);
    let (basename, name_source) = compute_basename(path, kind, options)?;

    let destination_dir = map_destination_dir(path, source_root, destination_root);
    fs::create_dir_all(&destination_dir).with_context(|| {
        format!(
            "保存先フォルダを作成できませんでした: {}",
            destination_dir.display()
        )
    })?;

    let desired = destination_dir.join(&basename);
    let final_path = copy_unique(path, &desired, options.max_copy_attempts, options.suffix_width)?;

    Ok(CopyRecord {
        source_path: path.to_path_buf(),
        destination_path: final_path,
        kind,
        name_source,
    })
}

fn compute_basename(
    path: &Path,
    kind: MediaKind,
    options: &OrganizeOptions,
) -> Result<(String, NameSource)> {
    if kind == MediaKind::Unrecognized {
        println!("{} は対象外のためそのままコピーします", path.display());
        return Ok((original_basename(path), NameSource::OriginalName));
    }

    let extension = extension_of(path).unwrap_or_default();
    match resolve_capture_time(path, kind, &options.date_tags)? {
        Some(date) => {
            let name_source = match kind {
                MediaKind::Video => NameSource::FileModified,
                _ => NameSource::ExifCaptureTime,
            };
            Ok((timestamp_basename(date, &extension), name_source))
        }
        None => {
            println!("{} には撮影日時がありません", path.display());
            Ok((original_basename(path), NameSource::OriginalName))
        }
    }
}

fn original_basename(path: &Path) -> String {
    path.file_name()
        .map(|v| v.to_string_lossy().to_string())
        .unwrap_or_else(|| "untitled".to_string())
}

#[cfg(test)]
mod tests {
    use super::{organize, NameSource, OrganizeOptions};
    use crate::exif_reader::write_image_with_capture_date;
    use filetime::FileTime;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn options_for(source: &Path, destination: &Path) -> OrganizeOptions {
        OrganizeOptions {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            ..OrganizeOptions::default()
        }
    }

    #[test]
    fn organize_renames_and_mirrors_subtree() {
        let temp = tempdir().expect("tempdir");
        let source = temp.path().join("source");
        let destination = temp.path().join("dest");
        fs::create_dir_all(source.join("photos")).expect("create photos");

        write_image_with_capture_date(&source.join("photos/IMG001.JPG"), "2021:05:03 14:02:09");
        fs::write(source.join("photos/IMG002.JPG"), b"no exif here").expect("write IMG002");
        fs::write(source.join("clip.MP4"), b"mp4 payload").expect("write clip");
        filetime::set_file_mtime(
            source.join("clip.MP4"),
            FileTime::from_unix_time(1_609_459_200, 0),
        )
        .expect("set mtime");
        fs::write(source.join("notes.txt"), b"plain text").expect("write notes");

        let report = organize(&options_for(&source, &destination)).expect("organize should succeed");

        assert!(destination.join("photos/20210503_140209.jpg").exists());
        assert!(destination.join("photos/IMG002.JPG").exists());
        assert!(destination.join("20210101_000000.mp4").exists());
        assert!(destination.join("notes.txt").exists());

        assert_eq!(report.stats.scanned_files, 4);
        assert_eq!(report.stats.copied, 4);
        assert_eq!(report.stats.by_capture_time, 1);
        assert_eq!(report.stats.by_file_modified, 1);
        assert_eq!(report.stats.by_original_name, 2);
        assert_eq!(report.stats.unrecognized, 1);
        assert_eq!(report.stats.failed, 0);

        let video = report
            .records
            .iter()
            .find(|r| r.destination_path.ends_with("20210101_000000.mp4"))
            .expect("video record");
        assert_eq!(video.name_source, NameSource::FileModified);
    }

    #[test]
    fn organize_copies_bytes_unchanged() {
        let temp = tempdir().expect("tempdir");
        let source = temp.path().join("source");
        let destination = temp.path().join("dest");
        fs::create_dir_all(&source).expect("create source");

        write_image_with_capture_date(&source.join("IMG001.jpg"), "2021:05:03 14:02:09");
        let original = fs::read(source.join("IMG001.jpg")).expect("read source");

        organize(&options_for(&source, &destination)).expect("organize should succeed");

        let copied = fs::read(destination.join("20210503_140209.jpg")).expect("read copy");
        assert_eq!(copied, original);
    }

    #[test]
    fn organize_suffixes_colliding_timestamps() {
        let temp = tempdir().expect("tempdir");
        let source = temp.path().join("source");
        let destination = temp.path().join("dest");
        fs::create_dir_all(&source).expect("create source");

        write_image_with_capture_date(&source.join("a.jpg"), "2021:01:01 00:00:00");
        write_image_with_capture_date(&source.join("b.jpg"), "2021:01:01 00:00:00");

        let report = organize(&options_for(&source, &destination)).expect("organize should succeed");

        assert!(destination.join("20210101_000000.jpg").exists());
        assert!(destination.join("20210101_000000_001.jpg").exists());
        assert_eq!(report.stats.copied, 2);
    }

    #[test]
    fn organize_continues_after_a_per_file_failure() {
        let temp = tempdir().expect("tempdir");
        let source = temp.path().join("source");
        let destination = temp.path().join("dest");
        fs::create_dir_all(&source).expect("create source");
        fs::create_dir_all(&destination).expect("create destination");

        fs::write(source.join("notes.txt"), b"new").expect("write notes");
        write_image_with_capture_date(&source.join("IMG001.jpg"), "2021:05:03 14:02:09");

        // notes.txt の保存先候補を両方ふさいでおく
        fs::write(destination.join("notes.txt"), b"blocker").expect("write blocker");
        fs::write(destination.join("notes_001.txt"), b"blocker").expect("write blocker");

        let mut options = options_for(&source, &destination);
        options.max_copy_attempts = 2;
        let report = organize(&options).expect("organize should succeed");

        assert_eq!(report.stats.failed, 1);
        assert_eq!(report.stats.copied, 1);
        assert!(destination.join("20210503_140209.jpg").exists());
        assert_eq!(
            fs::read(destination.join("notes.txt")).expect("read blocker"),
            b"blocker"
        );
    }

    #[test]
    fn organize_bails_when_source_is_missing() {
        let temp = tempdir().expect("tempdir");
        let source = temp.path().join("absent");
        let destination = temp.path().join("dest");

        let err = organize(&options_for(&source, &destination)).expect_err("must fail");
        assert!(err.to_string().contains("移動元フォルダが存在しません"));
    }

    #[test]
    fn report_serializes_to_json() {
        let temp = tempdir().expect("tempdir");
        let source = temp.path().join("source");
        let destination = temp.path().join("dest");
        fs::create_dir_all(&source).expect("create source");
        fs::write(source.join("notes.txt"), b"x").expect("write notes");

        let report = organize(&options_for(&source, &destination)).expect("organize should succeed");
        let body = serde_json::to_string_pretty(&report).expect("serialize");
        assert!(body.contains("OriginalName"));
    }
}
