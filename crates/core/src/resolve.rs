use crate::classify::MediaKind;
use crate::exif_reader::read_capture_date;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

// 画像はEXIF、動画はファイル更新日時。EXIF側の失敗は「日時なし」に畳み込み、
// バッチを止めない。
pub fn resolve_capture_time(
    path: &Path,
    kind: MediaKind,
    date_tags: &[String],
) -> Result<Option<DateTime<Utc>>> {
    match kind {
        MediaKind::Image => Ok(read_capture_date(path, date_tags).ok().flatten()),
        MediaKind::Video => {
            let modified = fs::metadata(path)
                .and_then(|meta| meta.modified())
                .with_context(|| format!("更新日時を取得できませんでした: {}", path.display()))?;
            Ok(Some(DateTime::<Utc>::from(modified)))
        }
        MediaKind::Unrecognized => Ok(None),
    }
}
