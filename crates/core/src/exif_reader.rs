use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use exif::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn read_capture_date(path: &Path, tag_names: &[String]) -> Result<Option<DateTime<Utc>>> {
    let file = File::open(path)
        .with_context(|| format!("EXIF読み込み対象を開けませんでした: {}", path.display()))?;
    let mut buf = BufReader::new(file);
    let exif = Reader::new()
        .read_from_container(&mut buf)
        .with_context(|| format!("EXIFを解析できませんでした: {}", path.display()))?;

    Ok(find_field_value(&exif, tag_names).and_then(|raw| parse_capture_date(&raw)))
}

fn find_field_value(exif: &exif::Exif, names: &[String]) -> Option<String> {
    exif.fields().find_map(|field| {
        let tag_name = format!("{:?}", field.tag);
        if names.iter().any(|name| name.eq_ignore_ascii_case(&tag_name)) {
            Some(field.display_value().to_string())
        } else {
            None
        }
    })
}

// EXIF生値 (YYYY:MM:DD HH:mm:ss) と表示形式の両方を受け付け、UTCとして解釈する。
pub fn parse_capture_date(input: &str) -> Option<DateTime<Utc>> {
    let normalized = input.trim();

    let candidates = ["%Y:%m:%d %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

    for fmt in candidates {
        if let Ok(naive) = NaiveDateTime::parse_from_str(normalized, fmt) {
            return Some(naive.and_utc());
        }
    }

    None
}

#[cfg(test)]
pub(crate) fn write_image_with_capture_date(path: &Path, datetime: &str) {
    use exif::experimental::Writer;
    use exif::{Field, In, Tag, Value};

    let field = Field {
        tag: Tag::DateTimeOriginal,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![datetime.as_bytes().to_vec()]),
    };
    let mut writer = Writer::new();
    writer.push_field(&field);
    let mut buf = std::io::Cursor::new(Vec::new());
    writer.write(&mut buf, false).expect("write exif");
    std::fs::write(path, buf.into_inner()).expect("write fixture");
}
