use chrono::{DateTime, Datelike, Timelike, Utc};

pub fn timestamp_basename(date: DateTime<Utc>, extension: &str) -> String {
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}.{}",
        date.year(),
        date.month(),
        date.day(),
        date.hour(),
        date.minute(),
        date.second(),
        extension.to_ascii_lowercase()
    )
}
