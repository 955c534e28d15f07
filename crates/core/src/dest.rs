use std::path::{Path, PathBuf};

// 両ルートは正規化済みの絶対パスであることが前提。接頭辞の文字列置換のみ行う。
pub fn map_destination_dir(file: &Path, source_root: &Path, destination_root: &Path) -> PathBuf {
    let Some(dir) = file.parent() else {
        return destination_root.to_path_buf();
    };

    let dir_str = dir.to_string_lossy();
    let source_str = source_root.to_string_lossy();
    match dir_str.strip_prefix(source_str.as_ref()) {
        Some(rest) => PathBuf::from(format!("{}{}", destination_root.to_string_lossy(), rest)),
        None => dir.to_path_buf(),
    }
}
