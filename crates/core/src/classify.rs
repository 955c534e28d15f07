use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Unrecognized,
}

#[derive(Debug, Clone)]
pub struct ExtensionRegistry {
    pub image: Vec<String>,
    pub video: Vec<String>,
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self {
            image: vec!["jpg".to_string(), "jpeg".to_string()],
            video: vec!["mp4".to_string()],
        }
    }
}

impl ExtensionRegistry {
    pub fn classify(&self, path: &Path) -> MediaKind {
        let Some(extension) = extension_of(path) else {
            return MediaKind::Unrecognized;
        };
        if matches_any(&self.image, &extension) {
            return MediaKind::Image;
        }
        if matches_any(&self.video, &extension) {
            return MediaKind::Video;
        }
        MediaKind::Unrecognized
    }
}

pub fn extension_of(path: &Path) -> Option<String> {
    path.extension().map(|v| v.to_string_lossy().to_string())
}

fn matches_any(registered: &[String], extension: &str) -> bool {
    registered
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(extension))
}
