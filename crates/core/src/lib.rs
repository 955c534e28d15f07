mod classify;
mod copy;
mod dest;
mod exif_reader;
mod name;
mod organize;
mod resolve;
mod scans;

pub use classify::{extension_of, ExtensionRegistry, MediaKind};
pub use copy::{copy_unique, indexed_path, CopyError};
pub use dest::map_destination_dir;
pub use exif_reader::{parse_capture_date, read_capture_date};
pub use name::timestamp_basename;
pub use organize::{
    organize, CopyRecord, NameSource, OrganizeOptions, OrganizeReport, OrganizeStats,
};
pub use resolve::resolve_capture_time;
pub use scans::{sequence_scans, ScanOptions, ScanReport};
