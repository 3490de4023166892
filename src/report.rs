//! File-level metadata: the parsed stream record combined with file system
//! dates, plus the named field mapping consumed by presentation layers.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::gif::Metadata;
use crate::traits::LoadableMetadata;
use crate::types::Result;

/// Placeholder rendered as the color count when the stream announces no
/// global color table.
pub const NO_GLOBAL_COLOR_TABLE: &str = "no global color table";

/// Canonical field names, in display order.
pub const FIELD_NAMES: [&str; 9] = [
    "version number",
    "image size",
    "color count",
    "color resolution",
    "background color index",
    "image count",
    "creation date",
    "modification date",
    "comments",
];

/// Metadata of one GIF file: stream contents plus file system dates.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FileMetadata {
    /// Structural metadata parsed from the stream.
    pub gif: Metadata,
    /// File creation date, formatted `YYYY-MM-DD HH:MM:SS` in local time.
    pub created: String,
    /// File modification date, in the same format.
    pub modified: String,
}

impl FileMetadata {
    /// Parses the file at `path` and looks up its file system dates.
    ///
    /// The stream is consumed strictly sequentially and closed on every exit
    /// path. Any parse failure aborts the whole call; no partial metadata is
    /// returned.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<FileMetadata> {
        let path = path.as_ref();
        let gif = Metadata::load_from_file(path)?;
        let (created, modified) = file_dates(path)?;
        Ok(FileMetadata {
            gif,
            created,
            modified,
        })
    }

    /// Returns the field name to rendered value mapping, in canonical order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let color_count = match self.gif.global_color_table_size {
            Some(n) => n.to_string(),
            None => NO_GLOBAL_COLOR_TABLE.to_owned(),
        };
        vec![
            ("version number", self.gif.version.clone()),
            ("image size", self.gif.dimensions.to_string()),
            ("color count", color_count),
            ("color resolution", self.gif.color_resolution.to_string()),
            (
                "background color index",
                self.gif.background_color_index.to_string(),
            ),
            ("image count", self.gif.image_count.to_string()),
            ("creation date", self.created.clone()),
            ("modification date", self.modified.clone()),
            ("comments", self.gif.comments.join("; ")),
        ]
    }
}

fn file_dates(path: &Path) -> Result<(String, String)> {
    let md = fs::metadata(path)?;
    let modified = md.modified()?;
    // not every file system records a birth time
    let created = md.created().unwrap_or(modified);
    Ok((format_timestamp(created), format_timestamp(modified)))
}

fn format_timestamp(t: SystemTime) -> String {
    DateTime::<Local>::from(t)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
