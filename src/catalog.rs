//! Media catalog: the on-disk JSON index and its in-memory partitions.
//!
//! The sync tool maintains a `db.json` file at the root of the media
//! library: a JSON array with one object per media item. Loading never
//! touches the media files themselves; a record whose path points nowhere
//! is still a valid record.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::Error;

/// Catalog file name, resolved relative to the media library root.
pub const DB_FILE_NAME: &str = "db.json";

/// EXIF orientation of a media item, as recorded by the sync tool.
///
/// Values follow the EXIF tag 0x0112 codes 1 through 8. Anything outside
/// that range (or a missing field) falls back to [`Orientation::Up`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Up,
    UpMirrored,
    Down,
    DownMirrored,
    LeftMirrored,
    Right,
    RightMirrored,
    Left,
}

/// Mirroring applied after rotation when displaying a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Maps an EXIF orientation code to its variant, `None` when out of range.
    #[must_use]
    pub fn from_exif(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::Up),
            2 => Some(Self::UpMirrored),
            3 => Some(Self::Down),
            4 => Some(Self::DownMirrored),
            5 => Some(Self::LeftMirrored),
            6 => Some(Self::Right),
            7 => Some(Self::RightMirrored),
            8 => Some(Self::Left),
            _ => None,
        }
    }

    /// Clockwise rotation in degrees that uprights the pixels.
    #[must_use]
    pub fn angle_degrees(self) -> f64 {
        match self {
            Self::Up | Self::UpMirrored | Self::DownMirrored => 0.0,
            Self::Down => 180.0,
            Self::LeftMirrored | Self::Right => 90.0,
            Self::RightMirrored | Self::Left => 270.0,
        }
    }

    /// Mirroring to apply after [`angle_degrees`](Self::angle_degrees).
    #[must_use]
    pub fn flip(self) -> Flip {
        match self {
            Self::Up | Self::Down | Self::Right | Self::Left => Flip::None,
            Self::UpMirrored | Self::LeftMirrored | Self::RightMirrored => Flip::Horizontal,
            Self::DownMirrored => Flip::Vertical,
        }
    }
}

/// One entry of the media catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecord {
    /// Path of the media file relative to the library root.
    pub relative_path: String,
    /// Whether the item is flagged as a favorite.
    pub is_favorite: bool,
    /// Whether a live-photo companion clip exists alongside the still.
    pub has_live_photo: bool,
    /// Capture timestamp as written by the sync tool, shown verbatim.
    pub created_date: String,
    /// EXIF orientation hint for the display.
    pub orientation: Orientation,
}

impl MediaRecord {
    // The sync tool has shipped records with missing or mistyped fields;
    // one bad entry must not take down the whole catalog. Absent or
    // mistyped fields coerce to the field's default.
    fn from_json(value: &Value) -> Self {
        Self {
            relative_path: value
                .get("relativePath")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
            is_favorite: value
                .get("isFavorite")
                .and_then(Value::as_bool)
                .unwrap_or_default(),
            has_live_photo: value
                .get("hasLivePhoto")
                .and_then(Value::as_bool)
                .unwrap_or_default(),
            created_date: value
                .get("createdDate")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
            orientation: value
                .get("orientation")
                .and_then(Value::as_u64)
                .and_then(Orientation::from_exif)
                .unwrap_or_default(),
        }
    }
}

/// In-memory catalog, partitioned by the favorite flag.
///
/// Partitioning happens once at load time so the weighted sampler can draw
/// from either side without rescanning. Records keep the file order of the
/// catalog within their partition.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    favorites: Vec<MediaRecord>,
    normal: Vec<MediaRecord>,
}

impl Catalog {
    /// Reads and parses the catalog file at `path`.
    ///
    /// # Errors
    /// Returns [`Error::Io`] when the file cannot be read and
    /// [`Error::Parse`] when it is not a JSON array. Individual malformed
    /// records do not fail the load; their fields coerce to defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let bytes = fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<Value> =
            serde_json::from_slice(&bytes).map_err(|source| Error::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_records(entries.iter().map(MediaRecord::from_json)))
    }

    /// Builds a catalog from records already in memory, partitioning by the
    /// favorite flag.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = MediaRecord>,
    {
        let mut favorites = Vec::new();
        let mut normal = Vec::new();
        for record in records {
            if record.is_favorite {
                favorites.push(record);
            } else {
                normal.push(record);
            }
        }
        Self { favorites, normal }
    }

    #[must_use]
    pub fn favorites(&self) -> &[MediaRecord] {
        &self.favorites
    }

    #[must_use]
    pub fn normal(&self) -> &[MediaRecord] {
        &self.normal
    }

    /// Total number of records across both partitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.favorites.len() + self.normal.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty() && self.normal.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exif_codes_map_to_variants() {
        assert_eq!(Orientation::from_exif(1), Some(Orientation::Up));
        assert_eq!(Orientation::from_exif(6), Some(Orientation::Right));
        assert_eq!(Orientation::from_exif(8), Some(Orientation::Left));
        assert_eq!(Orientation::from_exif(0), None);
        assert_eq!(Orientation::from_exif(9), None);
    }

    #[test]
    fn rotation_and_flip_follow_exif_semantics() {
        assert_eq!(Orientation::Up.angle_degrees(), 0.0);
        assert_eq!(Orientation::Down.angle_degrees(), 180.0);
        assert_eq!(Orientation::Right.angle_degrees(), 90.0);
        assert_eq!(Orientation::Left.angle_degrees(), 270.0);
        assert_eq!(Orientation::Up.flip(), Flip::None);
        assert_eq!(Orientation::UpMirrored.flip(), Flip::Horizontal);
        assert_eq!(Orientation::DownMirrored.flip(), Flip::Vertical);
    }

    #[test]
    fn record_fields_coerce_to_defaults() {
        let record = MediaRecord::from_json(&json!({
            "relativePath": 42,
            "isFavorite": "yes",
            "orientation": 99,
        }));
        assert_eq!(record.relative_path, "");
        assert!(!record.is_favorite);
        assert!(!record.has_live_photo);
        assert_eq!(record.created_date, "");
        assert_eq!(record.orientation, Orientation::Up);
    }

    #[test]
    fn record_reads_well_formed_fields() {
        let record = MediaRecord::from_json(&json!({
            "relativePath": "2021/trip/IMG_1.JPG",
            "isFavorite": true,
            "hasLivePhoto": true,
            "createdDate": "2021-07-04T12:00:00Z",
            "orientation": 6,
        }));
        assert_eq!(record.relative_path, "2021/trip/IMG_1.JPG");
        assert!(record.is_favorite);
        assert!(record.has_live_photo);
        assert_eq!(record.created_date, "2021-07-04T12:00:00Z");
        assert_eq!(record.orientation, Orientation::Right);
    }

    #[test]
    fn non_object_entry_becomes_default_record() {
        let record = MediaRecord::from_json(&json!("just a string"));
        assert_eq!(record, MediaRecord {
            relative_path: String::new(),
            is_favorite: false,
            has_live_photo: false,
            created_date: String::new(),
            orientation: Orientation::Up,
        });
    }

    #[test]
    fn from_records_partitions_by_flag() {
        let mk = |path: &str, fav: bool| MediaRecord {
            relative_path: path.to_owned(),
            is_favorite: fav,
            has_live_photo: false,
            created_date: String::new(),
            orientation: Orientation::Up,
        };
        let catalog = Catalog::from_records(vec![
            mk("a.jpg", false),
            mk("b.jpg", true),
            mk("c.jpg", false),
            mk("d.jpg", true),
        ]);
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.favorites().len(), 2);
        assert_eq!(catalog.normal().len(), 2);
        // file order survives within each partition
        assert_eq!(catalog.favorites()[0].relative_path, "b.jpg");
        assert_eq!(catalog.favorites()[1].relative_path, "d.jpg");
        assert_eq!(catalog.normal()[0].relative_path, "a.jpg");
        assert_eq!(catalog.normal()[1].relative_path, "c.jpg");
    }
}
