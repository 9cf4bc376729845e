//! Extension filtering for sampled media paths.
//!
//! Catalog records keep whatever paths the sync tool wrote; only a subset of
//! those files can actually be decoded by the display. The filter does a
//! case-insensitive suffix match against a configured extension list, so
//! `photo.HEIC` and `photo.heic` are treated the same.

/// Extensions accepted when no explicit list is configured (without dot).
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff", "heic",
];

/// Case-insensitive suffix matcher over a fixed extension list.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    // stored lowercase with the leading dot, e.g. ".jpg"
    suffixes: Vec<String>,
}

impl ExtensionFilter {
    /// Builds a filter from extension names; a leading dot is optional and
    /// letter case is ignored.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = extensions
            .into_iter()
            .map(|ext| {
                let bare = ext.as_ref().trim_start_matches('.').to_ascii_lowercase();
                format!(".{bare}")
            })
            .collect();
        Self { suffixes }
    }

    /// Returns true when `relative_path` ends with one of the configured
    /// extensions, ignoring ASCII case.
    #[must_use]
    pub fn matches(&self, relative_path: &str) -> bool {
        self.suffixes
            .iter()
            .any(|suffix| ends_with_ignore_case(relative_path, suffix))
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().copied())
    }
}

fn ends_with_ignore_case(candidate: &str, suffix: &str) -> bool {
    // Paths shorter than the suffix are a clean no-match.
    if candidate.len() < suffix.len() {
        return false;
    }
    candidate.as_bytes()[candidate.len() - suffix.len()..]
        .eq_ignore_ascii_case(suffix.as_bytes())
}
