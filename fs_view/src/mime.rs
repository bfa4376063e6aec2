//! Content type inference
//!
//! Types are looked up from the lowercased file extension. Nothing reads file
//! contents.

use std::path::Path;

/// MIME type reported for every directory
pub const DIRECTORY_MIME_TYPE: &str = "vnd.android.document/directory";

/// Fallback for files without a known extension
pub const OCTET_STREAM_MIME_TYPE: &str = "application/octet-stream";

/// Extension based MIME classifier
pub struct MimeClassifier;

impl MimeClassifier {
    /// Classifies the entry at `path`
    pub fn classify(path: &Path, is_dir: bool) -> &'static str {
        if is_dir {
            return DIRECTORY_MIME_TYPE;
        }
        match path.file_name() {
            Some(name) => Self::for_name(&name.to_string_lossy()),
            None => OCTET_STREAM_MIME_TYPE,
        }
    }

    /// Classifies a file by name
    ///
    /// # Examples
    ///
    /// ```
    /// use fs_view::MimeClassifier;
    ///
    /// assert_eq!(MimeClassifier::for_name("notes.TXT"), "text/plain");
    /// assert_eq!(MimeClassifier::for_name("README"), "application/octet-stream");
    /// ```
    pub fn for_name(name: &str) -> &'static str {
        name.rfind('.')
            .map(|dot| name[dot + 1..].to_lowercase())
            .and_then(|ext| mime_guess::from_ext(&ext).first_raw())
            .unwrap_or(OCTET_STREAM_MIME_TYPE)
    }

    /// True if `mime_type` is the directory sentinel
    pub fn is_directory_type(mime_type: &str) -> bool {
        mime_type == DIRECTORY_MIME_TYPE
    }
}
