//! A curated extension-to-MIME table standing in for the original's reliance
//! on Python's `mimetypes.types_map`.
//!
//! **NOTE:** This is not exhaustive, deliberately: it exists to give the
//! guesser, the whitelist resolver, and the cross-check a closed, deterministic
//! universe of "known" MIME types, not to replace the [`mime_guess`] crate's
//! own extension tables (which drive the extension-guessed MIME lookups
//! directly). Entries are kept sorted by extension for readability; lookups
//! are linear since the table is small and looked up at most a handful of
//! times per uploaded file.

/// `(extension, mime type)`, extension without the leading period, lowercase.
pub const EXTENSION_MIME_TABLE: &[(&str, &str)] = &[
    ("aac", "audio/aac"),
    ("asf", "video/x-ms-asf"),
    ("avi", "video/x-msvideo"),
    ("bmp", "image/bmp"),
    ("csv", "text/csv"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("eml", "message/rfc822"),
    ("epub", "application/epub+zip"),
    ("gif", "image/gif"),
    ("gz", "application/gzip"),
    ("htm", "text/html"),
    ("html", "text/html"),
    ("ico", "image/vnd.microsoft.icon"),
    ("jfif", "image/jpeg"),
    ("jpe", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("json", "application/json"),
    ("md", "text/markdown"),
    ("mov", "video/quicktime"),
    ("mp3", "audio/mpeg"),
    ("mp4", "video/mp4"),
    ("mpeg", "video/mpeg"),
    ("mpg", "video/mpeg"),
    ("odp", "application/vnd.oasis.opendocument.presentation"),
    ("ods", "application/vnd.oasis.opendocument.spreadsheet"),
    ("odt", "application/vnd.oasis.opendocument.text"),
    ("oga", "audio/ogg"),
    ("ogg", "audio/ogg"),
    ("ogv", "video/ogg"),
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    ("rtf", "text/rtf"),
    ("svg", "image/svg+xml"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("txt", "text/plain"),
    ("wav", "audio/x-wav"),
    ("webp", "image/webp"),
    ("wmv", "video/x-ms-wmv"),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("xml", "text/xml"),
    ("zip", "application/zip"),
];

/// Guess a MIME type from a bare extension (no leading period), the way the
/// original used `mimetypes.guess_type("name." + extension)`.
pub fn guess_from_extension(extension: &str) -> Option<&'static str> {
    let extension = extension.to_ascii_lowercase();
    EXTENSION_MIME_TABLE
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// Guess a filename extension (without the leading period) for a MIME type,
/// the inverse of [`guess_from_extension`]; mirrors `mimetypes.guess_extension`.
/// When more than one extension maps to the same MIME type, the first match
/// in table order wins, which is deterministic since the table is a fixed
/// `const` slice.
pub fn guess_extension(mime: &str) -> Option<&'static str> {
    EXTENSION_MIME_TABLE
        .iter()
        .find(|(_, m)| *m == mime)
        .map(|(ext, _)| *ext)
}

/// The full set of MIME types this table knows about, each with exactly one
/// guessing-score slot (invariant 6 in the data model).
pub fn known_mime_types() -> impl Iterator<Item = &'static str> {
    let mut seen = std::collections::BTreeSet::new();
    EXTENSION_MIME_TABLE
        .iter()
        .map(|(_, mime)| *mime)
        .filter(move |mime| seen.insert(*mime))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_common_extensions() {
        assert_eq!(guess_from_extension("pdf"), Some("application/pdf"));
        assert_eq!(guess_from_extension("TXT"), Some("text/plain"));
        assert_eq!(guess_from_extension("not-a-real-ext"), None);
    }

    #[test]
    fn guess_extension_is_the_inverse_of_guess_from_extension() {
        assert_eq!(guess_extension("application/pdf"), Some("pdf"));
        assert_eq!(guess_extension("application/does-not-exist"), None);
    }

    #[test]
    fn known_types_has_no_duplicates() {
        let all: Vec<_> = known_mime_types().collect();
        let unique: std::collections::BTreeSet<_> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
    }
}
