//! Named whitelists and the MIME similarity table used by the cross-check.
//!
//! Ported from the original's `data/whitelists.py`, which filters
//! `mimetypes.types_map.values()` by prefix for the `*_ALL` variants and
//! hardcodes the `*_RESTRICTIVE` lists.

use std::collections::BTreeSet;

use crate::mime_types::known_mime_types;

/// The named whitelist a route/global config can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WhitelistName {
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "RESTRICTIVE")]
    Restrictive,
    #[serde(rename = "CUSTOM")]
    Custom,
    #[serde(rename = "AUDIO_ALL")]
    AudioAll,
    #[serde(rename = "APPLICATION_ALL")]
    ApplicationAll,
    #[serde(rename = "IMAGE_ALL")]
    ImageAll,
    #[serde(rename = "TEXT_ALL")]
    TextAll,
    #[serde(rename = "VIDEO_ALL")]
    VideoAll,
    #[serde(rename = "AUDIO_RESTRICTIVE")]
    AudioRestrictive,
    #[serde(rename = "APPLICATION_RESTRICTIVE")]
    ApplicationRestrictive,
    #[serde(rename = "IMAGE_RESTRICTIVE")]
    ImageRestrictive,
    #[serde(rename = "TEXT_RESTRICTIVE")]
    TextRestrictive,
    #[serde(rename = "VIDEO_RESTRICTIVE")]
    VideoRestrictive,
}

const AUDIO_RESTRICTIVE: &[&str] = &["audio/mpeg"];
const APPLICATION_RESTRICTIVE: &[&str] = &["application/pdf"];
const IMAGE_RESTRICTIVE: &[&str] = &["image/gif", "image/jpeg", "image/png", "image/tiff"];
const TEXT_RESTRICTIVE: &[&str] = &["text/plain"];
const VIDEO_RESTRICTIVE: &[&str] = &["video/mp4", "video/mpeg", "video/quicktime"];

fn all_by_prefix(prefix: &str) -> BTreeSet<String> {
    known_mime_types()
        .filter(|m| m.starts_with(prefix))
        .map(str::to_string)
        .collect()
}

/// Resolve a named whitelist (everything except `CUSTOM`) to its MIME set.
///
/// Mirrors `_get_valid_whitelist`: unrecognized names fall back to `RESTRICTIVE`,
/// which cannot happen through the typed `WhitelistName` enum but is kept here
/// as the match's documented default arm for parity with the original.
pub fn resolve(name: WhitelistName) -> BTreeSet<String> {
    match name {
        WhitelistName::AudioAll => all_by_prefix("audio/"),
        WhitelistName::ApplicationAll => all_by_prefix("application/"),
        WhitelistName::ImageAll => all_by_prefix("image/"),
        WhitelistName::TextAll => all_by_prefix("text/"),
        WhitelistName::VideoAll => all_by_prefix("video/"),
        WhitelistName::AudioRestrictive => AUDIO_RESTRICTIVE.iter().map(|s| s.to_string()).collect(),
        WhitelistName::ApplicationRestrictive => {
            APPLICATION_RESTRICTIVE.iter().map(|s| s.to_string()).collect()
        }
        WhitelistName::ImageRestrictive => IMAGE_RESTRICTIVE.iter().map(|s| s.to_string()).collect(),
        WhitelistName::TextRestrictive => TEXT_RESTRICTIVE.iter().map(|s| s.to_string()).collect(),
        WhitelistName::VideoRestrictive => VIDEO_RESTRICTIVE.iter().map(|s| s.to_string()).collect(),
        WhitelistName::All => known_mime_types().map(str::to_string).collect(),
        WhitelistName::Custom | WhitelistName::Restrictive => AUDIO_RESTRICTIVE
            .iter()
            .chain(APPLICATION_RESTRICTIVE)
            .chain(IMAGE_RESTRICTIVE)
            .chain(TEXT_RESTRICTIVE)
            .chain(VIDEO_RESTRICTIVE)
            .map(|s| s.to_string())
            .collect(),
    }
}

/// Equivalence classes for the MIME-manipulation cross-check (§4.3). Each
/// inner slice is one class; a MIME type absent from all of them is its own
/// singleton class.
pub const SIMILARITY_CLASSES: &[&[&str]] = &[
    &[
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "application/vnd.ms-word",
        "application/rtf",
        "text/rtf",
    ],
    &[
        "application/msexcel",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "application/vnd.ms-excel",
    ],
    &[
        "application/mspowerpoint",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "application/vnd.ms-powerpoint",
    ],
    &[
        "application/pdf",
        "application/x-pdf",
        "application/acrobat",
        "applications/vnd.pdf",
        "text/pdf",
        "text/x-pdf",
    ],
    &[
        "image/jpeg",
        "image/pjpeg",
        "image/jpg",
        "image/png",
        "image/gif",
        "image/bmp",
        "image/x-windows-bmp",
        "image/x-bitmap",
        "image/x-xbitmap",
        "image/x-win-bitmap",
        "image/x-ms-bmp",
        "image/x-bmp",
    ],
    &[
        "video/mp4",
        "video/mpeg",
        "video/quicktime",
        "video/x-msvideo",
        "video/x-ms-wmv",
        "video/x-ms-wm",
        "video/avi",
        "video/msvideo",
        "video/x-ms-asf",
        "video/x-ms-asf-plugin",
    ],
    &[
        "audio/mpeg",
        "audio/mp3",
        "audio/x-mpeg",
        "audio/x-mp3",
        "audio/x-mpeg3",
        "audio/mpeg3",
        "audio/mpg",
        "audio/x-mpg",
        "audio/x-mpegaudio",
        "audio/x-mp3-playlist",
    ],
];

/// All MIME types considered equivalent to `mime`: its similarity class plus
/// itself, or just itself if it belongs to no class (a singleton class).
pub fn equivalence_class(mime: &str) -> Vec<&'static str> {
    for class in SIMILARITY_CLASSES {
        if class.contains(&mime) {
            return class.to_vec();
        }
    }
    Vec::new()
}
