use cassette_core::models::PropertyValue;

use super::fold;

/// Streaming platform a link belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Spotify,
    Apple,
    Deezer,
    Unknown,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spotify => "spotify",
            Self::Apple => "apple",
            Self::Deezer => "deezer",
            Self::Unknown => "unknown",
        }
    }
}

/// Case- and separator-insensitive platform match. Anything unrecognized,
/// including non-text values, is `Unknown`.
pub fn canonicalize_platform(value: &PropertyValue) -> Platform {
    let Some(text) = value.as_str() else {
        return Platform::Unknown;
    };
    match fold(text).as_str() {
        "spotify" => Platform::Spotify,
        "apple" | "applemusic" | "itunes" => Platform::Apple,
        "deezer" => Platform::Deezer,
        _ => Platform::Unknown,
    }
}
