use cassette_core::models::PropertyValue;

use super::fold;

/// Kind of music entity an interaction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Track,
    Album,
    Artist,
    Playlist,
}

impl ElementType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Album => "album",
            Self::Artist => "artist",
            Self::Playlist => "playlist",
        }
    }
}

/// `None` for anything outside the closed set.
pub fn canonicalize_element_type(value: &PropertyValue) -> Option<ElementType> {
    match fold(value.as_str()?).as_str() {
        "track" | "tracks" | "song" | "songs" => Some(ElementType::Track),
        "album" | "albums" => Some(ElementType::Album),
        "artist" | "artists" => Some(ElementType::Artist),
        "playlist" | "playlists" => Some(ElementType::Playlist),
        _ => None,
    }
}
