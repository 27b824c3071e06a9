/// Tag reader implementation using lofty
use crate::error::{MetadataError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use lofty::{Accessor, AudioFile, PictureType, TaggedFileExt};
use std::path::Path;

/// Maximum embedded artwork size (5MB)
pub const MAX_ARTWORK_SIZE: usize = 5 * 1024 * 1024;

/// Raw values read from an audio file; anything missing stays `None`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagData {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Front cover as a `data:` URI
    pub cover: Option<String>,
    pub duration_seconds: Option<f64>,
}

/// Read tags, duration and cover art from an audio file
pub fn read_tags(path: &Path) -> Result<TagData> {
    if !path.exists() {
        return Err(MetadataError::FileNotFound(path.display().to_string()));
    }

    let tagged_file = lofty::read_from_path(path)?;

    let duration = tagged_file.properties().duration();
    let duration_seconds = (!duration.is_zero()).then(|| duration.as_secs_f64());

    // Prefer the format's primary tag (ID3v2 for MP3, Vorbis for OGG/FLAC)
    let Some(tag) = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
    else {
        return Ok(TagData {
            duration_seconds,
            ..TagData::default()
        });
    };

    let cover = match cover_data_uri(tag) {
        Ok(cover) => cover,
        Err(err) => {
            tracing::warn!("Skipping artwork in {}: {}", path.display(), err);
            None
        }
    };

    Ok(TagData {
        title: non_empty(tag.title().as_deref()),
        artist: non_empty(tag.artist().as_deref()),
        album: non_empty(tag.album().as_deref()),
        cover,
        duration_seconds,
    })
}

/// Encode the front cover (or the first picture) as a `data:` URI
fn cover_data_uri(tag: &lofty::Tag) -> Result<Option<String>> {
    let pictures = tag.pictures();

    let Some(picture) = pictures
        .iter()
        .find(|p| matches!(p.pic_type(), PictureType::CoverFront))
        .or_else(|| pictures.first())
    else {
        return Ok(None);
    };

    let data = picture.data();
    if data.len() > MAX_ARTWORK_SIZE {
        return Err(MetadataError::ArtworkTooLarge(data.len(), MAX_ARTWORK_SIZE));
    }

    // Default to "image/jpeg" if not specified
    let mime_type = picture
        .mime_type()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "image/jpeg".to_string());

    Ok(Some(data_uri(&mime_type, data)))
}

/// Build a base64 `data:` URI
pub fn data_uri(mime_type: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(data))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
