mod ids;
mod track;

pub use ids::TrackId;
pub use track::{
    title_from_path, CreateTrack, Track, PLACEHOLDER_COVER, UNKNOWN_ALBUM, UNKNOWN_ARTIST,
};
