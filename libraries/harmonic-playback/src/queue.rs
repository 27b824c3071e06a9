//! Track queue and cursor
//!
//! The queue is the flat library in insertion order. It is never reordered
//! in place: shuffle only changes which index `next` picks. The cursor is
//! either unset or a valid index.

use harmonic_core::{Track, TrackId};
use std::collections::HashSet;

/// Where `next` should go, ignoring shuffle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Nothing to play
    Empty,

    /// Load and play this index
    Play(usize),

    /// Ran off the end with loop disabled; freeze on this index
    Exhausted { last: usize },
}

/// Result of removing a track from the queue
#[derive(Debug, Clone, PartialEq)]
pub struct Removed {
    /// Index the track occupied
    pub index: usize,

    /// The removed track
    pub track: Track,

    /// Whether the cursor pointed at the removed entry
    pub was_current: bool,
}

/// Ordered track queue with a cursor
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    cursor: Option<usize>,
}

impl Queue {
    /// Create empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue from stored tracks, keeping the first of any duplicate ids
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        let mut seen = HashSet::new();
        let tracks = tracks
            .into_iter()
            .filter(|track| seen.insert(track.id.clone()))
            .collect();

        Self {
            tracks,
            cursor: None,
        }
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// All tracks in order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Current cursor
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Track under the cursor
    pub fn current(&self) -> Option<&Track> {
        self.cursor.and_then(|index| self.tracks.get(index))
    }

    /// Move the cursor; returns false (and leaves it alone) when out of range
    pub fn set_cursor(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.cursor = Some(index);
            true
        } else {
            false
        }
    }

    /// Unset the cursor
    pub fn clear_cursor(&mut self) {
        self.cursor = None;
    }

    /// Index of the track with this id
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|track| &track.id == id)
    }

    /// Append a track, or replace the entry that already has its id
    ///
    /// Returns the index the track ended up at.
    pub fn upsert(&mut self, track: Track) -> usize {
        if let Some(index) = self.position_of(&track.id) {
            self.tracks[index] = track;
            index
        } else {
            self.tracks.push(track);
            self.tracks.len() - 1
        }
    }

    /// Remove a track by id, keeping the cursor on the same entry
    ///
    /// The cursor is unset if it pointed at the removed track and shifted
    /// down if the removed track came before it.
    pub fn remove(&mut self, id: &TrackId) -> Option<Removed> {
        let index = self.position_of(id)?;
        let track = self.tracks.remove(index);

        let was_current = self.cursor == Some(index);
        self.cursor = match self.cursor {
            Some(cursor) if cursor == index => None,
            Some(cursor) if cursor > index => Some(cursor - 1),
            other => other,
        };

        Some(Removed {
            index,
            track,
            was_current,
        })
    }

    /// Drop every track and unset the cursor
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.cursor = None;
    }

    /// Sequential successor of the cursor
    ///
    /// An unset cursor advances to the first track.
    pub fn advance(&self, loop_enabled: bool) -> Advance {
        if self.tracks.is_empty() {
            return Advance::Empty;
        }

        let next = self.cursor.map_or(0, |cursor| cursor + 1);
        if next < self.tracks.len() {
            Advance::Play(next)
        } else if loop_enabled {
            Advance::Play(0)
        } else {
            Advance::Exhausted {
                last: self.tracks.len() - 1,
            }
        }
    }

    /// Index one before the cursor, clamped at 0
    pub fn previous_index(&self) -> Option<usize> {
        self.cursor.map(|cursor| cursor.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn track(id: &str) -> Track {
        Track {
            id: TrackId::new(id),
            title: format!("Track {id}"),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            cover: None,
            file: PathBuf::from(format!("/music/{id}.mp3")),
            duration_seconds: Some(180.0),
        }
    }

    fn queue_of(ids: &[&str]) -> Queue {
        Queue::from_tracks(ids.iter().map(|id| track(id)).collect())
    }

    #[test]
    fn from_tracks_drops_duplicate_ids() {
        let queue = Queue::from_tracks(vec![track("a"), track("b"), track("a")]);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.cursor(), None);
    }

    #[test]
    fn set_cursor_rejects_out_of_range() {
        let mut queue = queue_of(&["a", "b"]);
        assert!(queue.set_cursor(1));
        assert!(!queue.set_cursor(2));
        assert_eq!(queue.cursor(), Some(1));
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut queue = queue_of(&["a", "b", "c"]);
        let mut renamed = track("b");
        renamed.title = "Renamed".to_string();

        assert_eq!(queue.upsert(renamed), 1);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.get(1).unwrap().title, "Renamed");

        assert_eq!(queue.upsert(track("d")), 3);
    }

    #[test]
    fn remove_current_unsets_cursor() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.set_cursor(1);

        let removed = queue.remove(&TrackId::new("b")).unwrap();
        assert!(removed.was_current);
        assert_eq!(removed.index, 1);
        assert_eq!(queue.cursor(), None);
    }

    #[test]
    fn remove_before_cursor_shifts_cursor() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.set_cursor(2);

        queue.remove(&TrackId::new("a")).unwrap();
        assert_eq!(queue.cursor(), Some(1));
        assert_eq!(queue.current().unwrap().id, TrackId::new("c"));
    }

    #[test]
    fn remove_after_cursor_keeps_cursor() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.set_cursor(0);

        queue.remove(&TrackId::new("c")).unwrap();
        assert_eq!(queue.cursor(), Some(0));
        assert!(queue.remove(&TrackId::new("missing")).is_none());
    }

    #[test]
    fn advance_respects_loop() {
        let mut queue = queue_of(&["a", "b", "c"]);
        assert_eq!(queue.advance(false), Advance::Play(0));

        queue.set_cursor(1);
        assert_eq!(queue.advance(false), Advance::Play(2));

        queue.set_cursor(2);
        assert_eq!(queue.advance(true), Advance::Play(0));
        assert_eq!(queue.advance(false), Advance::Exhausted { last: 2 });

        assert_eq!(Queue::new().advance(true), Advance::Empty);
    }

    #[test]
    fn previous_index_clamps_at_zero() {
        let mut queue = queue_of(&["a", "b"]);
        assert_eq!(queue.previous_index(), None);

        queue.set_cursor(1);
        assert_eq!(queue.previous_index(), Some(0));

        queue.set_cursor(0);
        assert_eq!(queue.previous_index(), Some(0));
    }
}
