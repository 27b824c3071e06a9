//! Shuffle index selection
//!
//! Shuffle never reorders the queue. With shuffle on, `next` draws a
//! uniformly random index, which may be the track that is already playing.

use rand::Rng;

/// Pick a uniformly random index in `[0, len)`
///
/// Returns `None` for an empty queue.
pub fn pick_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(rng.gen_range(0..len))
    }
}
