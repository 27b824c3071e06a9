//! Text rendering for the player status line and library listings

use crate::keys::Focus;
use harmonic_core::Track;
use harmonic_playback::PlaybackSnapshot;

/// `m:ss`, or `h:mm:ss` past an hour
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// One line describing the snapshot
pub fn status_line(snapshot: &PlaybackSnapshot) -> String {
    let Some(track) = &snapshot.current_track else {
        return "No track loaded  (space: play, :play <n>, q: quit)".to_string();
    };

    let state = if snapshot.is_playing { ">" } else { "||" };
    let volume = if snapshot.muted {
        "muted".to_string()
    } else {
        format!("vol {:.0}%", snapshot.volume * 100.0)
    };

    let mut line = format!(
        "{state} {}. {} - {}  {} / {}  {volume}",
        snapshot.index.map_or(0, |index| index + 1),
        track.title,
        track.artist,
        format_time(snapshot.position_seconds),
        format_time(snapshot.duration_seconds),
    );
    if snapshot.loop_enabled {
        line.push_str("  [loop]");
    }
    if snapshot.shuffle {
        line.push_str("  [shuffle]");
    }
    line
}

/// Prompt shown in place of the status line while typing
pub fn prompt_line(focus: Focus, text: &str) -> Option<String> {
    match focus {
        Focus::CommandLine => Some(format!(":{text}")),
        Focus::Normal => None,
    }
}

/// Library row as printed by `harmonic list`
pub fn track_row(position: usize, track: &Track) -> String {
    let duration = track
        .duration_seconds
        .map_or_else(|| "--:--".to_string(), format_time);
    format!(
        "{:>4}. {} - {} ({})  {}  [{}]",
        position + 1,
        track.title,
        track.artist,
        track.album,
        duration,
        track.id
    )
}
