//! Keyboard surface
//!
//! Maps terminal key presses to player actions. While the command line has
//! focus every key edits the line, so playback shortcuts never fire while
//! the user is typing.

use crate::error::{CliError, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Volume change per `+`/`-` press
pub const VOLUME_STEP: f32 = 0.05;

/// Where key presses go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Playback shortcuts are live
    #[default]
    Normal,
    /// Keys edit the command line
    CommandLine,
}

/// Action bound to a key in normal focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TogglePlayPause,
    Next,
    Previous,
    ToggleMute,
    ToggleLoop,
    ToggleShuffle,
    VolumeUp,
    VolumeDown,
    OpenCommandLine,
    Quit,
}

/// Map a key press in normal focus to an action
///
/// Returns `None` for releases, repeats of unbound keys, and any key while
/// the command line has focus.
pub fn action_for(key: &KeyEvent, focus: Focus) -> Option<Action> {
    if key.kind != KeyEventKind::Press || focus == Focus::CommandLine {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::TogglePlayPause),
        KeyCode::Right => Some(Action::Next),
        KeyCode::Left => Some(Action::Previous),
        KeyCode::Char('m') => Some(Action::ToggleMute),
        KeyCode::Char('l') => Some(Action::ToggleLoop),
        KeyCode::Char('s') => Some(Action::ToggleShuffle),
        KeyCode::Char('+' | '=') => Some(Action::VolumeUp),
        KeyCode::Char('-') => Some(Action::VolumeDown),
        KeyCode::Char(':') => Some(Action::OpenCommandLine),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Result of feeding a key to the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEdit {
    /// Still typing
    Editing,
    /// Enter pressed; carries the typed text
    Submit(String),
    /// Escape pressed, or backspace on an empty line
    Cancel,
}

/// Single-line text input opened with `:`
#[derive(Debug, Default)]
pub struct CommandLine {
    buffer: String,
}

impl CommandLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text typed so far
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Apply a key press; submitting or cancelling empties the line
    pub fn handle_key(&mut self, key: &KeyEvent) -> LineEdit {
        if key.kind != KeyEventKind::Press {
            return LineEdit::Editing;
        }

        match key.code {
            KeyCode::Enter => LineEdit::Submit(std::mem::take(&mut self.buffer)),
            KeyCode::Esc => {
                self.buffer.clear();
                LineEdit::Cancel
            }
            KeyCode::Backspace => {
                if self.buffer.pop().is_none() {
                    LineEdit::Cancel
                } else {
                    LineEdit::Editing
                }
            }
            KeyCode::Char(c) if !c.is_control() => {
                self.buffer.push(c);
                LineEdit::Editing
            }
            _ => LineEdit::Editing,
        }
    }
}

/// Command typed on the command line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `seek <secs>`
    Seek(f64),
    /// `vol <0..1>`
    Volume(f32),
    /// `play <n>`, 1-based as shown by `harmonic list`
    Play(usize),
    /// `del`: remove the current track from the library
    Delete,
}

impl Command {
    pub fn parse(input: &str) -> Result<Self> {
        let mut words = input.split_whitespace();
        let name = words
            .next()
            .ok_or_else(|| CliError::Command("empty command".to_string()))?;
        let arg = words.next();

        if words.next().is_some() {
            return Err(CliError::Command(format!("too many arguments: {input}")));
        }

        match (name, arg) {
            ("seek", Some(arg)) => parse_number(arg).map(Command::Seek),
            ("vol" | "volume", Some(arg)) => parse_number(arg).map(|v| Command::Volume(v as f32)),
            ("play", Some(arg)) => match arg.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(Command::Play(n)),
                _ => Err(CliError::Command(format!("not a track number: {arg}"))),
            },
            ("del" | "delete", None) => Ok(Command::Delete),
            ("seek" | "vol" | "volume" | "play", None) => {
                Err(CliError::Command(format!("{name} needs an argument")))
            }
            _ => Err(CliError::Command(format!("unknown command: {input}"))),
        }
    }
}

fn parse_number(arg: &str) -> Result<f64> {
    arg.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CliError::Command(format!("not a number: {arg}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn transport_keys_in_normal_focus() {
        assert_eq!(
            action_for(&press(KeyCode::Char(' ')), Focus::Normal),
            Some(Action::TogglePlayPause)
        );
        assert_eq!(action_for(&press(KeyCode::Right), Focus::Normal), Some(Action::Next));
        assert_eq!(
            action_for(&press(KeyCode::Left), Focus::Normal),
            Some(Action::Previous)
        );
        assert_eq!(
            action_for(&press(KeyCode::Char('m')), Focus::Normal),
            Some(Action::ToggleMute)
        );
        assert_eq!(action_for(&press(KeyCode::Char('x')), Focus::Normal), None);
    }

    #[test]
    fn shortcuts_are_suppressed_while_typing() {
        for code in [
            KeyCode::Char(' '),
            KeyCode::Right,
            KeyCode::Left,
            KeyCode::Char('q'),
        ] {
            assert_eq!(action_for(&press(code), Focus::CommandLine), None);
        }
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(action_for(&release, Focus::Normal), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(&key, Focus::Normal), Some(Action::Quit));
    }

    #[test]
    fn command_line_collects_and_submits() {
        let mut line = CommandLine::new();
        for c in "seek 42".chars() {
            assert_eq!(line.handle_key(&press(KeyCode::Char(c))), LineEdit::Editing);
        }
        assert_eq!(line.text(), "seek 42");

        assert_eq!(
            line.handle_key(&press(KeyCode::Enter)),
            LineEdit::Submit("seek 42".to_string())
        );
        assert_eq!(line.text(), "");
    }

    #[test]
    fn command_line_cancels() {
        let mut line = CommandLine::new();
        line.handle_key(&press(KeyCode::Char('v')));
        assert_eq!(line.handle_key(&press(KeyCode::Esc)), LineEdit::Cancel);
        assert_eq!(line.text(), "");

        line.handle_key(&press(KeyCode::Char('v')));
        assert_eq!(line.handle_key(&press(KeyCode::Backspace)), LineEdit::Editing);
        assert_eq!(line.handle_key(&press(KeyCode::Backspace)), LineEdit::Cancel);
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("seek 12.5").unwrap(), Command::Seek(12.5));
        assert_eq!(Command::parse(" vol 0.3 ").unwrap(), Command::Volume(0.3));
        assert_eq!(Command::parse("play 2").unwrap(), Command::Play(2));
        assert_eq!(Command::parse("del").unwrap(), Command::Delete);
    }

    #[test]
    fn rejects_bad_commands() {
        for input in ["", "seek", "seek abc", "seek inf", "play 0", "play -1", "jump 3", "vol 1 2"] {
            assert!(
                matches!(Command::parse(input), Err(CliError::Command(_))),
                "accepted {input:?}"
            );
        }
    }
}
