//! Interactive terminal player
//!
//! The player owns the controller and is the only task that touches it.
//! Key presses arrive from a reader thread and device events from the
//! output device; both are handled one at a time on the same task.

use crate::error::{CliError, Result};
use crate::keys::{action_for, Action, Command, CommandLine, Focus, LineEdit, VOLUME_STEP};
use crate::render::{prompt_line, status_line};
use crossterm::event::{self, Event, KeyEvent};
use crossterm::style::Print;
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue};
use harmonic_playback::{
    DeviceEventReceiver, PlayStatus, PlaybackController, PlaybackSnapshot, Subscription,
};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Whether the loop keeps running after an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// What observers have pushed since the last draw
#[derive(Default)]
struct Screen {
    snapshot: Option<PlaybackSnapshot>,
    messages: Vec<String>,
}

type SharedScreen = Arc<Mutex<Screen>>;

fn lock(screen: &SharedScreen) -> MutexGuard<'_, Screen> {
    screen.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct Player {
    controller: PlaybackController,
    focus: Focus,
    line: CommandLine,
    screen: SharedScreen,
    subscriptions: Vec<Subscription>,
}

impl Player {
    pub fn new(controller: PlaybackController) -> Self {
        let screen = SharedScreen::default();

        let snapshots = screen.clone();
        let on_snapshot = controller.subscribe(move |snapshot| {
            lock(&snapshots).snapshot = Some(snapshot.clone());
        });

        let notices = screen.clone();
        let on_notice = controller.subscribe_notices(move |notice| {
            lock(&notices).messages.push(notice.to_string());
        });

        Self {
            controller,
            focus: Focus::Normal,
            line: CommandLine::new(),
            screen,
            subscriptions: vec![on_snapshot, on_notice],
        }
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Messages queued for display since the last call
    pub fn take_messages(&self) -> Vec<String> {
        std::mem::take(&mut lock(&self.screen).messages)
    }

    fn message(&self, text: impl Into<String>) {
        lock(&self.screen).messages.push(text.into());
    }

    /// Route a key press to the command line or to a playback action
    pub async fn handle_key(&mut self, key: &KeyEvent) -> Flow {
        if self.focus == Focus::CommandLine {
            match self.line.handle_key(key) {
                LineEdit::Editing => {}
                LineEdit::Cancel => self.focus = Focus::Normal,
                LineEdit::Submit(text) => {
                    self.focus = Focus::Normal;
                    if let Err(err) = self.run_command(&text).await {
                        self.message(err.to_string());
                    }
                }
            }
            return Flow::Continue;
        }

        match action_for(key, self.focus) {
            Some(action) => self.apply(action),
            None => Flow::Continue,
        }
    }

    pub fn apply(&mut self, action: Action) -> Flow {
        debug!("Key action {:?}", action);

        match action {
            Action::TogglePlayPause => {
                let status = self.controller.toggle_play_pause();
                self.report(&status);
            }
            Action::Next => {
                let status = self.controller.next();
                self.report(&status);
            }
            Action::Previous => {
                let status = self.controller.previous();
                self.report(&status);
            }
            Action::ToggleMute => self.controller.toggle_mute(),
            Action::ToggleLoop => self.controller.toggle_loop(),
            Action::ToggleShuffle => self.controller.toggle_shuffle(),
            Action::VolumeUp => {
                let level = self.controller.volume().level() + VOLUME_STEP;
                self.controller.set_volume(level);
            }
            Action::VolumeDown => {
                let level = self.controller.volume().level() - VOLUME_STEP;
                self.controller.set_volume(level);
            }
            Action::OpenCommandLine => self.focus = Focus::CommandLine,
            Action::Quit => return Flow::Quit,
        }

        Flow::Continue
    }

    /// Execute a command-line entry
    pub async fn run_command(&mut self, input: &str) -> Result<()> {
        match Command::parse(input)? {
            Command::Seek(seconds) => self.controller.seek(seconds),
            Command::Volume(level) => self.controller.set_volume(level),
            Command::Play(number) => {
                let status = self.controller.play_at_index(number - 1);
                if status == PlayStatus::Ignored {
                    return Err(CliError::Command(format!("no track {number}")));
                }
                self.report(&status);
            }
            Command::Delete => {
                let Some(id) = self.controller.current_track().map(|track| track.id.clone())
                else {
                    return Err(CliError::Command("no track loaded".to_string()));
                };

                match self.controller.remove_track(&id).await {
                    Ok(Some(track)) => self.message(format!("Removed {}", track.title)),
                    Ok(None) => {}
                    // Raised as a storage notice already
                    Err(err) => debug!("Delete failed: {}", err),
                }
            }
        }
        Ok(())
    }

    fn report(&self, status: &PlayStatus) {
        if *status == PlayStatus::EndOfQueue {
            self.message("End of queue");
        }
    }

    /// Take over the terminal until the user quits
    pub async fn run(mut self, mut device_events: DeviceEventReceiver) -> Result<()> {
        let _raw = RawMode::enable()?;
        let (key_tx, mut key_rx) = mpsc::unbounded_channel();
        spawn_key_reader(key_tx)?;

        let mut out = io::stdout();
        self.draw(&mut out)?;

        loop {
            tokio::select! {
                Some(event) = device_events.recv() => {
                    self.controller.handle_device_event(event);
                }
                key = key_rx.recv() => {
                    let Some(key) = key else { break };
                    if self.handle_key(&key).await == Flow::Quit {
                        break;
                    }
                }
            }
            self.draw(&mut out)?;
        }

        for subscription in &self.subscriptions {
            subscription.unsubscribe();
        }
        self.controller.pause();
        execute!(out, Print("\r\n"))?;
        Ok(())
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        let (snapshot, messages) = {
            let mut screen = lock(&self.screen);
            (screen.snapshot.take(), std::mem::take(&mut screen.messages))
        };
        let snapshot = snapshot.unwrap_or_else(|| self.controller.snapshot());

        for message in messages {
            queue!(
                out,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine),
                Print(message),
                Print("\r\n")
            )?;
        }

        let line = prompt_line(self.focus, self.line.text())
            .unwrap_or_else(|| status_line(&snapshot));
        let width = terminal::size().map_or(80, |(columns, _)| usize::from(columns));
        let line: String = line.chars().take(width.saturating_sub(1)).collect();

        queue!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print(line)
        )?;
        out.flush()
    }
}

/// Raw mode for the lifetime of the guard
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            warn!("Could not restore terminal: {}", err);
        }
    }
}

fn spawn_key_reader(keys: mpsc::UnboundedSender<KeyEvent>) -> io::Result<()> {
    // The thread stays blocked in `read` after the player exits; process
    // exit reclaims it.
    std::thread::Builder::new()
        .name("harmonic-keys".to_string())
        .spawn(move || loop {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if keys.send(key).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    warn!("Terminal input failed: {}", err);
                    break;
                }
            }
        })?;
    Ok(())
}
