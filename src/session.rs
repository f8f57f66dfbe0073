// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::{BufRead, Write};
use std::str::FromStr;

use colored::Colorize;
use console::Emoji;
use rand::Rng;
use rand::rngs::StdRng;

use crate::episode::{Episode, format_duration, truncate_title};
use crate::error::SessionError;
use crate::player::{EndedAction, PlayerStore, handle_episode_ended};

static PLAYING: Emoji<'_, '_> = Emoji("▶️  ", "> ");
static PAUSED: Emoji<'_, '_> = Emoji("⏸️  ", "|| ");
static LOOP: Emoji<'_, '_> = Emoji("🔁 ", "[loop] ");
static SHUFFLE: Emoji<'_, '_> = Emoji("🔀 ", "[shuffle] ");

const HELP: &str = "\
Commands:
  play [N]      play the library from episode N (default 1)
  toggle, p     play/pause
  pause         pause
  resume        resume
  next, n       next episode
  prev, b       previous episode
  loop, l       toggle loop mode
  shuffle, s    toggle shuffle mode
  ended, e      the current episode finished playing
  clear         empty the queue
  status        show the player state
  queue, q      list the queue
  help, h       this help
  quit, exit    leave the player";

/// A single user command typed into the player prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Load the library into the queue, starting at a 0-based position
    Play(usize),
    Toggle,
    Pause,
    Resume,
    Next,
    Previous,
    Loop,
    Shuffle,
    Ended,
    Clear,
    Status,
    Queue,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = SessionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or("").to_lowercase();
        let arg = words.next();

        let command = match name.as_str() {
            "play" => match arg {
                None => Command::Play(0),
                Some(n) => parse_episode_number(n)
                    .map(Command::Play)
                    .ok_or_else(|| SessionError::InvalidEpisodeNumber(n.to_string()))?,
            },
            "toggle" | "p" => Command::Toggle,
            "pause" => Command::Pause,
            "resume" => Command::Resume,
            "next" | "n" => Command::Next,
            "prev" | "previous" | "b" => Command::Previous,
            "loop" | "l" => Command::Loop,
            "shuffle" | "s" => Command::Shuffle,
            "ended" | "e" => Command::Ended,
            "clear" => Command::Clear,
            "status" => Command::Status,
            "queue" | "q" => Command::Queue,
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(SessionError::UnknownCommand(line.trim().to_string())),
        };

        Ok(command)
    }
}

/// Turn a 1-based episode number as typed by the user into a queue index
pub fn parse_episode_number(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()?.checked_sub(1)
}

/// Whether the session keeps reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive player session.
///
/// Owns the session's only [`PlayerStore`] and the library of episodes the
/// user can start playing from. Each command is applied synchronously and the
/// resulting state is rendered before the next prompt.
pub struct Session<R = StdRng> {
    store: PlayerStore<R>,
    library: Vec<Episode>,
}

impl<R: Rng> Session<R> {
    pub fn new(store: PlayerStore<R>, library: Vec<Episode>) -> Self {
        Self { store, library }
    }

    pub fn store(&self) -> &PlayerStore<R> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PlayerStore<R> {
        &mut self.store
    }

    /// Read commands until `quit` or end of input
    ///
    /// Invalid commands are reported and skipped; only I/O failures end the
    /// session early.
    pub fn run<I: BufRead, W: Write>(&mut self, input: I, out: &mut W) -> Result<(), SessionError> {
        write_status(&self.store, out)?;

        let mut lines = input.lines();
        loop {
            write!(out, "{} ", ">".bold().magenta())?;
            out.flush()?;

            let Some(line) = lines.next().transpose()? else {
                writeln!(out)?;
                break;
            };

            if line.trim().is_empty() {
                continue;
            }

            let result = match line.parse::<Command>() {
                Ok(command) => self.execute(command, out),
                Err(e) => Err(e),
            };

            match result {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(SessionError::Io(e)) => return Err(SessionError::Io(e)),
                Err(e) => {
                    tracing::warn!(error = %e, "command rejected");
                    writeln!(out, "{}", e.to_string().red())?;
                }
            }
        }

        Ok(())
    }

    /// Apply one command to the store and render the outcome
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow, SessionError> {
        tracing::debug!(?command, "executing");

        match command {
            Command::Play(start) => {
                self.store.play_list(self.library.clone(), start)?;
            }
            Command::Toggle => self.store.toggle_play(),
            Command::Pause => self.store.set_playing_state(false),
            Command::Resume => self.store.set_playing_state(true),
            Command::Next => {
                if !self.store.has_next() {
                    writeln!(out, "{}", "No next episode".yellow())?;
                }
                self.store.play_next();
            }
            Command::Previous => {
                if !self.store.has_previous() {
                    writeln!(out, "{}", "No previous episode".yellow())?;
                }
                self.store.play_previous();
            }
            Command::Loop => self.store.toggle_loop(),
            Command::Shuffle => self.store.toggle_shuffle(),
            Command::Ended => match handle_episode_ended(&mut self.store) {
                EndedAction::Restart => writeln!(out, "{}", "Restarting episode".dimmed())?,
                EndedAction::Advanced { index } => {
                    writeln!(out, "{}", format!("Up next: #{}", index + 1).dimmed())?
                }
                EndedAction::Cleared => writeln!(out, "{}", "Queue finished".dimmed())?,
                EndedAction::Idle => {}
            },
            Command::Clear => self.store.clear_player_state(),
            Command::Status => {}
            Command::Queue => {
                write_queue(&self.store, out)?;
                return Ok(Flow::Continue);
            }
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        }

        write_status(&self.store, out)?;
        Ok(Flow::Continue)
    }
}

/// Render the current episode and transport flags on one line
pub fn write_status<R: Rng, W: Write>(store: &PlayerStore<R>, out: &mut W) -> std::io::Result<()> {
    let Some(episode) = store.current_episode() else {
        return writeln!(out, "{}", "Nothing playing".dimmed());
    };

    let icon = if store.is_playing() { &PLAYING } else { &PAUSED };
    let mut modes = String::new();
    if store.is_looping() {
        modes.push_str(&LOOP.to_string());
    }
    if store.is_shuffling() {
        modes.push_str(&SHUFFLE.to_string());
    }

    writeln!(
        out,
        "{}[{}/{}] {} - {} ({}) {}",
        icon,
        (store.current_index() + 1).to_string().cyan(),
        store.queue().len().to_string().cyan(),
        truncate_title(&episode.title, 50).bold(),
        episode.members.dimmed(),
        format_duration(episode.duration),
        modes
    )
}

/// Render the queue, marking the current episode
pub fn write_queue<R: Rng, W: Write>(store: &PlayerStore<R>, out: &mut W) -> std::io::Result<()> {
    if store.queue().is_empty() {
        return writeln!(out, "{}", "Queue is empty".dimmed());
    }

    for (index, episode) in store.queue().iter().enumerate() {
        let marker = if index == store.current_index() { "*" } else { " " };
        writeln!(
            out,
            "{} {:>2}. {} ({})",
            marker.green(),
            index + 1,
            truncate_title(&episode.title, 60),
            format_duration(episode.duration)
        )?;
    }

    Ok(())
}
