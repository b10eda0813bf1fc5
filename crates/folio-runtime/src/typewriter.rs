//! Character-by-character terminal reveal.
//!
//! The machine only changes state when its owner reports that the delay it
//! asked for has elapsed, so it can be driven by any timer source.

use std::time::Duration;

use tracing::{debug, trace};

/// Prompt written when typing starts.
pub const PROMPT: &str = "$ ";

/// Marker written after each command's pause.
pub const PROMPT_MARKER: &str = "\n$ ";

/// Position of the typewriter in its command list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypewriterState {
    #[default]
    Idle,
    /// Waiting to type character `char_index` of command `command`.
    TypingChar { command: usize, char_index: usize },
    /// Command `command` is fully typed; waiting to write the next prompt.
    PausingBetweenCommands { command: usize },
    Done,
}

/// Typewriter process over a fixed, ordered command list.
#[derive(Debug, Clone)]
pub struct Typewriter {
    commands: Vec<Vec<char>>,
    char_delay: Duration,
    command_pause: Duration,
    buffer: String,
    state: TypewriterState,
}

impl Typewriter {
    pub fn new<I, S>(commands: I, char_delay: Duration, command_pause: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            commands: commands
                .into_iter()
                .map(|c| c.as_ref().chars().collect())
                .collect(),
            char_delay,
            command_pause,
            buffer: String::new(),
            state: TypewriterState::Idle,
        }
    }

    pub fn state(&self) -> TypewriterState {
        self.state
    }

    /// Text typed so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Between start and completion.
    pub fn is_typing(&self) -> bool {
        matches!(
            self.state,
            TypewriterState::TypingChar { .. } | TypewriterState::PausingBetweenCommands { .. }
        )
    }

    pub fn is_done(&self) -> bool {
        self.state == TypewriterState::Done
    }

    /// Write the initial prompt and begin the first command.
    ///
    /// Returns the delay until [`Typewriter::step`] is due, or `None` when
    /// there is nothing to type. Starting a machine that is not idle does
    /// nothing and returns `None`.
    pub fn start(&mut self) -> Option<Duration> {
        if self.state != TypewriterState::Idle {
            return None;
        }
        self.buffer.push_str(PROMPT);
        debug!(commands = self.commands.len(), "typewriter started");
        self.enter_command(0)
    }

    /// Perform the action that was due and return the delay to the next one.
    pub fn step(&mut self) -> Option<Duration> {
        match self.state {
            TypewriterState::Idle | TypewriterState::Done => None,
            TypewriterState::TypingChar {
                command,
                char_index,
            } => {
                let chars = &self.commands[command];
                self.buffer.push(chars[char_index]);
                trace!(command, char_index, "typed");
                if char_index + 1 < chars.len() {
                    self.state = TypewriterState::TypingChar {
                        command,
                        char_index: char_index + 1,
                    };
                    Some(self.char_delay)
                } else {
                    self.state = TypewriterState::PausingBetweenCommands { command };
                    Some(self.command_pause)
                }
            }
            TypewriterState::PausingBetweenCommands { command } => {
                self.buffer.push_str(PROMPT_MARKER);
                self.enter_command(command + 1)
            }
        }
    }

    fn enter_command(&mut self, command: usize) -> Option<Duration> {
        match self.commands.get(command) {
            None => {
                debug!("typewriter done");
                self.state = TypewriterState::Done;
                None
            }
            Some(chars) if chars.is_empty() => {
                self.state = TypewriterState::PausingBetweenCommands { command };
                Some(self.command_pause)
            }
            Some(_) => {
                self.state = TypewriterState::TypingChar {
                    command,
                    char_index: 0,
                };
                Some(self.char_delay)
            }
        }
    }
}
