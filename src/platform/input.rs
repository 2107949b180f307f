//! Keyboard commands and the per-tick input queue

use crate::sim::{Direction, TickInput};

/// Player command decoded from a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Pause,
    Quit,
    Restart,
}

impl Command {
    /// Map a key name to a command. Unknown keys map to `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        let command = match key {
            "ArrowUp" | "Up" | "w" | "W" => Command::Turn(Direction::Up),
            "ArrowDown" | "Down" | "s" | "S" => Command::Turn(Direction::Down),
            "ArrowLeft" | "Left" | "a" | "A" => Command::Turn(Direction::Left),
            "ArrowRight" | "Right" | "d" | "D" => Command::Turn(Direction::Right),
            "p" | "P" | " " | "Space" => Command::Pause,
            "Escape" | "Esc" | "q" | "Q" => Command::Quit,
            "r" | "R" => Command::Restart,
            _ => return None,
        };
        Some(command)
    }

    /// Parse a word from a scripted command list (`up`, `pause`, `quit`, ...)
    pub fn from_word(word: &str) -> Option<Self> {
        match word.trim().to_ascii_lowercase().as_str() {
            "up" => Some(Command::Turn(Direction::Up)),
            "down" => Some(Command::Turn(Direction::Down)),
            "left" => Some(Command::Turn(Direction::Left)),
            "right" => Some(Command::Turn(Direction::Right)),
            "pause" => Some(Command::Pause),
            "quit" => Some(Command::Quit),
            "restart" => Some(Command::Restart),
            other => Self::from_key(other),
        }
    }
}

/// Commands received between two ticks
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<Command>,
    quit: bool,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        if command == Command::Quit {
            self.quit = true;
        }
        self.pending.push(command);
    }

    /// Quit was requested at some point since the queue was created
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Collapse queued commands into the input for one tick.
    ///
    /// Directions keep arrival order. Two pause presses cancel out.
    pub fn drain(&mut self) -> TickInput {
        let mut input = TickInput::default();
        for command in self.pending.drain(..) {
            match command {
                Command::Turn(direction) => input.directions.push(direction),
                Command::Pause => input.pause = !input.pause,
                Command::Restart => input.restart = true,
                Command::Quit => {}
            }
        }
        input
    }
}
