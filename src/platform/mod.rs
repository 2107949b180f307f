//! Platform abstraction layer
//!
//! Handles the frontend side of a session:
//! - Key input mapped to commands and queued until the next tick
//! - Frame time turned into fixed simulation steps
//! - Non-blocking delays for the countdown and end-of-session pauses

pub mod input;
pub mod time;

pub use input::{Command, InputQueue};
pub use time::{Delay, DelayStatus, FixedStep};
