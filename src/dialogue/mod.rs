//! Per-user conversation state machine

/// Message classification: commands, text, menu buttons
pub mod input;
/// Transition function and reply model
pub mod machine;
/// Conversation stages and poll data
pub mod state;

pub use input::{Command, Input, MenuAction};
pub use machine::{FlowError, InputError, Keyboard, Machine, Reply, Transition};
pub use state::{Poll, PollDraft, State};
