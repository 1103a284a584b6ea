//! Terminal front end for the chat engine.
//!
//! This module provides the pieces of the `teletype-chat` REPL that sit
//! outside the engine:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`commands`]: Slash command parsing

mod commands;
mod config;

pub use commands::{ChatCommand, PromptLine, classify_line, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig, DEFAULT_PROMPT, DEFAULT_WELCOME};
