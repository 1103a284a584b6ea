//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.  The endpoint is not resolved
//! here: when neither `--endpoint` nor the config names one, the client
//! falls back to the `TELETYPE_ENDPOINT` environment variable.

use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::notice::{DEFAULT_AUTO_HIDE, DEFAULT_NOTICE};
use crate::typewriter::DEFAULT_CADENCE;

/// Default prompt shown before the input caret.
pub const DEFAULT_PROMPT: &str = "chat@teletype:~$ ";

/// Default welcome banner.
pub const DEFAULT_WELCOME: &str = "✨ Welcome to teletype\nAsk me anything.";

/// Command-line arguments for the teletype-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Chat endpoint URL.
    #[arrrg(optional, "Chat endpoint URL (default: $TELETYPE_ENDPOINT)", "URL")]
    pub endpoint: Option<String>,

    /// Milliseconds between typed characters.
    #[arrrg(optional, "Milliseconds per typed character (default: 20)", "MS")]
    pub cadence_ms: Option<u64>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Do not show the memory notice at startup.
    #[arrrg(flag, "Do not show the memory notice at startup")]
    pub no_notice: bool,

    /// Log every exchange to stderr.
    #[arrrg(flag, "Log requests and replies to stderr")]
    pub verbose: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Chat endpoint URL; `None` defers to the environment.
    pub endpoint: Option<String>,

    /// Time between typed characters.
    pub cadence: Duration,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Banner seeded into the transcript, if any.
    pub welcome: Option<String>,

    /// Memory notice shown at startup, if any.
    pub notice: Option<String>,

    /// Delay before the notice hides itself.
    pub notice_auto_hide: Duration,

    /// Prompt shown before the input caret.
    pub prompt: String,

    /// Whether to log exchanges to stderr.
    pub verbose: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Endpoint: from the environment
    /// - Cadence: 20ms
    /// - Color: enabled
    /// - Welcome banner and memory notice: shown
    pub fn new() -> Self {
        Self {
            endpoint: None,
            cadence: DEFAULT_CADENCE,
            use_color: true,
            welcome: Some(DEFAULT_WELCOME.to_string()),
            notice: Some(DEFAULT_NOTICE.to_string()),
            notice_auto_hide: DEFAULT_AUTO_HIDE,
            prompt: DEFAULT_PROMPT.to_string(),
            verbose: false,
        }
    }

    /// Sets the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the time between typed characters.
    pub fn with_cadence(mut self, cadence: Duration) -> Self {
        self.cadence = cadence;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Sets or clears the welcome banner.
    pub fn with_welcome(mut self, welcome: Option<String>) -> Self {
        self.welcome = welcome;
        self
    }

    /// Sets or clears the memory notice.
    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        self.notice = notice;
        self
    }

    /// Sets the notice auto-hide delay.
    pub fn with_notice_auto_hide(mut self, delay: Duration) -> Self {
        self.notice_auto_hide = delay;
        self
    }

    /// Sets the prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let defaults = ChatConfig::new();
        ChatConfig {
            endpoint: args.endpoint,
            cadence: args
                .cadence_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_CADENCE),
            use_color: !args.no_color,
            notice: if args.no_notice { None } else { defaults.notice.clone() },
            verbose: args.verbose,
            ..defaults
        }
    }
}
