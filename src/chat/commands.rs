//! Slash command parsing for the chat application.
//!
//! Input starting with `/` controls the terminal and is never sent to the
//! chat endpoint.

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Show or hide the memory notice.
    Notice(bool),

    /// Display the turn history.
    Turns,

    /// Display the session identity.
    WhoAmI,

    /// Display session statistics.
    Stats,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command,
/// or `None` if it should be submitted as a message.
///
/// # Examples
///
/// ```
/// # use teletype::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/notice off").is_some());
/// assert!(parse_command("tell me about yourself").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    let rest = input.strip_prefix('/')?;
    let mut parts = rest.splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        "stats" | "status" => ChatCommand::Stats,
        "turns" | "history" => ChatCommand::Turns,
        "whoami" => ChatCommand::WhoAmI,
        "notice" => match argument {
            None => ChatCommand::Notice(true),
            Some(arg) => match parse_on_off(arg) {
                Some(show) => ChatCommand::Notice(show),
                None => ChatCommand::Invalid("/notice expects 'on' or 'off'".to_string()),
            },
        },
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn parse_on_off(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" | "show" => Some(true),
        "off" | "false" | "no" | "hide" => Some(false),
        _ => None,
    }
}

/// What a line read at the prompt asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptLine<'a> {
    /// Nothing but whitespace.
    Blank,

    /// A slash command.
    Command(ChatCommand),

    /// A message to submit, exactly as typed.
    Message(&'a str),
}

/// Classifies a prompt line.
///
/// Trimming is only used to detect blank lines and commands; a message keeps
/// its surrounding whitespace.
pub fn classify_line(line: &str) -> PromptLine<'_> {
    if line.trim().is_empty() {
        PromptLine::Blank
    } else if let Some(command) = parse_command(line) {
        PromptLine::Command(command)
    } else {
        PromptLine::Message(line)
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /notice [on|off]       Show (default) or hide the memory notice
  /turns                 Show the conversation turns sent so far
  /whoami                Show the session identity
  /stats                 Show session statistics
  /help                  Show this help message
  /quit                  Exit the chat"#
}
