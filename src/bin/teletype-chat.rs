//! Interactive terminal chat against a remote chat endpoint.
//!
//! Each line typed at the prompt is posted to the endpoint and the reply is
//! typed out one character at a time.
//!
//! # Usage
//!
//! ```bash
//! # Endpoint from the environment
//! TELETYPE_ENDPOINT=https://chat.example.com/api teletype-chat
//!
//! # Explicit endpoint, faster typing
//! teletype-chat --endpoint http://localhost:3000/chat --cadence-ms 5
//!
//! # Disable colors (useful for piping output)
//! teletype-chat --no-color
//! ```
//!
//! # Commands
//!
//! - `/help` - Show available commands
//! - `/notice [on|off]` - Show or hide the memory notice
//! - `/turns` - Show the conversation turns
//! - `/whoami` - Show the session identity
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use std::sync::Arc;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use teletype::chat::{ChatArgs, ChatCommand, ChatConfig, PromptLine, classify_line, help_text};
use teletype::{
    ChatEngine, ChatRequest, Error, ExchangeClient, ExchangeLogger, Notice, PlainTextRenderer,
    Reply, TranscriptView, Typewriter,
};

/// Logs exchanges to stderr.
struct StderrLogger;

impl ExchangeLogger for StderrLogger {
    fn log_request(&self, request: &ChatRequest) {
        eprintln!(
            "[teletype] POST sender={} chars={}",
            request.sender,
            request.message.chars().count()
        );
    }

    fn log_reply(&self, reply: &Reply) {
        eprintln!(
            "[teletype] reply kind={:?} chars={}",
            reply.kind,
            reply.text.chars().count()
        );
    }

    fn log_failure(&self, error: &Error) {
        match error.status_code() {
            Some(status) => eprintln!("[teletype] failure status={}: {}", status, error),
            None => eprintln!("[teletype] failure: {}", error),
        }
    }
}

/// Main entry point for the teletype-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("teletype-chat [OPTIONS]");
    let config = ChatConfig::from(args);

    let mut client = ExchangeClient::new(config.endpoint.clone())?;
    if config.verbose {
        client = client.with_logger(Arc::new(StderrLogger));
    }
    let mut engine = ChatEngine::new(client, Typewriter::new(config.cadence));
    if let Some(welcome) = config.welcome.as_deref() {
        engine = engine.with_welcome(welcome);
    }

    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let mut notice = config
        .notice
        .as_deref()
        .map(|text| Notice::new(text, config.notice_auto_hide));
    let mut rl = DefaultEditor::new()?;

    engine.mount(&mut renderer);
    if let Some(notice) = notice.as_mut() {
        notice.show();
        renderer.print_banner(notice.text());
    }
    println!("Type /help for commands, /quit to exit\n");

    loop {
        let readline = rl.readline(&config.prompt);

        match readline {
            Ok(line) => match classify_line(&line) {
                PromptLine::Blank => {
                    engine.surface_clicked(&mut renderer);
                }
                PromptLine::Command(cmd) => {
                    let _ = rl.add_history_entry(line.trim());
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Notice(true) => match notice.as_mut() {
                            Some(notice) => {
                                notice.show();
                                renderer.print_banner(notice.text());
                            }
                            None => renderer.print_info("No notice configured."),
                        },
                        ChatCommand::Notice(false) => {
                            if let Some(notice) = notice.as_mut() {
                                notice.dismiss();
                            }
                            renderer.print_info("Notice hidden.");
                        }
                        ChatCommand::Stats => {
                            let stats = engine.stats();
                            println!("    Session Statistics:");
                            println!("      Endpoint: {}", engine.exchange().endpoint());
                            println!("      Session: {}", stats.identity);
                            println!("      Status: {}", stats.status);
                            println!("      Transcript entries: {}", stats.transcript_len);
                            println!("      Turns: {}", stats.turn_count);
                            match notice.as_ref() {
                                Some(n) if n.is_visible() => println!("      Notice: shown"),
                                Some(_) => println!("      Notice: hidden"),
                                None => println!("      Notice: (disabled)"),
                            }
                        }
                        ChatCommand::Turns => {
                            let turns = engine.session().turns();
                            if turns.is_empty() {
                                renderer.print_info("No turns yet.");
                            }
                            for turn in turns {
                                println!("    {}: {}", turn.role, turn.content);
                            }
                        }
                        ChatCommand::WhoAmI => {
                            renderer.print_info(engine.identity().as_str());
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                }
                PromptLine::Message(text) => {
                    let _ = rl.add_history_entry(text);
                    if let Err(e) = engine.submit(text, &mut renderer).await {
                        renderer.print_error(&e.to_string());
                    }
                }
            },
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}
