//! Transcript rendering and input focus.
//!
//! This module provides the [`TranscriptView`] trait the engine drives and a
//! plain-text implementation for terminals.

use std::io::{self, Stdout, Write};

use crate::session::{SessionEvent, SessionState};
use crate::types::{EntryContent, SessionStatus, TranscriptEntry};

/// ANSI escape code for dim text (used for the thinking placeholder).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for underlined text (used for links).
const ANSI_UNDERLINE: &str = "\x1b[4m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for blue text (used for links).
const ANSI_BLUE: &str = "\x1b[34m";

/// ANSI escape code for green text (used for banners).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Return to column zero and erase the line.
const ANSI_ERASE_LINE: &str = "\r\x1b[2K";

const THINKING: &str = "Thinking...";

/// A surface that displays the transcript.
///
/// Views only read: every entry they see is owned by the session.  The
/// engine guarantees entries arrive in append order, that
/// [`scroll_to_bottom`](TranscriptView::scroll_to_bottom) follows every
/// transcript change, and that [`focus_input`](TranscriptView::focus_input)
/// is called on mount, after every completed submission and when the
/// surface is clicked.
pub trait TranscriptView: Send {
    /// Called when an entry is appended.
    fn entry_appended(&mut self, index: usize, entry: &TranscriptEntry);

    /// Called when the in-progress last entry changes.
    fn entry_updated(&mut self, index: usize, entry: &TranscriptEntry);

    /// Called when the session status changes.
    ///
    /// Input should be disabled whenever `to` is not idle.
    fn status_changed(&mut self, from: SessionStatus, to: SessionStatus) {
        _ = from;
        _ = to;
    }

    /// Called when the input buffer changes.
    fn input_changed(&mut self, input: &str) {
        _ = input;
    }

    /// Bring the newest entry into view.
    fn scroll_to_bottom(&mut self) {}

    /// Give the input caret focus.
    fn focus_input(&mut self) {}

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);
}

/// Drains the session's pending events into `view`.
pub fn present(view: &mut dyn TranscriptView, session: &mut SessionState) {
    for event in session.drain_events() {
        match event {
            SessionEvent::EntryAppended { index, entry } => {
                view.entry_appended(index, &entry);
                view.scroll_to_bottom();
            }
            SessionEvent::EntryUpdated { index, entry } => {
                view.entry_updated(index, &entry);
                view.scroll_to_bottom();
            }
            SessionEvent::StatusChanged { from, to } => view.status_changed(from, to),
            SessionEvent::InputChanged { input } => view.input_changed(&input),
            SessionEvent::TurnsRecorded { .. } => {}
        }
    }
}

/// Plain text renderer with optional ANSI styling.
///
/// Streaming entries are printed incrementally: each update writes only the
/// characters not yet on screen.  Submitted input is not echoed because the
/// prompt line already shows it.
pub struct PlainTextRenderer<W: Write + Send = Stdout> {
    out: W,
    use_color: bool,
    thinking_shown: bool,
    printed: usize,
    input_enabled: bool,
}

impl PlainTextRenderer<Stdout> {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_writer(io::stdout(), use_color)
    }
}

impl<W: Write + Send> PlainTextRenderer<W> {
    /// Creates a renderer that writes to `out`.
    pub fn with_writer(out: W, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            thinking_shown: false,
            printed: 0,
            input_enabled: true,
        }
    }

    /// Returns true unless a submission is in flight.
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Consumes the renderer, returning its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints a highlighted banner, e.g. the memory notice.
    pub fn print_banner(&mut self, text: &str) {
        if self.use_color {
            let _ = writeln!(self.out, "{ANSI_GREEN}{text}{ANSI_RESET}");
        } else {
            let _ = writeln!(self.out, "{text}");
        }
        self.flush();
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }

    fn show_thinking(&mut self) {
        if self.use_color {
            let _ = write!(self.out, "{ANSI_DIM}{THINKING}{ANSI_RESET}");
        } else {
            let _ = writeln!(self.out, "{THINKING}");
        }
        self.thinking_shown = true;
        self.flush();
    }

    fn clear_thinking(&mut self) {
        if self.thinking_shown {
            if self.use_color {
                let _ = write!(self.out, "{ANSI_ERASE_LINE}");
            }
            self.thinking_shown = false;
        }
    }

    /// Writes the characters of `content` from char offset `from` onward.
    fn write_content_from(&mut self, content: &EntryContent, from: usize) {
        let mut offset = 0;
        for segment in content.segments() {
            let text = segment.as_str();
            let len = text.chars().count();
            if offset + len > from {
                let tail: String = text.chars().skip(from.saturating_sub(offset)).collect();
                if segment.is_link() && self.use_color {
                    let _ = write!(self.out, "{ANSI_BLUE}{ANSI_UNDERLINE}{tail}{ANSI_RESET}");
                } else {
                    let _ = write!(self.out, "{tail}");
                }
            }
            offset += len;
        }
        self.printed = offset.max(from);
    }

    fn write_output(&mut self, entry: &TranscriptEntry, from: usize) {
        if let Some(content) = &entry.output {
            self.write_content_from(content, from);
        }
        if !entry.in_progress {
            let _ = writeln!(self.out);
            self.printed = 0;
        }
        self.flush();
    }
}

impl Default for PlainTextRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> TranscriptView for PlainTextRenderer<W> {
    fn entry_appended(&mut self, _index: usize, entry: &TranscriptEntry) {
        if entry.output.is_none() {
            return;
        }
        self.clear_thinking();
        self.write_output(entry, 0);
    }

    fn entry_updated(&mut self, _index: usize, entry: &TranscriptEntry) {
        let from = self.printed;
        self.write_output(entry, from);
    }

    fn status_changed(&mut self, from: SessionStatus, to: SessionStatus) {
        self.input_enabled = to == SessionStatus::Idle;
        match (from, to) {
            (_, SessionStatus::AwaitingReply) => self.show_thinking(),
            (SessionStatus::AwaitingReply, SessionStatus::Idle) => {
                self.clear_thinking();
                self.flush();
            }
            _ => {}
        }
    }

    fn scroll_to_bottom(&mut self) {
        self.flush();
    }

    fn focus_input(&mut self) {
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        self.clear_thinking();
        if self.use_color {
            let _ = writeln!(self.out, "{ANSI_RED}Error: {error}{ANSI_RESET}");
        } else {
            let _ = writeln!(self.out, "Error: {error}");
        }
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        let _ = writeln!(self.out, "{info}");
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> PlainTextRenderer<Vec<u8>> {
        PlainTextRenderer::with_writer(Vec::new(), false)
    }

    fn output(renderer: PlainTextRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color);
    }

    #[test]
    fn renderer_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert!(!renderer.use_color);
    }

    #[test]
    fn streamed_entry_prints_each_char_once() {
        let mut renderer = plain();
        renderer.entry_appended(1, &TranscriptEntry::streaming("h"));
        renderer.entry_updated(1, &TranscriptEntry::streaming("he"));
        renderer.entry_updated(1, &TranscriptEntry::streaming("hel"));
        renderer.entry_updated(1, &TranscriptEntry::output("hello"));
        assert_eq!(output(renderer), "hello\n");
    }

    #[test]
    fn user_input_is_not_echoed() {
        let mut renderer = plain();
        renderer.entry_appended(0, &TranscriptEntry::user("hello"));
        assert_eq!(output(renderer), "");
    }

    #[test]
    fn thinking_placeholder_while_awaiting() {
        let mut renderer = plain();
        renderer.status_changed(SessionStatus::Idle, SessionStatus::AwaitingReply);
        assert!(!renderer.input_enabled());
        renderer.status_changed(SessionStatus::AwaitingReply, SessionStatus::Streaming);
        renderer.entry_appended(1, &TranscriptEntry::streaming("o"));
        renderer.entry_updated(1, &TranscriptEntry::output("ok"));
        renderer.status_changed(SessionStatus::Streaming, SessionStatus::Idle);
        assert!(renderer.input_enabled());
        assert_eq!(output(renderer), "Thinking...\nok\n");
    }

    #[test]
    fn colored_thinking_is_erased() {
        let mut renderer = PlainTextRenderer::with_writer(Vec::new(), true);
        renderer.status_changed(SessionStatus::Idle, SessionStatus::AwaitingReply);
        renderer.entry_appended(1, &TranscriptEntry::output("x"));
        let text = output(renderer);
        assert!(text.contains(ANSI_ERASE_LINE));
        assert!(text.ends_with("x\n"));
    }

    #[test]
    fn links_are_styled_with_color() {
        let mut renderer = PlainTextRenderer::with_writer(Vec::new(), true);
        renderer.entry_appended(0, &TranscriptEntry::output("see https://a.io"));
        let text = output(renderer);
        assert!(text.contains(&format!("{ANSI_BLUE}{ANSI_UNDERLINE}https://a.io{ANSI_RESET}")));
    }

    #[test]
    fn present_scrolls_after_transcript_changes() {
        #[derive(Default)]
        struct Calls(Vec<&'static str>);

        impl TranscriptView for Calls {
            fn entry_appended(&mut self, _: usize, _: &TranscriptEntry) {
                self.0.push("appended");
            }
            fn entry_updated(&mut self, _: usize, _: &TranscriptEntry) {
                self.0.push("updated");
            }
            fn status_changed(&mut self, _: SessionStatus, _: SessionStatus) {
                self.0.push("status");
            }
            fn scroll_to_bottom(&mut self) {
                self.0.push("scroll");
            }
            fn print_error(&mut self, _: &str) {}
            fn print_info(&mut self, _: &str) {}
        }

        let mut session = SessionState::new();
        session.submit("hi");
        let mut calls = Calls::default();
        present(&mut calls, &mut session);
        assert_eq!(calls.0, vec!["appended", "scroll", "status"]);
    }
}
