//! Session state: the single source of truth for the terminal.
//!
//! `SessionState` owns the transcript, the turn history, the live input
//! buffer and the status.  Every mutation queues a [`SessionEvent`]; whoever
//! drives the session drains them with [`SessionState::drain_events`] and
//! forwards them to the view.
//!
//! The transcript is append-then-lock: an entry may only be changed while it
//! is the last entry and still in progress.  Finishing it locks it for good.

use std::mem;

use crate::error::{Error, Result};
use crate::observability::{SUBMISSIONS, SUBMISSIONS_REJECTED};
use crate::types::{ChatTurn, EntryContent, SessionStatus, TranscriptEntry};

/// A change to the session, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new entry was appended at `index`.
    EntryAppended {
        /// Position of the entry in the transcript.
        index: usize,
        /// The entry as appended.
        entry: TranscriptEntry,
    },

    /// The last entry, at `index`, was replaced in place.
    EntryUpdated {
        /// Position of the entry in the transcript.
        index: usize,
        /// The entry after the update.
        entry: TranscriptEntry,
    },

    /// The status moved from `from` to `to`.
    StatusChanged {
        /// Previous status.
        from: SessionStatus,
        /// New status.
        to: SessionStatus,
    },

    /// A user/assistant pair was added to the turn history.
    TurnsRecorded {
        /// Number of turns after recording.
        total: usize,
    },

    /// The input buffer changed.
    InputChanged {
        /// The new buffer contents.
        input: String,
    },
}

/// Transcript, turn history, input buffer and status of one session.
#[derive(Debug, Default)]
pub struct SessionState {
    transcript: Vec<TranscriptEntry>,
    turns: Vec<ChatTurn>,
    input: String,
    status: SessionStatus,
    events: Vec<SessionEvent>,
}

impl SessionState {
    /// Creates an empty, idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the transcript in append order.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Returns the turn history.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Returns the live input buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns true if the session accepts submissions.
    pub fn is_idle(&self) -> bool {
        self.status == SessionStatus::Idle
    }

    /// Replaces the input buffer.  Ignored unless idle.
    pub fn set_input(&mut self, text: impl Into<String>) {
        if !self.is_idle() {
            return;
        }
        self.input = text.into();
        self.events.push(SessionEvent::InputChanged {
            input: self.input.clone(),
        });
    }

    /// Submits `text`.
    ///
    /// Returns false, changing nothing, when `text` is blank or the session is
    /// busy.  Otherwise clears the input buffer, appends a user entry holding
    /// `text` as given and moves to `AwaitingReply`.
    pub fn submit(&mut self, text: &str) -> bool {
        if text.trim().is_empty() || !self.is_idle() {
            SUBMISSIONS_REJECTED.click();
            return false;
        }
        SUBMISSIONS.click();
        if !self.input.is_empty() {
            self.input.clear();
            self.events.push(SessionEvent::InputChanged {
                input: String::new(),
            });
        }
        self.append_entry(TranscriptEntry::user(text));
        self.transition(SessionStatus::AwaitingReply);
        true
    }

    /// Submits the current input buffer.
    pub fn submit_input(&mut self) -> bool {
        let text = self.input.clone();
        self.submit(&text)
    }

    /// Appends the user turn for `submitted` followed by the assistant turn
    /// for `reply`.  The transcript is untouched.
    pub fn record_reply(&mut self, submitted: &str, reply: &str) {
        self.turns.push(ChatTurn::user(submitted));
        self.turns.push(ChatTurn::assistant(reply));
        self.events.push(SessionEvent::TurnsRecorded {
            total: self.turns.len(),
        });
    }

    /// Moves to `next` if the state machine allows it.
    pub fn set_status(&mut self, next: SessionStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(Error::invalid_transition(self.status, next));
        }
        self.transition(next);
        Ok(())
    }

    /// Appends `entry` and returns its index.
    ///
    /// Appending locks whatever entry was previously last.
    pub fn append_entry(&mut self, entry: TranscriptEntry) -> usize {
        if let Some(last) = self.transcript.last_mut() {
            last.in_progress = false;
        }
        let index = self.transcript.len();
        self.transcript.push(entry.clone());
        self.events.push(SessionEvent::EntryAppended { index, entry });
        index
    }

    /// Appends a finished output-only entry, e.g. a banner.
    pub fn push_system(&mut self, text: impl Into<String>) -> usize {
        self.append_entry(TranscriptEntry::output(text))
    }

    /// Replaces the output of the in-progress last entry.
    pub fn update_last(&mut self, text: &str) -> Result<()> {
        self.replace_last(text, true)
    }

    /// Replaces the output of the in-progress last entry one final time and
    /// locks it.
    pub fn finish_last(&mut self, text: &str) -> Result<()> {
        self.replace_last(text, false)
    }

    /// Takes every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        mem::take(&mut self.events)
    }

    fn replace_last(&mut self, text: &str, in_progress: bool) -> Result<()> {
        let index = self.transcript.len().checked_sub(1);
        let Some(last) = self.transcript.last_mut() else {
            return Err(Error::entry_locked(None));
        };
        if !last.in_progress {
            return Err(Error::entry_locked(index));
        }
        last.output = Some(EntryContent::new(text));
        last.in_progress = in_progress;
        let entry = last.clone();
        self.events.push(SessionEvent::EntryUpdated {
            index: self.transcript.len() - 1,
            entry,
        });
        Ok(())
    }

    fn transition(&mut self, next: SessionStatus) {
        let from = self.status;
        self.status = next;
        self.events.push(SessionEvent::StatusChanged { from, to: next });
    }
}
