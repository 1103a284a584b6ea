//! The chat engine: one submission cycle, end to end.
//!
//! [`ChatEngine`] is the root object.  It owns the session state, the
//! session identity, the exchange collaborator and the typewriter.  A cycle
//! runs submit → exchange → reveal → idle, and only one cycle can run at a
//! time because the session rejects submissions while busy.

use crate::client::Exchange;
use crate::error::Result;
use crate::render::{TranscriptView, present};
use crate::session::SessionState;
use crate::typewriter::Typewriter;
use crate::types::{Reply, SessionIdentity, SessionStatus};

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The text was blank or a submission was already in flight.
    Rejected,

    /// The cycle ran to completion.
    Completed {
        /// The reply that was typed out.
        reply: Reply,
        /// Number of reveal ticks.
        ticks: usize,
    },
}

/// Snapshot of session statistics.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The session identity token.
    pub identity: SessionIdentity,
    /// The current status.
    pub status: SessionStatus,
    /// The number of transcript entries.
    pub transcript_len: usize,
    /// The number of recorded turns.
    pub turn_count: usize,
}

/// Drives a session against an exchange collaborator.
pub struct ChatEngine<E: Exchange> {
    session: SessionState,
    identity: SessionIdentity,
    exchange: E,
    typewriter: Typewriter,
}

impl<E: Exchange> ChatEngine<E> {
    /// Creates an engine with a freshly generated session identity.
    pub fn new(exchange: E, typewriter: Typewriter) -> Self {
        Self::with_identity(exchange, typewriter, SessionIdentity::generate())
    }

    /// Creates an engine with a given session identity.
    pub fn with_identity(exchange: E, typewriter: Typewriter, identity: SessionIdentity) -> Self {
        Self {
            session: SessionState::new(),
            identity,
            exchange,
            typewriter,
        }
    }

    /// Seeds the transcript with a welcome banner.
    pub fn with_welcome(mut self, text: impl Into<String>) -> Self {
        self.session.push_system(text);
        self
    }

    /// Returns the session identity.
    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    /// Returns the session state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Returns the exchange collaborator.
    pub fn exchange(&self) -> &E {
        &self.exchange
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            identity: self.identity.clone(),
            status: self.session.status(),
            transcript_len: self.session.transcript().len(),
            turn_count: self.session.turns().len(),
        }
    }

    /// Shows everything recorded so far and focuses input.
    pub fn mount(&mut self, view: &mut dyn TranscriptView) {
        present(view, &mut self.session);
        view.focus_input();
    }

    /// Handles a click anywhere on the terminal surface.
    pub fn surface_clicked(&self, view: &mut dyn TranscriptView) {
        view.focus_input();
    }

    /// Replaces the input buffer.  Ignored while a submission is in flight.
    pub fn set_input(&mut self, text: impl Into<String>, view: &mut dyn TranscriptView) {
        self.session.set_input(text);
        present(view, &mut self.session);
    }

    /// Submits the input buffer.
    pub async fn submit_input(&mut self, view: &mut dyn TranscriptView) -> Result<SubmitOutcome> {
        let text = self.session.input().to_string();
        self.submit(&text, view).await
    }

    /// Runs one submission cycle for `text`.
    ///
    /// Blank text, or text submitted while busy, is rejected without any
    /// change.  Otherwise the user entry reaches the view before the
    /// exchange starts, the reply is typed out, and input is focused once the
    /// session is idle again.  Failed exchanges are shown but not recorded in
    /// the turn history.
    ///
    /// # Errors
    ///
    /// Returns an error only if the session refuses a status transition,
    /// which indicates a bug rather than a user-facing condition.
    pub async fn submit(
        &mut self,
        text: &str,
        view: &mut dyn TranscriptView,
    ) -> Result<SubmitOutcome> {
        if !self.session.submit(text) {
            return Ok(SubmitOutcome::Rejected);
        }
        present(view, &mut self.session);

        let reply = self.exchange.exchange(text, &self.identity).await;
        if !reply.is_failure() {
            self.session.record_reply(text, &reply.text);
        }

        let ticks = self
            .typewriter
            .play(&mut self.session, &reply.text, view)
            .await?;
        view.focus_input();
        Ok(SubmitOutcome::Completed { reply, ticks })
    }
}
