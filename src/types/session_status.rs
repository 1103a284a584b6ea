use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the session is in its submit/reply/reveal cycle.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Ready for input.
    #[default]
    Idle,

    /// A submission is waiting on the remote endpoint.
    AwaitingReply,

    /// A reply is being typed into the transcript.
    Streaming,
}

impl SessionStatus {
    /// Returns true if the state machine allows moving from `self` to `next`.
    ///
    /// `AwaitingReply -> Idle` exists only for replies that are empty and so
    /// never start streaming.
    pub fn can_transition_to(self, next: SessionStatus) -> bool {
        matches!(
            (self, next),
            (SessionStatus::Idle, SessionStatus::AwaitingReply)
                | (SessionStatus::AwaitingReply, SessionStatus::Streaming)
                | (SessionStatus::AwaitingReply, SessionStatus::Idle)
                | (SessionStatus::Streaming, SessionStatus::Idle)
        )
    }

    /// Returns the lowercase name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::AwaitingReply => "awaiting_reply",
            SessionStatus::Streaming => "streaming",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
