use serde::{Deserialize, Serialize};

/// Text shown when the endpoint answers without a usable `ai_response`.
pub const NO_RESPONSE_FALLBACK: &str = "No response received";

/// How a reply string came to be.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    /// The endpoint answered with an `ai_response`.
    Answer,

    /// The endpoint answered, but without a usable `ai_response`.
    Fallback,

    /// The exchange failed; the text describes the failure.
    Failure,
}

/// The normalized outcome of one exchange.
///
/// Every outcome carries display text, so the engine treats failures exactly
/// like answers when typing them into the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// The text to reveal.
    pub text: String,

    /// Where the text came from.
    pub kind: ReplyKind,
}

impl Reply {
    /// A reply carrying the endpoint's answer.
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ReplyKind::Answer,
        }
    }

    /// The literal fallback reply.
    pub fn fallback() -> Self {
        Self {
            text: NO_RESPONSE_FALLBACK.to_string(),
            kind: ReplyKind::Fallback,
        }
    }

    /// A reply describing a failed exchange.
    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ReplyKind::Failure,
        }
    }

    /// Returns true if the exchange failed.
    pub fn is_failure(&self) -> bool {
        self.kind == ReplyKind::Failure
    }
}
