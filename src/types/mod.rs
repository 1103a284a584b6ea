// Public modules
pub mod chat_request;
pub mod chat_turn;
pub mod reply;
pub mod session_identity;
pub mod session_status;
pub mod transcript_entry;

// Re-exports
pub use chat_request::ChatRequest;
pub use chat_turn::{ChatTurn, TurnRole};
pub use reply::{NO_RESPONSE_FALLBACK, Reply, ReplyKind};
pub use session_identity::SessionIdentity;
pub use session_status::SessionStatus;
pub use transcript_entry::{EntryContent, Segment, TranscriptEntry};
