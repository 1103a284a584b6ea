// Public modules
pub mod chat;
pub mod client;
pub mod engine;
pub mod error;
pub mod exchange_logger;
pub mod linkify;
pub mod notice;
pub mod observability;
pub mod render;
pub mod session;
pub mod types;
pub mod typewriter;

// Re-exports
pub use client::{ENDPOINT_ENV, Exchange, ExchangeClient};
pub use engine::{ChatEngine, SessionStats, SubmitOutcome};
pub use error::{Error, Result};
pub use exchange_logger::ExchangeLogger;
pub use linkify::linkify;
pub use notice::Notice;
pub use observability::register_biometrics;
pub use render::{PlainTextRenderer, TranscriptView, present};
pub use session::{SessionEvent, SessionState};
pub use types::*;
pub use typewriter::{DEFAULT_CADENCE, RevealFrame, Typewriter};
