//! Logging trait for remote exchanges.
//!
//! This module provides the [`ExchangeLogger`] trait that allows users to
//! capture every request and reply passing through the
//! [`ExchangeClient`](crate::ExchangeClient).

use crate::error::Error;
use crate::types::{ChatRequest, Reply};

/// A trait for logging exchange client operations.
///
/// # Example
///
/// ```rust
/// use teletype::{ChatRequest, Error, ExchangeLogger, Reply};
///
/// struct StderrLogger;
///
/// impl ExchangeLogger for StderrLogger {
///     fn log_request(&self, request: &ChatRequest) {
///         eprintln!("-> {}", request.message);
///     }
///
///     fn log_reply(&self, reply: &Reply) {
///         eprintln!("<- {:?}: {}", reply.kind, reply.text);
///     }
///
///     fn log_failure(&self, error: &Error) {
///         eprintln!("!! {error}");
///     }
/// }
/// ```
pub trait ExchangeLogger: Send + Sync {
    /// Log the body about to be sent.
    fn log_request(&self, request: &ChatRequest);

    /// Log the normalized reply.
    ///
    /// Called once per exchange, after any failure has been folded into the
    /// reply text.
    fn log_reply(&self, reply: &Reply);

    /// Log the error behind a failed exchange.
    ///
    /// Called before [`ExchangeLogger::log_reply`] for the same exchange.
    fn log_failure(&self, error: &Error);
}
