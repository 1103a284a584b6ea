use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

const TOKEN_PREFIX: &str = "user-";
const TOKEN_LEN: usize = 12;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque per-process token that lets the remote side correlate turns.
///
/// Created once when the engine starts; never rotated and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionIdentity(String);

impl SessionIdentity {
    /// Generates a fresh `user-xxxxxxxxxxxx` token.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..TOKEN_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        Self(format!("{TOKEN_PREFIX}{suffix}"))
    }

    /// Wraps an existing token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_token_shape() {
        let id = SessionIdentity::generate();
        let token = id.as_str();
        assert!(token.starts_with("user-"));
        let suffix = &token[TOKEN_PREFIX.len()..];
        assert_eq!(suffix.len(), 12);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[test]
    fn generated_tokens_differ() {
        assert_ne!(SessionIdentity::generate(), SessionIdentity::generate());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = SessionIdentity::new("user-abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"user-abc\"");
        assert_eq!(id.to_string(), "user-abc");
    }
}
