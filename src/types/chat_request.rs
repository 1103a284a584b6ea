use serde::{Deserialize, Serialize};

use crate::types::SessionIdentity;

/// Body of the single POST sent per submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The submitted text.
    pub message: String,

    /// The session identity token.
    pub sender: String,
}

impl ChatRequest {
    /// Builds a request for `message` on behalf of `session`.
    pub fn new(message: impl Into<String>, session: &SessionIdentity) -> Self {
        Self {
            message: message.into(),
            sender: session.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape() {
        let request = ChatRequest::new("ping", &SessionIdentity::new("user-123"));
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"message":"ping","sender":"user-123"}"#);
    }
}
