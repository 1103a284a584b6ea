use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response};
use serde_json::Value;
use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

use crate::error::{Error, Result};
use crate::exchange_logger::ExchangeLogger;
use crate::observability::{
    EXCHANGE_DURATION, EXCHANGE_FAILURES, EXCHANGE_FALLBACKS, EXCHANGE_REQUESTS,
};
use crate::types::{ChatRequest, Reply, ReplyKind, SessionIdentity};

/// Environment variable consulted when no endpoint is given explicitly.
pub const ENDPOINT_ENV: &str = "TELETYPE_ENDPOINT";

const FAILURE_PREFIX: &str = "Error: Unable to connect to chat service.";

/// One request/response round trip with the chat endpoint.
///
/// Implementations never fail: whatever goes wrong is described in the
/// returned [`Reply`], which the engine displays like any other answer.
#[async_trait::async_trait]
pub trait Exchange: Send + Sync {
    /// Sends `message` on behalf of `session` and resolves to the reply.
    async fn exchange(&self, message: &str, session: &SessionIdentity) -> Reply;
}

/// HTTP client for the chat endpoint.
///
/// Sends exactly one POST per exchange.  There is no retry, no backoff and
/// no client-side timeout beyond what the transport does by itself.
#[derive(Clone)]
pub struct ExchangeClient {
    client: ReqwestClient,
    endpoint: Url,
    logger: Option<Arc<dyn ExchangeLogger>>,
}

impl ExchangeClient {
    /// Create a new exchange client.
    ///
    /// The endpoint can be provided directly or read from the
    /// TELETYPE_ENDPOINT environment variable.
    pub fn new(endpoint: Option<String>) -> Result<Self> {
        let endpoint = match endpoint {
            Some(endpoint) => endpoint,
            None => env::var(ENDPOINT_ENV).map_err(|_| {
                Error::validation(
                    "endpoint not provided and TELETYPE_ENDPOINT environment variable not set",
                    Some("endpoint".to_string()),
                )
            })?,
        };
        let endpoint = parse_endpoint(&endpoint)?;

        let client = ReqwestClient::builder().build().map_err(|e| {
            Error::http_client(
                format!("Failed to build HTTP client: {}", e),
                Some(Box::new(e)),
            )
        })?;

        Ok(Self {
            client,
            endpoint,
            logger: None,
        })
    }

    /// Attaches a logger that sees every request and reply.
    pub fn with_logger(mut self, logger: Arc<dyn ExchangeLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Returns the configured endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Performs the round trip, reporting failures as errors.
    ///
    /// Only a transport failure, a non-success status or a non-JSON body is
    /// an error; a JSON body without a usable `ai_response` is a fallback
    /// reply.
    pub async fn send(&self, request: &ChatRequest) -> Result<Reply> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(self.default_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    Error::connection(format!("{}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response));
        }

        let body = response.json::<Value>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })?;
        Ok(reply_from_body(&body))
    }

    // The body of an error response is deliberately not read: it must never
    // reach the transcript.
    fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();
        Error::api(status_code, format!("HTTP error! status: {status_code}"))
    }
}

#[async_trait::async_trait]
impl Exchange for ExchangeClient {
    async fn exchange(&self, message: &str, session: &SessionIdentity) -> Reply {
        let request = ChatRequest::new(message, session);
        EXCHANGE_REQUESTS.click();
        if let Some(logger) = &self.logger {
            logger.log_request(&request);
        }

        let start = Instant::now();
        let reply = match self.send(&request).await {
            Ok(reply) => reply,
            Err(err) => {
                EXCHANGE_FAILURES.click();
                if let Some(logger) = &self.logger {
                    logger.log_failure(&err);
                }
                Reply::failure(failure_text(&err))
            }
        };
        EXCHANGE_DURATION.add(start.elapsed().as_secs_f64());

        if reply.kind == ReplyKind::Fallback {
            EXCHANGE_FALLBACKS.click();
        }
        if let Some(logger) = &self.logger {
            logger.log_reply(&reply);
        }
        reply
    }
}

impl fmt::Debug for ExchangeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::validation(
            format!("endpoint must be http or https, not {scheme}"),
            Some("endpoint".to_string()),
        )),
    }
}

/// Extracts the reply from a successful response body.
///
/// A missing, null, non-string or empty `ai_response` yields the fallback.
pub fn reply_from_body(body: &Value) -> Reply {
    body.get("ai_response")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(Reply::answer)
        .unwrap_or_else(Reply::fallback)
}

/// Formats a failed exchange as reply text.
///
/// The error is rendered the way a thrown error prints, with its own
/// `Error: ` tag after the prefix.
pub fn failure_text(err: &Error) -> String {
    format!("{FAILURE_PREFIX} Error: {err}")
}
