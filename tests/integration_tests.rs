//! Integration tests for the teletype library.
//! These tests run the engine against a local HTTP stub.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::{Value, json};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    use teletype::{
        ChatEngine, ChatTurn, Exchange, ExchangeClient, NO_RESPONSE_FALLBACK, PlainTextRenderer,
        ReplyKind, SessionIdentity, SessionStatus, SubmitOutcome, Typewriter,
    };

    /// Serves exactly one request with `status` and `body`, handing the
    /// request body back over the returned channel.
    async fn serve_once(status: &'static str, body: String) -> (String, oneshot::Receiver<Value>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            let header_end = loop {
                let n = stream.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before headers");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            assert!(headers.starts_with("post "));
            assert!(headers.contains("content-type: application/json"));
            let content_length: usize = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .map(|v| v.trim().parse().unwrap())
                .unwrap_or(0);
            while buf.len() < header_end + content_length {
                let n = stream.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before body");
                buf.extend_from_slice(&chunk[..n]);
            }
            let request: Value =
                serde_json::from_slice(&buf[header_end..header_end + content_length]).unwrap();
            let _ = tx.send(request);

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });

        (format!("http://{addr}/chat"), rx)
    }

    fn engine(endpoint: String) -> ChatEngine<ExchangeClient> {
        let client = ExchangeClient::new(Some(endpoint)).unwrap();
        ChatEngine::with_identity(
            client,
            Typewriter::new(Duration::from_millis(1)),
            SessionIdentity::new("user-abc123def456"),
        )
    }

    #[tokio::test]
    async fn answer_is_typed_and_recorded() {
        let (endpoint, request) = serve_once("200 OK", json!({"ai_response": "hi"}).to_string()).await;
        let mut engine = engine(endpoint);
        let mut view = PlainTextRenderer::with_writer(Vec::new(), false);

        let outcome = engine.submit("hello", &mut view).await.unwrap();
        assert!(matches!(
            outcome,
            SubmitOutcome::Completed { ref reply, ticks: 2 } if reply.text == "hi"
        ));

        let request = request.await.unwrap();
        assert_eq!(
            request,
            json!({"message": "hello", "sender": "user-abc123def456"})
        );

        let session = engine.session();
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[0].input, "hello");
        assert_eq!(session.transcript()[1].output_text(), "hi");
        assert!(!session.transcript()[1].in_progress);
        assert_eq!(
            session.turns(),
            &[ChatTurn::user("hello"), ChatTurn::assistant("hi")]
        );

        let screen = String::from_utf8(view.into_inner()).unwrap();
        assert!(screen.ends_with("hi\n"));
    }

    #[tokio::test]
    async fn server_error_body_never_reaches_transcript() {
        let (endpoint, _request) =
            serve_once("500 Internal Server Error", json!({"secret": "stack trace"}).to_string())
                .await;
        let mut engine = engine(endpoint);
        let mut view = PlainTextRenderer::with_writer(Vec::new(), false);

        let outcome = engine.submit("hello", &mut view).await.unwrap();
        let SubmitOutcome::Completed { reply, .. } = outcome else {
            panic!("expected a completed cycle");
        };
        assert_eq!(reply.kind, ReplyKind::Failure);
        assert!(reply.text.contains("500"));
        assert!(!reply.text.contains("stack trace"));

        let session = engine.session();
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].output_text(), reply.text);
        assert!(session.turns().is_empty());
    }

    #[tokio::test]
    async fn missing_ai_response_falls_back() {
        let (endpoint, _request) = serve_once("200 OK", json!({"other": 1}).to_string()).await;
        let client = ExchangeClient::new(Some(endpoint)).unwrap();

        let reply = client
            .exchange("hello", &SessionIdentity::new("user-abc123def456"))
            .await;
        assert_eq!(reply.kind, ReplyKind::Fallback);
        assert_eq!(reply.text, NO_RESPONSE_FALLBACK);
    }

    #[tokio::test]
    async fn non_json_body_is_failure() {
        let (endpoint, _request) = serve_once("200 OK", "<html>oops</html>".to_string()).await;
        let client = ExchangeClient::new(Some(endpoint)).unwrap();

        let reply = client
            .exchange("hello", &SessionIdentity::new("user-abc123def456"))
            .await;
        assert!(reply.is_failure());
        assert!(!reply.text.contains("oops"));
    }

    #[tokio::test]
    async fn input_reenabled_after_cycle() {
        let (endpoint, _request) = serve_once("200 OK", json!({"ai_response": "one"}).to_string()).await;
        let mut engine = engine(endpoint);
        let mut view = PlainTextRenderer::with_writer(Vec::new(), false);

        engine.submit("a", &mut view).await.unwrap();
        assert!(view.input_enabled());
        assert!(engine.session().is_idle());
        assert_eq!(engine.stats().turn_count, 2);
    }
}
