use std::time::Duration;

use const_format::concatcp;
use hyper::ext::ReasonPhrase;
use hyper::http::Extensions;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::{NotifyError, Result};
use crate::retry::AttemptOutcome;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3500);

const CLIENT_USER_AGENT: &str = concatcp!("teams-notify/", env!("CARGO_PKG_VERSION"));

/// Raw description of a webhook response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryResult {
    pub body: String,
    pub status_code: u16,
    pub status_message: String,
}

impl DeliveryResult {
    /// Sort the response into success, permanent rejection, or a retryable failure.
    pub fn classify(self) -> AttemptOutcome<DeliveryResult> {
        match self.status_code {
            200..=299 => AttemptOutcome::Success(self),
            400..=499 => AttemptOutcome::Permanent(NotifyError::Rejected {
                status: self.status_code,
                status_message: self.status_message,
                body: self.body,
            }),
            status => AttemptOutcome::Transient(NotifyError::Upstream {
                status,
                body: self.body,
            }),
        }
    }
}

pub struct DeliveryClient {
    http: Client,
}

impl DeliveryClient {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Redirects are returned as-is so a 3xx is classified, never followed
    /// with the body dropped.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .redirect(Policy::none())
            .build()?;

        Ok(Self { http })
    }

    /// POST `payload` as JSON. Any HTTP status is returned as a result; only
    /// transport failures are errors.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        endpoint: &str,
    ) -> Result<DeliveryResult> {
        let url = parse_endpoint(endpoint)?;
        let body = serde_json::to_vec(payload)?;
        debug!(payload = %String::from_utf8_lossy(&body), "Posting JSON");

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, body.len())
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let status_message = status_message(status, response.extensions());
        let body = response.text().await?;

        Ok(DeliveryResult {
            body,
            status_code: status.as_u16(),
            status_message,
        })
    }
}

/// Reason phrase the server sent, or the canonical one for the code.
fn status_message(status: StatusCode, extensions: &Extensions) -> String {
    extensions
        .get::<ReasonPhrase>()
        .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
        .or_else(|| status.canonical_reason())
        .unwrap_or_default()
        .to_string()
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint).map_err(|_| NotifyError::InvalidUrl(redact(endpoint)))?;
    match url.scheme() {
        "https" | "http" => Ok(url),
        _ => Err(NotifyError::InvalidUrl(redact(endpoint))),
    }
}

/// Webhook URLs embed credentials; keep only a recognizable prefix in errors.
fn redact(endpoint: &str) -> String {
    let visible: String = endpoint.chars().take(24).collect();
    if visible.len() < endpoint.len() {
        format!("{visible}...")
    } else {
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn result(status_code: u16) -> DeliveryResult {
        DeliveryResult {
            body: "response body".to_string(),
            status_code,
            status_message: "Reason".to_string(),
        }
    }

    #[test]
    fn test_classify_success_range() {
        for status in [200, 201, 204, 299] {
            assert!(matches!(result(status).classify(), AttemptOutcome::Success(_)));
        }
    }

    #[test]
    fn test_classify_client_errors_are_permanent() {
        for status in [400, 403, 404, 413, 429, 499] {
            match result(status).classify() {
                AttemptOutcome::Permanent(err) => {
                    assert!(!err.is_retryable());
                    assert!(err.to_string().contains(&format!("[HTTP:{status}]")));
                    assert!(err.to_string().contains("response body"));
                }
                other => panic!("expected permanent failure for {status}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_classify_everything_else_is_transient() {
        for status in [100, 302, 500, 502, 503, 599] {
            match result(status).classify() {
                AttemptOutcome::Transient(err) => assert!(err.is_retryable()),
                other => panic!("expected transient failure for {status}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_endpoint_rejects_other_schemes() {
        assert!(parse_endpoint("https://example.com/hook").is_ok());
        assert!(matches!(
            parse_endpoint("ftp://example.com/hook"),
            Err(NotifyError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_endpoint("not a url at all"),
            Err(NotifyError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_redact_truncates_long_endpoints() {
        assert_eq!(redact("short"), "short");
        assert_eq!(
            redact("https://example.webhook.office.com/secret"),
            "https://example.webhook...."
        );
    }

    #[tokio::test]
    async fn test_post_json_sends_json_body() {
        let server = MockServer::start().await;
        let payload = json!({ "type": "message", "attachments": [] });

        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(header("content-type", "application/json"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(200).set_body_string("1"))
            .expect(1)
            .mount(&server)
            .await;

        let client = DeliveryClient::new().unwrap();
        let result = client
            .post_json(&payload, &format!("{}/hook", server.uri()))
            .await
            .unwrap();

        assert_eq!(result.status_code, 200);
        assert_eq!(result.status_message, "OK");
        assert_eq!(result.body, "1");
    }

    #[tokio::test]
    async fn test_post_json_returns_error_statuses() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
            .mount(&server)
            .await;

        let client = DeliveryClient::new().unwrap();
        let result = client
            .post_json(&json!({}), &server.uri())
            .await
            .unwrap();

        assert_eq!(result.status_code, 503);
        assert_eq!(result.status_message, "Service Unavailable");
        assert_eq!(result.body, "try later");
    }

    #[tokio::test]
    async fn test_post_json_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = DeliveryClient::with_timeout(Duration::from_millis(50)).unwrap();
        let err = client
            .post_json(&json!({}), &server.uri())
            .await
            .unwrap_err();

        assert!(matches!(err, NotifyError::Http(ref e) if e.is_timeout()));
    }

    #[tokio::test]
    async fn test_post_json_sets_content_length_in_bytes() {
        let server = MockServer::start().await;
        let payload = json!({ "text": "Überlastung ⚠ 警告: CPU > 95%" });
        let serialized = serde_json::to_vec(&payload).unwrap();
        let text = String::from_utf8(serialized.clone()).unwrap();
        assert_ne!(serialized.len(), text.chars().count());

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        DeliveryClient::new()
            .unwrap()
            .post_json(&payload, &server.uri())
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let content_length = requests[0]
            .headers
            .get("content-length")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert_eq!(content_length, serialized.len().to_string());
        assert_eq!(requests[0].body, serialized);
    }

    #[tokio::test]
    async fn test_post_json_does_not_follow_redirects() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/hook"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("location", format!("{}/landing", server.uri()).as_str()),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/landing"))
            .respond_with(ResponseTemplate::new(200).set_body_string("welcome"))
            .expect(0)
            .mount(&server)
            .await;

        let result = DeliveryClient::new()
            .unwrap()
            .post_json(&json!({ "text": "hi" }), &format!("{}/hook", server.uri()))
            .await
            .unwrap();

        assert_eq!(result.status_code, 302);
        assert_eq!(result.status_message, "Found");
        assert!(matches!(result.classify(), AttemptOutcome::Transient(_)));
    }

    #[test]
    fn test_with_timeout_builds_client() {
        assert!(DeliveryClient::with_timeout(Duration::from_millis(1)).is_ok());
        assert!(DeliveryClient::with_timeout(DEFAULT_TIMEOUT).is_ok());
    }

    #[test]
    fn test_status_message_prefers_sent_reason_phrase() {
        let mut extensions = Extensions::new();
        assert_eq!(status_message(StatusCode::FORBIDDEN, &extensions), "Forbidden");

        extensions.insert(ReasonPhrase::from_static(b"Webhook Disabled"));
        assert_eq!(status_message(StatusCode::FORBIDDEN, &extensions), "Webhook Disabled");
    }

    /// Answers one HTTP/1.1 request with `response` verbatim.
    async fn serve_raw_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}/hook")
    }

    #[tokio::test]
    async fn test_post_json_keeps_server_reason_phrase() {
        let endpoint = serve_raw_once(
            "HTTP/1.1 403 Webhook Disabled\r\ncontent-length: 8\r\nconnection: close\r\n\r\ndisabled",
        )
        .await;

        let result = DeliveryClient::new()
            .unwrap()
            .post_json(&json!({ "text": "hi" }), &endpoint)
            .await
            .unwrap();

        assert_eq!(result.status_code, 403);
        assert_eq!(result.status_message, "Webhook Disabled");
        match result.classify() {
            AttemptOutcome::Permanent(err) => {
                assert!(err.to_string().contains("[HTTP:403] Webhook Disabled"))
            }
            other => panic!("expected permanent failure, got {other:?}"),
        }
    }
}
