use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::prompt::build_prompt;
use crate::{DefineError, Definer, Definition, ProviderMetadata};

/// Google Gemini `generateContent` client. One attempt per lookup, no retry.
#[derive(Clone)]
pub struct GeminiDefiner {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiDefiner {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, DefineError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            api_url,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl Definer for GeminiDefiner {
    async fn define(&self, word: &str) -> Result<Definition, DefineError> {
        if self.api_key.is_empty() {
            return Err(DefineError::AuthenticationError);
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(build_prompt(word)),
                }],
            }],
        };

        tracing::debug!("Requesting definition for '{}' from {}", word, self.model);
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == 429 {
            return Err(DefineError::RateLimitExceeded);
        }

        if status == 401 || status == 403 {
            return Err(DefineError::AuthenticationError);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DefineError::ApiError(match error_message(&body) {
                Some(message) => format!("HTTP {status}: {message}"),
                None => format!("HTTP {status}"),
            }));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| DefineError::ApiError(format!("Failed to parse response: {e}")))?;

        let text = extract_text(body)?;
        tracing::debug!("Received {} chars for '{}'", text.len(), word);

        Ok(Definition {
            word: word.to_string(),
            text,
            provider: "gemini".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Join the text parts of the first candidate
fn extract_text(response: GenerateContentResponse) -> Result<String, DefineError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .unwrap_or_default()
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        return Err(DefineError::EmptyResponse);
    }

    Ok(text)
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|e| e.error.message)
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    fn parse(json: &str) -> Result<String, DefineError> {
        extract_text(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let json = r##"{
            "candidates": [
                {"content": {"parts": [{"text": "# apple\n"}, {"text": "A fruit."}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"##;

        assert_eq!(parse(json).unwrap(), "# apple\nA fruit.");
    }

    #[test]
    fn empty_candidates_are_rejected() {
        assert!(matches!(parse(r#"{"candidates": []}"#), Err(DefineError::EmptyResponse)));
        assert!(matches!(parse(r#"{}"#), Err(DefineError::EmptyResponse)));
        assert!(matches!(
            parse(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#),
            Err(DefineError::EmptyResponse)
        ));
        assert!(matches!(
            parse(r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#),
            Err(DefineError::EmptyResponse)
        ));
    }

    #[test]
    fn reads_api_error_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body).as_deref(), Some("API key not valid"));
        assert_eq!(error_message("<html>"), None);
    }

    #[test]
    fn request_body_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some("hi".to_string()),
                }],
            }],
        };

        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"contents":[{"parts":[{"text":"hi"}]}]}"#
        );
    }

    /// Serve one canned HTTP response on a local port
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{addr}/v1beta")
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    fn definer(api_url: String, api_key: &str) -> GeminiDefiner {
        GeminiDefiner::new(
            api_key.to_string(),
            api_url,
            "gemini-2.0-flash".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn define_returns_candidate_text() {
        let url = serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":"**apple** noun"}]}}]}"#,
        )
        .await;

        let definition = definer(url, "key").define("apple").await.unwrap();

        assert_eq!(definition.word, "apple");
        assert_eq!(definition.text, "**apple** noun");
        assert_eq!(definition.provider, "gemini");
    }

    #[tokio::test]
    async fn status_codes_map_to_errors() {
        let url = serve_once("429 Too Many Requests", "{}").await;
        assert!(matches!(
            definer(url, "key").define("apple").await,
            Err(DefineError::RateLimitExceeded)
        ));

        let url = serve_once("403 Forbidden", "{}").await;
        assert!(matches!(
            definer(url, "key").define("apple").await,
            Err(DefineError::AuthenticationError)
        ));

        let url = serve_once(
            "500 Internal Server Error",
            r#"{"error":{"message":"backend exploded"}}"#,
        )
        .await;
        match definer(url, "key").define("apple").await {
            Err(DefineError::ApiError(message)) => assert!(message.contains("backend exploded")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_key_fails_without_request() {
        let result = definer("http://127.0.0.1:9".to_string(), "")
            .define("apple")
            .await;

        assert!(matches!(result, Err(DefineError::AuthenticationError)));
    }

    #[test]
    fn endpoint_includes_model() {
        let definer = definer("https://example.test/v1beta/".to_string(), "key");
        assert_eq!(
            definer.endpoint(),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(definer.metadata().model, "gemini-2.0-flash");
        assert!(definer.metadata().requires_api_key);
    }
}
