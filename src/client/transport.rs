use crate::config::ServiceConfig;
use crate::error::{GenerateError, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Seam between the pipeline and the wire. The HTTP implementation below is
/// the only one used in production; tests substitute their own.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value>;
    async fn get_json(&self, path: &str) -> Result<Value>;
}

/// reqwest-backed transport. Base address, JSON headers, and the long
/// generation timeout are fixed at construction; the client is shared by
/// every request for the life of the process.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                GenerateError::ClientConfigError(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    async fn handle_response(&self, path: &str, response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = extract_detail(&body, status);
            log::warn!("{} responded {}: {}", path, status.as_u16(), detail);
            return Err(GenerateError::ServerError {
                status: status.as_u16(),
                detail,
            });
        }

        // Payload content is never logged; a generated image runs to
        // megabytes of base64.
        log::info!("API response: {} {}", status.as_u16(), path);

        response.json::<Value>().await.map_err(|e| {
            GenerateError::MalformedResponseError(format!("response body is not JSON: {}", e))
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value> {
        log::info!("API request: POST {} (payload omitted)", path);

        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .map_err(classify_send_error)?;

        self.handle_response(path, response).await
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        log::info!("API request: GET {}", path);

        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(classify_send_error)?;

        self.handle_response(path, response).await
    }
}

/// A request that never produced a response is a network failure unless it
/// failed before dispatch (bad URL, unserializable body).
fn classify_send_error(e: reqwest::Error) -> GenerateError {
    if e.is_timeout() {
        GenerateError::NetworkError(format!("request timed out: {}", e))
    } else if e.is_connect() {
        GenerateError::NetworkError(format!("could not reach service: {}", e))
    } else if e.is_builder() {
        GenerateError::ClientConfigError(format!("request could not be constructed: {}", e))
    } else {
        GenerateError::NetworkError(format!("no response from service: {}", e))
    }
}

/// Prefer the service's structured `detail` field, fall back to the HTTP
/// status text.
fn extract_detail(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(parsed) = serde_json::from_str::<crate::models::ErrorBody>(body) {
        if let Some(detail) = parsed.detail {
            return detail;
        }
    }
    status
        .canonical_reason()
        .unwrap_or("unknown server error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_extracted_from_structured_body() {
        let status = reqwest::StatusCode::UNPROCESSABLE_ENTITY;
        let detail = extract_detail(r#"{"detail": "prompt too long"}"#, status);
        assert_eq!(detail, "prompt too long");
    }

    #[test]
    fn test_detail_falls_back_to_status_text() {
        let status = reqwest::StatusCode::INTERNAL_SERVER_ERROR;
        assert_eq!(extract_detail("", status), "Internal Server Error");
        assert_eq!(extract_detail("<html>oops</html>", status), "Internal Server Error");
        assert_eq!(extract_detail("{}", status), "Internal Server Error");
    }

    #[test]
    fn test_transport_builds_from_default_config() {
        let transport = HttpTransport::new(&ServiceConfig::new()).unwrap();
        assert_eq!(transport.base_url, crate::config::DEFAULT_BASE_URL);
    }
}
