//! HTTP discount catalog.
//!
//! Talks JSON to the discount service:
//!
//! | Operation              | Request                  |
//! |------------------------|--------------------------|
//! | `fetch_product_names`  | `GET /products/names`    |
//! | `fetch_category_names` | `GET /categories/names`  |
//! | `fetch_discount_names` | `GET /discounts/names`   |
//! | `get_discount_by_id`   | `GET /discounts/{id}`    |
//! | `update_discount`      | `PUT /discounts/{id}`    |
//!
//! Error bodies of the form `{"message": "..."}` are kept as the error's
//! remote message so the editor can show it verbatim. A successful update
//! reply may be a record, a boolean, any other JSON or empty.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::domain::discount::DiscountRecord;
use crate::domain::form::UpdatePayload;
use crate::domain::foundation::{DiscountId, DomainError, ErrorCode};
use crate::ports::{DiscountCatalog, NamedRef, UpdateResponse};

/// Configuration for the HTTP catalog.
#[derive(Debug, Clone)]
pub struct HttpCatalogConfig {
    /// Service root, without trailing slash.
    pub base_url: String,
    /// Bearer token, if the service requires one.
    api_token: Option<Secret<String>>,
    pub timeout: Duration,
}

impl HttpCatalogConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(Secret::new(token.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Discount catalog backed by the remote HTTP service.
pub struct HttpDiscountCatalog {
    config: HttpCatalogConfig,
    client: Client,
}

impl HttpDiscountCatalog {
    pub fn new(config: HttpCatalogConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;
        Ok(Self { config, client })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, DomainError> {
        self.authorize(request).send().await.map_err(|e| {
            if e.is_timeout() {
                DomainError::new(
                    ErrorCode::Timeout,
                    format!(
                        "Discount service did not answer within {}s",
                        self.config.timeout.as_secs()
                    ),
                )
            } else if e.is_connect() {
                DomainError::new(ErrorCode::NetworkError, format!("Connection failed: {}", e))
            } else {
                DomainError::new(ErrorCode::NetworkError, e.to_string())
            }
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        discount: Option<DiscountId>,
    ) -> Result<T, DomainError> {
        let url = self.config.url(path);
        debug!(url = %url, "GET");
        let response = self.send(self.client.get(&url)).await?;
        let response = handle_response_status(response, discount).await?;
        decode(response).await
    }
}

#[async_trait]
impl DiscountCatalog for HttpDiscountCatalog {
    async fn fetch_product_names(&self) -> Result<Vec<NamedRef>, DomainError> {
        self.get_json("/products/names", None).await
    }

    async fn fetch_category_names(&self) -> Result<Vec<NamedRef>, DomainError> {
        self.get_json("/categories/names", None).await
    }

    async fn fetch_discount_names(&self) -> Result<Vec<String>, DomainError> {
        self.get_json("/discounts/names", None).await
    }

    async fn get_discount_by_id(&self, id: DiscountId) -> Result<DiscountRecord, DomainError> {
        self.get_json(&discount_path(id), Some(id)).await
    }

    async fn update_discount(
        &self,
        id: DiscountId,
        payload: &UpdatePayload,
    ) -> Result<UpdateResponse, DomainError> {
        let url = self.config.url(&discount_path(id));
        debug!(url = %url, discount_id = %id, "PUT");
        let response = self.send(self.client.put(&url).json(payload)).await?;
        let response = handle_response_status(response, Some(id)).await?;
        let body = response.text().await.map_err(|e| {
            DomainError::new(
                ErrorCode::NetworkError,
                format!("Failed to read discount service response: {}", e),
            )
        })?;
        Ok(UpdateResponse::from_body(&body))
    }
}

fn discount_path(id: DiscountId) -> String {
    format!("/discounts/{}", id)
}

/// Maps non-success statuses to domain errors, keeping the service's
/// own message when the body carries one.
async fn handle_response_status(
    response: Response,
    discount: Option<DiscountId>,
) -> Result<Response, DomainError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let error = status_error(status, discount);
    Err(match extract_remote_message(&body) {
        Some(message) => error.with_remote_message(message),
        None => error,
    })
}

fn status_error(status: StatusCode, discount: Option<DiscountId>) -> DomainError {
    match (status.as_u16(), discount) {
        (404, Some(id)) => DomainError::new(
            ErrorCode::DiscountNotFound,
            format!("Discount {} not found", id),
        ),
        (401 | 403, _) => DomainError::new(
            ErrorCode::Unauthorized,
            format!("Discount service refused credentials ({})", status),
        ),
        (400 | 409 | 422, _) => DomainError::new(
            ErrorCode::UpdateRejected,
            format!("Discount service rejected the request ({})", status),
        ),
        (500..=599, _) => {
            DomainError::new(ErrorCode::NetworkError, format!("Server error {}", status))
        }
        _ => DomainError::new(
            ErrorCode::UnexpectedResponse,
            format!("Unexpected status {}", status),
        ),
    }
}

fn extract_remote_message(body: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
    parsed
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, DomainError> {
    response.json::<T>().await.map_err(|e| {
        DomainError::new(
            ErrorCode::UnexpectedResponse,
            format!("Failed to decode discount service response: {}", e),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::discount::DiscountScope;
    use crate::domain::foundation::Timestamp;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Serves one request with `status` and `body`, returning the base URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            let headers = if body.is_empty() {
                String::new()
            } else {
                format!(
                    "Content-Type: application/json\r\nContent-Length: {}\r\n",
                    body.len()
                )
            };
            let response = format!(
                "HTTP/1.1 {}\r\n{}Connection: close\r\n\r\n{}",
                status, headers, body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}", addr)
    }

    async fn read_request(socket: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    return;
                }
            }
        }
    }

    fn payload() -> UpdatePayload {
        UpdatePayload {
            id: DiscountId::new(7),
            name: "Weekly".to_string(),
            scope: DiscountScope::Item,
            is_active: true,
            duration: "1 Day".to_string(),
            start_date: Timestamp::now(),
            item_id: Some(2),
            category_id: None,
            loyalty_type: None,
            percentage: Some(10.0),
            amount: None,
        }
    }

    async fn update_against(status: &'static str, body: &'static str) -> UpdateResponse {
        let base_url = serve_once(status, body).await;
        let catalog = HttpDiscountCatalog::new(HttpCatalogConfig::new(base_url)).unwrap();
        catalog.update_discount(DiscountId::new(7), &payload()).await.unwrap()
    }

    #[tokio::test]
    async fn update_accepts_object_acknowledgement() {
        let response = update_against("200 OK", r#"{"success":true}"#).await;
        assert_eq!(response, UpdateResponse::Acknowledged(true));
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn update_accepts_empty_no_content_reply() {
        let response = update_against("204 No Content", "").await;
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn update_reports_false_as_refusal() {
        let response = update_against("200 OK", "false").await;
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn update_keeps_remote_message_of_rejection() {
        let base_url = serve_once("422 Unprocessable Entity", r#"{"message":"Name taken"}"#).await;
        let catalog = HttpDiscountCatalog::new(HttpCatalogConfig::new(base_url)).unwrap();
        let err = catalog
            .update_discount(DiscountId::new(7), &payload())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UpdateRejected);
        assert_eq!(err.remote_message(), Some("Name taken"));
    }

    #[test]
    fn config_trims_trailing_slash() {
        let config = HttpCatalogConfig::new("http://localhost:8080/api/");
        assert_eq!(config.url("/discounts/7"), "http://localhost:8080/api/discounts/7");
    }

    #[test]
    fn config_builder_sets_values() {
        let config = HttpCatalogConfig::new("http://localhost")
            .with_api_token("secret")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.api_token.is_some());
        assert!(!format!("{:?}", config).contains("secret"));
    }

    #[test]
    fn remote_message_is_extracted_from_json_body() {
        assert_eq!(
            extract_remote_message(r#"{"message": "Name already taken"}"#),
            Some("Name already taken".to_string())
        );
        assert_eq!(extract_remote_message(r#"{"message": "  "}"#), None);
        assert_eq!(extract_remote_message("<html>oops</html>"), None);
    }

    #[test]
    fn missing_discount_maps_to_not_found() {
        let err = status_error(StatusCode::NOT_FOUND, Some(DiscountId::new(9)));
        assert_eq!(err.code, ErrorCode::DiscountNotFound);

        let err = status_error(StatusCode::NOT_FOUND, None);
        assert_eq!(err.code, ErrorCode::UnexpectedResponse);
    }

    #[test]
    fn client_errors_map_to_rejection_and_auth() {
        assert_eq!(
            status_error(StatusCode::UNPROCESSABLE_ENTITY, None).code,
            ErrorCode::UpdateRejected
        );
        assert_eq!(status_error(StatusCode::FORBIDDEN, None).code, ErrorCode::Unauthorized);
        assert_eq!(
            status_error(StatusCode::BAD_GATEWAY, None).code,
            ErrorCode::NetworkError
        );
    }

    #[test]
    fn client_builds_without_network() {
        assert!(HttpDiscountCatalog::new(HttpCatalogConfig::new("http://localhost")).is_ok());
    }
}
