use async_trait::async_trait;
use portfolio_shared::{ApiResponse, ContactMessage, InsertContactMessage};
use reqwest::Client;
use tracing::{debug, warn};

use super::ContactApi;
use crate::error::ClientError;

/// Posts submissions to `POST {base}/api/contact`.
#[derive(Debug, Clone)]
pub struct HttpContactApi {
    client: Client,
    endpoint: String,
}

impl HttpContactApi {
    pub fn new(api_base: &str) -> Self {
        Self::with_client(Client::new(), api_base)
    }

    pub fn with_client(client: Client, api_base: &str) -> Self {
        HttpContactApi {
            client,
            endpoint: format!("{}/api/contact", api_base.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContactApi for HttpContactApi {
    async fn submit(&self, input: &InsertContactMessage) -> Result<ContactMessage, ClientError> {
        debug!("POST {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(input).send().await?;
        let status = response.status();
        let text = response.text().await?;

        let body: Option<ApiResponse<ContactMessage>> = serde_json::from_str(&text).ok();
        match body {
            Some(ApiResponse {
                success: true,
                data: Some(message),
                ..
            }) if status.is_success() => Ok(message),
            Some(body) => {
                warn!("Contact submission rejected ({status}): {}", body.message);
                Err(ClientError::Server {
                    status: status.as_u16(),
                    message: body.message,
                })
            }
            None => {
                warn!("Contact submission failed with unreadable body ({status})");
                Err(ClientError::Server {
                    status: status.as_u16(),
                    message: status
                        .canonical_reason()
                        .unwrap_or("Unexpected response")
                        .to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn input() -> InsertContactMessage {
        InsertContactMessage::new("Ada", "ada@example.com", "Loved the gateway project")
    }

    #[tokio::test]
    async fn test_created_returns_stored_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/contact"))
            .and(body_json(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "message": "Loved the gateway project"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "message": "Contact message sent successfully",
                "data": {
                    "id": 1,
                    "name": "Ada",
                    "email": "ada@example.com",
                    "message": "Loved the gateway project",
                    "createdAt": "2024-05-01T12:00:00Z"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpContactApi::new(&server.uri());
        let stored = api.submit(&input()).await.unwrap();
        assert_eq!(stored.id, 1);
        assert_eq!(stored.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_validation_failure_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/contact"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "message": "Validation error: Please enter a valid email address at \"email\""
            })))
            .mount(&server)
            .await;

        let err = HttpContactApi::new(&server.uri())
            .submit(&input())
            .await
            .unwrap_err();
        match err {
            ClientError::Server { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("valid email"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let err = HttpContactApi::new(&server.uri())
            .submit(&input())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Server { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let err = HttpContactApi::new(&format!("http://127.0.0.1:{port}"))
            .submit(&input())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));
    }

    #[test]
    fn test_endpoint_joins_base() {
        assert_eq!(
            HttpContactApi::new("http://localhost:5000/").endpoint(),
            "http://localhost:5000/api/contact"
        );
    }
}
