use crate::config::ClientConfig;
use crate::error::AdminClientError;
use crate::models::ErrorResponse;
use crate::session::Session;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, TransportError};
use serde::de::DeserializeOwned;
use std::rc::Rc;

pub const LOGIN_ENDPOINT: &str = "/auth/login";

const REQUEST_TIMEOUT: u16 = 408;
const UNAUTHORIZED: u16 = 401;

/// Request client shared by every page: bearer token, bounded retry and the
/// session-expiry side effect.
#[derive(Clone)]
pub struct HttpClient {
    transport: Rc<dyn HttpTransport>,
    session: Session,
    config: ClientConfig,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("session", &self.session)
            .finish()
    }
}

impl HttpClient {
    pub fn new(transport: Rc<dyn HttpTransport>, session: Session, config: ClientConfig) -> Self {
        Self {
            transport,
            session,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends `request` and decodes a JSON body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, AdminClientError> {
        let response = self.execute(request).await?;
        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            AdminClientError::SerializationError(e.to_string())
        })
    }

    /// Sends `request`, ignoring any success body.
    pub async fn send(&self, request: ApiRequest) -> Result<(), AdminClientError> {
        self.execute(request).await.map(|_| ())
    }

    async fn execute(&self, mut request: ApiRequest) -> Result<ApiResponse, AdminClientError> {
        request.bearer = self.session.token();
        let mut attempt = 0u32;

        loop {
            tracing::debug!(
                method = %request.method,
                path = %request.path,
                auth = request.bearer.is_some(),
                multipart = request.body.is_multipart(),
                "Making request"
            );

            let outcome = self.transport.send(request.clone()).await;

            let retryable = match &outcome {
                Err(_) => true,
                Ok(response) => response.status == REQUEST_TIMEOUT,
            };

            if retryable && attempt < self.config.max_retries {
                attempt += 1;
                let delay = self.config.retry_delay_for(attempt);
                tracing::warn!(
                    path = %request.path,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying request"
                );
                self.transport.sleep(delay).await;
                continue;
            }

            return match outcome {
                Err(TransportError::Timeout) => {
                    tracing::error!(path = %request.path, "Request timed out");
                    Err(AdminClientError::Timeout)
                }
                Err(TransportError::Network(message)) => {
                    tracing::error!(path = %request.path, "Network error: {}", message);
                    Err(AdminClientError::Network(message))
                }
                Ok(response) => self.handle_response(&request, response),
            };
        }
    }

    fn handle_response(
        &self,
        request: &ApiRequest,
        response: ApiResponse,
    ) -> Result<ApiResponse, AdminClientError> {
        tracing::debug!(status = response.status, path = %request.path, "Response received");

        if response.is_success() {
            return Ok(response);
        }

        let message = serde_json::from_str::<ErrorResponse>(&response.body)
            .ok()
            .and_then(ErrorResponse::into_message);

        tracing::error!(
            status = response.status,
            path = %request.path,
            message = message.as_deref().unwrap_or(""),
            "Request failed"
        );

        if response.status == UNAUTHORIZED && !request.path.contains(LOGIN_ENDPOINT) {
            self.session.expire();
        }

        Err(AdminClientError::from_status(response.status, message))
    }
}
