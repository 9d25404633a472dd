//! Wire-level request/response types and the transport seam.
//!
//! [`HttpTransport`] performs exactly one HTTP exchange. Retries, bearer
//! tokens and 401 handling live one level up in [`crate::http_client`], so
//! every platform (reqwest on native, gloo-net in the browser, scripted
//! doubles in tests) gets the same behaviour.

use async_trait::async_trait;
use http::Method;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// One part of a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, FormPart::File { name: n, .. } if n == name))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

impl RequestBody {
    /// `Content-Type` the transport must send, `None` when it sets one itself
    /// (multipart boundaries) or there is no body.
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Json(_) => Some("application/json"),
            Self::Empty | Self::Multipart(_) => None,
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    pub fn json(mut self, value: Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Joins `base_url` and the request path the same way for every transport.
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure before any HTTP status was received.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,
}

#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;

    /// Waits between retry attempts.
    async fn sleep(&self, delay: Duration);
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use reqwest::{multipart, Client};

    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: Client,
        base_url: String,
    }

    impl ReqwestTransport {
        pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
            let client = Client::builder()
                .timeout(timeout)
                .connect_timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new());

            Self {
                client,
                base_url: base_url.into(),
            }
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }

        fn multipart(form: MultipartForm) -> Result<multipart::Form, TransportError> {
            let mut out = multipart::Form::new();
            for part in form.parts {
                out = match part {
                    FormPart::Text { name, value } => out.text(name, value),
                    FormPart::File {
                        name,
                        file_name,
                        mime,
                        bytes,
                    } => {
                        let part = multipart::Part::bytes(bytes)
                            .file_name(file_name)
                            .mime_str(&mime)
                            .map_err(|e| TransportError::Network(e.to_string()))?;
                        out.part(name, part)
                    }
                };
            }
            Ok(out)
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for ReqwestTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            let url = request.url(&self.base_url);
            let mut builder = self.client.request(request.method.clone(), &url);

            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            if let Some(token) = &request.bearer {
                builder = builder.bearer_auth(token);
            }

            builder = match request.body {
                RequestBody::Empty => builder,
                RequestBody::Json(value) => builder.json(&value),
                RequestBody::Multipart(form) => builder.multipart(Self::multipart(form)?),
            };

            let response = builder.send().await.map_err(map_reqwest_error)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(map_reqwest_error)?;

            Ok(ApiResponse { status, body })
        }

        async fn sleep(&self, delay: Duration) {
            tokio::time::sleep(delay).await;
        }
    }

    fn map_reqwest_error(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slashes() {
        let req = ApiRequest::get("/blogs/1");
        assert_eq!(req.url("http://localhost:3000/api/"), "http://localhost:3000/api/blogs/1");
        assert_eq!(req.url("http://localhost:3000/api"), "http://localhost:3000/api/blogs/1");
    }

    #[test]
    fn multipart_has_no_fixed_content_type() {
        let body = RequestBody::Multipart(MultipartForm::new().text("title", "x"));
        assert_eq!(body.content_type(), None);
        assert_eq!(
            RequestBody::Json(serde_json::json!({})).content_type(),
            Some("application/json")
        );
    }

    #[test]
    fn multipart_lookup_helpers() {
        let form = MultipartForm::new()
            .text("title", "Hello")
            .file("image", "a.png", "image/png", vec![1, 2, 3]);
        assert_eq!(form.text_value("title"), Some("Hello"));
        assert!(form.has_file("image"));
        assert!(!form.has_file("audio"));
    }
}
