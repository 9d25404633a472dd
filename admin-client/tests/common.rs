#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use http::Method;
use serde_json::{json, Value};

use admin_client::config::ClientConfig;
use admin_client::session::{MemoryNavigator, MemoryTokenStore, Session, TokenStore};
use admin_client::transport::{ApiRequest, ApiResponse, HttpTransport, TransportError};
use admin_client::AdminClient;

type Reply = Result<ApiResponse, TransportError>;

/// Transport that answers from per-endpoint scripts and records every call.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<HashMap<(Method, String), VecDeque<Reply>>>,
    requests: RefCell<Vec<ApiRequest>>,
    sleeps: RefCell<Vec<Duration>>,
}

impl ScriptedTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.replies
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn reply(&self, method: Method, path: &str, status: u16, body: Value) {
        self.push(method, path, Ok(ApiResponse::new(status, body.to_string())));
    }

    pub fn reply_empty(&self, method: Method, path: &str, status: u16) {
        self.push(method, path, Ok(ApiResponse::new(status, "")));
    }

    pub fn fail(&self, method: Method, path: &str, error: TransportError) {
        self.push(method, path, Err(error));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn calls_to(&self, method: Method, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let key = (request.method.clone(), request.path.clone());
        self.requests.borrow_mut().push(request);

        self.replies
            .borrow_mut()
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Ok(ApiResponse::new(
                    404,
                    json!({ "message": "no scripted reply" }).to_string(),
                ))
            })
    }

    async fn sleep(&self, delay: Duration) {
        self.sleeps.borrow_mut().push(delay);
    }
}

pub struct Harness {
    pub client: AdminClient,
    pub transport: Rc<ScriptedTransport>,
    pub tokens: Rc<MemoryTokenStore>,
    pub navigator: Rc<MemoryNavigator>,
}

impl Harness {
    pub fn new(start_path: &str, token: Option<&str>) -> Self {
        let transport = ScriptedTransport::new();
        let tokens = Rc::new(match token {
            Some(token) => MemoryTokenStore::with_token(token),
            None => MemoryTokenStore::new(),
        });
        let navigator = Rc::new(MemoryNavigator::new(start_path));
        let session = Session::new(tokens.clone(), navigator.clone());
        let client = AdminClient::new(
            transport.clone(),
            session,
            ClientConfig::new("http://api.test/api"),
        );

        Self {
            client,
            transport,
            tokens,
            navigator,
        }
    }

    pub fn signed_in() -> Self {
        Self::new("/admin", Some("test-token"))
    }

    pub fn tokens_value(&self) -> Option<String> {
        self.tokens.load()
    }

    pub fn current_path(&self) -> String {
        self.navigator.history().last().cloned().unwrap_or_default()
    }
}

pub fn user_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "name": format!("User {}", id),
        "email": format!("{}@example.com", id),
        "phone": "555-0100",
        "location": "Lisbon",
        "package": "Basic",
        "status": status,
        "totalSpent": 0,
        "createdAt": "2026-09-01T10:00:00Z"
    })
}

pub fn blog_json(id: &str, status: &str, views: u64) -> Value {
    json!({
        "_id": id,
        "title": format!("Post {}", id),
        "content": "Body",
        "tags": ["rust"],
        "featured": false,
        "status": status,
        "views": views,
        "comments": [],
        "createdAt": "2026-09-01T10:00:00Z"
    })
}
