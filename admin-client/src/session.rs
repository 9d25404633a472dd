//! Authentication state: a persisted bearer token plus the navigation seam
//! used to send the user back to the login screen.

use crate::error::AdminClientError;
use crate::routes::LOGIN_PATH;
use std::cell::RefCell;
use std::rc::Rc;

/// Key under which the browser keeps the bearer token.
pub const TOKEN_KEY: &str = "token";

pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), AdminClientError>;
    fn clear(&self);
}

pub trait Navigator {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str);
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RefCell::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) -> Result<(), AdminClientError> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}

/// Navigator that only records where it was sent.
#[derive(Debug)]
pub struct MemoryNavigator {
    history: RefCell<Vec<String>>,
}

impl MemoryNavigator {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            history: RefCell::new(vec![start.into()]),
        }
    }

    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.history.borrow().last().cloned().unwrap_or_default()
    }

    fn navigate(&self, path: &str) {
        self.history.borrow_mut().push(path.to_string());
    }
}

#[derive(Clone)]
pub struct Session {
    tokens: Rc<dyn TokenStore>,
    navigator: Rc<dyn Navigator>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("path", &self.navigator.current_path())
            .finish()
    }
}

impl Session {
    pub fn new(tokens: Rc<dyn TokenStore>, navigator: Rc<dyn Navigator>) -> Self {
        Self { tokens, navigator }
    }

    /// In-memory session, starting on `path`.
    pub fn in_memory(path: &str) -> Self {
        Self::new(
            Rc::new(MemoryTokenStore::new()),
            Rc::new(MemoryNavigator::new(path)),
        )
    }

    pub fn token(&self) -> Option<String> {
        self.tokens.load().filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn sign_in(&self, token: &str) -> Result<(), AdminClientError> {
        self.tokens.save(token)?;
        tracing::info!("Session started");
        Ok(())
    }

    /// Explicit logout from the UI.
    pub fn sign_out(&self) {
        self.tokens.clear();
        tracing::info!("Session closed");
        self.navigator.navigate(LOGIN_PATH);
    }

    /// Server rejected the token. No-op while already on the login page.
    pub fn expire(&self) {
        if self.on_login_page() {
            return;
        }
        tracing::warn!("Session expired, redirecting to {}", LOGIN_PATH);
        self.tokens.clear();
        self.navigator.navigate(LOGIN_PATH);
    }

    pub fn on_login_page(&self) -> bool {
        self.navigator.current_path().contains(LOGIN_PATH)
    }

    pub fn navigate(&self, path: &str) {
        self.navigator.navigate(path);
    }

    pub fn current_path(&self) -> String {
        self.navigator.current_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_of_token_is_the_only_signal() {
        let session = Session::in_memory("/admin");
        assert!(!session.is_authenticated());
        session.sign_in("abc").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("abc"));
    }

    #[test]
    fn empty_token_counts_as_logged_out() {
        let session = Session::new(
            Rc::new(MemoryTokenStore::with_token("")),
            Rc::new(MemoryNavigator::new("/admin")),
        );
        assert!(!session.is_authenticated());
    }

    #[test]
    fn expire_clears_token_and_redirects() {
        let navigator = Rc::new(MemoryNavigator::new("/admin/manage-blog"));
        let session = Session::new(Rc::new(MemoryTokenStore::with_token("t")), navigator.clone());
        session.expire();
        assert!(!session.is_authenticated());
        assert_eq!(navigator.current_path(), "/login");
    }

    #[test]
    fn expire_on_login_page_keeps_state() {
        let navigator = Rc::new(MemoryNavigator::new("/login"));
        let session = Session::new(Rc::new(MemoryTokenStore::with_token("t")), navigator.clone());
        session.expire();
        assert!(session.is_authenticated());
        assert_eq!(navigator.history(), vec!["/login".to_string()]);
    }

    #[test]
    fn sign_out_always_navigates() {
        let navigator = Rc::new(MemoryNavigator::new("/admin"));
        let session = Session::new(Rc::new(MemoryTokenStore::with_token("t")), navigator.clone());
        session.sign_out();
        assert!(!session.is_authenticated());
        assert_eq!(navigator.current_path(), "/login");
    }
}
