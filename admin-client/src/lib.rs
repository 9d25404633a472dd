pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod forms;
pub mod http_client;
pub mod layout;
pub mod list;
pub mod models;
pub mod routes;
pub mod session;
pub mod theme;
pub mod transport;

use config::ClientConfig;
use dashboard::DashboardStats;
use error::AdminClientError;
use forms::{BlogForm, LoginForm, PodcastForm, RegistrationForm};
use http_client::{HttpClient, LOGIN_ENDPOINT};
use list::ListQuery;
use models::*;
use session::Session;
use std::rc::Rc;
use transport::{ApiRequest, HttpTransport};

/// Client for the admin REST API. Each method maps to one endpoint; list
/// methods take the page's search/filter/sort as a [`ListQuery`].
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: HttpClient,
}

impl AdminClient {
    pub fn new(transport: Rc<dyn HttpTransport>, session: Session, config: ClientConfig) -> Self {
        Self {
            http: HttpClient::new(transport, session, config),
        }
    }

    /// Client backed by `reqwest`, for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn native(config: ClientConfig, session: Session) -> Self {
        let transport = transport::ReqwestTransport::new(config.base_url.clone(), config.timeout);
        Self::new(Rc::new(transport), session, config)
    }

    pub fn session(&self) -> &Session {
        self.http.session()
    }

    pub fn base_url(&self) -> &str {
        &self.http.config().base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    // ==================== Авторизация ====================

    /// Posts the credentials and stores the returned token.
    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<String, AdminClientError> {
        let form = LoginForm {
            email: email.into().trim().to_string(),
            password: password.into(),
        };
        form.validate()?;

        let req = LoginRequest {
            email: form.email,
            password: form.password,
        };
        tracing::debug!("Login called for email: {}", req.email);

        let response: LoginResponse = self
            .http
            .request(ApiRequest::post(LOGIN_ENDPOINT).json(serde_json::to_value(&req)?))
            .await?;

        let token = response
            .token
            .filter(|t| !t.is_empty())
            .ok_or(AdminClientError::MissingToken)?;
        self.session().sign_in(&token)?;

        tracing::info!("Login successful for {}", req.email);
        Ok(token)
    }

    pub fn logout(&self) {
        self.session().sign_out();
    }

    // ==================== Пользователи ====================

    pub async fn list_users(&self, query: &ListQuery) -> Result<Vec<User>, AdminClientError> {
        self.http
            .request(ApiRequest::get("/users").query(query.to_pairs()))
            .await
    }

    pub async fn create_user(&self, form: &RegistrationForm) -> Result<User, AdminClientError> {
        form.validate()?;
        self.http
            .request(ApiRequest::post("/users").body(form.to_body()))
            .await
    }

    pub async fn update_user(
        &self,
        id: &str,
        form: &RegistrationForm,
    ) -> Result<User, AdminClientError> {
        form.validate()?;
        self.http
            .request(ApiRequest::put(format!("/users/{}", id)).body(form.to_body()))
            .await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), AdminClientError> {
        self.http
            .send(ApiRequest::delete(format!("/users/{}", id)))
            .await?;
        tracing::info!("User deleted: id={}", id);
        Ok(())
    }

    // ==================== Блог ====================

    pub async fn list_blogs(&self, query: &ListQuery) -> Result<Vec<BlogPost>, AdminClientError> {
        self.http
            .request(ApiRequest::get("/blogs").query(query.to_pairs()))
            .await
    }

    pub async fn get_blog(&self, id: &str) -> Result<BlogPost, AdminClientError> {
        self.http
            .request(ApiRequest::get(format!("/blogs/{}", id)))
            .await
    }

    /// Validates first; nothing is sent when the form is invalid.
    pub async fn create_blog(&self, form: &BlogForm) -> Result<BlogPost, AdminClientError> {
        form.validate(chrono::Utc::now())?;
        let post: BlogPost = self
            .http
            .request(ApiRequest::post("/blogs").body(form.to_body()))
            .await?;
        tracing::info!("Blog post created: id={}", post.id);
        Ok(post)
    }

    pub async fn update_blog(&self, id: &str, form: &BlogForm) -> Result<BlogPost, AdminClientError> {
        form.validate(chrono::Utc::now())?;
        self.http
            .request(ApiRequest::put(format!("/blogs/{}", id)).body(form.to_body()))
            .await
    }

    pub async fn delete_blog(&self, id: &str) -> Result<(), AdminClientError> {
        self.http
            .send(ApiRequest::delete(format!("/blogs/{}", id)))
            .await?;
        tracing::info!("Blog post deleted: id={}", id);
        Ok(())
    }

    pub async fn add_comment(&self, blog_id: &str, text: &str) -> Result<(), AdminClientError> {
        if text.trim().is_empty() {
            return Err(AdminClientError::InvalidRequest(
                "Comment cannot be empty".to_string(),
            ));
        }
        let body = serde_json::to_value(NewComment {
            text: text.trim().to_string(),
        })?;
        self.http
            .send(ApiRequest::post(format!("/blogs/{}/comments", blog_id)).json(body))
            .await
    }

    pub async fn delete_comment(
        &self,
        blog_id: &str,
        comment_id: &str,
    ) -> Result<(), AdminClientError> {
        self.http
            .send(ApiRequest::delete(format!(
                "/blogs/{}/comments/{}",
                blog_id, comment_id
            )))
            .await
    }

    // ==================== Подкасты ====================

    pub async fn list_podcasts(&self, query: &ListQuery) -> Result<Vec<Podcast>, AdminClientError> {
        self.http
            .request(ApiRequest::get("/podcast").query(query.to_pairs()))
            .await
    }

    pub async fn create_podcast(&self, form: &PodcastForm) -> Result<Podcast, AdminClientError> {
        form.validate(chrono::Utc::now())?;
        self.http
            .request(ApiRequest::post("/podcast").body(form.to_body()))
            .await
    }

    pub async fn update_podcast(
        &self,
        id: &str,
        form: &PodcastForm,
    ) -> Result<Podcast, AdminClientError> {
        form.validate(chrono::Utc::now())?;
        self.http
            .request(ApiRequest::put(format!("/podcast/{}", id)).body(form.to_body()))
            .await
    }

    pub async fn delete_podcast(&self, id: &str) -> Result<(), AdminClientError> {
        self.http
            .send(ApiRequest::delete(format!("/podcast/{}", id)))
            .await
    }

    // ==================== Обращения ====================

    pub async fn list_reports(&self, search: &str) -> Result<Vec<Report>, AdminClientError> {
        let query = ListQuery::new().search(search);
        self.http
            .request(ApiRequest::get("/reports").query(query.to_pairs()))
            .await
    }

    pub async fn mark_report_read(&self, id: &str) -> Result<(), AdminClientError> {
        self.http
            .send(ApiRequest::patch(format!("/reports/{}/read", id)))
            .await
    }

    // ==================== Дашборд ====================

    pub async fn list_activities(&self) -> Result<Vec<Activity>, AdminClientError> {
        self.http.request(ApiRequest::get("/activities")).await
    }

    /// Fetches users and blogs concurrently and aggregates the counts.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, AdminClientError> {
        let everything = ListQuery::new();
        let (users, blogs) = futures::try_join!(
            self.list_users(&everything),
            self.list_blogs(&everything)
        )?;
        Ok(DashboardStats::from_collections(&users, &blogs))
    }
}
