//! Browser implementations of the client seams: localStorage token store,
//! router-backed navigator and a `gloo-net` transport.

use crate::app::Route;
use admin_client::config::{ClientConfig, DEFAULT_API_URL};
use admin_client::error::AdminClientError;
use admin_client::export::CSV_MIME;
use admin_client::session::{Navigator, Session, TokenStore, TOKEN_KEY};
use admin_client::theme::Theme;
use admin_client::transport::{
    ApiRequest, ApiResponse, FormPart, HttpTransport, MultipartForm, RequestBody, TransportError,
};
use admin_client::AdminClient;
use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_storage::{LocalStorage, Storage};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, FormData, HtmlAnchorElement, HtmlElement, Url};
use yew_router::prelude::Routable;

/// Client handle shared through a Yew context.
#[derive(Clone)]
pub struct ApiContext(pub Rc<AdminClient>);

impl PartialEq for ApiContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for ApiContext {
    type Target = AdminClient;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Base URL baked in at build time.
pub fn api_base_url() -> &'static str {
    option_env!("ADMIN_API_URL").unwrap_or(DEFAULT_API_URL)
}

pub fn build_client(navigator: Option<yew_router::navigator::Navigator>) -> ApiContext {
    let config = ClientConfig::new(api_base_url());
    let transport = GlooTransport::new(config.base_url.clone(), config.timeout);
    let session = Session::new(
        Rc::new(LocalStorageTokenStore),
        Rc::new(RouterNavigator { inner: navigator }),
    );
    ApiContext(Rc::new(AdminClient::new(Rc::new(transport), session, config)))
}

// ==================== Токен ====================

/// Token stored as a raw string under `token`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageTokenStore;

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        LocalStorage::raw()
            .get_item(TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
    }

    fn save(&self, token: &str) -> Result<(), AdminClientError> {
        LocalStorage::raw()
            .set_item(TOKEN_KEY, token)
            .map_err(|e| AdminClientError::Storage(format!("{:?}", e)))
    }

    fn clear(&self) {
        if let Err(e) = LocalStorage::raw().remove_item(TOKEN_KEY) {
            log::warn!("Failed to clear token: {:?}", e);
        }
    }
}

// ==================== Навигация ====================

pub struct RouterNavigator {
    inner: Option<yew_router::navigator::Navigator>,
}

impl Navigator for RouterNavigator {
    fn current_path(&self) -> String {
        gloo_utils::window()
            .location()
            .pathname()
            .unwrap_or_default()
    }

    fn navigate(&self, path: &str) {
        match (&self.inner, Route::recognize(path)) {
            (Some(navigator), Some(route)) => navigator.push(&route),
            _ => {
                if let Err(e) = gloo_utils::window().location().set_href(path) {
                    log::error!("Navigation to {} failed: {:?}", path, e);
                }
            }
        }
    }
}

// ==================== HTTP ====================

pub struct GlooTransport {
    base_url: String,
    timeout: Duration,
}

impl GlooTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

fn js_error(err: JsValue) -> TransportError {
    TransportError::Network(format!("{:?}", err))
}

fn network_error(err: gloo_net::Error) -> TransportError {
    TransportError::Network(err.to_string())
}

fn form_data(form: &MultipartForm) -> Result<FormData, TransportError> {
    let data = FormData::new().map_err(js_error)?;
    for part in form.parts() {
        match part {
            FormPart::Text { name, value } => {
                data.append_with_str(name, value).map_err(js_error)?;
            }
            FormPart::File {
                name,
                file_name,
                mime,
                bytes,
            } => {
                let array: JsValue = js_sys::Uint8Array::from(bytes.as_slice()).into();
                let blob = blob_from(&array, mime).map_err(js_error)?;
                data.append_with_blob_and_filename(name, &blob, file_name)
                    .map_err(js_error)?;
            }
        }
    }
    Ok(data)
}

fn blob_from(part: &JsValue, mime: &str) -> Result<Blob, JsValue> {
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    Blob::new_with_u8_array_sequence_and_options(&js_sys::Array::of1(part), &options)
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = request.url(&self.base_url);
        let mut builder = match request.method.as_str() {
            "GET" => Request::get(&url),
            "POST" => Request::post(&url),
            "PUT" => Request::put(&url),
            "PATCH" => Request::patch(&url),
            "DELETE" => Request::delete(&url),
            other => {
                return Err(TransportError::Network(format!(
                    "Unsupported method: {}",
                    other
                )))
            }
        };

        if !request.query.is_empty() {
            builder = builder.query(
                request
                    .query
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            );
        }
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let prepared = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(form) => builder.body(form_data(form)?),
        }
        .map_err(network_error)?;

        let exchange = Box::pin(async move {
            let response = prepared.send().await.map_err(network_error)?;
            let status = response.status();
            let body = response.text().await.map_err(network_error)?;
            Ok::<ApiResponse, TransportError>(ApiResponse::new(status, body))
        });
        let deadline = Box::pin(gloo_timers::future::sleep(self.timeout));

        match select(exchange, deadline).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(TransportError::Timeout),
        }
    }

    async fn sleep(&self, delay: Duration) {
        gloo_timers::future::sleep(delay).await;
    }
}

// ==================== Файлы и документ ====================

/// Reads a picked file into memory.
pub async fn read_file(file: &File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read {}: {:?}", file.name(), e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Saves `csv` through a temporary object URL.
pub fn download_csv(file_name: &str, csv: &str) -> Result<(), JsValue> {
    let options = BlobPropertyBag::new();
    options.set_type(CSV_MIME);
    let blob = Blob::new_with_str_sequence_and_options(
        &js_sys::Array::of1(&JsValue::from_str(csv)),
        &options,
    )?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = gloo_utils::document()
        .create_element("a")?
        .unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url)
}

/// Writes the design tokens onto the document root.
pub fn apply_theme() {
    let Some(root) = gloo_utils::document().document_element() else {
        return;
    };
    let Ok(root) = root.dyn_into::<HtmlElement>() else {
        return;
    };
    let style = root.style();
    for (name, value) in Theme::declarations() {
        if let Err(e) = style.set_property(name, value) {
            log::warn!("Failed to set {}: {:?}", name, e);
        }
    }
    log::debug!("Theme applied");
}
