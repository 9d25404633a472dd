pub mod create_blog;
pub mod home;
pub mod login;
pub mod manage_blog;
pub mod podcasts;
pub mod registrations;
pub mod reports;

use crate::components::fields::select_value;
use crate::components::PageContext;
use admin_client::error::AdminClientError;
use admin_client::forms::ValidationErrors;
use admin_client::list::Collection;
use gloo_timers::callback::Timeout;
use yew::prelude::*;

/// Turns a failed save into inline field errors, or a toast for anything else.
pub fn save_failed(page: &PageContext, err: AdminClientError, fallback: &str) -> ValidationErrors {
    match err {
        AdminClientError::Validation(errors) => errors,
        AdminClientError::Upload(e) => {
            page.toaster.error(e.to_string());
            ValidationErrors::new()
        }
        other => {
            log::error!("{}: {}", fallback, other);
            page.toaster.error(other.toast_message(fallback));
            ValidationErrors::new()
        }
    }
}

/// Toast for a failed action. A response the client could not decode goes
/// to the error boundary instead.
pub fn action_failed(page: &PageContext, err: &AdminClientError, fallback: &str) {
    log::error!("{}: {}", fallback, err);
    match err {
        AdminClientError::SerializationError(_) => page.reporter.report(err.to_string()),
        _ => page.toaster.error(err.toast_message(fallback)),
    }
}

/// Fetches again after a search, filter or sort edit, debounced per collection.
/// The returned timeout must be kept alive; replacing it cancels the previous one.
pub fn refetch<C: Component>(
    link: &yew::html::Scope<C>,
    collection: Collection,
    msg: impl FnOnce() -> C::Message + 'static,
) -> Option<Timeout> {
    match collection.query_debounce() {
        Some(delay) => {
            let link = link.clone();
            Some(Timeout::new(delay.as_millis() as u32, move || {
                link.send_message(msg())
            }))
        }
        None => {
            link.send_message(msg());
            None
        }
    }
}

pub fn filter_select(
    options: &[(&'static str, &'static str)],
    current: &str,
    onchange: Callback<String>,
) -> Html {
    let onchange = Callback::from(move |e: Event| onchange.emit(select_value(&e)));
    html! {
        <select class="input" {onchange}>
            { for options.iter().map(|(value, label)| html! {
                <option value={*value} selected={*value == current}>{ *label }</option>
            }) }
        </select>
    }
}
