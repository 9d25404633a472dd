pub mod blog_editor;
pub mod error_boundary;
pub mod fields;
pub mod layout;
pub mod list_view;
pub mod modal;
pub mod podcast_editor;
pub mod registration_editor;
pub mod skeleton;
pub mod tag_input;
pub mod toast;

use crate::services::{build_client, ApiContext};
use error_boundary::ErrorReporter;
use toast::Toaster;
use yew::html::Scope;
use yew::prelude::*;
use yew_router::scope_ext::RouterScopeExt;

/// Contexts every page needs.
#[derive(Clone)]
pub struct PageContext {
    pub api: ApiContext,
    pub toaster: Toaster,
    pub reporter: ErrorReporter,
}

impl PageContext {
    pub fn from_link<C: Component>(link: &Scope<C>) -> Self {
        let api = link
            .context::<ApiContext>(Callback::noop())
            .map(|(api, _)| api)
            .unwrap_or_else(|| {
                log::warn!("No API context, creating a standalone client");
                build_client(link.navigator())
            });
        let toaster = link
            .context::<Toaster>(Callback::noop())
            .map(|(toaster, _)| toaster)
            .unwrap_or_default();
        let reporter = link
            .context::<ErrorReporter>(Callback::noop())
            .map(|(reporter, _)| reporter)
            .unwrap_or_default();

        Self {
            api,
            toaster,
            reporter,
        }
    }
}
