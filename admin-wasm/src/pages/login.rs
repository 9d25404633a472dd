use crate::app::Route;
use crate::components::fields::input_value;
use crate::components::PageContext;
use admin_client::error::AdminClientError;
use admin_client::theme::Theme;
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::scope_ext::RouterScopeExt;

/// Delay between the success toast and the redirect.
const REDIRECT_DELAY_MS: u32 = 1_000;

pub enum Msg {
    Email(String),
    Password(String),
    TogglePassword,
    Submit,
    LoggedIn(Result<String, AdminClientError>),
    Redirect,
}

pub struct LoginPage {
    page: PageContext,
    email: String,
    password: String,
    show_password: bool,
    loading: bool,
    error: Option<String>,
    redirect: Option<Timeout>,
}

impl Component for LoginPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            page: PageContext::from_link(ctx.link()),
            email: String::new(),
            password: String::new(),
            show_password: false,
            loading: false,
            error: None,
            redirect: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Email(v) => {
                self.email = v;
                self.error = None;
            }
            Msg::Password(v) => {
                self.password = v;
                self.error = None;
            }
            Msg::TogglePassword => self.show_password = !self.show_password,
            Msg::Submit => {
                if self.loading {
                    return false;
                }
                self.loading = true;
                self.error = None;

                let api = self.page.api.clone();
                let email = self.email.clone();
                let password = self.password.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api.login(&email, &password).await;
                    link.send_message(Msg::LoggedIn(result));
                });
            }
            Msg::LoggedIn(Ok(_)) => {
                self.loading = false;
                self.page.toaster.success("Login successful! Redirecting...");
                let link = ctx.link().clone();
                self.redirect = Some(Timeout::new(REDIRECT_DELAY_MS, move || {
                    link.send_message(Msg::Redirect)
                }));
            }
            Msg::LoggedIn(Err(e)) => {
                log::warn!("Login failed: {}", e);
                self.loading = false;
                let message = e.login_message();
                self.page.toaster.error(message.clone());
                self.error = Some(message);
            }
            Msg::Redirect => {
                self.redirect = None;
                match ctx.link().navigator() {
                    Some(navigator) => navigator.push(&Route::Dashboard),
                    None => log::error!("No router available for the post-login redirect"),
                }
                return false;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });
        let password_type = if self.show_password { "text" } else { "password" };

        html! {
            <div class="min-h-screen flex items-center justify-center p-4"
                 style={format!("background: {}", Theme::GRADIENT_PRIMARY)}>
                <div class="card w-full max-w-md p-8">
                    <h1 class="text-2xl font-bold mb-1">{ "Welcome back" }</h1>
                    <p class="text-secondary mb-6">{ "Sign in to the admin console" }</p>

                    if let Some(error) = &self.error {
                        <div class="mb-4 rounded border border-red-200 bg-red-50 p-3 text-sm text-red-700">
                            { error }
                        </div>
                    }

                    <form class="space-y-4" {onsubmit}>
                        <div>
                            <label class="label">{ "Email" }</label>
                            <input type="email" class="input w-full" autocomplete="username"
                                   value={self.email.clone()} disabled={self.loading}
                                   oninput={link.callback(|e: InputEvent| Msg::Email(input_value(&e)))} />
                        </div>
                        <div>
                            <label class="label">{ "Password" }</label>
                            <div class="flex gap-2">
                                <input type={password_type} class="input w-full" autocomplete="current-password"
                                       value={self.password.clone()} disabled={self.loading}
                                       oninput={link.callback(|e: InputEvent| Msg::Password(input_value(&e)))} />
                                <button type="button" class="btn btn-secondary"
                                        onclick={link.callback(|_| Msg::TogglePassword)}>
                                    { if self.show_password { "Hide" } else { "Show" } }
                                </button>
                            </div>
                        </div>
                        <button type="submit" class="btn btn-primary w-full" disabled={self.loading}>
                            { if self.loading { "Signing in..." } else { "Sign in" } }
                        </button>
                    </form>
                </div>
            </div>
        }
    }
}
