use gloo_timers::callback::Timeout;
use std::collections::HashMap;
use yew::prelude::*;

const TOAST_LIFETIME_MS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            Self::Success => "toast toast-success",
            Self::Error => "toast toast-error",
            Self::Info => "toast toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// Handle pages use to raise a toast.
#[derive(Clone, PartialEq)]
pub struct Toaster(Callback<Toast>);

impl Default for Toaster {
    fn default() -> Self {
        Self(Callback::from(|toast: Toast| {
            log::info!("{:?}: {}", toast.kind, toast.message)
        }))
    }
}

impl Toaster {
    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(ToastKind::Info, message);
    }

    fn show(&self, kind: ToastKind, message: impl Into<String>) {
        self.0.emit(Toast {
            kind,
            message: message.into(),
        });
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    #[prop_or_default]
    pub children: Html,
}

pub enum Msg {
    Show(Toast),
    Dismiss(u32),
}

pub struct ToastProvider {
    toaster: Toaster,
    toasts: Vec<(u32, Toast)>,
    timers: HashMap<u32, Timeout>,
    next_id: u32,
}

impl Component for ToastProvider {
    type Message = Msg;
    type Properties = ToastProviderProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            toaster: Toaster(ctx.link().callback(Msg::Show)),
            toasts: Vec::new(),
            timers: HashMap::new(),
            next_id: 0,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Show(toast) => {
                let id = self.next_id;
                self.next_id = self.next_id.wrapping_add(1);

                let link = ctx.link().clone();
                self.timers.insert(
                    id,
                    Timeout::new(TOAST_LIFETIME_MS, move || {
                        link.send_message(Msg::Dismiss(id))
                    }),
                );
                self.toasts.push((id, toast));
                true
            }
            Msg::Dismiss(id) => {
                self.timers.remove(&id);
                let before = self.toasts.len();
                self.toasts.retain(|(toast_id, _)| *toast_id != id);
                self.toasts.len() != before
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <ContextProvider<Toaster> context={self.toaster.clone()}>
                { ctx.props().children.clone() }
                <div class="fixed top-4 right-4 z-[60] flex flex-col gap-2">
                    { for self.toasts.iter().map(|(id, toast)| {
                        let id = *id;
                        let dismiss = ctx.link().callback(move |_| Msg::Dismiss(id));
                        html! {
                            <div key={id} class={toast.kind.class()} onclick={dismiss}>
                                { &toast.message }
                            </div>
                        }
                    }) }
                </div>
            </ContextProvider<Toaster>>
        }
    }
}
