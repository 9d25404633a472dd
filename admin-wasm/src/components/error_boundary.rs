use yew::prelude::*;

/// Lets a page hand a failure it cannot render around to the nearest boundary.
#[derive(Clone, PartialEq)]
pub struct ErrorReporter(Callback<String>);

impl ErrorReporter {
    pub fn report(&self, message: impl Into<String>) {
        self.0.emit(message.into());
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self(Callback::from(|message: String| {
            log::error!("Unhandled page error: {}", message)
        }))
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorBoundaryProps {
    #[prop_or_default]
    pub children: Html,
}

pub enum Msg {
    Failed(String),
    Retry,
}

pub struct ErrorBoundary {
    reporter: ErrorReporter,
    error: Option<String>,
    /// Bumped on retry so the children are mounted from scratch.
    attempt: u32,
}

impl Component for ErrorBoundary {
    type Message = Msg;
    type Properties = ErrorBoundaryProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            reporter: ErrorReporter(ctx.link().callback(Msg::Failed)),
            error: None,
            attempt: 0,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Failed(message) => {
                gloo_console::error!(format!("Page failed: {}", message));
                self.error = Some(message);
                true
            }
            Msg::Retry => {
                self.error = None;
                self.attempt += 1;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if let Some(error) = &self.error {
            return html! {
                <div class="min-h-[60vh] flex items-center justify-center p-6">
                    <div class="card max-w-md w-full text-center p-8">
                        <h2 class="text-2xl font-bold mb-2">{ "Something went wrong" }</h2>
                        <p class="text-secondary mb-6">{ error }</p>
                        <button class="btn btn-primary" onclick={ctx.link().callback(|_| Msg::Retry)}>
                            { "Retry" }
                        </button>
                    </div>
                </div>
            };
        }

        html! {
            <ContextProvider<ErrorReporter> context={self.reporter.clone()}>
                <div key={self.attempt} class="contents">
                    { ctx.props().children.clone() }
                </div>
            </ContextProvider<ErrorReporter>>
        }
    }
}
