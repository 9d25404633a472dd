use crate::app::Route;
use crate::components::PageContext;
use admin_client::layout::Sidebar;
use admin_client::routes::{Page, NAV_ITEMS};
use admin_client::theme::Theme;
use gloo_events::EventListener;
use yew::prelude::*;
use yew_router::prelude::*;
use yew_router::scope_ext::{LocationHandle, RouterScopeExt};

fn viewport_width() -> u32 {
    gloo_utils::window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .map(|w| w as u32)
        .unwrap_or(1280)
}

#[derive(Properties, PartialEq)]
pub struct AdminLayoutProps {
    #[prop_or_default]
    pub children: Html,
}

pub enum Msg {
    Toggle,
    Resize(u32),
    Navigated,
    Dismiss,
    Logout,
}

/// Sidebar plus scrollable content region for every admin page.
pub struct AdminLayout {
    sidebar: Sidebar,
    page: PageContext,
    _resize: EventListener,
    _location: Option<LocationHandle>,
}

impl Component for AdminLayout {
    type Message = Msg;
    type Properties = AdminLayoutProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let resize = EventListener::new(&gloo_utils::window(), "resize", move |_| {
            link.send_message(Msg::Resize(viewport_width()))
        });
        let location = ctx
            .link()
            .add_location_listener(ctx.link().callback(|_| Msg::Navigated));

        Self {
            sidebar: Sidebar::for_width(viewport_width()),
            page: PageContext::from_link(ctx.link()),
            _resize: resize,
            _location: location,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let before = self.sidebar;
        match msg {
            Msg::Toggle => self.sidebar.toggle(),
            Msg::Resize(width) => self.sidebar.resize(width),
            Msg::Navigated => {
                self.sidebar.navigated();
                // the active item changed even if the sidebar did not
                return true;
            }
            Msg::Dismiss => self.sidebar.dismiss(),
            Msg::Logout => {
                log::info!("Logging out");
                self.page.api.logout();
                return false;
            }
        }
        self.sidebar != before
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let collapsed = self.sidebar.is_collapsed() && !self.sidebar.is_narrow();
        let current = ctx.link().route::<Route>();

        html! {
            <div class="flex h-screen overflow-hidden" style="background: var(--bg-light)">
                if self.sidebar.shows_backdrop() {
                    <div class="fixed inset-0 z-40 bg-black/40" onclick={ctx.link().callback(|_| Msg::Dismiss)} />
                }

                <aside class={classes!("sidebar", "transition-all", self.sidebar.panel_class())}
                       style={format!("background: {}", Theme::GRADIENT_SECONDARY)}>
                    <div class="flex items-center justify-between p-4">
                        if !collapsed {
                            <span class="text-lg font-bold text-white">{ "Admin Console" }</span>
                        }
                        <button class="btn-icon text-white" aria-label="Toggle sidebar"
                                onclick={ctx.link().callback(|_| Msg::Toggle)}>
                            { "☰" }
                        </button>
                    </div>

                    <nav class="flex flex-col gap-1 px-2">
                        { for NAV_ITEMS.iter().filter_map(|item| {
                            let route = Route::for_page(Page::from_path(item.path)?);
                            let active = current.as_ref() == Some(&route);
                            let class = classes!("nav-item", active.then_some("nav-item-active"));
                            Some(html! {
                                <Link<Route> to={route} classes={class}>
                                    if collapsed {
                                        { item.label.chars().next().unwrap_or_default() }
                                    } else {
                                        { item.label }
                                    }
                                </Link<Route>>
                            })
                        }) }
                    </nav>

                    <div class="absolute bottom-4 left-0 right-0 px-2">
                        <button class="nav-item w-full text-left" onclick={ctx.link().callback(|_| Msg::Logout)}>
                            { if collapsed { "⎋" } else { "Logout" } }
                        </button>
                    </div>
                </aside>

                <main class={classes!("flex-1", "overflow-y-auto", "transition-all", self.sidebar.content_margin())}>
                    if self.sidebar.is_narrow() {
                        <div class="p-4">
                            <button class="btn-icon" aria-label="Open menu" onclick={ctx.link().callback(|_| Msg::Toggle)}>
                                { "☰" }
                            </button>
                        </div>
                    }
                    <div class="p-6">
                        { ctx.props().children.clone() }
                    </div>
                </main>
            </div>
        }
    }
}
