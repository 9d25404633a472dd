use crate::components::error_boundary::ErrorBoundary;
use crate::components::layout::AdminLayout;
use crate::components::toast::ToastProvider;
use crate::pages::create_blog::CreateBlogPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::manage_blog::ManageBlogPage;
use crate::pages::podcasts::PodcastsPage;
use crate::pages::registrations::RegistrationsPage;
use crate::pages::reports::ReportsPage;
use crate::services::{build_client, ApiContext, LocalStorageTokenStore};
use admin_client::routes::{self, Page};
use admin_client::session::TokenStore;
use yew::prelude::*;
use yew_router::prelude::*;
use yew_router::scope_ext::RouterScopeExt;

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/login")]
    Login,
    #[at("/admin")]
    Dashboard,
    #[at("/admin/create-blog")]
    CreateBlog,
    #[at("/admin/manage-blog")]
    ManageBlog,
    #[at("/admin/registrations")]
    Registrations,
    #[at("/admin/show-reports")]
    ShowReports,
    #[at("/admin/podcasts")]
    Podcasts,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub fn for_page(page: Page) -> Self {
        match page {
            Page::Login => Self::Login,
            Page::Dashboard => Self::Dashboard,
            Page::CreateBlog => Self::CreateBlog,
            Page::ManageBlog => Self::ManageBlog,
            Page::Registrations => Self::Registrations,
            Page::ShowReports => Self::ShowReports,
            Page::Podcasts => Self::Podcasts,
        }
    }
}

/// Picks the page for `route`, sending anything unknown or unauthenticated
/// to the login screen.
fn switch(route: Route) -> Html {
    let authenticated = LocalStorageTokenStore.load().is_some();
    let page = routes::resolve(&route.to_path(), authenticated);

    if Route::for_page(page) != route {
        log::debug!("Redirecting {:?} to {:?}", route, page);
        return html! { <Redirect<Route> to={Route::for_page(page)} /> };
    }

    let content = match page {
        Page::Login => return html! { <LoginPage /> },
        Page::Dashboard => html! { <HomePage /> },
        Page::CreateBlog => html! { <CreateBlogPage /> },
        Page::ManageBlog => html! { <ManageBlogPage /> },
        Page::Registrations => html! { <RegistrationsPage /> },
        Page::ShowReports => html! { <ReportsPage /> },
        Page::Podcasts => html! { <PodcastsPage /> },
    };

    html! {
        <AdminLayout>
            <ErrorBoundary>
                { content }
            </ErrorBoundary>
        </AdminLayout>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Shell />
        </BrowserRouter>
    }
}

/// Owns the API client; lives inside the router so the session can navigate.
pub struct Shell {
    api: ApiContext,
}

impl Component for Shell {
    type Message = ();
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            api: build_client(ctx.link().navigator()),
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <ContextProvider<ApiContext> context={self.api.clone()}>
                <ToastProvider>
                    <ErrorBoundary>
                        <Switch<Route> render={switch} />
                    </ErrorBoundary>
                </ToastProvider>
            </ContextProvider<ApiContext>>
        }
    }
}
