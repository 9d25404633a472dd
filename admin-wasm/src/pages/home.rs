use crate::app::Route;
use crate::components::list_view::StatCard;
use crate::components::skeleton::SkeletonRows;
use crate::components::PageContext;
use crate::pages::action_failed;
use admin_client::dashboard::{time_ago, DashboardStats};
use admin_client::error::AdminClientError;
use admin_client::models::Activity;
use admin_client::theme::status_color;
use chrono::Utc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

const FEED_LENGTH: usize = 10;

pub enum Msg {
    Load,
    StatsLoaded(Result<DashboardStats, AdminClientError>),
    ActivitiesLoaded(Result<Vec<Activity>, AdminClientError>),
}

pub struct HomePage {
    page: PageContext,
    stats: Option<DashboardStats>,
    stats_error: Option<String>,
    activities: Vec<Activity>,
    loading_activities: bool,
}

impl Component for HomePage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Load);
        Self {
            page: PageContext::from_link(ctx.link()),
            stats: None,
            stats_error: None,
            activities: Vec::new(),
            loading_activities: true,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Load => {
                self.stats = None;
                self.stats_error = None;
                self.loading_activities = true;

                let api = self.page.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::StatsLoaded(api.dashboard_stats().await));
                });

                let api = self.page.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::ActivitiesLoaded(api.list_activities().await));
                });
            }
            Msg::StatsLoaded(Ok(stats)) => {
                log::debug!("Dashboard stats: {:?}", stats);
                self.stats = Some(stats);
            }
            Msg::StatsLoaded(Err(e)) => {
                action_failed(&self.page, &e, "Failed to fetch dashboard stats");
                self.stats_error = Some(e.toast_message("Failed to fetch dashboard stats"));
            }
            Msg::ActivitiesLoaded(result) => {
                self.loading_activities = false;
                match result {
                    Ok(activities) => self.activities = activities,
                    Err(e) => action_failed(&self.page, &e, "Failed to fetch recent activities"),
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let now = Utc::now();

        let stats = match (&self.stats, &self.stats_error) {
            (Some(stats), _) => html! {
                <div class="grid gap-4 sm:grid-cols-2 xl:grid-cols-4">
                    <StatCard label="Total users" value={stats.total_users.to_string()} />
                    <StatCard label="Active users" value={stats.active_users.to_string()}
                              accent="var(--success)" />
                    <StatCard label="Total posts" value={stats.total_posts.to_string()} />
                    <StatCard label="Total views" value={stats.total_views.to_string()}
                              accent="var(--primary)" />
                    <StatCard label="Published" value={stats.published_posts.to_string()}
                              accent={status_color("published")} />
                    <StatCard label="Drafts" value={stats.draft_posts.to_string()}
                              accent={status_color("draft")} />
                    <StatCard label="Scheduled" value={stats.scheduled_posts.to_string()}
                              accent={status_color("scheduled")} />
                </div>
            },
            (None, Some(error)) => html! {
                <div class="card p-6 text-center">
                    <p class="text-red-600 mb-4">{ error }</p>
                    <button class="btn btn-primary" onclick={ctx.link().callback(|_| Msg::Load)}>
                        { "Try again" }
                    </button>
                </div>
            },
            (None, None) => html! { <SkeletonRows rows={2} /> },
        };

        html! {
            <div class="space-y-8">
                <div>
                    <h1 class="text-3xl font-bold">{ "Dashboard" }</h1>
                    <p class="text-secondary">{ "Overview of users, posts and recent activity" }</p>
                </div>

                { stats }

                <div class="grid gap-6 lg:grid-cols-3">
                    <section class="card p-6 lg:col-span-2">
                        <h2 class="text-xl font-semibold mb-4">{ "Recent activity" }</h2>
                        if self.loading_activities {
                            <SkeletonRows rows={3} />
                        } else if self.activities.is_empty() {
                            <p class="text-secondary">{ "No recent activity" }</p>
                        } else {
                            <ul class="divide-y">
                                { for self.activities.iter().take(FEED_LENGTH).map(|activity| html! {
                                    <li class="py-3 flex justify-between gap-4">
                                        <span>
                                            <strong>{ &activity.user }</strong>
                                            { " " }
                                            { &activity.action }
                                        </span>
                                        <span class="text-sm text-secondary whitespace-nowrap">
                                            { activity.created_at.map(|at| time_ago(at, now)).unwrap_or_default() }
                                        </span>
                                    </li>
                                }) }
                            </ul>
                        }
                    </section>

                    <section class="card p-6">
                        <h2 class="text-xl font-semibold mb-4">{ "Quick actions" }</h2>
                        <div class="flex flex-col gap-3">
                            <Link<Route> to={Route::CreateBlog} classes="btn btn-primary">{ "Create blog post" }</Link<Route>>
                            <Link<Route> to={Route::Registrations} classes="btn btn-secondary">{ "View registrations" }</Link<Route>>
                            <Link<Route> to={Route::ManageBlog} classes="btn btn-secondary">{ "Manage blog" }</Link<Route>>
                        </div>
                    </section>
                </div>
            </div>
        }
    }
}
