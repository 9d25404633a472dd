use crate::components::list_view::{render_list, SearchBar, StatCard};
use crate::components::modal::{ConfirmDialog, Modal};
use crate::components::podcast_editor::PodcastEditor;
use crate::components::PageContext;
use crate::pages::{action_failed, filter_select, refetch, save_failed};
use admin_client::dashboard::PodcastStats;
use admin_client::error::AdminClientError;
use admin_client::forms::{PodcastForm, ValidationErrors};
use admin_client::list::{Collection, ListQuery, ListState};
use admin_client::models::{Podcast, User};
use admin_client::theme::status_color;
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const STATUS_FILTERS: [(&str, &str); 4] = [
    ("all", "All Statuses"),
    ("draft", "Draft"),
    ("published", "Published"),
    ("scheduled", "Scheduled"),
];

const SORT_OPTIONS: [(&str, &str); 3] = [
    ("createdAt", "Sort by Date"),
    ("title", "Sort by Title"),
    ("views", "Sort by Views"),
];

#[derive(Clone, PartialEq)]
enum Editing {
    New,
    Existing(Podcast),
}

pub enum Msg {
    Fetch,
    Fetched(u64, Result<Vec<Podcast>, AdminClientError>),
    AuthorsLoaded(Result<Vec<User>, AdminClientError>),
    Search(String),
    Status(String),
    SortBy(String),

    Create,
    Edit(Podcast),
    AskDelete(String),
    Close,

    Save(PodcastForm),
    Saved(Result<Podcast, AdminClientError>),
    Delete,
    Deleted(Result<(), AdminClientError>),
}

pub struct PodcastsPage {
    page: PageContext,
    podcasts: ListState<Podcast>,
    authors: Vec<User>,
    search: String,
    status: String,
    sort_by: String,
    debounce: Option<Timeout>,

    editing: Option<Editing>,
    deleting: Option<String>,
    busy: bool,
    errors: ValidationErrors,
}

impl PodcastsPage {
    fn card(&self, ctx: &Context<Self>, podcast: &Podcast) -> Html {
        let link = ctx.link();
        let (edit, id) = (podcast.clone(), podcast.id.clone());

        html! {
            <div key={podcast.id.clone()} class="card p-4 flex gap-4">
                if let Some(image) = &podcast.image {
                    <img src={image.clone()} alt={podcast.title.clone()} class="w-24 h-24 object-cover rounded" />
                }
                <div class="flex-1 min-w-0">
                    <div class="flex items-center gap-2">
                        <h3 class="font-semibold truncate">{ &podcast.title }</h3>
                        <span class="badge" style={format!("background: {}", status_color(podcast.status.as_str()))}>
                            { podcast.status.to_string() }
                        </span>
                    </div>
                    <p class="text-sm text-secondary line-clamp-2">
                        { if podcast.excerpt.is_empty() { &podcast.description } else { &podcast.excerpt } }
                    </p>
                    <div class="flex flex-wrap gap-3 text-xs text-secondary mt-2">
                        if let Some(author) = &podcast.author {
                            <span>{ author.display_name() }</span>
                        }
                        if let Some(duration) = &podcast.duration {
                            <span>{ duration }</span>
                        }
                        <span>{ format!("{} views", podcast.views) }</span>
                        if podcast.audio_url.is_some() {
                            <span>{ "Audio attached" }</span>
                        }
                    </div>
                </div>
                <div class="flex flex-col gap-2">
                    <button class="btn btn-secondary" onclick={link.callback(move |_| Msg::Edit(edit.clone()))}>{ "Edit" }</button>
                    <button class="btn btn-danger" onclick={link.callback(move |_| Msg::AskDelete(id.clone()))}>{ "Delete" }</button>
                </div>
            </div>
        }
    }
}

impl Component for PodcastsPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let page = PageContext::from_link(ctx.link());

        let api = page.api.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::AuthorsLoaded(api.list_users(&ListQuery::new()).await));
        });
        ctx.link().send_message(Msg::Fetch);

        Self {
            page,
            podcasts: ListState::new(),
            authors: Vec::new(),
            search: String::new(),
            status: "all".to_string(),
            sort_by: "createdAt".to_string(),
            debounce: None,
            editing: None,
            deleting: None,
            busy: false,
            errors: ValidationErrors::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Fetch => {
                self.debounce = None;
                let ticket = self.podcasts.begin();
                let query = ListQuery::new()
                    .search(self.search.clone())
                    .status(self.status.clone())
                    .sort_by(self.sort_by.clone());

                let api = self.page.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Fetched(ticket, api.list_podcasts(&query).await));
                });
            }
            Msg::Fetched(ticket, result) => {
                if let Err(e) = &result {
                    if self.podcasts.is_current(ticket) {
                        action_failed(&self.page, e, "Failed to fetch podcasts");
                    }
                }
                return self.podcasts.finish(ticket, result, "Failed to fetch podcasts");
            }
            Msg::AuthorsLoaded(Ok(users)) => self.authors = users,
            Msg::AuthorsLoaded(Err(e)) => action_failed(&self.page, &e, "Failed to fetch authors"),
            Msg::Search(value) => {
                self.search = value;
                self.debounce = refetch(ctx.link(), Collection::Podcasts, || Msg::Fetch);
            }
            Msg::Status(value) => {
                self.status = value;
                self.debounce = refetch(ctx.link(), Collection::Podcasts, || Msg::Fetch);
            }
            Msg::SortBy(value) => {
                self.sort_by = value;
                self.debounce = refetch(ctx.link(), Collection::Podcasts, || Msg::Fetch);
            }

            Msg::Create => {
                self.errors = ValidationErrors::new();
                self.editing = Some(Editing::New);
            }
            Msg::Edit(podcast) => {
                self.errors = ValidationErrors::new();
                self.editing = Some(Editing::Existing(podcast));
            }
            Msg::AskDelete(id) => self.deleting = Some(id),
            Msg::Close => {
                if self.busy {
                    return false;
                }
                self.editing = None;
                self.deleting = None;
            }

            Msg::Save(form) => {
                let Some(editing) = self.editing.clone() else {
                    return false;
                };
                self.busy = true;
                self.errors = ValidationErrors::new();

                let api = self.page.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = match editing {
                        Editing::New => api.create_podcast(&form).await,
                        Editing::Existing(podcast) => api.update_podcast(&podcast.id, &form).await,
                    };
                    link.send_message(Msg::Saved(result));
                });
            }
            Msg::Saved(Ok(podcast)) => {
                let created = self.editing == Some(Editing::New);
                log::info!("Saved podcast {}", podcast.id);
                self.busy = false;
                self.editing = None;
                self.page.toaster.success(if created {
                    "Podcast created successfully!"
                } else {
                    "Podcast updated successfully!"
                });
                ctx.link().send_message(Msg::Fetch);
            }
            Msg::Saved(Err(e)) => {
                self.busy = false;
                self.errors = save_failed(&self.page, e, "Failed to save podcast");
            }
            Msg::Delete => {
                let Some(id) = self.deleting.clone() else {
                    return false;
                };
                self.busy = true;

                let api = self.page.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Deleted(api.delete_podcast(&id).await));
                });
            }
            Msg::Deleted(result) => {
                self.busy = false;
                self.deleting = None;
                match result {
                    Ok(()) => {
                        self.page.toaster.success("Podcast deleted successfully!");
                        ctx.link().send_message(Msg::Fetch);
                    }
                    Err(e) => action_failed(&self.page, &e, "Failed to delete podcast"),
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let stats = PodcastStats::from_podcasts(self.podcasts.items());

        html! {
            <div class="space-y-6">
                <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                    <div>
                        <h1 class="text-3xl font-bold">{ "Podcasts" }</h1>
                        <p class="text-secondary">{ "Episodes, audio and publishing schedule" }</p>
                    </div>
                    <button class="btn btn-primary" onclick={link.callback(|_| Msg::Create)}>{ "New podcast" }</button>
                </div>

                <div class="grid gap-4 sm:grid-cols-3">
                    <StatCard label="Total" value={stats.total.to_string()} />
                    <StatCard label="Published" value={stats.published.to_string()} accent={status_color("published")} />
                    <StatCard label="Scheduled" value={stats.scheduled.to_string()} accent={status_color("scheduled")} />
                </div>

                <div class="card p-4 flex flex-col md:flex-row gap-3">
                    <SearchBar value={self.search.clone()} placeholder="Search podcasts..."
                               on_input={link.callback(Msg::Search)} />
                    { filter_select(&STATUS_FILTERS, &self.status, link.callback(Msg::Status)) }
                    { filter_select(&SORT_OPTIONS, &self.sort_by, link.callback(Msg::SortBy)) }
                </div>

                { render_list(
                    self.podcasts.view(),
                    "No podcasts found",
                    link.callback(|_| Msg::Fetch),
                    |podcast| self.card(ctx, podcast),
                ) }

                if let Some(editing) = &self.editing {
                    <Modal
                        title={if *editing == Editing::New { "New podcast" } else { "Edit podcast" }}
                        wide={true}
                        on_close={link.callback(|_| Msg::Close)}
                    >
                        <PodcastEditor
                            initial={match editing {
                                Editing::New => PodcastForm::default(),
                                Editing::Existing(podcast) => PodcastForm::from_podcast(podcast),
                            }}
                            authors={self.authors.clone()}
                            submit_label={if *editing == Editing::New { "Create" } else { "Save changes" }}
                            busy={self.busy}
                            errors={self.errors.clone()}
                            on_submit={link.callback(Msg::Save)}
                            on_cancel={link.callback(|_| Msg::Close)}
                        />
                    </Modal>
                }

                if self.deleting.is_some() {
                    <ConfirmDialog
                        message="Are you sure you want to delete this podcast?"
                        busy={self.busy}
                        on_confirm={link.callback(|_| Msg::Delete)}
                        on_cancel={link.callback(|_| Msg::Close)}
                    />
                }
            </div>
        }
    }
}
