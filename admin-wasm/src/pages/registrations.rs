use crate::components::list_view::{render_list, SearchBar, StatCard};
use crate::components::modal::{ConfirmDialog, Modal};
use crate::components::registration_editor::RegistrationEditor;
use crate::components::PageContext;
use crate::pages::{action_failed, filter_select, refetch, save_failed};
use crate::services::download_csv;
use admin_client::dashboard::RegistrationStats;
use admin_client::error::AdminClientError;
use admin_client::export::{registrations_csv, REGISTRATIONS_FILE};
use admin_client::forms::{RegistrationForm, ValidationErrors};
use admin_client::list::{Collection, ListQuery, ListState};
use admin_client::models::{User, UserStatus};
use chrono::Utc;
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const STATUS_FILTERS: [(&str, &str); 4] = [
    ("all", "All Statuses"),
    ("pending", "Pending"),
    ("active", "Active"),
    ("inactive", "Inactive"),
];

const SORT_OPTIONS: [(&str, &str); 2] = [("createdAt", "Sort by Join Date"), ("name", "Sort by Name")];

/// Which record the editor modal is working on.
#[derive(Clone, PartialEq)]
enum Editing {
    New,
    Existing(User),
}

pub enum Msg {
    Fetch,
    Fetched(u64, Result<Vec<User>, AdminClientError>),
    Search(String),
    Status(String),
    SortBy(String),
    Export,

    Create,
    Edit(User),
    AskDelete(String),
    Close,

    Save(RegistrationForm),
    Saved(Result<User, AdminClientError>),
    Delete,
    Deleted(Result<(), AdminClientError>),
}

pub struct RegistrationsPage {
    page: PageContext,
    users: ListState<User>,
    search: String,
    status: String,
    sort_by: String,
    debounce: Option<Timeout>,

    editing: Option<Editing>,
    deleting: Option<String>,
    busy: bool,
    errors: ValidationErrors,
}

impl RegistrationsPage {
    fn row(&self, ctx: &Context<Self>, user: &User) -> Html {
        let link = ctx.link();
        let (edit, id) = (user.clone(), user.id.clone());
        let badge = match user.status {
            UserStatus::Active => "bg-green-100 text-green-700",
            UserStatus::Pending => "bg-amber-100 text-amber-700",
            UserStatus::Inactive | UserStatus::Other => "bg-gray-100 text-gray-600",
        };

        html! {
            <div key={user.id.clone()} class="card p-4 grid gap-2 md:grid-cols-6 md:items-center">
                <div class="md:col-span-2 min-w-0">
                    <p class="font-semibold truncate">{ &user.name }</p>
                    <p class="text-sm text-secondary truncate">{ &user.email }</p>
                </div>
                <p class="text-sm">{ &user.phone }</p>
                <p class="text-sm">{ &user.location }</p>
                <div class="flex gap-2 items-center">
                    <span class="text-sm">{ user.package.to_string() }</span>
                    <span class={classes!("badge", badge)}>{ user.status.to_string() }</span>
                </div>
                <div class="flex gap-2 md:justify-end">
                    <button class="btn btn-secondary" onclick={link.callback(move |_| Msg::Edit(edit.clone()))}>{ "Edit" }</button>
                    <button class="btn btn-danger" onclick={link.callback(move |_| Msg::AskDelete(id.clone()))}>{ "Delete" }</button>
                </div>
            </div>
        }
    }
}

impl Component for RegistrationsPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Fetch);
        Self {
            page: PageContext::from_link(ctx.link()),
            users: ListState::new(),
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
                let ticket = self.users.begin();
                let query = ListQuery::new()
                    .search(self.search.clone())
                    .status(self.status.clone())
                    .sort_by(self.sort_by.clone());

                let api = self.page.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Fetched(ticket, api.list_users(&query).await));
                });
            }
            Msg::Fetched(ticket, result) => {
                if let Err(e) = &result {
                    if self.users.is_current(ticket) {
                        action_failed(&self.page, e, "Failed to fetch users");
                    }
                }
                return self.users.finish(ticket, result, "Failed to fetch users");
            }
            Msg::Search(value) => {
                self.search = value;
                self.debounce = refetch(ctx.link(), Collection::Users, || Msg::Fetch);
            }
            Msg::Status(value) => {
                self.status = value;
                self.debounce = refetch(ctx.link(), Collection::Users, || Msg::Fetch);
            }
            Msg::SortBy(value) => {
                self.sort_by = value;
                self.debounce = refetch(ctx.link(), Collection::Users, || Msg::Fetch);
            }
            Msg::Export => {
                let csv = registrations_csv(self.users.items());
                match download_csv(REGISTRATIONS_FILE, &csv) {
                    Ok(()) => self.page.toaster.success("Registrations exported"),
                    Err(e) => {
                        log::error!("CSV export failed: {:?}", e);
                        self.page.toaster.error("Failed to export registrations");
                    }
                }
                return false;
            }

            Msg::Create => {
                self.errors = ValidationErrors::new();
                self.editing = Some(Editing::New);
            }
            Msg::Edit(user) => {
                self.errors = ValidationErrors::new();
                self.editing = Some(Editing::Existing(user));
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
                        Editing::New => api.create_user(&form).await,
                        Editing::Existing(user) => api.update_user(&user.id, &form).await,
                    };
                    link.send_message(Msg::Saved(result));
                });
            }
            Msg::Saved(Ok(user)) => {
                let created = self.editing == Some(Editing::New);
                log::info!("Saved user {}", user.id);
                self.busy = false;
                self.editing = None;
                self.page.toaster.success(if created {
                    "User created successfully!"
                } else {
                    "User updated successfully!"
                });
                ctx.link().send_message(Msg::Fetch);
            }
            Msg::Saved(Err(e)) => {
                self.busy = false;
                self.errors = save_failed(&self.page, e, "Failed to save user");
            }
            Msg::Delete => {
                let Some(id) = self.deleting.clone() else {
                    return false;
                };
                self.busy = true;

                let api = self.page.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Deleted(api.delete_user(&id).await));
                });
            }
            Msg::Deleted(result) => {
                self.busy = false;
                self.deleting = None;
                match result {
                    Ok(()) => {
                        self.page.toaster.success("User deleted successfully!");
                        ctx.link().send_message(Msg::Fetch);
                    }
                    Err(e) => action_failed(&self.page, &e, "Failed to delete user"),
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let stats = RegistrationStats::from_users(self.users.items(), Utc::now());

        html! {
            <div class="space-y-6">
                <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                    <div>
                        <h1 class="text-3xl font-bold">{ "Registrations" }</h1>
                        <p class="text-secondary">{ "Members, packages and sign-up status" }</p>
                    </div>
                    <button class="btn btn-primary" onclick={link.callback(|_| Msg::Create)}>{ "Add user" }</button>
                </div>

                <div class="grid gap-4 sm:grid-cols-2 xl:grid-cols-4">
                    <StatCard label="Total" value={stats.total.to_string()} />
                    <StatCard label="Active" value={stats.active.to_string()} accent="var(--success)" />
                    <StatCard label="Pending" value={stats.pending.to_string()} accent="var(--warning)" />
                    <StatCard label="Joined this month" value={stats.this_month.to_string()} accent="var(--info)" />
                </div>

                <div class="card p-4 flex flex-col md:flex-row gap-3">
                    <SearchBar value={self.search.clone()} placeholder="Search by name, email or location..."
                               on_input={link.callback(Msg::Search)} />
                    { filter_select(&STATUS_FILTERS, &self.status, link.callback(Msg::Status)) }
                    { filter_select(&SORT_OPTIONS, &self.sort_by, link.callback(Msg::SortBy)) }
                    <button class="btn btn-secondary" onclick={link.callback(|_| Msg::Export)}
                            disabled={self.users.items().is_empty()}>
                        { "Export" }
                    </button>
                </div>

                { render_list(
                    self.users.view(),
                    "No registrations found",
                    link.callback(|_| Msg::Fetch),
                    |user| self.row(ctx, user),
                ) }

                if let Some(editing) = &self.editing {
                    <Modal
                        title={if *editing == Editing::New { "Add user" } else { "Edit user" }}
                        on_close={link.callback(|_| Msg::Close)}
                    >
                        <RegistrationEditor
                            initial={match editing {
                                Editing::New => RegistrationForm::default(),
                                Editing::Existing(user) => RegistrationForm::from_user(user),
                            }}
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
                        message="Are you sure you want to delete this user?"
                        busy={self.busy}
                        on_confirm={link.callback(|_| Msg::Delete)}
                        on_cancel={link.callback(|_| Msg::Close)}
                    />
                }
            </div>
        }
    }
}
