use crate::components::blog_editor::BlogEditor;
use crate::components::fields::input_value;
use crate::components::list_view::{render_list, SearchBar};
use crate::components::modal::{ConfirmDialog, Modal};
use crate::components::PageContext;
use crate::pages::{action_failed, filter_select, refetch, save_failed};
use admin_client::dashboard::time_ago;
use admin_client::error::AdminClientError;
use admin_client::forms::{BlogForm, ValidationErrors};
use admin_client::list::{Collection, ListQuery, ListState};
use admin_client::models::BlogPost;
use admin_client::theme::status_color;
use chrono::Utc;
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const STATUS_FILTERS: [(&str, &str); 4] = [
    ("all", "All Status"),
    ("published", "Published"),
    ("draft", "Draft"),
    ("scheduled", "Scheduled"),
];

const SORT_OPTIONS: [(&str, &str); 3] = [
    ("date", "Sort by Date"),
    ("title", "Sort by Title"),
    ("views", "Sort by Views"),
];

pub enum Msg {
    Fetch,
    Fetched(u64, Result<Vec<BlogPost>, AdminClientError>),
    Search(String),
    Status(String),
    SortBy(String),

    View(BlogPost),
    Edit(BlogPost),
    AskDelete(String),
    Close,

    Save(BlogForm),
    Saved(Result<BlogPost, AdminClientError>),
    Delete,
    Deleted(Result<(), AdminClientError>),

    CommentDraft(String),
    AddComment,
    AskDeleteComment(String),
    CancelDeleteComment,
    DeleteComment,
    CommentAdded(Result<(), AdminClientError>),
    CommentDeleted(Result<(), AdminClientError>),
    Reloaded(Result<BlogPost, AdminClientError>),
}

pub struct ManageBlogPage {
    page: PageContext,
    blogs: ListState<BlogPost>,
    search: String,
    status: String,
    sort_by: String,
    debounce: Option<Timeout>,

    viewing: Option<BlogPost>,
    editing: Option<BlogPost>,
    deleting: Option<String>,
    comment_draft: String,
    deleting_comment: Option<String>,

    busy: bool,
    errors: ValidationErrors,
}

impl ManageBlogPage {
    fn query(&self) -> ListQuery {
        ListQuery::new()
            .search(self.search.clone())
            .status(self.status.clone())
            .sort_by(self.sort_by.clone())
    }

    fn reload_viewed(&self, ctx: &Context<Self>) {
        if let Some(post) = &self.viewing {
            let api = self.page.api.clone();
            let id = post.id.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::Reloaded(api.get_blog(&id).await));
            });
        }
    }

    fn view_modal(&self, ctx: &Context<Self>, post: &BlogPost) -> Html {
        let link = ctx.link();
        let now = Utc::now();
        let on_comment = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::AddComment
        });

        html! {
            <Modal title={post.title.clone()} wide={true} on_close={link.callback(|_| Msg::Close)}>
                if let Some(image) = &post.image {
                    <img src={image.clone()} alt={post.title.clone()} class="w-full max-h-72 object-cover rounded mb-4" />
                }
                <div class="flex flex-wrap gap-3 text-sm text-secondary mb-4">
                    <span class="badge" style={format!("background: {}", status_color(post.status.as_str()))}>
                        { post.status.to_string() }
                    </span>
                    if !post.category.is_empty() {
                        <span>{ &post.category }</span>
                    }
                    <span>{ format!("{} views", post.views) }</span>
                    if let Some(author) = &post.author {
                        <span>{ format!("by {}", author.display_name()) }</span>
                    }
                </div>
                if !post.excerpt.is_empty() {
                    <p class="italic mb-4">{ &post.excerpt }</p>
                }
                <div class="whitespace-pre-wrap mb-6">{ &post.content }</div>

                <h3 class="text-lg font-semibold mb-3">{ format!("Comments ({})", post.comments.len()) }</h3>
                <ul class="space-y-3 mb-4">
                    { for post.comments.iter().map(|comment| {
                        let id = comment.id.clone();
                        html! {
                            <li key={comment.id.clone()} class="border rounded p-3">
                                <div class="flex justify-between text-sm text-secondary mb-1">
                                    <span>
                                        { comment.author.as_ref().map(|a| a.display_name().to_string()).unwrap_or_else(|| "Anonymous".into()) }
                                        if let Some(at) = comment.created_at {
                                            { format!(" · {}", time_ago(at, now)) }
                                        }
                                    </span>
                                    <button class="text-red-600" onclick={link.callback(move |_| Msg::AskDeleteComment(id.clone()))}>
                                        { "Delete" }
                                    </button>
                                </div>
                                <p>{ &comment.text }</p>
                            </li>
                        }
                    }) }
                </ul>
                <form class="flex gap-2" onsubmit={on_comment}>
                    <input type="text" class="input flex-1" placeholder="Write a comment"
                           value={self.comment_draft.clone()}
                           oninput={link.callback(|e: InputEvent| Msg::CommentDraft(input_value(&e)))} />
                    <button type="submit" class="btn btn-primary" disabled={self.busy}>{ "Add" }</button>
                </form>

                if self.deleting_comment.is_some() {
                    <ConfirmDialog
                        message="Delete this comment?"
                        busy={self.busy}
                        on_confirm={link.callback(|_| Msg::DeleteComment)}
                        on_cancel={link.callback(|_| Msg::CancelDeleteComment)}
                    />
                }
            </Modal>
        }
    }

    fn row(&self, ctx: &Context<Self>, post: &BlogPost) -> Html {
        let link = ctx.link();
        let (view, edit, id) = (post.clone(), post.clone(), post.id.clone());

        html! {
            <div key={post.id.clone()} class="card p-4 flex flex-col md:flex-row md:items-center gap-4">
                <div class="flex-1 min-w-0">
                    <h3 class="font-semibold truncate">{ &post.title }</h3>
                    <p class="text-sm text-secondary truncate">{ &post.excerpt }</p>
                    <div class="flex flex-wrap gap-3 text-xs text-secondary mt-2">
                        <span style={format!("color: {}", status_color(post.status.as_str()))}>
                            { post.status.to_string() }
                        </span>
                        <span>{ format!("{} views", post.views) }</span>
                        <span>{ format!("{} comments", post.comments.len()) }</span>
                        if post.featured {
                            <span>{ "Featured" }</span>
                        }
                    </div>
                </div>
                <div class="flex gap-2">
                    <button class="btn btn-secondary" onclick={link.callback(move |_| Msg::View(view.clone()))}>{ "View" }</button>
                    <button class="btn btn-secondary" onclick={link.callback(move |_| Msg::Edit(edit.clone()))}>{ "Edit" }</button>
                    <button class="btn btn-danger" onclick={link.callback(move |_| Msg::AskDelete(id.clone()))}>{ "Delete" }</button>
                </div>
            </div>
        }
    }
}

impl Component for ManageBlogPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Fetch);
        Self {
            page: PageContext::from_link(ctx.link()),
            blogs: ListState::new(),
            search: String::new(),
            status: "all".to_string(),
            sort_by: "date".to_string(),
            debounce: None,
            viewing: None,
            editing: None,
            deleting: None,
            comment_draft: String::new(),
            deleting_comment: None,
            busy: false,
            errors: ValidationErrors::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Fetch => {
                self.debounce = None;
                let ticket = self.blogs.begin();
                let query = self.query();
                log::debug!("Fetching blogs {:?} (ticket {})", query, ticket);

                let api = self.page.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Fetched(ticket, api.list_blogs(&query).await));
                });
            }
            Msg::Fetched(ticket, result) => {
                if let Err(e) = &result {
                    if self.blogs.is_current(ticket) {
                        action_failed(&self.page, e, "Failed to fetch blog posts");
                    }
                }
                return self.blogs.finish(ticket, result, "Failed to fetch blog posts");
            }
            Msg::Search(value) => {
                self.search = value;
                self.debounce = refetch(ctx.link(), Collection::Blogs, || Msg::Fetch);
            }
            Msg::Status(value) => {
                self.status = value;
                self.debounce = refetch(ctx.link(), Collection::Blogs, || Msg::Fetch);
            }
            Msg::SortBy(value) => {
                self.sort_by = value;
                self.debounce = refetch(ctx.link(), Collection::Blogs, || Msg::Fetch);
            }

            Msg::View(post) => {
                self.comment_draft.clear();
                self.viewing = Some(post);
            }
            Msg::Edit(post) => {
                self.errors = ValidationErrors::new();
                self.editing = Some(post);
            }
            Msg::AskDelete(id) => self.deleting = Some(id),
            Msg::Close => {
                if self.busy {
                    return false;
                }
                self.viewing = None;
                self.editing = None;
                self.deleting = None;
                self.deleting_comment = None;
            }

            Msg::Save(form) => {
                let Some(id) = self.editing.as_ref().map(|p| p.id.clone()) else {
                    return false;
                };
                self.busy = true;
                self.errors = ValidationErrors::new();

                let api = self.page.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Saved(api.update_blog(&id, &form).await));
                });
            }
            Msg::Saved(Ok(post)) => {
                log::info!("Updated blog post {}", post.id);
                self.busy = false;
                self.editing = None;
                self.page.toaster.success("Blog post updated successfully!");
                ctx.link().send_message(Msg::Fetch);
            }
            Msg::Saved(Err(e)) => {
                self.busy = false;
                self.errors = save_failed(&self.page, e, "Failed to update blog post");
            }
            Msg::Delete => {
                let Some(id) = self.deleting.clone() else {
                    return false;
                };
                self.busy = true;

                let api = self.page.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Deleted(api.delete_blog(&id).await));
                });
            }
            Msg::Deleted(result) => {
                self.busy = false;
                self.deleting = None;
                match result {
                    Ok(()) => {
                        self.page.toaster.success("Blog post deleted successfully!");
                        ctx.link().send_message(Msg::Fetch);
                    }
                    Err(e) => action_failed(&self.page, &e, "Failed to delete blog post"),
                }
            }

            Msg::CommentDraft(value) => self.comment_draft = value,
            Msg::AddComment => {
                let Some(blog_id) = self.viewing.as_ref().map(|p| p.id.clone()) else {
                    return false;
                };
                if self.comment_draft.trim().is_empty() {
                    self.page.toaster.error("Comment cannot be empty");
                    return false;
                }
                self.busy = true;

                let api = self.page.api.clone();
                let text = self.comment_draft.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api.add_comment(&blog_id, &text).await;
                    link.send_message(Msg::CommentAdded(result));
                });
            }
            Msg::AskDeleteComment(id) => self.deleting_comment = Some(id),
            Msg::CancelDeleteComment => self.deleting_comment = None,
            Msg::DeleteComment => {
                let (Some(post), Some(comment_id)) = (&self.viewing, self.deleting_comment.clone())
                else {
                    return false;
                };
                self.busy = true;

                let api = self.page.api.clone();
                let blog_id = post.id.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api.delete_comment(&blog_id, &comment_id).await;
                    link.send_message(Msg::CommentDeleted(result));
                });
            }
            Msg::CommentAdded(result) => {
                self.busy = false;
                match result {
                    Ok(()) => {
                        self.page.toaster.success("Comment added successfully!");
                        self.comment_draft.clear();
                        self.reload_viewed(ctx);
                    }
                    Err(e) => action_failed(&self.page, &e, "Failed to add comment"),
                }
            }
            Msg::CommentDeleted(result) => {
                self.busy = false;
                self.deleting_comment = None;
                match result {
                    Ok(()) => {
                        self.page.toaster.success("Comment deleted successfully!");
                        self.reload_viewed(ctx);
                    }
                    Err(e) => action_failed(&self.page, &e, "Failed to delete comment"),
                }
            }
            Msg::Reloaded(Ok(post)) => {
                let id = post.id.clone();
                let comments = post.comments.clone();
                self.blogs
                    .update_where(|p| p.id == id, |p| p.comments = comments.clone());
                if self.viewing.as_ref().is_some_and(|p| p.id == post.id) {
                    self.viewing = Some(post);
                }
            }
            Msg::Reloaded(Err(e)) => action_failed(&self.page, &e, "Failed to refresh blog post"),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class="space-y-6">
                <div>
                    <h1 class="text-3xl font-bold">{ "Manage blog" }</h1>
                    <p class="text-secondary">{ "Search, edit and moderate published articles" }</p>
                </div>

                <div class="card p-4 flex flex-col md:flex-row gap-3">
                    <SearchBar value={self.search.clone()} placeholder="Search posts..."
                               on_input={link.callback(Msg::Search)} />
                    { filter_select(&STATUS_FILTERS, &self.status, link.callback(Msg::Status)) }
                    { filter_select(&SORT_OPTIONS, &self.sort_by, link.callback(Msg::SortBy)) }
                </div>

                { render_list(
                    self.blogs.view(),
                    "No blog posts found",
                    link.callback(|_| Msg::Fetch),
                    |post| self.row(ctx, post),
                ) }

                if let Some(post) = &self.viewing {
                    { self.view_modal(ctx, post) }
                }

                if let Some(post) = &self.editing {
                    <Modal title="Edit blog post" wide={true} on_close={link.callback(|_| Msg::Close)}>
                        <BlogEditor
                            initial={BlogForm::from_post(post)}
                            submit_label="Save changes"
                            busy={self.busy}
                            errors={self.errors.clone()}
                            on_submit={link.callback(Msg::Save)}
                            on_cancel={link.callback(|_| Msg::Close)}
                        />
                    </Modal>
                }

                if self.deleting.is_some() {
                    <ConfirmDialog
                        message="Are you sure you want to delete this blog post?"
                        busy={self.busy}
                        on_confirm={link.callback(|_| Msg::Delete)}
                        on_cancel={link.callback(|_| Msg::Close)}
                    />
                }
            </div>
        }
    }
}
