use crate::app::Route;
use crate::components::blog_editor::BlogEditor;
use crate::components::PageContext;
use crate::pages::save_failed;
use admin_client::error::AdminClientError;
use admin_client::forms::{BlogForm, ValidationErrors};
use admin_client::models::BlogPost;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::scope_ext::RouterScopeExt;

pub enum Msg {
    Submit(BlogForm),
    Created(Result<BlogPost, AdminClientError>),
}

pub struct CreateBlogPage {
    page: PageContext,
    busy: bool,
    errors: ValidationErrors,
}

impl Component for CreateBlogPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            page: PageContext::from_link(ctx.link()),
            busy: false,
            errors: ValidationErrors::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Submit(form) => {
                self.busy = true;
                self.errors = ValidationErrors::new();

                let api = self.page.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Created(api.create_blog(&form).await));
                });
            }
            Msg::Created(Ok(post)) => {
                log::info!("Created blog post {}", post.id);
                self.busy = false;
                self.page.toaster.success("Article created successfully!");
                if let Some(navigator) = ctx.link().navigator() {
                    navigator.push(&Route::ManageBlog);
                }
            }
            Msg::Created(Err(e)) => {
                self.busy = false;
                self.errors = save_failed(&self.page, e, "Failed to create article");
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="max-w-3xl mx-auto">
                <h1 class="text-3xl font-bold mb-6">{ "Create blog post" }</h1>
                <div class="card p-6">
                    <BlogEditor
                        submit_label="Publish"
                        busy={self.busy}
                        errors={self.errors.clone()}
                        on_submit={ctx.link().callback(Msg::Submit)}
                    />
                </div>
            </div>
        }
    }
}
