use crate::components::fields::{
    changed_value, checkbox_value, datetime_input_value, field_error, input_value,
    parse_datetime_input, picked_file, select_value, textarea_value,
};
use crate::components::tag_input::TagInput;
use crate::services::read_file;
use admin_client::forms::{BlogForm, TagList, Upload, ValidationErrors};
use admin_client::models::PostStatus;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BlogEditorProps {
    #[prop_or_default]
    pub initial: BlogForm,
    pub submit_label: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub errors: ValidationErrors,
    pub on_submit: Callback<BlogForm>,
    #[prop_or_default]
    pub on_cancel: Option<Callback<()>>,
}

pub enum Msg {
    Title(String),
    Excerpt(String),
    Content(String),
    Category(String),
    Tags(TagList),
    Status(String),
    ScheduledAt(String),
    Featured(bool),
    PickImage(Option<web_sys::File>),
    ImageLoaded {
        name: String,
        mime: String,
        bytes: Vec<u8>,
    },
    ImageFailed(String),
    ClearImage,
    Submit,
}

/// Blog post form used by both the create page and the edit modal.
pub struct BlogEditor {
    form: BlogForm,
    upload_error: Option<String>,
    reading: bool,
}

impl Component for BlogEditor {
    type Message = Msg;
    type Properties = BlogEditorProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            form: ctx.props().initial.clone(),
            upload_error: None,
            reading: false,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old: &Self::Properties) -> bool {
        if ctx.props().initial != old.initial {
            self.form = ctx.props().initial.clone();
            self.upload_error = None;
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Title(v) => self.form.title = v,
            Msg::Excerpt(v) => self.form.excerpt = v,
            Msg::Content(v) => self.form.content = v,
            Msg::Category(v) => self.form.category = v,
            Msg::Tags(tags) => self.form.tags = tags,
            Msg::Status(v) => {
                if let Some(status) = PostStatus::parse(&v) {
                    self.form.status = status;
                    // the date input is hidden for other statuses
                    if status != PostStatus::Scheduled {
                        self.form.scheduled_at = None;
                    }
                }
            }
            Msg::ScheduledAt(v) => self.form.scheduled_at = parse_datetime_input(&v),
            Msg::Featured(v) => self.form.featured = v,
            Msg::PickImage(None) => return false,
            Msg::PickImage(Some(file)) => {
                let mime = file.type_();
                if let Err(e) = Upload::check_image(&mime, file.size() as u64) {
                    self.upload_error = Some(e.to_string());
                    return true;
                }
                self.upload_error = None;
                self.reading = true;
                let link = ctx.link().clone();
                spawn_local(async move {
                    match read_file(&file).await {
                        Ok(bytes) => link.send_message(Msg::ImageLoaded {
                            name: file.name(),
                            mime,
                            bytes,
                        }),
                        Err(e) => link.send_message(Msg::ImageFailed(e)),
                    }
                });
            }
            Msg::ImageLoaded { name, mime, bytes } => {
                self.reading = false;
                if let Err(e) = self.form.set_image(name, mime, bytes) {
                    self.upload_error = Some(e.to_string());
                }
            }
            Msg::ImageFailed(e) => {
                log::warn!("Could not read image: {}", e);
                self.reading = false;
                self.upload_error = Some("Could not read the selected file".to_string());
            }
            Msg::ClearImage => self.form.clear_image(),
            Msg::Submit => {
                ctx.props().on_submit.emit(self.form.clone());
                return false;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let link = ctx.link();
        let form = &self.form;

        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <form class="space-y-5" {onsubmit}>
                <div>
                    <label class="label">{ "Title" }</label>
                    <input type="text" class="input w-full" value={form.title.clone()}
                           oninput={link.callback(|e: InputEvent| Msg::Title(input_value(&e)))} />
                    { field_error(&props.errors, "title") }
                </div>

                <div>
                    <label class="label">{ "Excerpt" }</label>
                    <textarea class="input w-full" rows="2" value={form.excerpt.clone()}
                              oninput={link.callback(|e: InputEvent| Msg::Excerpt(textarea_value(&e)))} />
                </div>

                <div>
                    <label class="label">{ "Content" }</label>
                    <textarea class="input w-full" rows="10" value={form.content.clone()}
                              oninput={link.callback(|e: InputEvent| Msg::Content(textarea_value(&e)))} />
                    { field_error(&props.errors, "content") }
                </div>

                <div class="grid gap-4 md:grid-cols-2">
                    <div>
                        <label class="label">{ "Category" }</label>
                        <input type="text" class="input w-full" value={form.category.clone()}
                               oninput={link.callback(|e: InputEvent| Msg::Category(input_value(&e)))} />
                    </div>
                    <div>
                        <label class="label">{ "Status" }</label>
                        <select class="input w-full" onchange={link.callback(|e: Event| Msg::Status(select_value(&e)))}>
                            { for PostStatus::ALL.iter().map(|status| html! {
                                <option value={status.as_str()} selected={*status == form.status}>
                                    { status.to_string() }
                                </option>
                            }) }
                        </select>
                    </div>
                </div>

                if form.status == PostStatus::Scheduled {
                    <div>
                        <label class="label">{ "Publish at" }</label>
                        <input type="datetime-local" class="input"
                               value={datetime_input_value(form.scheduled_at)}
                               onchange={link.callback(|e: Event| Msg::ScheduledAt(changed_value(&e)))} />
                        { field_error(&props.errors, "scheduledAt") }
                    </div>
                }

                <div>
                    <label class="label">{ "Tags" }</label>
                    <TagInput tags={form.tags.clone()} on_change={link.callback(Msg::Tags)} />
                </div>

                <div>
                    <label class="label">{ "Cover image" }</label>
                    <input type="file" accept="image/jpeg,image/png,image/webp"
                           onchange={link.callback(|e: Event| Msg::PickImage(picked_file(&e)))} />
                    if self.reading {
                        <p class="text-sm text-secondary mt-1">{ "Reading file..." }</p>
                    }
                    if let Some(image) = form.image() {
                        <p class="text-sm mt-1">
                            { format!("{} ({} KB)", image.file_name, image.bytes.len() / 1024) }
                            <button type="button" class="ml-2 text-red-600" onclick={link.callback(|_| Msg::ClearImage)}>
                                { "Remove" }
                            </button>
                        </p>
                    }
                    if let Some(error) = &self.upload_error {
                        <p class="text-sm text-red-600 mt-1">{ error }</p>
                    }
                </div>

                <label class="flex items-center gap-2">
                    <input type="checkbox" checked={form.featured}
                           onchange={link.callback(|e: Event| Msg::Featured(checkbox_value(&e)))} />
                    { "Featured" }
                </label>

                <div class="flex justify-end gap-3">
                    if let Some(on_cancel) = props.on_cancel.clone() {
                        <button type="button" class="btn btn-secondary" onclick={Callback::from(move |_: MouseEvent| on_cancel.emit(()))}>
                            { "Cancel" }
                        </button>
                    }
                    <button type="submit" class="btn btn-primary" disabled={props.busy || self.reading}>
                        { if props.busy { "Saving..." } else { props.submit_label.as_str() } }
                    </button>
                </div>
            </form>
        }
    }
}
