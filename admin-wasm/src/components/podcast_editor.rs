use crate::components::fields::{
    changed_value, checkbox_value, datetime_input_value, field_error, input_value,
    parse_datetime_input, picked_file, select_value, textarea_value,
};
use crate::components::tag_input::TagInput;
use crate::services::read_file;
use admin_client::forms::{PodcastForm, TagList, Upload, UploadError, ValidationErrors};
use admin_client::models::{PostStatus, User};
use wasm_bindgen_futures::spawn_local;
use web_sys::File;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Image,
    Audio,
}

impl Slot {
    fn check(self, file: &File) -> Result<(), UploadError> {
        match self {
            Slot::Image => Upload::check_image(&file.type_(), file.size() as u64),
            Slot::Audio => Upload::check_audio(&file.type_()),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct PodcastEditorProps {
    #[prop_or_default]
    pub initial: PodcastForm,
    pub authors: Vec<User>,
    pub submit_label: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub errors: ValidationErrors,
    pub on_submit: Callback<PodcastForm>,
    pub on_cancel: Callback<()>,
}

pub enum Msg {
    Title(String),
    Excerpt(String),
    Description(String),
    Category(String),
    Tags(TagList),
    Status(String),
    ScheduledAt(String),
    Featured(bool),
    Author(String),
    Duration(String),
    Pick(Slot, Option<File>),
    Loaded {
        slot: Slot,
        name: String,
        mime: String,
        bytes: Vec<u8>,
    },
    ReadFailed(Slot, String),
    Submit,
}

pub struct PodcastEditor {
    form: PodcastForm,
    image_error: Option<String>,
    audio_error: Option<String>,
    reading: usize,
}

impl PodcastEditor {
    fn error_slot(&mut self, slot: Slot) -> &mut Option<String> {
        match slot {
            Slot::Image => &mut self.image_error,
            Slot::Audio => &mut self.audio_error,
        }
    }
}

impl Component for PodcastEditor {
    type Message = Msg;
    type Properties = PodcastEditorProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            form: ctx.props().initial.clone(),
            image_error: None,
            audio_error: None,
            reading: 0,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old: &Self::Properties) -> bool {
        if ctx.props().initial != old.initial {
            self.form = ctx.props().initial.clone();
            self.image_error = None;
            self.audio_error = None;
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Title(v) => self.form.title = v,
            Msg::Excerpt(v) => self.form.excerpt = v,
            Msg::Description(v) => self.form.description = v,
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
            Msg::Author(v) => self.form.author = v,
            Msg::Duration(v) => self.form.duration = v,
            Msg::Pick(_, None) => return false,
            Msg::Pick(slot, Some(file)) => {
                if let Err(e) = slot.check(&file) {
                    *self.error_slot(slot) = Some(e.to_string());
                    return true;
                }
                *self.error_slot(slot) = None;
                self.reading += 1;
                let link = ctx.link().clone();
                spawn_local(async move {
                    match read_file(&file).await {
                        Ok(bytes) => link.send_message(Msg::Loaded {
                            slot,
                            name: file.name(),
                            mime: file.type_(),
                            bytes,
                        }),
                        Err(e) => link.send_message(Msg::ReadFailed(slot, e)),
                    }
                });
            }
            Msg::Loaded {
                slot,
                name,
                mime,
                bytes,
            } => {
                self.reading = self.reading.saturating_sub(1);
                let attached = match slot {
                    Slot::Image => self.form.set_image(name, mime, bytes),
                    Slot::Audio => self.form.set_audio(name, mime, bytes),
                };
                if let Err(e) = attached {
                    *self.error_slot(slot) = Some(e.to_string());
                }
            }
            Msg::ReadFailed(slot, e) => {
                log::warn!("Could not read {:?} file: {}", slot, e);
                self.reading = self.reading.saturating_sub(1);
                *self.error_slot(slot) = Some("Could not read the selected file".to_string());
            }
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
        let cancel = {
            let on_cancel = props.on_cancel.clone();
            Callback::from(move |_: MouseEvent| on_cancel.emit(()))
        };
        let file_note = |error: &Option<String>, current: Option<&Upload>| {
            html! {
                <>
                    if let Some(upload) = current {
                        <p class="text-sm mt-1">{ &upload.file_name }</p>
                    }
                    if let Some(error) = error {
                        <p class="text-sm text-red-600 mt-1">{ error }</p>
                    }
                </>
            }
        };

        html! {
            <form class="space-y-4" {onsubmit}>
                <div>
                    <label class="label">{ "Title" }</label>
                    <input type="text" class="input w-full" value={form.title.clone()}
                           oninput={link.callback(|e: InputEvent| Msg::Title(input_value(&e)))} />
                    { field_error(&props.errors, "title") }
                </div>

                <div>
                    <label class="label">{ "Excerpt" }</label>
                    <input type="text" class="input w-full" value={form.excerpt.clone()}
                           oninput={link.callback(|e: InputEvent| Msg::Excerpt(input_value(&e)))} />
                </div>

                <div>
                    <label class="label">{ "Description" }</label>
                    <textarea class="input w-full" rows="5" value={form.description.clone()}
                              oninput={link.callback(|e: InputEvent| Msg::Description(textarea_value(&e)))} />
                    { field_error(&props.errors, "description") }
                </div>

                <div class="grid gap-4 md:grid-cols-2">
                    <div>
                        <label class="label">{ "Author" }</label>
                        <select class="input w-full" onchange={link.callback(|e: Event| Msg::Author(select_value(&e)))}>
                            <option value="" selected={form.author.is_empty()}>{ "Select an author" }</option>
                            { for props.authors.iter().map(|user| html! {
                                <option key={user.id.clone()} value={user.id.clone()} selected={user.id == form.author}>
                                    { &user.name }
                                </option>
                            }) }
                        </select>
                        { field_error(&props.errors, "author") }
                    </div>
                    <div>
                        <label class="label">{ "Duration" }</label>
                        <input type="text" class="input w-full" placeholder="45:00" value={form.duration.clone()}
                               oninput={link.callback(|e: InputEvent| Msg::Duration(input_value(&e)))} />
                    </div>
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

                <div class="grid gap-4 md:grid-cols-2">
                    <div>
                        <label class="label">{ "Cover image" }</label>
                        <input type="file" accept="image/jpeg,image/png,image/webp"
                               onchange={link.callback(|e: Event| Msg::Pick(Slot::Image, picked_file(&e)))} />
                        { file_note(&self.image_error, form.image()) }
                    </div>
                    <div>
                        <label class="label">{ "Audio (MP3)" }</label>
                        <input type="file" accept="audio/mpeg,audio/mp3"
                               onchange={link.callback(|e: Event| Msg::Pick(Slot::Audio, picked_file(&e)))} />
                        { file_note(&self.audio_error, form.audio()) }
                    </div>
                </div>

                <label class="flex items-center gap-2">
                    <input type="checkbox" checked={form.featured}
                           onchange={link.callback(|e: Event| Msg::Featured(checkbox_value(&e)))} />
                    { "Featured" }
                </label>

                <div class="flex justify-end gap-3">
                    <button type="button" class="btn btn-secondary" onclick={cancel}>{ "Cancel" }</button>
                    <button type="submit" class="btn btn-primary" disabled={props.busy || self.reading > 0}>
                        { if props.busy { "Saving..." } else { props.submit_label.as_str() } }
                    </button>
                </div>
            </form>
        }
    }
}
