use admin_client::forms::{TagList, TagOutcome, MAX_TAGS};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TagInputProps {
    pub tags: TagList,
    pub on_change: Callback<TagList>,
}

pub enum Msg {
    Input(String),
    Commit,
    Remove(String),
}

pub struct TagInput {
    draft: String,
    notice: Option<&'static str>,
}

impl Component for TagInput {
    type Message = Msg;
    type Properties = TagInputProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            draft: String::new(),
            notice: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input(value) => {
                // a typed comma commits the tag before it
                if let Some(head) = value.strip_suffix(',') {
                    self.draft = head.to_string();
                    ctx.link().send_message(Msg::Commit);
                } else {
                    self.draft = value;
                }
                true
            }
            Msg::Commit => {
                let mut tags = ctx.props().tags.clone();
                self.notice = match tags.add(&self.draft) {
                    TagOutcome::Added => {
                        ctx.props().on_change.emit(tags);
                        None
                    }
                    TagOutcome::Empty => None,
                    TagOutcome::Duplicate => Some("Tag already added"),
                    TagOutcome::LimitReached => Some("Maximum 10 tags allowed"),
                };
                self.draft.clear();
                true
            }
            Msg::Remove(tag) => {
                let mut tags = ctx.props().tags.clone();
                if tags.remove(&tag) {
                    self.notice = None;
                    ctx.props().on_change.emit(tags);
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let tags = &ctx.props().tags;
        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Input(input.value())
        });
        let onkeydown = ctx.link().batch_callback(|e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                Some(Msg::Commit)
            } else {
                None
            }
        });

        html! {
            <div>
                <div class="flex flex-wrap gap-2 mb-2">
                    { for tags.as_slice().iter().map(|tag| {
                        let value = tag.clone();
                        let remove = ctx.link().callback(move |_| Msg::Remove(value.clone()));
                        html! {
                            <span key={tag.clone()} class="tag">
                                { tag }
                                <button type="button" class="ml-1" onclick={remove}>{ "×" }</button>
                            </span>
                        }
                    }) }
                </div>
                <input
                    type="text"
                    class="input w-full"
                    placeholder="Type a tag and press Enter"
                    value={self.draft.clone()}
                    disabled={tags.is_full()}
                    {oninput}
                    {onkeydown}
                />
                <p class="text-xs text-secondary mt-1">
                    { format!("{}/{} tags", tags.len(), MAX_TAGS) }
                    if let Some(notice) = self.notice {
                        <span class="ml-2 text-amber-600">{ notice }</span>
                    }
                </p>
            </div>
        }
    }
}
