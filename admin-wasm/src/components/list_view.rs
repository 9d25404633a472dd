use crate::components::skeleton::SkeletonRows;
use admin_client::list::ListView;
use yew::prelude::*;

/// Loading, error, empty and populated states of a list page.
pub fn render_list<T>(
    view: ListView<'_, T>,
    empty_message: &str,
    on_retry: Callback<MouseEvent>,
    row: impl Fn(&T) -> Html,
) -> Html {
    match view {
        ListView::Loading => html! { <SkeletonRows rows={5} /> },
        ListView::Failed(error) => html! {
            <div class="card p-6 text-center border border-red-200">
                <p class="text-red-600 mb-4">{ error }</p>
                <button class="btn btn-primary" onclick={on_retry}>{ "Try again" }</button>
            </div>
        },
        ListView::Empty => html! {
            <div class="card p-10 text-center text-secondary">{ empty_message }</div>
        },
        ListView::Ready(items) => html! {
            <div class="space-y-3">
                { for items.iter().map(row) }
            </div>
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub label: AttrValue,
    pub value: String,
    #[prop_or_default]
    pub accent: Option<AttrValue>,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    let style = props
        .accent
        .as_ref()
        .map(|color| format!("border-left: 4px solid {}", color));

    html! {
        <div class="card p-5" style={style}>
            <p class="text-sm text-secondary">{ props.label.clone() }</p>
            <p class="text-2xl font-bold">{ &props.value }</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SearchBarProps {
    pub value: String,
    pub placeholder: AttrValue,
    pub on_input: Callback<String>,
}

#[function_component(SearchBar)]
pub fn search_bar(props: &SearchBarProps) -> Html {
    let oninput = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            on_input.emit(input.value());
        })
    };

    html! {
        <input
            type="search"
            class="input w-full md:w-80"
            placeholder={props.placeholder.clone()}
            value={props.value.clone()}
            {oninput}
        />
    }
}
