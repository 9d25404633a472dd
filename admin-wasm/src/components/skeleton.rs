use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SkeletonProps {
    #[prop_or(5)]
    pub rows: usize,
}

#[function_component(SkeletonRows)]
pub fn skeleton_rows(props: &SkeletonProps) -> Html {
    html! {
        <div class="space-y-3" aria-busy="true">
            { for (0..props.rows).map(|i| html! {
                <div key={i} class="card p-4 animate-pulse">
                    <div class="h-4 w-1/3 rounded bg-gray-200 mb-2" />
                    <div class="h-3 w-2/3 rounded bg-gray-100" />
                </div>
            }) }
        </div>
    }
}
