use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub wide: bool,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let width = if props.wide { "max-w-4xl" } else { "max-w-lg" };

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center p-4">
            <div class="absolute inset-0 bg-black/50" onclick={close.clone()} />
            <div class={classes!("relative", "card", "w-full", width, "max-h-[90vh]", "overflow-y-auto", "p-6")}>
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-xl font-bold">{ props.title.clone() }</h2>
                    <button class="btn-icon" aria-label="Close" onclick={close}>{ "×" }</button>
                </div>
                { props.children.clone() }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfirmProps {
    pub message: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
    #[prop_or_default]
    pub busy: bool,
}

/// Yes/no dialog in front of every delete.
#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmProps) -> Html {
    let confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };
    let cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    html! {
        <Modal title="Please confirm" on_close={props.on_cancel.clone()}>
            <p class="mb-6">{ props.message.clone() }</p>
            <div class="flex justify-end gap-3">
                <button class="btn btn-secondary" onclick={cancel} disabled={props.busy}>
                    { "Cancel" }
                </button>
                <button class="btn btn-danger" onclick={confirm} disabled={props.busy}>
                    { if props.busy { "Deleting..." } else { "Delete" } }
                </button>
            </div>
        </Modal>
    }
}
