use crate::components::fields::{field_error, input_value, select_value};
use admin_client::forms::{RegistrationForm, ValidationErrors};
use admin_client::models::{Package, UserStatus};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RegistrationEditorProps {
    #[prop_or_default]
    pub initial: RegistrationForm,
    pub submit_label: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub errors: ValidationErrors,
    pub on_submit: Callback<RegistrationForm>,
    pub on_cancel: Callback<()>,
}

pub enum Msg {
    Name(String),
    Email(String),
    Phone(String),
    Location(String),
    Package(String),
    Status(String),
    TotalSpent(String),
    Submit,
}

pub struct RegistrationEditor {
    form: RegistrationForm,
}

impl Component for RegistrationEditor {
    type Message = Msg;
    type Properties = RegistrationEditorProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            form: ctx.props().initial.clone(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old: &Self::Properties) -> bool {
        if ctx.props().initial != old.initial {
            self.form = ctx.props().initial.clone();
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Name(v) => self.form.name = v,
            Msg::Email(v) => self.form.email = v,
            Msg::Phone(v) => self.form.phone = v,
            Msg::Location(v) => self.form.location = v,
            Msg::Package(v) => {
                if let Some(package) = Package::parse(&v) {
                    self.form.package = package;
                }
            }
            Msg::Status(v) => {
                if let Some(status) = UserStatus::parse(&v) {
                    self.form.status = status;
                }
            }
            // an unparsable amount keeps the last good value
            Msg::TotalSpent(v) => match v.trim().parse::<f64>() {
                Ok(amount) if amount >= 0.0 => self.form.total_spent = amount,
                _ if v.trim().is_empty() => self.form.total_spent = 0.0,
                _ => return false,
            },
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

        html! {
            <form class="space-y-4" {onsubmit}>
                <div class="grid gap-4 md:grid-cols-2">
                    <div>
                        <label class="label">{ "Name" }</label>
                        <input type="text" class="input w-full" value={form.name.clone()}
                               oninput={link.callback(|e: InputEvent| Msg::Name(input_value(&e)))} />
                        { field_error(&props.errors, "name") }
                    </div>
                    <div>
                        <label class="label">{ "Email" }</label>
                        <input type="email" class="input w-full" value={form.email.clone()}
                               oninput={link.callback(|e: InputEvent| Msg::Email(input_value(&e)))} />
                        { field_error(&props.errors, "email") }
                    </div>
                    <div>
                        <label class="label">{ "Phone" }</label>
                        <input type="tel" class="input w-full" value={form.phone.clone()}
                               oninput={link.callback(|e: InputEvent| Msg::Phone(input_value(&e)))} />
                        { field_error(&props.errors, "phone") }
                    </div>
                    <div>
                        <label class="label">{ "Location" }</label>
                        <input type="text" class="input w-full" value={form.location.clone()}
                               oninput={link.callback(|e: InputEvent| Msg::Location(input_value(&e)))} />
                        { field_error(&props.errors, "location") }
                    </div>
                    <div>
                        <label class="label">{ "Package" }</label>
                        <select class="input w-full" onchange={link.callback(|e: Event| Msg::Package(select_value(&e)))}>
                            { for Package::ALL.iter().map(|package| html! {
                                <option value={package.as_str()} selected={*package == form.package}>
                                    { package.to_string() }
                                </option>
                            }) }
                        </select>
                    </div>
                    <div>
                        <label class="label">{ "Status" }</label>
                        <select class="input w-full" onchange={link.callback(|e: Event| Msg::Status(select_value(&e)))}>
                            { for UserStatus::ALL.iter().map(|status| html! {
                                <option value={status.as_str()} selected={*status == form.status}>
                                    { status.to_string() }
                                </option>
                            }) }
                        </select>
                    </div>
                    <div>
                        <label class="label">{ "Total spent" }</label>
                        <input type="number" min="0" step="0.01" class="input w-full"
                               value={form.total_spent.to_string()}
                               oninput={link.callback(|e: InputEvent| Msg::TotalSpent(input_value(&e)))} />
                    </div>
                </div>

                <div class="flex justify-end gap-3">
                    <button type="button" class="btn btn-secondary" onclick={cancel}>{ "Cancel" }</button>
                    <button type="submit" class="btn btn-primary" disabled={props.busy}>
                        { if props.busy { "Saving..." } else { props.submit_label.as_str() } }
                    </button>
                </div>
            </form>
        }
    }
}
