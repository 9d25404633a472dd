//! Small helpers shared by the editor forms.

use admin_client::forms::ValidationErrors;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

const DATETIME_LOCAL: &str = "%Y-%m-%dT%H:%M";

/// Value for an `<input type="datetime-local">`, in the browser's timezone.
pub fn datetime_input_value(at: Option<DateTime<Utc>>) -> String {
    at.map(|at| at.with_timezone(&Local).format(DATETIME_LOCAL).to_string())
        .unwrap_or_default()
}

pub fn parse_datetime_input(value: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value, DATETIME_LOCAL).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

pub fn input_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

pub fn textarea_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlTextAreaElement>().value()
}

pub fn select_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlSelectElement>().value()
}

/// Value of an `<input>` from a `change` event.
pub fn changed_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

pub fn checkbox_value(e: &Event) -> bool {
    e.target_unchecked_into::<HtmlInputElement>().checked()
}

/// First picked file of an `<input type="file">`.
pub fn picked_file(e: &Event) -> Option<web_sys::File> {
    e.target_unchecked_into::<HtmlInputElement>()
        .files()
        .and_then(|files| files.get(0))
}

pub fn field_error(errors: &ValidationErrors, field: &str) -> Html {
    match errors.get(field) {
        Some(message) => html! { <p class="text-sm text-red-600 mt-1">{ message }</p> },
        None => html! {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_input_round_trip() {
        let at = Utc.with_ymd_and_hms(2026, 11, 2, 9, 30, 0).unwrap();
        let value = datetime_input_value(Some(at));
        assert_eq!(parse_datetime_input(&value), Some(at));
    }

    #[test]
    fn empty_datetime_input_is_none() {
        assert_eq!(datetime_input_value(None), "");
        assert_eq!(parse_datetime_input(""), None);
    }
}
