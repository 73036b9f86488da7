use dioxus::prelude::*;

use crate::provider::use_roster;

/// Free-text search over first and last names. Submitting an empty query
/// returns to page 1.
#[component]
pub fn SearchBar() -> Element {
    let roster = use_roster();
    let mut query = use_signal(String::new);

    let search = move || {
        let roster = roster.clone();
        let text = query.peek().clone();
        spawn(async move {
            roster.search(&text).await;
        });
    };
    let search_on_click = search.clone();

    rsx! {
        div {
            class: "roster-search",
            input {
                id: "searchInput",
                class: "roster-input",
                r#type: "text",
                placeholder: "Search by first or last name",
                value: query(),
                oninput: move |evt: FormEvent| query.set(evt.value()),
                onkeydown: move |evt: KeyboardEvent| {
                    if evt.key() == Key::Enter {
                        search();
                    }
                },
            }
            button {
                class: "roster-btn",
                onclick: move |_: MouseEvent| search_on_click(),
                "Search"
            }
        }
    }
}
