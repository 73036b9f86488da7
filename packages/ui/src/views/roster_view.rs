use dioxus::prelude::*;

use crate::{CharacterTable, PaginationControls, SearchBar};

const ROSTER_CSS: Asset = asset!("/assets/roster.css");

/// The admin page: search, table and pagination.
#[component]
pub fn RosterView(#[props(default = "Characters".to_string())] title: String) -> Element {
    rsx! {
        document::Stylesheet { href: ROSTER_CSS }

        div {
            class: "roster-view",
            div {
                class: "roster-header",
                h1 { "{title}" }
                SearchBar {}
            }
            CharacterTable {}
            PaginationControls {}
        }
    }
}
