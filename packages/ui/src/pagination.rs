use dioxus::prelude::*;

use crate::provider::{use_list_state, use_roster};

/// Previous/next buttons and the `pageIndicator` text.
#[component]
pub fn PaginationControls() -> Element {
    let state = use_list_state();
    let roster = use_roster();

    let (can_retreat, can_advance, indicator, total) = {
        let s = state.read();
        (
            s.can_retreat(),
            s.can_advance(),
            s.indicator(),
            s.total_records(),
        )
    };

    let retreat = {
        let roster = roster.clone();
        move |_: MouseEvent| {
            let roster = roster.clone();
            async move { roster.retreat_page().await }
        }
    };
    let advance = move |_: MouseEvent| {
        let roster = roster.clone();
        async move { roster.advance_page().await }
    };

    rsx! {
        div {
            class: "roster-pagination",
            button {
                id: "prevBtn",
                class: "roster-btn",
                disabled: !can_retreat,
                onclick: retreat,
                "Previous"
            }
            span {
                id: "pageIndicator",
                class: "roster-page-indicator",
                "{indicator}"
            }
            button {
                id: "nextBtn",
                class: "roster-btn",
                disabled: !can_advance,
                onclick: advance,
                "Next"
            }
            if let Some(total) = total {
                span { class: "roster-total", "{total} characters" }
            }
        }
    }
}
