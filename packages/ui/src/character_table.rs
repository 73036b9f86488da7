use dioxus::prelude::*;
use roster::{EditableRow, RowField};

use crate::provider::{use_list_state, use_roster};

/// The `characterTable` table: one editable row per rendered record.
#[component]
pub fn CharacterTable() -> Element {
    let state = use_list_state();
    let rows = state.read().rows().to_vec();

    rsx! {
        table {
            id: "characterTable",
            class: "roster-table",
            thead {
                tr {
                    th { "ID" }
                    th { "First name" }
                    th { "Last name" }
                    th { "Occupation" }
                    th { "Actions" }
                }
            }
            tbody {
                for row in rows {
                    CharacterRow { key: "{row.id}", row: row.clone() }
                }
            }
        }
    }
}

/// A single row. Inputs write straight into the list state so that
/// "Update" submits exactly what is on screen.
#[component]
fn CharacterRow(row: EditableRow) -> Element {
    let mut state = use_list_state();
    let roster = use_roster();
    let id = row.id;

    let update = {
        let roster = roster.clone();
        move |_: MouseEvent| {
            let roster = roster.clone();
            async move { roster.update_record(id).await }
        }
    };
    let delete = move |_: MouseEvent| {
        let roster = roster.clone();
        async move { roster.delete_record(id).await }
    };

    rsx! {
        tr {
            td { "{id}" }
            for (field, prefix) in [
                (RowField::FirstName, "fn"),
                (RowField::LastName, "ln"),
                (RowField::Occupation, "occ"),
            ] {
                td {
                    input {
                        id: "{prefix}_{id}",
                        class: "roster-input",
                        value: row.get(field).to_string(),
                        oninput: move |evt: FormEvent| state.write().edit(id, field, evt.value()),
                    }
                }
            }
            td {
                button {
                    class: "roster-btn roster-btn--update",
                    onclick: update,
                    "Update"
                }
                button {
                    class: "roster-btn roster-btn--delete",
                    onclick: delete,
                    "Delete"
                }
            }
        }
    }
}
