use dioxus::prelude::*;

use roster::RosterConfig;
use ui::views::RosterView;
use ui::RosterProvider;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Characters {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

const CONFIG_TOML: &str = include_str!("../roster.toml");

fn main() {
    dioxus::launch(App);
}

/// Parse the embedded config, falling back to defaults if it is broken.
fn load_config() -> RosterConfig {
    match RosterConfig::from_toml(CONFIG_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid {}: {e}; using defaults", RosterConfig::filename());
            RosterConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        RosterProvider {
            config,
            Router::<Route> {}
        }
    }
}

#[component]
fn Characters() -> Element {
    rsx! {
        RosterView {}
    }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "not-found",
            h1 { "Page not found" }
            p { "Nothing lives at /{path}." }
            Link { to: Route::Characters {}, "Back to characters" }
        }
    }
}
