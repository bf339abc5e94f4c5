// The client-side Dioxus application logic.

use dioxus::prelude::*;

mod app_state;
pub mod compat;
mod components;
pub mod hooks;
mod screens;

use api::Endpoints;
use app_state::AppState;
use components::pico::Container;
use screens::dashboard::DashboardScreen;

const PICO_CSS: &str = "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.amber.min.css";

/// The header links. Only `Home` has content; the rest are placeholders
/// and do not navigate anywhere.
const NAV_LINKS: [&str; 5] = ["Home", "Blockchain", "BTC Staking", "Epochs", "Proposals"];

/// The static navigation bar.
#[component]
fn NavLinks() -> Element {
    rsx! {
        nav {
            class: "tab-menu",
            ul {
                for (i, name) in NAV_LINKS.iter().enumerate() {
                    li {
                        a {
                            href: "#",
                            class: if i == 0 { "active-tab" } else { "" },
                            "aria-current": if i == 0 { "page" } else { "false" },
                            onclick: move |event| event.prevent_default(),
                            "{name}"
                        }
                    }
                }
            }
        }
    }
}

//=============================================================================
// MAIN APPLICATION COMPONENT (Client-side)
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    let responsive_css = r#"
    * { box-sizing: border-box; }

    .app-header {
        border-bottom: 1px solid var(--pico-muted-border-color);
        margin-bottom: 1.5rem;
    }
    .app-title {
        margin: 0;
        font-size: 1.5rem;
        color: var(--pico-primary);
    }

    .tab-menu a.active-tab {
        color: var(--pico-primary) !important;
        text-decoration: none;
    }
    .tab-menu a:not(.active-tab) {
        color: var(--pico-muted-color);
    }

    .banner {
        text-align: center;
        background: linear-gradient(
            to right,
            color-mix(in srgb, var(--pico-primary), transparent 80%),
            color-mix(in srgb, var(--pico-primary), transparent 92%)
        );
    }

    .stat-tile {
        display: flex;
        justify-content: space-between;
        align-items: center;
        background-color: color-mix(in srgb, var(--pico-primary), transparent 85%);
    }
    .stat-tile p { margin: 0; }
    .stat-label { font-size: 0.875rem; color: var(--pico-muted-color); }
    .stat-value { font-size: 1.5rem; font-weight: bold; }
    .stat-icon { font-size: 2rem; }
    .trend-up { font-size: 0.875rem; color: var(--pico-ins-color); }
    .trend-flat { font-size: 0.875rem; color: var(--pico-muted-color); }

    .height-value {
        font-size: 2rem;
        font-weight: bold;
        color: var(--pico-primary);
        margin-bottom: 1rem;
    }

    .block-row {
        display: flex;
        justify-content: space-between;
        align-items: center;
        padding: 0.5rem 0;
        border-bottom: 1px solid var(--pico-muted-border-color);
    }

    .muted { color: var(--pico-muted-color); }
    .small { font-size: 0.875rem; }
    .tiny { font-size: 0.75rem; }

    .loading-text { font-size: 1.25rem; text-align: center; }
"#;

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet {
            href: PICO_CSS,
        }
        style {
            "{responsive_css}"
        }
        AppBody {}
    }
}

#[component]
fn AppBody() -> Element {
    // Endpoints are read once, when the view starts.
    let app_state = use_context_provider(|| AppState::new(Endpoints::from_env()));

    use_hook(|| {
        dioxus_logger::tracing::info!(
            "polling node {} and staking api {}",
            app_state.endpoints.rpc_url(),
            app_state.endpoints.staking_url()
        );
    });

    rsx! {
        Container {
            header {
                class: "app-header",
                nav {
                    ul {
                        li {
                            h1 { class: "app-title", "Babylon Explorer" }
                        }
                    }
                    ul {
                        li {
                            NavLinks {}
                        }
                    }
                }
            }
            DashboardScreen {}
        }
    }
}
