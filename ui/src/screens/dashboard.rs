//=============================================================================
// File: src/screens/dashboard.rs
//=============================================================================
use api::view_model::format_count;
use api::DashboardState;
use dioxus::prelude::*;

use crate::components::block_row::BlockRow;
use crate::components::empty_state::EmptyState;
use crate::components::pico::Card;
use crate::components::pico::Grid;
use crate::components::stat_tile::StatTile;
use crate::components::stat_tile::Trend;
use crate::hooks::use_dashboard::use_dashboard;

#[component]
pub fn DashboardScreen() -> Element {
    let state = use_dashboard();

    rsx! {
        match &*state.read() {
            DashboardState::Loading => rsx! {
                Card {
                    p {
                        class: "loading-text",
                        "Loading Babylon Explorer..."
                    }
                    progress {}
                }
            },
            DashboardState::Loaded(view) => {
                let summary = view.summary;
                let recent = view.recent_blocks().to_vec();
                rsx! {
                    article {
                        class: "banner",
                        h2 { "Faucet now live on Babylon Explorer!" }
                        p {
                            "Claim free tBBN and explore the latest features, including Token, Contract details, and IBC Relayer tracking."
                        }
                    }

                    Grid {
                        StatTile {
                            label: "Active Delegations",
                            value: format_count(summary.active_delegations),
                            unit: "BTC",
                            trend_caption: "↗ 0.098%",
                            trend: Trend::Up,
                            icon: "⚡",
                        }
                        StatTile {
                            label: "Stakers",
                            value: format_count(summary.total_stakers),
                            trend_caption: "0%",
                            icon: "👥",
                        }
                        StatTile {
                            label: "Finality Providers",
                            value: summary.finality_providers.to_string(),
                            trend_caption: "0%",
                            icon: "🛡",
                        }
                    }

                    Grid {
                        Card {
                            title: "Current Block Height".to_string(),
                            div {
                                class: "height-value",
                                "{format_count(summary.current_block_height)}"
                            }
                            small { class: "muted", "Average Block Created: 6.9 secs" }
                        }
                        Card {
                            title: "Latest Blocks".to_string(),
                            if recent.is_empty() {
                                EmptyState {
                                    title: "No blocks available".to_string(),
                                    description: "None of the latest blocks could be fetched from the node.".to_string(),
                                }
                            } else {
                                for block in recent {
                                    BlockRow {
                                        key: "{block.height}",
                                        block,
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
