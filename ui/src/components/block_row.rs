use api::view_model::BlockSummary;
use dioxus::prelude::*;

/// One entry of the latest-blocks panel.
///
/// The proposer is already truncated by the view model; nothing here
/// shortens or reformats it further.
#[component]
pub fn BlockRow(block: BlockSummary) -> Element {
    rsx! {
        div {
            class: "block-row",
            div {
                strong { "#{block.height}" }
                div { class: "muted small", "{block.timestamp}" }
            }
            div {
                style: "text-align: right;",
                div { class: "small", "{block.transaction_count} txs" }
                code { class: "muted tiny", "{block.proposer_label}" }
            }
        }
    }
}
