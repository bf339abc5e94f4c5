//! Lifetime-free Dioxus wrappers for the Pico.css layout primitives the
//! dashboard uses. Pico is linked from the `App` component.

#![allow(non_snake_case)] // Allow PascalCase for component function names

use dioxus::prelude::*;

/// A centered container. Wraps content in a `<main class="container">`.
#[component]
pub fn Container(children: Element) -> Element {
    rsx! { main { class: "container", {children} } }
}

/// A responsive grid; children are laid out in equal columns.
#[component]
pub fn Grid(children: Element) -> Element {
    rsx! { div { class: "grid", {children} } }
}

#[derive(Props, PartialEq, Clone)]
pub struct CardProps {
    #[props(optional)]
    title: Option<String>,
    #[props(default)]
    class: String,
    children: Element,
}

/// A card (`<article>`) with an optional `<header>` title.
pub fn Card(props: CardProps) -> Element {
    rsx! {
        article {
            class: "{props.class}",
            if let Some(title) = props.title {
                header {
                    h3 { style: "margin: 0;", "{title}" }
                }
            }
            {props.children}
        }
    }
}
