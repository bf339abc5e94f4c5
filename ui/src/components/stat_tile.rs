use dioxus::prelude::*;

/// The direction a tile's trend caption points, which only affects its color.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum Trend {
    Up,
    #[default]
    Flat,
}

#[derive(Props, PartialEq, Clone)]
pub struct StatTileProps {
    label: &'static str,
    value: String,
    #[props(optional)]
    unit: Option<&'static str>,
    /// Caption shown under the value, e.g. "↗ 0.098%".
    trend_caption: &'static str,
    #[props(default)]
    trend: Trend,
    icon: &'static str,
}

/// One of the summary tiles at the top of the dashboard.
#[component]
pub fn StatTile(props: StatTileProps) -> Element {
    let trend_class = match props.trend {
        Trend::Up => "trend-up",
        Trend::Flat => "trend-flat",
    };

    rsx! {
        article {
            class: "stat-tile",
            div {
                p { class: "stat-label", "{props.label}" }
                p {
                    class: "stat-value",
                    "{props.value}"
                    if let Some(unit) = props.unit {
                        " {unit}"
                    }
                }
                p { class: "{trend_class}", "{props.trend_caption}" }
            }
            span { class: "stat-icon", "aria-hidden": "true", "{props.icon}" }
        }
    }
}
