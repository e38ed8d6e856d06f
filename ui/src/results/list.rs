use crate::core::format::{year_count, year_label};
use crate::core::protocol::YearCount;
use dioxus::prelude::*;

/// Year → books-read list, one paragraph per year in ascending order.
#[component]
pub fn YearList(years: Vec<YearCount>) -> Element {
    // Re-render with fresh labels when the language changes.
    let _lang = try_use_context::<Signal<String>>().map(|code| code());

    if years.is_empty() {
        return rsx! {};
    }

    let entries: Vec<(i64, String, String)> = years
        .iter()
        .map(|entry| (entry.year, year_label(entry.year), year_count(entry.count)))
        .collect();

    rsx! {
        div { class: "analysis__years",
            for (year, label, count) in entries {
                p { key: "{year}", class: "analysis__year",
                    strong { "{label}" }
                    " {count}"
                }
            }
        }
    }
}
