use dioxus::prelude::*;
use serde_json::json;

use crate::core::chart::ChartSpec;
use crate::core::config::ChartSlot;
use crate::core::controller::ChartRenderer;

/// Plotly bundle loaded by the analyzer page.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Draws chart specs with the page's Plotly through `document::eval`, which
/// works the same in the browser and in the desktop webview.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlotlyRenderer;

impl ChartRenderer for PlotlyRenderer {
    fn render(&self, mount_id: &str, spec: &ChartSpec) {
        let script = plot_script(mount_id, spec);
        let _ = document::eval(&script);
    }

    fn clear(&self, mount_id: &str) {
        let _ = document::eval(&purge_script(mount_id));
    }
}

/// JavaScript drawing `spec` into the element with id `mount_id`. Runs on the
/// next animation frame so the mount has been revealed and sized.
pub fn plot_script(mount_id: &str, spec: &ChartSpec) -> String {
    let id = json!(mount_id);
    let data = json!(spec.data);
    let layout = spec.layout_or_empty();
    format!(
        "requestAnimationFrame(() => {{\n  const el = document.getElementById({id});\n  if (!el || typeof Plotly === 'undefined') {{ return; }}\n  Plotly.newPlot(el, {data}, {layout}, {{ responsive: true }});\n}});"
    )
}

pub fn purge_script(mount_id: &str) -> String {
    let id = json!(mount_id);
    format!(
        "const el = document.getElementById({id});\nif (el) {{\n  if (typeof Plotly !== 'undefined') {{ Plotly.purge(el); }}\n  el.innerHTML = '';\n}}"
    )
}

/// One mount point per configured chart. The elements always exist so the
/// renderer can find them; the results container decides visibility.
#[component]
pub fn ChartMounts(slots: Vec<ChartSlot>) -> Element {
    rsx! {
        div { class: "analysis__charts",
            for slot in slots {
                div {
                    key: "{slot.mount_id}",
                    id: "{slot.mount_id}",
                    class: "analysis__chart",
                    "data-field": "{slot.field}",
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_targets_the_mount_and_embeds_the_spec() {
        let spec = ChartSpec::from_field(&json!({
            "data": [{ "x": ["2020"], "y": [3], "type": "bar" }],
            "layout": { "title": "Кількість прочитаних книг за роками" }
        }))
        .unwrap();

        let script = plot_script("yearGraph", &spec);
        assert!(script.contains("document.getElementById(\"yearGraph\")"));
        assert!(script.contains("\"type\":\"bar\""));
        assert!(script.contains("Кількість прочитаних книг за роками"));
    }

    #[test]
    fn purge_empties_the_mount() {
        let script = purge_script("monthGraph");
        assert!(script.contains("getElementById(\"monthGraph\")"));
        assert!(script.contains("Plotly.purge(el)"));
    }

    #[test]
    fn mount_ids_are_escaped_as_json() {
        let spec = ChartSpec::from_field(&json!("{\"data\": []}")).unwrap();
        let script = plot_script("a\"b", &spec);
        assert!(script.contains("getElementById(\"a\\\"b\")"));
        assert!(script.contains(", [], {},"));
    }
}
