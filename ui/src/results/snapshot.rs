//! Static SVG rendition of the results region, used as the source image of
//! the PNG export on both targets.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::core::chart::{Series, SeriesKind};
use crate::core::format::{format_count, year_entry};
use crate::core::session::{RenderedChart, RenderedResults};
use crate::t;

pub const WIDTH: u32 = 1200;

const MARGIN: f64 = 40.0;
const HEADER_HEIGHT: f64 = 96.0;
const YEAR_LINE: f64 = 32.0;
const PANEL_HEIGHT: f64 = 380.0;
const PANEL_GAP: f64 = 24.0;
const FOOTER_HEIGHT: f64 = 56.0;
const MAX_AXIS_LABELS: usize = 24;
const FONT: &str = "Inter, 'Segoe UI', 'DejaVu Sans', sans-serif";
const PALETTE: [&str; 6] = [
    "#3b75af", "#ef8636", "#519e3e", "#c53a32", "#8d69b8", "#84584e",
];
const STAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute] UTC");

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub svg: String,
    pub width: u32,
    pub height: u32,
}

/// Current UTC time for the snapshot footer.
pub fn generated_stamp() -> String {
    OffsetDateTime::now_utc()
        .format(STAMP_FORMAT)
        .unwrap_or_default()
}

pub fn compose(results: &RenderedResults, stamp: &str) -> Snapshot {
    crate::i18n::init();

    let years_height = if results.years.is_empty() {
        0.0
    } else {
        results.years.len() as f64 * YEAR_LINE + PANEL_GAP
    };
    let charts_height = results.charts.len() as f64 * (PANEL_HEIGHT + PANEL_GAP);
    let height = (HEADER_HEIGHT + years_height + charts_height + FOOTER_HEIGHT).ceil() as u32;

    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{WIDTH}' height='{height}' viewBox='0 0 {WIDTH} {height}'>\n"
    ));
    svg.push_str(&format!(
        "  <rect width='{WIDTH}' height='{height}' fill='#f5f7fb'/>\n"
    ));
    text(
        &mut svg,
        MARGIN,
        60.0,
        32,
        "700",
        "#151923",
        "start",
        &t!("results-heading"),
    );

    let mut top = HEADER_HEIGHT;
    for entry in &results.years {
        text(
            &mut svg,
            MARGIN,
            top + 22.0,
            20,
            "400",
            "#151923",
            "start",
            &year_entry(entry),
        );
        top += YEAR_LINE;
    }
    if !results.years.is_empty() {
        top += PANEL_GAP;
    }

    for chart in &results.charts {
        chart_panel(&mut svg, chart, top);
        top += PANEL_HEIGHT + PANEL_GAP;
    }

    text(
        &mut svg,
        MARGIN,
        f64::from(height) - 24.0,
        14,
        "400",
        "#6b7385",
        "start",
        &t!("snapshot-generated", stamp = stamp),
    );
    svg.push_str("</svg>\n");

    Snapshot {
        svg,
        width: WIDTH,
        height,
    }
}

fn chart_panel(svg: &mut String, chart: &RenderedChart, top: f64) {
    let left = MARGIN;
    let width = f64::from(WIDTH) - 2.0 * MARGIN;
    svg.push_str(&format!(
        "  <rect x='{left}' y='{top}' width='{width}' height='{PANEL_HEIGHT}' rx='12' fill='#ffffff' stroke='#d9dee7'/>\n"
    ));
    let title = chart
        .spec
        .title()
        .unwrap_or_else(|| chart.slot.field.clone());
    text(svg, left + 20.0, top + 36.0, 22, "600", "#151923", "start", &title);

    let plot_x = left + 70.0;
    let plot_y = top + 64.0;
    let plot_w = width - 100.0;
    let plot_h = PANEL_HEIGHT - 120.0;
    let baseline = plot_y + plot_h;

    let series = chart.spec.series();
    let categories = categories(&series);
    if categories.is_empty() {
        return;
    }

    svg.push_str(&format!(
        "  <line x1='{plot_x}' y1='{baseline}' x2='{}' y2='{baseline}' stroke='#9aa3b5'/>\n",
        plot_x + plot_w
    ));

    let slot_w = plot_w / categories.len() as f64;
    let bars: Vec<&Series> = series.iter().filter(|s| s.kind == SeriesKind::Bar).collect();
    let lines: Vec<&Series> = series.iter().filter(|s| s.kind == SeriesKind::Line).collect();
    let bar_max = axis_max(&bars);
    let line_max = axis_max(&lines);

    let primary_max = if bars.is_empty() { line_max } else { bar_max };
    text(
        svg,
        plot_x - 10.0,
        plot_y + 6.0,
        13,
        "400",
        "#6b7385",
        "end",
        &format_count(primary_max),
    );
    text(svg, plot_x - 10.0, baseline, 13, "400", "#6b7385", "end", "0");

    let group_w = slot_w * 0.7;
    let bar_w = group_w / bars.len().max(1) as f64;
    let mut color_idx = 0;
    let mut legend: Vec<(&str, String)> = Vec::new();
    for (bar_idx, bar) in bars.iter().enumerate() {
        let color = series_color(bar, color_idx);
        color_idx += 1;
        legend.push((bar.name.as_str(), color.clone()));
        for (label, value) in bar.x.iter().zip(&bar.y) {
            let Some(ci) = categories.iter().position(|c| c == label) else {
                continue;
            };
            let h = value.max(0.0) / bar_max * plot_h;
            let x = plot_x + ci as f64 * slot_w + (slot_w - group_w) / 2.0 + bar_idx as f64 * bar_w;
            svg.push_str(&format!(
                "  <rect x='{x:.1}' y='{:.1}' width='{:.1}' height='{h:.1}' fill='{}'/>\n",
                baseline - h,
                (bar_w - 2.0).max(1.0),
                escape(&color)
            ));
        }
    }

    for line in &lines {
        let raw_color = series_color(line, color_idx);
        let color = escape(&raw_color);
        color_idx += 1;
        legend.push((line.name.as_str(), raw_color));
        let points: Vec<(f64, f64)> = line
            .x
            .iter()
            .zip(&line.y)
            .filter_map(|(label, value)| {
                let ci = categories.iter().position(|c| c == label)?;
                let x = plot_x + (ci as f64 + 0.5) * slot_w;
                let y = baseline - value.max(0.0) / line_max * plot_h;
                Some((x, y))
            })
            .collect();
        let path = points
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect::<Vec<_>>()
            .join(" ");
        svg.push_str(&format!(
            "  <polyline points='{path}' fill='none' stroke='{color}' stroke-width='3'/>\n"
        ));
        for (x, y) in points {
            svg.push_str(&format!(
                "  <circle cx='{x:.1}' cy='{y:.1}' r='4' fill='{color}'/>\n"
            ));
        }
    }

    let step = categories.len().div_ceil(MAX_AXIS_LABELS).max(1);
    for (ci, label) in categories.iter().enumerate().step_by(step) {
        let x = plot_x + (ci as f64 + 0.5) * slot_w;
        text(svg, x, baseline + 24.0, 13, "400", "#4a5163", "middle", label);
    }

    if legend.len() > 1 {
        legend_row(svg, left + width - 20.0, top + 32.0, &legend);
    }
}

/// Series names with their swatches, right-aligned so the row ends at `right`.
/// Unnamed series are left out.
fn legend_row(svg: &mut String, right: f64, y: f64, entries: &[(&str, String)]) {
    let mut cursor = right;
    for (name, color) in entries.iter().rev().filter(|(name, _)| !name.is_empty()) {
        let label_w = name.chars().count() as f64 * 7.5;
        text(svg, cursor, y, 13, "400", "#4a5163", "end", name);
        let swatch_x = cursor - label_w - 18.0;
        svg.push_str(&format!(
            "  <rect x='{swatch_x:.1}' y='{:.1}' width='12' height='12' rx='2' fill='{}'/>\n",
            y - 10.0,
            escape(color)
        ));
        cursor = swatch_x - 18.0;
    }
}

/// Union of the series' x labels, in order of first appearance.
fn categories(series: &[Series]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for label in series.iter().flat_map(|s| s.x.iter()) {
        if !out.contains(label) {
            out.push(label.clone());
        }
    }
    out
}

fn axis_max(series: &[&Series]) -> f64 {
    let max = series
        .iter()
        .flat_map(|s| s.y.iter().copied())
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

fn series_color(series: &Series, idx: usize) -> String {
    series
        .color
        .clone()
        .unwrap_or_else(|| PALETTE[idx % PALETTE.len()].to_string())
}

#[allow(clippy::too_many_arguments)]
fn text(
    svg: &mut String,
    x: f64,
    y: f64,
    size: u32,
    weight: &str,
    fill: &str,
    anchor: &str,
    content: &str,
) {
    svg.push_str(&format!(
        "  <text x='{x:.1}' y='{y:.1}' fill='{fill}' font-family=\"{FONT}\" font-size='{size}' font-weight='{weight}' text-anchor='{anchor}'>{}</text>\n",
        escape(content)
    ));
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
