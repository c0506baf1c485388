use dioxus::prelude::*;

use crate::api::grid_demand_history;
use crate::shared::status::{display_period, parse_period, DemandLevel};
use crate::shared::types::GridHistoryPointDto;
use crate::utils::format::format_megawatts;

#[allow(non_snake_case)]
#[component]
pub fn DemandHistoryView() -> Element {
    // One fetch per view load feeds both the chart and the table
    let history = use_resource(|| async move { grid_demand_history().await });
    let history_v = history.read_unchecked();

    match &*history_v {
        Some(Ok(points)) => rsx! {
            div { class: "space-y-6",
                DemandChart { points: points.clone() }
                DemandTable { points: points.clone() }
            }
        },
        Some(Err(e)) => rsx! {
            div { class: "rounded-2xl border border-slate-800 bg-slate-900/60 backdrop-blur-sm shadow-xl p-6",
                p { class: "text-red-400", "Error: {e}" }
            }
        },
        None => rsx! {
            div { class: "rounded-2xl border border-slate-800 bg-slate-900/60 backdrop-blur-sm shadow-xl p-6 animate-pulse",
                div { class: "h-40 bg-slate-800 rounded" }
            }
        },
    }
}

#[allow(non_snake_case)]
#[component]
fn DemandChart(points: Vec<GridHistoryPointDto>) -> Element {
    // Hovered point index (for tooltip)
    let mut hovered = use_signal(|| Option::<usize>::None);
    // Visual params
    let height = 180.0f32;
    let padding = 24.0f32;
    let step = 28.0f32;
    let n = points.len().max(1) as f32;
    let width = ((n - 1.0).max(1.0) * step + padding * 2.0).ceil();
    let max_value = points.iter().map(|p| p.value).fold(1.0f64, f64::max);
    let view_box = format!("0 0 {} {}", width, height + padding * 2.0);

    let line_points: String = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = padding + (i as f32) * step;
            let y = padding + (height - ((p.value / max_value) as f32) * height);
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ");

    rsx! {
        div { class: "rounded-2xl border border-slate-800 bg-slate-900/60 backdrop-blur-sm shadow-xl p-6 space-y-3",
            div { class: "flex items-end justify-between",
                h2 { class: "text-lg font-medium text-slate-200", "Grid demand (last 24 hours)" }
                div { class: "text-xs text-slate-400", "Peak: {format_megawatts(max_value)}" }
            }
            div { class: "w-full overflow-x-auto",
                svg { class: "block min-w-full", view_box: "{view_box}", width: "100%", height: "{(height + padding*2.0).to_string()}",
                    line { x1: "{padding}", y1: "{padding + height}", x2: "{width - padding}", y2: "{padding + height}", stroke: "#1f2937", stroke_width: "1" }
                    polyline { class: "text-emerald-400", points: "{line_points}", fill: "none", stroke: "currentColor", stroke_width: "2" }
                    {
                        points.iter().enumerate().map(|(i, p)| {
                            let x = padding + (i as f32) * step;
                            let y = padding + (height - ((p.value / max_value) as f32) * height);
                            let cls = DemandLevel::from_megawatts(p.value).dot_class();
                            rsx!{ circle {
                                key: "{i}", class: "{cls}", cx: "{x}", cy: "{y}", r: "4", fill: "currentColor",
                                onmouseenter: move |_| *hovered.write() = Some(i),
                                onmouseleave: move |_| *hovered.write() = None,
                                ontouchstart: move |_| *hovered.write() = Some(i),
                                ontouchend: move |_| *hovered.write() = None,
                            }}
                        })
                    }
                    {
                        match *hovered.read() {
                            Some(i) => match points.get(i) {
                                Some(p) => {
                                    let x = padding + (i as f32) * step;
                                    let y = padding + (height - ((p.value / max_value) as f32) * height);
                                    let period_label = display_period(&p.period);
                                    let value_label = format_megawatts(p.value);
                                    let cw = 7.0f32; // approx char width at 11px
                                    let content_w = (period_label.len().max(value_label.len()) as f32) * cw + 12.0;
                                    let tip_w = content_w.max(12.0).min(width - padding * 2.0);
                                    let tip_h = 36.0f32; // two lines
                                    let tip_x = (x - tip_w / 2.0).clamp(padding, (width - padding) - tip_w);
                                    let tip_y = (y - 10.0 - tip_h).max(6.0);
                                    rsx!{ g { key: "tooltip",
                                        line { x1: "{x}", y1: "{y}", x2: "{x}", y2: "{tip_y + tip_h}", stroke: "#10b981", stroke_width: "1" }
                                        rect { x: "{tip_x}", y: "{tip_y}", width: "{tip_w}", height: "{tip_h}", rx: "6", fill: "#0f172a", stroke: "#334155", stroke_width: "1" }
                                        text { x: "{tip_x + 8.0}", y: "{tip_y + 16.0}", class: "fill-current text-[11px] text-slate-300", "{period_label}" }
                                        text { x: "{tip_x + 8.0}", y: "{tip_y + 30.0}", class: "fill-current text-[11px] text-slate-200", "{value_label}" }
                                    }}
                                }
                                None => rsx!{ Fragment {} }
                            },
                            None => rsx!{ Fragment {} }
                        }
                    }
                    {
                        points.iter().enumerate().filter(|(i, _)| i % 4 == 0).filter_map(|(i, p)| {
                            let dt = parse_period(&p.period)?;
                            let x = padding + (i as f32) * step;
                            let label = dt.format("%H:%M").to_string();
                            Some(rsx!{ text { x: "{x - 14.0}", y: "{height + padding + 14.0}", class: "text-slate-400 fill-current text-[10px]", "{label}" } })
                        })
                    }
                }
            }
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn DemandTable(points: Vec<GridHistoryPointDto>) -> Element {
    rsx! {
        div { class: "rounded-2xl border border-slate-800 bg-slate-900/60 backdrop-blur-sm shadow-xl p-6 space-y-3",
            h2 { class: "text-lg font-medium text-slate-200", "Hourly readings" }
            table { class: "w-full text-sm",
                thead {
                    tr { class: "text-left text-slate-400 border-b border-slate-800",
                        th { class: "py-2 pr-4 font-medium", "Period" }
                        th { class: "py-2 pr-4 font-medium", "Demand" }
                        th { class: "py-2 font-medium", "Status" }
                    }
                }
                tbody {
                    {
                        points.iter().enumerate().map(|(i, p)| {
                            let period = display_period(&p.period);
                            let demand = format_megawatts(p.value);
                            let level = DemandLevel::from_megawatts(p.value);
                            let badge_class = level.badge_class();
                            let label = level.label();
                            rsx! {
                                tr { key: "{i}", class: "border-b border-slate-800/60 text-slate-300",
                                    td { class: "py-2 pr-4 tabular-nums", "{period}" }
                                    td { class: "py-2 pr-4 tabular-nums", "{demand}" }
                                    td { class: "py-2",
                                        span { class: "px-2 py-0.5 rounded text-xs font-semibold {badge_class}", "{label}" }
                                    }
                                }
                            }
                        })
                    }
                }
            }
        }
    }
}
