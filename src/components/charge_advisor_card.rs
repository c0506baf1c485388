use dioxus::prelude::*;

#[cfg(feature = "web")]
use dioxus::logger::tracing::{info, warn};

use crate::api::{current_grid_demand, report_battery_level};
use crate::components::Gauge;
use crate::shared::status::{
    battery_percent, battery_percent_label, grid_load_percent, ChargeAdvice,
};
use crate::utils::format::format_megawatts;

#[allow(non_snake_case)]
#[component]
pub fn ChargeAdvisorCard() -> Element {
    // Live battery level from the platform API; stays None off-web and
    // on browsers without a battery interface
    let battery_level = use_signal(|| Option::<f64>::None);

    #[cfg(feature = "web")]
    {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;
        use web_sys::BatteryManager;

        // Keep the manager and its levelchange listener alive until unmount
        let subscription: Signal<Option<(BatteryManager, Closure<dyn FnMut()>)>> =
            use_signal(|| None);

        use_drop({
            let mut subscription = subscription.clone();
            move || {
                if let Some((manager, _listener)) = subscription.write().take() {
                    manager.set_onlevelchange(None);
                }
            }
        });

        use_future({
            let mut battery_level = battery_level.clone();
            let mut subscription = subscription.clone();
            move || async move {
                let Some(manager) = crate::battery::battery_manager().await else {
                    info!("[charge_advisor] no platform battery interface");
                    return;
                };
                battery_level.set(Some(manager.level()));
                let listener = Closure::<dyn FnMut()>::new({
                    let manager = manager.clone();
                    let mut battery_level = battery_level.clone();
                    move || battery_level.set(Some(manager.level()))
                });
                manager.set_onlevelchange(Some(listener.as_ref().unchecked_ref()));
                subscription.set(Some((manager, listener)));
            }
        });

        // Report every defined level once, fire-and-forget: no retry, no
        // ordering guarantee; a dropped report is just dropped
        let last_reported = use_signal(|| Option::<f64>::None);
        use_effect({
            let battery_level = battery_level.clone();
            let mut last_reported = last_reported.clone();
            move || {
                let Some(level) = *battery_level.read() else {
                    return;
                };
                if *last_reported.peek() == Some(level) {
                    return;
                }
                last_reported.set(Some(level));
                spawn(async move {
                    if let Err(e) = report_battery_level(level).await {
                        warn!("[charge_advisor] battery report dropped: {e}");
                    }
                });
            }
        });
    }

    let current = use_resource(|| async move { current_grid_demand().await });
    let current_v = current.read_unchecked();

    rsx! {
        // Card
        div { class: "w-full rounded-2xl border border-slate-800 bg-slate-900/60 backdrop-blur-sm shadow-xl p-8 space-y-6",
            h1 { class: "text-2xl font-semibold tracking-tight text-slate-200", "Energy Aware Charging Assistant" }

            {
                match &*current_v {
                    // Current reading available
                    Some(Ok(reading)) => {
                        let load_percent = grid_load_percent(reading.value);
                        let advice = ChargeAdvice::for_load_percent(load_percent);
                        let message = advice.message();
                        let banner_class = advice.banner_class();
                        let level = *battery_level.read();
                        let battery_label = battery_percent_label(level);
                        let load_label = format!("{load_percent:.0}");
                        let demand_now = format_megawatts(reading.value);
                        rsx! {
                            div { class: "flex items-center justify-around gap-6",
                                div { class: "flex flex-col items-center gap-2",
                                    Gauge {
                                        value: battery_percent(level),
                                        start_angle: 45.0,
                                        stop_angle: 315.0,
                                        size: 180,
                                        stroke: 12,
                                        track_class: "text-slate-800".to_string(),
                                        progress_class: "text-sky-400".to_string(),
                                        div { class: "text-4xl font-bold text-sky-400 tabular-nums", "{battery_label}%" }
                                    }
                                    span { class: "text-sm text-slate-400", "Charging" }
                                }
                                div { class: "flex flex-col items-center gap-2",
                                    span { class: "text-4xl font-bold text-slate-100 tabular-nums", "{load_label}%" }
                                    span { class: "text-sm text-slate-400", "Grid demand" }
                                    span { class: "text-xs text-slate-500", "{demand_now} now" }
                                }
                            }
                            div { class: "p-3 rounded-lg text-center font-semibold {banner_class}", "{message}" }
                        }
                    },
                    // Fetch failed: the error string replaces the card body
                    Some(Err(e)) => rsx! {
                        p { class: "text-red-400", "Error: {e}" }
                    },
                    // In flight
                    None => rsx! {
                        div { class: "animate-pulse space-y-3",
                            p { class: "text-slate-400", "Loading data..." }
                            div { class: "h-9 w-28 bg-slate-800 rounded" }
                            div { class: "h-5 w-48 bg-slate-800 rounded" }
                        }
                    },
                }
            }
        }
    }
}
