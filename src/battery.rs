#![cfg(feature = "web")]

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::BatteryManager;

/// Resolve the platform battery interface, if the browser exposes one.
/// Returns None on browsers without `navigator.getBattery()`.
pub async fn battery_manager() -> Option<BatteryManager> {
    let promise = web_sys::window()?.navigator().get_battery().ok()?;
    let value = JsFuture::from(promise).await.ok()?;
    value.dyn_into::<BatteryManager>().ok()
}
