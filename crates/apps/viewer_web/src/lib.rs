use console_error_panic_hook::set_once;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use foundation::math::Vec2;
use runtime::{PointerEvent, PointerEventKind};
use viewer::{AppConfig, DrawingOutcome, MapApp, MountTarget};

thread_local! {
    static APP: RefCell<Option<MapApp>> = const { RefCell::new(None) };
}

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn with_app<T>(f: impl FnOnce(&mut MapApp) -> T) -> Result<T, JsValue> {
    APP.with(|slot| match slot.borrow_mut().as_mut() {
        Some(app) => Ok(f(app)),
        None => Err(JsValue::from_str("map not mounted; call mount() first")),
    })
}

fn outcome_label(outcome: DrawingOutcome) -> String {
    match outcome {
        DrawingOutcome::Ignored => "ignored".to_string(),
        DrawingOutcome::PointAdded(n) => format!("point:{n}"),
        DrawingOutcome::Completed(id) => format!("completed:{id}"),
        DrawingOutcome::Cancelled => "cancelled".to_string(),
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Mounts the map on the element with `element_id`, replacing any
/// previously mounted map, and seeds the demo polygon.
#[wasm_bindgen]
pub fn mount(element_id: &str, width: f64, height: f64) {
    let config = AppConfig::from_build_env();
    for name in config.missing() {
        log(&format!("{name} not found in environment variables"));
    }

    let mut app = MapApp::mount(config, MountTarget::new(element_id, width, height));
    app.seed_demo();
    APP.with(|slot| *slot.borrow_mut() = Some(app));
}

#[wasm_bindgen]
pub fn set_canvas_sizes(width: f64, height: f64) -> Result<(), JsValue> {
    with_app(|app| app.viewer_mut().resize(width, height))
}

/// Returns `true` when the styled basemap is now shown.
#[wasm_bindgen]
pub fn toggle_basemap() -> Result<bool, JsValue> {
    with_app(|app| app.toggle_basemap())
}

/// Returns `true` when edit mode is now active.
#[wasm_bindgen]
pub fn toggle_edit_mode() -> Result<bool, JsValue> {
    with_app(|app| app.toggle_edit_mode())
}

#[wasm_bindgen]
pub fn cancel_edit_mode() -> Result<(), JsValue> {
    with_app(|app| app.cancel_edit_mode())
}

#[wasm_bindgen]
pub fn is_edit_mode() -> Result<bool, JsValue> {
    with_app(|app| app.drawing().is_edit_mode())
}

/// Forwards a canvas click.
///
/// Intended usage: call from a `pointerup` handler with the DOM button index
/// and the canvas-relative pixel position.
#[wasm_bindgen]
pub fn pointer_click(button: i32, x_px: f64, y_px: f64) -> Result<String, JsValue> {
    let Some(kind) = PointerEventKind::from_button(button) else {
        return Ok(outcome_label(DrawingOutcome::Ignored));
    };
    let event = PointerEvent::new(kind, Vec2::new(x_px, y_px));
    with_app(|app| outcome_label(app.dispatch_pointer(event)))
}

/// Committed polygons as a JSON array.
#[wasm_bindgen]
pub fn drawn_polygons_json() -> Result<String, JsValue> {
    let polygons = with_app(|app| app.export_drawn())?
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&polygons).map_err(|e| JsValue::from_str(&e.to_string()))
}
