use std::cell::Cell;

use seed::prelude::*;
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use shared::{GeoPoint, TileSigner, Viewport};
use wasm_bindgen::prelude::{Closure, JsValue, wasm_bindgen};

pub const MAP_CONTAINER_ID: &str = "streetlight-map";
pub const VIEWPORT_EVENT: &str = "map-viewport-changed";

#[wasm_bindgen(module = "/streetlight_map.js")]
extern "C" {
    #[wasm_bindgen(js_name = mountMap)]
    fn mount_map_js(
        container_id: &str,
        style_url: &str,
        transform_request: &Closure<dyn Fn(String, Option<String>) -> JsValue>,
        viewport: JsValue,
    );
    #[wasm_bindgen(js_name = flyTo)]
    fn fly_to_js(viewport: JsValue);
    #[wasm_bindgen(js_name = showStreet)]
    fn show_street_js(path: JsValue, lights: JsValue);
    #[wasm_bindgen(js_name = destroyMap)]
    fn destroy_map_js();
}

/// What MapLibre expects back from its `transformRequest` hook.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransformedRequest {
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource_type: Option<String>,
}

/// Console line for the first request that leaves unsigned. `tracing` has no
/// subscriber in the browser, so the signer's own warning is not visible.
fn unsigned_notice(signer: &TileSigner, url: &str, warned: &Cell<bool>) -> Option<String> {
    if signer.has_key() || warned.replace(true) {
        return None;
    }
    Some(format!(
        "[frontend] no tile API key configured, sending unsigned requests (first: {url})"
    ))
}

/// A mounted MapLibre instance. Dropping it removes the map and releases the
/// request hook.
pub struct MapHandle {
    _transform_request: Closure<dyn Fn(String, Option<String>) -> JsValue>,
}

impl MapHandle {
    pub fn mount(style_url: &str, signer: TileSigner, viewport: &Viewport) -> Self {
        let warned = Cell::new(false);
        let transform_request = Closure::<dyn Fn(String, Option<String>) -> JsValue>::new(
            move |url: String, resource_type: Option<String>| {
                if let Some(notice) = unsigned_notice(&signer, &url, &warned) {
                    web_sys::console::warn_1(&notice.into());
                }
                let signed = signer.sign(&url, resource_type.as_deref());
                to_value(&TransformedRequest {
                    url: signed.url,
                    resource_type: signed.resource_type,
                })
                .unwrap_or(JsValue::NULL)
            },
        );

        match to_value(viewport) {
            Ok(viewport) => mount_map_js(MAP_CONTAINER_ID, style_url, &transform_request, viewport),
            Err(err) => web_sys::console::error_1(
                &format!("[frontend] cannot encode initial viewport: {err:?}").into(),
            ),
        }

        Self {
            _transform_request: transform_request,
        }
    }

    pub fn fly_to(&self, viewport: &Viewport) {
        if let Ok(value) = to_value(viewport) {
            fly_to_js(value);
        }
    }

    pub fn show_street(&self, path: &[GeoPoint], lights: &[GeoPoint]) {
        if let (Ok(path), Ok(lights)) = (to_value(path), to_value(lights)) {
            show_street_js(path, lights);
        }
    }
}

impl Drop for MapHandle {
    fn drop(&mut self) {
        destroy_map_js();
    }
}
