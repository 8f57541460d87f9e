// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Caesar Protocol Base Fee Playground ("The Gasworks")

pub mod adapter;
pub mod delta;
pub mod segments;
pub mod simulation;
pub mod types;

pub use delta::calc_delta_pct;
pub use segments::{expand_segments, validate_segments, SegmentError, MAX_SIM_BLOCKS};
pub use simulation::simulate_base_fee;
pub use types::*;

use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}

/// Expand a segment list into per-block utilization percentages.
#[wasm_bindgen(js_name = expandSegments)]
pub fn expand_segments_js(segments: JsValue) -> JsValue {
    let segments: Vec<Segment> = match serde_wasm_bindgen::from_value(segments) {
        Ok(s) => s,
        Err(_) => return JsValue::NULL,
    };
    serde_wasm_bindgen::to_value(&expand_segments(&segments)).unwrap_or(JsValue::NULL)
}

/// Run a full base fee simulation; returns one point per expanded block.
///
/// Malformed input and segment lists over the block cap return NULL -- the
/// playground rejects those before charting.
#[wasm_bindgen(js_name = simulateBaseFee)]
pub fn simulate_base_fee_js(params: JsValue, segments: JsValue) -> JsValue {
    let params: BaseFeeParams = match serde_wasm_bindgen::from_value(params) {
        Ok(p) => p,
        Err(_) => return JsValue::NULL,
    };
    let segments: Vec<Segment> = match serde_wasm_bindgen::from_value(segments) {
        Ok(s) => s,
        Err(_) => return JsValue::NULL,
    };
    if validate_segments(&segments).is_err() {
        return JsValue::NULL;
    }
    serde_wasm_bindgen::to_value(&simulate_base_fee(&params, &segments)).unwrap_or(JsValue::NULL)
}
