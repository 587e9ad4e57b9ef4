use rnalayout_core::LayoutOptions;
use wasm_bindgen::prelude::*;

/// Compute the layout of dot-bracket notation and return JSON.
#[wasm_bindgen]
pub fn draw_structure(input: &str) -> String {
    rnalayout_core::draw_structure(input)
}

/// Compute a layout with sequence and JSON options.
///
/// `opts_json` is parsed as `LayoutOptions` with `#[serde(default)]`,
/// so any omitted field uses the default value and an empty string means
/// all defaults. Malformed options yield an empty result.
#[wasm_bindgen]
pub fn layout_with_options(input: &str, seq: &str, pseudoknots: bool, opts_json: &str) -> String {
    let opts = if opts_json.trim().is_empty() {
        LayoutOptions::default()
    } else {
        match serde_json::from_str::<LayoutOptions>(opts_json) {
            Ok(opts) => opts,
            Err(_) => return String::new(),
        }
    };
    let seq = if seq.is_empty() { None } else { Some(seq) };
    rnalayout_core::layout_structure(input, seq, pseudoknots, &opts)
        .ok()
        .and_then(|r| serde_json::to_string(&r).ok())
        .unwrap_or_default()
}

/// Lay out a partner array (-1 = unpaired) over numeric base codes.
#[wasm_bindgen]
pub fn compute_rna(pairs: Vec<i32>, bases: Vec<u8>) -> String {
    let pairs: Vec<isize> = pairs.into_iter().map(|p| p as isize).collect();
    rnalayout_core::compute_rna(&pairs, &bases)
        .ok()
        .and_then(|r| serde_json::to_string(&r).ok())
        .unwrap_or_default()
}
