use propplot::{Config, build_plot, parse_config, parse_csv, render_svg};
use wasm_bindgen::prelude::*;

/// Renders CSV text (label, left value, right value) to an SVG string.
/// `options_json` uses the same keys as the config file.
fn render_proportion(csv: &str, options_json: Option<&str>) -> propplot::Result<String> {
    let config = match options_json {
        Some(raw) if !raw.trim().is_empty() => parse_config(raw)?,
        _ => Config::default(),
    };
    let dataset = parse_csv(csv)?;
    let canvas = build_plot(&dataset, &config.plot)?;
    Ok(render_svg(&canvas, &config.theme, &config.render))
}

#[wasm_bindgen]
pub fn render_proportion_svg(csv: &str, options_json: Option<String>) -> Result<String, JsValue> {
    render_proportion(csv, options_json.as_deref())
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
