//! Proportion plots: two stacked bars, one per state, with a translucent
//! strip joining each category's left segment to its right segment.
//!
//! ```no_run
//! use propplot::{Config, Dataset, proportion_plot};
//!
//! let mut data = Dataset::new("2019", "2024");
//! data.push("A", 10.0, 5.0);
//! data.push("B", 5.0, 10.0);
//! let svg = proportion_plot(&data, &Config::default())?;
//! # Ok::<(), propplot::PlotError>(())
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod palette;
pub mod parser;
pub mod render;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, CurveMode, PlotConfig, RenderConfig, load_config, parse_config};
pub use error::{PlotError, Result};
pub use ir::{Category, Dataset, Side};
pub use layout::{Canvas, build_plot, get_points};
pub use palette::{ColorMap, Rgb, assign_colors};
pub use parser::{parse_csv, read_csv};
pub use render::{render_svg, write_output_png, write_output_svg};
pub use theme::Theme;

/// Draws the plot and returns it as SVG. When `config.plot.image_filename`
/// is set the plot is also written there as a PNG.
pub fn proportion_plot(dataset: &Dataset, config: &Config) -> Result<String> {
    let canvas = build_plot(dataset, &config.plot)?;
    let svg = render_svg(&canvas, &config.theme, &config.render);
    export_image(&svg, config)?;
    Ok(svg)
}

/// Writes the PNG named by `config.plot.image_filename`, if any.
/// Returns whether a file was written.
pub fn export_image(svg: &str, config: &Config) -> Result<bool> {
    let Some(path) = config.plot.image_filename.as_deref() else {
        return Ok(false);
    };
    write_output_png(svg, path, &config.render, &config.theme)?;
    log::info!("saved plot to {} at {} dpi", path.display(), config.render.dpi);
    Ok(true)
}
