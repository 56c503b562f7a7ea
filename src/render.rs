use crate::config::RenderConfig;
use crate::error::{PlotError, Result};
use crate::layout::{Canvas, GRAPH_WIDTH, HAlign, TEXT_WIDTH, TextLabel, VAlign};
use crate::text_metrics::text_width_or_estimate;
use crate::theme::Theme;
use std::path::Path;

/// SVG user units per inch; one unit is one typographic point.
pub const POINTS_PER_INCH: f32 = 72.0;

// Matplotlib's default subplot placement, as fractions of the figure.
const AXES_LEFT: f32 = 0.125;
const AXES_RIGHT: f32 = 0.9;
const AXES_BOTTOM: f32 = 0.11;
const AXES_TOP: f32 = 0.88;
const Y_MARGIN: f32 = 0.05;
const LINE_HEIGHT: f32 = 1.2;

/// Maps data coordinates into figure points (y down).
#[derive(Debug, Clone, Copy)]
struct Frame {
    x_min: f32,
    x_max: f32,
    y_min: f32,
    y_max: f32,
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
}

impl Frame {
    fn new(canvas: &Canvas, render: &RenderConfig) -> Self {
        let fig_w = render.width * POINTS_PER_INCH;
        let fig_h = render.height * POINTS_PER_INCH;
        let (lo, hi) = canvas.y_extent().unwrap_or((0.0, 1.0));
        let span = if hi > lo { hi - lo } else { 1.0 };
        Self {
            x_min: -TEXT_WIDTH,
            x_max: TEXT_WIDTH + GRAPH_WIDTH,
            y_min: lo - span * Y_MARGIN,
            y_max: lo + span + span * Y_MARGIN,
            left: fig_w * AXES_LEFT,
            right: fig_w * AXES_RIGHT,
            bottom: fig_h * (1.0 - AXES_BOTTOM),
            top: fig_h * (1.0 - AXES_TOP),
        }
    }

    fn x(&self, x: f32) -> f32 {
        self.left + (x - self.x_min) / (self.x_max - self.x_min) * (self.right - self.left)
    }

    fn y(&self, y: f32) -> f32 {
        self.bottom - (y - self.y_min) / (self.y_max - self.y_min) * (self.bottom - self.top)
    }
}

/// Running bounding box of everything painted.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    fn empty() -> Self {
        Self {
            min_x: f32::INFINITY,
            min_y: f32::INFINITY,
            max_x: f32::NEG_INFINITY,
            max_y: f32::NEG_INFINITY,
        }
    }

    fn include(&mut self, x: f32, y: f32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn is_empty(&self) -> bool {
        !(self.min_x.is_finite() && self.max_x.is_finite())
    }
}

/// Renders the canvas as a standalone SVG document cropped to its content.
pub fn render_svg(canvas: &Canvas, theme: &Theme, render: &RenderConfig) -> String {
    let frame = Frame::new(canvas, render);
    let mut bounds = Bounds::empty();
    let mut body = String::new();

    for bar in &canvas.bars {
        let x0 = frame.x(bar.x0.min(bar.x1));
        let x1 = frame.x(bar.x0.max(bar.x1));
        let y_top = frame.y(bar.y0.max(bar.y1));
        let y_bottom = frame.y(bar.y0.min(bar.y1));
        bounds.include(x0, y_top);
        bounds.include(x1, y_bottom);
        body.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
            x0,
            y_top,
            x1 - x0,
            y_bottom - y_top,
            bar.color.to_hex()
        ));
    }

    for strip in &canvas.strips {
        let mut points: Vec<(f32, f32)> = strip
            .xs
            .iter()
            .zip(&strip.upper)
            .map(|(x, y)| (frame.x(*x), frame.y(*y)))
            .collect();
        points.extend(
            strip
                .xs
                .iter()
                .zip(&strip.lower)
                .rev()
                .map(|(x, y)| (frame.x(*x), frame.y(*y))),
        );
        for (x, y) in &points {
            bounds.include(*x, *y);
        }
        body.push_str(&format!(
            "<path d=\"{} Z\" fill=\"{}\" fill-opacity=\"{:.3}\" stroke=\"none\"/>",
            points_to_path(&points),
            strip.color.to_hex(),
            strip.alpha
        ));
    }

    for label in &canvas.labels {
        body.push_str(&text_svg(label, &frame, theme, &mut bounds));
    }

    let fig_w = render.width * POINTS_PER_INCH;
    let fig_h = render.height * POINTS_PER_INCH;
    let (vx, vy, vw, vh) = if bounds.is_empty() {
        (0.0, 0.0, fig_w, fig_h)
    } else {
        let pad = render.pad_inches * POINTS_PER_INCH;
        (
            bounds.min_x - pad,
            bounds.min_y - pad,
            bounds.max_x - bounds.min_x + 2.0 * pad,
            bounds.max_y - bounds.min_y + 2.0 * pad,
        )
    };

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{vw:.2}\" height=\"{vh:.2}\" viewBox=\"{vx:.2} {vy:.2} {vw:.2} {vh:.2}\">",
    ));
    svg.push_str(&format!(
        "<rect x=\"{vx:.2}\" y=\"{vy:.2}\" width=\"{vw:.2}\" height=\"{vh:.2}\" fill=\"{}\"/>",
        theme.background
    ));
    svg.push_str(&body);
    svg.push_str("</svg>");
    svg
}

fn text_svg(label: &TextLabel, frame: &Frame, theme: &Theme, bounds: &mut Bounds) -> String {
    let x = frame.x(label.x);
    let y = frame.y(label.y);
    let width = text_width_or_estimate(&label.text, label.font_size, &theme.font_family);
    let height = label.font_size * LINE_HEIGHT;

    let (anchor, left) = match label.h_align {
        HAlign::Left => ("start", x),
        HAlign::Right => ("end", x - width),
    };
    let (baseline, top) = match label.v_align {
        VAlign::Center => ("central", y - height / 2.0),
        VAlign::Top => ("hanging", y),
    };
    bounds.include(left, top);
    bounds.include(left + width, top + height);

    format!(
        "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{anchor}\" dominant-baseline=\"{baseline}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        escape_xml(&theme.font_family),
        label.font_size,
        theme.text_color,
        escape_xml(&label.text)
    )
}

fn points_to_path(points: &[(f32, f32)]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].0, points[0].1));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.0, point.1));
    }
    d
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

/// Rasterizes the SVG at `render.dpi` and writes a PNG.
#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme.primary_family().to_string();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|err| PlotError::Export(err.to_string()))?;
    let scale = render.dpi / POINTS_PER_INCH;
    let size = tree.size();
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PlotError::Export(format!("cannot allocate {width}x{height} pixmap")))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap
        .save_png(output)
        .map_err(|err| PlotError::Export(err.to_string()))?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, output: &Path, _render: &RenderConfig, _theme: &Theme) -> Result<()> {
    Err(PlotError::Export(format!(
        "cannot write {}: built without PNG support",
        output.display()
    )))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
