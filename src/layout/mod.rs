mod bar;
mod strip;

pub use bar::{BarGeometry, create_bar, stack_tops};
pub use strip::{Curve, create_strips, get_points};

use crate::config::PlotConfig;
use crate::error::Result;
use crate::ir::{Dataset, Side};
use crate::palette::{Rgb, assign_colors};

/// Thickness of each stacked bar, in data units.
pub const BAR_WIDTH: f32 = 0.02;
/// Gap between a bar edge and its label.
pub const TEXT_MARGIN: f32 = 0.05;
/// Horizontal distance between the left and the right bar.
pub const GRAPH_WIDTH: f32 = 4.0;
/// Nominal label width reserved on each side of the chart.
pub const TEXT_WIDTH: f32 = 1.5;
/// Where the column title hangs from, below the first segment.
pub const AXIS_TITLE_Y: f32 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Center,
    Top,
}

/// A filled rectangle spanning `x0..x1` and `y0..y1` in data units.
#[derive(Debug, Clone)]
pub struct BarSegment {
    pub side: Side,
    pub label: String,
    pub x0: f32,
    pub x1: f32,
    pub y0: f32,
    pub y1: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone)]
pub struct TextLabel {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub font_size: f32,
}

/// Translucent band between `lower` and `upper`, both sampled at `xs`.
#[derive(Debug, Clone)]
pub struct Strip {
    pub label: String,
    pub xs: Vec<f32>,
    pub lower: Vec<f32>,
    pub upper: Vec<f32>,
    pub color: Rgb,
    pub alpha: f32,
}

/// Everything drawn for one plot, in data coordinates with y pointing up.
///
/// Bars, strips and labels keep their insertion order; the renderer paints
/// bars first, strips over them, and text last.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    pub bars: Vec<BarSegment>,
    pub strips: Vec<Strip>,
    pub labels: Vec<TextLabel>,
    pub left_tops: Vec<f32>,
    pub right_tops: Vec<f32>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill_rect(&mut self, segment: BarSegment) {
        self.bars.push(segment);
    }

    pub fn fill_between(&mut self, strip: Strip) {
        self.strips.push(strip);
    }

    pub fn text(&mut self, label: TextLabel) {
        self.labels.push(label);
    }

    /// Vertical extent of the filled geometry. Text does not count, so titles
    /// hanging below the origin stay outside the autoscaled range.
    pub fn y_extent(&self) -> Option<(f32, f32)> {
        let bar_ys = self.bars.iter().flat_map(|bar| [bar.y0, bar.y1]);
        let strip_ys = self
            .strips
            .iter()
            .flat_map(|strip| strip.lower.iter().chain(strip.upper.iter()).copied());
        bar_ys.chain(strip_ys).fold(None, |acc, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
    }
}

/// Lays out the whole plot: colors, left bar, right bar, then the strips.
pub fn build_plot(dataset: &Dataset, config: &PlotConfig) -> Result<Canvas> {
    let labels = dataset.labels();
    let colors = assign_colors(&labels, config)?;
    let mut canvas = Canvas::new();

    let left_tops = create_bar(&mut canvas, Side::Left, dataset, &colors, config);
    let right_tops = create_bar(&mut canvas, Side::Right, dataset, &colors, config);
    create_strips(&mut canvas, &labels, &left_tops, &right_tops, &colors, config);

    log::debug!(
        "laid out {} categories: left tops {:?}, right tops {:?}",
        dataset.len(),
        left_tops,
        right_tops
    );
    canvas.left_tops = left_tops;
    canvas.right_tops = right_tops;
    Ok(canvas)
}
