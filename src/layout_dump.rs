use crate::error::Result;
use crate::ir::{Dataset, Side};
use crate::layout::Canvas;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub left_title: String,
    pub right_title: String,
    pub left_tops: Vec<f32>,
    pub right_tops: Vec<f32>,
    pub bars: Vec<BarDump>,
    pub strips: Vec<StripDump>,
    pub labels: Vec<LabelDump>,
}

#[derive(Debug, Serialize)]
pub struct BarDump {
    pub label: String,
    pub side: Side,
    pub x: [f32; 2],
    pub y: [f32; 2],
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct StripDump {
    pub label: String,
    pub color: String,
    pub alpha: f32,
    pub samples: usize,
    /// (lower, upper) at the left bar.
    pub start: [f32; 2],
    /// (lower, upper) at the right bar.
    pub end: [f32; 2],
    pub points: Vec<[f32; 3]>,
}

#[derive(Debug, Serialize)]
pub struct LabelDump {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub anchor: String,
}

impl LayoutDump {
    pub fn from_canvas(canvas: &Canvas, dataset: &Dataset) -> Self {
        let bars = canvas
            .bars
            .iter()
            .map(|bar| BarDump {
                label: bar.label.clone(),
                side: bar.side,
                x: [bar.x0, bar.x1],
                y: [bar.y0, bar.y1],
                color: bar.color.to_hex(),
            })
            .collect();
        let strips = canvas
            .strips
            .iter()
            .map(|strip| {
                let first = |ys: &[f32]| ys.first().copied().unwrap_or_default();
                let last = |ys: &[f32]| ys.last().copied().unwrap_or_default();
                StripDump {
                    label: strip.label.clone(),
                    color: strip.color.to_hex(),
                    alpha: strip.alpha,
                    samples: strip.xs.len(),
                    start: [first(&strip.lower), first(&strip.upper)],
                    end: [last(&strip.lower), last(&strip.upper)],
                    points: strip
                        .xs
                        .iter()
                        .zip(strip.lower.iter().zip(&strip.upper))
                        .map(|(x, (lo, hi))| [*x, *lo, *hi])
                        .collect(),
                }
            })
            .collect();
        let labels = canvas
            .labels
            .iter()
            .map(|label| LabelDump {
                text: label.text.clone(),
                x: label.x,
                y: label.y,
                anchor: format!("{:?}-{:?}", label.h_align, label.v_align).to_lowercase(),
            })
            .collect();
        Self {
            left_title: dataset.left_title.clone(),
            right_title: dataset.right_title.clone(),
            left_tops: canvas.left_tops.clone(),
            right_tops: canvas.right_tops.clone(),
            bars,
            strips,
            labels,
        }
    }
}

pub fn write_layout_dump(path: &Path, canvas: &Canvas, dataset: &Dataset) -> Result<()> {
    let dump = LayoutDump::from_canvas(canvas, dataset);
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &dump)?;
    log::info!("wrote layout dump to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CurveMode, PlotConfig};
    use crate::layout::build_plot;

    #[test]
    fn dump_records_strip_endpoints() {
        let mut data = Dataset::new("l", "r");
        data.push("A", 10.0, 5.0);
        data.push("B", 5.0, 10.0);
        let config = PlotConfig {
            mode: CurveMode::Sigmoid,
            ..PlotConfig::default()
        };
        let canvas = build_plot(&data, &config).unwrap();
        let dump = LayoutDump::from_canvas(&canvas, &data);
        assert_eq!(dump.left_tops, vec![0.0, 11.0, 17.0]);
        assert_eq!(dump.strips[1].samples, 150);
        assert_eq!(dump.strips[1].points.len(), 150);
        assert!((dump.strips[1].start[0] - 11.0).abs() < 0.01);
        assert_eq!(dump.labels[0].anchor, "right-center");

        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["bars"][2]["side"], "right");
    }
}
