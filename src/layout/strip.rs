use crate::config::{CurveMode, PlotConfig};
use crate::palette::ColorMap;

use super::{Canvas, GRAPH_WIDTH, Strip};

const SIGMOID_SAMPLES: usize = 150;
/// Logical x runs from -7.5 in steps of 0.1 across the strip.
const SIGMOID_STEP: f32 = 0.1;
const SMOOTH_SAMPLES: usize = 100;

/// A boundary curve sampled at `xs`, from `y1` at the left bar to `y2` at the
/// right bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub xs: Vec<f32>,
    pub ys: Vec<f32>,
}

/// Samples the connection between `y1` (left) and `y2` (right).
///
/// The x ticks depend only on `mode`, so the upper and lower curves of a strip
/// always line up point for point.
pub fn get_points(y1: f32, y2: f32, mode: CurveMode) -> Curve {
    match mode {
        CurveMode::Linear => Curve {
            xs: vec![0.0, GRAPH_WIDTH],
            ys: vec![y1, y2],
        },
        CurveMode::Sigmoid => {
            let half = SIGMOID_SAMPLES as f32 / 2.0;
            let ys = (0..SIGMOID_SAMPLES)
                .map(|k| {
                    let x = (k as f32 - half) * SIGMOID_STEP;
                    let weight = 1.0 / (1.0 + (-x).exp());
                    y1 + weight * (y2 - y1)
                })
                .collect();
            Curve {
                xs: ticks(SIGMOID_SAMPLES),
                ys,
            }
        }
        CurveMode::Smooth => {
            let delta = y2 - y1;
            let ys = (0..SMOOTH_SAMPLES)
                .map(|k| {
                    let t = k as f32 / SMOOTH_SAMPLES as f32;
                    y1 + (-2.0 * delta * t.powi(3) + 3.0 * delta * t.powi(2))
                })
                .collect();
            Curve {
                xs: ticks(SMOOTH_SAMPLES),
                ys,
            }
        }
    }
}

/// `count` evenly spaced ticks from 0 to `GRAPH_WIDTH`, both ends included.
fn ticks(count: usize) -> Vec<f32> {
    if count < 2 {
        return vec![0.0; count];
    }
    let last = (count - 1) as f32;
    (0..count)
        .map(|idx| idx as f32 / last * GRAPH_WIDTH)
        .collect()
}

/// Adds one band per category between its left and right bar segments.
pub fn create_strips(
    canvas: &mut Canvas,
    labels: &[&str],
    left_tops: &[f32],
    right_tops: &[f32],
    colors: &ColorMap,
    config: &PlotConfig,
) {
    let gap = config.vertical_space;
    for (idx, label) in labels.iter().enumerate() {
        let lower = get_points(left_tops[idx], right_tops[idx], config.mode);
        let upper = get_points(left_tops[idx + 1] - gap, right_tops[idx + 1] - gap, config.mode);
        canvas.fill_between(Strip {
            label: label.to_string(),
            xs: lower.xs,
            lower: lower.ys,
            upper: upper.ys,
            color: colors.get(label).unwrap_or_default(),
            alpha: config.alpha,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::stack_tops;
    use crate::palette::assign_colors;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn linear_is_two_endpoints() {
        let curve = get_points(3.0, 8.0, CurveMode::Linear);
        assert_eq!(curve.xs, vec![0.0, GRAPH_WIDTH]);
        assert_eq!(curve.ys, vec![3.0, 8.0]);
    }

    #[test]
    fn smooth_starts_at_y1_and_heads_for_y2() {
        let curve = get_points(2.0, 12.0, CurveMode::Smooth);
        assert_eq!(curve.xs.len(), 100);
        assert_eq!(curve.ys.len(), 100);
        assert_eq!(curve.ys[0], 2.0);
        assert_eq!(curve.xs[0], 0.0);
        assert!(approx(curve.xs[99], GRAPH_WIDTH));
        // t = 0.99 is the last sample
        let t: f32 = 0.99;
        let expected = 2.0 + 10.0 * (-2.0 * t.powi(3) + 3.0 * t.powi(2));
        assert!(approx(curve.ys[99], expected));
        assert!((curve.ys[99] - 12.0).abs() < 0.01);
        assert!(curve.ys.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn smooth_uses_the_delta_offset_form() {
        let curve = get_points(5.0, 1.0, CurveMode::Smooth);
        let t: f32 = 0.5;
        let delta = -4.0;
        let expected = 5.0 + (-2.0 * delta * t.powi(3) + 3.0 * delta * t.powi(2));
        assert!(approx(curve.ys[50], expected));
        assert!(approx(curve.ys[50], 3.0));
    }

    #[test]
    fn sigmoid_is_centered_on_the_strip() {
        let curve = get_points(0.0, 10.0, CurveMode::Sigmoid);
        assert_eq!(curve.xs.len(), 150);
        assert_eq!(curve.ys.len(), 150);
        assert!(approx(curve.ys[75], 5.0));
        assert!(curve.ys[0] < 0.01);
        assert!(curve.ys[149] > 9.99);
        assert!(approx(curve.xs[149], GRAPH_WIDTH));
    }

    #[test]
    fn unchanged_values_give_flat_strips() {
        let config = PlotConfig::default();
        for mode in [CurveMode::Linear, CurveMode::Sigmoid, CurveMode::Smooth] {
            let values = [4.0, 2.0, 7.0];
            let tops = stack_tops(&values, 1.0);
            let labels = ["a", "b", "c"];
            let colors = assign_colors(&labels, &config).unwrap();
            let mut canvas = Canvas::new();
            let config = PlotConfig {
                mode,
                ..config.clone()
            };
            create_strips(&mut canvas, &labels, &tops, &tops, &colors, &config);
            for (idx, strip) in canvas.strips.iter().enumerate() {
                assert!(strip.lower.iter().all(|y| *y == tops[idx]));
                assert!(strip.upper.iter().all(|y| *y == tops[idx + 1] - 1.0));
            }
        }
    }

    #[test]
    fn strips_connect_segment_intervals() {
        let config = PlotConfig {
            mode: CurveMode::Linear,
            ..PlotConfig::default()
        };
        let labels = ["A", "B"];
        let colors = assign_colors(&labels, &config).unwrap();
        let left = stack_tops(&[10.0, 5.0], 1.0);
        let right = stack_tops(&[5.0, 10.0], 1.0);
        let mut canvas = Canvas::new();
        create_strips(&mut canvas, &labels, &left, &right, &colors, &config);

        let a = &canvas.strips[0];
        assert_eq!(a.lower, vec![0.0, 0.0]);
        assert_eq!(a.upper, vec![10.0, 5.0]);
        let b = &canvas.strips[1];
        assert_eq!(b.lower, vec![11.0, 6.0]);
        assert_eq!(b.upper, vec![16.0, 16.0]);
        assert_eq!(b.alpha, 0.65);
    }
}
