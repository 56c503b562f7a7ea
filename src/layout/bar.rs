use crate::config::PlotConfig;
use crate::ir::{Dataset, Side};
use crate::palette::ColorMap;

use super::{
    AXIS_TITLE_Y, BAR_WIDTH, BarSegment, Canvas, GRAPH_WIDTH, HAlign, TEXT_MARGIN, TEXT_WIDTH,
    TextLabel, VAlign,
};

/// Horizontal placement of one side's bar and labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub x0: f32,
    pub x1: f32,
    pub text_x: f32,
    pub h_align: HAlign,
}

impl BarGeometry {
    /// Labels read away from the plot: right-aligned left of the left bar,
    /// left-aligned right of the right bar.
    pub fn for_side(side: Side) -> Self {
        match side {
            Side::Left => Self {
                x0: -BAR_WIDTH,
                x1: 0.0,
                text_x: -TEXT_MARGIN,
                h_align: HAlign::Right,
            },
            Side::Right => Self {
                x0: GRAPH_WIDTH,
                x1: GRAPH_WIDTH + BAR_WIDTH,
                text_x: GRAPH_WIDTH + TEXT_MARGIN,
                h_align: HAlign::Left,
            },
        }
    }

    /// Stretches the outer edge so the label sits inside the colored block.
    pub fn with_text_inside(mut self, side: Side) -> Self {
        match side {
            Side::Left => self.x0 = -(TEXT_WIDTH + 2.0 * TEXT_MARGIN),
            Side::Right => self.x1 = GRAPH_WIDTH + TEXT_WIDTH + 2.0 * TEXT_MARGIN,
        }
        self
    }
}

/// Fence-post offsets of stacked segments: `tops[0] = 0` and each segment
/// adds its value plus `gap`. Returns `values.len() + 1` entries.
pub fn stack_tops(values: &[f32], gap: f32) -> Vec<f32> {
    let mut tops = Vec::with_capacity(values.len() + 1);
    tops.push(0.0);
    for (idx, value) in values.iter().enumerate() {
        tops.push(tops[idx] + value + gap);
    }
    tops
}

/// Draws one side's stacked bar, its labels and optional column title.
pub fn create_bar(
    canvas: &mut Canvas,
    side: Side,
    dataset: &Dataset,
    colors: &ColorMap,
    config: &PlotConfig,
) -> Vec<f32> {
    let mut geometry = BarGeometry::for_side(side);
    let values = dataset.values(side);
    let tops = stack_tops(&values, config.vertical_space);

    if config.with_text {
        for (idx, category) in dataset.categories.iter().enumerate() {
            canvas.text(TextLabel {
                text: category.label.clone(),
                x: geometry.text_x,
                y: tops[idx] + values[idx] / 2.0,
                h_align: geometry.h_align,
                v_align: VAlign::Center,
                font_size: config.fontsize,
            });
        }
    }

    if config.text_inside {
        geometry = geometry.with_text_inside(side);
    }
    for (idx, category) in dataset.categories.iter().enumerate() {
        canvas.fill_rect(BarSegment {
            side,
            label: category.label.clone(),
            x0: geometry.x0,
            x1: geometry.x1,
            y0: tops[idx],
            y1: tops[idx] + values[idx],
            // every label went through assign_colors
            color: colors.get(&category.label).unwrap_or_default(),
        });
    }

    if config.with_text && config.with_axis_title {
        canvas.text(TextLabel {
            text: dataset.title(side).to_string(),
            x: geometry.text_x,
            y: AXIS_TITLE_Y,
            h_align: geometry.h_align,
            v_align: VAlign::Top,
            font_size: config.fontsize,
        });
    }

    tops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::assign_colors;

    fn draw(side: Side, config: &PlotConfig) -> (Canvas, Vec<f32>) {
        let mut data = Dataset::new("2019", "2024");
        data.push("A", 10.0, 5.0);
        data.push("B", 5.0, 10.0);
        let colors = assign_colors(&data.labels(), config).unwrap();
        let mut canvas = Canvas::new();
        let tops = create_bar(&mut canvas, side, &data, &colors, config);
        (canvas, tops)
    }

    #[test]
    fn tops_are_fence_posts() {
        let values = [3.0, 0.0, 7.5, 1.0];
        let tops = stack_tops(&values, 0.5);
        assert_eq!(tops.len(), values.len() + 1);
        assert_eq!(tops[0], 0.0);
        for (idx, value) in values.iter().enumerate() {
            assert_eq!(tops[idx + 1], tops[idx] + value + 0.5);
            assert!(tops[idx + 1] >= tops[idx]);
        }
        let total: f32 = values.iter().sum();
        assert_eq!(tops[values.len()], total + values.len() as f32 * 0.5);
    }

    #[test]
    fn left_and_right_tops_use_their_own_column() {
        let config = PlotConfig::default();
        let (_, left) = draw(Side::Left, &config);
        let (_, right) = draw(Side::Right, &config);
        assert_eq!(left, vec![0.0, 11.0, 17.0]);
        assert_eq!(right, vec![0.0, 6.0, 17.0]);
    }

    #[test]
    fn labels_sit_at_segment_midpoints() {
        let (canvas, _) = draw(Side::Left, &PlotConfig::default());
        assert_eq!(canvas.labels.len(), 2);
        assert_eq!(canvas.labels[0].y, 5.0);
        assert_eq!(canvas.labels[1].y, 13.5);
        assert_eq!(canvas.labels[0].x, -TEXT_MARGIN);
        assert_eq!(canvas.labels[0].h_align, HAlign::Right);

        let (canvas, _) = draw(Side::Right, &PlotConfig::default());
        assert_eq!(canvas.labels[0].h_align, HAlign::Left);
        assert_eq!(canvas.labels[0].x, GRAPH_WIDTH + TEXT_MARGIN);
    }

    #[test]
    fn segments_span_their_value() {
        let (canvas, _) = draw(Side::Right, &PlotConfig::default());
        let b = &canvas.bars[1];
        assert_eq!((b.y0, b.y1), (6.0, 16.0));
        assert_eq!((b.x0, b.x1), (GRAPH_WIDTH, GRAPH_WIDTH + BAR_WIDTH));
    }

    #[test]
    fn text_inside_widens_outer_edge() {
        let config = PlotConfig {
            text_inside: true,
            ..PlotConfig::default()
        };
        let (canvas, _) = draw(Side::Left, &config);
        assert_eq!(canvas.bars[0].x0, -(TEXT_WIDTH + 2.0 * TEXT_MARGIN));
        assert_eq!(canvas.bars[0].x1, 0.0);
        // labels keep their anchor
        assert_eq!(canvas.labels[0].x, -TEXT_MARGIN);

        let (canvas, _) = draw(Side::Right, &config);
        assert_eq!(canvas.bars[0].x0, GRAPH_WIDTH);
        assert_eq!(canvas.bars[0].x1, GRAPH_WIDTH + TEXT_WIDTH + 2.0 * TEXT_MARGIN);
    }

    #[test]
    fn axis_title_needs_text() {
        let config = PlotConfig {
            with_axis_title: true,
            ..PlotConfig::default()
        };
        let (canvas, _) = draw(Side::Right, &config);
        let title = canvas.labels.last().unwrap();
        assert_eq!(title.text, "2024");
        assert_eq!(title.y, AXIS_TITLE_Y);
        assert_eq!(title.v_align, VAlign::Top);

        let config = PlotConfig {
            with_text: false,
            with_axis_title: true,
            ..PlotConfig::default()
        };
        let (canvas, _) = draw(Side::Right, &config);
        assert!(canvas.labels.is_empty());
        assert_eq!(canvas.bars.len(), 2);
    }
}
