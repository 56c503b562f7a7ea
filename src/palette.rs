use crate::config::PlotConfig;
use crate::error::{PlotError, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

static HEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());
static RGB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$").unwrap()
});

/// Palette name that switches color assignment to the two-color gradient.
pub const GRADIENT_PALETTE: &str = "teamwork";
pub const DEFAULT_PALETTE: &str = "hls";

const GRADIENT_START: Rgb = Rgb::from_u8(5, 29, 73);
const GRADIENT_STOP: Rgb = Rgb::from_u8(0, 164, 227);

const DEEP: [&str; 10] = [
    "#4C72B0", "#DD8452", "#55A868", "#C44E52", "#8172B3", "#937860", "#DA8BC3", "#8C8C8C",
    "#CCB974", "#64B5CD",
];
const MUTED: [&str; 10] = [
    "#4878D0", "#EE854A", "#6ACC64", "#D65F5F", "#956CB4", "#8C613C", "#DC7EC0", "#797979",
    "#D5BB67", "#82C6E2",
];
const PASTEL: [&str; 10] = [
    "#A1C9F4", "#FFB482", "#8DE5A1", "#FF9F9B", "#D0BBFF", "#DEBB9B", "#FAB0E4", "#CFCFCF",
    "#FFFEA3", "#B9F2F0",
];
const BRIGHT: [&str; 10] = [
    "#023EFF", "#FF7C00", "#1AC938", "#E8000B", "#8B2BE2", "#9F4800", "#F14CC1", "#A3A3A3",
    "#FFC400", "#00D7FF",
];
const DARK: [&str; 10] = [
    "#001C7F", "#B1400D", "#12711C", "#8C0800", "#591E71", "#592F0D", "#A23582", "#3C3C3C",
    "#B8850A", "#006374",
];
const COLORBLIND: [&str; 10] = [
    "#0173B2", "#DE8F05", "#029E73", "#D55E00", "#CC78BC", "#CA9161", "#FBAFE4", "#949494",
    "#ECE133", "#56B4E9",
];
const TAB10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// An RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parses `#rgb`, `#rrggbb` or `rgb(r, g, b)` with 0-255 channels.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if let Some(caps) = HEX_RE.captures(trimmed) {
            let hex = &caps[1];
            let expanded: String = if hex.len() == 3 {
                hex.chars().flat_map(|ch| [ch, ch]).collect()
            } else {
                hex.to_string()
            };
            let channel = |idx: usize| u8::from_str_radix(&expanded[idx..idx + 2], 16);
            return match (channel(0), channel(2), channel(4)) {
                (Ok(r), Ok(g), Ok(b)) => Ok(Self::from_u8(r, g, b)),
                _ => Err(PlotError::InvalidColor(input.to_string())),
            };
        }
        if let Some(caps) = RGB_RE.captures(trimmed) {
            let channel = |idx: usize| caps[idx].parse::<u8>();
            return match (channel(1), channel(2), channel(3)) {
                (Ok(r), Ok(g), Ok(b)) => Ok(Self::from_u8(r, g, b)),
                _ => Err(PlotError::InvalidColor(input.to_string())),
            };
        }
        Err(PlotError::InvalidColor(input.to_string()))
    }

    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    /// Linear per-channel blend; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(&self, other: &Rgb, t: f32) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Label to color lookup, built once per plot.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    colors: HashMap<String, Rgb>,
}

impl ColorMap {
    pub fn get(&self, label: &str) -> Option<Rgb> {
        self.colors.get(label).copied()
    }

    fn insert(&mut self, label: &str, color: Rgb) {
        if self.colors.insert(label.to_string(), color).is_some() {
            warn!("duplicate category label {label:?}; later color wins");
        }
    }

    fn zip(labels: &[&str], colors: impl IntoIterator<Item = Rgb>) -> Self {
        let mut map = ColorMap::default();
        for (label, color) in labels.iter().zip(colors) {
            map.insert(label, color);
        }
        map
    }
}

/// Assigns one color per label.
///
/// An explicit `color_dict` wins over the palette name. The gradient palette
/// blends between two fixed blues; any other name selects a categorical
/// palette.
pub fn assign_colors(labels: &[&str], config: &PlotConfig) -> Result<ColorMap> {
    if let Some(colors) = &config.color_dict {
        debug!("using {} explicit colors", colors.len());
        if colors.len() < labels.len() {
            return Err(PlotError::ColorCountMismatch {
                colors: colors.len(),
                categories: labels.len(),
            });
        }
        return Ok(ColorMap::zip(labels, colors.iter().copied()));
    }
    if config.color_palette.eq_ignore_ascii_case(GRADIENT_PALETTE) {
        debug!("using gradient palette for {} labels", labels.len());
        let count = labels.len();
        let colors = (0..count)
            .map(|step| intermediate_color(&GRADIENT_START, &GRADIENT_STOP, step, count));
        return Ok(ColorMap::zip(labels, colors));
    }
    debug!("using palette {:?} for {} labels", config.color_palette, labels.len());
    let colors = categorical_palette(&config.color_palette, labels.len())?;
    Ok(ColorMap::zip(labels, colors))
}

/// Color `step` of `count` evenly spaced stops from `start` to `stop`.
/// A single stop is the start color.
pub fn intermediate_color(start: &Rgb, stop: &Rgb, step: usize, count: usize) -> Rgb {
    if count <= 1 {
        return *start;
    }
    start.lerp(stop, step as f32 / (count - 1) as f32)
}

/// `count` distinct colors from a named categorical palette.
pub fn categorical_palette(name: &str, count: usize) -> Result<Vec<Rgb>> {
    let fixed: &[&str] = match name.to_ascii_lowercase().as_str() {
        "hls" => return Ok(hls_palette(count, 0.01, 0.6, 0.65)),
        "husl" => {
            warn!("palette \"husl\" is drawn with hls colors");
            return Ok(hls_palette(count, 0.01, 0.6, 0.65));
        }
        "deep" => &DEEP,
        "muted" => &MUTED,
        "pastel" => &PASTEL,
        "bright" => &BRIGHT,
        "dark" => &DARK,
        "colorblind" => &COLORBLIND,
        "tab10" => &TAB10,
        _ => return Err(PlotError::UnknownPalette(name.to_string())),
    };
    fixed
        .iter()
        .cycle()
        .take(count)
        .map(|hex| Rgb::parse(hex))
        .collect()
}

/// Evenly spaced hues around the HLS circle, starting at hue `offset`.
pub fn hls_palette(count: usize, offset: f32, lightness: f32, saturation: f32) -> Vec<Rgb> {
    (0..count)
        .map(|idx| {
            let hue = (idx as f32 / count as f32 + offset).fract();
            hls_to_rgb(hue, lightness, saturation)
        })
        .collect()
}

fn hls_to_rgb(h: f32, l: f32, s: f32) -> Rgb {
    if s == 0.0 {
        return Rgb::new(l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    Rgb::new(
        hue_channel(m1, m2, h + 1.0 / 3.0),
        hue_channel(m1, m2, h),
        hue_channel(m1, m2, h - 1.0 / 3.0),
    )
}

fn hue_channel(m1: f32, m2: f32, hue: f32) -> f32 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgb, b: Rgb) -> bool {
        (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
    }

    fn config_with_palette(name: &str) -> PlotConfig {
        PlotConfig {
            color_palette: name.to_string(),
            ..PlotConfig::default()
        }
    }

    #[test]
    fn gradient_runs_from_start_to_stop() {
        let labels = ["a", "b", "c", "d"];
        let colors = assign_colors(&labels, &config_with_palette("Teamwork")).unwrap();
        assert!(close(colors.get("a").unwrap(), GRADIENT_START));
        assert!(close(colors.get("d").unwrap(), GRADIENT_STOP));
        let mid = colors.get("b").unwrap();
        assert!(mid.b > GRADIENT_START.b && mid.b < GRADIENT_STOP.b);
    }

    #[test]
    fn gradient_with_one_label_uses_start_color() {
        let colors = assign_colors(&["only"], &config_with_palette("teamwork")).unwrap();
        assert!(close(colors.get("only").unwrap(), GRADIENT_START));
    }

    #[test]
    fn explicit_colors_zip_by_position() {
        let config = PlotConfig {
            color_dict: Some(vec![Rgb::new(1.0, 0.0, 0.0), Rgb::new(0.0, 0.0, 1.0)]),
            ..PlotConfig::default()
        };
        let colors = assign_colors(&["x", "y"], &config).unwrap();
        assert_eq!(colors.get("x"), Some(Rgb::new(1.0, 0.0, 0.0)));
        assert_eq!(colors.get("y"), Some(Rgb::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn short_explicit_color_list_is_an_error() {
        let config = PlotConfig {
            color_dict: Some(vec![Rgb::new(1.0, 0.0, 0.0)]),
            ..PlotConfig::default()
        };
        let err = assign_colors(&["x", "y"], &config).unwrap_err();
        assert!(matches!(
            err,
            PlotError::ColorCountMismatch {
                colors: 1,
                categories: 2
            }
        ));
    }

    #[test]
    fn unknown_palette_is_an_error() {
        let err = assign_colors(&["x"], &config_with_palette("nope")).unwrap_err();
        assert!(matches!(err, PlotError::UnknownPalette(name) if name == "nope"));
    }

    #[test]
    fn duplicate_label_keeps_later_color() {
        let colors = assign_colors(&["A", "A"], &config_with_palette("tab10")).unwrap();
        assert_eq!(colors.get("A").unwrap().to_hex(), "#ff7f0e");
    }

    #[test]
    fn husl_falls_back_to_hls() {
        let husl = categorical_palette("husl", 4).unwrap();
        assert_eq!(husl, categorical_palette("hls", 4).unwrap());
    }

    #[test]
    fn hls_palette_gives_distinct_colors() {
        let colors = hls_palette(6, 0.01, 0.6, 0.65);
        assert_eq!(colors.len(), 6);
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert!(!close(*a, *b));
            }
        }
        // hue 0.01 is almost pure red at this lightness
        assert!(colors[0].r > colors[0].g && colors[0].r > colors[0].b);
    }

    #[test]
    fn fixed_palettes_cycle() {
        let colors = categorical_palette("tab10", 12).unwrap();
        assert_eq!(colors.len(), 12);
        assert_eq!(colors[10], colors[0]);
        assert_eq!(colors[0].to_hex(), "#1f77b4");
    }

    #[test]
    fn parses_color_strings() {
        assert_eq!(Rgb::parse("#fff").unwrap(), Rgb::new(1.0, 1.0, 1.0));
        assert_eq!(Rgb::parse("#00a4e3").unwrap().to_hex(), "#00a4e3");
        assert_eq!(Rgb::parse("rgb(5, 29, 73)").unwrap(), GRADIENT_START);
        assert!(Rgb::parse("blue").is_err());
        assert!(Rgb::parse("rgb(300, 0, 0)").is_err());
    }
}
