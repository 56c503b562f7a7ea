use crate::error::{PlotError, Result};
use crate::palette::{DEFAULT_PALETTE, Rgb};
use crate::theme::Theme;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// How the band between a left and a right segment is curved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveMode {
    Linear,
    Sigmoid,
    #[default]
    Smooth,
}

impl CurveMode {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "linear" => Some(Self::Linear),
            "sigmoid" => Some(Self::Sigmoid),
            "smooth" => Some(Self::Smooth),
            _ => None,
        }
    }
}

/// Options fixed for one plot.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub color_palette: String,
    /// Explicit colors in category order; overrides `color_palette`.
    pub color_dict: Option<Vec<Rgb>>,
    pub vertical_space: f32,
    pub fontsize: f32,
    pub alpha: f32,
    pub with_text: bool,
    pub text_inside: bool,
    /// Only drawn when `with_text` is set.
    pub with_axis_title: bool,
    pub mode: CurveMode,
    pub image_filename: Option<PathBuf>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            color_palette: DEFAULT_PALETTE.to_string(),
            color_dict: None,
            vertical_space: 1.0,
            fontsize: 9.0,
            alpha: 0.65,
            with_text: true,
            text_inside: false,
            with_axis_title: false,
            mode: CurveMode::Smooth,
            image_filename: None,
        }
    }
}

/// Figure geometry, in inches, and export resolution.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub dpi: f32,
    /// Padding around the tight bounding box.
    pub pad_inches: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 6.0,
            dpi: 150.0,
            pad_inches: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub plot: PlotConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    text_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct FigureConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    dpi: Option<f32>,
    pad_inches: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    color_palette: Option<String>,
    color_dict: Option<Vec<String>>,
    vertical_space: Option<f32>,
    fontsize: Option<f32>,
    alpha: Option<f32>,
    with_text: Option<bool>,
    text_inside: Option<bool>,
    with_axis_title: Option<bool>,
    mode: Option<String>,
    image_filename: Option<PathBuf>,
    figure: Option<FigureConfigFile>,
}

/// Loads a JSON5 config file over the defaults. No path means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    log::debug!("loaded config from {}", path.display());
    parse_config(&contents)
}

/// Parses config text (JSON or JSON5); every key is optional.
pub fn parse_config(contents: &str) -> Result<Config> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = match theme_name {
            "modern" => Theme::modern(),
            "classic" | "default" => Theme::classic(),
            other => return Err(PlotError::Config(format!("unknown theme: {other}"))),
        };
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = Rgb::parse(&v)?.to_hex();
        }
        if let Some(v) = vars.background {
            config.theme.background = Rgb::parse(&v)?.to_hex();
        }
    }

    if let Some(v) = parsed.color_palette {
        config.plot.color_palette = v;
    }
    if let Some(v) = parsed.color_dict {
        config.plot.color_dict = Some(parse_color_list(v.iter().map(String::as_str))?);
    }
    if let Some(v) = parsed.vertical_space {
        config.plot.vertical_space = v;
    }
    if let Some(v) = parsed.fontsize {
        config.plot.fontsize = v;
    }
    if let Some(v) = parsed.alpha {
        config.plot.alpha = v.clamp(0.0, 1.0);
    }
    if let Some(v) = parsed.with_text {
        config.plot.with_text = v;
    }
    if let Some(v) = parsed.text_inside {
        config.plot.text_inside = v;
    }
    if let Some(v) = parsed.with_axis_title {
        config.plot.with_axis_title = v;
    }
    if let Some(v) = parsed.mode {
        config.plot.mode = CurveMode::from_token(&v)
            .ok_or_else(|| PlotError::Config(format!("unknown curve mode: {v}")))?;
    }
    if parsed.image_filename.is_some() {
        config.plot.image_filename = parsed.image_filename;
    }

    if let Some(figure) = parsed.figure {
        if let Some(v) = figure.width {
            config.render.width = v;
        }
        if let Some(v) = figure.height {
            config.render.height = v;
        }
        if let Some(v) = figure.dpi {
            config.render.dpi = v;
        }
        if let Some(v) = figure.pad_inches {
            config.render.pad_inches = v;
        }
    }

    Ok(config)
}

pub fn parse_color_list<'a>(colors: impl IntoIterator<Item = &'a str>) -> Result<Vec<Rgb>> {
    colors.into_iter().map(Rgb::parse).collect()
}
