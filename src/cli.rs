use crate::config::{Config, CurveMode, load_config, parse_color_list};
use crate::export_image;
use crate::layout::build_plot;
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_csv;
use crate::render::{render_svg, write_output_png, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "propplot", version, about = "Proportion plot renderer")]
pub struct Args {
    /// Input CSV (label, left value, right value) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config file (JSON or JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Palette name (hls, deep, muted, pastel, bright, dark, colorblind, tab10, Teamwork)
    #[arg(short = 'p', long = "palette")]
    pub palette: Option<String>,

    /// Comma-separated colors in category order, e.g. "#ff0000,#00ff00"
    #[arg(long = "colors")]
    pub colors: Option<String>,

    /// Vertical gap between stacked categories
    #[arg(long = "verticalSpace")]
    pub vertical_space: Option<f32>,

    /// Label font size in points
    #[arg(long = "fontSize")]
    pub font_size: Option<f32>,

    /// Strip opacity between 0 and 1
    #[arg(long = "alpha")]
    pub alpha: Option<f32>,

    /// Hide category labels
    #[arg(long = "noText")]
    pub no_text: bool,

    /// Draw labels inside widened color blocks
    #[arg(long = "textInside")]
    pub text_inside: bool,

    /// Draw the column names under each bar
    #[arg(long = "axisTitle")]
    pub axis_title: bool,

    /// Strip curve
    #[arg(short = 'm', long = "mode", value_enum)]
    pub mode: Option<ModeArg>,

    /// PNG resolution
    #[arg(long = "dpi")]
    pub dpi: Option<f32>,

    /// Write the computed layout as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ModeArg {
    Linear,
    Sigmoid,
    Smooth,
}

impl From<ModeArg> for CurveMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Linear => CurveMode::Linear,
            ModeArg::Sigmoid => CurveMode::Sigmoid,
            ModeArg::Smooth => CurveMode::Smooth,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    apply_args(&mut config, &args)?;

    let input = read_input(args.input.as_deref())?;
    let dataset = parse_csv(&input)?;
    let canvas = build_plot(&dataset, &config.plot)?;
    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &canvas, &dataset)?;
    }

    let svg = render_svg(&canvas, &config.theme, &config.render);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, &config.render, &config.theme)?;
        }
    }
    export_image(&svg, &config)?;
    Ok(())
}

/// Command-line flags override the config file.
fn apply_args(config: &mut Config, args: &Args) -> Result<()> {
    let plot = &mut config.plot;
    if let Some(palette) = &args.palette {
        plot.color_palette = palette.clone();
    }
    if let Some(colors) = &args.colors {
        let list = colors.split(',').map(str::trim).filter(|c| !c.is_empty());
        plot.color_dict = Some(parse_color_list(list)?);
    }
    if let Some(v) = args.vertical_space {
        plot.vertical_space = v;
    }
    if let Some(v) = args.font_size {
        plot.fontsize = v;
    }
    if let Some(v) = args.alpha {
        plot.alpha = v.clamp(0.0, 1.0);
    }
    if args.no_text {
        plot.with_text = false;
    }
    if args.text_inside {
        plot.text_inside = true;
    }
    if args.axis_title {
        plot.with_axis_title = true;
    }
    if let Some(mode) = args.mode {
        plot.mode = mode.into();
    }
    if let Some(dpi) = args.dpi {
        config.render.dpi = dpi;
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Rgb;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("propplot").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_config() {
        let args = parse(&[
            "--palette",
            "Teamwork",
            "--colors",
            "#ff0000, #0000ff",
            "--verticalSpace",
            "2",
            "--alpha",
            "1.5",
            "--noText",
            "--axisTitle",
            "-m",
            "linear",
            "--dpi",
            "300",
        ]);
        let mut config = Config::default();
        apply_args(&mut config, &args).unwrap();
        assert_eq!(config.plot.color_palette, "Teamwork");
        assert_eq!(
            config.plot.color_dict,
            Some(vec![Rgb::new(1.0, 0.0, 0.0), Rgb::new(0.0, 0.0, 1.0)])
        );
        assert_eq!(config.plot.vertical_space, 2.0);
        assert_eq!(config.plot.alpha, 1.0);
        assert!(!config.plot.with_text);
        assert!(config.plot.with_axis_title);
        assert_eq!(config.plot.mode, CurveMode::Linear);
        assert_eq!(config.render.dpi, 300.0);
    }

    #[test]
    fn no_flags_keep_config() {
        let args = parse(&[]);
        let mut config = Config::default();
        apply_args(&mut config, &args).unwrap();
        assert_eq!(config.plot.mode, CurveMode::Smooth);
        assert!(config.plot.with_text);
        assert!(config.plot.color_dict.is_none());
    }

    #[test]
    fn bad_color_flag_fails() {
        let args = parse(&["--colors", "#ff0000,teal"]);
        let mut config = Config::default();
        assert!(apply_args(&mut config, &args).is_err());
    }

    #[test]
    fn png_needs_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        let path = ensure_output(&Some(PathBuf::from("out.png")), "png").unwrap();
        assert_eq!(path, PathBuf::from("out.png"));
    }
}
