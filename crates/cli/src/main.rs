#![deny(unsafe_code)]
//! CLI host for showfields.
//!
//! Subcommands:
//! - `grid`: print the sample grid derived for an area
//! - `sample`: sample a charge field once, write the indicator frame as JSON
//!   and optionally SVG
//! - `schema`: print the sampler parameter schema

mod error;
mod svg;

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use error::CliError;
use showfields_core::{
    ChargeField, FieldSampler, LineBuffer, LineRenderer, RecordingSink, RefreshOutcome,
    SampleGrid, SamplerConfig, Size, Srgb, StaticScene, StrokeStyle, ViewTransform,
};
use svg::SvgSink;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "showfields", about = "Vector field indicator sampler")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the sample grid for an area.
    Grid {
        /// Area width in simulation units.
        #[arg(short = 'W', long, default_value_t = 1600.0)]
        width: f64,

        /// Area height in simulation units.
        #[arg(short = 'H', long, default_value_t = 900.0)]
        height: f64,

        /// Indicators along the area height.
        #[arg(short, long, default_value_t = 36)]
        vertical: usize,
    },
    /// Sample a charge field once and write the indicator lines.
    Sample {
        /// Area width in simulation units.
        #[arg(short = 'W', long, default_value_t = 1600.0)]
        width: f64,

        /// Area height in simulation units.
        #[arg(short = 'H', long, default_value_t = 900.0)]
        height: f64,

        /// View width; with --view-height, fits the area into the view.
        #[arg(long, requires = "view_height")]
        view_width: Option<f64>,

        /// View height; with --view-width, fits the area into the view.
        #[arg(long, requires = "view_width")]
        view_height: Option<f64>,

        /// Sampler parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Charge field as a JSON string: {"charges": [...], "uniform": {...}}.
        #[arg(long, default_value = "{}")]
        field: String,

        /// Stroke color as #rrggbb.
        #[arg(long, default_value = "#00ffff")]
        color: String,

        /// Stroke width in view units.
        #[arg(long, default_value_t = 1.0)]
        line_width: f64,

        /// Write the frame JSON here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the frame as an SVG document.
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Print the sampler parameter schema.
    Schema,
}

/// Initialize logging to stderr.
///
/// `RUST_LOG` overrides the default filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,showfields_core=info,showfields=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Grid {
            width,
            height,
            vertical,
        } => {
            let grid = SampleGrid::new(Size::new(width, height), vertical)?;
            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "vertical_count": grid.vertical_count(),
                    "horizontal_count": grid.horizontal_count(),
                    "spacing": grid.spacing(),
                    "sample_count": grid.sample_count(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "{} x {} grid, spacing {}, {} samples",
                    grid.horizontal_count(),
                    grid.vertical_count(),
                    grid.spacing(),
                    grid.sample_count()
                );
            }
        }
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&SamplerConfig::schema())?);
        }
        Command::Sample {
            width,
            height,
            view_width,
            view_height,
            params,
            field,
            color,
            line_width,
            output,
            svg,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let field: ChargeField = serde_json::from_str(&field)
                .map_err(|e| CliError::Input(format!("invalid --field JSON: {e}")))?;
            let style = StrokeStyle {
                color: Srgb::from_hex(&color)?,
                width: line_width,
            };

            let area = Size::new(width, height);
            let (view, viewport) = match (view_width, view_height) {
                (Some(w), Some(h)) => {
                    let viewport = Size::new(w, h);
                    (ViewTransform::aspect_fit(area, viewport)?, viewport)
                }
                _ => (ViewTransform::identity(), area),
            };

            let scene = Rc::new(StaticScene::with_view(area, field, view));
            let buffer = Rc::new(RefCell::new(LineBuffer::with_style(
                RecordingSink::new(),
                style,
            )));
            let mut sampler = FieldSampler::from_json(&params)?.with_renderer(&buffer);
            sampler.bind(&scene)?;

            let outcome = sampler.refresh();
            let RefreshOutcome::Rendered { indicators } = outcome else {
                return Err(CliError::NoFrame(format!("{outcome:?}")));
            };
            info!(indicators, "frame sampled");

            let frame = buffer
                .borrow()
                .sink()
                .last_frame()
                .cloned()
                .ok_or_else(|| CliError::NoFrame("renderer recorded nothing".into()))?;

            if let Some(path) = &svg {
                let mut svg_buffer = LineBuffer::with_style(SvgSink::new(), frame.style);
                svg_buffer.set_paths(frame.paths.clone());
                svg_buffer.request_redraw();
                fs::write(
                    path,
                    svg_buffer.sink().document(viewport.width, viewport.height),
                )?;
            }

            let grid = sampler
                .grid()
                .ok_or_else(|| CliError::NoFrame("sampler lost its grid".into()))?;
            let report = serde_json::json!({
                "grid": {
                    "vertical_count": grid.vertical_count(),
                    "horizontal_count": grid.horizontal_count(),
                    "spacing": grid.spacing(),
                },
                "params": sampler.params(),
                "frame": frame,
            });
            let text = serde_json::to_string_pretty(&report)?;
            match &output {
                Some(path) => {
                    fs::write(path, text)?;
                    if !cli.json {
                        eprintln!(
                            "sampled {indicators} indicators ({width}x{height}) -> {}",
                            path.display()
                        );
                    }
                }
                None => println!("{text}"),
            }
        }
    }

    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
