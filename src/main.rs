use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mosaic::models::{ImageStatus, MosaicConfig, MosaicResult};
use mosaic::rendering::{encode_png, render_preview, ColorSource};
use mosaic::services::{MosaicEngine, MosaicRequest};

#[derive(Parser)]
#[command(name = "mosaic")]
#[command(about = "Tile a plane with a grid and color each tile from an image")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the mosaic and print a summary
    Build {
        #[command(flatten)]
        params: BuildParams,

        /// Write the full per-cell report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Build the mosaic and write a flat PNG preview
    Render {
        #[command(flatten)]
        params: BuildParams,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Preview pixels per frame unit
        #[arg(long, default_value_t = 10.0)]
        scale: f64,

        /// Paint palette-matched colors instead of raw averages
        #[arg(long)]
        matched: bool,
    },
}

/// Build parameters; flags override values from `--config`.
#[derive(Args, Debug, Default)]
struct BuildParams {
    /// Source image
    image: Option<PathBuf>,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Number of columns
    #[arg(long)]
    columns: Option<usize>,

    /// Cell width in frame units
    #[arg(long)]
    width: Option<f64>,

    /// Cell height in frame units
    #[arg(long)]
    height: Option<f64>,

    /// Sampling precision (clamped to 1..=10)
    #[arg(long, allow_hyphen_values = true)]
    precision: Option<i64>,

    /// Number of palette colors to extract
    #[arg(long)]
    palette_size: Option<usize>,

    /// Fixed palette as comma-separated hex RGB (e.g. "#000000,#FFFFFF,#FF0000")
    #[arg(long)]
    colors: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Build { params, json }) => {
            init_logging();
            run_build_command(&params, json.as_deref())
        }
        Some(Commands::Render {
            params,
            output,
            scale,
            matched,
        }) => {
            init_logging();
            run_render_command(&params, &output, scale, matched)
        }
        None => {
            print!("{}", MosaicConfig::default().to_yaml_string()?);
            Ok(())
        }
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mosaic=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Merge the config file (if any) with command-line overrides.
fn resolve_config(params: &BuildParams) -> anyhow::Result<MosaicConfig> {
    let mut config = match &params.config {
        Some(path) => MosaicConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MosaicConfig::default(),
    };

    if let Some(image) = &params.image {
        config.image = image.clone();
    }
    if let Some(rows) = params.rows {
        config.rows = rows;
    }
    if let Some(columns) = params.columns {
        config.columns = columns;
    }
    if let Some(width) = params.width {
        config.width = width;
    }
    if let Some(height) = params.height {
        config.height = height;
    }
    if let Some(precision) = params.precision {
        config.precision = precision;
    }
    if let Some(palette_size) = params.palette_size {
        config.palette_size = palette_size;
    }
    if let Some(colors) = &params.colors {
        config.palette = Some(
            colors
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        );
    }

    Ok(config)
}

fn build(params: &BuildParams) -> anyhow::Result<MosaicResult> {
    let config = resolve_config(params)?;
    let engine = MosaicEngine::from_config(&config)?;
    let result = engine.build(&MosaicRequest::from_config(&config))?;
    Ok(result)
}

fn run_build_command(params: &BuildParams, json: Option<&Path>) -> anyhow::Result<()> {
    let result = build(params)?;

    println!(
        "Grid: {} columns x {} rows ({} cells)",
        result.columns(),
        result.rows(),
        result.cell_count()
    );
    match result.image_status() {
        ImageStatus::Loaded { width, height } => println!("Image: {width}x{height}"),
        ImageStatus::NotRequested => println!("Image: none"),
        ImageStatus::Unavailable { reason } => println!("Image: unavailable ({reason})"),
    }
    if let Some(interval) = result.interval() {
        println!(
            "Sampling: precision {}, interval {} px",
            result.precision(),
            interval
        );
    }
    let palette: Vec<String> = result.palette().iter().map(|c| c.to_hex()).collect();
    println!("Palette: [{}]", palette.join(", "));
    println!(
        "Colored cells: {} average, {} matched",
        result.average_colors().len(),
        result.matched_colors().len()
    );

    if let Some(path) = json {
        let report = result.to_report().to_json()?;
        std::fs::write(path, report)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote report to {}", path.display());
    }

    Ok(())
}

fn run_render_command(
    params: &BuildParams,
    output: &Path,
    scale: f64,
    matched: bool,
) -> anyhow::Result<()> {
    let result = build(params)?;
    let source = if matched {
        ColorSource::Matched
    } else {
        ColorSource::Average
    };

    let preview = render_preview(&result, scale, source)?;
    let png_bytes = encode_png(&preview)?;

    std::fs::write(output, &png_bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "Rendered {} ({}x{}, {} bytes)",
        output.display(),
        preview.width,
        preview.height,
        png_bytes.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_build_flags() {
        let cli = Cli::try_parse_from([
            "mosaic",
            "build",
            "photo.png",
            "--rows",
            "3",
            "--precision",
            "-4",
            "--colors",
            "#000, #fff,",
        ])
        .unwrap();

        let Some(Commands::Build { params, json }) = cli.command else {
            panic!("Expected build command");
        };
        assert!(json.is_none());

        let config = resolve_config(&params).unwrap();
        assert_eq!(config.image, PathBuf::from("photo.png"));
        assert_eq!(config.rows, 3);
        assert_eq!(config.columns, 5);
        assert_eq!(config.clamped_precision(), 1);
        assert_eq!(
            config.palette,
            Some(vec!["#000".to_string(), "#fff".to_string()])
        );
    }

    #[test]
    fn test_cli_render_requires_output() {
        assert!(Cli::try_parse_from(["mosaic", "render", "photo.png"]).is_err());
        assert!(Cli::try_parse_from(["mosaic", "render", "photo.png", "-o", "out.png"]).is_ok());
    }

    #[test]
    fn test_config_file_then_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mosaic.yaml");
        std::fs::write(&path, "rows: 8\ncolumns: 9\nwidth: 2.0\n").unwrap();

        let params = BuildParams {
            config: Some(path),
            columns: Some(4),
            ..Default::default()
        };
        let config = resolve_config(&params).unwrap();
        assert_eq!((config.rows, config.columns), (8, 4));
        assert_eq!(config.width, 2.0);
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let params = BuildParams {
            config: Some(PathBuf::from("/nope/mosaic.yaml")),
            ..Default::default()
        };
        assert!(resolve_config(&params).is_err());
    }
}
