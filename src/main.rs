use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use docscan::{DocumentScanner, ScanConfig};

#[derive(Parser)]
#[command(name = "docscan")]
#[command(about = "Detect a document in a photo and show it rectified")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE", default_value = "Resources/2.jpg")]
    image_path: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON file with scan parameters
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Scale factor applied to the input before detection
    #[arg(long, value_name = "FACTOR")]
    scale: Option<f32>,

    /// Also write the scanned document to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Save debug outputs to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Do not open the viewer window
    #[arg(long)]
    no_display: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    if !args.no_display && args.output.is_none() && !cfg!(feature = "gui") {
        anyhow::bail!("built without the `gui` feature: pass --output or --no-display");
    }

    let mut config = match &args.config {
        Some(path) => ScanConfig::from_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => ScanConfig::default(),
    };
    if let Some(scale) = args.scale {
        config = config.with_resize_factor(scale);
    }

    tracing::info!(path = %args.image_path.display(), "Loading image");
    let img = docscan::load_image(&args.image_path)?;
    tracing::info!(width = img.width(), height = img.height(), "Image loaded");

    let mut scanner = DocumentScanner::new(&config)?.with_verbose(args.verbose);
    if let Some(debug_dir) = args.debug_out {
        scanner = scanner.with_debug(debug_dir)?;
    }

    let result = scanner.scan(&img).context("scan failed")?;

    if let Some(output) = &args.output {
        result
            .image
            .save(output)
            .with_context(|| format!("failed to write {}", output.display()))?;
        tracing::info!(path = %output.display(), "Scan saved");
    }

    if !args.no_display {
        display(&result.image)?;
    }

    Ok(())
}

#[cfg(feature = "gui")]
fn display(img: &image::DynamicImage) -> anyhow::Result<()> {
    docscan::gui::show("Scan", img).map_err(|e| anyhow::anyhow!("viewer failed: {}", e))
}

#[cfg(not(feature = "gui"))]
fn display(_img: &image::DynamicImage) -> anyhow::Result<()> {
    tracing::warn!("Display requested but the `gui` feature is disabled");
    Ok(())
}
