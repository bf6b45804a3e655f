use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use rand::{rngs::SmallRng, SeedableRng};
use tracing::{error, info, Level};

use collage::{
    config::{parse_hex_color, Config},
    imaging::ResizeFilter,
    CollageComposer, CollageRequest, OutputFormat,
};

#[derive(Parser)]
#[command(
    name = "collage",
    version,
    override_usage = "collage [OPTIONS] OUTPUT_FILE WIDTH HEIGHT FILE...",
    about = "Creates a collage from FILEs",
    long_about = "Creates a collage from FILEs. The collage will be saved as OUTPUT_FILE with dimensions specified by WIDTH and HEIGHT (in pixels)."
)]
struct Cli {
    /// Where to save the collage
    #[arg(value_name = "OUTPUT_FILE")]
    output: PathBuf,

    /// Collage width in pixels
    #[arg(value_name = "WIDTH", value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Collage height in pixels
    #[arg(value_name = "HEIGHT", value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Images to scatter over the collage; missing files are skipped
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Seed for reproducible placement
    #[arg(short, long)]
    seed: Option<u64>,

    /// Background color as RRGGBB
    #[arg(short, long)]
    background: Option<String>,

    /// Output encoding
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Resampling filter for thumbnails
    #[arg(long, value_enum)]
    filter: Option<ResizeFilter>,

    /// Fit thumbnails inside their box instead of stretching them
    #[arg(long)]
    keep_aspect_ratio: bool,

    /// Skip images that cannot be decoded instead of failing
    #[arg(long)]
    skip_unreadable: bool,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Layer command-line flags over the loaded configuration
    fn apply_overrides(&self, config: &mut Config) -> collage::Result<()> {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(background) = &self.background {
            config.canvas.background = parse_hex_color(background)?;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(filter) = self.filter {
            config.thumbnail.filter = filter;
        }
        if self.keep_aspect_ratio {
            config.thumbnail.keep_aspect_ratio = true;
        }
        if self.skip_unreadable {
            config.skip_unreadable = true;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    if std::env::args_os().len() <= 1 {
        Cli::command().print_help()?;
        return Ok(());
    }

    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Load configuration
    let mut config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => Config::default(),
    };
    cli.apply_overrides(&mut config)?;
    config.validate()?;

    let request = CollageRequest::new(&cli.output, cli.width, cli.height, &cli.files)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!("Placement seed: {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let composer = CollageComposer::from_config(&config);
    let collage = composer.compose_request(&request, &mut rng)?;

    match composer.write(&collage, request.output_path(), config.output.format) {
        Ok(()) => {}
        Err(e) if e.is_output_failure() => {
            error!("{}", e.user_message());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
