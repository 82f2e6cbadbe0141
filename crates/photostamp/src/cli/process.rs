//! The `photostamp process` command: caption a directory of photos.

use clap::Args;
use std::path::PathBuf;

use photostamp_core::{BatchDriver, Config, ImageProcessor, NominatimGeocoder};

/// Arguments for the `process` command.
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Directory of photos to caption
    #[arg(short, long, default_value = "input")]
    pub input: PathBuf,

    /// Directory the captioned copies are written to
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Rewrite outputs that already exist
    #[arg(long)]
    pub overwrite: bool,

    /// Print run statistics as JSON on stdout
    #[arg(long)]
    pub stats: bool,
}

/// Execute the process command.
pub async fn execute(args: ProcessArgs, config: Config) -> anyhow::Result<()> {
    if !args.input.is_dir() {
        anyhow::bail!("input directory does not exist: {}", args.input.display());
    }

    let geocoder = NominatimGeocoder::new(&config.geocode)?;
    let processor = ImageProcessor::new(config, Box::new(geocoder));

    // Fail on font problems before touching any image
    processor.ensure_font().map_err(|e| {
        anyhow::anyhow!("{e}\nSet footer.font_path in the config to a .ttf or .otf file.")
    })?;

    let progress = create_progress_bar();
    let driver = BatchDriver::new(&processor, args.overwrite);
    let stats = driver
        .run(&args.input, &args.output, |index, total, path| {
            if index == 0 {
                progress.set_length(total as u64);
            }
            progress.set_position(index as u64);
            if let Some(name) = path.file_name() {
                progress.set_message(name.to_string_lossy().into_owned());
            }
        })
        .await?;
    progress.finish_and_clear();

    tracing::info!(
        written = stats.written,
        skipped_existing = stats.skipped_existing,
        skipped_no_date = stats.skipped_no_date,
        failed = stats.failed,
        "done in {:.1}s",
        stats.total_seconds
    );

    if args.stats {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }

    if stats.failed > 0 {
        anyhow::bail!("{} image(s) failed, see the log above", stats.failed);
    }
    Ok(())
}

/// Create a progress bar for batch processing.
fn create_progress_bar() -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message("starting...");
    pb
}
