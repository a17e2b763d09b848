use anyhow::Result;
use log::{info, warn};
use std::path::PathBuf;
use structopt::StructOpt;

/// Plot log word counts against rank, taking every Nth word of a `word,count` file
#[derive(StructOpt)]
struct Options {
    /// Word-count file, one `word,count` per line, sorted by descending count
    #[structopt(parse(from_os_str))]
    wordcount_file: PathBuf,
    /// Where to save the plot; png, jpg, bmp or svg depending on the extension
    #[structopt(parse(from_os_str))]
    output_image_file: PathBuf,
    /// Keep every Nth word
    #[structopt(short, long, default_value = "100", env = "ZIPF_EVERY")]
    every: usize,
    #[structopt(long, default_value = "1024")]
    width: u32,
    #[structopt(long, default_value = "768")]
    height: u32,
    /// Title drawn above the plot
    #[structopt(short, long)]
    caption: Option<String>,
    /// Leave zero counts out of the plot instead of failing on them
    #[structopt(long)]
    drop_non_positive: bool,
    /// Also write the plotted points to this CSV file
    #[structopt(long, parse(from_os_str))]
    points_csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Load from .env file if it is present
    dotenv::dotenv().ok();
    // Initialize logging, showing skipped lines unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    // Get command line arguments
    let options = Options::from_args();
    let render_options = zipf::RenderOptions {
        every: options.every,
        width: options.width,
        height: options.height,
        caption: options.caption,
        drop_non_positive: options.drop_non_positive,
        points_csv: options.points_csv,
    };

    let summary = zipf::render_with(&render_options, &options.wordcount_file, &options.output_image_file)?;
    if !summary.skipped.is_empty() {
        warn!("{} of {} lines skipped", summary.skipped.len(), summary.records + summary.skipped.len());
    }
    if summary.dropped > 0 {
        warn!("{} samples dropped for non-positive counts", summary.dropped);
    }
    info!("{} records, {} samples plotted", summary.records, summary.samples);

    Ok(())
}
