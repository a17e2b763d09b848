//! Plot log word counts against rank to eyeball how Zipfian a corpus is.

use anyhow::{Context, Result};
use log::info;
use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

pub mod figure;
pub mod record;
pub mod sample;

pub use figure::{Figure, FigureError, ImageFormat};
pub use record::{parse_line, ParseError, ParseErrorKind, ParsedFile, WordCountRecord};
pub use sample::{Sample, SampleError, DEFAULT_EVERY};

/// Label of the y axis. The spelling is kept as-is, other tooling matches on it.
pub const Y_LABEL: &str = "Log occurences";

/// Knobs for [`render_with`]. The defaults give the plain `render` behaviour.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Keep every `every`th record.
    pub every: usize,
    pub width: u32,
    pub height: u32,
    pub caption: Option<String>,
    /// Drop zero counts from the samples instead of failing on them.
    pub drop_non_positive: bool,
    /// Also write the plotted points here as CSV.
    pub points_csv: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            every: DEFAULT_EVERY,
            width: 1024,
            height: 768,
            caption: None,
            drop_non_positive: false,
            points_csv: None,
        }
    }
}

/// What happened during a render.
#[derive(Debug)]
pub struct RenderSummary {
    pub records: usize,
    pub skipped: Vec<ParseError>,
    pub samples: usize,
    pub dropped: usize,
}

/// Render `input` to `output` with the default options.
pub fn render(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<RenderSummary> {
    render_with(&RenderOptions::default(), input, output)
}

/// Read a word-count file, subsample it, and save a plot of log count against subsample index.
///
/// Unparseable lines are skipped. A sampled count of zero is an error unless
/// `drop_non_positive` is set, and in that case nothing is written.
pub fn render_with(options: &RenderOptions, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<RenderSummary> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let every = NonZeroUsize::new(options.every).ok_or(SampleError::InvalidStep)?;
    let parsed = ParsedFile::read(input)?;

    let mut samples = sample::subsample(&parsed.records, every);
    let sampled = samples.len();
    if options.drop_non_positive {
        sample::drop_non_positive(&mut samples);
    }
    let points = sample::log_points(&samples)
        .with_context(|| format!("can't plot the counts in {}", input.display()))?;

    let mut figure = Figure::new(options.width, options.height);
    figure.set_x_label(x_label(options.every)).set_y_label(Y_LABEL).plot(points.iter().copied());
    if let Some(caption) = &options.caption {
        figure.set_caption(caption.as_str());
    }
    figure.save(output).with_context(|| format!("failed to save plot to {}", output.display()))?;
    info!("wrote {} points to {}", points.len(), output.display());

    if let Some(csv_path) = &options.points_csv {
        write_points_csv(csv_path, &samples, &points)?;
        info!("wrote points to {}", csv_path.display());
    }

    Ok(RenderSummary {
        records: parsed.records.len(),
        skipped: parsed.errors,
        samples: samples.len(),
        dropped: sampled - samples.len(),
    })
}

/// Label of the x axis, e.g. "Subsampled words (every 100th word)".
pub fn x_label(every: usize) -> String {
    format!("Subsampled words (every {}{} word)", every, ordinal_suffix(every))
}

fn ordinal_suffix(n: usize) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn write_points_csv(path: &Path, samples: &[Sample<'_>], points: &[(usize, f64)]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("failed to create points file {}", path.display()))?;
    writer.write_record(["index", "word", "count", "log_count"])?;
    for (sample, (index, log_count)) in samples.iter().zip(points) {
        writer.write_record([
            index.to_string(),
            sample.word.to_owned(),
            sample.count.to_string(),
            log_count.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
