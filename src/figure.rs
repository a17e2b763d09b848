use log::debug;
use plotters::{coord::Shift, prelude::*};
use std::{ops::Range, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FigureError {
    #[error("can't infer an image format from {0:?} (expected png, jpg, jpeg, bmp or svg)")]
    UnsupportedFormat(String),
    #[error("figure size must be non-zero, got {0}x{1}")]
    InvalidSize(u32, u32),
    #[error("plotting backend error: {0}")]
    Backend(String),
}

/// Output formats, picked from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// Raster output; the exact encoding (png, jpeg, bmp) follows the extension.
    Bitmap,
    Svg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self, FigureError> {
        let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("png" | "jpg" | "jpeg" | "bmp") => Ok(Self::Bitmap),
            Some("svg") => Ok(Self::Svg),
            _ => Err(FigureError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// A single line plot. Owns everything needed to draw it, so labels and
/// data travel with the figure instead of living in some global state.
#[derive(Clone, Debug)]
pub struct Figure {
    width: u32,
    height: u32,
    caption: Option<String>,
    x_label: String,
    y_label: String,
    points: Vec<(usize, f64)>,
}

impl Figure {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            caption: None,
            x_label: String::new(),
            y_label: String::new(),
            points: Vec::new(),
        }
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) -> &mut Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn set_x_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.x_label = label.into();
        self
    }

    pub fn set_y_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.y_label = label.into();
        self
    }

    /// Append points to the line series.
    pub fn plot(&mut self, points: impl IntoIterator<Item = (usize, f64)>) -> &mut Self {
        self.points.extend(points);
        self
    }

    pub fn points(&self) -> &[(usize, f64)] {
        &self.points
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    /// From 0 to the largest x, never empty.
    pub fn x_range(&self) -> Range<f64> {
        let max = self.points.iter().map(|(x, _)| *x).max().unwrap_or(0);
        0.0..(max.max(1) as f64)
    }

    /// The y extent padded by 5%, or by 1 when the series is flat. `0..1` when empty.
    pub fn y_range(&self) -> Range<f64> {
        let mut ys = self.points.iter().map(|(_, y)| *y).filter(|y| y.is_finite());
        let first = match ys.next() {
            Some(y) => y,
            None => return 0.0..1.0,
        };
        let (min, max) = ys.fold((first, first), |(min, max), y| (min.min(y), max.max(y)));
        if max - min < f64::EPSILON {
            (min - 1.0)..(max + 1.0)
        } else {
            let pad = (max - min) * 0.05;
            (min - pad)..(max + pad)
        }
    }

    /// Render to `path`, choosing the backend from its extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FigureError> {
        let path = path.as_ref();
        if self.width == 0 || self.height == 0 {
            return Err(FigureError::InvalidSize(self.width, self.height));
        }
        let format = ImageFormat::from_path(path)?;
        debug!("saving {} points to {} as {:?}", self.points.len(), path.display(), format);
        let size = (self.width, self.height);
        match format {
            ImageFormat::Bitmap => self.draw(BitMapBackend::new(path, size).into_drawing_area()).map_err(backend_error),
            ImageFormat::Svg => self.draw(SVGBackend::new(path, size).into_drawing_area()).map_err(backend_error),
        }
    }

    fn draw<DB: DrawingBackend>(&self, root: DrawingArea<DB, Shift>) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let mut builder = ChartBuilder::on(&root);
        builder.margin(20).x_label_area_size(50).y_label_area_size(70);
        if let Some(caption) = &self.caption {
            builder.caption(caption, ("sans-serif", 30));
        }
        let mut chart = builder.build_cartesian_2d(self.x_range(), self.y_range())?;

        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()?;

        chart.draw_series(LineSeries::new(
            self.points.iter().map(|(x, y)| (*x as f64, *y)),
            &BLUE,
        ))?;

        root.present()?;
        Ok(())
    }
}

fn backend_error<E: std::error::Error + Send + Sync>(error: DrawingAreaErrorKind<E>) -> FigureError {
    FigureError::Backend(error.to_string())
}
