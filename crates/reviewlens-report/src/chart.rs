//! SVG chart rendering for a report run.
//!
//! Each run writes into its own directory under the charts root, named by
//! the run id, so overlapping requests never touch the same files.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use reviewlens_core::Sentiment;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::builder::{RatingBucket, SentimentBucket};

pub const RATING_CHART_FILE: &str = "rating_chart.svg";
pub const SENTIMENT_CHART_FILE: &str = "sentiment_chart.svg";

const RATING_CHART_SIZE: (u32, u32) = (600, 400);
const SENTIMENT_CHART_SIZE: (u32, u32) = (600, 600);
const FONT: &str = "sans-serif";

const BAR_COLOR: RGBColor = RGBColor(0x42, 0xA5, 0xF5);

/// Pie slice colour for each sentiment, fixed regardless of slice order.
#[must_use]
pub fn sentiment_color(sentiment: Sentiment) -> RGBColor {
    match sentiment {
        Sentiment::Positive => RGBColor(0x2E, 0xCC, 0x71),
        Sentiment::Neutral => RGBColor(0xF3, 0x9C, 0x12),
        Sentiment::Negative => RGBColor(0xE7, 0x4C, 0x3C),
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart file error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("chart drawing failed: {0}")]
    Draw(String),
}

impl ChartError {
    fn io(path: &Path, source: io::Error) -> Self {
        ChartError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn draw(err: impl std::fmt::Display) -> Self {
        ChartError::Draw(err.to_string())
    }
}

/// Where a run's charts were written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPaths {
    pub run_dir: PathBuf,
    pub rating_chart: PathBuf,
    pub sentiment_chart: PathBuf,
}

impl ChartPaths {
    #[must_use]
    pub fn for_run(charts_dir: &Path, run_id: Uuid) -> Self {
        let run_dir = charts_dir.join(run_id.to_string());
        Self {
            rating_chart: run_dir.join(RATING_CHART_FILE),
            sentiment_chart: run_dir.join(SENTIMENT_CHART_FILE),
            run_dir,
        }
    }
}

/// Writes rating and sentiment charts under a root directory.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    charts_dir: PathBuf,
}

impl ChartRenderer {
    #[must_use]
    pub fn new(charts_dir: impl Into<PathBuf>) -> Self {
        Self {
            charts_dir: charts_dir.into(),
        }
    }

    #[must_use]
    pub fn charts_dir(&self) -> &Path {
        &self.charts_dir
    }

    /// Renders both charts for `run_id`, replacing any files already there.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Io`] if the run directory cannot be created or a
    /// stale file cannot be removed, and [`ChartError::Draw`] if plotting fails.
    pub fn render(
        &self,
        run_id: Uuid,
        ratings: &[RatingBucket],
        sentiments: &[SentimentBucket],
    ) -> Result<ChartPaths, ChartError> {
        let paths = ChartPaths::for_run(&self.charts_dir, run_id);
        fs::create_dir_all(&paths.run_dir).map_err(|e| ChartError::io(&paths.run_dir, e))?;

        render_rating_chart(&paths.rating_chart, ratings)?;
        render_sentiment_chart(&paths.sentiment_chart, sentiments)?;

        tracing::debug!(run_id = %run_id, dir = %paths.run_dir.display(), "charts rendered");
        Ok(paths)
    }

    /// Removes all but the `keep` most recently modified run directories.
    ///
    /// Returns the number of directories removed. A missing charts root is
    /// treated as empty.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Io`] if the root cannot be listed or a run
    /// directory cannot be removed.
    pub fn prune_runs(&self, keep: usize) -> Result<usize, ChartError> {
        let entries = match fs::read_dir(&self.charts_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(ChartError::io(&self.charts_dir, e)),
        };

        let mut runs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ChartError::io(&self.charts_dir, e))?;
            let path = entry.path();
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            if !metadata.is_dir() {
                continue;
            }
            let modified = metadata.modified().map_err(|e| ChartError::io(&path, e))?;
            runs.push((modified, path));
        }

        // Newest first; ties fall back to the path so the order is stable.
        runs.sort_by(|a, b| b.cmp(a));

        let mut removed = 0;
        for (_, path) in runs.into_iter().skip(keep) {
            fs::remove_dir_all(&path).map_err(|e| ChartError::io(&path, e))?;
            removed += 1;
        }
        if removed > 0 {
            tracing::debug!(removed, keep, "pruned old chart runs");
        }
        Ok(removed)
    }
}

/// Renders a bar per rating value with its count above the bar.
///
/// # Errors
///
/// See [`ChartRenderer::render`].
pub fn render_rating_chart(path: &Path, ratings: &[RatingBucket]) -> Result<(), ChartError> {
    remove_stale(path)?;

    let total: usize = ratings.iter().map(|b| b.count).sum();
    let max_count = ratings.iter().map(|b| b.count).max().unwrap_or(0);
    let bars = ratings.len().max(1);

    let root = SVGBackend::new(path, RATING_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::draw)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Distribution of Ratings (total ratings: {total})"),
            (FONT, 20),
        )
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(48)
        .build_cartesian_2d((0..bars).into_segmented(), 0..max_count + max_count / 5 + 1)
        .map_err(ChartError::draw)?;

    let label_for = |value: &SegmentValue<usize>| match value {
        SegmentValue::CenterOf(i) => ratings
            .get(*i)
            .map(|b| format_rating(b.rating))
            .unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars + 1)
        .x_label_formatter(&label_for)
        .x_desc("Rating")
        .y_desc("Count")
        .draw()
        .map_err(ChartError::draw)?;

    chart
        .draw_series(ratings.iter().enumerate().map(|(i, bucket)| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0),
                    (SegmentValue::Exact(i + 1), bucket.count),
                ],
                BAR_COLOR.filled(),
            );
            bar.set_margin(0, 0, 12, 12);
            bar
        }))
        .map_err(ChartError::draw)?;

    let count_style = TextStyle::from((FONT, 14).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
    chart
        .draw_series(ratings.iter().enumerate().map(|(i, bucket)| {
            Text::new(
                bucket.count.to_string(),
                (SegmentValue::CenterOf(i), bucket.count),
                count_style.clone(),
            )
        }))
        .map_err(ChartError::draw)?;

    root.present().map_err(ChartError::draw)?;
    Ok(())
}

/// Renders a pie with one slice per sentiment present, starting at 12 o'clock
/// and running counterclockwise, labelled with one-decimal percentages.
///
/// # Errors
///
/// See [`ChartRenderer::render`].
pub fn render_sentiment_chart(
    path: &Path,
    sentiments: &[SentimentBucket],
) -> Result<(), ChartError> {
    remove_stale(path)?;

    let root = SVGBackend::new(path, SENTIMENT_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::draw)?;
    let root = root
        .titled("Sentiment Analysis", (FONT, 22))
        .map_err(ChartError::draw)?;

    let (width, height) = root.dim_in_pixel();
    let center = (f64::from(width) / 2.0, f64::from(height) / 2.0);
    let radius = f64::from(width.min(height)) * 0.38;
    let slices = pie_slices(sentiments);

    for slice in &slices {
        let color = sentiment_color(slice.sentiment);
        root.draw(&Polygon::new(slice_outline(center, radius, slice), color.filled()))
            .map_err(ChartError::draw)?;

        let label_at = polar(center, radius * 0.62, (slice.start + slice.end) / 2.0);
        root.draw(&Text::new(
            format!("{:.1}%", slice.share * 100.0),
            label_at,
            TextStyle::from((FONT, 16).into_font()).pos(Pos::new(HPos::Center, VPos::Center)),
        ))
        .map_err(ChartError::draw)?;
    }

    draw_legend(&root, &slices)?;

    root.present().map_err(ChartError::draw)?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PieSlice {
    sentiment: Sentiment,
    share: f64,
    /// Angles in radians, counterclockwise from the positive x axis.
    start: f64,
    end: f64,
}

#[allow(clippy::cast_precision_loss)]
fn pie_slices(sentiments: &[SentimentBucket]) -> Vec<PieSlice> {
    let total: usize = sentiments.iter().map(|b| b.count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut angle = FRAC_PI_2;
    sentiments
        .iter()
        .filter(|b| b.count > 0)
        .map(|bucket| {
            let share = bucket.count as f64 / total as f64;
            let start = angle;
            angle += share * TAU;
            PieSlice {
                sentiment: bucket.sentiment,
                share,
                start,
                end: angle,
            }
        })
        .collect()
}

fn slice_outline(center: (f64, f64), radius: f64, slice: &PieSlice) -> Vec<(i32, i32)> {
    const STEP: f64 = 0.5_f64 * std::f64::consts::PI / 180.0;

    let mut points = vec![polar(center, 0.0, slice.start)];
    let mut angle = slice.start;
    while angle < slice.end {
        points.push(polar(center, radius, angle));
        angle += STEP;
    }
    points.push(polar(center, radius, slice.end));
    points
}

/// Pixel position at `angle` on a circle; screen y grows downwards.
#[allow(clippy::cast_possible_truncation)]
fn polar(center: (f64, f64), radius: f64, angle: f64) -> (i32, i32) {
    (
        (center.0 + radius * angle.cos()).round() as i32,
        (center.1 - radius * angle.sin()).round() as i32,
    )
}

fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    slices: &[PieSlice],
) -> Result<(), ChartError> {
    for (row, slice) in (0_i32..).zip(slices) {
        let top = 8 + row * 24;
        area.draw(&Rectangle::new(
            [(12, top), (28, top + 16)],
            sentiment_color(slice.sentiment).filled(),
        ))
        .map_err(ChartError::draw)?;
        area.draw(&Text::new(
            slice.sentiment.label(),
            (36, top),
            (FONT, 15).into_font(),
        ))
        .map_err(ChartError::draw)?;
    }
    Ok(())
}

fn format_rating(rating: f64) -> String {
    if rating.fract() == 0.0 {
        format!("{rating:.0}")
    } else {
        rating.to_string()
    }
}

fn remove_stale(path: &Path) -> Result<(), ChartError> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed previous chart");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ChartError::io(path, e)),
    }
}

#[cfg(test)]
#[path = "chart_test.rs"]
mod tests;
