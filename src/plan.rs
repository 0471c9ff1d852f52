//! Turning a drawing request into commit layers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::draw::calendar::{background_dates, foreground_dates, Year};
use crate::draw::Grid;
use crate::error::Error;
use crate::stream::{validate_intensity, Layer};

/// What to draw and how densely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRequest {
    text: String,
    year: Year,
    intensity: u32,
    background_intensity: Option<u32>,
}

impl DrawRequest {
    /// Validates a request. The text is upper-cased.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyText`] for blank text and
    /// [`Error::IntensityOutOfRange`] for an unusable intensity.
    pub fn new(text: &str, year: Year, intensity: u32) -> Result<Self, Error> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyText);
        }
        Ok(Self {
            text: text.to_uppercase(),
            year,
            intensity: validate_intensity(intensity)?,
            background_intensity: None,
        })
    }

    /// Also fills every unlit cell with `intensity` commits per date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IntensityOutOfRange`] for an unusable intensity.
    pub fn with_background(mut self, intensity: u32) -> Result<Self, Error> {
        self.background_intensity = Some(validate_intensity(intensity)?);
        Ok(self)
    }

    /// The normalized text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The target year.
    #[must_use]
    pub fn year(&self) -> Year {
        self.year
    }
}

/// A resolved drawing: the grid plus the dates to commit on.
#[derive(Debug, Clone)]
pub struct DrawPlan {
    /// The rendered text.
    pub text: String,
    /// The target year.
    pub year: Year,
    /// The rendered grid.
    pub grid: Grid,
    /// Commits for unlit cells; empty unless background fill was requested.
    pub background: Layer,
    /// Commits for the text itself.
    pub foreground: Layer,
}

impl DrawPlan {
    /// Renders the request and resolves dates as of `now`.
    #[must_use]
    pub fn build(request: &DrawRequest, now: DateTime<Utc>) -> Self {
        let grid = Grid::from_text(&request.text);
        let foreground =
            Layer::new(foreground_dates(&grid, request.year, now), request.intensity);
        let background = match request.background_intensity {
            Some(intensity) => Layer::new(background_dates(&grid, request.year, now), intensity),
            None => Layer::empty(),
        };
        tracing::info!(
            text = %request.text,
            year = %request.year,
            text_pixels = foreground.dates.len(),
            background_pixels = background.dates.len(),
            "planned drawing"
        );
        Self { text: request.text.clone(), year: request.year, grid, background, foreground }
    }

    /// Total commits the plan will produce.
    #[must_use]
    pub fn total_commits(&self) -> u64 {
        self.background.work() + self.foreground.work()
    }

    /// A serializable summary.
    #[must_use]
    pub fn summary(&self) -> PlanSummary {
        let all = self.background.dates.iter().chain(&self.foreground.dates);
        PlanSummary {
            text: self.text.clone(),
            year: self.year.get(),
            text_pixels: self.foreground.dates.len(),
            background_pixels: self.background.dates.len(),
            intensity: self.foreground.intensity,
            background_intensity: self.background.intensity,
            total_commits: self.total_commits(),
            first_date: all.clone().min().copied(),
            last_date: all.max().copied(),
        }
    }
}

/// Counts describing a [`DrawPlan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    /// The normalized text.
    pub text: String,
    /// The target year.
    pub year: i32,
    /// Dates that receive text commits.
    pub text_pixels: usize,
    /// Dates that receive background commits.
    pub background_pixels: usize,
    /// Commits per text date.
    pub intensity: u32,
    /// Commits per background date; zero without background fill.
    pub background_intensity: u32,
    /// Total commits.
    pub total_commits: u64,
    /// Earliest committed date.
    pub first_date: Option<NaiveDate>,
    /// Latest committed date.
    pub last_date: Option<NaiveDate>,
}
