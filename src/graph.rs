use chrono::NaiveDate;
use ratatui::style::Color;

use crate::constants::PALETTE;

mod encode;
mod layout;

pub use encode::{BarMetrics, ClampedNotice, bar_metrics, clamp_to_palette};
pub use layout::{DrawOutcome, draw_bar_graph};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A value in the data sequence has no palette entry. Layout never
    /// clamps; clamping belongs to the edit path only.
    #[error("no palette color for value {value} at day {day_index}")]
    InvalidValue { day_index: usize, value: u32 },

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("selection target is not a rendered day cell")]
    InvalidSelection,

    #[error("day {day_index} is outside the profile data")]
    NotFound { day_index: usize },

    #[error("profile save failed: {reason}")]
    Save { reason: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Bars grow upward from the week row's baseline.
    BottomUp,
    /// Bars grow downward from the week row's top edge.
    TopDown,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::BottomUp => Direction::TopDown,
            Direction::TopDown => Direction::BottomUp,
        }
    }
}

/// Caller-facing knobs. Unset `sides_gap` falls back to one bar width.
#[derive(Clone, Debug)]
pub struct GraphConfig {
    pub colors: Vec<Color>,
    pub max_pom: u32,
    pub pom_width: f64,
    pub pom_height: f64,
    pub direction: Direction,
    pub sides_gap: Option<f64>,
    pub month_gap: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            colors: PALETTE.to_vec(),
            max_pom: 25,
            pom_width: 5.0,
            pom_height: 5.0,
            direction: Direction::BottomUp,
            sides_gap: None,
            month_gap: false,
        }
    }
}

/// Where the next expansion draw picks up. `next_date` always equals the
/// profile start date plus `next_index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResumePoint {
    pub next_index: usize,
    pub next_date: NaiveDate,
}

/// Config plus the derived values and running state one draw session owns.
/// Rebuilding from config is how callers force a full redraw.
#[derive(Clone, Debug)]
pub struct GraphSettings {
    pub colors: Vec<Color>,
    pub max_pom: u32,
    pub pom_width: f64,
    pub pom_height: f64,
    pub direction: Direction,
    pub sides_gap: f64,
    pub month_gap: bool,
    pub week_width: f64,
    pub week_height: f64,
    pub baseline: f64,
    pub initial_x: f64,
    pub initial_y: f64,
    pub resume: Option<ResumePoint>,
}

impl GraphSettings {
    pub fn from_config(config: GraphConfig) -> Self {
        let sides_gap = config.sides_gap.unwrap_or(config.pom_width);
        let week_width = config.pom_width * 7.0;
        let week_height = config.pom_height * config.max_pom as f64;
        let baseline = sides_gap
            + match config.direction {
                Direction::BottomUp => week_height,
                Direction::TopDown => 0.0,
            };

        Self {
            colors: config.colors,
            max_pom: config.max_pom,
            pom_width: config.pom_width,
            pom_height: config.pom_height,
            direction: config.direction,
            sides_gap,
            month_gap: config.month_gap,
            week_width,
            week_height,
            baseline,
            initial_x: 0.0,
            initial_y: 0.0,
            resume: None,
        }
    }

    /// Highest value the palette can display.
    pub fn max_value(&self) -> u32 {
        self.colors.len() as u32 - 1
    }

    pub fn slot_height(&self) -> f64 {
        self.pom_height * self.max_pom as f64
    }
}
