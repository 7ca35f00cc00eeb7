use chrono::{Datelike, NaiveDate};
use ratatui::style::Color;

use crate::calendar::{add_days, days_from, iso_weekday, month_lengths};
use crate::domain::Profile;
use crate::surface::{CellId, LineSpec, RectSpec, Surface};

use super::encode::bar_metrics;
use super::{Direction, GraphError, GraphSettings, ResumePoint};

/// What a draw pass produced. `today_cell` is only set by full-mode draws
/// and is the cell the caller should select.
#[derive(Clone, Copy, Debug)]
pub struct DrawOutcome {
    pub today_cell: Option<CellId>,
    pub cells_emitted: usize,
}

/// Lays the profile's day values out as week rows of bars.
///
/// With no resume point in `settings` the whole history is drawn from the
/// profile's start date. With one present, drawing continues from it and
/// previously placed cells are left untouched; callers force a full redraw
/// by rebuilding the settings from config. Trailing days needed to finish
/// the last week are appended to the profile as empty entries, so the grid
/// always ends on a Sunday.
pub fn draw_bar_graph<S: Surface>(
    surface: &mut S,
    profile: &mut Profile,
    settings: &mut GraphSettings,
    today: NaiveDate,
) -> Result<DrawOutcome, GraphError> {
    let resume = settings.resume;
    let (first_date, start_index) = match resume {
        Some(point) => (point.next_date, point.next_index),
        None => (profile.start_date, 0),
    };

    // Reject out-of-palette values up front so a failed draw leaves the
    // surface and resume point untouched.
    for i in start_index..profile.values.len() {
        if let Some(value) = profile.values[i] {
            if value as usize >= settings.colors.len() {
                return Err(GraphError::InvalidValue {
                    day_index: i,
                    value,
                });
            }
        }
    }

    let mut year = first_date.year();
    let mut lengths = month_lengths(year);
    year += 1;
    let mut month = first_date.month0() as usize;
    // days before the current month ends
    let mut days_left = lengths[month] - first_date.day();
    month += 1;

    let mut day_of_week = iso_weekday(first_date);

    let today_index = days_from(profile.start_date, today).max(0) as usize;
    let end = match resume {
        Some(_) => profile.values.len(),
        None => profile.values.len().max(today_index + 1),
    };

    let x_shift = settings.sides_gap + settings.initial_x;
    let mut y_shift = settings.baseline + settings.initial_y;

    stretch(
        surface,
        x_shift + settings.week_width + settings.sides_gap,
        y_shift + settings.week_height + settings.sides_gap,
    );

    let mut today_cell = None;
    let mut cells_emitted = 0;
    let mut i = start_index;

    // extra iterations past `end` finish the current week
    while i < end || day_of_week != 0 {
        if profile.values.len() <= i {
            profile.values.push(None);
        }
        let value = profile.values[i];
        let metrics =
            bar_metrics(value, settings).ok_or(GraphError::InvalidValue {
                day_index: i,
                value: value.unwrap_or(0),
            })?;

        let x = x_shift + day_of_week as f64 * settings.pom_width;
        let mut y = y_shift;
        if settings.direction == Direction::BottomUp {
            y -= metrics.height;
        }

        let cell = surface.place_rect(RectSpec {
            x,
            y,
            width: settings.pom_width,
            height: metrics.height,
            fill: metrics.fill,
            stroke: None,
        });
        surface.tag_day(cell, i);
        cells_emitted += 1;

        if resume.is_none() && i == today_index {
            today_cell = Some(cell);
        }

        day_of_week = (day_of_week + 1) % 7;
        if day_of_week == 0 {
            draw_week_rules(surface, settings, x_shift, y_shift);
            y_shift += settings.week_height;
        }
        if days_left == 0 {
            if month == 12 {
                month = 0;
                lengths = month_lengths(year);
                year += 1;
            }
            days_left = lengths[month];
            month += 1;
            if settings.month_gap {
                draw_week_rules(surface, settings, x_shift, y_shift);
                y_shift += settings.week_height;
            }
        }
        days_left -= 1;

        i += 1;
    }

    settings.initial_x = x_shift - settings.sides_gap;
    settings.initial_y = y_shift - settings.baseline;
    settings.resume = Some(ResumePoint {
        next_index: i,
        next_date: add_days(profile.start_date, i as i64),
    });

    stretch(
        surface,
        x_shift + settings.week_width + settings.sides_gap,
        y_shift + settings.sides_gap,
    );

    Ok(DrawOutcome {
        today_cell,
        cells_emitted,
    })
}

/// Horizontal rules across one week row: a rule per value step, stronger
/// every 5th and strongest every 10th.
fn draw_week_rules<S: Surface>(
    surface: &mut S,
    settings: &GraphSettings,
    x_shift: f64,
    y_shift: f64,
) {
    let x = x_shift - settings.sides_gap / 2.0;
    let length = settings.week_width + settings.sides_gap;
    let step = settings.pom_height
        * match settings.direction {
            Direction::BottomUp => -1.0,
            Direction::TopDown => 1.0,
        };

    let mut y = y_shift;
    for rule in 0..settings.max_pom {
        let opacity = if rule % 10 == 0 {
            0.5
        } else if rule % 5 == 0 {
            0.25
        } else {
            0.1
        };
        surface.place_line(LineSpec {
            from: (x, y),
            to: (x + length, y),
            color: Color::White,
            opacity,
        });
        y += step;
    }
}

/// Grow-only canvas sizing.
fn stretch<S: Surface>(surface: &mut S, width: f64, height: f64) {
    let (current_w, current_h) = surface.canvas_size();
    surface.set_canvas_size(current_w.max(width), current_h.max(height));
}
