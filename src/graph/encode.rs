use std::fmt;

use ratatui::style::Color;

use super::GraphSettings;

/// Height and fill for one day's bar. `fill` is `None` for the transparent
/// placeholder an empty day gets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarMetrics {
    pub height: f64,
    pub fill: Option<Color>,
}

/// Maps a day value to bar geometry. Returns `None` when the value has no
/// palette entry; the layout engine turns that into `GraphError::InvalidValue`
/// rather than skipping or clamping the day.
pub fn bar_metrics(value: Option<u32>, settings: &GraphSettings) -> Option<BarMetrics> {
    let slot = settings.slot_height();
    let Some(value) = value else {
        return Some(BarMetrics {
            height: slot,
            fill: None,
        });
    };

    let fill = settings.colors.get(value as usize).copied()?;
    let height = if value < settings.max_pom {
        // a zero value still gets a sliver so the day reads as recorded
        (settings.pom_height * value as f64).max(1.0)
    } else {
        slot
    };

    Some(BarMetrics {
        height,
        fill: Some(fill),
    })
}

/// Non-fatal report that an edit was reduced to the palette maximum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClampedNotice {
    pub requested: i64,
    pub max: u32,
}

impl fmt::Display for ClampedNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "can't exceed value {} with current settings",
            self.max
        )
    }
}

/// Edit-time policy: negatives clear the day, values past the palette end
/// are clamped down with a notice. Never used during layout.
pub fn clamp_to_palette(
    value: i64,
    settings: &GraphSettings,
) -> (Option<u32>, Option<ClampedNotice>) {
    if value < 0 {
        return (None, None);
    }
    let max = settings.max_value();
    if value > max as i64 {
        (
            Some(max),
            Some(ClampedNotice {
                requested: value,
                max,
            }),
        )
    } else {
        (Some(value as u32), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphConfig;

    fn settings() -> GraphSettings {
        GraphSettings::from_config(GraphConfig::default())
    }

    #[test]
    fn test_empty_day_is_full_height_placeholder() {
        let s = settings();
        let metrics = bar_metrics(None, &s).unwrap();
        assert_eq!(metrics.height, s.slot_height());
        assert_eq!(metrics.fill, None);
    }

    #[test]
    fn test_zero_value_gets_minimum_sliver() {
        let s = settings();
        let metrics = bar_metrics(Some(0), &s).unwrap();
        assert_eq!(metrics.height, 1.0);
        assert_eq!(metrics.fill, Some(s.colors[0]));
    }

    #[test]
    fn test_in_range_value_scales_by_pom_height() {
        let s = settings();
        let metrics = bar_metrics(Some(7), &s).unwrap();
        assert_eq!(metrics.height, s.pom_height * 7.0);
        assert_eq!(metrics.fill, Some(s.colors[7]));
    }

    #[test]
    fn test_value_at_or_past_max_pom_is_capped() {
        // palette reaches past max_pom, so 20..=24 are legal but capped
        let s = GraphSettings::from_config(GraphConfig {
            max_pom: 20,
            ..GraphConfig::default()
        });
        for value in [20, 22, 24] {
            let metrics = bar_metrics(Some(value), &s).unwrap();
            assert_eq!(metrics.height, s.slot_height());
            assert_eq!(metrics.fill, Some(s.colors[value as usize]));
        }
    }

    #[test]
    fn test_out_of_palette_value_is_rejected() {
        let s = settings();
        assert_eq!(bar_metrics(Some(25), &s), None);
        assert_eq!(bar_metrics(Some(1000), &s), None);
    }

    #[test]
    fn test_clamp_reduces_overlarge_values_with_notice() {
        let s = settings();
        let (value, notice) = clamp_to_palette(40, &s);
        assert_eq!(value, Some(s.max_value()));
        let notice = notice.unwrap();
        assert_eq!(notice.requested, 40);
        assert_eq!(notice.max, s.max_value());
    }

    #[test]
    fn test_clamp_treats_negatives_as_clear() {
        let s = settings();
        assert_eq!(clamp_to_palette(-1, &s), (None, None));
        assert_eq!(clamp_to_palette(-100, &s), (None, None));
    }

    #[test]
    fn test_clamp_passes_in_range_values_through() {
        let s = settings();
        assert_eq!(clamp_to_palette(0, &s), (Some(0), None));
        assert_eq!(clamp_to_palette(24, &s), (Some(24), None));
    }
}
