use chrono::NaiveDate;

use crate::constants::HIGHLIGHT;
use crate::domain::Profile;
use crate::graph::{
    self, ClampedNotice, Direction, GraphError, GraphSettings, bar_metrics, clamp_to_palette,
};
use crate::storage::ProfileStore;
use crate::surface::{CellId, Surface};

/// The highlighted day, if any, and its overlay rectangle. The overlay is a
/// restyled clone of the selected cell and lives on the surface; whenever
/// the cell's geometry changes the overlay is rebuilt.
#[derive(Default)]
pub struct Selection {
    selected_day: Option<usize>,
    overlay: Option<CellId>,
}

impl Selection {
    pub fn selected_day(&self) -> Option<usize> {
        self.selected_day
    }

    /// Highlights `cell`. The target must be a rendered, day-tagged rect.
    pub fn select<S: Surface>(
        &mut self,
        surface: &mut S,
        cell: CellId,
    ) -> Result<(), GraphError> {
        let day = surface.day_index(cell).ok_or(GraphError::InvalidSelection)?;
        let mut frame = surface.rect(cell).ok_or(GraphError::InvalidSelection)?;

        if let Some(old) = self.overlay.take() {
            surface.remove(old);
        }
        let overlay = surface
            .clone_cell(cell)
            .ok_or(GraphError::InvalidSelection)?;
        frame.fill = None;
        frame.stroke = Some(HIGHLIGHT.stroke);
        surface.update_rect(overlay, frame);

        self.overlay = Some(overlay);
        self.selected_day = Some(day);
        Ok(())
    }

    /// Steps the highlight one day backward or forward. Stepping past the
    /// rendered frontier grows the profile by one week and draws it before
    /// resolving the target; stepping before day zero does nothing. Returns
    /// whether the selection moved.
    pub fn move_selection<S: Surface>(
        &mut self,
        surface: &mut S,
        profile: &mut Profile,
        settings: &mut GraphSettings,
        today: NaiveDate,
        delta: i32,
    ) -> Result<bool, GraphError> {
        if delta != -1 && delta != 1 {
            return Err(GraphError::InvalidArgument(
                "move distance must be -1 or 1",
            ));
        }
        let Some(day) = self.selected_day else {
            return Ok(false);
        };

        if delta == -1 {
            if day == 0 {
                return Ok(false);
            }
            let target = surface
                .cell_for_day(day - 1)
                .ok_or(GraphError::InvalidSelection)?;
            self.select(surface, target)?;
            return Ok(true);
        }

        let target_day = day + 1;
        if surface.cell_for_day(target_day).is_none() {
            profile.grow_week();
            graph::draw_bar_graph(surface, profile, settings, today)?;
            if let Some(old) = self.overlay.take() {
                surface.remove(old);
            }
        }
        match surface.cell_for_day(target_day) {
            Some(cell) => {
                self.select(surface, cell)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Writes `value` into the selected day: clamps it to the palette
    /// (negatives clear), reshapes the cell in place, stores the value and
    /// saves the profile. The returned notice is set when clamping kicked
    /// in.
    pub fn set_value<S: Surface, P: ProfileStore>(
        &mut self,
        surface: &mut S,
        profile: &mut Profile,
        settings: &GraphSettings,
        store: &mut P,
        value: Option<i64>,
    ) -> Result<Option<ClampedNotice>, GraphError> {
        let day = self.selected_day.ok_or(GraphError::InvalidSelection)?;
        let cell = surface
            .cell_for_day(day)
            .ok_or(GraphError::InvalidSelection)?;
        if day >= profile.values.len() {
            return Err(GraphError::NotFound { day_index: day });
        }

        let (new_value, notice) = match value {
            Some(v) => clamp_to_palette(v, settings),
            None => (None, None),
        };

        let mut frame = surface.rect(cell).ok_or(GraphError::InvalidSelection)?;
        // recover the bar's anchor before swapping in the new height
        let anchor = match settings.direction {
            Direction::BottomUp => frame.y + frame.height,
            Direction::TopDown => frame.y,
        };
        let metrics =
            bar_metrics(new_value, settings).ok_or(GraphError::InvalidValue {
                day_index: day,
                value: new_value.unwrap_or(0),
            })?;
        frame.height = metrics.height;
        frame.fill = metrics.fill;
        frame.y = match settings.direction {
            Direction::BottomUp => anchor - metrics.height,
            Direction::TopDown => anchor,
        };
        surface.update_rect(cell, frame);

        profile.values[day] = new_value;
        // geometry changed, so the overlay has to be rebuilt
        self.select(surface, cell)?;
        store
            .save_profile(profile)
            .map_err(|reason| GraphError::Save { reason })?;

        Ok(notice)
    }

    /// Nudges the selected day by `delta`, treating an empty day as zero.
    /// A zero delta does nothing, not even a save.
    pub fn adjust_value<S: Surface, P: ProfileStore>(
        &mut self,
        surface: &mut S,
        profile: &mut Profile,
        settings: &GraphSettings,
        store: &mut P,
        delta: i64,
    ) -> Result<Option<ClampedNotice>, GraphError> {
        if delta == 0 {
            return Ok(None);
        }
        let day = self.selected_day.ok_or(GraphError::InvalidSelection)?;
        let current = profile.value_at(day).map_or(0, i64::from);
        self.set_value(surface, profile, settings, store, Some(current + delta))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::graph::{GraphConfig, draw_bar_graph};
    use crate::surface::ShapeSurface;

    #[derive(Default)]
    struct MemoryStore {
        saves: usize,
        last: Option<Profile>,
    }

    impl ProfileStore for MemoryStore {
        fn save_profile(&mut self, profile: &Profile) -> Result<(), String> {
            self.saves += 1;
            self.last = Some(profile.clone());
            Ok(())
        }
    }

    struct FailingStore;

    impl ProfileStore for FailingStore {
        fn save_profile(&mut self, _profile: &Profile) -> Result<(), String> {
            Err("disk full".to_string())
        }
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    }

    struct Fixture {
        surface: ShapeSurface,
        profile: Profile,
        settings: GraphSettings,
        selection: Selection,
    }

    fn fixture(values: Vec<Option<u32>>) -> Fixture {
        let mut surface = ShapeSurface::new(0.0, 0.0);
        let mut profile = Profile::new("p", monday());
        profile.values = values;
        let mut settings = GraphSettings::from_config(GraphConfig::default());
        let outcome =
            draw_bar_graph(&mut surface, &mut profile, &mut settings, today()).unwrap();
        let mut selection = Selection::default();
        selection
            .select(&mut surface, outcome.today_cell.unwrap())
            .unwrap();
        Fixture {
            surface,
            profile,
            settings,
            selection,
        }
    }

    #[test]
    fn test_select_rejects_untagged_cells() {
        let mut f = fixture(vec![Some(1)]);
        let stray = f.surface.place_rect(crate::surface::RectSpec {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            fill: None,
            stroke: None,
        });

        let err = f.selection.select(&mut f.surface, stray).unwrap_err();
        assert_eq!(err, GraphError::InvalidSelection);
        // prior selection survives a failed select
        assert_eq!(f.selection.selected_day(), Some(2));
    }

    #[test]
    fn test_select_replaces_the_overlay() {
        let mut f = fixture(vec![Some(1)]);
        let before = f.surface.rect_count();

        let other = f.surface.cell_for_day(1).unwrap();
        f.selection.select(&mut f.surface, other).unwrap();

        assert_eq!(f.surface.rect_count(), before);
        assert_eq!(f.selection.selected_day(), Some(1));
    }

    #[test]
    fn test_move_validates_the_distance() {
        let mut f = fixture(vec![Some(1)]);
        let err = f
            .selection
            .move_selection(&mut f.surface, &mut f.profile, &mut f.settings, today(), 2)
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument(_)));
    }

    #[test]
    fn test_move_backward_stops_at_day_zero() {
        let mut f = fixture(vec![Some(1)]);
        let first = f.surface.cell_for_day(0).unwrap();
        f.selection.select(&mut f.surface, first).unwrap();
        let rects_before = f.surface.rect_count();

        let moved = f
            .selection
            .move_selection(&mut f.surface, &mut f.profile, &mut f.settings, today(), -1)
            .unwrap();

        assert!(!moved);
        assert_eq!(f.selection.selected_day(), Some(0));
        assert_eq!(f.surface.rect_count(), rects_before);
        assert_eq!(f.profile.values.len(), 7);
    }

    #[test]
    fn test_move_forward_within_the_week() {
        let mut f = fixture(vec![Some(1)]);

        let moved = f
            .selection
            .move_selection(&mut f.surface, &mut f.profile, &mut f.settings, today(), 1)
            .unwrap();

        assert!(moved);
        assert_eq!(f.selection.selected_day(), Some(3));
        assert_eq!(f.profile.values.len(), 7);
    }

    #[test]
    fn test_move_past_the_frontier_grows_one_week() {
        let mut f = fixture(vec![Some(1)]);
        let last = f.surface.cell_for_day(6).unwrap();
        f.selection.select(&mut f.surface, last).unwrap();

        let moved = f
            .selection
            .move_selection(&mut f.surface, &mut f.profile, &mut f.settings, today(), 1)
            .unwrap();

        assert!(moved);
        assert_eq!(f.profile.values.len(), 14);
        assert_eq!(f.selection.selected_day(), Some(7));
        assert!(f.profile.values[7..].iter().all(|v| v.is_none()));
        assert_eq!(f.settings.resume.unwrap().next_index, 14);
    }

    #[test]
    fn test_set_value_updates_cell_and_saves() {
        let mut f = fixture(vec![Some(1)]);
        let mut store = MemoryStore::default();

        let notice = f
            .selection
            .set_value(
                &mut f.surface,
                &mut f.profile,
                &f.settings,
                &mut store,
                Some(9),
            )
            .unwrap();

        assert!(notice.is_none());
        assert_eq!(f.profile.values[2], Some(9));
        assert_eq!(store.saves, 1);
        assert_eq!(store.last.as_ref().unwrap().values[2], Some(9));

        let cell = f.surface.cell_for_day(2).unwrap();
        let rect = f.surface.rect(cell).unwrap();
        assert_eq!(rect.height, f.settings.pom_height * 9.0);
        assert_eq!(rect.fill, Some(f.settings.colors[9]));
        assert_eq!(
            rect.y + rect.height,
            f.settings.baseline
        );
    }

    #[test]
    fn test_set_value_clamps_and_reports() {
        let mut f = fixture(vec![Some(1)]);
        let mut store = MemoryStore::default();

        let notice = f
            .selection
            .set_value(
                &mut f.surface,
                &mut f.profile,
                &f.settings,
                &mut store,
                Some(1000),
            )
            .unwrap()
            .unwrap();

        assert_eq!(notice.requested, 1000);
        assert_eq!(notice.max, f.settings.max_value());
        assert_eq!(f.profile.values[2], Some(f.settings.max_value()));
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_set_value_negative_clears_the_day() {
        let mut f = fixture(vec![Some(1), Some(2), Some(3)]);
        let mut store = MemoryStore::default();

        let notice = f
            .selection
            .set_value(
                &mut f.surface,
                &mut f.profile,
                &f.settings,
                &mut store,
                Some(-4),
            )
            .unwrap();

        assert!(notice.is_none());
        assert_eq!(f.profile.values[2], None);
        let cell = f.surface.cell_for_day(2).unwrap();
        let rect = f.surface.rect(cell).unwrap();
        assert_eq!(rect.fill, None);
        assert_eq!(rect.height, f.settings.slot_height());
    }

    #[test]
    fn test_set_value_none_clears_too() {
        let mut f = fixture(vec![Some(1), Some(2), Some(3)]);
        let mut store = MemoryStore::default();

        f.selection
            .set_value(&mut f.surface, &mut f.profile, &f.settings, &mut store, None)
            .unwrap();

        assert_eq!(f.profile.values[2], None);
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_set_value_surfaces_store_failures() {
        let mut f = fixture(vec![Some(1)]);

        let err = f
            .selection
            .set_value(
                &mut f.surface,
                &mut f.profile,
                &f.settings,
                &mut FailingStore,
                Some(3),
            )
            .unwrap_err();

        assert_eq!(
            err,
            GraphError::Save {
                reason: "disk full".to_string()
            }
        );
    }

    #[test]
    fn test_adjust_zero_is_a_complete_no_op() {
        let mut f = fixture(vec![Some(1), Some(2), Some(3)]);
        let mut store = MemoryStore::default();
        let values_before = f.profile.values.clone();

        let notice = f
            .selection
            .adjust_value(&mut f.surface, &mut f.profile, &f.settings, &mut store, 0)
            .unwrap();

        assert!(notice.is_none());
        assert_eq!(store.saves, 0);
        assert_eq!(f.profile.values, values_before);
    }

    #[test]
    fn test_adjust_starts_empty_days_at_zero() {
        let mut f = fixture(vec![Some(1), Some(2)]);
        let mut store = MemoryStore::default();

        // day 2 is an empty placeholder
        f.selection
            .adjust_value(&mut f.surface, &mut f.profile, &f.settings, &mut store, 1)
            .unwrap();

        assert_eq!(f.profile.values[2], Some(1));
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_adjust_below_zero_clears() {
        let mut f = fixture(vec![Some(1), Some(2), Some(3)]);
        let mut store = MemoryStore::default();

        f.selection
            .adjust_value(&mut f.surface, &mut f.profile, &f.settings, &mut store, -5)
            .unwrap();

        assert_eq!(f.profile.values[2], None);
    }
}
