use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;

impl App {
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> bool {
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left => self.move_selected(-1),
            KeyCode::Right => self.move_selected(1),
            KeyCode::Up => self.adjust_selected(1),
            KeyCode::Down => self.adjust_selected(-1),
            KeyCode::Delete | KeyCode::Backspace if alt => self.set_selected(None),
            KeyCode::Char(c) if alt && c.is_ascii_digit() => {
                self.set_selected(Some((c as u8 - b'0') as i64));
            }
            KeyCode::Tab => self.cycle_profile(),
            KeyCode::Char('m') => {
                self.month_gap = !self.month_gap;
                self.redraw_profile();
            }
            KeyCode::Char('d') => {
                self.direction = self.direction.flipped();
                self.redraw_profile();
            }
            KeyCode::Char('y') => self.export_profile(),
            _ => {}
        }
        false
    }

    fn move_selected(&mut self, delta: i32) {
        let moved = self.selection.move_selection(
            &mut self.surface,
            &mut self.profile,
            &mut self.settings,
            self.today,
            delta,
        );
        match moved {
            Ok(true) => self.report_selected(),
            Ok(false) => {}
            Err(err) => self.report_error(err),
        }
    }

    fn set_selected(&mut self, value: Option<i64>) {
        let result = self.selection.set_value(
            &mut self.surface,
            &mut self.profile,
            &self.settings,
            &mut self.store,
            value,
        );
        match result {
            Ok(Some(notice)) => self.report_info(notice.to_string()),
            Ok(None) => self.report_selected(),
            Err(err) => self.report_error(err),
        }
    }

    fn adjust_selected(&mut self, delta: i64) {
        let result = self.selection.adjust_value(
            &mut self.surface,
            &mut self.profile,
            &self.settings,
            &mut self.store,
            delta,
        );
        match result {
            Ok(Some(notice)) => self.report_info(notice.to_string()),
            Ok(None) => self.report_selected(),
            Err(err) => self.report_error(err),
        }
    }

    fn report_selected(&mut self) {
        if let Some(day) = self.selection.selected_day() {
            let date = self.profile.date_of(day);
            let label = match self.profile.value_at(day) {
                Some(value) => value.to_string(),
                None => "-".to_string(),
            };
            self.report_info(format!("{} = {}", date.format("%a %Y-%m-%d"), label));
        }
    }
}
