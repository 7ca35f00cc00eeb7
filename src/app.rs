use std::{io, time::Duration};

use chrono::{Local, NaiveDate};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use itertools::Itertools;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{
    calendar,
    constants::UI_SETTINGS,
    domain::Profile,
    graph::{self, Direction, GraphConfig, GraphError, GraphSettings},
    selection::Selection,
    storage::{self, JsonProfileStore},
    surface::{ShapeSurface, Surface},
};

mod event_handlers;
mod render_views;

struct Status {
    text: String,
    is_error: bool,
}

struct App {
    store: JsonProfileStore,
    profile: Profile,
    profile_index: usize,
    surface: ShapeSurface,
    settings: GraphSettings,
    selection: Selection,
    status: Status,
    today: NaiveDate,
    direction: Direction,
    month_gap: bool,
    render_needed: bool,
}

impl App {
    fn new() -> Self {
        let store = JsonProfileStore::open(storage::get_profiles_path());
        let profile = store.profile_at(0).unwrap_or_else(|| {
            Profile::new(
                "default",
                calendar::week_start(Local::now().date_naive()),
            )
        });
        let profile_list = store.names().iter().join(", ");

        let mut app = Self {
            store,
            profile,
            profile_index: 0,
            surface: ShapeSurface::new(0.0, 0.0),
            settings: GraphSettings::from_config(GraphConfig::default()),
            selection: Selection::default(),
            status: Status {
                text: String::new(),
                is_error: false,
            },
            today: Local::now().date_naive(),
            direction: Direction::BottomUp,
            month_gap: false,
            render_needed: true,
        };

        app.redraw_profile();
        if !app.status.is_error {
            app.report_info(format!("Loaded profiles: {}", profile_list));
        }
        app
    }

    fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            pom_height: UI_SETTINGS.pom_height,
            pom_width: UI_SETTINGS.pom_width,
            max_pom: UI_SETTINGS.max_pom,
            direction: self.direction,
            month_gap: self.month_gap,
            ..GraphConfig::default()
        }
    }

    /// Full redraw: fresh settings, cleared surface, selection re-resolved
    /// from the draw outcome.
    fn redraw_profile(&mut self) {
        self.surface.clear();
        self.selection = Selection::default();
        self.settings = GraphSettings::from_config(self.graph_config());

        match graph::draw_bar_graph(
            &mut self.surface,
            &mut self.profile,
            &mut self.settings,
            self.today,
        ) {
            Ok(outcome) => {
                if let Some(cell) = outcome.today_cell {
                    if let Err(err) = self.selection.select(&mut self.surface, cell) {
                        self.report_error(err);
                        return;
                    }
                }
                self.report_info(format!("Drew profile '{}'", self.profile.name));
            }
            Err(err) => self.report_error(err),
        }
    }

    fn cycle_profile(&mut self) {
        if self.store.len() < 2 {
            self.report_info("No other profiles to switch to".to_string());
            return;
        }
        self.profile_index = (self.profile_index + 1) % self.store.len();
        if let Some(profile) = self.store.profile_at(self.profile_index) {
            self.profile = profile;
            self.redraw_profile();
        }
    }

    fn export_profile(&mut self) {
        let json = match storage::serialize_profile(&self.profile) {
            Ok(json) => json,
            Err(reason) => return self.report_error_text(reason),
        };
        let path = storage::get_export_path(&self.profile.name);
        match storage::write_text_file(&path, &json) {
            Ok(()) => {
                self.report_info(format!("Exported profile JSON to {}", path.display()))
            }
            Err(reason) => self.report_error_text(reason),
        }
    }

    fn report_info(&mut self, text: String) {
        self.status = Status {
            text,
            is_error: false,
        };
        self.render_needed = true;
    }

    fn report_error(&mut self, err: GraphError) {
        self.report_error_text(err.to_string());
    }

    fn report_error_text(&mut self, text: String) {
        self.status = Status {
            text: format!("error! {}", text),
            is_error: true,
        };
        self.render_needed = true;
    }
}

pub fn run_ui() -> Result<(), io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    loop {
        if app.render_needed {
            terminal.draw(|f| app.draw_frame(f))?;
            app.render_needed = false;
        }

        if event::poll(Duration::from_millis(UI_SETTINGS.poll_ms))? {
            match event::read()? {
                Event::Key(key) => {
                    if app.handle_key(key) {
                        break;
                    }
                }
                Event::Resize(_, _) => app.render_needed = true,
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
