use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    symbols,
    widgets::{
        Block, BorderType, Borders, Paragraph,
        canvas::{Canvas, Line as CanvasLine, Rectangle},
    },
};

use super::App;
use crate::surface::Surface;

impl App {
    pub(super) fn draw_frame(&mut self, f: &mut Frame) {
        let size = f.size();
        let chunks = Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let (canvas_w, canvas_h) = self.surface.canvas_size();
        let w = canvas_w.max(1.0);
        let h = canvas_h.max(1.0);

        let border_color = self
            .selection
            .selected_day()
            .and_then(|day| self.profile.value_at(day))
            .and_then(|value| self.settings.colors.get(value as usize).copied())
            .unwrap_or(Color::White);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(
                Line::from(Span::styled(
                    self.profile.name.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Left),
            )
            .title(
                Line::from(Span::styled(
                    self.today.format("%a %Y-%m-%d").to_string(),
                    Style::default().fg(Color::White),
                ))
                .alignment(Alignment::Right),
            )
            .border_style(Style::default().fg(border_color));

        let surface = &self.surface;
        let canvas = Canvas::default()
            .block(block)
            .marker(symbols::Marker::Braille)
            .x_bounds([0.0, w])
            .y_bounds([0.0, h])
            .paint(move |ctx| {
                for line in surface.lines() {
                    ctx.draw(&CanvasLine {
                        x1: line.from.0,
                        y1: h - line.from.1,
                        x2: line.to.0,
                        y2: h - line.to.1,
                        color: dim(line.color, line.opacity),
                    });
                }
                for rect in surface.rects() {
                    // surface y grows downward, canvas y grows upward
                    let y = h - rect.y - rect.height;
                    if let Some(fill) = rect.fill {
                        let mut row = y;
                        while row < y + rect.height {
                            ctx.draw(&CanvasLine {
                                x1: rect.x,
                                y1: row,
                                x2: rect.x + rect.width,
                                y2: row,
                                color: fill,
                            });
                            row += 2.0;
                        }
                    }
                    if let Some(stroke) = rect.stroke {
                        ctx.draw(&Rectangle {
                            x: rect.x,
                            y,
                            width: rect.width,
                            height: rect.height,
                            color: stroke,
                        });
                    }
                }
            });
        f.render_widget(canvas, chunks[0]);

        let status_style = if self.status.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };
        let status = Paragraph::new(self.status.text.clone()).style(status_style);
        f.render_widget(status, chunks[1]);
    }
}

fn dim(color: Color, opacity: f64) -> Color {
    let scale = |channel: u8| (channel as f64 * opacity) as u8;
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(scale(r), scale(g), scale(b)),
        _ => {
            let shade = (255.0 * opacity) as u8;
            Color::Rgb(shade, shade, shade)
        }
    }
}
