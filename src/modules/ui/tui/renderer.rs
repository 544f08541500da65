use crate::application::state::UiState;
use crate::core::events::AppEvent;
use crate::core::models::TimerPhase;
use crate::core::traits::UiRenderer;
use crate::modules::ui::dial::{self, point_on_dial};
use crate::modules::ui::keymap::map_key;
use crate::modules::ui::progress_formatter::progress_percentage;
use crate::utils::APP_NAME;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, List, ListItem, ListState, Paragraph,
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
    },
};
use std::io::{Stdout, stdout};
use std::time::Duration;

/// Dial diameter in canvas units.
const DIAL_SIZE: f64 = 100.0;
/// Half of the visible canvas: the label ring plus a margin.
const DIAL_EXTENT: f64 = 56.0;
const RIM_RADIUS: f64 = 44.0;
const SWEEP_RADII: [f64; 3] = [36.0, 38.0, 40.0];
const NEEDLE_RADIUS: f64 = 41.0;

const ACCENT: Color = Color::LightRed;

pub struct TuiRenderer {
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
}

impl TuiRenderer {
    pub fn new() -> Self {
        Self { terminal: None }
    }
}

impl Default for TuiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_ui(f: &mut Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Dial + tasks
            Constraint::Length(3), // Presets
            Constraint::Length(3), // Controls or task input
        ])
        .split(f.area());

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[1]);

    draw_header(f, chunks[0], state);
    draw_dial(f, main[0], state);
    draw_tasks(f, main[1], state);
    draw_presets(f, chunks[2], state);

    if state.input_active {
        draw_input_bar(f, chunks[3], state);
    } else {
        draw_controls(f, chunks[3]);
    }

    if let Some(message) = &state.notice {
        draw_notice(f, message);
    }
}

fn draw_header(f: &mut Frame, area: Rect, state: &UiState) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", APP_NAME),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(state.status_message.as_str(), Style::default().fg(Color::Gray)),
    ];
    if let Some(error) = &state.error_message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(error.as_str(), Style::default().fg(Color::Red)));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_dial(f: &mut Frame, area: Rect, state: &UiState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} {} ", state.phase.symbol(), state.phase));
    let inner = block.inner(area);

    // Terminal cells are about twice as tall as wide; widen the x range to keep the dial round.
    let aspect = if inner.height == 0 {
        1.0
    } else {
        f64::from(inner.width) / (f64::from(inner.height) * 2.0)
    };
    let x_extent = DIAL_EXTENT * aspect.max(1.0);
    let y_extent = DIAL_EXTENT * (1.0 / aspect).max(1.0);
    let units_per_col = if inner.width == 0 {
        0.0
    } else {
        2.0 * x_extent / f64::from(inner.width)
    };

    let angle = state.dial.angle_deg;
    let time_text = state.dial.time_text.clone();
    let sweep_color = if state.phase == TimerPhase::Completed {
        Color::Green
    } else {
        ACCENT
    };

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-x_extent, x_extent])
        .y_bounds([-y_extent, y_extent])
        .paint(move |ctx| {
            paint_face(ctx, units_per_col);
            ctx.layer();
            paint_sweep(ctx, angle, sweep_color);
            ctx.layer();

            let half_width = time_text.chars().count() as f64 * units_per_col / 2.0;
            ctx.print(
                -half_width,
                0.0,
                Span::styled(
                    time_text.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            );
        });
    f.render_widget(canvas, area);
}

fn paint_face(ctx: &mut Context, units_per_col: f64) {
    ctx.draw(&Circle {
        x: 0.0,
        y: 0.0,
        radius: RIM_RADIUS,
        color: Color::DarkGray,
    });

    for tick in dial::tick_marks(DIAL_SIZE) {
        let inner = if tick.major { 0.88 } else { 0.95 };
        ctx.draw(&CanvasLine {
            x1: tick.x * inner,
            y1: tick.y * inner,
            x2: tick.x,
            y2: tick.y,
            color: if tick.major { Color::Gray } else { Color::DarkGray },
        });
    }

    for label in dial::minute_labels(DIAL_SIZE) {
        let half_width = label.text.len() as f64 * units_per_col / 2.0;
        ctx.print(
            label.x * 1.08 - half_width,
            label.y * 1.08,
            Span::styled(label.text, Style::default().fg(Color::Gray)),
        );
    }
}

fn paint_sweep(ctx: &mut Context, angle_deg: f64, color: Color) {
    for radius in SWEEP_RADII {
        let coords = dial::sweep_arc(angle_deg, radius, 1.5);
        ctx.draw(&Points {
            coords: &coords,
            color,
        });
    }

    let (x, y) = point_on_dial(angle_deg, NEEDLE_RADIUS);
    ctx.draw(&CanvasLine {
        x1: 0.0,
        y1: 0.0,
        x2: x,
        y2: y,
        color: Color::White,
    });
}

fn draw_tasks(f: &mut Frame, area: Rect, state: &UiState) {
    let items: Vec<ListItem> = if state.tasks.is_empty() {
        vec![ListItem::new(Span::styled(
            "No tasks yet. Press a to add one.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        state
            .tasks
            .iter()
            .enumerate()
            .map(|(i, task)| ListItem::new(format!("{:2}. {}", i + 1, task)))
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Tasks ({}) ", state.tasks.len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default().with_selected(state.selected_task);
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_presets(f: &mut Frame, area: Rect, state: &UiState) {
    let mut spans = Vec::new();
    for (i, minutes) in state.presets.iter().take(9).enumerate() {
        let style = if *minutes == state.selected_minutes {
            Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {}:{}m ", i + 1, minutes), style));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::raw("   "));
    spans.push(Span::styled(
        format!("[space] {}", state.button_label),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw(format!("   {}%", progress_percentage(state.progress))));
    if !state.sound {
        spans.push(Span::styled("   muted", Style::default().fg(Color::DarkGray)));
    }

    let presets = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Presets "));
    f.render_widget(presets, area);
}

fn draw_controls(f: &mut Frame, area: Rect) {
    let controls = Paragraph::new(Line::from(vec![
        Span::raw("1-9: Preset • "),
        Span::styled("Space: Start/Pause • ", Style::default().fg(Color::Yellow)),
        Span::raw("r: Reset • "),
        Span::raw("a: Add task • "),
        Span::raw("d: Delete • "),
        Span::raw("↑/↓: Select • "),
        Span::raw("q: Quit"),
    ]))
    .style(Style::default().fg(Color::Gray))
    .block(Block::default().borders(Borders::ALL).title(" Controls "));
    f.render_widget(controls, area);
}

fn draw_input_bar(f: &mut Frame, area: Rect, state: &UiState) {
    let input = Paragraph::new(Line::from(vec![
        Span::styled("New task: ", Style::default().fg(Color::Yellow)),
        Span::styled(state.input_buffer.as_str(), Style::default().fg(Color::White)),
        Span::styled("█", Style::default().fg(Color::Gray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Enter: Save • Esc: Cancel • Ctrl+U: Clear "),
    );
    f.render_widget(input, area);
}

fn draw_notice(f: &mut Frame, message: &str) {
    let area = centered_rect(50, 25, f.area());
    f.render_widget(Clear, area);

    let notice = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled("Enter/Esc: OK", Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Done "),
    );
    f.render_widget(notice, area);
}

impl UiRenderer for TuiRenderer {
    fn init(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        self.terminal = Some(Terminal::new(backend)?);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode()?;
        if let Some(mut terminal) = self.terminal.take() {
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
            terminal.show_cursor()?;
        }
        Ok(())
    }

    fn render(&mut self, state: &UiState) -> Result<()> {
        if let Some(terminal) = &mut self.terminal {
            terminal.draw(|f| draw_ui(f, state))?;
        }
        Ok(())
    }

    fn poll_input(&mut self, state: &UiState) -> Result<Vec<AppEvent>> {
        let mut events = Vec::new();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    events.extend(map_key(key, state));
                }
            }
            // Later keys see stale state; leave them for the next pass.
            if !events.is_empty() {
                break;
            }
        }

        Ok(events)
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn render_to_text(state: &UiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|f| draw_ui(f, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn shows_readout_tasks_and_presets() {
        let mut state = UiState::default();
        state.dial.time_text = "24:59".to_string();
        state.dial.angle_deg = 120.0;
        state.tasks = vec!["Write report".to_string()];
        state.selected_task = Some(0);

        let screen = render_to_text(&state);
        assert!(screen.contains("24:59"));
        assert!(screen.contains("Write report"));
        assert!(screen.contains("1:25m"));
        assert!(screen.contains("Start"));
    }

    #[test]
    fn notice_is_drawn_over_everything() {
        let state = UiState {
            notice: Some("Session complete. Great work.".to_string()),
            ..UiState::default()
        };
        assert!(render_to_text(&state).contains("Session complete. Great work."));
    }

    #[test]
    fn centered_rect_stays_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(50, 25, outer);
        assert!(inner.x >= outer.x && inner.right() <= outer.right());
        assert!(inner.y >= outer.y && inner.bottom() <= outer.bottom());
    }
}
