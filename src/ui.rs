use std::{
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::Receiver,
        Arc,
    },
    time::{Duration, Instant},
};

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, Borders, Cell, Paragraph, Row, Table,
    },
    Frame, Terminal,
};

use crate::app::App;
use crate::constants::{TICK_RATE_MS, WINDOW_POINTS};
use crate::error::Result;
use crate::metrics::Reading;
use crate::util::format_value;

pub fn run(app: App, rx: Receiver<Reading>, running: Arc<AtomicBool>) -> Result<()> {
    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app_loop(&mut terminal, app, rx, running);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    rx: Receiver<Reading>,
    running: Arc<AtomicBool>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(TICK_RATE_MS);

    loop {
        if !running.load(Ordering::SeqCst) {
            return Ok(());
        }

        terminal.draw(|f| draw(f, &app))?;

        // Handle input
        let timeout = tick_rate
            .checked_sub(app.last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                let quit = matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                    || (key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL));
                if quit {
                    return Ok(());
                }
            }
        }

        if app.last_tick.elapsed() >= tick_rate {
            app.drain(&rx);
            app.last_tick = Instant::now();
        }
    }
}

fn draw(f: &mut Frame, app: &App) {
    // ============= whole screen layout ============
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints(
            [
                Constraint::Min(10),   // Chart
                Constraint::Length(4), // Summary Table
                Constraint::Length(1), // Bottom Status Bar
            ]
            .as_ref(),
        )
        .split(f.size());

    // ============= Metric Chart ============
    // Axes are fixed at setup: x over window positions, y over the
    // percentage range. Never rescaled.
    let x_limit = (WINDOW_POINTS - 1) as f64;
    let series = app.series();

    let chart = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Monitor [{}] ", app.tag))
                .border_type(ratatui::widgets::BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .marker(Marker::Braille)
        .x_bounds([0.0, x_limit])
        .y_bounds([0.0, 100.0])
        .paint(|ctx| {
            // Connect adjacent window positions only; a failed reading
            // breaks the line into a visible gap.
            for pair in series.windows(2) {
                let (x1, y1) = pair[0];
                let (x2, y2) = pair[1];
                if x2 - x1 == 1.0 {
                    ctx.draw(&CanvasLine {
                        x1,
                        y1,
                        x2,
                        y2,
                        color: Color::Blue,
                    });
                }
            }
            ctx.draw(&Points {
                coords: &series,
                color: Color::LightBlue,
            });
        });
    f.render_widget(chart, main_chunks[0]);

    // ============= Summary Table ============
    let header_cells = ["Tag", "Unit", "Value"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::Rgb(40, 40, 40)))
        .height(1)
        .bottom_margin(0);

    let latest = app.latest_value();
    let value_color = if latest.is_some() { Color::Green } else { Color::Red };
    let rows = [Row::new(vec![
        Cell::from(app.tag.to_string()),
        Cell::from(app.tag.unit()),
        Cell::from(format_value(latest)).style(Style::default().fg(value_color)),
    ])
    .height(1)];

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(40),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(" Latest Reading ")
            .borders(Borders::ALL)
            .border_type(ratatui::widgets::BorderType::Rounded),
    );
    f.render_widget(table, main_chunks[1]);

    // ============ Bottom Status Bar ============
    let now = Local::now().format("%F %H:%M:%S").to_string();
    let status_content = Line::from(vec![
        Span::styled(
            " MONITOR ",
            Style::default()
                .bg(Color::White)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled("Time: ", Style::default().fg(Color::DarkGray)),
        Span::raw(now),
        Span::raw(" | Press 'q' to quit"),
    ]);

    let status_bar = Paragraph::new(status_content).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(status_bar, main_chunks[2]);
}
