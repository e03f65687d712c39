use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppState};
use crate::fire::{render_fire, FIRE_HEIGHT};
use crate::session::CharStatus;

const HORIZONTAL_MARGIN: u16 = 5;
const CHART_WIDTH: u32 = 25;

/// Top-level dispatcher: one screen per app state.
pub fn draw(app: &App, f: &mut Frame) {
    match app.state {
        AppState::Typing | AppState::Results => f.render_widget(app, f.area()),
        AppState::Stats => render_stats(app, f),
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Results => render_results(self, area, buf),
            _ => render_typing(self, area, buf),
        }
    }
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let theme = &app.theme;
    let session = &app.session;

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let correct_style = bold.fg(theme.correct);
    let incorrect_style = bold.fg(theme.incorrect);
    let dim_style = Style::default().fg(theme.untyped);
    let cursor_style = Style::default()
        .fg(theme.cursor)
        .add_modifier(Modifier::UNDERLINED | Modifier::BOLD);

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let target_width = session.target().width() as u16;
    let prompt_occupied_lines = if target_width <= max_chars_per_line {
        1
    } else {
        (f64::from(target_width) / f64::from(max_chars_per_line)).ceil() as u16 + 1
    };

    // fire + live wpm + spacer above the prompt
    let header_lines = FIRE_HEIGHT as u16 + 2;
    let top_pad = area
        .height
        .saturating_sub(prompt_occupied_lines + header_lines)
        / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(top_pad),
            Constraint::Length(FIRE_HEIGHT as u16),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(prompt_occupied_lines),
            Constraint::Min(0),
        ])
        .split(area);

    let fire = Paragraph::new(render_fire(app.fire_frame, app.fire_level()))
        .alignment(Alignment::Center);
    fire.render(chunks[1], buf);

    let live = match session.recent_wpm() {
        Some(wpm) => wpm.to_string(),
        None => "--".to_string(),
    };
    let live_wpm = Paragraph::new(Span::styled(
        live,
        Style::default().fg(theme.streak_color(app.fire_level())),
    ))
    .alignment(Alignment::Center);
    live_wpm.render(chunks[2], buf);

    let mut spans = Vec::with_capacity(session.char_count());
    for idx in 0..session.char_count() {
        let Some(c) = session.char_at(idx) else {
            break;
        };

        let span = match session.char_status(idx) {
            CharStatus::Correct => Span::styled(c.to_string(), correct_style),
            CharStatus::Incorrect => Span::styled(
                // make a missed space visible
                match c {
                    ' ' => "·".to_string(),
                    c => c.to_string(),
                },
                incorrect_style,
            ),
            CharStatus::Untyped => {
                if idx == session.cursor() {
                    Span::styled(c.to_string(), cursor_style)
                } else {
                    Span::styled(c.to_string(), dim_style)
                }
            }
        };
        spans.push(span);
    }

    let prompt = Paragraph::new(Line::from(spans))
        .alignment(if prompt_occupied_lines == 1 {
            // single-line targets read best centered
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true });
    prompt.render(chunks[4], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let theme = &app.theme;
    let session = &app.session;

    let headline_style = Style::default()
        .fg(theme.fg)
        .bg(theme.result_bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(theme.untyped);

    let mut lines = vec![Line::from(Span::styled(
        format!("  WPM: {}   ACC: {}%  ", session.wpm(), session.accuracy()),
        headline_style,
    ))];

    if let Some(elapsed) = session.elapsed() {
        lines.push(Line::from(Span::styled(
            format!("{:.1}s", elapsed.as_secs_f64()),
            dim_style,
        )));
    }

    if let Some((best_wpm, best_accuracy)) = app.bests {
        let best_style = Style::default().fg(theme.correct);
        lines.push(Line::from(Span::styled(
            format!("best {} wpm / {}% acc", best_wpm, best_accuracy),
            best_style,
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "(enter) next  (s) stats  (esc) quit",
        dim_style.add_modifier(Modifier::ITALIC),
    )));

    let top_pad = area.height.saturating_sub(lines.len() as u16) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(top_pad),
            Constraint::Length(lines.len() as u16),
            Constraint::Min(0),
        ])
        .split(area);

    let results = Paragraph::new(lines).alignment(Alignment::Center);
    results.render(chunks[1], buf);
}

fn render_stats(app: &App, f: &mut Frame) {
    let theme = &app.theme;
    let snapshot = app.stats_view.clone().unwrap_or_default();

    let title_style = Style::default().fg(theme.fg).add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(theme.untyped);
    let value_style = Style::default().fg(theme.correct);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let title = Paragraph::new(Span::styled("Typing Statistics", title_style));
    f.render_widget(title, chunks[0]);

    let mut best_lines = vec![
        Line::from(Span::styled("Personal Bests", title_style)),
        Line::from(Span::styled("--------------", dim_style)),
        Line::from(vec![
            Span::styled("WPM:      ", Style::default().fg(theme.fg)),
            Span::styled(snapshot.best_wpm.to_string(), value_style),
        ]),
        Line::from(vec![
            Span::styled("Accuracy: ", Style::default().fg(theme.fg)),
            Span::styled(format!("{}%", snapshot.best_accuracy), value_style),
        ]),
    ];
    if let Some(last) = snapshot.last_session {
        best_lines.push(Line::from(Span::styled(
            format!("last session {}", last.format("%Y-%m-%d %H:%M")),
            dim_style,
        )));
    }
    f.render_widget(Paragraph::new(best_lines), chunks[1]);

    let mut daily_lines = vec![
        Line::from(Span::styled("Last 7 Days", title_style)),
        Line::from(Span::styled("-----------", dim_style)),
    ];
    if snapshot.daily.is_empty() {
        daily_lines.push(Line::from(Span::styled("No data yet", dim_style)));
    } else {
        daily_lines.extend(daily_chart_lines(app, &snapshot.daily));
    }
    f.render_widget(Paragraph::new(daily_lines), chunks[2]);

    let help = Paragraph::new(Span::styled("(esc) back", dim_style));
    f.render_widget(help, chunks[3]);
}

fn daily_chart_lines(app: &App, daily: &[crate::stats::DailyAverage]) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let max = daily.iter().map(|d| d.avg_wpm).max().unwrap_or(0).max(1);

    daily
        .iter()
        .map(|d| {
            let bar_len = (d.avg_wpm * CHART_WIDTH / max) as usize;
            Line::from(vec![
                Span::styled(format!("{}  ", d.date), Style::default().fg(theme.fg)),
                Span::styled("█".repeat(bar_len), Style::default().fg(theme.correct)),
                Span::styled(
                    format!(" {} wpm ({})", d.avg_wpm, d.sessions),
                    Style::default().fg(theme.untyped),
                ),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::StatsSnapshot;
    use crate::stats::DailyAverage;
    use crate::theme::TOKYO_NIGHT;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_content(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn test_app(target: &str) -> App {
        App::with_db(TOKYO_NIGHT, Some(target.to_string()), None)
    }

    #[test]
    fn typing_screen_shows_target_and_placeholder_wpm() {
        let app = test_app("hello world");
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|f| draw(&app, f)).unwrap();

        let content = buffer_content(&terminal);
        assert!(content.contains("hello world"));
        assert!(content.contains("--"));
    }

    #[test]
    fn results_screen_shows_final_figures() {
        let mut app = test_app("hi");
        app.type_char('h');
        app.type_char('i');

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(&app, f)).unwrap();

        let content = buffer_content(&terminal);
        assert!(content.contains("WPM:"));
        assert!(content.contains("ACC: 100%"));
        assert!(content.contains("(enter) next"));
    }

    #[test]
    fn stats_screen_renders_bests_and_chart() {
        let mut app = test_app("hi");
        app.open_stats();
        app.stats_view = Some(StatsSnapshot {
            best_wpm: 82,
            best_accuracy: 100,
            daily: vec![
                DailyAverage {
                    date: "2026-08-27".into(),
                    avg_wpm: 60,
                    sessions: 3,
                },
                DailyAverage {
                    date: "2026-08-26".into(),
                    avg_wpm: 30,
                    sessions: 1,
                },
            ],
            last_session: None,
        });

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(&app, f)).unwrap();

        let content = buffer_content(&terminal);
        assert!(content.contains("Personal Bests"));
        assert!(content.contains("82"));
        assert!(content.contains("2026-08-27"));
        assert!(content.contains("█"));
    }

    #[test]
    fn stats_screen_without_data_says_so() {
        let mut app = test_app("hi");
        app.open_stats();

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(&app, f)).unwrap();

        assert!(buffer_content(&terminal).contains("No data yet"));
    }

    #[test]
    fn rendering_is_idempotent_for_the_same_state() {
        let mut app = test_app("hello");
        app.type_char('h');
        app.type_char('x');

        let mut first = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut second = Terminal::new(TestBackend::new(60, 20)).unwrap();
        first.draw(|f| draw(&app, f)).unwrap();
        second.draw(|f| draw(&app, f)).unwrap();

        assert_eq!(first.backend().buffer(), second.backend().buffer());
    }

    #[test]
    fn small_terminal_does_not_panic() {
        let app = test_app("the quick brown fox jumps over the lazy dog");
        let mut terminal = Terminal::new(TestBackend::new(12, 4)).unwrap();
        terminal.draw(|f| draw(&app, f)).unwrap();
    }
}
