use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

use ember::{
    app::{App, AppState},
    config::{ConfigStore, FileConfigStore},
    runtime::{AppEvent, CrosstermEventSource, Runner},
    theme::{Theme, TOKYO_NIGHT},
    ui,
};

/// Animation cadence for the streak fire.
const TICK_RATE_MS: u64 = 150;

/// terminal typing game with streak fire, live wpm, and historical stats
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal typing game: type the sample text, watch your streak catch fire, and track words-per-minute and accuracy across sessions."
)]
pub struct Cli {
    /// custom text to type instead of a built-in sample
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// color theme (persisted for future runs)
    #[clap(short = 't', long, value_enum)]
    theme: Option<SupportedTheme>,

    /// open the statistics view on startup
    #[clap(long)]
    stats: bool,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SupportedTheme {
    TokyoNight,
    Dracula,
    Monokai,
    Nord,
}

impl SupportedTheme {
    fn as_theme(&self) -> Theme {
        Theme::by_name(&self.to_string()).unwrap_or(TOKYO_NIGHT)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    if let Some(chosen) = cli.theme {
        config.theme = chosen.to_string();
        let _ = store.save(&config);
    }
    let theme = Theme::by_name(&config.theme).unwrap_or(TOKYO_NIGHT);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(theme, cli.prompt.clone());
    if cli.stats {
        app.open_stats();
    }

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );

    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        match runner.step() {
            AppEvent::Tick => {
                app.on_tick();

                // Redraw on ticks only while a round is live, so the fire
                // and the decaying live WPM keep moving between keystrokes.
                if app.state == AppState::Typing
                    && app.session.started_at().is_some()
                    && !app.session.is_complete()
                {
                    terminal.draw(|f| ui::draw(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui::draw(app, f))?;
            }
            AppEvent::Key(key) => {
                match key.code {
                    KeyCode::Esc => match app.state {
                        AppState::Stats => app.close_stats(),
                        _ => break,
                    },
                    KeyCode::Enter => {
                        if app.state == AppState::Results {
                            app.new_round();
                        }
                    }
                    KeyCode::Char(c) => {
                        if key.modifiers.contains(KeyModifiers::CONTROL) && c == 'c' {
                            break;
                        }

                        match app.state {
                            AppState::Typing => app.type_char(c),
                            AppState::Results => {
                                if c == 's' {
                                    app.open_stats();
                                }
                            }
                            AppState::Stats => {
                                if c == 'b' {
                                    app.close_stats();
                                }
                            }
                        }
                    }
                    _ => {}
                }
                terminal.draw(|f| ui::draw(app, f))?;
            }
        }
    }

    Ok(())
}
