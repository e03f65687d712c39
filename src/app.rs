use crate::fire;
use crate::samples;
use crate::session::TypingSession;
use crate::stats::{DailyAverage, SessionRecord, StatsDb};
use crate::theme::Theme;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Typing,
    Results,
    Stats,
}

/// Data the stats view renders, captured when the view is opened so
/// repeated renders stay pure.
#[derive(Debug, Clone, Default)]
pub struct StatsSnapshot {
    pub best_wpm: u32,
    pub best_accuracy: u32,
    pub daily: Vec<DailyAverage>,
    pub last_session: Option<DateTime<Local>>,
}

/// Top-level application state: the active session plus everything the
/// screens need around it.
#[derive(Debug)]
pub struct App {
    pub session: TypingSession,
    pub theme: Theme,
    pub state: AppState,
    pub fire_frame: usize,
    /// Personal bests as of the moment the current round completed.
    pub bests: Option<(u32, u32)>,
    pub stats_view: Option<StatsSnapshot>,
    stats_db: Option<StatsDb>,
    custom_target: Option<String>,
    stats_return: AppState,
}

impl App {
    pub fn new(theme: Theme, custom_target: Option<String>) -> Self {
        Self::with_db(theme, custom_target, StatsDb::new().ok())
    }

    /// Construct with an explicit stats store (or none). Tests use this
    /// to point at a tempdir instead of the user's state directory.
    pub fn with_db(theme: Theme, custom_target: Option<String>, stats_db: Option<StatsDb>) -> Self {
        let target = match &custom_target {
            Some(t) => t.clone(),
            None => samples::random_sample().to_string(),
        };

        Self {
            session: TypingSession::new(target),
            theme,
            state: AppState::Typing,
            fire_frame: 0,
            bests: None,
            stats_view: None,
            stats_db,
            custom_target,
            stats_return: AppState::Typing,
        }
    }

    /// Feed one keystroke to the engine. On the transition to complete,
    /// the result is recorded exactly once and the results screen opens.
    pub fn type_char(&mut self, c: char) {
        if self.state != AppState::Typing {
            return;
        }

        if self.session.process_input(c) && self.session.is_complete() {
            self.finish_round();
        }
    }

    fn finish_round(&mut self) {
        let record = SessionRecord::now(self.session.wpm(), self.session.accuracy());

        if let Some(db) = &self.stats_db {
            let _ = db.record_session(&record);
            self.bests = Some((
                db.best_wpm().unwrap_or(record.wpm),
                db.best_accuracy().unwrap_or(record.accuracy),
            ));
        } else {
            self.bests = None;
        }

        self.state = AppState::Results;
    }

    /// Start a new round. A custom target repeats; otherwise a fresh
    /// sample is drawn.
    pub fn new_round(&mut self) {
        let target = match &self.custom_target {
            Some(t) => t.clone(),
            None => samples::random_sample().to_string(),
        };

        self.session = TypingSession::new(target);
        self.state = AppState::Typing;
        self.fire_frame = 0;
        self.bests = None;
    }

    pub fn open_stats(&mut self) {
        let snapshot = match &self.stats_db {
            Some(db) => StatsSnapshot {
                best_wpm: db.best_wpm().unwrap_or(0),
                best_accuracy: db.best_accuracy().unwrap_or(0),
                daily: db.daily_averages(7).unwrap_or_default(),
                last_session: db.last_session_at().unwrap_or(None),
            },
            None => StatsSnapshot::default(),
        };

        self.stats_view = Some(snapshot);
        self.stats_return = self.state;
        self.state = AppState::Stats;
    }

    pub fn close_stats(&mut self) {
        self.stats_view = None;
        self.state = self.stats_return;
    }

    /// Advance the animation clock. Render-only state; the engine is
    /// untouched.
    pub fn on_tick(&mut self) {
        self.fire_frame = self.fire_frame.wrapping_add(1);
    }

    pub fn fire_level(&self) -> usize {
        fire::streak_level(self.session.current_streak())
    }
}
