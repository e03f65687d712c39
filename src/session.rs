use std::time::{Duration, Instant};

/// 5-characters-per-word convention used by every WPM figure.
const WORD_LEN: f64 = 5.0;

/// Rolling-window bounds for the live speed readout, in keystrokes.
const RECENT_MIN_KEYSTROKES: usize = 5;
const RECENT_MAX_KEYSTROKES: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Untyped,
    Correct,
    Incorrect,
}

/// One attempt at typing a fixed target string.
///
/// Input is append-only: every processed keystroke judges exactly one
/// character and the judgment is never revised. Once the cursor reaches
/// the end of the target the session is terminal and read-only.
#[derive(Clone, Debug)]
pub struct TypingSession {
    target: String,
    chars: Vec<char>,
    statuses: Vec<CharStatus>,
    timestamps: Vec<Instant>,
    cursor: usize,
    current_streak: usize,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
}

impl TypingSession {
    pub fn new(target: impl Into<String>) -> Self {
        let target = target.into();
        let chars: Vec<char> = target.chars().collect();
        let statuses = vec![CharStatus::Untyped; chars.len()];

        Self {
            target,
            chars,
            statuses,
            timestamps: Vec::new(),
            cursor: 0,
            current_streak: 0,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of characters judged so far; index of the next character.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn char_count(&self) -> usize {
        self.chars.len()
    }

    /// Status of the character at `idx`. Out-of-range reads are defined
    /// as `Untyped` rather than an error.
    pub fn char_status(&self, idx: usize) -> CharStatus {
        self.statuses.get(idx).copied().unwrap_or(CharStatus::Untyped)
    }

    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    /// Consecutive correct keystrokes since the last miss.
    pub fn current_streak(&self) -> usize {
        self.current_streak
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.chars.len()
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<Instant> {
        self.finished_at
    }

    /// Wall-clock time spanned by the finished session.
    pub fn elapsed(&self) -> Option<Duration> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end.saturating_duration_since(start)),
            _ => None,
        }
    }

    fn correct_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|s| **s == CharStatus::Correct)
            .count()
    }

    /// Judge a single keystroke. Returns `false` (and changes nothing)
    /// once the session is complete.
    pub fn process_input(&mut self, c: char) -> bool {
        self.process_input_at(c, Instant::now())
    }

    /// Same as [`process_input`](Self::process_input) with an explicit
    /// instant, so tests can pin keystroke spacing exactly.
    pub fn process_input_at(&mut self, c: char, now: Instant) -> bool {
        if self.is_complete() {
            return false;
        }

        if self.started_at.is_none() {
            self.started_at = Some(now);
        }

        if c == self.chars[self.cursor] {
            self.statuses[self.cursor] = CharStatus::Correct;
            self.current_streak += 1;
        } else {
            self.statuses[self.cursor] = CharStatus::Incorrect;
            self.current_streak = 0;
        }

        self.cursor += 1;
        self.timestamps.push(now);

        if self.cursor == self.chars.len() {
            self.finished_at = Some(now);
        }

        true
    }

    /// Percentage of judged characters that were correct, rounded to the
    /// nearest integer. A session with no input yet reads as 100.
    pub fn accuracy(&self) -> u32 {
        if self.cursor == 0 {
            return 100;
        }

        let pct = (self.correct_count() as f64 / self.cursor as f64) * 100.0;
        pct.round() as u32
    }

    /// Net words per minute: only correct characters count. While the
    /// session is in progress this reads against "now", so live displays
    /// update without any engine-side ticking.
    pub fn wpm(&self) -> u32 {
        self.wpm_at(Instant::now())
    }

    pub fn wpm_at(&self, now: Instant) -> u32 {
        let Some(start) = self.started_at else {
            return 0;
        };
        let end = self.finished_at.unwrap_or(now);

        let elapsed = end.saturating_duration_since(start);
        if elapsed.is_zero() {
            return 0;
        }

        let minutes = elapsed.as_secs_f64() / 60.0;
        let words = self.correct_count() as f64 / WORD_LEN;
        (words / minutes).round() as u32
    }

    /// WPM over a trailing window of the most recent keystrokes,
    /// correct or not. `None` until enough keystrokes have landed (or
    /// when the window spans no measurable time), which callers render
    /// as a "--" placeholder.
    pub fn recent_wpm(&self) -> Option<u32> {
        if self.timestamps.len() < RECENT_MIN_KEYSTROKES {
            return None;
        }

        let window_size = self.timestamps.len().min(RECENT_MAX_KEYSTROKES);
        let window = &self.timestamps[self.timestamps.len() - window_size..];

        let span = window[window_size - 1].saturating_duration_since(window[0]);
        if span.is_zero() {
            return None;
        }

        // The window measures the time to type window_size - 1 characters
        // after the first one, so intervals are what count.
        let intervals = (window_size - 1) as f64;
        let minutes = span.as_secs_f64() / 60.0;
        Some(((intervals / WORD_LEN) / minutes).round() as u32)
    }
}
