use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use ember::app::{App, AppState};
use ember::runtime::{AppEvent, Runner, TestEventSource};
use ember::theme::TOKYO_NIGHT;

// Headless integration using the internal runtime + App without a TTY.
// Verifies that a minimal typing flow completes via Runner/TestEventSource.
#[test]
fn headless_typing_flow_completes() {
    let mut app = App::with_db(TOKYO_NIGHT, Some("hi".to_string()), None);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(5));

    for c in ['h', 'i'] {
        tx.send(AppEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::NONE,
        )))
        .unwrap();
    }

    // Drive a tiny event loop until finished (or bounded steps)
    for _ in 0..100u32 {
        match runner.step() {
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if let KeyCode::Char(c) = key.code {
                    app.type_char(c);
                    if app.session.is_complete() {
                        break;
                    }
                }
            }
        }
    }

    assert!(app.session.is_complete(), "session should have finished");
    assert_eq!(app.state, AppState::Results);
    assert_eq!(app.session.accuracy(), 100);
}

#[test]
fn headless_round_restart() {
    let mut app = App::with_db(TOKYO_NIGHT, Some("ab".to_string()), None);

    app.type_char('a');
    app.type_char('b');
    assert_eq!(app.state, AppState::Results);

    app.new_round();
    assert_eq!(app.state, AppState::Typing);
    assert_eq!(app.session.cursor(), 0);
    assert_eq!(app.session.target(), "ab");

    // the fresh session judges independently of the previous round
    app.type_char('x');
    assert_eq!(app.session.accuracy(), 0);
}

#[test]
fn headless_ticks_never_mutate_the_engine() {
    let mut app = App::with_db(TOKYO_NIGHT, Some("abc".to_string()), None);
    app.type_char('a');

    let (_tx, rx) = mpsc::channel::<AppEvent>();
    let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(1));

    for _ in 0..20u32 {
        if let AppEvent::Tick = runner.step() {
            app.on_tick();
        }
    }

    assert_eq!(app.session.cursor(), 1);
    assert_eq!(app.session.current_streak(), 1);
    assert!(!app.session.is_complete());
}
