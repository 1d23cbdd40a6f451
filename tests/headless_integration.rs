use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use swiftype::app::{App, Route};
use swiftype::config::NullConfigStore;
use swiftype::corpus::Corpus;
use swiftype::history::{History, MemoryStore};
use swiftype::runtime::{AppEvent, ChannelEventSource, FixedTicker, Runner};
use swiftype::session::{Status, TestDuration};

fn app_with(prompt: &str) -> App {
    App::new(
        Corpus::from_texts([prompt]).unwrap(),
        History::new(MemoryStore::new()),
        Box::new(NullConfigStore),
    )
}

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

// Headless integration using the runner and app without a TTY
#[test]
fn headless_typing_flow_completes() {
    let runner = Runner::new(
        ChannelEventSource::new(),
        FixedTicker::new(Duration::from_millis(5)),
    );
    let mut app = app_with("hi there").with_timer(runner.sender());
    app.navigate(Route::Test);

    let tx = runner.sender();
    for c in "hi there".chars() {
        tx.send(key(c)).unwrap();
    }

    for _ in 0..100u32 {
        app.handle_event(runner.step());
        if app.session.status() == Status::Done {
            break;
        }
    }

    assert_eq!(app.session.status(), Status::Done);
    assert!(!app.timer_running());
    let score = app.session.stats().unwrap();
    assert_eq!(score.accuracy, 100);
    assert_eq!(score.mistakes, 0);

    app.navigate(Route::Stats);
    assert_eq!(app.results.len(), 1);
}

#[test]
fn headless_timed_session_finishes_by_seconds() {
    let runner = Runner::new(
        ChannelEventSource::new(),
        FixedTicker::new(Duration::from_millis(5)),
    );
    let mut app = app_with("hello world again");
    app.navigate(Route::Test);
    app.override_duration(TestDuration::Fifteen);

    let tx = runner.sender();
    for c in "hello wrld".chars() {
        tx.send(key(c)).unwrap();
    }
    for _ in 0..15 {
        tx.send(AppEvent::Second(0)).unwrap();
    }

    for _ in 0..100u32 {
        app.handle_event(runner.step());
        if app.session.status() == Status::Done {
            break;
        }
    }

    assert_eq!(app.session.status(), Status::Done);
    assert_eq!(app.session.remaining_secs(), 0);

    app.navigate(Route::Stats);
    let result = &app.results[0];
    // one correct word over a quarter minute
    assert_eq!(result.wpm, 4);
    assert_eq!(result.accuracy, 50);
    assert_eq!(result.mistakes, 1);
    assert_eq!(result.duration, 15);
}

#[test]
fn headless_practice_flow_saves_nothing() {
    let runner = Runner::new(
        ChannelEventSource::new(),
        FixedTicker::new(Duration::from_millis(5)),
    );
    let mut app = app_with("hi");
    app.start_practice();

    let tx = runner.sender();
    tx.send(key('h')).unwrap();
    tx.send(key('i')).unwrap();

    for _ in 0..20u32 {
        app.handle_event(runner.step());
    }

    assert_eq!(app.session.status(), Status::Done);
    assert!(app.session.is_practice());

    app.navigate(Route::Stats);
    assert!(app.results.is_empty());
}
