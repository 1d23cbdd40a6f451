use std::sync::mpsc::Sender;
use std::time::Duration;

use clap::ValueEnum;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use crate::config::{Config, ConfigStore};
use crate::corpus::Corpus;
use crate::dashboard::DashboardState;
use crate::history::{History, TestResult};
use crate::runtime::{AppEvent, Countdown};
use crate::session::{Session, Status, TestDuration};
use crate::ui::screen::current_screen;

/// Countdown period for a running test
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, strum_macros::Display)]
pub enum Route {
    #[default]
    Home,
    Test,
    Stats,
}

/// What a screen asks the app to do in response to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Navigate(Route),
    StartPractice,
    SwitchToRealTest,
    Type(char),
    Backspace,
    Restart,
    PickDuration(TestDuration),
    CycleFilter,
    CycleSort,
    ToggleOrder,
    ScrollUp,
    ScrollDown,
    RequestReset,
    ConfirmReset,
    CancelReset,
}

pub struct App {
    pub route: Route,
    pub practice: bool,
    pub duration: TestDuration,
    pub session: Session,
    pub dashboard: DashboardState,
    pub results: Vec<TestResult>,
    /// Last persistence problem, shown on the results panel
    pub notice: Option<String>,
    history: History,
    config: Config,
    config_store: Box<dyn ConfigStore>,
    timer: Option<Countdown>,
    timer_events: Option<Sender<AppEvent>>,
    timers_started: u64,
    should_quit: bool,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("route", &self.route)
            .field("practice", &self.practice)
            .field("duration", &self.duration)
            .field("session", &self.session)
            .field("results", &self.results.len())
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(corpus: Corpus, history: History, config_store: Box<dyn ConfigStore>) -> Self {
        let config = config_store.load();
        let duration = config.duration;

        Self {
            route: Route::Home,
            practice: false,
            duration,
            session: Session::new(corpus, duration, false),
            dashboard: DashboardState::default(),
            results: Vec::new(),
            notice: None,
            history,
            config,
            config_store,
            timer: None,
            timer_events: None,
            timers_started: 0,
            should_quit: false,
        }
    }

    /// Lets the app run a real countdown that posts into `events`.
    pub fn with_timer(mut self, events: Sender<AppEvent>) -> Self {
        self.timer_events = Some(events);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Id of the countdown currently held, if any.
    pub fn timer_id(&self) -> Option<u64> {
        self.timer.as_ref().map(Countdown::id)
    }

    /// Duration for this run only, not written to the config.
    pub fn override_duration(&mut self, duration: TestDuration) {
        self.duration = duration;
        self.session.set_duration(duration);
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Second(id) => {
                if self.accepts_second(id) {
                    self.on_second();
                } else {
                    debug!(id, "stale countdown second dropped");
                }
            }
            AppEvent::Tick | AppEvent::Resize => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        let action = current_screen(self.route).on_key(key, self);
        self.dispatch(action);
    }

    pub fn dispatch(&mut self, action: Action) {
        if action != Action::None {
            debug!(?action, route = %self.route, "dispatch");
        }
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::Navigate(route) => self.navigate(route),
            Action::StartPractice => self.start_practice(),
            Action::SwitchToRealTest => self.switch_to_real_test(),
            Action::Type(c) => {
                if let Some(result) = self.session.input_char(c) {
                    self.save(result);
                }
            }
            Action::Backspace => {
                if let Some(result) = self.session.backspace() {
                    self.save(result);
                }
            }
            Action::Restart => self.restart_session(),
            Action::PickDuration(d) => self.pick_duration(d),
            Action::CycleFilter => {
                self.dashboard.filter = self.dashboard.filter.next();
                self.dashboard.scroll = 0;
            }
            Action::CycleSort => {
                self.dashboard.sort_key = self.dashboard.sort_key.next();
                self.dashboard.scroll = 0;
            }
            Action::ToggleOrder => {
                self.dashboard.order = self.dashboard.order.toggle();
                self.dashboard.scroll = 0;
            }
            Action::ScrollUp => self.dashboard.scroll = self.dashboard.scroll.saturating_sub(1),
            Action::ScrollDown => {
                let max = self.dashboard.visible(&self.results).len().saturating_sub(1);
                self.dashboard.scroll = (self.dashboard.scroll + 1).min(max);
            }
            Action::RequestReset => self.dashboard.confirm_reset = true,
            Action::CancelReset => self.dashboard.confirm_reset = false,
            Action::ConfirmReset => self.reset_all_scores(),
        }
        self.sync_timer();
    }

    pub fn on_second(&mut self) {
        if self.route == Route::Test {
            if let Some(result) = self.session.on_tick() {
                self.save(result);
            }
        }
        self.sync_timer();
    }

    /// Without a timer of its own the app takes seconds from any clock;
    /// with one, only from the countdown it currently holds.
    fn accepts_second(&self, id: u64) -> bool {
        match (&self.timer_events, &self.timer) {
            (None, _) => true,
            (Some(_), Some(timer)) => timer.id() == id,
            (Some(_), None) => false,
        }
    }

    /// Clears practice mode, as every plain navigation does.
    pub fn navigate(&mut self, route: Route) {
        let entering_test = route == Route::Test && self.route != Route::Test;
        self.route = route;
        self.practice = false;
        self.session.set_practice(false);

        if entering_test {
            self.restart_session();
        }
        if route == Route::Stats {
            self.results = self.history.load();
            self.dashboard.confirm_reset = false;
            self.dashboard.scroll = 0;
        }
        self.sync_timer();
        info!(%route, "navigate");
    }

    pub fn start_practice(&mut self) {
        let entering_test = self.route != Route::Test;
        self.route = Route::Test;
        self.practice = true;
        self.session.set_practice(true);

        if entering_test {
            self.restart_session();
        }
        self.sync_timer();
        info!("practice started");
    }

    fn switch_to_real_test(&mut self) {
        self.practice = false;
        self.session.set_practice(false);
        if self.session.status() == Status::Done {
            self.restart_session();
        }
    }

    fn restart_session(&mut self) {
        self.session.restart();
        self.session.set_duration(self.duration);
        self.session.set_practice(self.practice);
        self.notice = None;
    }

    fn pick_duration(&mut self, duration: TestDuration) {
        self.duration = duration;
        self.session.set_duration(duration);

        if self.config.duration != duration {
            self.config.duration = duration;
            if let Err(e) = self.config_store.save(&self.config) {
                warn!(error = %e, "failed to save config");
            }
        }
    }

    fn reset_all_scores(&mut self) {
        if let Err(e) = self.history.clear() {
            warn!(error = %e, "failed to clear results");
        }
        self.results.clear();
        self.dashboard.confirm_reset = false;
        self.dashboard.scroll = 0;
        info!("all scores reset");
    }

    fn save(&mut self, result: TestResult) {
        match self.history.append(result) {
            Ok(()) => info!("result saved"),
            Err(e) => {
                warn!(error = %e, "failed to save result");
                self.notice = Some(format!("Result not saved: {e}"));
            }
        }
    }

    /// The countdown lives exactly as long as a visible running session.
    fn sync_timer(&mut self) {
        let running = self.route == Route::Test && self.session.status() == Status::Running;

        if !running {
            self.timer = None;
            return;
        }
        if self.timer.is_none() {
            if let Some(ref events) = self.timer_events {
                self.timers_started += 1;
                self.timer = Some(Countdown::start(
                    events.clone(),
                    COUNTDOWN_PERIOD,
                    self.timers_started,
                ));
            }
        }
    }
}
