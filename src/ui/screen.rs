use crossterm::event::KeyEvent;
use ratatui::{buffer::Buffer, layout::Rect};

use crate::app::{Action, App, Route};
use crate::ui::{home::HomeScreen, stats::StatsScreen, test::TestScreen};

/// A UI Screen boundary: responsible for rendering and key mapping
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);

    /// Maps a key to the action the app should take.
    fn on_key(&self, _key: KeyEvent, _app: &App) -> Action {
        Action::None
    }

    /// Key legend shown in the footer
    fn hints(&self, _app: &App) -> &'static str {
        "(ctrl+c) quit"
    }
}

/// Helper to construct the appropriate screen for the current route
pub fn current_screen(route: Route) -> Box<dyn Screen> {
    match route {
        Route::Home => Box::new(HomeScreen),
        Route::Test => Box::new(TestScreen),
        Route::Stats => Box::new(StatsScreen),
    }
}
