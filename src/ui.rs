pub mod home;
pub mod screen;
pub mod stats;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};

use crate::app::{App, Route};
use crate::ui::screen::current_screen;

const NAV: [(Route, &str); 3] = [
    (Route::Home, "Home"),
    (Route::Test, "Test"),
    (Route::Stats, "Stats"),
];

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [nav, body, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        render_nav(self, nav, buf);

        let screen = current_screen(self.route);
        screen.render(self, body, buf);

        Paragraph::new(Span::styled(
            screen.hints(self),
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(footer, buf);
    }
}

fn render_nav(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled("swiftype", bold_style.fg(Color::Magenta)),
        Span::raw("   "),
    ];
    for (route, label) in NAV {
        // practice lives on the test page but isn't "the test"
        let active = route == app.route && !(route == Route::Test && app.practice);
        let style = if active {
            bold_style.add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw("  "));
    }
    let practice_style = if app.practice {
        bold_style.fg(Color::Yellow).add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    spans.push(Span::styled("Practice", practice_style));

    Paragraph::new(Line::from(spans)).render(area, buf);
}

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Action;
    use crate::config::NullConfigStore;
    use crate::corpus::Corpus;
    use crate::history::{History, MemoryStore, Storage, TestResult, RESULTS_KEY};
    use ratatui::{backend::TestBackend, Terminal};

    fn create_test_app(prompt: &str) -> App {
        create_test_app_with(prompt, MemoryStore::new())
    }

    fn create_test_app_with(prompt: &str, store: MemoryStore) -> App {
        App::new(
            Corpus::from_texts([prompt]).unwrap(),
            History::new(store),
            Box::new(NullConfigStore),
        )
    }

    fn rendered(app: &App, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);

        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.dispatch(Action::Type(c));
        }
    }

    #[test]
    fn test_home_renders_hero() {
        let app = create_test_app("hello world");
        let out = rendered(&app, 120, 30);

        assert!(out.contains("Type faster. Type better."));
        assert!(out.contains("Multiple Time Options"));
        assert!(out.contains("(q)uit"));
    }

    #[test]
    fn test_typing_screen_shows_prompt_and_timer() {
        let mut app = create_test_app("hello world");
        app.navigate(Route::Test);
        let out = rendered(&app, 100, 30);

        assert!(out.contains("hello"));
        assert!(out.contains("world"));
        assert!(out.contains("30s"));
        assert!(out.contains("15s"));
        assert!(out.contains("60s"));
    }

    #[test]
    fn test_practice_banner() {
        let mut app = create_test_app("hello world");
        app.start_practice();
        let out = rendered(&app, 120, 30);

        assert!(out.contains("Practice mode - results won't be saved"));
    }

    #[test]
    fn test_results_panel() {
        let mut app = create_test_app("hi");
        app.navigate(Route::Test);
        type_str(&mut app, "hi");
        let out = rendered(&app, 120, 30);

        assert!(out.contains("Test Complete!"));
        assert!(out.contains("Accuracy"));
        assert!(out.contains("100%"));
        assert!(out.contains("(s) view stats"));
    }

    #[test]
    fn test_practice_results_panel() {
        let mut app = create_test_app("hi");
        app.start_practice();
        type_str(&mut app, "hi");
        let out = rendered(&app, 120, 30);

        assert!(out.contains("Practice Complete!"));
        assert!(out.contains("(t) start real test"));
    }

    #[test]
    fn test_stats_empty() {
        let mut app = create_test_app("hi");
        app.navigate(Route::Stats);
        let out = rendered(&app, 120, 30);

        assert!(out.contains("Tests Completed"));
        assert!(out.contains("No results found."));
    }

    #[test]
    fn test_stats_table_and_confirm() {
        let mut store = MemoryStore::new();
        let results = vec![TestResult {
            date: "2024-05-01T10:00:00.000Z".to_string(),
            wpm: 73,
            accuracy: 96,
            mistakes: 2,
            duration: 60,
        }];
        store
            .set(RESULTS_KEY, &serde_json::to_string(&results).unwrap())
            .unwrap();
        let mut app = create_test_app_with("hi", store);
        app.navigate(Route::Stats);

        let out = rendered(&app, 120, 30);
        assert!(out.contains("73"));
        assert!(out.contains("96%"));
        assert!(out.contains("60s"));

        app.dispatch(Action::RequestReset);
        let out = rendered(&app, 120, 30);
        assert!(out.contains("Reset All Scores"));
    }

    #[test]
    fn test_small_area_does_not_panic() {
        let mut app = create_test_app("hello world");
        for route in [Route::Home, Route::Test, Route::Stats] {
            app.navigate(route);
            rendered(&app, 20, 5);
        }
    }

    #[test]
    fn test_draw_through_terminal() {
        let app = create_test_app("hello world");
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal.draw(|f| draw(&app, f)).unwrap();

        let content = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(content.contains("swiftype"));
    }
}
