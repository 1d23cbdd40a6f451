use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::app::{Action, App, Route};
use crate::ui::screen::Screen;

const FEATURES: [(&str, &str); 5] = [
    (
        "Multiple Time Options",
        "Choose between 15, 30, or 60 second typing tests to match your practice preferences.",
    ),
    (
        "Realistic Typing Experience",
        "Practice with common words, phrases, and sentences to improve real-world typing skills.",
    ),
    (
        "Detailed Statistics",
        "Track your WPM, accuracy, and errors with detailed metrics after each test.",
    ),
    (
        "Personal Bests",
        "Keep track of your personal records and watch yourself improve over time.",
    ),
    (
        "Real-time Feedback",
        "Get instant feedback on your typing accuracy and speed as you type.",
    ),
];

pub struct HomeScreen;

impl Screen for HomeScreen {
    fn render(&self, _app: &App, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);

        let [hero, features] =
            Layout::vertical([Constraint::Length(9), Constraint::Min(0)]).areas(area);

        let hero_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Type faster. Type better.",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Master the ", bold_style),
                Span::styled("keyboard", bold_style.fg(Color::Green)),
                Span::styled(" at your fingertips", bold_style),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Improve your typing speed and accuracy with modern, interactive typing tests. Challenge yourself and track your progress.",
                dim_style,
            )),
            Line::from(""),
            Line::from(Span::styled(
                "(t) start test   (p) practice   (s) view stats",
                bold_style.fg(Color::Cyan),
            )),
        ];

        Paragraph::new(hero_lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(hero, buf);

        let mut lines = Vec::with_capacity(FEATURES.len() * 2);
        for (title, description) in FEATURES {
            lines.push(Line::from(Span::styled(format!("• {title}"), bold_style)));
            lines.push(Line::from(Span::styled(format!("  {description}"), dim_style)));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(features.inner(ratatui::layout::Margin::new(5, 1)), buf);
    }

    fn on_key(&self, key: KeyEvent, _app: &App) -> Action {
        match key.code {
            KeyCode::Char('t') | KeyCode::Enter => Action::Navigate(Route::Test),
            KeyCode::Char('p') => Action::StartPractice,
            KeyCode::Char('s') => Action::Navigate(Route::Stats),
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }

    fn hints(&self, _app: &App) -> &'static str {
        "(t)est / (p)ractice / (s)tats / (q)uit"
    }
}
