use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Widget, Wrap},
};

use crate::app::{Action, App, Route};
use crate::dashboard::{summarize, SortOrder};
use crate::history::TestResult;
use crate::ui::screen::Screen;

const HORIZONTAL_MARGIN: u16 = 5;
const EMPTY_MESSAGE: &str = "No results found. Complete some typing tests to see your statistics!";
const RESET_PROMPT: &str =
    "Are you sure you want to reset all your typing test scores? This action cannot be undone.";

pub struct StatsScreen;

impl Screen for StatsScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let [title, cards, controls, table] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(5),
            Constraint::Length(2),
            Constraint::Min(3),
        ])
        .horizontal_margin(HORIZONTAL_MARGIN)
        .areas(area);

        Paragraph::new(Span::styled(
            "Your Typing Statistics",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(title, buf);

        let visible = app.dashboard.visible(&app.results);
        render_cards(&visible, cards, buf);

        let arrow = match app.dashboard.order {
            SortOrder::Ascending => "↑",
            SortOrder::Descending => "↓",
        };
        Paragraph::new(Line::from(vec![
            Span::styled("(f) ", Style::default().fg(Color::Cyan)),
            Span::raw(app.dashboard.filter.to_string()),
            Span::raw("   "),
            Span::styled("(o) ", Style::default().fg(Color::Cyan)),
            Span::raw(format!("Sort by {}", app.dashboard.sort_key)),
            Span::raw("   "),
            Span::styled("(space) ", Style::default().fg(Color::Cyan)),
            Span::raw(format!("{} {arrow}", app.dashboard.order)),
        ]))
        .alignment(Alignment::Center)
        .render(controls, buf);

        render_table(app, &visible, table, buf);

        if app.dashboard.confirm_reset {
            render_confirm(area, buf);
        }
    }

    fn on_key(&self, key: KeyEvent, app: &App) -> Action {
        if app.dashboard.confirm_reset {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => Action::ConfirmReset,
                KeyCode::Char('n') | KeyCode::Esc => Action::CancelReset,
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Char('f') => Action::CycleFilter,
            KeyCode::Char('o') => Action::CycleSort,
            KeyCode::Char(' ') => Action::ToggleOrder,
            KeyCode::Char('x') => Action::RequestReset,
            KeyCode::Up | KeyCode::Char('k') => Action::ScrollUp,
            KeyCode::Down | KeyCode::Char('j') => Action::ScrollDown,
            KeyCode::Char('t') => Action::Navigate(Route::Test),
            KeyCode::Char('p') => Action::StartPractice,
            KeyCode::Char('h') | KeyCode::Esc => Action::Navigate(Route::Home),
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        }
    }

    fn hints(&self, app: &App) -> &'static str {
        if app.dashboard.confirm_reset {
            "(y)es reset / (n)o cancel"
        } else {
            "(↑/↓) scroll / (x) reset scores / (t)est / (p)ractice / (h)ome / (q)uit"
        }
    }
}

/// Summary of the rows currently in the table.
fn render_cards(results: &[TestResult], area: Rect, buf: &mut Buffer) {
    let summary = summarize(results);
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let best = match summary.best {
        Some(ref best) => vec![
            Line::from(Span::styled(
                format!("{} WPM", best.wpm),
                bold_style.fg(Color::Green),
            )),
            Line::from(Span::styled(
                format!("{}% accuracy, {}s test", best.accuracy, best.duration),
                dim_style,
            )),
        ],
        None => vec![Line::from(Span::styled("-", dim_style))],
    };

    let cards = [
        (
            "Tests Completed",
            vec![Line::from(Span::styled(
                summary.tests_completed.to_string(),
                bold_style.fg(Color::Magenta),
            ))],
        ),
        (
            "Average WPM",
            vec![
                Line::from(Span::styled(
                    summary.average_wpm.to_string(),
                    bold_style.fg(Color::Cyan),
                )),
                Line::from(Span::styled(
                    format!("{}% average accuracy", summary.average_accuracy),
                    dim_style,
                )),
            ],
        ),
        ("Best Score", best),
    ];

    let areas: [Rect; 3] = Layout::horizontal([Constraint::Ratio(1, 3); 3])
        .spacing(1)
        .areas(area);

    for ((label, lines), card) in cards.into_iter().zip(areas) {
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(label))
            .render(card, buf);
    }
}

pub fn format_date(result: &TestResult) -> String {
    match result.timestamp() {
        Some(ts) => ts
            .with_timezone(&Local)
            .format("%b %-d, %Y %H:%M")
            .to_string(),
        None => result.date.clone(),
    }
}

fn render_table(app: &App, visible: &[TestResult], area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Test History ({}) ", visible.len()));

    if visible.is_empty() {
        Paragraph::new(Span::styled(
            EMPTY_MESSAGE,
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block)
        .render(area, buf);
        return;
    }

    let header = Row::new(vec!["Date", "Duration", "WPM", "Accuracy", "Mistakes"])
        .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));

    let rows = visible.iter().skip(app.dashboard.scroll).map(|r| {
        Row::new(vec![
            Cell::from(format_date(r)),
            Cell::from(format!("{}s", r.duration)),
            Cell::from(r.wpm.to_string()).style(Style::default().fg(Color::Green)),
            Cell::from(format!("{}%", r.accuracy)),
            Cell::from(r.mistakes.to_string()).style(if r.mistakes > 0 {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            }),
        ])
    });

    let widths = [
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(block)
        .render(area, buf);
}

fn render_confirm(area: Rect, buf: &mut Buffer) {
    let [popup] = Layout::vertical([Constraint::Length(7)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(60)])
        .flex(Flex::Center)
        .areas(popup);

    Clear.render(popup, buf);
    Paragraph::new(vec![
        Line::from(""),
        Line::from(RESET_PROMPT),
        Line::from(""),
        Line::from(Span::styled(
            "(y) reset all scores   (n) cancel",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Reset All Scores ")
            .border_style(Style::default().fg(Color::Red)),
    )
    .render(popup, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_falls_back_to_raw() {
        let result = TestResult {
            date: "yesterday".to_string(),
            wpm: 1,
            accuracy: 1,
            mistakes: 0,
            duration: 15,
        };
        assert_eq!(format_date(&result), "yesterday");
    }

    #[test]
    fn test_format_date_parses_iso() {
        let result = TestResult {
            date: "2024-05-01T12:00:00.000Z".to_string(),
            wpm: 1,
            accuracy: 1,
            mistakes: 0,
            duration: 15,
        };
        // local offset varies, but the year survives any timezone
        assert!(format_date(&result).contains("2024"));
    }
}
