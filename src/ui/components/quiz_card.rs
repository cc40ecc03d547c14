use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::options::QuizOption;
use crate::session::learn::Feedback;
use crate::ui::theme::Theme;

/// Shared card for all three quiz steps: a question, a prompt (the word or
/// sentence under test), and a numbered option list with feedback styling.
pub struct QuizCard<'a> {
    pub title: &'a str,
    pub prompt: &'a str,
    pub options: &'a [QuizOption],
    pub selected: Option<usize>,
    pub feedback: Option<Feedback>,
    pub correct_value: &'a str,
    pub theme: &'a Theme,
}

impl Widget for QuizCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(self.options.len() as u16 + 1),
                Constraint::Min(3),
            ])
            .split(inner);

        let prompt = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                self.prompt,
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center);
        prompt.render(layout[0], buf);

        let feedback_shown = self.feedback.is_some();
        let mut option_lines = vec![Line::from("")];
        for (i, option) in self.options.iter().enumerate() {
            let style = if feedback_shown {
                if option.is_correct {
                    Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD)
                } else if self.selected == Some(i) {
                    Style::default().fg(colors.error())
                } else {
                    Style::default().fg(colors.muted())
                }
            } else {
                Style::default().fg(colors.fg())
            };
            option_lines.push(Line::from(Span::styled(
                format!("  [{}] {}", i + 1, option.value),
                style,
            )));
        }
        Paragraph::new(option_lines)
            .alignment(Alignment::Center)
            .render(layout[1], buf);

        let feedback_lines = match self.feedback {
            Some(Feedback::Correct) => vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Correct! Well done!",
                    Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD),
                )),
            ],
            Some(Feedback::Incorrect) => vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("Not quite. The correct answer is: {}", self.correct_value),
                    Style::default().fg(colors.error()),
                )),
                Line::from(Span::styled(
                    "[r] Try again",
                    Style::default().fg(colors.warning()),
                )),
            ],
            None => vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Pick an answer with [1-4]",
                    Style::default().fg(colors.muted()),
                )),
            ],
        };
        Paragraph::new(feedback_lines)
            .alignment(Alignment::Center)
            .render(layout[2], buf);
    }
}
