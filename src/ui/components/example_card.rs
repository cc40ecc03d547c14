use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::LessonEntry;
use crate::ui::theme::Theme;

/// Terminal step for an entry: the example sentence broken into words
/// with readings, a vocabulary recap, and the mark-learned prompt.
/// Entries without an example still show the recap.
pub struct ExampleCard<'a> {
    pub entry: &'a LessonEntry,
    pub theme: &'a Theme,
}

impl Widget for ExampleCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let vocab = &self.entry.vocabulary_word;

        let block = Block::bordered()
            .title(" Example Sentence ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from("")];

        if let Some(example) = self.entry.first_example() {
            lines.push(Line::from(Span::styled(
                example.sentence.clone(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                example.sentence_meaning.clone(),
                Style::default().fg(colors.fg()),
            )));
            lines.push(Line::from(""));

            for word in &example.words {
                let style = if word.is_new_word {
                    Style::default()
                        .fg(colors.warning())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.muted())
                };
                lines.push(Line::from(Span::styled(
                    format!("{}  {}  {}", word.text, word.reading, word.meaning),
                    style,
                )));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "New Vocabulary",
            Style::default().fg(colors.muted()),
        )));
        lines.push(Line::from(Span::styled(
            format!("{}  {}", vocab.word, vocab.reading),
            Style::default()
                .fg(colors.fg())
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            vocab.meaning.clone(),
            Style::default().fg(colors.fg()),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter] Mark as learned",
            Style::default().fg(colors.success()),
        )));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
