use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::LessonEntry;
use crate::ui::theme::Theme;

/// First look at a new kanji: the character, its meaning and reading, and
/// the vocabulary word that introduces it.
pub struct IntroCard<'a> {
    pub entry: &'a LessonEntry,
    pub theme: &'a Theme,
}

impl Widget for IntroCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let vocab = &self.entry.vocabulary_word;

        let block = Block::bordered()
            .title(" New Kanji ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.entry.character.to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} ({})", self.entry.meaning, self.entry.character_reading),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Vocabulary",
                Style::default().fg(colors.muted()),
            )),
            Line::from(Span::styled(
                vocab.word.clone(),
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                vocab.reading.clone(),
                Style::default().fg(colors.accent()),
            )),
            Line::from(Span::styled(
                vocab.meaning.clone(),
                Style::default().fg(colors.muted()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[Enter] I'm ready for the quiz",
                Style::default().fg(colors.warning()),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
