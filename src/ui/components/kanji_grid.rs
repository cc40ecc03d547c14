use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::Catalog;
use crate::ui::theme::Theme;

/// Grid of learned kanji with their readings, a few per row. Shown on the
/// progress screen.
pub struct KanjiGrid<'a> {
    pub catalog: &'a Catalog,
    pub characters: &'a [char],
    pub theme: &'a Theme,
}

const CELLS_PER_ROW: usize = 8;

impl Widget for KanjiGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Learned Kanji ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.characters.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "You haven't learned any kanji yet.",
                    Style::default().fg(colors.muted()),
                )),
                Line::from(Span::styled(
                    "Start learning to see your progress here!",
                    Style::default().fg(colors.muted()),
                )),
            ]);
            empty.render(inner, buf);
            return;
        }

        let mut lines = vec![Line::from("")];
        for row in self.characters.chunks(CELLS_PER_ROW) {
            let mut spans = Vec::new();
            for &ch in row {
                let reading = self
                    .catalog
                    .by_character(ch)
                    .map(|e| e.character_reading.clone())
                    .unwrap_or_default();
                spans.push(Span::styled(
                    format!(" {ch} "),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(
                    format!("{reading}  "),
                    Style::default().fg(colors.muted()),
                ));
            }
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
