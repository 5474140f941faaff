#[cfg(test)]
#[path = "transcript_test.rs"]
mod tests;

use ratatui::backend::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageKind;

fn message_lines(message: &Message, line_width: usize) -> Vec<Line<'static>> {
    let author_style = match message.author {
        Author::User => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        Author::Dossier => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    };

    let mut body_style = Style::default();
    if message.kind() == MessageKind::Error {
        body_style = Style::default().fg(Color::Red);
    }

    let mut lines = vec![Line::from(Span::styled(
        message.author.to_string(),
        author_style,
    ))];

    for text_line in message.as_string_lines(line_width) {
        lines.push(Line::from(Span::styled(text_line, body_style)));
    }

    if let Some(attachment) = &message.attachment {
        lines.push(Line::from(Span::styled(
            format!("Attached: {attachment}"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    if let Some(pdf) = &message.pdf {
        lines.push(Line::from(Span::styled(
            format!("Open: {}", pdf.location),
            Style::default().fg(Color::Blue),
        )));
        lines.push(Line::from(Span::styled(
            format!("Download: {}", pdf.download_url()),
            Style::default().fg(Color::Blue),
        )));
    }

    lines.push(Line::from(""));

    return lines;
}

/// Flattens the conversation into styled lines for the center pane. The
/// line count feeds the scrollbar, so it is rebuilt on every change.
#[derive(Default)]
pub struct Transcript {
    lines: Vec<Line<'static>>,
}

impl Transcript {
    pub fn set_messages(&mut self, messages: &[Message], line_width: usize) {
        self.lines = messages
            .iter()
            .flat_map(|message| return message_lines(message, line_width))
            .collect();
    }

    pub fn len(&self) -> usize {
        return self.lines.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.lines.is_empty();
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<'_, B>, rect: Rect, scroll: u16) {
        frame.render_widget(
            Paragraph::new(self.lines.clone())
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
