#[cfg(test)]
#[path = "stage_panel_test.rs"]
mod tests;

use ratatui::backend::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::domain::models::StageBoard;
use crate::domain::models::StageStatus;

fn status_glyph(status: StageStatus) -> (&'static str, Color) {
    match status {
        StageStatus::Pending => return ("○", Color::DarkGray),
        StageStatus::Active => return ("◉", Color::Yellow),
        StageStatus::Completed => return ("✔", Color::Green),
        StageStatus::Failed => return ("✖", Color::Red),
    }
}

fn stage_lines(board: &StageBoard, tick: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = vec![];

    for stage in board.stages() {
        let (glyph, color) = status_glyph(stage.status);

        lines.push(Line::from(vec![
            Span::styled(format!("{glyph} "), Style::default().fg(color)),
            Span::styled(stage.name, Style::default().add_modifier(Modifier::BOLD)),
        ]));

        let mut description = stage.description.to_string();
        if stage.status == StageStatus::Active {
            description += &".".repeat(tick % 4);
        }
        lines.push(Line::from(Span::styled(
            format!("  {description}"),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    return lines;
}

pub struct StagePanel {}

impl StagePanel {
    pub fn render<B: Backend>(frame: &mut Frame<'_, B>, rect: Rect, board: &StageBoard, tick: usize) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title("Agents")
            .padding(Padding::new(1, 1, 0, 0));

        frame.render_widget(Paragraph::new(stage_lines(board, tick)).block(block), rect);
    }
}
