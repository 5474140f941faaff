use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
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
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::TextArea;
use crate::domain::models::UserIdentity;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::StagePanel;
use crate::infrastructure::http::PipelineManager;

fn render_sidebar<B: Backend>(frame: &mut Frame<'_, B>, rect: Rect, app_state: &AppState) {
    let mut lines = vec![
        Line::from(Span::styled(
            app_state.identity.display_name(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} plan", app_state.identity.plan()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    for (idx, entry) in app_state.history.entries().iter().enumerate() {
        let mut style = Style::default();
        let mut marker = "  ";
        if app_state.history.current() == Some(entry.id) {
            style = Style::default().fg(Color::Cyan);
            marker = "> ";
        }

        lines.push(Line::from(Span::styled(
            format!("{marker}{}. {}", idx + 1, entry.title),
            style,
        )));
        lines.push(Line::from(Span::styled(
            format!("     {}", entry.timestamp),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title("Chats")
        .padding(Padding::new(1, 1, 0, 0));

    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn input_block(app_state: &AppState) -> Block<'static> {
    let mut title = "Ask anything".to_string();
    if let Some(pending) = &app_state.pending_upload {
        title = format!("Ask anything (attached: {})", pending.file_name);
    }

    return Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .title(title)
        .padding(Padding::new(1, 1, 0, 0));
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let mut tick: usize = 0;

    #[cfg(feature = "dev")]
    {
        let test_str = "What's the latest in solar energy? Write a report with recommendations and sources.";
        for char in test_str.chars() {
            textarea.input(tui_textarea::Input {
                key: tui_textarea::Key::Char(char),
                ctrl: false,
                alt: false,
            });
        }
    }

    loop {
        textarea.set_block(input_block(app_state));

        terminal.draw(|frame| {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![
                    Constraint::Length(26),
                    Constraint::Min(1),
                    Constraint::Length(32),
                ])
                .split(frame.size());

            let center = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Min(1), Constraint::Max(4)])
                .split(columns[1]);

            if center[0].width != app_state.last_known_width
                || center[0].height != app_state.last_known_height
            {
                app_state.set_rect(center[0]);
            }

            render_sidebar(frame, columns[0], app_state);

            app_state
                .transcript
                .render(frame, center[0], app_state.scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                center[0].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut app_state.scroll.scrollbar_state,
            );

            frame.render_widget(textarea.widget(), center[1]);

            StagePanel::render(frame, columns[2], &app_state.stages, tick);
        })?;

        match events.next().await? {
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardCTRLN() => {
                app_state.new_chat(&tx)?;
            }
            Event::KeyboardEnter() => {
                let input_str = textarea.lines().join("\n");
                if input_str.trim().is_empty() && app_state.pending_upload.is_none() {
                    continue;
                }

                textarea = TextArea::default();

                let (should_break, should_continue) =
                    app_state.handle_slash_commands(&input_str, &tx)?;
                if should_break {
                    break;
                }
                if should_continue {
                    continue;
                }

                app_state.submit(&input_str, &tx)?;
            }
            Event::KeyboardCharInput(input) => {
                textarea.input(input);
            }
            Event::KeyboardPaste(text) => {
                textarea.insert_str(text.as_str());
            }
            Event::PipelineOutcome(id, outcome) => {
                app_state.handle_pipeline_outcome(id, outcome);
            }
            Event::PipelineFailed(id) => {
                app_state.handle_pipeline_failed(id);
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => {
                tick = tick.wrapping_add(1);
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    identity: UserIdentity,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut app_state = AppState::new(identity);

    if let Err(err) = PipelineManager::get()?.health_check().await {
        app_state.add_notice(&format!(
            "It looks like the report backend isn't reachable. Submissions will fail until it's back.\n\nError: {err}"
        ));
    }

    let mut events = EventsService::new(rx);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    start_loop(&mut terminal, &mut app_state, tx, &mut events).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
