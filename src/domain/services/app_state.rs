#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::Scroll;
use super::Transcript;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::ChatHistory;
use crate::domain::models::Message;
use crate::domain::models::MessageId;
use crate::domain::models::PendingUpload;
use crate::domain::models::PipelineRequest;
use crate::domain::models::SlashCommand;
use crate::domain::models::StageBoard;
use crate::domain::models::SubmissionOutcome;
use crate::domain::models::UserIdentity;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /attach (/a) [PATH] - Attaches a file to your next submission.
- /detach - Drops the pending attachment.
- /new (/n) - Starts a new chat and cancels any submissions in flight.
- /select (/s) [INDEX] - Marks the chat at INDEX in the sidebar as the current one.
- /delete (/d) [INDEX] - Deletes the chat at INDEX from the sidebar.
- /quit /exit (/q) - Exit Dossier.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+N - Start a new chat.
- CTRL+C - Exit.
        "#;

    return text.trim().to_string();
}

/// The single owner of everything the chat screen shows. Submissions go
/// out as actions keyed by the placeholder id; outcomes come back as
/// events and are applied in place here.
pub struct AppState {
    pub history: ChatHistory,
    pub identity: UserIdentity,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub messages: Vec<Message>,
    pub pending_upload: Option<PendingUpload>,
    pub scroll: Scroll,
    pub stages: StageBoard,
    pub transcript: Transcript,
    next_message_id: MessageId,
}

impl AppState {
    pub fn new(identity: UserIdentity) -> AppState {
        let mut app_state = AppState {
            history: ChatHistory::default(),
            identity,
            last_known_height: 0,
            last_known_width: 0,
            messages: vec![],
            pending_upload: None,
            scroll: Scroll::default(),
            stages: StageBoard::default(),
            transcript: Transcript::default(),
            next_message_id: 0,
        };

        let greeting = format!(
            "Hey {}! Ask me anything and I'll put together a report for you.",
            app_state.identity.display_name()
        );
        let id = app_state.next_id();
        app_state
            .messages
            .push(Message::new(id, Author::Dossier, &greeting));

        return app_state;
    }

    /// Runs one submission up to the point where the pipeline takes over:
    /// the user turn and the placeholder are appended together, and the
    /// placeholder id rides along on the request.
    pub fn submit(&mut self, input: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let text = input.trim();
        if text.is_empty() && self.pending_upload.is_none() {
            return Ok(());
        }

        let upload = self.pending_upload.take();

        let id = self.next_id();
        let mut user_message = Message::new(id, Author::User, text);
        if let Some(pending) = &upload {
            user_message = user_message.with_attachment(&pending.file_name);
        }
        self.messages.push(user_message);

        if self.history.current().is_none() {
            let mut summary_source = text.to_string();
            if summary_source.is_empty() {
                if let Some(pending) = &upload {
                    summary_source = pending.file_name.to_string();
                }
            }
            self.history.begin_thread(&summary_source);
        }

        let placeholder_id = self.next_id();
        self.messages.push(Message::placeholder(placeholder_id));
        self.stages.begin();

        tx.send(Action::PipelineSubmit(PipelineRequest::new(
            placeholder_id,
            text,
            upload,
        )))?;

        self.sync_dependants();
        self.scroll.last();

        return Ok(());
    }

    /// Outcomes for placeholders that no longer exist are dropped, which
    /// is what makes starting a new chat a clean cancellation.
    pub fn handle_pipeline_outcome(&mut self, id: MessageId, outcome: SubmissionOutcome) {
        let Some(message) = self.messages.iter_mut().find(|message| return message.id == id)
        else {
            tracing::debug!(id, "dropping outcome for a cleared placeholder");
            return;
        };

        match outcome {
            SubmissionOutcome::Report { text, pdf } => {
                message.resolve_report(&text, pdf);
            }
            SubmissionOutcome::Pdf(artifact) => {
                message.resolve_pdf(artifact);
            }
        }

        self.stages.complete_all();
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn handle_pipeline_failed(&mut self, id: MessageId) {
        let Some(message) = self.messages.iter_mut().find(|message| return message.id == id)
        else {
            tracing::debug!(id, "dropping failure for a cleared placeholder");
            return;
        };

        message.resolve_error();
        self.stages.fail_active();
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn new_chat(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        self.messages.clear();
        self.pending_upload = None;
        self.history.clear_current();
        self.stages.reset();
        tx.send(Action::PipelineAbortAll())?;
        self.sync_dependants();

        return Ok(());
    }

    /// Returns (should_break, should_continue) for the event loop.
    pub fn handle_slash_commands(
        &mut self,
        input: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<(bool, bool)> {
        if let Some(command) = SlashCommand::parse(input) {
            if command.is_quit() {
                return Ok((true, false));
            }

            if command.is_new_chat() {
                self.new_chat(tx)?;
                return Ok((false, true));
            }

            if command.is_attach() {
                match command.args.first() {
                    Some(path) => {
                        match PendingUpload::new(path) {
                            Ok(pending) => {
                                self.add_notice(&format!(
                                    "{} will be attached to your next submission.",
                                    pending.file_name
                                ));
                                self.pending_upload = Some(pending);
                            }
                            Err(err) => {
                                self.add_notice(&format!("{err}"));
                            }
                        }
                    }
                    None => {
                        self.add_notice("You must provide a file path with `/attach`.");
                    }
                }
                return Ok((false, true));
            }

            if command.is_detach() {
                self.pending_upload = None;
                self.add_notice("Dropped the pending attachment.");
                return Ok((false, true));
            }

            if command.is_select_chat() {
                if let Some(id) = self.history_id_from_args(&command.args) {
                    self.history.select(id);
                } else {
                    self.add_notice("You must provide a valid index from the sidebar.");
                }
                return Ok((false, true));
            }

            if command.is_delete_chat() {
                if let Some(id) = self.history_id_from_args(&command.args) {
                    self.history.delete(id);
                } else {
                    self.add_notice("You must provide a valid index from the sidebar.");
                }
                return Ok((false, true));
            }

            if command.is_help() {
                self.add_notice(&help_text());
                return Ok((false, true));
            }
        }

        return Ok((false, false));
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn add_notice(&mut self, text: &str) {
        let id = self.next_id();
        self.messages.push(Message::new(id, Author::Dossier, text));
        self.sync_dependants();
        self.scroll.last();
    }

    // Sidebar entries are addressed one-based, newest first.
    fn history_id_from_args(&self, args: &[String]) -> Option<u64> {
        let index = args.first()?.parse::<usize>().ok()?;
        let entry = self.history.entries().get(index.checked_sub(1)?)?;
        return Some(entry.id);
    }

    fn next_id(&mut self) -> MessageId {
        self.next_message_id += 1;
        return self.next_message_id;
    }

    fn sync_dependants(&mut self) {
        self.transcript
            .set_messages(&self.messages, self.last_known_width.into());

        self.scroll
            .set_state(self.transcript.len() as u16, self.last_known_height);

        if self.stages.is_processing() {
            self.scroll.last();
        }
    }
}
