#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Author;
use super::PdfArtifact;

pub type MessageId = u64;

/// Shown on the placeholder turn appended at submission time, before the
/// pipeline resolves.
pub const PLACEHOLDER_TEXT: &str =
    "I'm processing your request and gathering the information you need. This will just take a moment.";

pub const PDF_READY_TEXT: &str =
    "I've generated a PDF report based on your query. You can open it from the path below.";

pub const PDF_ATTACHED_TEXT: &str =
    "I've also generated a PDF report that you can open or download from the links below.";

pub const SUBMISSION_ERROR_TEXT: &str =
    "Sorry, there was an error processing your request. Please try again.";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Normal,
    Report,
    Error,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub author: Author,
    pub text: String,
    kind: MessageKind,
    pub attachment: Option<String>,
    pub pdf: Option<PdfArtifact>,
}

impl Message {
    pub fn new(id: MessageId, author: Author, text: &str) -> Message {
        return Message {
            id,
            author,
            text: text.to_string().replace('\t', "  "),
            kind: MessageKind::Normal,
            attachment: None,
            pdf: None,
        };
    }

    pub fn placeholder(id: MessageId) -> Message {
        return Message::new(id, Author::Dossier, PLACEHOLDER_TEXT);
    }

    pub fn with_attachment(mut self, file_name: &str) -> Message {
        self.attachment = Some(file_name.to_string());
        return self;
    }

    pub fn kind(&self) -> MessageKind {
        return self.kind;
    }

    /// The single in-place update applied when a JSON pipeline result
    /// arrives for this placeholder.
    pub fn resolve_report(&mut self, text: &str, pdf: Option<PdfArtifact>) {
        if let Some(artifact) = pdf {
            self.text = format!("{text}\n\n{PDF_ATTACHED_TEXT}");
            self.pdf = Some(artifact);
        } else {
            self.text = text.to_string();
        }
        self.kind = MessageKind::Report;
    }

    /// In-place update for a binary PDF response body.
    pub fn resolve_pdf(&mut self, artifact: PdfArtifact) {
        self.text = PDF_READY_TEXT.to_string();
        self.pdf = Some(artifact);
        self.kind = MessageKind::Normal;
    }

    pub fn resolve_error(&mut self) {
        self.text = SUBMISSION_ERROR_TEXT.to_string();
        self.pdf = None;
        self.kind = MessageKind::Error;
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = vec![];

        for full_line in self.text.split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut current = String::new();
            for word in full_line.split(' ') {
                if !current.is_empty() && current.len() + word.len() + 1 > line_max_width {
                    lines.push(current.trim_end().to_string());
                    current = String::new();
                }
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
            }
            if !current.is_empty() {
                lines.push(current.trim_end().to_string());
            }
        }

        return lines;
    }
}
