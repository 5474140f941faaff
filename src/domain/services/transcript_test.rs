use super::Transcript;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::PdfArtifact;

fn line_text(line: &ratatui::text::Line<'_>) -> String {
    return line
        .spans
        .iter()
        .map(|span| return span.content.to_string())
        .collect::<Vec<String>>()
        .join("");
}

#[test]
fn it_flattens_messages_into_lines() {
    let mut transcript = Transcript::default();
    transcript.set_messages(
        &[
            Message::new(1, Author::User, "hello"),
            Message::new(2, Author::Dossier, "hi there"),
        ],
        80,
    );

    // Author, body, and separator per message.
    assert_eq!(transcript.len(), 6);
    assert_eq!(line_text(&transcript.lines[1]), "hello");
    assert_eq!(line_text(&transcript.lines[3]), "Dossier");
    assert_eq!(line_text(&transcript.lines[4]), "hi there");
}

#[test]
fn it_includes_attachment_echoes() {
    let mut transcript = Transcript::default();
    transcript.set_messages(
        &[Message::new(1, Author::User, "summarize this").with_attachment("data.csv")],
        80,
    );

    assert_eq!(line_text(&transcript.lines[2]), "Attached: data.csv");
}

#[test]
fn it_includes_pdf_links() {
    let mut message = Message::new(1, Author::Dossier, "placeholder");
    message.resolve_pdf(PdfArtifact {
        location: "/tmp/report-1.pdf".to_string(),
        filename: "report-1.pdf".to_string(),
    });

    let mut transcript = Transcript::default();
    transcript.set_messages(&[message], 120);

    let rendered = transcript
        .lines
        .iter()
        .map(line_text)
        .collect::<Vec<String>>()
        .join("\n");

    assert!(rendered.contains("Open: /tmp/report-1.pdf"));
    assert!(rendered.contains("/download-pdf/report-1.pdf"));
}

#[test]
fn it_wraps_to_the_requested_width() {
    let mut transcript = Transcript::default();
    transcript.set_messages(&[Message::new(1, Author::User, "one two three four five six")], 13);

    assert_eq!(line_text(&transcript.lines[1]), "one two three");
    assert_eq!(line_text(&transcript.lines[2]), "four five six");
}
