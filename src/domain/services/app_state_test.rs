use anyhow::Result;
use tokio::sync::mpsc;

use super::AppState;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::MessageKind;
use crate::domain::models::PdfArtifact;
use crate::domain::models::StageStatus;
use crate::domain::models::SubmissionOutcome;
use crate::domain::models::UserIdentity;
use crate::domain::models::PLACEHOLDER_TEXT;
use crate::domain::models::SUBMISSION_ERROR_TEXT;

fn identity() -> UserIdentity {
    return UserIdentity {
        username: "alice".to_string(),
        ..UserIdentity::default()
    };
}

#[test]
fn it_appends_the_user_turn_and_placeholder_together() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::new(identity());
    let before = app_state.messages.len();

    app_state.submit("What's the state of rust?", &tx)?;

    assert_eq!(app_state.messages.len(), before + 2);

    let user_turn = &app_state.messages[before];
    assert_eq!(user_turn.author, Author::User);
    assert_eq!(user_turn.text, "What's the state of rust?");

    let placeholder = app_state.messages.last().unwrap();
    assert_eq!(placeholder.author, Author::Dossier);
    assert_eq!(placeholder.text, PLACEHOLDER_TEXT);

    let statuses = app_state
        .stages
        .stages()
        .iter()
        .map(|stage| return stage.status)
        .collect::<Vec<StageStatus>>();
    assert_eq!(
        statuses,
        vec![
            StageStatus::Completed,
            StageStatus::Active,
            StageStatus::Pending,
            StageStatus::Pending
        ]
    );

    match rx.try_recv()? {
        Action::PipelineSubmit(request) => {
            assert_eq!(request.placeholder_id, placeholder.id);
            assert_eq!(request.query, "What's the state of rust?");
        }
        Action::PipelineAbortAll() => panic!("expected a submit action"),
    }

    return Ok(());
}

#[test]
fn it_ignores_empty_submissions() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::new(identity());
    let before = app_state.messages.len();

    app_state.submit("   ", &tx)?;

    assert_eq!(app_state.messages.len(), before);
    assert!(rx.try_recv().is_err());

    return Ok(());
}

#[test]
fn it_summarizes_the_thread_on_first_submission_only() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::new(identity());

    let long = "a".repeat(60);
    app_state.submit(&long, &tx)?;

    assert_eq!(app_state.history.entries().len(), 1);
    assert_eq!(
        app_state.history.entries()[0].title,
        format!("{}...", "a".repeat(50))
    );
    assert!(app_state.history.current().is_some());

    app_state.submit("followup question", &tx)?;
    assert_eq!(app_state.history.entries().len(), 1);

    return Ok(());
}

#[test]
fn it_resolves_reports_in_place() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::new(identity());

    app_state.submit("solar power", &tx)?;
    let placeholder_id = app_state.messages.last().unwrap().id;

    app_state.handle_pipeline_outcome(
        placeholder_id,
        SubmissionOutcome::Report {
            text: "Solar Report\n\nAll good.".to_string(),
            pdf: None,
        },
    );

    let resolved = app_state.messages.last().unwrap();
    assert_eq!(resolved.id, placeholder_id);
    assert_eq!(resolved.text, "Solar Report\n\nAll good.");
    assert_eq!(resolved.kind(), MessageKind::Report);

    assert!(app_state
        .stages
        .stages()
        .iter()
        .all(|stage| return stage.status == StageStatus::Completed));

    return Ok(());
}

#[test]
fn it_resolves_pdf_outcomes_in_place() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::new(identity());

    app_state.submit("solar power", &tx)?;
    let placeholder_id = app_state.messages.last().unwrap().id;

    app_state.handle_pipeline_outcome(
        placeholder_id,
        SubmissionOutcome::Pdf(PdfArtifact {
            location: "/tmp/report-1.pdf".to_string(),
            filename: "report-1.pdf".to_string(),
        }),
    );

    let resolved = app_state.messages.last().unwrap();
    assert_eq!(resolved.pdf.as_ref().unwrap().filename, "report-1.pdf");

    return Ok(());
}

#[test]
fn it_drops_outcomes_for_cleared_placeholders() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::new(identity());

    app_state.submit("solar power", &tx)?;
    let before = app_state
        .messages
        .iter()
        .map(|message| return message.text.to_string())
        .collect::<Vec<String>>();

    app_state.handle_pipeline_outcome(
        999,
        SubmissionOutcome::Report {
            text: "late".to_string(),
            pdf: None,
        },
    );

    let after = app_state
        .messages
        .iter()
        .map(|message| return message.text.to_string())
        .collect::<Vec<String>>();
    assert_eq!(before, after);

    return Ok(());
}

#[test]
fn it_marks_failures_on_the_placeholder() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::new(identity());

    app_state.submit("solar power", &tx)?;
    let placeholder_id = app_state.messages.last().unwrap().id;

    app_state.handle_pipeline_failed(placeholder_id);

    let resolved = app_state.messages.last().unwrap();
    assert_eq!(resolved.text, SUBMISSION_ERROR_TEXT);
    assert_eq!(resolved.kind(), MessageKind::Error);
    assert_eq!(app_state.stages.stages()[1].status, StageStatus::Failed);

    return Ok(());
}

#[test]
fn it_starts_new_chats_and_aborts_workers() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::new(identity());

    app_state.submit("solar power", &tx)?;
    app_state.new_chat(&tx)?;

    assert!(app_state.messages.is_empty());
    assert!(app_state.history.current().is_none());
    assert_eq!(app_state.history.entries().len(), 1);
    assert!(!app_state.stages.is_processing());

    // First the submit, then the abort.
    assert!(matches!(rx.try_recv()?, Action::PipelineSubmit(_)));
    assert!(matches!(rx.try_recv()?, Action::PipelineAbortAll()));

    return Ok(());
}

#[test]
fn it_deletes_chats_by_sidebar_index() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::new(identity());

    app_state.submit("solar power", &tx)?;
    let messages_before = app_state.messages.len();

    let (_, handled) = app_state.handle_slash_commands("/delete 1", &tx)?;
    assert!(handled);
    assert!(app_state.history.entries().is_empty());
    assert!(app_state.history.current().is_none());

    // Deleting a summary never touches the live conversation.
    assert_eq!(app_state.messages.len(), messages_before);

    app_state.handle_slash_commands("/delete 1", &tx)?;
    assert!(app_state.history.entries().is_empty());

    return Ok(());
}

#[test]
fn it_attaches_files_for_the_next_submission() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::new(identity());

    let upload_path =
        std::env::temp_dir().join(format!("dossier-attach-{}.csv", uuid::Uuid::new_v4()));
    std::fs::write(&upload_path, "year,count\n")?;

    let (_, handled) = app_state
        .handle_slash_commands(&format!("/attach {}", upload_path.to_string_lossy()), &tx)?;
    assert!(handled);
    assert!(app_state.pending_upload.is_some());

    app_state.submit("summarize this", &tx)?;
    assert!(app_state.pending_upload.is_none());

    match rx.try_recv()? {
        Action::PipelineSubmit(request) => {
            assert_eq!(
                request.upload.unwrap().file_name,
                upload_path.file_name().unwrap().to_string_lossy()
            );
        }
        Action::PipelineAbortAll() => panic!("expected a submit action"),
    }

    let user_turn = &app_state.messages[app_state.messages.len() - 2];
    assert!(user_turn.attachment.is_some());

    std::fs::remove_file(&upload_path)?;

    return Ok(());
}

#[test]
fn it_rejects_attachments_that_do_not_exist() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::new(identity());

    app_state.handle_slash_commands("/attach /nowhere/missing.csv", &tx)?;

    assert!(app_state.pending_upload.is_none());
    assert!(app_state
        .messages
        .last()
        .unwrap()
        .text
        .contains("No file found"));

    return Ok(());
}

#[test]
fn it_falls_back_to_the_attachment_name_for_thread_titles() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::new(identity());

    let upload_path =
        std::env::temp_dir().join(format!("dossier-title-{}.csv", uuid::Uuid::new_v4()));
    std::fs::write(&upload_path, "year,count\n")?;

    app_state.handle_slash_commands(&format!("/attach {}", upload_path.to_string_lossy()), &tx)?;
    app_state.submit("", &tx)?;

    assert_eq!(
        app_state.history.entries()[0].title,
        upload_path.file_name().unwrap().to_string_lossy()
    );

    std::fs::remove_file(&upload_path)?;

    return Ok(());
}
