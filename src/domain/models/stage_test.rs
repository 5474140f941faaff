use super::StageBoard;
use super::StageStatus;

fn statuses(board: &StageBoard) -> Vec<StageStatus> {
    return board
        .stages()
        .iter()
        .map(|stage| return stage.status)
        .collect();
}

#[test]
fn it_starts_all_pending() {
    let board = StageBoard::default();
    assert_eq!(statuses(&board), vec![StageStatus::Pending; 4]);
    assert!(!board.is_processing());
}

#[test]
fn it_begins_submissions() {
    let mut board = StageBoard::default();
    board.begin();

    assert_eq!(
        statuses(&board),
        vec![
            StageStatus::Completed,
            StageStatus::Active,
            StageStatus::Pending,
            StageStatus::Pending
        ]
    );
    assert_eq!(board.active().unwrap().name, "Web Search Agent");
}

#[test]
fn it_advances_one_stage_at_a_time() {
    let mut board = StageBoard::default();
    board.begin();
    board.advance();

    assert_eq!(
        statuses(&board),
        vec![
            StageStatus::Completed,
            StageStatus::Completed,
            StageStatus::Active,
            StageStatus::Pending
        ]
    );

    let active = statuses(&board)
        .iter()
        .filter(|status| return **status == StageStatus::Active)
        .count();
    assert_eq!(active, 1);
}

#[test]
fn it_completes_the_board() {
    let mut board = StageBoard::default();
    board.begin();
    board.complete_all();

    assert_eq!(statuses(&board), vec![StageStatus::Completed; 4]);
    assert!(!board.is_processing());
}

#[test]
fn it_fails_only_the_active_stage() {
    let mut board = StageBoard::default();
    board.begin();
    board.fail_active();

    assert_eq!(
        statuses(&board),
        vec![
            StageStatus::Completed,
            StageStatus::Failed,
            StageStatus::Pending,
            StageStatus::Pending
        ]
    );
    assert!(!board.is_processing());

    // A second failure has nothing left to flip.
    board.fail_active();
    assert_eq!(statuses(&board)[1], StageStatus::Failed);
}

#[test]
fn it_resets_to_pending() {
    let mut board = StageBoard::default();
    board.begin();
    board.advance();
    board.reset();

    assert_eq!(statuses(&board), vec![StageStatus::Pending; 4]);
}

#[test]
fn it_ignores_advance_without_an_active_stage() {
    let mut board = StageBoard::default();
    board.advance();
    assert_eq!(statuses(&board), vec![StageStatus::Pending; 4]);
}
