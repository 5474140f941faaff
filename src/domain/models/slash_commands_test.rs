use super::SlashCommand;

#[test]
fn it_parses_quit() {
    for cmd in ["/q", "/quit", "/exit"] {
        assert!(SlashCommand::parse(cmd).unwrap().is_quit());
    }
}

#[test]
fn it_parses_new_chat() {
    assert!(SlashCommand::parse("/new").unwrap().is_new_chat());
    assert!(SlashCommand::parse("/n").unwrap().is_new_chat());
}

#[test]
fn it_parses_attach_with_path() {
    let cmd = SlashCommand::parse("/attach ./notes.pdf").unwrap();
    assert!(cmd.is_attach());
    assert_eq!(cmd.args, vec!["./notes.pdf".to_string()]);
}

#[test]
fn it_parses_detach() {
    assert!(SlashCommand::parse("/detach").unwrap().is_detach());
}

#[test]
fn it_parses_delete_with_index() {
    let cmd = SlashCommand::parse("/delete 2").unwrap();
    assert!(cmd.is_delete_chat());
    assert_eq!(cmd.args, vec!["2".to_string()]);
}

#[test]
fn it_parses_select() {
    assert!(SlashCommand::parse("/select 1").unwrap().is_select_chat());
    assert!(SlashCommand::parse("/s 1").unwrap().is_select_chat());
}

#[test]
fn it_ignores_plain_prompts() {
    assert!(SlashCommand::parse("tell me about solar energy").is_none());
    assert!(SlashCommand::parse("/unknown").is_none());
}
