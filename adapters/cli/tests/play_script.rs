use std::{
    io::Write,
    path::PathBuf,
    process::{Command, Output, Stdio},
};

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tilecraft-cli-{}-{name}", std::process::id()))
}

fn tilecraft(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tilecraft"))
        .args(args)
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("tilecraft binary starts");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("script is written");
    child.wait_with_output().expect("tilecraft exits")
}

#[test]
fn play_session_moves_the_player_and_exports() {
    let export = scratch("export.json");
    let script = format!(
        "paint 1 1 player\nd\nexport {}\nquit\n",
        export.display()
    );

    let output = tilecraft(&["play", "--seed", "7", "--unlimited-moves"], &script);
    assert!(output.status.success(), "play should exit cleanly");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(".@.......\n"), "player drawn at 1,1:\n{stdout}");
    assert!(stdout.contains("..@......\n"), "player moved east:\n{stdout}");

    let json = std::fs::read_to_string(&export).expect("board was exported");
    let _ = std::fs::remove_file(&export);
    assert!(json.contains("\"rows\": 9"), "{json}");
    assert!(json.contains("\"type\": \"player\""), "{json}");
}

#[test]
fn new_then_show_prints_an_empty_board() {
    let board = scratch("new.json");
    let _ = std::fs::remove_file(&board);
    let path = board.to_string_lossy().into_owned();

    let created = tilecraft(&["new", &path, "--rows", "2", "--cols", "3"], "");
    assert!(created.status.success(), "new should succeed");

    let refused = tilecraft(&["new", &path], "");
    assert!(!refused.status.success(), "existing files are not overwritten");

    let shown = tilecraft(&["show", &path], "");
    let _ = std::fs::remove_file(&board);
    assert!(shown.status.success(), "show should succeed");
    assert!(String::from_utf8_lossy(&shown.stdout).starts_with("...\n...\n"));
}
