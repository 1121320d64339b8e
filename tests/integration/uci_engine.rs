//! Drives [`UciEngine`] against a small shell script that speaks enough UCI
//! to answer handshakes, searches and legality probes.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt};
use ucimate::cli::app::CONFIG_DIR_ENV;
use ucimate::cli::BoardStyle;
use ucimate::engine::{EngineAdapter, EngineError, EngineOptions, UciEngine};
use ucimate::session::{SessionLoop, SessionSettings, TurnCoordinator};
use ucimate::Color;

const FAKE_ENGINE: &str = r#"#!/bin/sh
while IFS= read -r line; do
  case "$line" in
    uci) echo "id name fake"; echo "uciok" ;;
    isready) echo "readyok" ;;
    quit) exit 0 ;;
    "go depth 1 searchmoves "*)
      mv=${line##* }
      case "$mv" in
        e2e4|d2d4|g1f3) echo "bestmove $mv" ;;
        *) echo "bestmove (none)" ;;
      esac ;;
    go*) echo "info depth 10 score cp 20 pv e7e5"; echo "bestmove e7e5 ponder g1f3" ;;
  esac
done
"#;

fn write_fake_engine(dir: &Path) -> PathBuf {
    let path = dir.join("fake-engine.sh");
    std::fs::write(&path, FAKE_ENGINE).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn options() -> EngineOptions {
    EngineOptions {
        response_timeout: Duration::from_secs(5),
        ..EngineOptions::default()
    }
}

// Everything that spawns lives in one test so no other thread forks while
// the script is still open for writing.
#[tokio::test]
async fn test_uci_engine_process() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_fake_engine(dir.path());

    // Adapter operations
    let mut engine = UciEngine::start(&script, &options()).await.unwrap();
    engine
        .synchronize("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
        .await
        .unwrap();
    assert_eq!(engine.best_move(10).await.unwrap(), Some("e7e5".to_string()));
    assert!(engine.is_legal("e2e4").await.unwrap());
    assert!(!engine.is_legal("e3e4").await.unwrap());
    assert!(!engine.is_legal("start").await.unwrap());
    assert!(!engine.is_legal("e2e9").await.unwrap());
    engine.close().await.unwrap();
    engine.close().await.unwrap();
    assert!(matches!(
        engine.best_move(10).await,
        Err(EngineError::Closed)
    ));

    // Launch failure
    let missing = dir.path().join("no-such-engine");
    let result = UciEngine::start(&missing, &options()).await;
    assert!(matches!(result, Err(EngineError::Launch { .. })));

    // A whole session over the real process
    let engine = UciEngine::start(&script, &options()).await.unwrap();
    let settings = SessionSettings {
        automated_color: Some(Color::Black),
        engine_path: script.clone(),
        ..SessionSettings::default()
    };
    let mut session = SessionLoop::new(
        TurnCoordinator::new(settings, engine),
        BoardStyle::Ascii,
        Vec::new(),
    );
    session
        .run(
            (&b"start\ne2e4\nshowfen\nexit\n"[..]).lines(),
            std::future::pending::<()>(),
        )
        .await
        .unwrap();

    let out = String::from_utf8(session.writer().clone()).unwrap();
    assert!(out.contains("FEN: rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"));
    assert!(!session.coordinator().is_running());

    // Ctrl-C while the terminal is still open ends the binary
    let config_dir = tempfile::tempdir().unwrap();
    let mut app = tokio::process::Command::new(env!("CARGO_BIN_EXE_ucimate"))
        .arg("--engine-path")
        .arg(&script)
        .env(CONFIG_DIR_ENV, config_dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .unwrap();
    let _terminal = app.stdin.take().unwrap();
    let mut stdout = app.stdout.take().unwrap();

    let mut shown = Vec::new();
    tokio::time::timeout(Duration::from_secs(10), async {
        let mut buf = [0u8; 256];
        while !String::from_utf8_lossy(&shown).contains("# ") {
            let n = stdout.read(&mut buf).await.unwrap();
            assert!(n > 0, "ucimate exited before prompting");
            shown.extend_from_slice(&buf[..n]);
        }
    })
    .await
    .expect("first prompt shown");
    // Let the loop park on input with the signal handler installed
    tokio::time::sleep(Duration::from_millis(300)).await;

    let pid = app.id().expect("ucimate still running");
    let sent = std::process::Command::new("kill")
        .args(["-INT", &pid.to_string()])
        .status()
        .unwrap();
    assert!(sent.success());

    let status = tokio::time::timeout(Duration::from_secs(10), app.wait())
        .await
        .expect("ucimate exits after Ctrl-C")
        .unwrap();
    assert!(status.success());
}
