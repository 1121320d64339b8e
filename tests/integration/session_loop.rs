use crate::common::{settings_with_engine_as, EngineProbe, ScriptedEngine};
use std::future::{pending, ready};
use tokio::io::AsyncBufReadExt;
use ucimate::cli::BoardStyle;
use ucimate::session::{ChannelLines, SessionError, SessionLoop, TurnCoordinator};
use ucimate::Color;

type ScriptedLoop = SessionLoop<ScriptedEngine, Vec<u8>>;

fn session(
    engine_color: Option<Color>,
    replies: &[&str],
    style: BoardStyle,
) -> (ScriptedLoop, EngineProbe) {
    let (engine, probe) = ScriptedEngine::new(replies);
    let coordinator = TurnCoordinator::new(settings_with_engine_as(engine_color), engine);
    (SessionLoop::new(coordinator, style, Vec::new()), probe)
}

async fn play(session: &mut ScriptedLoop, input: &str) -> Result<(), SessionError> {
    session.run(input.as_bytes().lines(), pending::<()>()).await
}

fn output(session: &ScriptedLoop) -> String {
    String::from_utf8(session.writer().clone()).expect("output is UTF-8")
}

fn boards_drawn(output: &str) -> usize {
    output.matches('┌').count()
}

#[tokio::test]
async fn test_start_move_exit() {
    let (mut session, probe) = session(Some(Color::Black), &["e7e5"], BoardStyle::Unicode);

    play(&mut session, "start\ne2e4\nexit\n").await.unwrap();

    let out = output(&session);
    assert!(out.starts_with("# "));
    assert!(out.contains("Game started ▫ turn: white# "));
    assert_eq!(boards_drawn(&out), 2);
    assert_eq!(session.history(), ["start", "e2e4", "exit"]);
    assert_eq!(session.coordinator().turn_indicator(), None);
    assert_eq!(probe.close_count(), 1);
}

#[tokio::test]
async fn test_exit_before_start() {
    let (mut session, probe) = session(Some(Color::Black), &[], BoardStyle::Unicode);

    play(&mut session, "exit\n").await.unwrap();

    let out = output(&session);
    assert_eq!(out, "# ");
    assert_eq!(probe.close_count(), 1);
    assert!(probe.requests().is_empty());
}

#[tokio::test]
async fn test_end_of_input_releases_engine() {
    let (mut session, probe) = session(None, &[], BoardStyle::Unicode);

    play(&mut session, "start\ne2e4").await.unwrap();

    assert!(output(&session).ends_with("turn: black# \n"));
    assert_eq!(probe.close_count(), 1);
}

#[tokio::test]
async fn test_illegal_move_reported_in_next_prompt() {
    let (mut session, probe) = session(Some(Color::Black), &[], BoardStyle::Unicode);

    play(&mut session, "start\ne3e4\n").await.unwrap();

    let out = output(&session);
    assert!(out.contains("Illegal move ▫ turn: white# "));
    assert_eq!(probe.count("go depth"), 0);
}

#[tokio::test]
async fn test_messages_shown_once() {
    let (mut session, _probe) = session(None, &[], BoardStyle::Unicode);

    play(&mut session, "start\ne3e4\n\n").await.unwrap();

    let out = output(&session);
    assert_eq!(out.matches("Illegal move").count(), 1);
    assert_eq!(out.matches("Game started").count(), 1);
    assert!(out.ends_with("turn: white# turn: white# \n"));
    assert_eq!(session.slots().info(), None);
    assert_eq!(session.slots().error(), None);
}

#[tokio::test]
async fn test_stopped_game_not_redrawn() {
    let (mut session, probe) = session(None, &[], BoardStyle::Unicode);

    play(&mut session, "start\nstop\ne2e4\n").await.unwrap();

    let out = output(&session);
    assert_eq!(boards_drawn(&out), 1);
    assert!(out.contains("Game stopped# "));
    assert_eq!(probe.count("legal"), 0);
}

#[tokio::test]
async fn test_game_over_redraws_final_position() {
    let (mut session, _probe) = session(Some(Color::Black), &["(none)"], BoardStyle::Unicode);

    play(&mut session, "start\ne2e4\n").await.unwrap();

    let out = output(&session);
    assert_eq!(boards_drawn(&out), 2);
    assert!(out.contains("Game over: black has no legal moves# "));
    assert!(!session.coordinator().is_running());
}

#[tokio::test]
async fn test_fatal_engine_error_ends_session() {
    let (mut session, probe) = session(Some(Color::Black), &[], BoardStyle::Unicode);

    let result = play(&mut session, "start\ne2e4\nshowfen\n").await;

    assert!(matches!(result, Err(SessionError::Engine(_))));
    assert!(!output(&session).contains("FEN: "));
    assert_eq!(probe.close_count(), 1);
}

#[tokio::test]
async fn test_showfen() {
    let (mut session, _probe) = session(None, &[], BoardStyle::Unicode);

    play(&mut session, "showfen\nstart\nshowfen\n").await.unwrap();

    let out = output(&session);
    assert!(out.contains("No game in progress# "));
    assert!(out.contains("FEN: rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1\n"));
}

#[tokio::test]
async fn test_help_lists_commands() {
    let (mut session, _probe) = session(None, &[], BoardStyle::Unicode);

    play(&mut session, "help\n").await.unwrap();

    let out = output(&session);
    assert!(out.contains("Commands:"));
    for token in ["start", "stop", "exit", "showfen", "help"] {
        assert!(out.contains(token));
    }
}

#[tokio::test]
async fn test_shutdown_releases_engine() {
    let (mut session, probe) = session(None, &[], BoardStyle::Unicode);
    // Writer half kept alive so the input never ends on its own
    let (_writer, reader) = tokio::io::duplex(64);

    session
        .run(tokio::io::BufReader::new(reader).lines(), ready(()))
        .await
        .unwrap();

    assert_eq!(probe.close_count(), 1);
}

#[cfg(unix)]
#[test]
fn test_runtime_shuts_down_with_input_still_open() {
    use std::os::unix::net::UnixStream;
    use std::time::Duration;

    // The terminal end stays open, so the reader thread never sees EOF
    let (_terminal, input_end) = UnixStream::pair().unwrap();
    let (done_tx, done_rx) = std::sync::mpsc::channel();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let closes = runtime.block_on(async {
            let (mut session, probe) = session(None, &[], BoardStyle::Unicode);
            let input = ChannelLines::spawn(input_end).unwrap();
            session.run(input, ready(())).await.unwrap();
            probe.close_count()
        });
        drop(runtime);
        let _ = done_tx.send(closes);
    });

    assert_eq!(done_rx.recv_timeout(Duration::from_secs(5)), Ok(1));
}

#[tokio::test]
async fn test_engine_plays_white_at_start() {
    let (mut session, _probe) = session(Some(Color::White), &["e2e4"], BoardStyle::Ascii);

    play(&mut session, "start\n").await.unwrap();

    let out = output(&session);
    assert!(out.contains("4 │ . │ . │ . │ . │ P │ . │ . │ . │ 4"));
    assert!(out.contains("Game started ▫ turn: black# "));
}
