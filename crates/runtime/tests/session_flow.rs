//! End-to-end sessions driven through [`RuntimeHandle`].

use std::time::Duration;

use async_trait::async_trait;
use game_core::{
    Action, ErrorSeverity, GameConfig, GameOutcome, GameState, Grid, MoveError, Phase,
    PlanOutcome, Position, Side, SubmitError,
};
use runtime::{
    ActionProvider, Event, GameStateEvent, Runtime, RuntimeConfig, RuntimeError, StayActionProvider,
    Topic,
};
use tokio::sync::broadcast;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

fn quiet_config() -> RuntimeConfig {
    let mut config = RuntimeConfig::instant();
    config.game_config = GameConfig::default().with_powerup_spawn_chance(0.0);
    config
}

fn open_board(player: Position, ai: Position) -> GameState {
    GameState::new(Grid::open(20), player, ai)
}

async fn next_event(rx: &mut broadcast::Receiver<Event>) -> Event {
    timeout(WAIT, rx.recv())
        .await
        .expect("event should arrive in time")
        .expect("event bus should stay open")
}

#[tokio::test]
async fn bent_shot_ends_the_duel() {
    let mut state = open_board(Position::new(5, 5), Position::new(10, 10));
    state.units.player = state.units.player.with_weapon_level(3);

    let runtime = Runtime::builder()
        .config(quiet_config())
        .seed(1)
        .initial_state(state)
        .ai_provider(StayActionProvider)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut game_rx = handle.subscribe(Topic::GameState);

    let first = handle.request_shoot_waypoint(Position::new(5, 10)).await.unwrap();
    assert!(matches!(first, PlanOutcome::Pending { remaining: 2, .. }));

    let preview = handle.preview_waypoint(Position::new(10, 10)).await.unwrap();
    assert!(preview.legal);

    handle.request_shoot_waypoint(Position::new(10, 10)).await.unwrap();
    let resolution = handle.commit_plan().await.unwrap();
    assert!(resolution.game_over);

    let Event::GameState(GameStateEvent::ActionResolved(published)) =
        next_event(&mut game_rx).await
    else {
        panic!("expected the resolution to be published first");
    };
    assert_eq!(published.side, Side::Player);

    let Event::GameState(GameStateEvent::GameOver { outcome }) = next_event(&mut game_rx).await
    else {
        panic!("expected game over");
    };
    assert_eq!(
        outcome,
        GameOutcome::Victory {
            winner: Side::Player,
            bends: 1
        }
    );

    let err = handle.request_move(Position::new(5, 6)).await.unwrap_err();
    assert_eq!(err.rejection_code(), Some("SUBMIT_GAME_OVER"));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn move_into_opponent_is_rejected() {
    let runtime = Runtime::builder()
        .config(quiet_config())
        .initial_state(open_board(Position::new(5, 5), Position::new(5, 6)))
        .ai_provider(StayActionProvider)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut game_rx = handle.subscribe(Topic::GameState);

    let err = handle.request_move(Position::new(5, 6)).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Rejected(SubmitError::Move(MoveError::Occupied { .. }))
    ));

    let Event::GameState(GameStateEvent::ActionRejected {
        side,
        code,
        severity,
        ..
    }) =
        next_event(&mut game_rx).await
    else {
        panic!("expected a rejection event");
    };
    assert_eq!(side, Side::Player);
    assert_eq!(code, "MOVE_OCCUPIED");
    assert_eq!(severity, ErrorSeverity::Recoverable);

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.units.player.position, Position::new(5, 5));
    assert_eq!(state.phase(), Phase::Planning);
    assert_eq!(state.active_side(), Side::Player);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn turn_passes_to_the_ai_and_back() {
    let runtime = Runtime::builder()
        .config(quiet_config())
        .initial_state(open_board(Position::new(1, 1), Position::new(18, 18)))
        .ai_provider(StayActionProvider)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut turn_rx = handle.subscribe(Topic::Turn);

    handle.request_move(Position::new(1, 2)).await.unwrap();

    let Event::Turn(ai_turn) = next_event(&mut turn_rx).await else {
        panic!("expected a turn event");
    };
    assert_eq!(ai_turn.side, Side::Ai);
    assert_eq!(ai_turn.turn, 1);

    let Event::Turn(player_turn) = next_event(&mut turn_rx).await else {
        panic!("expected a turn event");
    };
    assert_eq!(player_turn.side, Side::Player);
    assert_eq!(player_turn.turn, 2);

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.units.player.position, Position::new(1, 2));
    assert_eq!(state.units.ai.position, Position::new(18, 18));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn input_is_refused_while_resolving() {
    let mut config = quiet_config();
    config.inter_turn_pause = Duration::from_millis(300);

    let runtime = Runtime::builder()
        .config(config)
        .initial_state(open_board(Position::new(1, 1), Position::new(18, 18)))
        .ai_provider(StayActionProvider)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    handle.request_move(Position::new(1, 2)).await.unwrap();
    let err = handle.request_move(Position::new(1, 3)).await.unwrap_err();
    assert_eq!(err.rejection_code(), Some("SUBMIT_RESOLVING"));
    assert_eq!(handle.query_state().await.unwrap().phase(), Phase::Resolving);

    tokio::time::sleep(Duration::from_millis(700)).await;
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.active_side(), Side::Player);
    assert_eq!(state.phase(), Phase::Planning);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

struct BrokenProvider;

#[async_trait]
impl ActionProvider for BrokenProvider {
    async fn provide_action(&self, side: Side, _state: &GameState) -> runtime::Result<Action> {
        Err(RuntimeError::Provider {
            side,
            message: "unplugged".into(),
        })
    }
}

struct WallWalker;

#[async_trait]
impl ActionProvider for WallWalker {
    async fn provide_action(&self, _side: Side, state: &GameState) -> runtime::Result<Action> {
        let at = state.units.ai.position;
        Ok(Action::Move {
            target: Position::new(at.x + 5, at.y),
        })
    }
}

async fn ai_falls_back_to_stay(provider: impl ActionProvider + 'static) {
    let runtime = Runtime::builder()
        .config(quiet_config())
        .initial_state(open_board(Position::new(1, 1), Position::new(18, 18)))
        .ai_provider(provider)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut turn_rx = handle.subscribe(Topic::Turn);

    handle.submit_action(Side::Player, Action::Stay).await.unwrap();
    for expected in [Side::Ai, Side::Player] {
        let Event::Turn(turn) = next_event(&mut turn_rx).await else {
            panic!("expected a turn event");
        };
        assert_eq!(turn.side, expected);
    }

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.units.ai.position, Position::new(18, 18));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn failing_provider_passes_the_turn() {
    ai_falls_back_to_stay(BrokenProvider).await;
}

#[tokio::test]
async fn illegal_ai_action_passes_the_turn() {
    ai_falls_back_to_stay(WallWalker).await;
}

#[tokio::test]
async fn reset_starts_a_generated_session() {
    let runtime = Runtime::builder()
        .config(quiet_config())
        .seed(42)
        .initial_state(open_board(Position::new(1, 1), Position::new(18, 18)))
        .ai_provider(StayActionProvider)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut game_rx = handle.subscribe(Topic::GameState);

    handle.request_move(Position::new(1, 2)).await.unwrap();
    let state = handle.reset().await.unwrap();

    assert_eq!(state.turn.turn, 0);
    assert_eq!(state.phase(), Phase::Planning);
    assert_eq!(state.active_side(), Side::Player);
    assert!(state.grid.is_connected());
    assert_eq!(state.units.player.weapon_level, 1);

    let mut saw_reset = false;
    while let Ok(event) = game_rx.try_recv() {
        if let Event::GameState(GameStateEvent::SessionReset { player, ai, .. }) = event {
            assert_eq!(player, state.units.player.position);
            assert_eq!(ai, state.units.ai.position);
            saw_reset = true;
        }
    }
    assert!(saw_reset);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn ai_planner_punishes_a_player_left_in_line() {
    let runtime = Runtime::builder()
        .config(quiet_config())
        .seed(9)
        .initial_state(open_board(Position::new(3, 3), Position::new(3, 15)))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut game_rx = handle.subscribe(Topic::GameState);

    handle.submit_action(Side::Player, Action::Stay).await.unwrap();

    let outcome = loop {
        if let Event::GameState(GameStateEvent::GameOver { outcome }) =
            next_event(&mut game_rx).await
        {
            break outcome;
        }
    };
    assert_eq!(outcome.winner(), Some(Side::Ai));

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.phase(), Phase::GameOver);

    drop(handle);
    runtime.shutdown().await.unwrap();
}
