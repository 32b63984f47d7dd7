use duel_chess::ai::{AiEngine, TieredAi};
use duel_chess::config::AppConfig;
use duel_chess::engine::types::{ChessError, Difficulty};
use duel_chess::session::{GameMode, Session};

/// Self-play driver: the configured computer plays against an easy-tier
/// opponent standing in for the human, printing the board after every ply.
#[tokio::main]
async fn main() -> Result<(), ChessError> {
    // Initialize tracing (structured logging).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "duel_chess=info".into()),
        )
        .init();

    let config = AppConfig::from_env();
    let mode = GameMode::vs_computer(&config);
    let session = Session::with_mode(mode, &config);
    // Offset the stand-in's seed so both sides don't mirror each other.
    let mut stand_in = TieredAi::from_seed(config.seed.map(|s| s.wrapping_add(1)));

    tracing::info!(
        "duel-chess v{} self-play, computer plays {} at {}",
        env!("CARGO_PKG_VERSION"),
        config.computer_side,
        config.default_difficulty
    );

    session.start(mode).await;
    let computer = config.computer_side;
    let mut plies = 0;

    loop {
        let state = session.snapshot().await;
        if state.is_game_over() || plies >= config.max_plies {
            break;
        }

        if state.side_to_move() == computer {
            session.wait_for_reply().await;
        } else {
            let mv = stand_in.best_move(&state, Difficulty::Easy)?;
            session.play(mv).await?;
        }

        plies += 1;
        let state = session.snapshot().await;
        println!("ply {plies}: {}\n{}", state.status(), state.board());
    }

    let state = session.snapshot().await;
    match state.status().winner() {
        Some(winner) => println!("{winner} wins after {plies} plies"),
        None if state.is_game_over() => println!("draw by stalemate after {plies} plies"),
        None => println!("stopped after {plies} plies, {}", state.status()),
    }
    Ok(())
}
