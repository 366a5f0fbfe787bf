mod config;
mod game_runner;
mod leaderboard_client;
mod pacing;
mod terminal_ui;

use std::time::Duration;

use clap::Parser;
use common::config::Validate;
use common::games::SessionRng;
use common::logger::{self, LogTarget};
use common::{Username, log};
use tokio::io::{AsyncBufReadExt, BufReader};

use config::{AiSpeed, Config};
use game_runner::{Flow, GameRunner};
use leaderboard_client::{LeaderboardClient, WinRecorder};

#[derive(Parser)]
#[command(name = "tictactoe_client", about = "Play tic-tac-toe against an unbeatable computer")]
struct Args {
    /// Path to the YAML config file (defaults to one next to the executable)
    #[arg(long)]
    config: Option<String>,

    /// Leaderboard server address, overrides the config file
    #[arg(long, conflicts_with = "offline")]
    server: Option<String>,

    /// Play without a leaderboard server
    #[arg(long)]
    offline: bool,

    /// Name to record wins under for this session
    #[arg(long)]
    username: Option<String>,

    /// AI pacing: fast, normal or smooth
    #[arg(long)]
    speed: Option<AiSpeed>,

    /// Seed for the computer's opening choice, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

/// Command-line values apply to this session only; the file keeps its own.
fn resolve_config(args: &Args, file_config: Config) -> Result<Config, String> {
    let mut config = file_config;

    if let Some(ref server) = args.server {
        config.server.address = Some(server.clone());
    }
    if args.offline {
        config.server.address = None;
    }
    if let Some(ref username) = args.username {
        config.set_username(username)?;
    }
    if let Some(speed) = args.speed {
        config.ai_speed = speed;
    }

    config.validate()?;
    Ok(config)
}

fn build_recorder(config: &Config) -> WinRecorder {
    let Some(ref address) = config.server.address else {
        return WinRecorder::Offline;
    };

    let timeout = Duration::from_millis(u64::from(config.server.connect_timeout_ms));
    match LeaderboardClient::new(address, timeout) {
        Ok(client) => {
            log!("Using leaderboard server at {}", client.address());
            WinRecorder::Remote(client)
        }
        Err(e) => {
            log!("{}, playing offline", e);
            WinRecorder::Offline
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    // stdout belongs to the board
    logger::init_logger_with_target(prefix, LogTarget::Stderr);

    let config_manager = config::get_config_manager(args.config.as_deref());
    let config = resolve_config(&args, config_manager.get_config()?)?;

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Session seed {}", rng.seed());

    let username: Option<Username> = config.username();
    let recorder = build_recorder(&config);

    let mut runner = GameRunner::new(config.ai_speed, username, recorder, rng, std::io::stdout())
        .with_config_manager(config_manager);
    runner.start()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if runner.handle_line(&line).await? == Flow::Quit {
            break;
        }
    }

    log!("Bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["tictactoe_client"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_overrides_apply() {
        let config = resolve_config(
            &args(&["--server", "http://127.0.0.1:7000", "--username", " Eve ", "--speed", "smooth"]),
            Config::default(),
        )
        .unwrap();
        assert_eq!(config.server.address.as_deref(), Some("http://127.0.0.1:7000"));
        assert_eq!(config.username.as_deref(), Some("Eve"));
        assert_eq!(config.ai_speed, AiSpeed::Smooth);
    }

    #[test]
    fn test_offline_flag_clears_server() {
        let config = resolve_config(&args(&["--offline"]), Config::default()).unwrap();
        assert!(config.server.address.is_none());
        assert!(build_recorder(&config).is_offline());
    }

    #[test]
    fn test_invalid_username_rejected() {
        let long = "n".repeat(30);
        assert!(resolve_config(&args(&["--username", &long]), Config::default()).is_err());
    }

    #[test]
    fn test_server_and_offline_conflict() {
        assert!(Args::try_parse_from(["tictactoe_client", "--offline", "--server", "http://x"]).is_err());
    }
}
