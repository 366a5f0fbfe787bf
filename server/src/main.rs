mod leaderboard_service;
mod server_config;
mod win_store;

use tonic::transport::Server;
use common::{leaderboard_service_server::LeaderboardServiceServer, logger, log};
use clap::Parser;
use leaderboard_service::LeaderboardServiceImpl;
use server_config::ServerConfig;
use win_store::WinStore;

#[derive(Parser)]
#[command(name = "tictactoe_server", about = "Win-count store for tic-tac-toe players")]
struct Args {
    /// Path to the YAML config file (defaults to one next to the executable)
    #[arg(long)]
    config: Option<String>,

    /// Address to listen on, overrides the config file
    #[arg(long)]
    address: Option<String>,

    /// File used to persist win counts, overrides the config file
    #[arg(long, conflicts_with = "in_memory")]
    data_file: Option<String>,

    /// Keep win counts in memory only
    #[arg(long)]
    in_memory: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

fn resolve_config(args: &Args) -> Result<ServerConfig, String> {
    let manager = server_config::get_config_manager(args.config.as_deref());
    let mut config = manager.get_config()?;

    if let Some(ref address) = args.address {
        config.listen_address = address.clone();
    }
    if let Some(ref data_file) = args.data_file {
        config.data_file = Some(data_file.clone());
    }
    if args.in_memory {
        config.data_file = None;
    }

    common::config::Validate::validate(&config)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = resolve_config(&args)?;
    let addr = config.socket_addr()?;

    let store = match config.data_file {
        Some(ref path) => WinStore::open(path)?,
        None => {
            log!("No data file configured, win counts will not survive a restart");
            WinStore::in_memory()
        }
    };

    let service = LeaderboardServiceImpl::new(store);

    log!("Tic-tac-toe leaderboard server listening on {}", addr);

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        log!("Shutdown signal received");
    };

    Server::builder()
        .add_service(LeaderboardServiceServer::new(service))
        .serve_with_shutdown(addr, shutdown_signal)
        .await?;

    log!("Server shut down gracefully");

    Ok(())
}
