pub mod proto {
    tonic::include_proto!("leaderboard");
}

pub mod config;
pub mod games;
pub mod identifiers;
pub mod leaderboard;
pub mod logger;

pub use identifiers::*;
pub use proto::*;
