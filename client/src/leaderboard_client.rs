use std::time::Duration;
use tonic::transport::{Channel, Endpoint};
use common::{
    GetLeaderboardRequest, GetWinsRequest, RecordWinRequest, Score, Username,
    leaderboard_service_client::LeaderboardServiceClient,
};

#[derive(Debug, Clone)]
pub struct LeaderboardClient {
    address: String,
    inner: LeaderboardServiceClient<Channel>,
}

impl LeaderboardClient {
    /// Builds a lazily connected client: nothing is dialed until the first
    /// call, so an unreachable server only shows up as per-call errors.
    pub fn new(address: &str, timeout: Duration) -> Result<Self, String> {
        let endpoint = Endpoint::from_shared(address.to_string())
            .map_err(|e| format!("Invalid server address '{}': {}", address, e))?
            .connect_timeout(timeout)
            .timeout(timeout);

        Ok(Self {
            address: address.to_string(),
            inner: LeaderboardServiceClient::new(endpoint.connect_lazy()),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub async fn leaderboard(&mut self) -> Result<Vec<Score>, String> {
        let response = self
            .inner
            .get_leaderboard(GetLeaderboardRequest {})
            .await
            .map_err(|status| format!("Failed to fetch leaderboard: {}", status.message()))?;
        Ok(response.into_inner().scores)
    }

    pub async fn wins(&mut self, username: &Username) -> Result<u64, String> {
        let response = self
            .inner
            .get_wins(GetWinsRequest {
                username: username.to_string(),
            })
            .await
            .map_err(|status| format!("Failed to fetch wins for {}: {}", username, status.message()))?;
        Ok(response.into_inner().wins)
    }

    pub async fn record_win(&mut self, username: &Username) -> Result<u64, String> {
        let response = self
            .inner
            .record_win(RecordWinRequest {
                username: username.to_string(),
            })
            .await
            .map_err(|status| format!("Failed to record win for {}: {}", username, status.message()))?;
        Ok(response.into_inner().wins)
    }
}

/// Where wins go. Offline play keeps working; it just has nowhere to record.
#[derive(Debug, Clone)]
pub enum WinRecorder {
    Offline,
    Remote(LeaderboardClient),
}

impl WinRecorder {
    pub fn is_offline(&self) -> bool {
        matches!(self, WinRecorder::Offline)
    }

    pub async fn record_win(&mut self, username: &Username) -> Result<u64, String> {
        match self {
            WinRecorder::Offline => Err("playing offline".to_string()),
            WinRecorder::Remote(client) => client.record_win(username).await,
        }
    }

    pub async fn wins(&mut self, username: &Username) -> Result<u64, String> {
        match self {
            WinRecorder::Offline => Err("playing offline".to_string()),
            WinRecorder::Remote(client) => client.wins(username).await,
        }
    }

    pub async fn leaderboard(&mut self) -> Result<Vec<Score>, String> {
        match self {
            WinRecorder::Offline => Err("playing offline".to_string()),
            WinRecorder::Remote(client) => client.leaderboard().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_address_rejected() {
        assert!(LeaderboardClient::new("not a uri at all", Duration::from_millis(100)).is_err());
    }

    #[tokio::test]
    async fn test_offline_recorder_fails_softly() {
        let mut recorder = WinRecorder::Offline;
        let name = Username::parse("alice").unwrap();
        assert!(recorder.is_offline());
        assert!(recorder.record_win(&name).await.is_err());
        assert!(recorder.wins(&name).await.is_err());
        assert!(recorder.leaderboard().await.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error_not_a_panic() {
        // Port 9 (discard) on loopback is not serving gRPC.
        let client = LeaderboardClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        let mut recorder = WinRecorder::Remote(client);
        let name = Username::parse("bob").unwrap();
        assert!(recorder.record_win(&name).await.is_err());
    }
}
