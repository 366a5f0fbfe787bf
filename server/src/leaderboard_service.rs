use tonic::{Request, Response, Status};
use common::{
    GetLeaderboardRequest, GetLeaderboardResponse, GetWinsRequest, GetWinsResponse,
    RecordWinRequest, RecordWinResponse, Username, log,
    leaderboard_service_server::LeaderboardService,
};
use crate::win_store::WinStore;

#[derive(Debug, Clone)]
pub struct LeaderboardServiceImpl {
    store: WinStore,
}

impl LeaderboardServiceImpl {
    pub fn new(store: WinStore) -> Self {
        Self { store }
    }
}

fn parse_username(raw: &str) -> Result<Username, Status> {
    Username::parse(raw).map_err(Status::invalid_argument)
}

#[tonic::async_trait]
impl LeaderboardService for LeaderboardServiceImpl {
    async fn get_leaderboard(
        &self,
        _request: Request<GetLeaderboardRequest>,
    ) -> Result<Response<GetLeaderboardResponse>, Status> {
        let scores = self.store.leaderboard().await;
        Ok(Response::new(GetLeaderboardResponse { scores }))
    }

    async fn get_wins(
        &self,
        request: Request<GetWinsRequest>,
    ) -> Result<Response<GetWinsResponse>, Status> {
        let username = parse_username(&request.into_inner().username)?;
        let wins = self.store.wins(&username).await;
        Ok(Response::new(GetWinsResponse { wins }))
    }

    async fn record_win(
        &self,
        request: Request<RecordWinRequest>,
    ) -> Result<Response<RecordWinResponse>, Status> {
        let username = parse_username(&request.into_inner().username)?;
        let wins = self.store.record_win(&username).await;
        log!("Win recorded for {} (total {})", username, wins);
        Ok(Response::new(RecordWinResponse { wins }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    fn service() -> LeaderboardServiceImpl {
        LeaderboardServiceImpl::new(WinStore::in_memory())
    }

    #[tokio::test]
    async fn test_record_then_query() {
        let service = service();
        let recorded = service
            .record_win(Request::new(RecordWinRequest { username: "  alice ".to_string() }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(recorded.wins, 1);

        let wins = service
            .get_wins(Request::new(GetWinsRequest { username: "alice".to_string() }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(wins.wins, 1);

        let board = service
            .get_leaderboard(Request::new(GetLeaderboardRequest {}))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(board.scores.len(), 1);
        assert_eq!(board.scores[0].username, "alice");
    }

    #[tokio::test]
    async fn test_blank_username_rejected() {
        let service = service();
        let status = service
            .record_win(Request::new(RecordWinRequest { username: "   ".to_string() }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);

        let status = service
            .get_wins(Request::new(GetWinsRequest { username: "x".repeat(21) }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }
}
