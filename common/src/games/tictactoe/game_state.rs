use crate::games::SessionRng;
use crate::log;
use super::board::evaluate;
use super::bot_controller::Searcher;
use super::types::{BOARD_CELLS, BOT_MARK, Board, HUMAN_MARK, Mark, Outcome};

/// Result of an applied move, so the caller can react to the game ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEffect {
    pub index: Option<usize>,
    pub mark: Mark,
    pub status: Outcome,
}

impl MoveEffect {
    pub fn human_won(&self) -> bool {
        self.status == Outcome::XWon
    }
}

/// One human-versus-computer game. The human (X) always moves first.
///
/// Engine calls are split into `begin_bot_move` / `finish_bot_move` so the
/// caller can pace the reply; while a call is in flight neither side can move
/// and a second engine call is refused.
#[derive(Debug)]
pub struct TicTacToeGameState {
    board: Board,
    status: Outcome,
    human_turn: bool,
    bot_move_in_flight: bool,
    last_move: Option<usize>,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeGameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            status: Outcome::InProgress,
            human_turn: true,
            bot_move_in_flight: false,
            last_move: None,
        }
    }

    pub fn reset(&mut self) {
        if self.bot_move_in_flight {
            log!("Reset while an engine move was in flight; discarding it");
        }
        *self = Self::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> Outcome {
        self.status
    }

    pub fn is_human_turn(&self) -> bool {
        self.human_turn
    }

    pub fn is_bot_thinking(&self) -> bool {
        self.bot_move_in_flight
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn place_mark(&mut self, index: usize) -> Result<MoveEffect, String> {
        if self.status.is_over() {
            return Err("Game is already over".to_string());
        }

        if self.bot_move_in_flight || !self.human_turn {
            return Err("Not your turn".to_string());
        }

        if index >= BOARD_CELLS {
            return Err("Position out of bounds".to_string());
        }

        self.apply(index, HUMAN_MARK)
    }

    /// Asks the engine for the computer's reply and marks the call as in flight.
    pub fn begin_bot_move(
        &mut self,
        searcher: &mut Searcher,
        rng: &mut SessionRng,
    ) -> Result<Option<usize>, String> {
        if self.status.is_over() {
            return Err("Game is already over".to_string());
        }

        if self.bot_move_in_flight {
            return Err("Engine move already in progress".to_string());
        }

        if self.human_turn {
            return Err("Not the computer's turn".to_string());
        }

        let reply = searcher.choose_move(&self.board, rng)?;
        self.bot_move_in_flight = true;
        Ok(reply)
    }

    /// Applies the reply obtained from `begin_bot_move`. `None` (no legal move)
    /// just hands the turn back.
    pub fn finish_bot_move(&mut self, index: Option<usize>) -> Result<MoveEffect, String> {
        if !self.bot_move_in_flight {
            return Err("No engine move in progress".to_string());
        }
        self.bot_move_in_flight = false;

        let Some(index) = index else {
            self.human_turn = true;
            return Ok(MoveEffect {
                index: None,
                mark: BOT_MARK,
                status: self.status,
            });
        };

        match self.apply(index, BOT_MARK) {
            Ok(effect) => Ok(effect),
            Err(e) => {
                log!("Engine produced an unusable move {}: {}", index, e);
                self.human_turn = true;
                Err(e)
            }
        }
    }

    fn apply(&mut self, index: usize, mark: Mark) -> Result<MoveEffect, String> {
        self.board.place(index, mark)?;
        self.last_move = Some(index);
        self.status = evaluate(&self.board);

        if self.status == Outcome::InProgress {
            self.human_turn = mark != HUMAN_MARK;
        }

        Ok(MoveEffect {
            index: Some(index),
            mark,
            status: self.status,
        })
    }

    /// Status line text for the current state.
    pub fn status_message(&self) -> &'static str {
        match self.status {
            Outcome::XWon => "You Won!",
            Outcome::OWon => "AI Wins!",
            Outcome::Draw => "Draw!",
            Outcome::InProgress if self.bot_move_in_flight => "AI is thinking...",
            Outcome::InProgress if self.human_turn => "Your Turn (X)",
            Outcome::InProgress => "AI's Turn (O)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_bot(state: &mut TicTacToeGameState, searcher: &mut Searcher, rng: &mut SessionRng) -> MoveEffect {
        let reply = state.begin_bot_move(searcher, rng).unwrap();
        state.finish_bot_move(reply).unwrap()
    }

    #[test]
    fn test_new_game_human_first() {
        let state = TicTacToeGameState::new();
        assert!(state.is_human_turn());
        assert_eq!(state.status(), Outcome::InProgress);
        assert!(state.board().is_empty());
        assert_eq!(state.status_message(), "Your Turn (X)");
    }

    #[test]
    fn test_place_mark_validations() {
        let mut state = TicTacToeGameState::new();
        assert!(state.place_mark(9).is_err());

        let effect = state.place_mark(4).unwrap();
        assert_eq!(effect.mark, Mark::X);
        assert_eq!(effect.status, Outcome::InProgress);
        assert!(!state.is_human_turn());
        assert_eq!(state.status_message(), "AI's Turn (O)");

        assert_eq!(state.place_mark(0), Err("Not your turn".to_string()));
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut state = TicTacToeGameState::new();
        let mut searcher = Searcher::new();
        let mut rng = SessionRng::new(1);
        state.place_mark(0).unwrap();
        play_bot(&mut state, &mut searcher, &mut rng);
        assert!(state.place_mark(0).is_err());
        assert!(state.place_mark(4).is_err());
        assert!(state.is_human_turn());
    }

    #[test]
    fn test_bot_cannot_move_on_human_turn() {
        let mut state = TicTacToeGameState::new();
        let mut searcher = Searcher::new();
        let mut rng = SessionRng::new(2);
        assert!(state.begin_bot_move(&mut searcher, &mut rng).is_err());
        assert!(state.finish_bot_move(Some(0)).is_err());
    }

    #[test]
    fn test_in_flight_guard_blocks_reentry() {
        let mut state = TicTacToeGameState::new();
        let mut searcher = Searcher::new();
        let mut rng = SessionRng::new(3);
        state.place_mark(0).unwrap();

        let reply = state.begin_bot_move(&mut searcher, &mut rng).unwrap();
        assert!(state.is_bot_thinking());
        assert_eq!(state.status_message(), "AI is thinking...");
        assert!(state.begin_bot_move(&mut searcher, &mut rng).is_err());
        assert!(state.place_mark(8).is_err());

        let effect = state.finish_bot_move(reply).unwrap();
        assert_eq!(effect.mark, Mark::O);
        assert!(!state.is_bot_thinking());
        assert!(state.is_human_turn());
    }

    #[test]
    fn test_finish_rejects_occupied_cell_and_returns_turn() {
        let mut state = TicTacToeGameState::new();
        let mut searcher = Searcher::new();
        let mut rng = SessionRng::new(4);
        state.place_mark(0).unwrap();
        state.begin_bot_move(&mut searcher, &mut rng).unwrap();

        assert!(state.finish_bot_move(Some(0)).is_err());
        assert!(state.is_human_turn());
        assert!(!state.is_bot_thinking());
        assert_eq!(state.board().count(Mark::O), 0);
    }

    #[test]
    fn test_no_move_hands_turn_back() {
        let mut state = TicTacToeGameState::new();
        let mut searcher = Searcher::new();
        let mut rng = SessionRng::new(5);
        state.place_mark(0).unwrap();
        state.begin_bot_move(&mut searcher, &mut rng).unwrap();
        let effect = state.finish_bot_move(None).unwrap();
        assert_eq!(effect.index, None);
        assert!(state.is_human_turn());
    }

    #[test]
    fn test_full_game_never_lost_and_moves_rejected_after() {
        let mut state = TicTacToeGameState::new();
        let mut searcher = Searcher::new();
        let mut rng = SessionRng::new(6);

        // Human plays the lowest free cell every turn.
        while !state.status().is_over() {
            let idx = state.board().cells().iter().position(|&c| c == Mark::Empty).unwrap();
            let effect = state.place_mark(idx).unwrap();
            if effect.status.is_over() {
                break;
            }
            play_bot(&mut state, &mut searcher, &mut rng);
        }

        assert_ne!(state.status(), Outcome::XWon);
        assert_eq!(state.place_mark(0), Err("Game is already over".to_string()));
        assert!(state.begin_bot_move(&mut searcher, &mut rng).is_err());
    }

    #[test]
    fn test_reset_starts_fresh() {
        let mut state = TicTacToeGameState::new();
        let mut searcher = Searcher::new();
        let mut rng = SessionRng::new(7);
        state.place_mark(4).unwrap();
        state.begin_bot_move(&mut searcher, &mut rng).unwrap();

        state.reset();
        assert!(state.board().is_empty());
        assert!(state.is_human_turn());
        assert!(!state.is_bot_thinking());
        assert_eq!(state.last_move(), None);
        state.place_mark(4).unwrap();
    }

    #[test]
    fn test_human_win_reported() {
        let mut state = TicTacToeGameState::new();
        // Drive the board by hand: X 0,1 / O 3,4, then X completes the top row.
        state.place_mark(0).unwrap();
        state.bot_move_in_flight = true;
        state.finish_bot_move(Some(3)).unwrap();
        state.place_mark(1).unwrap();
        state.bot_move_in_flight = true;
        state.finish_bot_move(Some(4)).unwrap();
        let effect = state.place_mark(2).unwrap();
        assert!(effect.human_won());
        assert_eq!(state.status_message(), "You Won!");
    }
}
