mod board;
mod bot_controller;
mod evaluation_cache;
mod game_state;
mod types;

pub use board::{WINNING_LINES, evaluate, legal_moves};
pub use bot_controller::{
    CENTER, CORNERS, EDGES, OPENING_MOVES, Searcher, find_winning_move, order_moves,
};
pub use evaluation_cache::{CacheKey, DEFAULT_CACHE_CAPACITY, EvaluationCache};
pub use game_state::{MoveEffect, TicTacToeGameState};
pub use types::{BOARD_CELLS, BOT_MARK, Board, HUMAN_MARK, Mark, Outcome};
