use std::cmp::Reverse;

use crate::games::SessionRng;
use super::board::{evaluate, legal_moves};
use super::evaluation_cache::{CacheKey, EvaluationCache};
use super::types::{BOT_MARK, Board, HUMAN_MARK, Mark, Outcome};

pub const CENTER: usize = 4;
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];
pub const EDGES: [usize; 4] = [1, 3, 5, 7];
/// Candidates for the randomized first move on an empty board.
pub const OPENING_MOVES: [usize; 5] = [CENTER, 0, 2, 6, 8];

const WIN_SCORE: i32 = 10;

fn move_priority(idx: usize) -> u8 {
    if idx == CENTER {
        2
    } else if CORNERS.contains(&idx) {
        1
    } else {
        0
    }
}

/// Center first, then corners, then edges. The sort is stable, so each group
/// keeps the ascending order it came in with.
pub fn order_moves(moves: &mut [usize]) {
    moves.sort_by_key(|&idx| Reverse(move_priority(idx)));
}

/// First move in `moves` that completes a line for `mark`. The board is
/// restored before returning.
pub fn find_winning_move(board: &mut Board, mark: Mark, moves: &[usize]) -> Option<usize> {
    let target = Outcome::won_by(mark)?;
    for &idx in moves {
        if !board.is_empty_cell(idx) {
            continue;
        }
        board.set_unchecked(idx, mark);
        let outcome = evaluate(board);
        board.clear_cell(idx);

        if outcome == target {
            return Some(idx);
        }
    }
    None
}

// Cached scores are measured from the cached node rather than from the search
// root, so an entry stays valid whatever depth the board is reached at.
fn to_node_relative(score: i32, depth: i32) -> i32 {
    match score {
        s if s > 0 => s + depth,
        s if s < 0 => s - depth,
        _ => 0,
    }
}

fn from_node_relative(score: i32, depth: i32) -> i32 {
    match score {
        s if s > 0 => s - depth,
        s if s < 0 => s + depth,
        _ => 0,
    }
}

/// Perfect-play move search for the computer (O) with alpha-beta pruning.
///
/// The searcher owns its evaluation cache; give each concurrent game its own
/// `Searcher`. Nothing here is process-global.
#[derive(Debug, Default)]
pub struct Searcher {
    cache: EvaluationCache,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(cache: EvaluationCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &EvaluationCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Scores `board` from the computer's point of view.
    ///
    /// A computer win scores `10 - depth`, a human win `depth - 10`, a draw 0,
    /// so quicker wins and slower losses are preferred. `depth` counts plies
    /// since the search root. Start with `alpha = i32::MIN` and `beta = i32::MAX`.
    /// The board is restored before returning.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        depth: i32,
        is_maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        match evaluate(board) {
            Outcome::OWon => return WIN_SCORE - depth,
            Outcome::XWon => return depth - WIN_SCORE,
            Outcome::Draw => return 0,
            Outcome::InProgress => {}
        }

        let key = CacheKey::new(board, is_maximizing);
        if let Some(stored) = self.cache.get(&key) {
            return from_node_relative(stored, depth);
        }

        let (alpha_start, beta_start) = (alpha, beta);
        let mut moves = legal_moves(board);
        order_moves(&mut moves);

        let best = if is_maximizing {
            let mut max_eval = i32::MIN;
            for idx in moves {
                board.set_unchecked(idx, BOT_MARK);
                let eval = self.minimax(board, depth + 1, false, alpha, beta);
                board.clear_cell(idx);

                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for idx in moves {
                board.set_unchecked(idx, HUMAN_MARK);
                let eval = self.minimax(board, depth + 1, true, alpha, beta);
                board.clear_cell(idx);

                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        };

        // Scores at or outside the window are only bounds after a cutoff.
        if alpha_start < best && best < beta_start {
            self.cache.insert(key, to_node_relative(best, depth));
        }

        best
    }

    /// Full-window score of every legal computer move, in ascending cell order.
    pub fn score_moves(&mut self, board: &Board) -> Vec<(usize, i32)> {
        let mut board = *board;
        legal_moves(&board)
            .into_iter()
            .map(|idx| {
                board.set_unchecked(idx, BOT_MARK);
                let score = self.minimax(&mut board, 0, false, i32::MIN, i32::MAX);
                board.clear_cell(idx);
                (idx, score)
            })
            .collect()
    }

    /// Picks the computer's move, or `None` when the board is full.
    /// Boards with more than one extra mark for either side are rejected.
    ///
    /// Only the opening move on an empty board is random; every other board
    /// always yields the same move.
    pub fn choose_move(&mut self, board: &Board, rng: &mut SessionRng) -> Result<Option<usize>, String> {
        board.check_balance()?;

        let mut board = *board;
        let moves = legal_moves(&board);

        if moves.is_empty() {
            return Ok(None);
        }

        if board.is_empty() {
            return Ok(rng.choose(&OPENING_MOVES).copied());
        }

        if let Some(idx) = find_winning_move(&mut board, BOT_MARK, &moves) {
            return Ok(Some(idx));
        }

        if let Some(idx) = find_winning_move(&mut board, HUMAN_MARK, &moves) {
            return Ok(Some(idx));
        }

        let mut best_move = None;
        let mut best_score = i32::MIN;
        for (idx, score) in self.score_moves(&board) {
            if score > best_score {
                best_score = score;
                best_move = Some(idx);
            }
        }
        Ok(best_move)
    }
}
