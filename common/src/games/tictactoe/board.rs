use super::types::{Board, Mark, Outcome};

pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Empty cell indices in ascending order.
pub fn legal_moves(board: &Board) -> Vec<usize> {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, cell)| **cell == Mark::Empty)
        .map(|(idx, _)| idx)
        .collect()
}

fn check_win(board: &Board) -> Option<Mark> {
    let cells = board.cells();
    WINNING_LINES.iter().find_map(|&[a, b, c]| {
        let mark = cells[a];
        (mark != Mark::Empty && mark == cells[b] && mark == cells[c]).then_some(mark)
    })
}

/// Shared by the session controller and the search base case.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(outcome) = check_win(board).and_then(Outcome::won_by) {
        return outcome;
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::BOARD_CELLS;

    fn board_with_line(line: [usize; 3], mark: Mark) -> Board {
        let mut board = Board::new();
        for idx in line {
            board.set_unchecked(idx, mark);
        }
        board
    }

    #[test]
    fn test_every_line_wins_for_x() {
        for line in WINNING_LINES {
            let board = board_with_line(line, Mark::X);
            assert_eq!(evaluate(&board), Outcome::XWon, "line {:?}", line);
        }
    }

    #[test]
    fn test_every_line_wins_for_o() {
        for line in WINNING_LINES {
            let board = board_with_line(line, Mark::O);
            assert_eq!(evaluate(&board), Outcome::OWon, "line {:?}", line);
        }
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board = Board::parse("XOX\nXOO\nOXX").unwrap();
        assert_eq!(evaluate(&board), Outcome::Draw);
    }

    #[test]
    fn test_win_on_full_board_beats_draw() {
        let board = Board::parse("XXX\nOOX\nXOO").unwrap();
        assert_eq!(evaluate(&board), Outcome::XWon);
    }

    #[test]
    fn test_open_board_without_line_is_in_progress() {
        assert_eq!(evaluate(&Board::new()), Outcome::InProgress);
        let board = Board::parse("XO_\n_X_\n__O").unwrap();
        assert_eq!(evaluate(&board), Outcome::InProgress);
        let board = Board::parse("XOX\nXOO\nOX_").unwrap();
        assert_eq!(evaluate(&board), Outcome::InProgress);
    }

    #[test]
    fn test_two_in_a_row_is_not_a_win() {
        let board = Board::parse("XX_\nOO_\n___").unwrap();
        assert_eq!(evaluate(&board), Outcome::InProgress);
    }

    #[test]
    fn test_legal_moves_ascending() {
        assert_eq!(legal_moves(&Board::new()), (0..BOARD_CELLS).collect::<Vec<_>>());
        let board = Board::parse("_X_\nO_X\n_O_").unwrap();
        assert_eq!(legal_moves(&board), vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_legal_moves_empty_when_full() {
        let board = Board::parse("XOX\nXOO\nOXX").unwrap();
        assert!(legal_moves(&board).is_empty());
    }
}
