use common::games::tictactoe::{BOARD_CELLS, Board, Mark};

use crate::config::AiSpeed;

pub const HELP_TEXT: &str = "\
Commands:
  1-9        place X on that cell (numbered left to right, top to bottom)
  r          start a new game
  l          show the leaderboard
  n <name>   set the name wins are recorded under (blank clears it)
  s <speed>  set AI speed: fast, normal or smooth
  h          show this help
  q          quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Place(usize),
    Reset,
    Leaderboard,
    SetName(String),
    SetSpeed(AiSpeed),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, String> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        if let Ok(cell) = head.parse::<usize>() {
            if !rest.is_empty() {
                return Err(format!("Unexpected input after cell number: '{}'", rest));
            }
            if !(1..=BOARD_CELLS).contains(&cell) {
                return Err(format!("Cell must be between 1 and {}", BOARD_CELLS));
            }
            return Ok(Command::Place(cell - 1));
        }

        match head.to_ascii_lowercase().as_str() {
            "" => Err("Enter a cell number or a command (h for help)".to_string()),
            "r" | "reset" => Ok(Command::Reset),
            "l" | "leaderboard" => Ok(Command::Leaderboard),
            "n" | "name" => Ok(Command::SetName(rest.to_string())),
            "s" | "speed" => rest.parse().map(Command::SetSpeed),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command '{}' (h for help)", other)),
        }
    }
}

/// Empty cells show the number that selects them.
pub fn render_board(board: &Board) -> String {
    board
        .cells()
        .chunks(3)
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, mark)| match mark {
                    Mark::Empty => format!(" {} ", row * 3 + col + 1),
                    mark => format!(" {} ", mark.to_char()),
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect::<Vec<_>>()
        .join("\n---+---+---\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cells_are_one_based() {
        assert_eq!(Command::parse("1"), Ok(Command::Place(0)));
        assert_eq!(Command::parse(" 9 "), Ok(Command::Place(8)));
        assert!(Command::parse("0").is_err());
        assert!(Command::parse("10").is_err());
        assert!(Command::parse("5 5").is_err());
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("r"), Ok(Command::Reset));
        assert_eq!(Command::parse("L"), Ok(Command::Leaderboard));
        assert_eq!(Command::parse("h"), Ok(Command::Help));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse("n  Alice Smith "), Ok(Command::SetName("Alice Smith".to_string())));
        assert_eq!(Command::parse("n"), Ok(Command::SetName(String::new())));
        assert_eq!(Command::parse("s smooth"), Ok(Command::SetSpeed(AiSpeed::Smooth)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("jump").is_err());
        assert!(Command::parse("s warp").is_err());
    }

    #[test]
    fn test_render_board_numbers_empty_cells() {
        let board = Board::parse("X__\n_O_\n___").unwrap();
        let rendered = render_board(&board);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], " X | 2 | 3 ");
        assert_eq!(lines[1], "---+---+---");
        assert_eq!(lines[2], " 4 | O | 6 ");
        assert_eq!(lines[4], " 7 | 8 | 9 ");
    }
}
