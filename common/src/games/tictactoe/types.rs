use std::fmt;

pub const BOARD_CELLS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

/// The human always plays X.
pub const HUMAN_MARK: Mark = Mark::X;
/// The engine always plays O.
pub const BOT_MARK: Mark = Mark::O;

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Mark::Empty => '_',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Result<Mark, String> {
        match c {
            'X' | 'x' => Ok(Mark::X),
            'O' | 'o' => Ok(Mark::O),
            '_' | '.' | ' ' => Ok(Mark::Empty),
            other => Err(format!("Invalid cell character '{}'", other)),
        }
    }

    fn code(self) -> u16 {
        match self {
            Mark::Empty => 0,
            Mark::X => 1,
            Mark::O => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    XWon,
    OWon,
    Draw,
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        *self != Outcome::InProgress
    }

    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::XWon => Some(Mark::X),
            Outcome::OWon => Some(Mark::O),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }

    pub fn won_by(mark: Mark) -> Option<Outcome> {
        match mark {
            Mark::X => Some(Outcome::XWon),
            Mark::O => Some(Outcome::OWon),
            Mark::Empty => None,
        }
    }
}

/// A 3x3 board in row-major order: 0,1,2 is the top row, 6,7,8 the bottom row.
///
/// Boards built through [`Board::from_cells`] or [`Board::parse`] never hold
/// more than one extra mark for either side; [`Board::place`] only checks the
/// target cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Mark; BOARD_CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: &[Mark]) -> Result<Self, String> {
        if cells.len() != BOARD_CELLS {
            return Err(format!(
                "Board must have exactly {} cells, got {}",
                BOARD_CELLS,
                cells.len()
            ));
        }

        let mut board = Self::new();
        board.cells.copy_from_slice(cells);
        board.check_balance()?;
        Ok(board)
    }

    /// Fails when either side holds more than one extra mark. `place` does not
    /// check this, so engine entry points call it on whatever they are given.
    pub fn check_balance(&self) -> Result<(), String> {
        let x_count = self.count(Mark::X);
        let o_count = self.count(Mark::O);
        if x_count.abs_diff(o_count) > 1 {
            return Err(format!(
                "Mark counts out of balance: {} X against {} O",
                x_count, o_count
            ));
        }
        Ok(())
    }

    /// Parses nine cell characters (`X`, `O`, and `_`, `.` or space for empty).
    /// Newlines and `|` separators are ignored so boards can be written as grids.
    pub fn parse(text: &str) -> Result<Self, String> {
        let cells = text
            .chars()
            .filter(|c| !matches!(c, '\n' | '\r' | '|'))
            .map(Mark::from_char)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(&cells)
    }

    pub fn cells(&self) -> &[Mark; BOARD_CELLS] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn is_empty_cell(&self, index: usize) -> bool {
        self.get(index) == Some(Mark::Empty)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == Mark::Empty)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    /// Writes `mark` into an empty cell.
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), String> {
        if mark == Mark::Empty {
            return Err("Cannot place an empty mark".to_string());
        }
        match self.cells.get(index) {
            None => Err(format!("Cell {} is out of bounds", index)),
            Some(Mark::Empty) => {
                self.cells[index] = mark;
                Ok(())
            }
            Some(_) => Err(format!("Cell {} is already marked", index)),
        }
    }

    /// Search-only placement; the caller guarantees `index` is an empty cell
    /// and calls [`Board::clear_cell`] before returning.
    pub(crate) fn set_unchecked(&mut self, index: usize, mark: Mark) {
        self.cells[index] = mark;
    }

    pub(crate) fn clear_cell(&mut self, index: usize) {
        self.cells[index] = Mark::Empty;
    }

    /// Base-3 encoding of the nine cells; distinct boards always get distinct keys.
    pub fn key(&self) -> u16 {
        self.cells
            .iter()
            .rev()
            .fold(0u16, |acc, &cell| acc * 3 + cell.code())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_idx, row) in self.cells.chunks(3).enumerate() {
            if row_idx > 0 {
                writeln!(f)?;
            }
            let line: String = row.iter().map(|m| m.to_char()).collect();
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}
