//! Board geometry: cells, diagonal directions and bounds-checked lookup.
//!
//! Cells are 1-indexed. Row 1 is White's home edge, column 1 is the `a` file.

use std::fmt;

/// A square on the board, identified by its 1-indexed row and column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Column name in lowercase letters: `1` -> `a`, `26` -> `z`, `27` -> `aa`.
    pub fn col_name(&self) -> String {
        let mut letters = Vec::new();
        let mut n = self.col;
        while n > 0 {
            n -= 1;
            letters.push(char::from(b'a' + (n % 26) as u8));
            n /= 26;
        }
        letters.iter().rev().collect()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col_name(), self.row)
    }
}

/// A unit diagonal step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Direction {
    pub dr: isize,
    pub dc: isize,
}

impl Direction {
    pub const fn new(dr: isize, dc: isize) -> Self {
        Self { dr, dc }
    }

    /// Unit direction pointing from `from` towards `to`.
    ///
    /// Returns `None` if the two cells are not on a common diagonal.
    pub fn between(from: Cell, to: Cell) -> Option<Self> {
        let dr = to.row as isize - from.row as isize;
        let dc = to.col as isize - from.col as isize;
        if dr == 0 || dr.abs() != dc.abs() {
            return None;
        }
        Some(Self::new(dr.signum(), dc.signum()))
    }
}

/// A fixed `rows x cols` grid of cells in row-major order starting at `(1, 1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 1..=rows {
            for col in 1..=cols {
                cells.push(Cell::new(row, col));
            }
        }
        Self { rows, cols, cells }
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        (row - 1) * self.cols + (col - 1)
    }

    /// The cell at `(row, col)`, or `None` when either coordinate is off the board.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<Cell> {
        if row < 1 || col < 1 || row > self.rows || col > self.cols {
            return None;
        }
        self.cells.get(self.idx(row, col)).copied()
    }

    /// The neighbour of `cell` one step along `dir`, if it is on the board.
    pub fn step(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        let row = cell.row.checked_add_signed(dir.dr)?;
        let col = cell.col.checked_add_signed(dir.dc)?;
        self.cell_at(row, col)
    }

    /// Dark squares, the only ones pieces ever stand on in the standard formation.
    pub fn is_dark(&self, cell: Cell) -> bool {
        (cell.row + cell.col) % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_row_major() {
        let board = Board::new(3, 4);
        assert_eq!(board.cells().len(), 12);
        assert_eq!(board.cells()[0], Cell::new(1, 1));
        assert_eq!(board.cells()[4], Cell::new(2, 1));
        assert_eq!(board.cells()[11], Cell::new(3, 4));
    }

    #[test]
    fn test_cell_at_bounds() {
        let board = Board::new(8, 8);
        assert_eq!(board.cell_at(1, 1), Some(Cell::new(1, 1)));
        assert_eq!(board.cell_at(8, 8), Some(Cell::new(8, 8)));
        assert_eq!(board.cell_at(0, 3), None);
        assert_eq!(board.cell_at(3, 0), None);
        assert_eq!(board.cell_at(9, 1), None);
        assert_eq!(board.cell_at(1, 9), None);
    }

    #[test]
    fn test_step_off_edge() {
        let board = Board::new(8, 8);
        let corner = Cell::new(1, 1);
        assert_eq!(board.step(corner, Direction::new(-1, -1)), None);
        assert_eq!(board.step(corner, Direction::new(1, 1)), Some(Cell::new(2, 2)));
    }

    #[test]
    fn test_direction_between() {
        let d = Direction::between(Cell::new(3, 3), Cell::new(5, 1));
        assert_eq!(d, Some(Direction::new(1, -1)));
        assert_eq!(Direction::between(Cell::new(3, 3), Cell::new(3, 5)), None);
        assert_eq!(Direction::between(Cell::new(3, 3), Cell::new(3, 3)), None);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::new(3, 1).to_string(), "a3");
        assert_eq!(Cell::new(8, 8).to_string(), "h8");
    }

    #[test]
    fn test_wide_column_names() {
        assert_eq!(Cell::new(1, 26).col_name(), "z");
        assert_eq!(Cell::new(1, 27).col_name(), "aa");
        assert_eq!(Cell::new(1, 52).col_name(), "az");
        assert_eq!(Cell::new(1, 53).col_name(), "ba");
        assert_eq!(Cell::new(4, 200).to_string(), "gr4");
    }
}
