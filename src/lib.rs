// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(broken_intra_doc_links)]
#![warn(missing_docs)]
#![warn(missing_crate_level_docs)]
#![warn(invalid_codeblock_attributes)]

//! This crate implements a solving engine for classic 9x9 Sudoku. It supports
//! the following key features:
//!
//! * Parsing and printing Sudoku grids, both as plain 81-character codes and
//! in an annotated notation that lists the candidates of unsolved cells
//! * A perfect backtracking solver that classifies every puzzle as uniquely
//! solveable, unsolveable, or ambiguous
//! * A library of logical deduction strategies built on candidate link
//! graphs: Simple Coloring, X-Cycles, Grouped X-Cycles, 3D Medusa, XY-Chains,
//! and Alternating Inference Chains
//!
//! # Parsing and printing Sudoku
//!
//! See [SudokuGrid::parse] for the exact format of a Sudoku code. An example
//! of how to parse and display a grid is provided below.
//!
//! ```
//! use sudoku_chains::SudokuGrid;
//!
//! let grid = SudokuGrid::parse(
//!     "010040560230615080000800100050020008600781005900060020006008000080473056045090010")
//!     .unwrap();
//! println!("{}", grid);
//! ```
//!
//! # Solving Sudoku
//!
//! This crate offers a [Solver](solver::Solver) trait for structs that can
//! totally or partially solve Sudoku. As a default implementation,
//! [BacktrackingSolver](solver::BacktrackingSolver) is provided, which
//! classifies every grid.
//!
//! ```
//! use sudoku_chains::SudokuGrid;
//! use sudoku_chains::solver::{BacktrackingSolver, Solution, Solver};
//!
//! let grid = SudokuGrid::parse(
//!     "010040560230615080000800100050020008600781005900060020006008000080473056045090010")
//!     .unwrap();
//!
//! match BacktrackingSolver.solve(&grid) {
//!     Solution::Unique(solution) => assert!(solution.is_full()),
//!     _ => panic!("expected a unique solution")
//! }
//! ```
//!
//! # Logical deduction
//!
//! Deduction strategies operate on a [CandidateGrid], which tracks the
//! candidate digits of every unsolved cell, and yield
//! [Modification](modification::Modification)s instead of mutating the grid.
//! The [StrategicSolver](solver::strategy::StrategicSolver) combines the
//! strategies with the backtracking solver into a full solving pipeline.
//!
//! ```
//! use sudoku_chains::CandidateGrid;
//! use sudoku_chains::solver::strategy::{NakedSingleStrategy, Strategy};
//!
//! let grid = CandidateGrid::parse(
//!     "{2367}{379}{29}1{3468}5{2389}{9}{289}\
//!      14{259}{389}{38}{38}67{289}\
//!      {3567}8{59}{3679}{36}24{59}{19}\
//!      {2458}63{58}7{48}{89}1{489}\
//!      9{57}{2458}{568}{124568}{1468}{78}{46}3\
//!      {478}1{48}{368}9{3468}52{4678}\
//!      {345}{359}72{1356}{136}{19}8{1469}\
//!      {48}26{78}{18}{178}{179}35\
//!      {358}{35}{158}4{13568}9{127}{6}{1267}").unwrap();
//! let modifications = NakedSingleStrategy.apply(&grid);
//!
//! // The cells at [0, 7] and [8, 7] have only one candidate left.
//! assert_eq!(2, modifications.len());
//! ```

pub mod error;
pub mod modification;
pub mod solver;
pub mod util;

use error::{
    SudokuError,
    SudokuParseError,
    SudokuParseResult,
    SudokuResult
};
use util::DigitSet;

use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};

/// The width and height of a Sudoku grid as well as the number of cells per
/// row, column, and block.
pub const SIZE: usize = 9;

/// The width and height of one block inside a Sudoku grid.
pub const BLOCK_SIZE: usize = 3;

/// The location of one cell inside a Sudoku grid, identified by its row and
/// column index, both in the range 0 to 8.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq,
    PartialOrd, Serialize)]
pub struct Position {
    row: usize,
    column: usize
}

impl Position {

    /// Creates a new position from the given row and column index.
    ///
    /// # Errors
    ///
    /// If `row` or `column` is greater than or equal to [SIZE]. In that case,
    /// `SudokuError::OutOfBounds` is returned.
    pub fn new(row: usize, column: usize) -> SudokuResult<Position> {
        if row >= SIZE || column >= SIZE {
            Err(SudokuError::OutOfBounds)
        }
        else {
            Ok(Position { row, column })
        }
    }

    /// The row index of this position, in the range 0 to 8.
    pub fn row(&self) -> usize {
        self.row
    }

    /// The column index of this position, in the range 0 to 8.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns the index of the block that contains this position, in the
    /// range 0 to 8. Blocks are numbered in reading order, i.e. the top-left
    /// block has index 0 and the bottom-right block has index 8.
    pub fn block(&self) -> usize {
        (self.row / BLOCK_SIZE) * BLOCK_SIZE + self.column / BLOCK_SIZE
    }

    /// Indicates whether this position shares a row, column, or block with
    /// the given one, i.e. whether the two cells "see" each other. A position
    /// does not see itself.
    pub fn sees(&self, other: Position) -> bool {
        *self != other &&
            (self.row == other.row ||
                self.column == other.column ||
                self.block() == other.block())
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.column)
    }
}

fn position(row: usize, column: usize) -> Position {
    Position { row, column }
}

/// Returns the positions of all cells in the row with the given index, in
/// column order.
pub fn row_positions(row: usize) -> Vec<Position> {
    (0..SIZE).map(|column| position(row, column)).collect()
}

/// Returns the positions of all cells in the column with the given index, in
/// row order.
pub fn column_positions(column: usize) -> Vec<Position> {
    (0..SIZE).map(|row| position(row, column)).collect()
}

/// Returns the positions of all cells in the block with the given index, in
/// reading order.
pub fn block_positions(block: usize) -> Vec<Position> {
    let start_row = (block / BLOCK_SIZE) * BLOCK_SIZE;
    let start_column = (block % BLOCK_SIZE) * BLOCK_SIZE;
    (0..SIZE)
        .map(|i|
            position(start_row + i / BLOCK_SIZE,
                start_column + i % BLOCK_SIZE))
        .collect()
}

/// Returns the position lists of all 27 units of a Sudoku grid: first all
/// rows, then all columns, then all blocks.
pub fn all_units() -> Vec<Vec<Position>> {
    let mut units = Vec::with_capacity(3 * SIZE);
    units.extend((0..SIZE).map(row_positions));
    units.extend((0..SIZE).map(column_positions));
    units.extend((0..SIZE).map(block_positions));
    units
}

/// Returns the positions of all cells of a Sudoku grid in reading order.
pub fn all_positions() -> Vec<Position> {
    (0..SIZE)
        .flat_map(|row| (0..SIZE).map(move |column| position(row, column)))
        .collect()
}

fn index(row: usize, column: usize) -> usize {
    row * SIZE + column
}

fn check_digit(digit: usize) -> SudokuResult<()> {
    if digit < 1 || digit > SIZE {
        Err(SudokuError::InvalidNumber)
    }
    else {
        Ok(())
    }
}

/// A 9x9 Sudoku grid in which each cell may or may not be occupied by a digit
/// from 1 to 9. This type only stores the digits; candidate bookkeeping for
/// the deduction strategies is done by [CandidateGrid].
///
/// `SudokuGrid` implements `Display` using box-drawing characters:
///
/// ```text
/// ╔═══╤═══╤═══╦═══╤═══╤═══╦═══╤═══╤═══╗
/// ║   │ 1 │   ║   │ 4 │   ║ 5 │ 6 │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║ 2 │ 3 │   ║ 6 │ 1 │ 5 ║   │ 8 │   ║
/// ...
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SudokuGrid {
    cells: Vec<Option<usize>>
}

fn to_char(cell: Option<usize>) -> char {
    if let Some(digit) = cell {
        (b'0' + digit as u8) as char
    }
    else {
        ' '
    }
}

fn line(f: &mut Formatter<'_>, start: char, thick_sep: char, thin_sep: char,
        end: char, segment: &str) -> fmt::Result {
    write!(f, "{}", start)?;

    for i in 0..SIZE {
        write!(f, "{}", segment)?;

        if i + 1 == SIZE {
            writeln!(f, "{}", end)?;
        }
        else if (i + 1) % BLOCK_SIZE == 0 {
            write!(f, "{}", thick_sep)?;
        }
        else {
            write!(f, "{}", thin_sep)?;
        }
    }

    Ok(())
}

impl SudokuGrid {

    /// Creates a new, empty Sudoku grid in which all cells are unoccupied.
    pub fn new() -> SudokuGrid {
        SudokuGrid {
            cells: vec![None; SIZE * SIZE]
        }
    }

    /// Parses a Sudoku grid from a code that contains one character per cell
    /// in reading order, i.e. 81 characters in total. The digits 1 to 9
    /// represent occupied cells, while `0` and `.` represent empty cells.
    /// Whitespace is ignored.
    ///
    /// # Errors
    ///
    /// * `SudokuParseError::WrongNumberOfCells`: If the code does not contain
    /// exactly 81 cell characters.
    /// * `SudokuParseError::UnexpectedCharacter`: If the code contains a
    /// character other than digits, `.`, and whitespace.
    pub fn parse(code: &str) -> SudokuParseResult<SudokuGrid> {
        let mut cells = Vec::with_capacity(SIZE * SIZE);

        for c in code.chars() {
            match c {
                '0' | '.' => cells.push(None),
                '1'..='9' => cells.push(Some(c as usize - '0' as usize)),
                c if c.is_whitespace() => { },
                _ => return Err(SudokuParseError::UnexpectedCharacter)
            }
        }

        if cells.len() != SIZE * SIZE {
            return Err(SudokuParseError::WrongNumberOfCells);
        }

        Ok(SudokuGrid { cells })
    }

    /// Gets the content of the cell at the specified position.
    ///
    /// # Arguments
    ///
    /// * `row`: The row index of the desired cell, in the range 0 to 8.
    /// * `column`: The column index of the desired cell, in the range 0 to 8.
    ///
    /// # Errors
    ///
    /// If `row` or `column` is greater than or equal to [SIZE]. In that case,
    /// `SudokuError::OutOfBounds` is returned.
    pub fn get_cell(&self, row: usize, column: usize)
            -> SudokuResult<Option<usize>> {
        if row >= SIZE || column >= SIZE {
            Err(SudokuError::OutOfBounds)
        }
        else {
            Ok(self.cells[index(row, column)])
        }
    }

    /// Sets the content of the cell at the specified position to the given
    /// digit. Note that this method does not check whether the digit
    /// conflicts with any other cell, see [SudokuGrid::is_valid_number] for
    /// that.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds`: If `row` or `column` is greater than or
    /// equal to [SIZE].
    /// * `SudokuError::InvalidNumber`: If `digit` is less than 1 or greater
    /// than 9.
    pub fn set_cell(&mut self, row: usize, column: usize, digit: usize)
            -> SudokuResult<()> {
        if row >= SIZE || column >= SIZE {
            return Err(SudokuError::OutOfBounds);
        }

        check_digit(digit)?;
        self.cells[index(row, column)] = Some(digit);
        Ok(())
    }

    /// Clears the content of the cell at the specified position.
    ///
    /// # Errors
    ///
    /// If `row` or `column` is greater than or equal to [SIZE]. In that case,
    /// `SudokuError::OutOfBounds` is returned.
    pub fn clear_cell(&mut self, row: usize, column: usize)
            -> SudokuResult<()> {
        if row >= SIZE || column >= SIZE {
            return Err(SudokuError::OutOfBounds);
        }

        self.cells[index(row, column)] = None;
        Ok(())
    }

    /// Indicates whether all cells of this grid are occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    fn unit_is_valid(&self, unit: &[Position]) -> bool {
        let mut seen = DigitSet::new();

        for position in unit {
            if let Some(digit) = self.cells[index(position.row,
                    position.column)] {
                match seen.insert(digit) {
                    Ok(true) => { },
                    _ => return false
                }
            }
        }

        true
    }

    /// Indicates whether this grid is valid according to standard Sudoku
    /// rules, that is, no row, column, or block contains any digit more than
    /// once. Empty cells are permitted.
    pub fn is_valid(&self) -> bool {
        all_units().iter().all(|unit| self.unit_is_valid(unit))
    }

    /// Indicates whether the given digit could occupy the cell at the
    /// specified position without violating standard Sudoku rules, i.e. the
    /// digit does not yet appear in the cell's row, column, or block. The
    /// content of the cell itself is ignored.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds`: If `row` or `column` is greater than or
    /// equal to [SIZE].
    /// * `SudokuError::InvalidNumber`: If `digit` is less than 1 or greater
    /// than 9.
    pub fn is_valid_number(&self, row: usize, column: usize, digit: usize)
            -> SudokuResult<bool> {
        if row >= SIZE || column >= SIZE {
            return Err(SudokuError::OutOfBounds);
        }

        check_digit(digit)?;

        let cell = position(row, column);
        let conflict = all_positions().into_iter()
            .filter(|other| cell.sees(*other))
            .any(|other|
                self.cells[index(other.row, other.column)] == Some(digit));
        Ok(!conflict)
    }

    /// Converts this grid into a code that can be parsed by
    /// [SudokuGrid::parse], with `0` representing empty cells.
    pub fn to_parseable_string(&self) -> String {
        self.cells.iter()
            .map(|cell| match cell {
                Some(digit) => (b'0' + *digit as u8) as char,
                None => '0'
            })
            .collect()
    }
}

impl Default for SudokuGrid {
    fn default() -> SudokuGrid {
        SudokuGrid::new()
    }
}

impl Display for SudokuGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        line(f, '╔', '╦', '╤', '╗', "═══")?;

        for row in 0..SIZE {
            write!(f, "║")?;

            for column in 0..SIZE {
                let cell = self.cells[index(row, column)];
                write!(f, " {} ", to_char(cell))?;

                if column + 1 == SIZE {
                    writeln!(f, "║")?;
                }
                else if (column + 1) % BLOCK_SIZE == 0 {
                    write!(f, "║")?;
                }
                else {
                    write!(f, "│")?;
                }
            }

            if row + 1 == SIZE {
                line(f, '╚', '╩', '╧', '╝', "═══")?;
            }
            else if (row + 1) % BLOCK_SIZE == 0 {
                line(f, '╠', '╬', '╪', '╣', "═══")?;
            }
            else {
                line(f, '╟', '╫', '┼', '╢', "───")?;
            }
        }

        Ok(())
    }
}

/// The state of one cell of a [CandidateGrid]: either solved with a definite
/// digit, or unsolved with a set of candidate digits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cell {

    /// The cell is occupied by the wrapped digit.
    Solved(usize),

    /// The cell is empty and the wrapped set contains the digits that may
    /// still occupy it.
    Unsolved(DigitSet)
}

impl Cell {

    /// Indicates whether this cell is solved.
    pub fn is_solved(&self) -> bool {
        matches!(self, Cell::Solved(_))
    }

    /// Returns the digit that occupies this cell, or `None` if it is
    /// unsolved.
    pub fn value(&self) -> Option<usize> {
        match self {
            Cell::Solved(digit) => Some(*digit),
            Cell::Unsolved(_) => None
        }
    }

    /// Returns the candidate set of this cell, or `None` if it is solved.
    pub fn candidates(&self) -> Option<DigitSet> {
        match self {
            Cell::Solved(_) => None,
            Cell::Unsolved(candidates) => Some(*candidates)
        }
    }
}

/// A 9x9 Sudoku grid in which every unsolved cell carries the set of
/// candidate digits that may still occupy it. This is the data structure the
/// deduction strategies in [solver::strategy] operate on.
///
/// A candidate grid can be obtained from a [SudokuGrid] with
/// [CandidateGrid::from_grid], in which case every empty cell starts out with
/// all nine candidates, or parsed from an annotated code with
/// [CandidateGrid::parse].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CandidateGrid {
    cells: Vec<Cell>
}

impl CandidateGrid {

    /// Creates a candidate grid from the given Sudoku grid. Occupied cells
    /// become solved cells and every empty cell is assigned all nine
    /// candidates. Use the candidate pruning strategy to reduce the
    /// candidates to those consistent with the solved cells.
    pub fn from_grid(grid: &SudokuGrid) -> CandidateGrid {
        let cells = grid.cells.iter()
            .map(|cell| match cell {
                Some(digit) => Cell::Solved(*digit),
                None => Cell::Unsolved(DigitSet::full())
            })
            .collect();
        CandidateGrid { cells }
    }

    /// Parses a candidate grid from a code that contains one entry per cell
    /// in reading order. A digit from 1 to 9 represents a solved cell, while
    /// a braced list of digits, such as `{27}`, represents an unsolved cell
    /// with exactly those candidates. `0` and `.` represent unsolved cells
    /// with all nine candidates. Whitespace is ignored.
    ///
    /// # Errors
    ///
    /// * `SudokuParseError::WrongNumberOfCells`: If the code does not contain
    /// exactly 81 entries.
    /// * `SudokuParseError::UnexpectedCharacter`: If the code contains a
    /// character that belongs to no entry.
    /// * `SudokuParseError::MalformedBraces`: If braces are unbalanced.
    /// * `SudokuParseError::EmptyCandidates`: If a braced list contains no
    /// digits.
    /// * `SudokuParseError::InvalidNumber`: If a braced list contains `0`.
    pub fn parse(code: &str) -> SudokuParseResult<CandidateGrid> {
        let mut cells = Vec::with_capacity(SIZE * SIZE);
        let mut chars = code.chars();

        while let Some(c) = chars.next() {
            match c {
                '0' | '.' => cells.push(Cell::Unsolved(DigitSet::full())),
                '1'..='9' =>
                    cells.push(Cell::Solved(c as usize - '0' as usize)),
                '{' => {
                    let mut candidates = DigitSet::new();

                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c @ '1'..='9') => {
                                let digit = c as usize - '0' as usize;
                                candidates.insert(digit)
                                    .map_err(|_|
                                        SudokuParseError::InvalidNumber)?;
                            },
                            Some('0') =>
                                return Err(SudokuParseError::InvalidNumber),
                            Some(_) =>
                                return Err(
                                    SudokuParseError::UnexpectedCharacter),
                            None =>
                                return Err(SudokuParseError::MalformedBraces)
                        }
                    }

                    if candidates.is_empty() {
                        return Err(SudokuParseError::EmptyCandidates);
                    }

                    cells.push(Cell::Unsolved(candidates));
                },
                '}' => return Err(SudokuParseError::MalformedBraces),
                c if c.is_whitespace() => { },
                _ => return Err(SudokuParseError::UnexpectedCharacter)
            }
        }

        if cells.len() != SIZE * SIZE {
            return Err(SudokuParseError::WrongNumberOfCells);
        }

        Ok(CandidateGrid { cells })
    }

    /// Gets the cell at the given position.
    pub fn cell(&self, position: Position) -> Cell {
        self.cells[index(position.row, position.column)]
    }

    /// Returns the candidate set of the cell at the given position, or `None`
    /// if that cell is solved.
    pub fn candidates(&self, position: Position) -> Option<DigitSet> {
        self.cell(position).candidates()
    }

    /// Returns the positions of all unsolved cells in reading order.
    pub fn unsolved_positions(&self) -> Vec<Position> {
        all_positions().into_iter()
            .filter(|position| !self.cell(*position).is_solved())
            .collect()
    }

    /// Returns the positions of all unsolved cells which have the given digit
    /// as a candidate, in reading order.
    pub fn positions_with_candidate(&self, digit: usize) -> Vec<Position> {
        all_positions().into_iter()
            .filter(|position|
                self.candidates(*position)
                    .map_or(false, |candidates| candidates.contains(digit)))
            .collect()
    }

    /// Indicates whether all cells of this grid are solved.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Cell::is_solved)
    }

    /// Indicates whether any unsolved cell of this grid has run out of
    /// candidates, which proves that the grid cannot be completed.
    pub fn has_empty_candidates(&self) -> bool {
        self.cells.iter()
            .any(|cell| match cell {
                Cell::Solved(_) => false,
                Cell::Unsolved(candidates) => candidates.is_empty()
            })
    }

    /// Converts this candidate grid into a [SudokuGrid] that contains the
    /// digits of all solved cells and leaves all unsolved cells empty.
    pub fn to_grid(&self) -> SudokuGrid {
        let cells = self.cells.iter()
            .map(Cell::value)
            .collect();
        SudokuGrid { cells }
    }

    /// Sets the cell at the given position to the given digit. The cell must
    /// be unsolved and the digit must be one of its candidates.
    ///
    /// # Errors
    ///
    /// If the cell is already solved or the digit is not a candidate for it.
    /// In that case, `SudokuError::NotACandidate` is returned.
    pub fn set_value(&mut self, position: Position, digit: usize)
            -> SudokuResult<()> {
        check_digit(digit)?;
        let cell = &mut self.cells[index(position.row, position.column)];

        match cell {
            Cell::Unsolved(candidates) if candidates.contains(digit) => {
                *cell = Cell::Solved(digit);
                Ok(())
            },
            _ => Err(SudokuError::NotACandidate)
        }
    }

    /// Removes the given digits from the candidate set of the cell at the
    /// given position. The cell must be unsolved and every removed digit must
    /// currently be one of its candidates.
    ///
    /// # Errors
    ///
    /// If the cell is solved or any digit is not a candidate for it. In that
    /// case, `SudokuError::NotACandidate` is returned.
    pub fn remove_candidates(&mut self, position: Position, digits: DigitSet)
            -> SudokuResult<()> {
        let cell = &mut self.cells[index(position.row, position.column)];

        match cell {
            Cell::Unsolved(candidates) => {
                if (*candidates & digits) != digits {
                    return Err(SudokuError::NotACandidate);
                }

                *candidates -= digits;
                Ok(())
            },
            _ => Err(SudokuError::NotACandidate)
        }
    }
}
