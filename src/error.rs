//! This module contains some error and result definitions used in this crate.

/// Miscellaneous errors that can occur on some methods in the
/// [root module](../index.html). This does not exclude errors that occur when
/// parsing grids, see [SudokuParseError](enum.SudokuParseError.html) for
/// that.
#[derive(Debug, Eq, PartialEq)]
pub enum SudokuError {

    /// Indicates that the specified coordinates (column and row) lie outside
    /// the Sudoku grid. This is the case if they are greater than or equal to
    /// 9.
    OutOfBounds,

    /// Indicates that some digit is invalid. This is the case if it is less
    /// than 1 or greater than 9.
    InvalidNumber,

    /// Indicates that a digit was set or removed at a cell for which it is
    /// not a candidate, or that a candidate operation was attempted on a cell
    /// that is already solved.
    NotACandidate,

    /// Indicates that a group of cells does not form a valid link-graph group
    /// node. Groups must contain two or three cells which share a block as
    /// well as a row or a column.
    InvalidGroup
}

/// Syntactic sugar for `Result<V, SudokuError>`.
pub type SudokuResult<V> = Result<V, SudokuError>;

/// An enumeration of the errors that may occur when parsing a `SudokuGrid` or
/// a `CandidateGrid`.
#[derive(Debug, Eq, PartialEq)]
pub enum SudokuParseError {

    /// Indicates that the code does not describe exactly 81 cells.
    WrongNumberOfCells,

    /// Indicates that the code contains a character that does not belong to
    /// any cell, that is, anything other than the digits 0 to 9, `.`, and
    /// well-formed braces in the candidate notation.
    UnexpectedCharacter,

    /// Indicates that a candidate list opened with `{` is never closed, or
    /// closed without having been opened.
    MalformedBraces,

    /// Indicates that a candidate list contains no digits. Unsolved cells
    /// must have at least one candidate.
    EmptyCandidates,

    /// Indicates that a cell is filled with an invalid digit (i.e. 0 inside a
    /// candidate list).
    InvalidNumber
}

/// Syntactic sugar for `Result<V, SudokuParseError>`.
pub type SudokuParseResult<V> = Result<V, SudokuParseError>;
