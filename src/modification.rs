//! This module defines the [Modification] type, which describes a single
//! change that a deduction strategy wants to apply to a
//! [CandidateGrid](crate::CandidateGrid): either solving a cell with a
//! definite digit or removing candidates from an unsolved cell. Strategies
//! return modifications instead of mutating the grid, so deductions can be
//! inspected, tested, and applied in a controlled order.

use crate::Position;
use crate::error::{SudokuError, SudokuResult};
use crate::util::DigitSet;

use std::collections::{HashMap, HashSet};

/// A modification that solves a cell by assigning it a definite digit.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SetValue {
    position: Position,
    digit: usize
}

impl SetValue {

    /// Creates a new set-value modification for the cell at the given
    /// position.
    ///
    /// # Errors
    ///
    /// If `digit` is less than 1 or greater than 9. In that case,
    /// `SudokuError::InvalidNumber` is returned.
    pub fn new(position: Position, digit: usize) -> SudokuResult<SetValue> {
        if digit < 1 || digit > crate::SIZE {
            Err(SudokuError::InvalidNumber)
        }
        else {
            Ok(SetValue { position, digit })
        }
    }

    /// The position of the cell this modification solves.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The digit assigned to the cell.
    pub fn digit(&self) -> usize {
        self.digit
    }
}

/// A modification that removes one or more candidates from an unsolved cell.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RemoveCandidates {
    position: Position,
    digits: DigitSet
}

impl RemoveCandidates {

    /// Creates a new candidate-removal modification for the cell at the given
    /// position.
    ///
    /// # Errors
    ///
    /// If `digits` is empty. In that case, `SudokuError::InvalidNumber` is
    /// returned.
    pub fn new(position: Position, digits: DigitSet)
            -> SudokuResult<RemoveCandidates> {
        if digits.is_empty() {
            Err(SudokuError::InvalidNumber)
        }
        else {
            Ok(RemoveCandidates { position, digits })
        }
    }

    /// The position of the cell whose candidates are removed.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The set of removed candidate digits.
    pub fn digits(&self) -> DigitSet {
        self.digits
    }
}

/// A single change to a [CandidateGrid](crate::CandidateGrid) deduced by a
/// strategy.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Modification {

    /// Solve a cell with a definite digit.
    SetValue(SetValue),

    /// Remove candidates from an unsolved cell.
    RemoveCandidates(RemoveCandidates)
}

impl Modification {

    /// The position of the cell this modification affects.
    pub fn position(&self) -> Position {
        match self {
            Modification::SetValue(set_value) => set_value.position(),
            Modification::RemoveCandidates(remove_candidates) =>
                remove_candidates.position()
        }
    }

    /// The row index of the affected cell.
    pub fn row(&self) -> usize {
        self.position().row
    }

    /// The column index of the affected cell.
    pub fn column(&self) -> usize {
        self.position().column
    }
}

/// Creates a [Modification](crate::modification::Modification) that solves
/// the cell at the given row and column with the given digit.
///
/// # Example
///
/// ```
/// use sudoku_chains::set_value;
///
/// let modification = set_value!(3, 7, 5);
/// assert_eq!(3, modification.row());
/// assert_eq!(7, modification.column());
/// ```
#[macro_export]
macro_rules! set_value {
    ($row:expr, $column:expr, $digit:expr) => {
        $crate::modification::Modification::SetValue(
            $crate::modification::SetValue::new(
                $crate::Position::new($row, $column).unwrap(), $digit)
                .unwrap())
    };
}

/// Creates a [Modification](crate::modification::Modification) that removes
/// the listed candidate digits from the cell at the given row and column.
///
/// # Example
///
/// ```
/// use sudoku_chains::{digits, remove_candidates};
///
/// let modification = remove_candidates!(0, 4; 2, 7);
/// assert_eq!(0, modification.row());
/// assert_eq!(4, modification.column());
/// ```
#[macro_export]
macro_rules! remove_candidates {
    ($row:expr, $column:expr; $($digits:expr),+) => {
        $crate::modification::Modification::RemoveCandidates(
            $crate::modification::RemoveCandidates::new(
                $crate::Position::new($row, $column).unwrap(),
                $crate::digits!($($digits),+))
                .unwrap())
    };
}

/// Merges a list of single-candidate removals into one
/// [Modification::RemoveCandidates] per affected cell and sorts the result by
/// row, then column. Duplicate entries collapse.
pub(crate) fn merge_removals(removals: Vec<(Position, usize)>)
        -> Vec<Modification> {
    let mut by_position: HashMap<Position, DigitSet> = HashMap::new();

    for (position, digit) in removals {
        if let Ok(singleton) = DigitSet::singleton(digit) {
            by_position.entry(position)
                .or_insert_with(DigitSet::new)
                .union_assign(&singleton);
        }
    }

    let mut modifications: Vec<Modification> = by_position.into_iter()
        .map(|(position, digits)|
            Modification::RemoveCandidates(RemoveCandidates {
                position,
                digits
            }))
        .collect();
    sort_by_position(&mut modifications);
    modifications
}

/// Deduplicates a list of cell solutions and sorts the resulting
/// [Modification::SetValue]s by row, then column.
pub(crate) fn merge_set_values(set_values: Vec<(Position, usize)>)
        -> Vec<Modification> {
    let unique: HashSet<(Position, usize)> = set_values.into_iter().collect();
    let mut modifications: Vec<Modification> = unique.into_iter()
        .map(|(position, digit)|
            Modification::SetValue(SetValue { position, digit }))
        .collect();
    sort_by_position(&mut modifications);
    modifications
}

/// Sorts modifications by row, then column.
pub(crate) fn sort_by_position(modifications: &mut Vec<Modification>) {
    modifications.sort_by_key(|modification|
        (modification.row(), modification.column()));
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::digits;

    fn pos(row: usize, column: usize) -> Position {
        Position::new(row, column).unwrap()
    }

    #[test]
    fn set_value_rejects_invalid_digit() {
        assert_eq!(Err(SudokuError::InvalidNumber),
            SetValue::new(pos(0, 0), 0));
        assert_eq!(Err(SudokuError::InvalidNumber),
            SetValue::new(pos(0, 0), 10));
    }

    #[test]
    fn remove_candidates_rejects_empty_set() {
        assert_eq!(Err(SudokuError::InvalidNumber),
            RemoveCandidates::new(pos(0, 0), DigitSet::new()));
    }

    #[test]
    fn macros_construct_expected_modifications() {
        let set = set_value!(2, 5, 9);
        assert_eq!(Modification::SetValue(
            SetValue::new(pos(2, 5), 9).unwrap()), set);

        let remove = remove_candidates!(4, 1; 3, 6);
        assert_eq!(Modification::RemoveCandidates(
            RemoveCandidates::new(pos(4, 1), digits!(3, 6)).unwrap()),
            remove);
    }

    #[test]
    fn merge_removals_collapses_same_cell() {
        let merged = merge_removals(vec![
            (pos(5, 5), 2),
            (pos(0, 3), 7),
            (pos(5, 5), 8),
            (pos(0, 3), 7)
        ]);
        assert_eq!(vec![
            remove_candidates!(0, 3; 7),
            remove_candidates!(5, 5; 2, 8)
        ], merged);
    }

    #[test]
    fn merge_set_values_deduplicates_and_sorts() {
        let merged = merge_set_values(vec![
            (pos(8, 0), 4),
            (pos(1, 2), 6),
            (pos(8, 0), 4)
        ]);
        assert_eq!(vec![
            set_value!(1, 2, 6),
            set_value!(8, 0, 4)
        ], merged);
    }
}
