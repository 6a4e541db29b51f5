//! This module contains the basic strategies: candidate pruning and the two
//! single-cell deductions. These are cheap enough to run on every iteration
//! of a [StrategicSolver](crate::solver::strategy::StrategicSolver) and
//! handle the bulk of the work on easier puzzles.

use crate::{all_positions, all_units, CandidateGrid};
use crate::modification::{merge_removals, merge_set_values, Modification};
use crate::solver::strategy::Strategy;
use crate::util::DigitSet;

/// A [Strategy] which removes candidates that conflict with solved cells: if
/// a cell is solved, no other cell in the same row, column, or block can
/// have that digit as a candidate.
///
/// This is the first strategy to run on a freshly created
/// [CandidateGrid], since [CandidateGrid::from_grid] assigns all nine
/// candidates to every unsolved cell.
#[derive(Clone)]
pub struct PruneCandidatesStrategy;

impl Strategy for PruneCandidatesStrategy {
    fn apply(&self, grid: &CandidateGrid) -> Vec<Modification> {
        let mut removals = Vec::new();

        for position in grid.unsolved_positions() {
            let mut visible = DigitSet::new();

            for other in all_positions() {
                if position.sees(other) {
                    if let Some(digit) = grid.cell(other).value() {
                        if let Ok(singleton) = DigitSet::singleton(digit) {
                            visible.union_assign(&singleton);
                        }
                    }
                }
            }

            if let Some(candidates) = grid.candidates(position) {
                for digit in candidates & visible {
                    removals.push((position, digit));
                }
            }
        }

        merge_removals(removals)
    }
}

/// A [Strategy] which detects naked singles, that is, unsolved cells with
/// exactly one remaining candidate, and solves them with that candidate.
///
/// As a small example, take a look at the following grid:
///
/// ```text
/// ╔═══╤═══╤═══╦═══
/// ║ X │ 1 │   ║
/// ╟───┼───┼───╫───
/// ║   │   │ 2 ║
/// ╟───┼───┼───╫───
/// ║ 3 │   │   ║
/// ╠═══╪═══╪═══╬═══
/// ║ 4 │   │   ║
/// ...
/// ```
///
/// If the remaining units exclude the digits 5 to 9 for the cell marked with
/// X, its candidate set after pruning contains only one digit, which this
/// strategy then enters.
#[derive(Clone)]
pub struct NakedSingleStrategy;

impl Strategy for NakedSingleStrategy {
    fn apply(&self, grid: &CandidateGrid) -> Vec<Modification> {
        let mut set_values = Vec::new();

        for position in grid.unsolved_positions() {
            if let Some(candidates) = grid.candidates(position) {
                if candidates.len() == 1 {
                    if let Some(digit) = candidates.iter().next() {
                        set_values.push((position, digit));
                    }
                }
            }
        }

        merge_set_values(set_values)
    }
}

/// A [Strategy] which detects hidden singles: if a digit is a candidate of
/// exactly one cell in a unit, then that cell must contain the digit, even
/// if the cell has other candidates as well.
#[derive(Clone)]
pub struct HiddenSingleStrategy;

impl Strategy for HiddenSingleStrategy {
    fn apply(&self, grid: &CandidateGrid) -> Vec<Modification> {
        let mut set_values = Vec::new();

        for unit in all_units() {
            for digit in DigitSet::full() {
                let mut with_candidate = unit.iter()
                    .filter(|&&position|
                        grid.candidates(position)
                            .map_or(false,
                                |candidates| candidates.contains(digit)));

                match (with_candidate.next(), with_candidate.next()) {
                    (Some(&position), None) =>
                        set_values.push((position, digit)),
                    _ => { }
                }
            }
        }

        merge_set_values(set_values)
    }
}
