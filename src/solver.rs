//! This module contains the solving machinery of this crate.
//!
//! The central pieces are the [Solver](trait.Solver.html) trait and the
//! [BacktrackingSolver](struct.BacktrackingSolver.html), a perfect solver
//! that serves as the ground-truth oracle for everything else. The
//! [strategy](strategy/index.html) submodule builds logical solvers on top
//! of it.

pub mod graph;
pub mod strategy;

use crate::{SIZE, SudokuGrid};

/// The verdict a solver reaches about a Sudoku grid. For a perfect solver
/// the three variants partition all grids; a weaker solver may report
/// `Solution::Ambiguous` for a grid it simply cannot crack, even though the
/// grid actually has exactly one solution or none.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Solution {

    /// No assignment of digits completes the grid.
    Impossible,

    /// Exactly one assignment completes the grid; the completed grid is
    /// wrapped in this variant.
    Unique(SudokuGrid),

    /// More than one assignment completes the grid, or the solver could not
    /// decide between the other two variants.
    Ambiguous
}

impl Solution {

    /// Combines the verdicts of two disjoint search branches:
    ///
    /// * `Solution::Impossible` is the neutral element.
    /// * `Solution::Ambiguous` is absorbing.
    /// * Two `Solution::Unique` verdicts combine into `Solution::Unique` if
    /// they carry the same grid and into `Solution::Ambiguous` otherwise.
    pub fn union(self, other: Solution) -> Solution {
        match (self, other) {
            (Solution::Impossible, other) => other,
            (solution, Solution::Impossible) => solution,
            (Solution::Unique(g), Solution::Unique(other_g)) =>
                if g == other_g {
                    Solution::Unique(g)
                }
                else {
                    Solution::Ambiguous
                },
            _ => Solution::Ambiguous
        }
    }
}

/// A trait for structs that can totally or partially solve Sudoku. A perfect
/// solver classifies every grid correctly, while a weaker one, comparable to
/// a human of limited experience, is allowed to give up and report
/// [Solution::Ambiguous] for grids beyond its power.
pub trait Solver {

    /// Attempts to solve the given Sudoku grid. Implementations that can
    /// neither find a unique solution nor prove the grid impossible must
    /// return `Solution::Ambiguous`.
    fn solve(&self, grid: &SudokuGrid) -> Solution;
}

/// A perfect [Solver](trait.Solver.html) that recursively tries every digit
/// consistent with the Sudoku rules in every empty cell. It classifies any
/// grid correctly, at the price of exponential worst-case runtime on grids
/// with many empty cells.
///
/// The search keeps the first completed assignment and aborts as soon as a
/// second distinct completion appears, so ambiguous grids do not require an
/// exhaustive enumeration of all their solutions.
pub struct BacktrackingSolver;

impl BacktrackingSolver {
    fn solve_rec(grid: &mut SudokuGrid, row: usize, column: usize)
            -> Solution {
        if row == SIZE {
            return Solution::Unique(grid.clone());
        }

        let next_column = (column + 1) % SIZE;
        let next_row = if next_column == 0 { row + 1 } else { row };

        if grid.get_cell(row, column).unwrap().is_some() {
            BacktrackingSolver::solve_rec(grid, next_row, next_column)
        }
        else {
            let mut solution = Solution::Impossible;

            for digit in 1..=SIZE {
                if grid.is_valid_number(row, column, digit).unwrap() {
                    grid.set_cell(row, column, digit).unwrap();
                    let next_solution =
                        BacktrackingSolver::solve_rec(grid, next_row,
                            next_column);
                    grid.clear_cell(row, column).unwrap();
                    solution = solution.union(next_solution);

                    if solution == Solution::Ambiguous {
                        break;
                    }
                }
            }

            solution
        }
    }
}

impl Solver for BacktrackingSolver {
    fn solve(&self, grid: &SudokuGrid) -> Solution {
        if !grid.is_valid() {
            return Solution::Impossible;
        }

        if grid.is_full() {
            return Solution::Unique(grid.clone());
        }

        let mut grid = grid.clone();
        BacktrackingSolver::solve_rec(&mut grid, 0, 0)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn solve(code: &str) -> Solution {
        let grid = SudokuGrid::parse(code).unwrap();
        BacktrackingSolver.solve(&grid)
    }

    #[test]
    fn backtracking_solver_finds_unique_solution() {
        let solution = solve(
            "010040560230615080000800100050020008600781005900060020006008000080473056045090010");
        let expected = SudokuGrid::parse(
            "817942563234615789569837142451329678623781495978564321796158234182473956345296817")
            .unwrap();
        assert_eq!(Solution::Unique(expected), solution);
    }

    #[test]
    fn backtracking_solver_detects_impossible_grid() {
        let solution = solve(
            "710040560230615080000800100050020008600781005900060020006008000080473056045090010");
        assert_eq!(Solution::Impossible, solution);
    }

    #[test]
    fn backtracking_solver_detects_ambiguous_grid() {
        let solution = solve(
            "000000560230615080000800100050020008600781005900060020006008000080473056045090010");
        assert_eq!(Solution::Ambiguous, solution);
    }

    #[test]
    fn backtracking_solver_accepts_solved_grid() {
        let code =
            "817942563234615789569837142451329678623781495978564321796158234182473956345296817";
        let grid = SudokuGrid::parse(code).unwrap();
        assert_eq!(Solution::Unique(grid.clone()),
            BacktrackingSolver.solve(&grid));
    }

    #[test]
    fn backtracking_solver_rejects_invalid_filled_grid() {
        let solution = solve(
            "817942563234615789569837142451329678623781495978564321796158234182473956345296818");
        assert_eq!(Solution::Impossible, solution);
    }

    #[test]
    fn solution_union() {
        let grid = SudokuGrid::parse(
            "817942563234615789569837142451329678623781495978564321796158234182473956345296817")
            .unwrap();
        let unique = Solution::Unique(grid.clone());
        assert_eq!(unique.clone(),
            Solution::Impossible.union(unique.clone()));
        assert_eq!(unique.clone(),
            unique.clone().union(Solution::Impossible));
        assert_eq!(Solution::Ambiguous,
            unique.clone().union(Solution::Ambiguous));
        assert_eq!(unique.clone(), unique.clone().union(unique.clone()));
        assert_eq!(Solution::Impossible,
            Solution::Impossible.union(Solution::Impossible));
    }
}
