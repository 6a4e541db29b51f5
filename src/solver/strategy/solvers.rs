//! This module contains the solvers which are driven by [Strategy]
//! implementations.

use crate::{CandidateGrid, Position, SudokuGrid, SIZE};
use crate::error::SudokuResult;
use crate::modification::Modification;
use crate::solver::{BacktrackingSolver, Solution, Solver};
use crate::solver::strategy::{
    AlternatingInferenceChainsStrategy,
    GroupedXCyclesStrategy,
    HiddenSingleStrategy,
    MedusaStrategy,
    NakedSingleStrategy,
    PruneCandidatesStrategy,
    SimpleColoringStrategy,
    Strategy,
    XCyclesStrategy,
    XyChainsStrategy
};

/// The default strategy pipeline, ordered from cheapest to most expensive.
fn default_strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(PruneCandidatesStrategy),
        Box::new(NakedSingleStrategy),
        Box::new(HiddenSingleStrategy),
        Box::new(SimpleColoringStrategy),
        Box::new(XCyclesStrategy),
        Box::new(XyChainsStrategy),
        Box::new(MedusaStrategy),
        Box::new(GroupedXCyclesStrategy),
        Box::new(AlternatingInferenceChainsStrategy)
    ]
}

fn first_modifications(strategies: &[Box<dyn Strategy>],
        grid: &CandidateGrid) -> Vec<Modification> {
    for strategy in strategies {
        let modifications = strategy.apply(grid);

        if !modifications.is_empty() {
            return modifications;
        }
    }

    Vec::new()
}

fn apply_modification(grid: &mut CandidateGrid, modification: Modification)
        -> SudokuResult<()> {
    match modification {
        Modification::SetValue(set_value) =>
            grid.set_value(set_value.position(), set_value.digit()),
        Modification::RemoveCandidates(remove_candidates) =>
            grid.remove_candidates(remove_candidates.position(),
                remove_candidates.digits())
    }
}

fn solve_logically(strategies: &[Box<dyn Strategy>], grid: &SudokuGrid)
        -> SudokuResult<Option<SudokuGrid>> {
    let mut candidates = CandidateGrid::from_grid(grid);

    while !candidates.is_full() {
        let modifications = first_modifications(strategies, &candidates);

        if modifications.is_empty() {
            return Ok(None);
        }

        for modification in modifications {
            apply_modification(&mut candidates, modification)?;
        }
    }

    Ok(Some(candidates.to_grid()))
}

/// A [Solver] which first consults a [BacktrackingSolver] acting as an
/// oracle and only attempts a logical solution if the oracle reports the
/// grid to be uniquely solvable. The strategies are tried in order on every
/// iteration and the first one that yields any modifications is applied, so
/// cheap strategies handle as much of the work as possible.
///
/// Grids without a unique solution are reported as [Solution::Impossible] or
/// [Solution::Ambiguous] without running any strategy, since the chain-based
/// strategies are only meaningful on solvable grids.
pub struct StrategicSolver {
    strategies: Vec<Box<dyn Strategy>>
}

impl StrategicSolver {

    /// Creates a new strategic solver that applies the given strategies in
    /// order.
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> StrategicSolver {
        StrategicSolver { strategies }
    }
}

impl Default for StrategicSolver {
    fn default() -> StrategicSolver {
        StrategicSolver::new(default_strategies())
    }
}

impl Solver for StrategicSolver {
    fn solve(&self, grid: &SudokuGrid) -> Solution {
        let oracle_solution = BacktrackingSolver.solve(grid);

        match &oracle_solution {
            Solution::Unique(_) => { },
            _ => return oracle_solution
        }

        match solve_logically(&self.strategies, grid) {
            Ok(Some(solved)) => Solution::Unique(solved),
            _ => oracle_solution
        }
    }
}

/// A perfect [Solver] which uses strategies to accelerate a backtracking
/// search. Strategies are applied until they make no more progress, then the
/// solver branches on the candidates of the cell with the fewest options.
/// Under the assumption that the strategies are sound, this yields the same
/// result as a plain [BacktrackingSolver].
pub struct StrategicBacktrackingSolver {
    strategies: Vec<Box<dyn Strategy>>
}

fn find_min_candidates(grid: &CandidateGrid) -> Option<Position> {
    let mut min_position = None;
    let mut min_len = SIZE + 1;

    for position in grid.unsolved_positions() {
        if let Some(candidates) = grid.candidates(position) {
            if candidates.len() < min_len {
                min_len = candidates.len();
                min_position = Some(position);
            }
        }
    }

    min_position
}

fn to_solution(grid: &CandidateGrid) -> Option<Solution> {
    if grid.is_full() {
        let solved = grid.to_grid();

        if solved.is_valid() {
            Some(Solution::Unique(solved))
        }
        else {
            Some(Solution::Impossible)
        }
    }
    else if grid.has_empty_candidates() {
        Some(Solution::Impossible)
    }
    else {
        None
    }
}

impl StrategicBacktrackingSolver {

    /// Creates a new strategic backtracking solver that uses the given
    /// strategies.
    pub fn new(strategies: Vec<Box<dyn Strategy>>)
            -> StrategicBacktrackingSolver {
        StrategicBacktrackingSolver { strategies }
    }

    fn solve_rec(&self, grid: &mut CandidateGrid) -> Solution {
        loop {
            if let Some(solution) = to_solution(grid) {
                return solution;
            }

            let modifications = first_modifications(&self.strategies, grid);

            if modifications.is_empty() {
                break;
            }

            for modification in modifications {
                if apply_modification(grid, modification).is_err() {
                    return Solution::Impossible;
                }
            }
        }

        let position = match find_min_candidates(grid) {
            Some(position) => position,
            None => return Solution::Impossible
        };
        let candidates = match grid.candidates(position) {
            Some(candidates) => candidates,
            None => return Solution::Impossible
        };
        let mut solution = Solution::Impossible;

        for digit in candidates {
            let mut next_grid = grid.clone();

            if next_grid.set_value(position, digit).is_err() {
                continue;
            }

            let next_solution = self.solve_rec(&mut next_grid);
            solution = solution.union(next_solution);

            if solution == Solution::Ambiguous {
                break;
            }
        }

        solution
    }
}

impl Default for StrategicBacktrackingSolver {
    fn default() -> StrategicBacktrackingSolver {
        StrategicBacktrackingSolver::new(default_strategies())
    }
}

impl Solver for StrategicBacktrackingSolver {
    fn solve(&self, grid: &SudokuGrid) -> Solution {
        self.solve_rec(&mut CandidateGrid::from_grid(grid))
    }
}
