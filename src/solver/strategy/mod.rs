//! This module is about strategic solving of Sudoku. In contrast to
//! backtracking, strategies mimic the deductions a human solver would make.
//! Every strategy inspects a [CandidateGrid] and yields the
//! [Modification]s it can justify, without mutating the grid itself. The
//! [StrategicSolver] combines a list of strategies into a full solving
//! pipeline, trying cheap strategies first and escalating to the more
//! expensive chain-based ones only when necessary.
//!
//! The pre-defined strategies, roughly in order of cost:
//!
//! * [PruneCandidatesStrategy], [NakedSingleStrategy], [HiddenSingleStrategy]
//! * [SimpleColoringStrategy]
//! * [XCyclesStrategy], [XyChainsStrategy], [MedusaStrategy]
//! * [GroupedXCyclesStrategy], [AlternatingInferenceChainsStrategy]
//!
//! # Implementing a custom strategy
//!
//! A strategy only requires the [Strategy::apply] method, which takes the
//! current candidate grid and returns all modifications the strategy can
//! deduce. Returning an empty vector indicates that the strategy found
//! nothing. As an example, the following strategy solves every cell whose
//! only remaining candidate is a 1, which is a subset of the
//! [NakedSingleStrategy].
//!
//! ```
//! use sudoku_chains::{digits, CandidateGrid};
//! use sudoku_chains::modification::Modification;
//! use sudoku_chains::set_value;
//! use sudoku_chains::solver::strategy::Strategy;
//!
//! struct NakedOneStrategy;
//!
//! impl Strategy for NakedOneStrategy {
//!     fn apply(&self, grid: &CandidateGrid) -> Vec<Modification> {
//!         grid.unsolved_positions().into_iter()
//!             .filter(|&position| grid.candidates(position) == Some(digits!(1)))
//!             .map(|position| set_value!(position.row(), position.column(), 1))
//!             .collect()
//!     }
//! }
//! ```

pub(crate) mod aic;
pub(crate) mod coloring;
pub(crate) mod grouped_x_cycles;
pub(crate) mod impls;
pub(crate) mod medusa;
pub(crate) mod solvers;
pub(crate) mod x_cycles;
pub(crate) mod xy_chains;

pub use aic::AlternatingInferenceChainsStrategy;
pub use coloring::SimpleColoringStrategy;
pub use grouped_x_cycles::GroupedXCyclesStrategy;
pub use impls::{
    HiddenSingleStrategy,
    NakedSingleStrategy,
    PruneCandidatesStrategy
};
pub use medusa::MedusaStrategy;
pub use solvers::{StrategicBacktrackingSolver, StrategicSolver};
pub use x_cycles::XCyclesStrategy;
pub use xy_chains::XyChainsStrategy;

use crate::CandidateGrid;
use crate::modification::Modification;

/// A trait for strategies that deduce Sudoku solving steps the way a human
/// would. Strategies never guess: every modification they return must follow
/// logically from the current candidate state.
pub trait Strategy {

    /// Applies this strategy to the given candidate grid and returns all
    /// modifications it can deduce. An empty vector indicates that the
    /// strategy found nothing; the caller may then try a more powerful
    /// strategy. The returned modifications are sorted by row, then column.
    fn apply(&self, grid: &CandidateGrid) -> Vec<Modification>;
}
