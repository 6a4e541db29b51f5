//! XY-Chains. See <https://www.sudokuwiki.org/XY_Chains> for an explanation
//! of the technique.

use crate::CandidateGrid;
use crate::modification::{merge_removals, Modification};
use crate::solver::graph::{self, Candidate, Strength};
use crate::solver::strategy::Strategy;
use crate::util::zip_every_pair;

use petgraph::graphmap::{GraphMap, UnGraphMap};

use std::collections::HashMap;

/// Applies XY-Chains to the given grid.
///
/// An XY-Chains graph includes all digits at once. Each vertex is a
/// particular candidate in a cell. A strong link connects the two candidates
/// of a cell when they are the only candidates of that cell. A weak link
/// connects two vertices with the same digit in different cells of the same
/// unit. An XY-Chain is a chain between two vertices with the same digit
/// whose edges alternate between strong and weak links, beginning and ending
/// with a strong link (where a strong link may take the place of a weak
/// link). One of the two end points must be the solution, so the digit can
/// be removed from every cell that sees both end points.
pub fn xy_chains(grid: &CandidateGrid) -> Vec<Modification> {
    let mut chain = create_strong_links(grid);
    add_weak_links(&mut chain);

    let mut by_digit: HashMap<usize, Vec<Candidate>> = HashMap::new();

    for vertex in chain.nodes() {
        by_digit.entry(vertex.digit).or_insert_with(Vec::new).push(vertex);
    }

    let mut removals = Vec::new();

    for (&digit, vertices) in &by_digit {
        for (a, b) in zip_every_pair(vertices) {
            let visible: Vec<_> = grid.positions_with_candidate(digit)
                .into_iter()
                .filter(|&cell|
                    cell != a.position && cell != b.position &&
                        cell.sees(a.position) && cell.sees(b.position))
                .collect();

            if !visible.is_empty() &&
                    graph::alternating_path_exists(&chain, a, b) {
                removals.extend(visible.into_iter()
                    .map(|cell| (cell, digit)));
            }
        }
    }

    merge_removals(removals)
}

fn create_strong_links(grid: &CandidateGrid)
        -> UnGraphMap<Candidate, Strength> {
    let edges = grid.unsolved_positions().into_iter()
        .filter_map(|position| {
            let candidates = grid.candidates(position)?;

            if candidates.len() != 2 {
                return None;
            }

            let mut digits = candidates.iter();
            let first = digits.next()?;
            let second = digits.next()?;
            Some((
                Candidate { position, digit: first },
                Candidate { position, digit: second },
                Strength::Strong
            ))
        });
    GraphMap::from_edges(edges)
}

fn add_weak_links(chain: &mut UnGraphMap<Candidate, Strength>) {
    let vertices: Vec<Candidate> = chain.nodes().collect();
    let edges: Vec<_> = zip_every_pair(&vertices)
        .filter(|(a, b)| a.digit == b.digit && a.position.sees(b.position))
        .map(|(a, b)| (a, b, Strength::Weak))
        .collect();

    for (a, b, strength) in edges {
        chain.add_edge(a, b, strength);
    }
}

/// A [Strategy] which applies [xy_chains].
#[derive(Clone)]
pub struct XyChainsStrategy;

impl Strategy for XyChainsStrategy {
    fn apply(&self, grid: &CandidateGrid) -> Vec<Modification> {
        xy_chains(grid)
    }
}
